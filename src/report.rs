use crate::category::Category;
use crate::repository::RepositorySpec;
use serde::Serialize;
use std::path::PathBuf;

/// What happened to one repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum Outcome {
    Cloned,
    /// Destination already existed, nothing was fetched
    AlreadyPresent,
    Failed { message: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct ItemReport {
    pub category: Category,
    pub id: RepositorySpec,
    pub url: String,
    pub destination: PathBuf,
    #[serde(flatten)]
    pub outcome: Outcome,
}

/// Summary of an `install_into` run
#[derive(Debug, Clone, Default, Serialize)]
pub struct InstallReport {
    /// The base directory was absent and nothing was attempted
    pub target_missing: bool,
    pub items: Vec<ItemReport>,
    /// Font files copied into the font directory
    pub fonts: Vec<PathBuf>,
    /// Informational messages such as skipped categories
    pub notices: Vec<String>,
}

impl InstallReport {
    pub fn record(&mut self, item: ItemReport) {
        self.items.push(item);
    }

    /// Fold the outcome of one install step into this report
    pub fn merge(&mut self, other: InstallReport) {
        self.target_missing |= other.target_missing;
        self.items.extend(other.items);
        self.fonts.extend(other.fonts);
        self.notices.extend(other.notices);
    }

    pub fn notice(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::warn!("{}", message);
        self.notices.push(message);
    }

    pub fn failures(&self) -> impl Iterator<Item = &ItemReport> {
        self.items
            .iter()
            .filter(|i| matches!(i.outcome, Outcome::Failed { .. }))
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }

    pub fn count(&self, outcome: &Outcome) -> usize {
        self.items.iter().filter(|i| &i.outcome == outcome).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(outcome: Outcome) -> ItemReport {
        ItemReport {
            category: Category::Lisp,
            id: "a/b".into(),
            url: "https://github.com/a/b".to_string(),
            destination: PathBuf::from("/t/lisp/b"),
            outcome,
        }
    }

    #[test]
    fn test_failures() {
        let mut report = InstallReport::default();
        report.record(item(Outcome::Cloned));
        assert!(!report.has_failures());

        report.record(item(Outcome::Failed {
            message: "exit status: 128".to_string(),
        }));
        assert!(report.has_failures());
        assert_eq!(report.failures().count(), 1);
        assert_eq!(report.count(&Outcome::Cloned), 1);
    }

    #[test]
    fn test_json_shape() {
        let mut report = InstallReport::default();
        report.record(item(Outcome::Failed {
            message: "boom".to_string(),
        }));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["items"][0]["status"], "failed");
        assert_eq!(json["items"][0]["message"], "boom");
        assert_eq!(json["items"][0]["category"], "lisp");
        assert_eq!(json["target_missing"], false);
    }
}
