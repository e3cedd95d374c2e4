//! Loading of the `repositories:` YAML manifest.

use crate::category::Category;
use crate::error::{InstallerError, Result};
use crate::repository::{self, RepositorySpec};
use serde::Deserialize;
use std::path::Path;

/// Parsed manifest file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Overrides the default host prefix for short-form identifiers
    #[serde(default)]
    pub host: Option<String>,
    pub repositories: Repositories,
}

/// Repository identifiers grouped by category, in file order
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Repositories {
    #[serde(default)]
    lisp: Option<Vec<RepositorySpec>>,
    #[serde(default)]
    font: Option<Vec<RepositorySpec>>,
}

impl Repositories {
    /// Identifiers listed for `category`; a missing or null key is empty
    pub fn get(&self, category: Category) -> &[RepositorySpec] {
        let list = match category {
            Category::Lisp => &self.lisp,
            Category::Font => &self.font,
        };
        list.as_deref().unwrap_or(&[])
    }
}

impl Manifest {
    /// Read and validate a manifest from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| InstallerError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Self::parse(&content).map_err(|message| InstallerError::Config {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Parse manifest text. Errors are returned as plain messages so the
    /// caller can attach the file they came from.
    pub fn parse(content: &str) -> std::result::Result<Self, String> {
        let manifest: Manifest = serde_yaml::from_str(content).map_err(|e| e.to_string())?;

        for category in Category::all() {
            for (index, spec) in manifest.repositories.get(*category).iter().enumerate() {
                if spec.as_str().trim().is_empty() {
                    return Err(format!(
                        "repositories.{}[{}] is an empty identifier",
                        category.name(),
                        index
                    ));
                }
                if !repository::is_valid_folder_name(&spec.folder_name()) {
                    return Err(format!(
                        "repositories.{}[{}] ({}) does not name a folder to clone into",
                        category.name(),
                        index,
                        spec
                    ));
                }
            }
        }

        Ok(manifest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_full() {
        let manifest = Manifest::parse(
            r#"
host: https://example.org
repositories:
  lisp:
    - user1/pkg-a
    - user2/pkg-b
  font:
    - adobe-fonts/source-code-pro
"#,
        )
        .unwrap();

        assert_eq!(manifest.host.as_deref(), Some("https://example.org"));
        let lisp: Vec<&str> = manifest
            .repositories
            .get(Category::Lisp)
            .iter()
            .map(|s| s.as_str())
            .collect();
        assert_eq!(lisp, vec!["user1/pkg-a", "user2/pkg-b"]);
        assert_eq!(manifest.repositories.get(Category::Font).len(), 1);
    }

    #[test]
    fn test_missing_and_null_categories_are_empty() {
        let manifest = Manifest::parse("repositories:\n  lisp:\n").unwrap();
        assert!(manifest.repositories.get(Category::Lisp).is_empty());
        assert!(manifest.repositories.get(Category::Font).is_empty());
        assert!(manifest.host.is_none());
    }

    #[test]
    fn test_unknown_category_rejected() {
        let err = Manifest::parse("repositories:\n  themes:\n    - a/b\n").unwrap_err();
        assert!(err.contains("themes"), "{err}");
    }

    #[test]
    fn test_missing_repositories_key_rejected() {
        assert!(Manifest::parse("host: https://example.org\n").is_err());
    }

    #[test]
    fn test_blank_identifier_rejected() {
        let err = Manifest::parse("repositories:\n  font:\n    - '  '\n").unwrap_err();
        assert!(err.contains("repositories.font[0]"), "{err}");
    }

    #[test]
    fn test_identifier_without_folder_name_rejected() {
        for id in ["owner/.git", "owner/..", ".git", "owner/."] {
            let yaml = format!("repositories:\n  lisp:\n    - a/ok\n    - '{id}'\n");
            let err = Manifest::parse(&yaml).unwrap_err();
            assert!(err.contains("repositories.lisp[1]"), "{id}: {err}");
        }
    }

    #[test]
    fn test_load_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "repositories: [not, a, mapping]").unwrap();

        match Manifest::load(file.path()) {
            Err(InstallerError::Config { path, .. }) => assert_eq!(path, file.path()),
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = Manifest::load(&dir.path().join("repos.yml"));
        assert!(matches!(result, Err(InstallerError::Config { .. })));
    }
}
