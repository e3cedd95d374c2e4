use serde::{Deserialize, Serialize};

/// Host every short-form identifier is resolved against.
pub const DEFAULT_HOST: &str = "https://github.com";

/// Suffix stripped from the last path segment to name the checkout.
pub const GIT_SUFFIX: &str = ".git";

/// A remote repository as written in the manifest, e.g. `owner/name`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepositorySpec(String);

impl RepositorySpec {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the identifier already names a full URL (or scp-style remote)
    pub fn is_qualified(&self) -> bool {
        self.0.contains("://") || self.0.starts_with("git@")
    }

    /// Resolve against `host` unless the identifier is already qualified
    pub fn resolve(&self, host: &str) -> String {
        if self.is_qualified() {
            return self.0.clone();
        }

        format!(
            "{}/{}",
            host.trim_end_matches('/'),
            self.0.trim_start_matches('/')
        )
    }

    /// Local folder name: last path segment with one trailing `.git` removed
    pub fn folder_name(&self) -> String {
        folder_name(&self.0)
    }
}

/// Derive the checkout folder name from a url or identifier.
/// `foo.git` -> `foo`, `foo.git.git` -> `foo.git`, `foo.gittar` unchanged.
pub fn folder_name(reference: &str) -> String {
    let trimmed = reference.trim_end_matches('/');
    let base = trimmed
        .rsplit(|c: char| c == '/' || c == ':')
        .next()
        .unwrap_or(trimmed);

    base.strip_suffix(GIT_SUFFIX).unwrap_or(base).to_string()
}

/// A folder name that stays inside its parent directory
pub fn is_valid_folder_name(name: &str) -> bool {
    !matches!(name, "" | "." | "..")
}

impl std::fmt::Display for RepositorySpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RepositorySpec {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
