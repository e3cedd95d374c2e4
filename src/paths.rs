use crate::error::{InstallerError, Result};
use crate::platform::Platform;
use std::path::{Path, PathBuf};

/// Where installed resources land.
/// Libraries: <target>/lisp/<name>; fonts: the platform font directory under home.
#[derive(Debug, Clone)]
pub struct InstallPaths {
    home: PathBuf,
    /// Base install directory, ~/.emacs.d unless overridden
    target: PathBuf,
    platform: Platform,
}

impl InstallPaths {
    /// Paths rooted at the current user's home directory
    pub fn new(platform: Platform) -> Result<Self> {
        let home = dirs::home_dir().ok_or(InstallerError::HomeDirNotFound)?;
        let target = home.join(".emacs.d");
        Ok(Self::with_dirs(home, target, platform))
    }

    pub fn with_dirs(home: impl Into<PathBuf>, target: impl Into<PathBuf>, platform: Platform) -> Self {
        Self {
            home: home.into(),
            target: target.into(),
            platform,
        }
    }

    /// Replace the base install directory
    pub fn with_target(mut self, target: impl Into<PathBuf>) -> Self {
        self.target = target.into();
        self
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Get the library directory (<target>/lisp)
    pub fn lisp_dir(&self) -> PathBuf {
        self.target.join("lisp")
    }

    /// Get the font directory, `None` on platforms without font support
    pub fn font_dir(&self) -> Option<PathBuf> {
        self.platform.font_dir(&self.home)
    }

    /// Checkout location for a clone named `name` inside `dir`
    pub fn checkout_dir(dir: &Path, name: &str) -> PathBuf {
        dir.join(name)
    }

    /// Create `dir` (and parents) if missing. Pre-existence is not an error.
    pub fn ensure_dir(dir: &Path) -> Result<()> {
        if dir.is_dir() {
            return Ok(());
        }

        log::info!("Creating {}", dir.display());
        std::fs::create_dir_all(dir).map_err(|source| InstallerError::DirectoryCreation {
            path: dir.to_path_buf(),
            source,
        })
    }
}
