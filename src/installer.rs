use crate::category::Category;
use crate::error::{FetchError, InstallerError, Result};
use crate::fetch::{Fetcher, GitFetcher};
use crate::paths::InstallPaths;
use crate::plan::{InstallPlan, Instruction};
use crate::report::{InstallReport, ItemReport, Outcome};
use crate::repository::{self, RepositorySpec, DEFAULT_HOST};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File extensions treated as installable fonts (compared case-insensitively)
pub const FONT_EXTENSIONS: &[&str] = &["ttf", "otf", "ttc"];

/// What to do when a single clone fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Record the failure and keep going
    #[default]
    BestEffort,
    /// Abort on the first failure, including a missing target directory
    FailFast,
}

/// Configuration for the installer
#[derive(Debug, Clone)]
pub struct InstallerConfig {
    /// Prefix short-form identifiers are resolved against
    pub host_prefix: String,
    pub policy: FailurePolicy,
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            host_prefix: DEFAULT_HOST.to_string(),
            policy: FailurePolicy::BestEffort,
        }
    }
}

/// Main installer struct
pub struct Installer<F = GitFetcher> {
    paths: InstallPaths,
    config: InstallerConfig,
    fetcher: F,
}

/// Checkout paths handed out during one run
type Claimed = HashSet<PathBuf>;

impl<F: Fetcher> Installer<F> {
    pub fn with_fetcher(paths: InstallPaths, config: InstallerConfig, fetcher: F) -> Self {
        Self {
            paths,
            config,
            fetcher,
        }
    }

    /// Get the installation paths
    pub fn paths(&self) -> &InstallPaths {
        &self.paths
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Run every instruction of `plan` against the target directory.
    ///
    /// A missing target directory skips the whole run with a warning, unless
    /// the policy is fail-fast, where it is an error.
    pub async fn install_into(&self, plan: &InstallPlan) -> Result<InstallReport> {
        let mut report = InstallReport::default();
        let target = self.paths.target();

        if !target.is_dir() {
            if self.config.policy == FailurePolicy::FailFast {
                return Err(InstallerError::TargetMissing(target.to_path_buf()));
            }
            log::warn!(
                "Target directory {} does not exist, nothing installed",
                target.display()
            );
            report.target_missing = true;
            return Ok(report);
        }

        log::info!(
            "Installing {} repositories into {}",
            plan.fetch_count(),
            target.display()
        );

        let mut claimed = Claimed::new();
        for instruction in &plan.instructions {
            let part = match instruction {
                Instruction::CloneLibrary { id } => {
                    self.clone_libraries(std::slice::from_ref(id), &mut claimed)
                        .await?
                }
                Instruction::InstallFonts { ids } => self.install_fonts(ids).await?,
            };
            report.merge(part);
        }

        Ok(report)
    }

    /// Resolved clone url and checkout path for `id` inside `dir`
    pub fn destination(
        &self,
        id: &RepositorySpec,
        dir: &Path,
    ) -> std::result::Result<(String, PathBuf), FetchError> {
        let url = id.resolve(&self.config.host_prefix);
        let name = repository::folder_name(&url);
        if !repository::is_valid_folder_name(&name) {
            return Err(FetchError::InvalidName { url, name });
        }
        let path = InstallPaths::checkout_dir(dir, &name);
        Ok((url, path))
    }

    /// Clone `id` into `<dir>/<name>`. An existing checkout is left untouched.
    pub async fn fetch(
        &self,
        id: &RepositorySpec,
        dir: &Path,
    ) -> std::result::Result<Outcome, FetchError> {
        let (url, path) = self.destination(id, dir)?;

        if path.exists() {
            log::info!("{} already present at {}", id, path.display());
            return Ok(Outcome::AlreadyPresent);
        }

        log::info!("Cloning {} into {}", url, path.display());
        self.fetcher.fetch(&url, &path).await?;
        Ok(Outcome::Cloned)
    }

    /// Create the library directory if needed and clone each identifier into it
    pub async fn install_libraries(&self, ids: &[RepositorySpec]) -> Result<InstallReport> {
        self.clone_libraries(ids, &mut Claimed::new()).await
    }

    async fn clone_libraries(
        &self,
        ids: &[RepositorySpec],
        claimed: &mut Claimed,
    ) -> Result<InstallReport> {
        let mut report = InstallReport::default();
        let lisp_dir = self.paths.lisp_dir();
        InstallPaths::ensure_dir(&lisp_dir)?;

        for id in ids {
            self.fetch_recorded(Category::Lisp, id, &lisp_dir, claimed, &mut report)
                .await?;
        }

        Ok(report)
    }

    /// Clone font repositories into a staging directory and copy every font
    /// file found there into the platform font directory.
    ///
    /// Each repository gets its own `<staging>/<index>` directory. The staging
    /// directory is removed on every return path.
    pub async fn install_fonts(&self, ids: &[RepositorySpec]) -> Result<InstallReport> {
        let mut report = InstallReport::default();

        let Some(font_dir) = self.paths.font_dir() else {
            report.notice(format!(
                "Installing fonts on {} is not supported yet. Skipping.",
                self.paths.platform()
            ));
            return Ok(report);
        };

        log::info!("Font directory {}", font_dir.display());
        InstallPaths::ensure_dir(&font_dir)?;

        let staging = tempfile::Builder::new()
            .prefix("dotfiles-fonts-")
            .tempdir()
            .map_err(|source| InstallerError::DirectoryCreation {
                path: std::env::temp_dir(),
                source,
            })?;
        log::debug!("Staging fonts in {}", staging.path().display());

        let mut claimed = Claimed::new();
        for (index, id) in ids.iter().enumerate() {
            let slot = staging.path().join(index.to_string());
            std::fs::create_dir(&slot).map_err(|source| InstallerError::DirectoryCreation {
                path: slot.clone(),
                source,
            })?;
            self.fetch_recorded(Category::Font, id, &slot, &mut claimed, &mut report)
                .await?;
        }

        for font in find_fonts(staging.path())? {
            let Some(name) = font.file_name() else {
                continue;
            };
            let dest = font_dir.join(name);
            std::fs::copy(&font, &dest).map_err(|source| InstallerError::Copy {
                from: font.clone(),
                to: dest.clone(),
                source,
            })?;
            log::info!("Installed font {}", dest.display());
            if !report.fonts.contains(&dest) {
                report.fonts.push(dest);
            }
        }

        staging.close()?;
        Ok(report)
    }

    /// Fetch one item and record its outcome, applying the failure policy.
    /// A checkout path already handed out earlier in the run is a failure.
    async fn fetch_recorded(
        &self,
        category: Category,
        id: &RepositorySpec,
        dir: &Path,
        claimed: &mut Claimed,
        report: &mut InstallReport,
    ) -> Result<()> {
        let url = id.resolve(&self.config.host_prefix);

        let (destination, result) = match self.destination(id, dir) {
            Ok((_, path)) => {
                let result = if claimed.insert(path.clone()) {
                    self.fetch(id, dir).await
                } else {
                    Err(FetchError::DestinationTaken {
                        url: url.clone(),
                        path: path.clone(),
                    })
                };
                (path, result)
            }
            Err(e) => (dir.to_path_buf(), Err(e)),
        };

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(e) if self.config.policy == FailurePolicy::FailFast => return Err(e.into()),
            Err(e) => {
                log::warn!("{}", e);
                Outcome::Failed {
                    message: e.to_string(),
                }
            }
        };

        report.record(ItemReport {
            category,
            id: id.clone(),
            url,
            destination,
            outcome,
        });
        Ok(())
    }
}

/// Font files anywhere under `dir`, skipping `.git` directories, sorted
pub fn find_fonts(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut fonts = Vec::new();

    let walker = WalkDir::new(dir)
        .into_iter()
        .filter_entry(|e| e.file_name() != ".git");

    for entry in walker {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        if is_font(entry.path()) {
            fonts.push(entry.into_path());
        }
    }

    fonts.sort();
    Ok(fonts)
}

fn is_font(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| FONT_EXTENSIONS.iter().any(|f| ext.eq_ignore_ascii_case(f)))
        .unwrap_or(false)
}
