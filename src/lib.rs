pub mod category;
pub mod error;
pub mod fetch;
pub mod installer;
pub mod manifest;
pub mod paths;
pub mod plan;
pub mod platform;
pub mod report;
pub mod repository;

pub use category::Category;
pub use error::{FetchError, InstallerError, Result};
pub use fetch::{Fetcher, GitFetcher};
pub use installer::{FailurePolicy, Installer, InstallerConfig};
pub use manifest::Manifest;
pub use paths::InstallPaths;
pub use plan::{InstallPlan, Instruction};
pub use platform::Platform;
pub use report::{InstallReport, Outcome};
pub use repository::RepositorySpec;
