use crate::error::FetchError;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Something that can place a copy of a remote repository at a local path
#[allow(async_fn_in_trait)]
pub trait Fetcher {
    async fn fetch(&self, url: &str, destination: &Path) -> Result<(), FetchError>;
}

/// Clones with the system `git` binary, which picks up the user's SSH keys,
/// credential helpers and ~/.gitconfig.
#[derive(Debug, Clone)]
pub struct GitFetcher {
    program: String,
    timeout: Option<Duration>,
    progress: bool,
}

impl Default for GitFetcher {
    fn default() -> Self {
        Self {
            program: "git".to_string(),
            timeout: None,
            progress: true,
        }
    }
}

impl GitFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different executable in place of `git`
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Kill the clone if it runs longer than `timeout`
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Show a spinner while a clone runs
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    fn spinner(&self, url: &str) -> ProgressBar {
        if !self.progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(format!("Cloning {}", url));
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }
}

impl Fetcher for GitFetcher {
    async fn fetch(&self, url: &str, destination: &Path) -> Result<(), FetchError> {
        log::debug!("{} clone {} {}", self.program, url, destination.display());

        let spawn_error = |source: std::io::Error| FetchError::Spawn {
            program: self.program.clone(),
            url: url.to_string(),
            source,
        };

        let child = Command::new(&self.program)
            .arg("clone")
            .arg(url)
            .arg(destination)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(spawn_error)?;

        let pb = self.spinner(url);

        let output = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, child.wait_with_output()).await {
                Ok(output) => output,
                Err(_) => {
                    pb.abandon_with_message(format!("Timed out cloning {}", url));
                    return Err(FetchError::Timeout {
                        url: url.to_string(),
                        timeout: limit,
                    });
                }
            },
            None => child.wait_with_output().await,
        }
        .map_err(spawn_error)?;

        pb.finish_and_clear();

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.trim().is_empty() {
            log::debug!("{}", stdout.trim_end());
        }

        if !output.status.success() {
            return Err(FetchError::Failed {
                url: url.to_string(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(())
    }
}
