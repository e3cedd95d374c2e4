use serde::Serialize;
use std::path::{Path, PathBuf};

/// Operating system family the installer targets.
///
/// Detected once at startup and handed to the installer, so every branch can
/// be exercised regardless of the host running the tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Platform {
    /// Linux and the BSDs
    PosixDesktop,
    Apple,
    Windows,
}

impl Platform {
    pub fn detect() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    /// Map a `std::env::consts::OS` value to a platform family
    pub fn from_os(os: &str) -> Self {
        match os {
            "macos" | "ios" => Platform::Apple,
            "windows" => Platform::Windows,
            _ => Platform::PosixDesktop,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Platform::PosixDesktop => "posix-desktop",
            Platform::Apple => "apple",
            Platform::Windows => "windows",
        }
    }

    /// User font directory under `home`, or `None` where fonts are unsupported
    pub fn font_dir(&self, home: &Path) -> Option<PathBuf> {
        match self {
            Platform::PosixDesktop => Some(home.join(".fonts")),
            Platform::Apple => Some(home.join("Library").join("Fonts")),
            Platform::Windows => None,
        }
    }

    /// Parse a platform name as accepted on the command line
    pub fn parse(s: &str) -> Option<Platform> {
        match s.to_lowercase().as_str() {
            "linux" | "posix" | "posix-desktop" => Some(Platform::PosixDesktop),
            "macos" | "mac" | "apple" | "darwin" => Some(Platform::Apple),
            "windows" | "win" => Some(Platform::Windows),
            _ => None,
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::parse(s).ok_or_else(|| format!("Unknown platform: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_os() {
        assert_eq!(Platform::from_os("linux"), Platform::PosixDesktop);
        assert_eq!(Platform::from_os("freebsd"), Platform::PosixDesktop);
        assert_eq!(Platform::from_os("macos"), Platform::Apple);
        assert_eq!(Platform::from_os("windows"), Platform::Windows);
    }

    #[test]
    fn test_font_dir() {
        let home = Path::new("/home/user");
        assert_eq!(
            Platform::PosixDesktop.font_dir(home),
            Some(PathBuf::from("/home/user/.fonts"))
        );
        assert_eq!(
            Platform::Apple.font_dir(home),
            Some(PathBuf::from("/home/user/Library/Fonts"))
        );
        assert_eq!(Platform::Windows.font_dir(home), None);
    }

    #[test]
    fn test_parse() {
        assert_eq!("darwin".parse::<Platform>(), Ok(Platform::Apple));
        assert_eq!("linux".parse::<Platform>(), Ok(Platform::PosixDesktop));
        assert!("beos".parse::<Platform>().is_err());
    }
}
