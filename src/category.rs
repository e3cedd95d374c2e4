use serde::{Deserialize, Serialize};

/// Kinds of resources the manifest can list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Lisp,
    Font,
}

impl Category {
    /// Key used in the manifest
    pub fn name(&self) -> &'static str {
        match self {
            Category::Lisp => "lisp",
            Category::Font => "font",
        }
    }

    /// Get the display name of the category
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Lisp => "Lisp libraries",
            Category::Font => "Fonts",
        }
    }

    pub fn all() -> &'static [Category] {
        &[Category::Lisp, Category::Font]
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
