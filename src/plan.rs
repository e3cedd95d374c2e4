use crate::category::Category;
use crate::manifest::Manifest;
use crate::repository::RepositorySpec;
use serde::{Deserialize, Serialize};

/// One step of an installation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum Instruction {
    CloneLibrary { id: RepositorySpec },
    InstallFonts { ids: Vec<RepositorySpec> },
}

impl Instruction {
    pub fn category(&self) -> Category {
        match self {
            Instruction::CloneLibrary { .. } => Category::Lisp,
            Instruction::InstallFonts { .. } => Category::Font,
        }
    }
}

/// Ordered list of instructions consumed by `Installer::install_into`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallPlan {
    pub instructions: Vec<Instruction>,
}

impl InstallPlan {
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }

    /// Libraries first, in manifest order, then fonts as a single batch
    pub fn from_manifest(manifest: &Manifest) -> Self {
        let mut instructions: Vec<Instruction> = manifest
            .repositories
            .get(Category::Lisp)
            .iter()
            .cloned()
            .map(|id| Instruction::CloneLibrary { id })
            .collect();

        let fonts = manifest.repositories.get(Category::Font);
        if !fonts.is_empty() {
            instructions.push(Instruction::InstallFonts {
                ids: fonts.to_vec(),
            });
        }

        Self { instructions }
    }

    /// Attach the clone url of every repository, in plan order
    pub fn resolve<'a>(&'a self, host: &'a str) -> ResolvedPlan<'a> {
        let urls = self
            .instructions
            .iter()
            .flat_map(|i| match i {
                Instruction::CloneLibrary { id } => std::slice::from_ref(id),
                Instruction::InstallFonts { ids } => ids.as_slice(),
            })
            .map(|id| id.resolve(host))
            .collect();

        ResolvedPlan {
            host,
            instructions: &self.instructions,
            urls,
        }
    }

    /// Number of repositories the plan will clone
    pub fn fetch_count(&self) -> usize {
        self.instructions
            .iter()
            .map(|i| match i {
                Instruction::CloneLibrary { .. } => 1,
                Instruction::InstallFonts { ids } => ids.len(),
            })
            .sum()
    }
}

/// A plan together with the host and urls an install would use
#[derive(Debug, Serialize)]
pub struct ResolvedPlan<'a> {
    pub host: &'a str,
    pub instructions: &'a [Instruction],
    pub urls: Vec<String>,
}
