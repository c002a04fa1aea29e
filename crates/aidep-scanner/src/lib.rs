//! Manifest scanning: locate a project's dependency file and parse it into
//! a flat mapping of lower-cased package name to raw version specifier.
//!
//! Parsing is deliberately tolerant. Lines and entries that do not look
//! like dependencies are skipped, not errors; only failing to read a file
//! the caller pointed at surfaces as one.

pub mod pyproject;
pub mod requirements;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use aidep_util::errors::AidepError;

/// Package-name substrings that mark a dependency as an AI-framework
/// package worth checking.
pub const AI_FRAMEWORKS: &[&str] = &[
    "langchain",
    "langchain-core",
    "langchain-community",
    "langchain-openai",
    "llama-index",
    "llama-index-core",
    "openai",
    "anthropic",
    "crewai",
    "crewai-tools",
    "autogen",
    "langflow",
    "transformers",
    "sentence-transformers",
    "torch",
    "tensorflow",
    "pydantic",
    "sqlalchemy",
    "numpy",
    "fastapi",
    "chromadb",
    "gradio",
];

/// Dependency files probed in order when scanning a project directory.
const REQUIREMENT_FILES: &[&str] = &[
    "requirements.txt",
    "requirements-dev.txt",
    "requirements/base.txt",
    "pyproject.toml",
];

/// Scans a Python project directory for declared dependencies.
#[derive(Debug, Clone)]
pub struct DependencyScanner {
    project_path: PathBuf,
}

impl DependencyScanner {
    pub fn new(project_path: impl Into<PathBuf>) -> Self {
        Self {
            project_path: project_path.into(),
        }
    }

    /// Find the first requirements file present in the project.
    pub fn find_requirements_file(&self) -> Option<PathBuf> {
        REQUIREMENT_FILES
            .iter()
            .map(|name| self.project_path.join(name))
            .find(|path| path.is_file())
    }

    /// Scan the project for dependencies. Returns an empty mapping when no
    /// requirements file exists.
    pub fn scan_project(&self) -> miette::Result<BTreeMap<String, String>> {
        match self.find_requirements_file() {
            Some(path) => parse_file(&path),
            None => Ok(BTreeMap::new()),
        }
    }

    /// Retain only AI-framework dependencies.
    pub fn filter_ai_frameworks(
        &self,
        dependencies: &BTreeMap<String, String>,
    ) -> BTreeMap<String, String> {
        dependencies
            .iter()
            .filter(|(name, _)| {
                AI_FRAMEWORKS
                    .iter()
                    .any(|framework| name.to_lowercase().contains(framework))
            })
            .map(|(name, spec)| (name.clone(), spec.clone()))
            .collect()
    }
}

/// Parse a single dependency file, chosen by extension: `.toml` files are
/// read as pyproject manifests, everything else as requirements lines.
pub fn parse_file(path: &Path) -> miette::Result<BTreeMap<String, String>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        AidepError::Scan {
            message: format!("Failed to read {}: {e}", path.display()),
        }
    })?;

    if path.extension().is_some_and(|ext| ext == "toml") {
        Ok(pyproject::parse(&content))
    } else {
        Ok(requirements::parse(&content))
    }
}
