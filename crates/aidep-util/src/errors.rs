use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all aidep operations.
#[derive(Debug, Error, Diagnostic)]
pub enum AidepError {
    /// No requirements.txt or pyproject.toml found in the project.
    #[error("No requirements file found in {path}")]
    #[diagnostic(help(
        "aidep looks for requirements.txt, requirements-dev.txt, requirements/base.txt and pyproject.toml"
    ))]
    NoRequirementsFile { path: String },

    /// A requirements file exists but could not be read.
    #[error("Scan error: {message}")]
    Scan { message: String },

    /// A conflict scan failed its severity threshold.
    #[error("Conflict check failed: {message}")]
    Conflicts { message: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

/// Convenience alias for `miette::Result<T>`.
pub type AidepResult<T> = miette::Result<T>;
