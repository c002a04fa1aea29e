//! CLI argument definitions for aidep.
//!
//! Uses `clap` derive macros to define the full command surface. Each command
//! corresponds to a handler in the [`super::commands`] module.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "aidep",
    version,
    about = "AI dependency doctor",
    long_about = "aidep detects known version conflicts between AI framework packages \
                  (LangChain, LlamaIndex, OpenAI, CrewAI, ...) declared in a Python \
                  project's requirements, and suggests fixes."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan a project for known AI framework conflicts
    Check {
        /// Project path to scan
        #[arg(long, default_value = ".")]
        path: String,
        /// Output format: text, json
        #[arg(long)]
        format: Option<String>,
        /// Exit non-zero on conflicts at or above this severity: low, medium, high, critical
        #[arg(long)]
        fail_on: Option<String>,
        /// Conflict ids to ignore (repeatable)
        #[arg(long)]
        ignore: Vec<String>,
    },

    /// Show compatible version combinations for a package
    Suggest {
        /// Package name (e.g. langchain)
        package: String,
        /// Project path for context
        #[arg(long, default_value = ".")]
        path: String,
    },

    /// Validate a requirements file, failing on any known conflict
    Validate {
        /// Requirements file path (requirements.txt or pyproject.toml)
        file: String,
    },

    /// List all known conflicts in the database
    #[command(alias = "list-conflicts")]
    List,
}

pub fn parse() -> Cli {
    Cli::parse()
}
