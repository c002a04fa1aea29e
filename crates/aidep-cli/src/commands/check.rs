//! Handler for `aidep check`.

use std::path::Path;

use miette::Result;

use aidep_core::config::OutputFormat;
use aidep_ops::ops_check::{self, CheckOptions};
use aidep_util::errors::AidepError;

pub fn exec(
    path: &str,
    format: Option<&str>,
    fail_on: Option<String>,
    ignore: Vec<String>,
    verbose: bool,
) -> Result<()> {
    let format = match format {
        None => None,
        Some("text") => Some(OutputFormat::Text),
        Some("json") => Some(OutputFormat::Json),
        Some(other) => {
            return Err(AidepError::Generic {
                message: format!("Unknown output format '{other}' (expected text or json)"),
            }
            .into());
        }
    };

    let opts = CheckOptions {
        fail_on,
        format,
        ignore,
        verbose,
    };
    ops_check::check(Path::new(path), &opts)
}
