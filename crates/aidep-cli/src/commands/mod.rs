//! Command dispatch and handler modules.

mod check;
mod list;
mod suggest;
mod validate;

use miette::Result;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Check {
            path,
            format,
            fail_on,
            ignore,
        } => check::exec(&path, format.as_deref(), fail_on, ignore, cli.verbose),
        Command::Suggest { package, path } => suggest::exec(&package, &path),
        Command::Validate { file } => validate::exec(&file),
        Command::List => list::exec(),
    }
}
