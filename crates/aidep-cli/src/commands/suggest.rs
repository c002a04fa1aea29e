//! Handler for `aidep suggest`.

use std::path::Path;

use miette::Result;

use aidep_ops::ops_suggest;

pub fn exec(package: &str, path: &str) -> Result<()> {
    ops_suggest::suggest(package, Path::new(path))
}
