//! Handler for `aidep validate`.

use std::path::Path;

use miette::Result;

use aidep_ops::ops_validate;

pub fn exec(file: &str) -> Result<()> {
    ops_validate::validate(Path::new(file))
}
