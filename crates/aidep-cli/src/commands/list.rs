//! Handler for `aidep list`.

use miette::Result;

use aidep_ops::ops_list;

pub fn exec() -> Result<()> {
    ops_list::list()
}
