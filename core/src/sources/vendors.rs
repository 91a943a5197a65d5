use std::fs;
use std::path::Path;

use anyhow::Context;
use netpost_common::vendors::VendorTable;
use tracing::debug;

pub fn load_vendors(path: &Path) -> anyhow::Result<VendorTable> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read sysobjid map {}", path.display()))?;
    let table = VendorTable::from_yaml_str(&source)
        .with_context(|| format!("failed to parse sysobjid map {}", path.display()))?;
    debug!("loaded {} sysobjid entries from {}", table.len(), path.display());
    Ok(table)
}
