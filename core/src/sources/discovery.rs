use std::fs;
use std::path::Path;

use anyhow::Context;
use netpost_common::network::record::DiscoveryRecord;
use tracing::debug;

pub const DELIMITER: char = ':';

/// Parses discovery text: a header line naming the columns, then one device per line.
///
/// A line is split into at most as many fields as the header has columns, so the
/// last column may itself contain the delimiter. Blank lines are skipped.
pub fn parse_discovery(source: &str) -> Vec<DiscoveryRecord> {
    let mut lines = source.lines().map(str::trim).filter(|line| !line.is_empty());

    let Some(header) = lines.next() else {
        return Vec::new();
    };
    let columns: Vec<&str> = header.split(DELIMITER).map(str::trim).collect();

    lines
        .map(|line| {
            let values = line.splitn(columns.len(), DELIMITER);
            DiscoveryRecord::from_fields(columns.iter().copied().zip(values))
        })
        .collect()
}

pub fn load_discovery(path: &Path) -> anyhow::Result<Vec<DiscoveryRecord>> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read discovery file {}", path.display()))?;
    let records = parse_discovery(&source);
    debug!("read {} discovery records from {}", records.len(), path.display());
    Ok(records)
}
