//! # Output Writers
//!
//! Serialize the report views into the three artifacts of a run:
//! `network-discovery.csv`, `hosts.ansible` and `hosts.dns`.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::info;

use crate::collection::HostCollection;
use crate::report::{DNS_BANNER, Reporter, UNKNOWN_GROUP};

pub const CSV_FILE: &str = "network-discovery.csv";
pub const INVENTORY_FILE: &str = "hosts.ansible";
pub const DNS_FILE: &str = "hosts.dns";

#[derive(Debug, Clone, Copy, Default)]
pub struct WriteOptions {
    /// Keep hosts in the `unknown` inventory group and hosts without management ip in DNS.
    pub include_unknown: bool,
    /// Leave hosts that fail the netbackup policy out of the inventory.
    pub filter: bool,
}

/// Header plus one row per host. An empty collection writes nothing.
pub fn write_csv<W: Write>(out: &mut W, hosts: &HostCollection, reporter: &Reporter) -> std::io::Result<()> {
    if hosts.is_empty() {
        return Ok(());
    }
    writeln!(out, "{}", reporter.csv_header())?;
    for row in hosts.csv_rows(reporter) {
        writeln!(out, "{row}")?;
    }
    Ok(())
}

/// Header plus the rows of netbackup-eligible hosts.
pub fn write_netbackup<W: Write>(
    out: &mut W,
    hosts: &HostCollection,
    reporter: &Reporter,
) -> std::io::Result<()> {
    if hosts.is_empty() {
        return Ok(());
    }
    writeln!(out, "{}", reporter.csv_header())?;
    for row in hosts.netbackup_rows(reporter) {
        writeln!(out, "{row}")?;
    }
    Ok(())
}

/// One `[group]` section per credential group, each preceded by four blank lines.
pub fn write_inventory<W: Write>(
    out: &mut W,
    hosts: &HostCollection,
    reporter: &Reporter,
    options: WriteOptions,
) -> std::io::Result<()> {
    for group in hosts.inventory_groups(reporter, options.filter) {
        if group.name == UNKNOWN_GROUP && !options.include_unknown {
            continue;
        }
        writeln!(out, "\n\n\n\n")?;
        writeln!(out, "[{}]", group.name)?;
        writeln!(out, "{}", group.entries.join("\n"))?;
    }
    Ok(())
}

pub fn write_dns<W: Write>(out: &mut W, hosts: &HostCollection, options: WriteOptions) -> std::io::Result<()> {
    writeln!(out, "{DNS_BANNER}")?;
    writeln!(out)?;
    for entry in hosts.dns_entries(options.include_unknown) {
        writeln!(out, "{entry}")?;
    }
    Ok(())
}

/// Writes all three artifacts into `folder`, creating it if needed.
///
/// Returns the paths written, in CSV, inventory, DNS order.
pub fn write_all(
    folder: &Path,
    hosts: &HostCollection,
    reporter: &Reporter,
    options: WriteOptions,
) -> anyhow::Result<Vec<PathBuf>> {
    fs::create_dir_all(folder)
        .with_context(|| format!("failed to create output folder {}", folder.display()))?;

    let csv = folder.join(CSV_FILE);
    write_file(&csv, |out| write_csv(out, hosts, reporter))?;

    let inventory = folder.join(INVENTORY_FILE);
    write_file(&inventory, |out| write_inventory(out, hosts, reporter, options))?;

    let dns = folder.join(DNS_FILE);
    write_file(&dns, |out| write_dns(out, hosts, options))?;

    Ok(vec![csv, inventory, dns])
}

fn write_file<F>(path: &Path, render: F) -> anyhow::Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> std::io::Result<()>,
{
    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut out = BufWriter::new(file);
    render(&mut out)
        .and_then(|_| out.flush())
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!("wrote {}", path.display());
    Ok(())
}
