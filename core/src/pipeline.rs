//! # Batch Pipeline
//!
//! One run: settings and vendor table in, a merged and classified
//! [`HostCollection`] out.
//!
//! Hosts are built from records in parallel; merging them stays sequential and in
//! record order, since which scalar values survive a merge depends on arrival order.

use netpost_common::config::Settings;
use netpost_common::network::range::RangeRegistry;
use netpost_common::network::record::DiscoveryRecord;
use netpost_common::vendors::VendorRepository;
use rayon::prelude::*;
use tracing::{info, warn};

use crate::classifier::{Classifier, ConflictRule};
use crate::collection::{HostCollection, Insertion};
use crate::discovery::DiscoveryService;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub records: usize,
    pub dropped: usize,
    pub merged: usize,
    pub hosts: usize,
}

/// Wires the classifier (built-in rules plus the configured ones) into a service.
pub fn build_service<'a>(
    settings: &Settings,
    ranges: &'a RangeRegistry,
    vendors: &'a dyn VendorRepository,
) -> DiscoveryService<'a> {
    let classifier = settings
        .conflict_rules
        .iter()
        .map(ConflictRule::from)
        .fold(Classifier::new(ranges), Classifier::with_rule);

    DiscoveryService::new(vendors, classifier, settings.credential_rule())
}

/// Builds every record into a host and inserts them in record order.
///
/// Records without any identity are dropped with a warning.
pub fn process(service: &DiscoveryService<'_>, records: &[DiscoveryRecord]) -> (HostCollection, RunSummary) {
    let built: Vec<_> = records.par_iter().map(|record| service.build_host(record)).collect();

    let mut hosts = HostCollection::new();
    let mut summary = RunSummary {
        records: records.len(),
        ..RunSummary::default()
    };

    for (index, result) in built.into_iter().enumerate() {
        match result {
            Ok(host) => {
                if let Insertion::Merged(_) = hosts.insert(host, service) {
                    summary.merged += 1;
                }
            }
            Err(err) => {
                warn!("dropping discovery record {}: {}", index + 1, err);
                summary.dropped += 1;
            }
        }
    }

    summary.hosts = hosts.len();
    (hosts, summary)
}

/// Builds the range registry from `settings` and processes `records`.
///
/// An invalid range aborts the run before any record is touched.
pub fn run(
    settings: &Settings,
    vendors: &dyn VendorRepository,
    records: &[DiscoveryRecord],
) -> anyhow::Result<(HostCollection, RunSummary)> {
    let ranges = RangeRegistry::from_settings(&settings.ranges)?;
    let service = build_service(settings, &ranges, vendors);

    let (hosts, summary) = process(&service, records);
    info!(
        "{} records -> {} hosts ({} merged, {} dropped)",
        summary.records, summary.hosts, summary.merged, summary.dropped
    );

    Ok((hosts, summary))
}
