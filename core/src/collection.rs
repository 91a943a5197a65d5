//! # Host Collection
//!
//! Ordered, deduplicating container of [`Host`]s.
//!
//! Insertion order is significant. When an incoming host is merged into an
//! existing one, the scalar fields of the host that arrived first survive, so the
//! merge stage must see records in discovery-file order.

use netpost_common::network::host::Host;

use crate::discovery::DiscoveryService;
use crate::merge::{MergeCandidates, PairwiseScan};
use crate::report::{DnsEntry, InventoryGroup, Reporter, UNKNOWN_GROUP};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    Added,
    /// Merged into the host at this index.
    Merged(usize),
}

#[derive(Debug, Default)]
pub struct HostCollection<M: MergeCandidates = PairwiseScan> {
    hosts: Vec<Host>,
    candidates: M,
}

impl HostCollection<PairwiseScan> {
    pub fn new() -> Self {
        Self::with_strategy(PairwiseScan)
    }
}

impl<M: MergeCandidates> HostCollection<M> {
    pub fn with_strategy(candidates: M) -> Self {
        Self {
            hosts: Vec::new(),
            candidates,
        }
    }

    /// Appends `host`, or upserts it into the first host describing the same device.
    pub fn insert(&mut self, host: Host, service: &DiscoveryService<'_>) -> Insertion {
        match self.candidates.find(&self.hosts, &host) {
            Some(index) => {
                service.merge(&mut self.hosts[index], host);
                Insertion::Merged(index)
            }
            None => {
                self.hosts.push(host);
                Insertion::Added
            }
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Host> {
        self.hosts.iter()
    }

    pub fn hosts(&self) -> &[Host] {
        &self.hosts
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    /// Re-runs classification on every host.
    pub fn classify(&mut self, service: &DiscoveryService<'_>) {
        for host in self.hosts.iter_mut() {
            service.classifier().classify(host);
        }
    }

    pub fn csv_rows(&self, reporter: &Reporter) -> Vec<String> {
        self.hosts.iter().map(|host| reporter.csv_row(host)).collect()
    }

    /// CSV rows of the hosts eligible for network backups.
    pub fn netbackup_rows(&self, reporter: &Reporter) -> Vec<String> {
        self.hosts
            .iter()
            .filter(|host| reporter.eligible(host))
            .map(|host| reporter.csv_row(host))
            .collect()
    }

    /// Inventory entries bucketed by credential group, groups in order of first appearance.
    ///
    /// With `filter` set, hosts that are not netbackup-eligible are left out.
    pub fn inventory_groups(&self, reporter: &Reporter, filter: bool) -> Vec<InventoryGroup> {
        let mut groups: Vec<InventoryGroup> = Vec::new();

        for host in self.hosts.iter() {
            if filter && !reporter.eligible(host) {
                continue;
            }

            let name = reporter.inventory_group(host);
            let entry = reporter.inventory_entry(host);
            match groups.iter_mut().find(|group| group.name == name) {
                Some(group) => group.entries.push(entry),
                None => groups.push(InventoryGroup {
                    name: name.to_string(),
                    entries: vec![entry],
                }),
            }
        }

        groups
    }

    /// DNS mappings; hosts without a management ip only with `include_unknown`.
    pub fn dns_entries(&self, include_unknown: bool) -> Vec<DnsEntry> {
        self.hosts
            .iter()
            .filter(|host| include_unknown || host.management_ip.is_some())
            .map(DnsEntry::from)
            .collect()
    }

    /// Number of hosts that landed in the [`UNKNOWN_GROUP`] bucket.
    pub fn unknown_count(&self, reporter: &Reporter) -> usize {
        self.hosts
            .iter()
            .filter(|host| reporter.inventory_group(host) == UNKNOWN_GROUP)
            .count()
    }
}
