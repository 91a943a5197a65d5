//! # Merge Candidates
//!
//! Decides which existing host an incoming host is merged into.
//!
//! "Same device" is a pairwise relation that is not transitive: `a` may share an
//! address with `b` and `b` a hostname with `c` while `a` and `c` share nothing.
//! [`PairwiseScan`] resolves that by merging into the first match in insertion
//! order. A union-find strategy can replace it
//! without touching the classifier.

use netpost_common::network::host::Host;

pub trait MergeCandidates {
    /// Index of the host in `hosts` that `incoming` should be merged into.
    fn find(&self, hosts: &[Host], incoming: &Host) -> Option<usize>;
}

/// First host, in insertion order, that is the same device as the incoming one.
#[derive(Debug, Clone, Copy, Default)]
pub struct PairwiseScan;

impl MergeCandidates for PairwiseScan {
    fn find(&self, hosts: &[Host], incoming: &Host) -> Option<usize> {
        hosts.iter().position(|host| host.is_same_device(incoming))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use netpost_common::network::record::DiscoveryRecord;

    fn host(hostname: &str, ip: &str) -> Host {
        let record = DiscoveryRecord::default()
            .with_hostname(hostname)
            .with_mgmt_ip(ip);
        Host::from_record(&record, "TACACS_USERS").unwrap()
    }

    #[test]
    fn test_first_match_wins() {
        let hosts = vec![host("a", "10.0.0.1"), host("b", "10.0.0.2")];

        assert_eq!(PairwiseScan.find(&hosts, &host("b", "10.0.0.1")), Some(0));
        assert_eq!(PairwiseScan.find(&hosts, &host("b", "10.0.0.9")), Some(1));
        assert_eq!(PairwiseScan.find(&hosts, &host("c", "10.0.0.9")), None);
    }
}
