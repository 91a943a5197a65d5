//! # Discovery Service
//!
//! Turns raw discovery records into classified [`Host`]s and merges duplicates.
//!
//! The service owns no mutable state. Every table it consults (ranges, vendors,
//! credential rule) is built once per run and handed in by reference.

use netpost_common::config::CredentialRule;
use netpost_common::error::ConstructionError;
use netpost_common::network::host::Host;
use netpost_common::network::record::DiscoveryRecord;
use netpost_common::vendors::VendorRepository;
use tracing::trace;

use crate::classifier::Classifier;

pub struct DiscoveryService<'a> {
    vendor_repo: &'a dyn VendorRepository,
    classifier: Classifier<'a>,
    credentials: CredentialRule,
    auto_classify: bool,
}

impl<'a> DiscoveryService<'a> {
    pub fn new(
        vendor_repo: &'a dyn VendorRepository,
        classifier: Classifier<'a>,
        credentials: CredentialRule,
    ) -> Self {
        Self {
            vendor_repo,
            classifier,
            credentials,
            auto_classify: true,
        }
    }

    /// Hosts built or merged by this service are left unclassified.
    pub fn without_classification(mut self) -> Self {
        self.auto_classify = false;
        self
    }

    pub fn classifier(&self) -> &Classifier<'a> {
        &self.classifier
    }

    /// Builds a host from `record`: identity, vendor enrichment, credential group
    /// and, unless disabled, classification.
    pub fn build_host(&self, record: &DiscoveryRecord) -> Result<Host, ConstructionError> {
        let mut host = Host::from_record(record, self.credentials.default_group())?;

        self.enrich_vendor(&mut host);
        if self.auto_classify {
            self.classifier.classify(&mut host);
        }
        self.set_credentials(&mut host);

        Ok(host)
    }

    /// Upserts `incoming` into `existing`.
    ///
    /// Not symmetric: scalar fields already set on `existing` are kept.
    pub fn merge(&self, existing: &mut Host, incoming: Host) {
        trace!("merging {} into {}", incoming.id, existing.id);

        existing.absorb(incoming);
        if self.auto_classify {
            self.classifier.classify(existing);
        }
        self.set_credentials(existing);
    }

    fn enrich_vendor(&self, host: &mut Host) {
        let Some(sysobjid) = host.sysobjid.as_deref() else {
            return;
        };

        match self.vendor_repo.lookup(sysobjid) {
            Some(record) => host.apply_vendor(record),
            None => trace!("host {}: unknown sysobjid {}", host.id, sysobjid),
        }
    }

    fn set_credentials(&self, host: &mut Host) {
        host.credentials = self.credentials.group_for(host.contact.as_deref());
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use netpost_common::network::range::{NetworkRange, RangeRegistry};
    use netpost_common::vendors::{VendorRecord, VendorTable};

    fn tables() -> (RangeRegistry, VendorTable) {
        let ranges = RangeRegistry::new(vec![
            NetworkRange::parse("CORE_LOOPBACK", &["10.255.0.0/24"], "CORE", &[]).unwrap(),
            NetworkRange::parse("P2P", &["192.168.0.0/16"], "CPE", &["CI".to_string()]).unwrap(),
        ]);
        let vendors = VendorTable::new([VendorRecord {
            sysobjid: "1.3.6.1.4.1.9.1.1".into(),
            vendor: "cisco".into(),
            hwtype: Some("C891F".into()),
            driver: Some("ios".into()),
        }]);
        (ranges, vendors)
    }

    fn credentials() -> CredentialRule {
        let mut map = HashMap::new();
        map.insert("NOC".to_string(), "NOC_USERS".to_string());
        CredentialRule::new("TACACS_USERS", &map)
    }

    #[test]
    fn test_build_host_enriches_and_classifies() {
        let (ranges, vendors) = tables();
        let service = DiscoveryService::new(&vendors, Classifier::new(&ranges), credentials());

        let record = DiscoveryRecord::default()
            .with_mgmt_ip("192.168.1.1")
            .with_hostname("cpe1.example.net")
            .with_sysobjid(".1.3.6.1.4.1.9.1.1")
            .with_contact("noc");
        let host = service.build_host(&record).unwrap();

        assert_eq!(host.vendor.as_deref(), Some("cisco"));
        assert_eq!(host.hardware.as_deref(), Some("C891F"));
        assert_eq!(host.driver.as_deref(), Some("ios"));
        assert!(host.functions.contains("CPE"));
        assert!(host.services.contains("CI"));
        assert_eq!(host.management_ip, Some("192.168.1.1".parse().unwrap()));
        assert_eq!(host.credentials, "NOC_USERS");
    }

    #[test]
    fn test_unknown_sysobjid_leaves_vendor_unset() {
        let (ranges, vendors) = tables();
        let service = DiscoveryService::new(&vendors, Classifier::new(&ranges), credentials());

        let record = DiscoveryRecord::default()
            .with_mgmt_ip("10.1.1.1")
            .with_sysobjid("1.3.6.1.4.1.99999.1");
        let host = service.build_host(&record).unwrap();

        assert_eq!(host.vendor, None);
        assert_eq!(host.credentials, "TACACS_USERS");
    }

    #[test]
    fn test_classification_can_be_suppressed() {
        let (ranges, vendors) = tables();
        let service = DiscoveryService::new(&vendors, Classifier::new(&ranges), credentials())
            .without_classification();

        let record = DiscoveryRecord::default().with_mgmt_ip("192.168.1.1");
        let host = service.build_host(&record).unwrap();

        assert!(host.functions.is_empty());
        assert_eq!(host.management_ip, None);
    }

    #[test]
    fn test_merge_reclassifies() {
        let (ranges, vendors) = tables();
        let service = DiscoveryService::new(&vendors, Classifier::new(&ranges), credentials());

        let mut existing = service
            .build_host(&DiscoveryRecord::default().with_mgmt_ip("192.168.1.1").with_hostname("pe1"))
            .unwrap();
        let incoming = service
            .build_host(
                &DiscoveryRecord::default()
                    .with_mgmt_ip("10.255.0.7")
                    .with_hostname("pe1")
                    .with_sysobjid("1.3.6.1.4.1.9.1.1"),
            )
            .unwrap();

        service.merge(&mut existing, incoming);

        assert_eq!(existing.functions.iter().collect::<Vec<_>>(), vec!["CORE"]);
        assert_eq!(existing.ips.to_strings(), vec!["10.255.0.7"]);
        assert_eq!(existing.removed_ips.to_strings(), vec!["192.168.1.1"]);
        assert_eq!(existing.management_ip, Some("10.255.0.7".parse().unwrap()));
        assert_eq!(existing.vendor.as_deref(), Some("cisco"));
    }
}
