//! # Host Entity
//!
//! A [`Host`] is one physical device. It starts life from a single
//! [`DiscoveryRecord`] and grows as further records describing the same device are
//! merged into it with [`Host::absorb`].
//!
//! Identity is the lower-cased short hostname, or the management ip text when the
//! record carries no hostname. Two hosts describe the same device when their
//! identities match **or** their ip sets intersect. That relation is symmetric but
//! not transitive.

use std::collections::BTreeSet;
use std::net::IpAddr;

use serde::Serialize;

use crate::error::ConstructionError;
use crate::network::ip_set::IpSet;
use crate::network::record::DiscoveryRecord;
use crate::vendors::{self, VendorRecord};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Host {
    pub id: String,
    pub domain: Option<String>,
    pub ips: IpSet,
    /// Addresses dropped while resolving a function conflict, kept for auditing.
    pub removed_ips: IpSet,
    pub management_ip: Option<IpAddr>,
    pub community: Option<String>,
    pub sysobjid: Option<String>,
    pub description: Option<String>,
    pub contact: Option<String>,
    pub protocols: Vec<String>,
    pub vendor: Option<String>,
    pub hardware: Option<String>,
    pub driver: Option<String>,
    pub functions: BTreeSet<String>,
    pub services: BTreeSet<String>,
    pub credentials: String,
    pub errors: Vec<String>,
}

impl Host {
    /// Builds an unclassified host from a raw record.
    ///
    /// Vendor fields stay empty and `credentials` is set to `default_credentials`;
    /// enrichment and classification happen in the engine.
    pub fn from_record(
        record: &DiscoveryRecord,
        default_credentials: &str,
    ) -> Result<Self, ConstructionError> {
        let (short_name, domain) = match record.hostname.as_deref() {
            Some(hostname) => split_hostname(hostname),
            None => (None, None),
        };

        let id = short_name
            .or_else(|| record.mgmt_ip.clone())
            .ok_or(ConstructionError::MissingIdentity)?;

        let mut host = Self {
            id,
            domain,
            ips: IpSet::new(),
            removed_ips: IpSet::new(),
            management_ip: None,
            community: record.community.clone(),
            sysobjid: record.sysobjid.as_deref().map(vendors::normalize_sysobjid),
            description: record.description.clone(),
            contact: record.contact.clone(),
            protocols: record.protocol.as_deref().map(split_protocols).unwrap_or_default(),
            vendor: None,
            hardware: None,
            driver: None,
            functions: BTreeSet::new(),
            services: BTreeSet::new(),
            credentials: default_credentials.to_string(),
            errors: Vec::new(),
        };

        if let Some(raw) = record.mgmt_ip.as_deref() {
            match raw.parse::<IpAddr>() {
                Ok(ip) => {
                    host.ips.insert(ip);
                }
                Err(_) => {
                    tracing::warn!("host {}: invalid management ip '{}'", host.id, raw);
                    host.push_error(format!("invalid management ip '{raw}'"));
                }
            }
        }

        Ok(host)
    }

    /// Same device: identical identity or at least one shared address.
    pub fn is_same_device(&self, other: &Host) -> bool {
        self.id == other.id || self.ips.intersects(&other.ips)
    }

    /// Records an error message once. Returns `true` if it was new.
    pub fn push_error(&mut self, message: String) -> bool {
        if self.errors.contains(&message) {
            return false;
        }
        self.errors.push(message);
        true
    }

    pub fn apply_vendor(&mut self, record: &VendorRecord) {
        self.vendor = Some(record.vendor.clone());
        self.hardware = record.hwtype.clone();
        self.driver = record.driver.clone();
    }

    /// Merges the data of `incoming` into `self`.
    ///
    /// Addresses are unioned. Scalar fields keep the value already present and only
    /// fill gaps from `incoming`, so the first record seen for a device wins.
    /// Classification is left to the caller.
    pub fn absorb(&mut self, incoming: Host) {
        self.ips.union(&incoming.ips);
        self.removed_ips.union(&incoming.removed_ips);

        fill(&mut self.community, incoming.community);
        fill(&mut self.description, incoming.description);

        if self.sysobjid.is_none() && incoming.sysobjid.is_some() {
            self.sysobjid = incoming.sysobjid;
            self.vendor = incoming.vendor;
            self.hardware = incoming.hardware;
            self.driver = incoming.driver;
        }

        if self.protocols.is_empty() {
            self.protocols = incoming.protocols;
        }

        for error in incoming.errors {
            self.push_error(error);
        }
    }

    /// `host.domain`, or `None` when the hostname carried no domain.
    pub fn fqdn(&self) -> Option<String> {
        self.domain
            .as_deref()
            .map(|domain| format!("{}.{}", self.id, domain))
    }
}

fn fill(slot: &mut Option<String>, incoming: Option<String>) {
    if slot.is_none() {
        *slot = incoming;
    }
}

/// `R1.Example.NET` → (`r1`, `example.net`). An empty short name yields `None`.
fn split_hostname(hostname: &str) -> (Option<String>, Option<String>) {
    let (short, domain) = match hostname.split_once('.') {
        Some((short, domain)) => (short, Some(domain.to_lowercase())),
        None => (hostname, None),
    };
    let short = (!short.is_empty()).then(|| short.to_lowercase());
    (short, domain)
}

fn split_protocols(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}
