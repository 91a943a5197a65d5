//! # Host Classifier
//!
//! Derives a host's function and service labels from the ranges its addresses
//! fall in, narrows conflicting functions, flags what cannot be narrowed and picks
//! the management ip.
//!
//! [`Classifier::classify`] runs the four phases as one unit. It is idempotent:
//! classifying a host again without changing its addresses gives the same result.

use std::collections::BTreeSet;
use std::net::IpAddr;

use netpost_common::config::ConflictRuleSettings;
use netpost_common::network::host::Host;
use netpost_common::network::range::RangeRegistry;
use tracing::{debug, error};

pub const CORE: &str = "CORE";
pub const DCN: &str = "DCN";
pub const IPVPN: &str = "IPVPN";
pub const CI: &str = "CI";

pub const CORE_LOOPBACK: &str = "CORE_LOOPBACK";
pub const DCN_LOOPBACK: &str = "DCN_LOOPBACK";
pub const IPVPN_LOOPBACK: &str = "IPVPN_LOOPBACK";

/// When `function` is one of several functions and some addresses fall inside
/// `range`, only those addresses are kept and the function becomes `function`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictRule {
    pub function: String,
    pub range: String,
}

impl ConflictRule {
    pub fn new(function: impl Into<String>, range: impl Into<String>) -> Self {
        Self {
            function: function.into(),
            range: range.into(),
        }
    }

    /// CORE loopbacks win over everything, then DCN loopbacks.
    pub fn builtin() -> Vec<Self> {
        vec![
            Self::new(CORE, CORE_LOOPBACK),
            Self::new(DCN, DCN_LOOPBACK),
        ]
    }
}

impl From<&ConflictRuleSettings> for ConflictRule {
    fn from(settings: &ConflictRuleSettings) -> Self {
        Self::new(settings.function.clone(), settings.range.clone())
    }
}

pub struct Classifier<'a> {
    ranges: &'a RangeRegistry,
    rules: Vec<ConflictRule>,
}

impl<'a> Classifier<'a> {
    pub fn new(ranges: &'a RangeRegistry) -> Self {
        Self {
            ranges,
            rules: ConflictRule::builtin(),
        }
    }

    /// Appends a rule, evaluated after the ones already registered.
    pub fn with_rule(mut self, rule: ConflictRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn classify(&self, host: &mut Host) {
        self.derive_by_ip(host);
        self.resolve_conflicts(host);
        self.validate(host);
        self.update_management_ip(host);
    }

    /// Phase 1: union of the labels of every range any address falls in.
    pub fn derive_by_ip(&self, host: &mut Host) {
        let (functions, services) = self.labels_for(host.ips.iter());
        host.functions = functions;
        host.services = services;
    }

    /// Phase 2: the first rule that can narrow a multi-function host does so.
    ///
    /// Removed addresses move to `removed_ips` and the services are derived again
    /// from the addresses that remain.
    pub fn resolve_conflicts(&self, host: &mut Host) -> Option<&ConflictRule> {
        if host.functions.len() <= 1 {
            return None;
        }

        for rule in &self.rules {
            if !host.functions.contains(&rule.function) {
                continue;
            }

            let (kept, removed) = host
                .ips
                .partition(|ip| self.ranges.contains(&rule.range, *ip));
            if kept.is_empty() {
                continue;
            }

            debug!(
                "host {}: {} wins over {:?}, dropping {} address(es)",
                host.id,
                rule.function,
                host.functions,
                removed.len()
            );

            let (_, services) = self.labels_for(kept.iter());
            host.ips = kept;
            host.removed_ips.union(&removed);
            host.functions = BTreeSet::from([rule.function.clone()]);
            host.services = services;
            return Some(rule);
        }

        None
    }

    /// Phase 3: a host left with several functions gets an error, logged once.
    ///
    /// Returns `false` when the host is in that state.
    pub fn validate(&self, host: &mut Host) -> bool {
        if host.functions.len() <= 1 {
            return true;
        }

        let functions: Vec<&str> = host.functions.iter().map(String::as_str).collect();
        let message = format!(
            "host {} cannot have multiple functions: {}",
            host.id,
            functions.join(",")
        );
        if host.push_error(message.clone()) {
            error!("{message}");
        }
        false
    }

    /// Phase 4: choose the management ip.
    ///
    /// With both IPVPN and CI services the IPVPN loopbacks are moved to the front,
    /// each group sorted ascending. Otherwise the first address is taken as is.
    pub fn update_management_ip(&self, host: &mut Host) {
        match host.ips.len() {
            0 => return,
            1 => {
                host.management_ip = host.ips.first();
                return;
            }
            _ => {}
        }

        if host.services.contains(IPVPN) && host.services.contains(CI) {
            let (mut loopbacks, mut others) = host
                .ips
                .partition(|ip| self.ranges.contains(IPVPN_LOOPBACK, *ip));
            loopbacks.sort();
            others.sort();
            host.ips = loopbacks.chain(others);
        }

        host.management_ip = host.ips.first();
    }

    fn labels_for<'i, I>(&self, ips: I) -> (BTreeSet<String>, BTreeSet<String>)
    where
        I: Iterator<Item = &'i IpAddr>,
    {
        let mut functions = BTreeSet::new();
        let mut services = BTreeSet::new();

        for ip in ips {
            for range in self.ranges.ranges_containing(*ip) {
                functions.insert(range.function.clone());
                services.extend(range.services.iter().cloned());
            }
        }

        (functions, services)
    }
}
