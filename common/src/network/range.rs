//! # Network Range Registry
//!
//! A [`NetworkRange`] is a named set of CIDR blocks carrying the function label
//! (and optional service labels) that every address inside it contributes to a host.
//!
//! Ranges may overlap. A lookup collects *every* matching range, in configuration
//! order, not only the first one.

use std::net::IpAddr;
use std::str::FromStr;

use pnet::ipnetwork::IpNetwork;

use crate::config::RangeSettings;
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkRange {
    pub name: String,
    pub networks: Vec<IpNetwork>,
    pub function: String,
    pub services: Vec<String>,
}

impl NetworkRange {
    pub fn new(
        name: impl Into<String>,
        networks: Vec<IpNetwork>,
        function: impl Into<String>,
        services: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            networks,
            function: function.into(),
            services,
        }
    }

    /// Builds a range from CIDR strings, failing on the first one that does not parse.
    pub fn parse<S: AsRef<str>>(
        name: &str,
        cidrs: &[S],
        function: &str,
        services: &[String],
    ) -> Result<Self, ConfigError> {
        let networks = cidrs
            .iter()
            .map(|cidr| {
                let value = cidr.as_ref().trim();
                IpNetwork::from_str(value).map_err(|source| ConfigError::InvalidCidr {
                    range: name.to_string(),
                    value: value.to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(name, networks, function, services.to_vec()))
    }

    pub fn contains(&self, ip: IpAddr) -> bool {
        self.networks.iter().any(|network| network.contains(ip))
    }
}

/// Immutable, ordered collection of [`NetworkRange`]s.
#[derive(Debug, Clone, Default)]
pub struct RangeRegistry {
    ranges: Vec<NetworkRange>,
}

impl RangeRegistry {
    pub fn new(ranges: Vec<NetworkRange>) -> Self {
        Self { ranges }
    }

    pub fn from_settings(settings: &[RangeSettings]) -> Result<Self, ConfigError> {
        let ranges = settings
            .iter()
            .map(|range| {
                NetworkRange::parse(&range.name, &range.networks, &range.function, &range.services)
            })
            .collect::<Result<Vec<_>, _>>()?;

        for range in ranges.iter().filter(|range| range.networks.is_empty()) {
            tracing::debug!("range {} has no networks configured", range.name);
        }

        Ok(Self::new(ranges))
    }

    /// Every range whose CIDR set contains `ip`, in configuration order.
    pub fn ranges_containing(&self, ip: IpAddr) -> Vec<&NetworkRange> {
        self.ranges.iter().filter(|range| range.contains(ip)).collect()
    }

    /// Membership test against a single named range.
    ///
    /// An unknown range name matches nothing.
    pub fn contains(&self, name: &str, ip: IpAddr) -> bool {
        self.get(name).is_some_and(|range| range.contains(ip))
    }

    pub fn get(&self, name: &str) -> Option<&NetworkRange> {
        self.ranges.iter().find(|range| range.name == name)
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
