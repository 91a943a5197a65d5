//! # Run Settings
//!
//! Everything the engine needs besides the discovery snapshot: the named network
//! ranges, extra conflict rules, the credential-group rule and the report policy.
//!
//! Settings come from a YAML file when one is given. Without a file the range
//! table is read from environment variables holding shell-array style lists such
//! as `"(10.0.0.0/24 10.1.0.0/24)"`.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

pub const DEFAULT_CREDENTIALS: &str = "TACACS_USERS";
pub const DEFAULT_DATASOURCE: &str = "network-discovery";
pub const DEFAULT_SUPPORTED_VENDORS: [&str; 6] = [
    "Accton Technology",
    "ciena",
    "cisco",
    "juniper",
    "oneaccess",
    "wwpacket_ciena",
];

/// Environment variable, range name, function and services of the built-in range table.
const ENV_RANGES: [(&str, &str, &str, &[&str]); 6] = [
    ("MGMT_RANGES", "MGMT_RANGES", "CES", &[]),
    ("E_DCN", "DCN", "DCN", &[]),
    ("E_CORE_LOOPBACK", "CORE_LOOPBACK", "CORE", &[]),
    ("E_P2P", "P2P", "CPE", &["CI"]),
    ("E_DCN_LOOPBACK", "DCN_LOOPBACK", "DCN", &[]),
    ("E_IPVPN_LOOPBACK", "IPVPN_LOOPBACK", "CPE", &["IPVPN"]),
];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RangeSettings {
    pub name: String,
    #[serde(default)]
    pub networks: Vec<String>,
    pub function: String,
    #[serde(default)]
    pub services: Vec<String>,
}

/// A conflict rule on top of the built-in CORE and DCN ones: when `function` is
/// among several functions, keep only the addresses inside `range`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConflictRuleSettings {
    pub function: String,
    pub range: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CsvSettings {
    pub delimiter: String,
    /// Replaces any delimiter found inside a value; values are never quoted.
    pub substitute: String,
    pub list_delimiter: String,
}

impl Default for CsvSettings {
    fn default() -> Self {
        Self {
            delimiter: ",".into(),
            substitute: "_".into(),
            list_delimiter: ";".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub ranges: Vec<RangeSettings>,
    pub conflict_rules: Vec<ConflictRuleSettings>,
    pub supported_vendors: Vec<String>,
    pub default_credentials: String,
    /// Upper-cased sysContact → credential group.
    pub credentials: HashMap<String, String>,
    pub datasource: String,
    pub csv: CsvSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ranges: Vec::new(),
            conflict_rules: Vec::new(),
            supported_vendors: DEFAULT_SUPPORTED_VENDORS.iter().map(|v| v.to_string()).collect(),
            default_credentials: DEFAULT_CREDENTIALS.into(),
            credentials: HashMap::new(),
            datasource: DEFAULT_DATASOURCE.into(),
            csv: CsvSettings::default(),
        }
    }
}

impl Settings {
    /// Reads the YAML file at `path`, or falls back to the environment range table.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_yaml_file(path),
            None => Ok(Self::from_env()),
        }
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&source).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_yaml_str(source: &str) -> Result<Self, serde_yaml::Error> {
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(source)
    }

    pub fn from_env() -> Self {
        Self {
            ranges: ranges_from_lookup(|key| std::env::var(key).ok()),
            ..Self::default()
        }
    }

    pub fn credential_rule(&self) -> CredentialRule {
        CredentialRule::new(&self.default_credentials, &self.credentials)
    }
}

/// Builds the built-in range table, reading each range's networks through `lookup`.
///
/// A variable that is not set yields a range without networks.
pub fn ranges_from_lookup<F>(lookup: F) -> Vec<RangeSettings>
where
    F: Fn(&str) -> Option<String>,
{
    ENV_RANGES
        .iter()
        .map(|(var, name, function, services)| RangeSettings {
            name: name.to_string(),
            networks: lookup(var).map(|raw| parse_network_list(&raw)).unwrap_or_default(),
            function: function.to_string(),
            services: services.iter().map(|s| s.to_string()).collect(),
        })
        .collect()
}

/// `"(10.0.0.0/24 \"10.1.0.0/24\")"` → `["10.0.0.0/24", "10.1.0.0/24"]`.
pub fn parse_network_list(raw: &str) -> Vec<String> {
    raw.replace(['(', ')', '"'], "")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Picks the credential group of a device from its sysContact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRule {
    default: String,
    by_contact: HashMap<String, String>,
}

impl CredentialRule {
    pub fn new(default: &str, by_contact: &HashMap<String, String>) -> Self {
        Self {
            default: default.to_string(),
            by_contact: by_contact
                .iter()
                .map(|(contact, group)| (contact.to_uppercase(), group.clone()))
                .collect(),
        }
    }

    /// Upper-cases `contact` and maps it; absent or unknown contacts get the default group.
    pub fn group_for(&self, contact: Option<&str>) -> String {
        contact
            .and_then(|contact| self.by_contact.get(&contact.to_uppercase()))
            .unwrap_or(&self.default)
            .clone()
    }

    pub fn default_group(&self) -> &str {
        &self.default
    }
}
