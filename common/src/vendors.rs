//! # Vendor Lookup
//!
//! Maps a device's sysobjid onto vendor, hardware type and automation driver.

use std::collections::HashMap;

use serde::Deserialize;

const ENTERPRISES: &str = "1.3.6.1.4.1";
const DOTTED_ENTERPRISES: &str = ".1.3.6.1.4.1";

/// Strips the single leading dot SNMP tools put in front of the enterprises arc.
///
/// `.1.3.6.1.4.1.9.1.1` becomes `1.3.6.1.4.1.9.1.1`; anything else is returned unchanged.
pub fn normalize_sysobjid(raw: &str) -> String {
    let raw = raw.trim();
    match raw.strip_prefix(DOTTED_ENTERPRISES) {
        Some(rest) => format!("{ENTERPRISES}{rest}"),
        None => raw.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorRecord {
    pub sysobjid: String,
    pub vendor: String,
    pub hwtype: Option<String>,
    pub driver: Option<String>,
}

/// Defines the contract for resolving device vendors from a sysobjid.
pub trait VendorRepository: Send + Sync {
    /// Retrieves the vendor record for `sysobjid`.
    ///
    /// Implementations normalize the identifier first. An unknown identifier is
    /// `None`, never an error.
    fn lookup(&self, sysobjid: &str) -> Option<&VendorRecord>;
}

#[derive(Debug, Deserialize)]
struct VendorEntry {
    vendor: String,
    #[serde(default)]
    hwtype: Option<String>,
    #[serde(default)]
    napalm_os: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct VendorMapFile {
    #[serde(default)]
    sysobjid_map: HashMap<String, VendorEntry>,
}

/// In-memory vendor table, immutable once loaded.
#[derive(Debug, Clone, Default)]
pub struct VendorTable {
    records: HashMap<String, VendorRecord>,
}

impl VendorTable {
    pub fn new(records: impl IntoIterator<Item = VendorRecord>) -> Self {
        Self {
            records: records
                .into_iter()
                .map(|record| (normalize_sysobjid(&record.sysobjid), record))
                .collect(),
        }
    }

    /// Parses the `sysobjid_map` document. A document without that key is an empty table.
    pub fn from_yaml_str(source: &str) -> Result<Self, serde_yaml::Error> {
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        let file: Option<VendorMapFile> = serde_yaml::from_str(source)?;
        let records = file
            .unwrap_or_default()
            .sysobjid_map
            .into_iter()
            .map(|(sysobjid, entry)| VendorRecord {
                sysobjid,
                vendor: entry.vendor,
                hwtype: entry.hwtype,
                driver: entry.napalm_os,
            });
        Ok(Self::new(records))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl VendorRepository for VendorTable {
    fn lookup(&self, sysobjid: &str) -> Option<&VendorRecord> {
        self.records.get(&normalize_sysobjid(sysobjid))
    }
}
