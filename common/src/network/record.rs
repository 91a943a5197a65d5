//! # Discovery Record
//!
//! One line of the colon-delimited discovery file, keyed by the column names of
//! its header line (`MGMTIP:HOSTNAME:COMMUNITY:SYSOBJID:SYSDESCR:SYSCONTACT:PROTO`).

pub const MGMTIP: &str = "MGMTIP";
pub const HOSTNAME: &str = "HOSTNAME";
pub const COMMUNITY: &str = "COMMUNITY";
pub const SYSOBJID: &str = "SYSOBJID";
pub const SYSDESCR: &str = "SYSDESCR";
pub const SYSCONTACT: &str = "SYSCONTACT";
pub const PROTO: &str = "PROTO";

/// Raw field values of a single discovery line. Empty values are stored as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveryRecord {
    pub mgmt_ip: Option<String>,
    pub hostname: Option<String>,
    pub community: Option<String>,
    pub sysobjid: Option<String>,
    pub description: Option<String>,
    pub contact: Option<String>,
    pub protocol: Option<String>,
}

impl DiscoveryRecord {
    /// Builds a record from `(column, value)` pairs. Unknown columns are ignored.
    pub fn from_fields<'a, I>(fields: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut record = Self::default();
        for (column, value) in fields {
            let value = non_empty(value);
            match column.trim() {
                MGMTIP => record.mgmt_ip = value,
                HOSTNAME => record.hostname = value,
                COMMUNITY => record.community = value,
                SYSOBJID => record.sysobjid = value,
                SYSDESCR => record.description = value,
                SYSCONTACT => record.contact = value,
                PROTO => record.protocol = value,
                other => tracing::trace!("ignoring discovery column {other}"),
            }
        }
        record
    }

    pub fn with_mgmt_ip(mut self, ip: &str) -> Self {
        self.mgmt_ip = non_empty(ip);
        self
    }

    pub fn with_hostname(mut self, hostname: &str) -> Self {
        self.hostname = non_empty(hostname);
        self
    }

    pub fn with_community(mut self, community: &str) -> Self {
        self.community = non_empty(community);
        self
    }

    pub fn with_sysobjid(mut self, sysobjid: &str) -> Self {
        self.sysobjid = non_empty(sysobjid);
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = non_empty(description);
        self
    }

    pub fn with_contact(mut self, contact: &str) -> Self {
        self.contact = non_empty(contact);
        self
    }

    pub fn with_protocol(mut self, protocol: &str) -> Self {
        self.protocol = non_empty(protocol);
        self
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
