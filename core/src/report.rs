//! # Report Views
//!
//! Read-only projections of classified hosts consumed by the writers: CSV rows in
//! a fixed column order, automation-inventory entries grouped by credential set,
//! and DNS host mappings.

use std::collections::HashSet;
use std::fmt;
use std::net::IpAddr;

use netpost_common::config::{CsvSettings, Settings};
use netpost_common::network::host::Host;

pub const UNKNOWN_GROUP: &str = "unknown";
pub const DNS_BANNER: &str =
    "###### do not edit below this line - these entries are generated automatically ######";

/// Host identities and addresses excluded from the netbackup reports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreList(HashSet<String>);

impl IgnoreList {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(entries.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, entry: &str) -> bool {
        self.0.contains(entry)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReportPolicy {
    pub supported_vendors: Vec<String>,
    pub ignore: IgnoreList,
}

impl ReportPolicy {
    /// Unknown vendors are always eligible. Known ones must not be ignored and
    /// must be on the supported-vendor list.
    pub fn netbackup_eligible(&self, host: &Host) -> bool {
        let Some(vendor) = host.vendor.as_deref() else {
            return true;
        };

        let ignored = self.ignore.contains(&host.id)
            || host
                .management_ip
                .is_some_and(|ip| self.ignore.contains(&ip.to_string()));
        if ignored {
            return false;
        }

        self.supported_vendors.iter().any(|supported| supported == vendor)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Host,
    ManagementIp,
    Ip,
    DomainName,
    Community,
    Sysobjid,
    Vendor,
    HwType,
    Function,
    Service,
    DataSource,
    NapalmDriver,
    SysDescr,
    SysContact,
    Protocol,
    Errors,
}

pub const CSV_COLUMNS: [Column; 16] = [
    Column::Host,
    Column::ManagementIp,
    Column::Ip,
    Column::DomainName,
    Column::Community,
    Column::Sysobjid,
    Column::Vendor,
    Column::HwType,
    Column::Function,
    Column::Service,
    Column::DataSource,
    Column::NapalmDriver,
    Column::SysDescr,
    Column::SysContact,
    Column::Protocol,
    Column::Errors,
];

impl Column {
    pub fn header(self) -> &'static str {
        match self {
            Column::Host => "host",
            Column::ManagementIp => "managementip",
            Column::Ip => "ip",
            Column::DomainName => "domainname",
            Column::Community => "community",
            Column::Sysobjid => "sysobjid",
            Column::Vendor => "vendor",
            Column::HwType => "hwtype",
            Column::Function => "function",
            Column::Service => "service",
            Column::DataSource => "datasource",
            Column::NapalmDriver => "napalm_driver",
            Column::SysDescr => "sysdescr",
            Column::SysContact => "syscontact",
            Column::Protocol => "protocol",
            Column::Errors => "errors",
        }
    }

    fn value(self, host: &Host, datasource: &str, list_delimiter: &str) -> String {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        let list = |values: Vec<String>| values.join(list_delimiter);

        match self {
            Column::Host => host.id.clone(),
            Column::ManagementIp => host.management_ip.map(|ip| ip.to_string()).unwrap_or_default(),
            Column::Ip => list(host.ips.to_strings()),
            Column::DomainName => text(&host.domain),
            Column::Community => text(&host.community),
            Column::Sysobjid => text(&host.sysobjid),
            Column::Vendor => text(&host.vendor),
            Column::HwType => text(&host.hardware),
            Column::Function => list(host.functions.iter().cloned().collect()),
            Column::Service => list(host.services.iter().cloned().collect()),
            Column::DataSource => datasource.to_string(),
            Column::NapalmDriver => text(&host.driver),
            Column::SysDescr => text(&host.description),
            Column::SysContact => text(&host.contact),
            Column::Protocol => list(host.protocols.clone()),
            Column::Errors => list(host.errors.clone()),
        }
    }
}

/// One `mgmtip  host  host.domain` line of the DNS hosts file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsEntry {
    pub address: Option<IpAddr>,
    pub host: String,
    /// Empty when the host has no domain.
    pub fqdn: String,
}

impl From<&Host> for DnsEntry {
    fn from(host: &Host) -> Self {
        Self {
            address: host.management_ip,
            host: host.id.clone(),
            fqdn: host.fqdn().unwrap_or_default(),
        }
    }
}

impl fmt::Display for DnsEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let address = self.address.map(|ip| ip.to_string()).unwrap_or_default();
        write!(f, "{}\t{}\t{}", address, self.host, self.fqdn)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryGroup {
    pub name: String,
    pub entries: Vec<String>,
}

/// Renders hosts for the writers according to the run settings.
#[derive(Debug, Clone)]
pub struct Reporter {
    policy: ReportPolicy,
    csv: CsvSettings,
    datasource: String,
}

impl Reporter {
    pub fn new(settings: &Settings, ignore: IgnoreList) -> Self {
        Self {
            policy: ReportPolicy {
                supported_vendors: settings.supported_vendors.clone(),
                ignore,
            },
            csv: settings.csv.clone(),
            datasource: settings.datasource.clone(),
        }
    }

    pub fn policy(&self) -> &ReportPolicy {
        &self.policy
    }

    pub fn eligible(&self, host: &Host) -> bool {
        self.policy.netbackup_eligible(host)
    }

    pub fn csv_header(&self) -> String {
        CSV_COLUMNS
            .iter()
            .map(|column| column.header())
            .collect::<Vec<_>>()
            .join(&self.csv.delimiter)
    }

    /// Values are never quoted; a delimiter inside a value is replaced instead.
    pub fn csv_row(&self, host: &Host) -> String {
        CSV_COLUMNS
            .iter()
            .map(|column| {
                column
                    .value(host, &self.datasource, &self.csv.list_delimiter)
                    .replace(&self.csv.delimiter, &self.csv.substitute)
            })
            .collect::<Vec<_>>()
            .join(&self.csv.delimiter)
    }

    /// `mgmtip    HOSTNAME=id    os=..    FUNCTION=..    SERVICE=..    MULTISERVICE=..    snmp_community=..    PROTOCOL=..`
    ///
    /// Optional fields are omitted when empty. A host without management ip is
    /// addressed by its identity.
    pub fn inventory_entry(&self, host: &Host) -> String {
        let address = host
            .management_ip
            .map(|ip| ip.to_string())
            .unwrap_or_else(|| host.id.clone());
        let mut entry = format!("{}    HOSTNAME={}", address, host.id);

        if let Some(driver) = host.driver.as_deref().filter(|d| !d.is_empty()) {
            entry.push_str(&format!("    os={driver}"));
        }
        if !host.functions.is_empty() {
            entry.push_str(&format!("    FUNCTION={}", join(host.functions.iter())));
        }
        if !host.services.is_empty() {
            entry.push_str(&format!("    SERVICE={}", join(host.services.iter())));
        }
        entry.push_str(&format!("    MULTISERVICE={}", host.services.len() > 1));
        if let Some(community) = host.community.as_deref() {
            entry.push_str(&format!("    snmp_community={community}"));
        }
        if !host.protocols.is_empty() {
            entry.push_str(&format!("    PROTOCOL={}", join(host.protocols.iter())));
        }

        entry
    }

    /// Credential group of `host`, or [`UNKNOWN_GROUP`] when it has no driver or group.
    pub fn inventory_group<'h>(&self, host: &'h Host) -> &'h str {
        let has_driver = host.driver.as_deref().is_some_and(|d| !d.is_empty());
        if !has_driver || host.credentials.is_empty() {
            return UNKNOWN_GROUP;
        }
        &host.credentials
    }
}

fn join<'a, I>(values: I) -> String
where
    I: Iterator<Item = &'a String>,
{
    values.map(String::as_str).collect::<Vec<_>>().join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use netpost_common::network::record::DiscoveryRecord;

    fn host(hostname: &str, ip: &str) -> Host {
        let record = DiscoveryRecord::default()
            .with_hostname(hostname)
            .with_mgmt_ip(ip);
        let mut host = Host::from_record(&record, "TACACS_USERS").unwrap();
        host.management_ip = host.ips.first();
        host
    }

    fn reporter(ignore: &[&str]) -> Reporter {
        Reporter::new(&Settings::default(), IgnoreList::new(ignore.iter().copied()))
    }

    #[test]
    fn test_unknown_vendor_is_eligible() {
        let h = host("r1", "10.0.0.1");
        assert!(reporter(&["r1"]).eligible(&h));
    }

    #[test]
    fn test_supported_vendor_eligibility() {
        let mut h = host("r1", "10.0.0.1");
        h.vendor = Some("cisco".into());

        assert!(reporter(&[]).eligible(&h));
        assert!(!reporter(&["r1"]).eligible(&h));
        assert!(!reporter(&["10.0.0.1"]).eligible(&h));

        h.vendor = Some("hp".into());
        assert!(!reporter(&[]).eligible(&h));
    }

    #[test]
    fn test_csv_header_order() {
        assert_eq!(
            reporter(&[]).csv_header(),
            "host,managementip,ip,domainname,community,sysobjid,vendor,hwtype,function,service,datasource,napalm_driver,sysdescr,syscontact,protocol,errors"
        );
    }

    #[test]
    fn test_csv_row_substitutes_delimiter() {
        let mut h = host("r1.example.net", "10.0.0.1");
        h.ips.insert("10.0.0.2".parse().unwrap());
        h.description = Some("Cisco IOS, Version 15".into());
        h.functions.insert("CPE".into());
        h.services.extend(["CI".to_string(), "IPVPN".to_string()]);
        h.errors.push("a, b".into());

        assert_eq!(
            reporter(&[]).csv_row(&h),
            "r1,10.0.0.1,10.0.0.1;10.0.0.2,example.net,,,,,CPE,CI;IPVPN,network-discovery,,Cisco IOS_ Version 15,,,a_ b"
        );
    }

    #[test]
    fn test_inventory_entry() {
        let mut h = host("r1", "10.0.0.1");
        h.driver = Some("ios".into());
        h.functions.insert("CPE".into());
        h.services.extend(["CI".to_string(), "IPVPN".to_string()]);
        h.community = Some("public".into());
        h.protocols = vec!["ssh".into(), "telnet".into()];

        assert_eq!(
            reporter(&[]).inventory_entry(&h),
            "10.0.0.1    HOSTNAME=r1    os=ios    FUNCTION=CPE    SERVICE=CI,IPVPN    MULTISERVICE=true    snmp_community=public    PROTOCOL=ssh,telnet"
        );
    }

    #[test]
    fn test_inventory_entry_minimal() {
        let h = host("r1", "10.0.0.1");
        assert_eq!(
            reporter(&[]).inventory_entry(&h),
            "10.0.0.1    HOSTNAME=r1    MULTISERVICE=false"
        );
    }

    #[test]
    fn test_inventory_group_without_driver_is_unknown() {
        let mut h = host("r1", "10.0.0.1");
        let reporter = reporter(&[]);
        assert_eq!(reporter.inventory_group(&h), UNKNOWN_GROUP);

        h.driver = Some("junos".into());
        assert_eq!(reporter.inventory_group(&h), "TACACS_USERS");

        h.credentials.clear();
        assert_eq!(reporter.inventory_group(&h), UNKNOWN_GROUP);
    }

    #[test]
    fn test_dns_entry() {
        let h = host("r1.example.net", "10.0.0.1");
        assert_eq!(DnsEntry::from(&h).to_string(), "10.0.0.1\tr1\tr1.example.net");

        let bare = host("", "10.0.0.2");
        assert_eq!(DnsEntry::from(&bare).to_string(), "10.0.0.2\t10.0.0.2\t");
    }
}
