#![cfg(test)]
use std::fs;
use std::path::{Path, PathBuf};

use netpost_common::config::{RangeSettings, Settings};

pub const DISCOVERY: &str = "\
MGMTIP:HOSTNAME:COMMUNITY:SYSOBJID:SYSDESCR:SYSCONTACT:PROTO
10.255.0.1:pe1.core.example.net:public:.1.3.6.1.4.1.9.1.1:Cisco IOS XR:noc:ssh
192.168.10.1:PE1:private::::
10.0.0.5:cpe7.example.net:public:1.3.6.1.4.1.2636.1.1.1.2.29:Juniper SRX:ops:
10.0.0.1:cpe7:::::
172.16.0.9:ces3:::::
192.168.20.1::::::
:::::
10.9.9.9:lab1:public:1.3.6.1.4.1.9.1.1:::
";

pub const SYSOBJID_MAP: &str = "\
sysobjid_map:
  1.3.6.1.4.1.9.1.1:
    vendor: cisco
    hwtype: ASR9K
    napalm_os: iosxr
  1.3.6.1.4.1.2636.1.1.1.2.29:
    vendor: juniper
    hwtype: SRX300
    napalm_os: junos
";

pub const IGNORE: &str = "lab1    decommissioned\n";

fn range(name: &str, networks: &[&str], function: &str, services: &[&str]) -> RangeSettings {
    RangeSettings {
        name: name.into(),
        networks: networks.iter().map(|n| n.to_string()).collect(),
        function: function.into(),
        services: services.iter().map(|s| s.to_string()).collect(),
    }
}

pub fn settings() -> Settings {
    let mut settings = Settings {
        ranges: vec![
            range("MGMT_RANGES", &["172.16.0.0/16"], "CES", &[]),
            range("DCN", &["10.20.0.0/16"], "DCN", &[]),
            range("CORE_LOOPBACK", &["10.255.0.0/24"], "CORE", &[]),
            range("P2P", &["192.168.0.0/16", "10.0.0.4/30"], "CPE", &["CI"]),
            range("DCN_LOOPBACK", &["10.20.255.0/24"], "DCN", &[]),
            range("IPVPN_LOOPBACK", &["10.0.0.0/30"], "CPE", &["IPVPN"]),
        ],
        ..Settings::default()
    };
    settings.credentials.insert("OPS".into(), "OPS_USERS".into());
    settings
}

/// Scratch directory holding the three input files.
pub struct Workspace {
    pub dir: tempfile::TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("hosts"), DISCOVERY).unwrap();
        fs::write(dir.path().join("sysobjid.yaml"), SYSOBJID_MAP).unwrap();
        fs::write(dir.path().join("static.ignore"), IGNORE).unwrap();
        Self { dir }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn output(&self) -> PathBuf {
        self.path("output")
    }

    pub fn read(path: &Path) -> String {
        fs::read_to_string(path).unwrap()
    }
}
