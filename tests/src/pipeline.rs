#![cfg(test)]
use netpost_core::pipeline;
use netpost_core::report::Reporter;
use netpost_core::sources::{discovery, ignore, vendors};
use netpost_core::writers::{self, WriteOptions};

use crate::fixtures::{self, Workspace};

struct Outcome {
    hosts: netpost_core::collection::HostCollection,
    summary: pipeline::RunSummary,
    reporter: Reporter,
}

fn process(ws: &Workspace) -> anyhow::Result<Outcome> {
    let settings = fixtures::settings();
    let vendors = vendors::load_vendors(&ws.path("sysobjid.yaml"))?;
    let records = discovery::load_discovery(&ws.path("hosts"))?;
    let ignore = ignore::load_ignore(&ws.path("static.ignore"))?;

    let (hosts, summary) = pipeline::run(&settings, &vendors, &records)?;
    Ok(Outcome {
        hosts,
        summary,
        reporter: Reporter::new(&settings, ignore),
    })
}

#[test]
fn discovery_snapshot_is_merged_and_classified() {
    let ws = Workspace::new();
    let outcome = process(&ws).unwrap();

    assert_eq!(outcome.summary.records, 8);
    assert_eq!(outcome.summary.dropped, 1);
    assert_eq!(outcome.summary.merged, 2);
    assert_eq!(outcome.hosts.len(), 5);

    let ids: Vec<&str> = outcome.hosts.iter().map(|h| h.id.as_str()).collect();
    assert_eq!(ids, vec!["pe1", "cpe7", "ces3", "192.168.20.1", "lab1"]);
}

#[test]
fn core_loopback_resolves_pe_conflict() {
    let ws = Workspace::new();
    let outcome = process(&ws).unwrap();
    let pe1 = &outcome.hosts.hosts()[0];

    assert_eq!(pe1.functions.iter().collect::<Vec<_>>(), vec!["CORE"]);
    assert_eq!(pe1.ips.to_strings(), vec!["10.255.0.1"]);
    assert_eq!(pe1.removed_ips.to_strings(), vec!["192.168.10.1"]);
    assert_eq!(pe1.management_ip, Some("10.255.0.1".parse().unwrap()));
    // first record wins
    assert_eq!(pe1.community.as_deref(), Some("public"));
    assert_eq!(pe1.vendor.as_deref(), Some("cisco"));
    assert_eq!(pe1.domain.as_deref(), Some("core.example.net"));
    assert_eq!(pe1.credentials, "TACACS_USERS");
}

#[test]
fn ipvpn_loopback_becomes_management_ip() {
    let ws = Workspace::new();
    let outcome = process(&ws).unwrap();
    let cpe7 = &outcome.hosts.hosts()[1];

    assert_eq!(cpe7.services.iter().collect::<Vec<_>>(), vec!["CI", "IPVPN"]);
    assert_eq!(cpe7.management_ip, Some("10.0.0.1".parse().unwrap()));
    assert_eq!(cpe7.description.as_deref(), Some("Juniper SRX"));
    assert_eq!(cpe7.credentials, "OPS_USERS");
    assert_eq!(cpe7.driver.as_deref(), Some("junos"));
}

#[test]
fn artifacts_are_written() {
    let ws = Workspace::new();
    let outcome = process(&ws).unwrap();

    let written = writers::write_all(
        &ws.output(),
        &outcome.hosts,
        &outcome.reporter,
        WriteOptions {
            include_unknown: false,
            filter: true,
        },
    )
    .unwrap();
    assert_eq!(written.len(), 3);

    let csv = Workspace::read(&ws.output().join(writers::CSV_FILE));
    assert_eq!(csv.lines().count(), 6);
    assert!(csv.lines().any(|line| line.starts_with("cpe7,10.0.0.1,10.0.0.1;10.0.0.5,example.net,")));
    assert!(csv.contains("Juniper SRX"));

    let inventory = Workspace::read(&ws.output().join(writers::INVENTORY_FILE));
    assert!(inventory.contains("[TACACS_USERS]\n10.255.0.1    HOSTNAME=pe1    os=iosxr    FUNCTION=CORE    MULTISERVICE=false    snmp_community=public    PROTOCOL=ssh"));
    assert!(inventory.contains("[OPS_USERS]\n10.0.0.1    HOSTNAME=cpe7    os=junos    FUNCTION=CPE    SERVICE=CI,IPVPN    MULTISERVICE=true    snmp_community=public"));
    assert!(!inventory.contains("[unknown]"));
    assert!(!inventory.contains("lab1"));

    let dns = Workspace::read(&ws.output().join(writers::DNS_FILE));
    assert!(dns.contains("10.255.0.1\tpe1\tpe1.core.example.net\n"));
    assert!(dns.contains("172.16.0.9\tces3\t\n"));
}

#[test]
fn netbackup_report_respects_ignore_list() {
    let ws = Workspace::new();
    let outcome = process(&ws).unwrap();

    let rows = outcome.hosts.netbackup_rows(&outcome.reporter);
    assert_eq!(rows.len(), 4);
    assert!(rows.iter().all(|row| !row.starts_with("lab1,")));
}

#[test]
fn invalid_range_fails_before_processing() {
    let ws = Workspace::new();
    let mut settings = fixtures::settings();
    settings.ranges[0].networks = vec!["not-a-network".into()];
    let vendors = vendors::load_vendors(&ws.path("sysobjid.yaml")).unwrap();
    let records = discovery::load_discovery(&ws.path("hosts")).unwrap();

    assert!(pipeline::run(&settings, &vendors, &records).is_err());
}
