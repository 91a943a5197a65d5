pub mod json;
pub mod netbackup;
pub mod run;

use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Args, Parser, Subcommand};
use netpost_common::config::Settings;
use netpost_common::network::record::DiscoveryRecord;
use netpost_common::vendors::VendorTable;
use netpost_core::collection::HostCollection;
use netpost_core::pipeline::{self, RunSummary};
use netpost_core::report::{IgnoreList, Reporter};
use netpost_core::sources::{discovery, ignore, vendors};
use tracing::{Level, debug};

#[derive(Parser)]
#[command(name = "netpost")]
#[command(about = "Post-process a network discovery snapshot into inventories.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub inputs: Inputs,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the CSV, automation inventory and DNS files
    #[command(alias = "r")]
    Run(RunArgs),
    /// Print the netbackup CSV report to stdout
    #[command(alias = "n")]
    Netbackup,
    /// Print every host as JSON, one per line
    #[command(alias = "j")]
    Json {
        #[arg(long)]
        pretty: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct Inputs {
    /// Discovery file produced by the network scan
    #[arg(long, env = "E_HOSTSFILE", global = true)]
    pub hosts_file: Option<PathBuf>,

    /// YAML file mapping sysobjid to vendor, hwtype and napalm_os
    #[arg(long, env = "E_SNMP_SYSOBJID_MAPFILE", global = true)]
    pub sysobjid_map: Option<PathBuf>,

    /// Hosts or addresses left out of the netbackup reports
    #[arg(long, env = "E_IGNORE_FILE", default_value = "static.ignore", global = true)]
    pub ignore_file: PathBuf,

    /// Settings file; without it ranges are read from the environment
    #[arg(long, env = "E_NETPOST_CONFIG", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    #[arg(long, env = "E_OUTPUT_FOLDER", default_value = "output")]
    pub output_folder: PathBuf,

    /// Keep the `unknown` inventory group and hosts without management ip
    #[arg(long)]
    pub include_unknown: bool,

    /// Do not apply the netbackup policy to the inventory
    #[arg(long)]
    pub no_filter: bool,
}

/// Everything read from disk for one run.
pub struct Loaded {
    pub settings: Settings,
    pub vendors: VendorTable,
    pub records: Vec<DiscoveryRecord>,
    pub ignore: IgnoreList,
}

impl Loaded {
    pub fn process(&self) -> anyhow::Result<(HostCollection, RunSummary)> {
        pipeline::run(&self.settings, &self.vendors, &self.records)
    }

    /// Consumes the ignore list; call after [`Loaded::process`].
    pub fn reporter(self) -> Reporter {
        Reporter::new(&self.settings, self.ignore)
    }
}

impl Inputs {
    pub fn load(&self) -> anyhow::Result<Loaded> {
        let hosts_file = self
            .hosts_file
            .as_deref()
            .context("no discovery file given (--hosts-file or E_HOSTSFILE)")?;
        let sysobjid_map = self
            .sysobjid_map
            .as_deref()
            .context("no sysobjid map given (--sysobjid-map or E_SNMP_SYSOBJID_MAPFILE)")?;

        let settings = Settings::load(self.config.as_deref()).context("failed to load settings")?;
        let ignore = ignore::load_ignore(&self.ignore_file)?;
        if ignore.is_empty() {
            debug!("empty ignore list, every supported host is eligible for netbackup");
        }

        Ok(Loaded {
            vendors: vendors::load_vendors(sysobjid_map)?,
            records: discovery::load_discovery(hosts_file)?,
            ignore,
            settings,
        })
    }
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn log_level(&self) -> Level {
        match (self.quiet, self.verbose) {
            (true, _) => Level::WARN,
            (false, 0) => Level::INFO,
            (false, 1) => Level::DEBUG,
            (false, _) => Level::TRACE,
        }
    }
}
