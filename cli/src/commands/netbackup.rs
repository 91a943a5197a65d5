use std::io::{self, Write};

use anyhow::Context;
use netpost_core::writers;

use crate::commands::Inputs;

pub fn netbackup(inputs: &Inputs) -> anyhow::Result<()> {
    let loaded = inputs.load()?;
    let (hosts, _) = loaded.process()?;
    let reporter = loaded.reporter();

    let mut out = io::stdout().lock();
    writers::write_netbackup(&mut out, &hosts, &reporter)
        .and_then(|_| out.flush())
        .context("failed to write netbackup report")
}
