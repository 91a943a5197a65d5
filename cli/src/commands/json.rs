use std::io::{self, Write};

use anyhow::Context;

use crate::commands::Inputs;

pub fn json(inputs: &Inputs, pretty: bool) -> anyhow::Result<()> {
    let loaded = inputs.load()?;
    let (hosts, _) = loaded.process()?;

    let mut out = io::stdout().lock();
    for host in hosts.iter() {
        let rendered = if pretty {
            serde_json::to_string_pretty(host)
        } else {
            serde_json::to_string(host)
        }
        .with_context(|| format!("failed to serialize host {}", host.id))?;
        writeln!(out, "{rendered}")?;
    }
    Ok(())
}
