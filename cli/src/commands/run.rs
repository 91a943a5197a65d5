use netpost_core::writers::{self, WriteOptions};

use crate::commands::{Inputs, RunArgs};
use crate::terminal::print;

pub fn run(inputs: &Inputs, args: &RunArgs) -> anyhow::Result<()> {
    let loaded = inputs.load()?;
    let (hosts, summary) = loaded.process()?;
    let reporter = loaded.reporter();

    let options = WriteOptions {
        include_unknown: args.include_unknown,
        filter: !args.no_filter,
    };
    let written = writers::write_all(&args.output_folder, &hosts, &reporter, options)?;

    print::summary(&summary, &hosts, &reporter, &written);
    Ok(())
}
