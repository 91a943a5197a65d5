mod commands;
mod terminal;

use commands::{CommandLine, Commands, json, netbackup, run};
use terminal::{logging, print};

fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init(commands.log_level());

    match &commands.command {
        Commands::Run(args) => {
            print::header("post-processing discovery");
            run::run(&commands.inputs, args)
        }
        Commands::Netbackup => netbackup::netbackup(&commands.inputs),
        Commands::Json { pretty } => json::json(&commands.inputs, *pretty),
    }
}
