use std::path::PathBuf;

use colored::*;
use netpost_core::collection::HostCollection;
use netpost_core::pipeline::RunSummary;
use netpost_core::report::Reporter;
use tracing::info;

use crate::terminal::logging::PRINT_TARGET;

pub const TOTAL_WIDTH: usize = 64;
const KEY_WIDTH: usize = 16;

pub fn print(msg: &str) {
    info!(target: PRINT_TARGET, "{msg}");
}

pub fn header(msg: &str) {
    let formatted: String = format!("⟦ {} ⟧", msg);
    let msg_len: usize = formatted.chars().count();

    let dash_count: usize = TOTAL_WIDTH.saturating_sub(msg_len);
    let left: usize = dash_count / 2;
    let right: usize = dash_count - left;

    let line: ColoredString = format!(
        "{}{}{}",
        "─".repeat(left),
        formatted.to_uppercase().bright_green(),
        "─".repeat(right)
    )
    .bright_black();

    print(&format!("{}", line));
}

pub fn aligned_line(key: &str, value: ColoredString) {
    let dots: String = ".".repeat((KEY_WIDTH + 1).saturating_sub(key.len()));
    print(&format!(
        "{} {}{}{} {}",
        ">".bright_black(),
        key.cyan(),
        dots.bright_black(),
        ":".bright_black(),
        value
    ));
}

pub fn summary(summary: &RunSummary, hosts: &HostCollection, reporter: &Reporter, written: &[PathBuf]) {
    let eligible = hosts.iter().filter(|host| reporter.eligible(host)).count();
    let conflicts = hosts.iter().filter(|host| host.functions.len() > 1).count();

    aligned_line("Records", summary.records.to_string().normal());
    aligned_line("Hosts", summary.hosts.to_string().green().bold());
    aligned_line("Merged", summary.merged.to_string().normal());
    aligned_line("Dropped", colour_count(summary.dropped, |s| s.yellow()));
    aligned_line("Conflicts", colour_count(conflicts, |s| s.red().bold()));
    aligned_line("Unknown group", hosts.unknown_count(reporter).to_string().normal());
    aligned_line("Netbackup", eligible.to_string().normal());

    print(&format!("{}", "═".repeat(TOTAL_WIDTH).bright_black()));
    for path in written {
        aligned_line("Wrote", path.display().to_string().normal());
    }
}

fn colour_count(count: usize, highlight: fn(ColoredString) -> ColoredString) -> ColoredString {
    let text: ColoredString = count.to_string().normal();
    if count == 0 { text } else { highlight(text) }
}
