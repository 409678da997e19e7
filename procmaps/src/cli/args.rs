//! CLI argument definitions

use clap::Parser;
use procmaps_common::RegionType;

#[derive(Parser)]
#[command(
    name = "procmaps",
    about = "Inspect and classify a process's memory map",
    after_help = "\
EXAMPLES:
    procmaps my-app                          Auto-detect PID from process name
    procmaps --pid 1234                      All regions of PID 1234
    procmaps --pid 1234 --type lib           Only shared libraries
    procmaps --pid 1234 --find 0x7f3a0000    Region holding an address
    procmaps --pid 1234 --json               Machine-readable output"
)]
pub struct Args {
    /// Process name to inspect (auto-detects PID)
    #[arg(value_name = "PROCESS")]
    pub process: Option<String>,

    /// Process ID to inspect
    #[arg(short, long)]
    pub pid: Option<i32>,

    /// Show only the region containing ADDR (hex, optional 0x prefix)
    #[arg(short, long, value_name = "ADDR", value_parser = parse_address)]
    pub find: Option<u64>,

    /// Show only regions of this type (heap, stack, vdso, vsyscall, vvar, lib, exe, data, unknown)
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub region_type: Option<RegionType>,

    /// List stack regions with their thread ids
    #[arg(long, conflicts_with_all = ["find", "region_type"])]
    pub threads: bool,

    /// Print JSON instead of maps-style lines
    #[arg(long)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long)]
    pub quiet: bool,
}

/// Parse a hexadecimal address with or without `0x`.
///
/// Unlike the maps parser this is strict: user input gets a real error.
pub fn parse_address(s: &str) -> Result<u64, String> {
    let digits = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);
    u64::from_str_radix(digits, 16).map_err(|e| format!("invalid address '{s}': {e}"))
}
