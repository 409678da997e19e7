//! # procmaps - Main Entry Point
//!
//! Reads `/proc/<pid>/maps` for a process chosen by name or PID and prints
//! its classified regions:
//! - **All regions** (default), optionally filtered with `--type`
//! - **Lookup** (`--find ADDR`): the region holding an address
//! - **Thread stacks** (`--threads`): stack regions with their thread ids

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use procmaps::cli::output::{render_json, render_lines, render_threads, render_threads_json};
use procmaps::cli::Args;
use procmaps::domain::Pid;
use procmaps::preflight::{check_process_exists, kernel_release, stack_thread_ids_supported};
use procmaps::process_lookup::find_process_by_name;
use procmaps::Process;

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_ERROR: i32 = 1;
const EXIT_USAGE: i32 = 2;
const EXIT_NOPERM: i32 = 77;

fn main() {
    env_logger::init();
    std::process::exit(match run() {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            let code = exit_code_for(&e);
            eprintln!("error: {e:#}");
            code
        }
    });
}

fn exit_code_for(err: &anyhow::Error) -> i32 {
    let permission_denied = err.chain().any(|cause| {
        cause
            .downcast_ref::<std::io::Error>()
            .is_some_and(|io| io.kind() == std::io::ErrorKind::PermissionDenied)
    });
    let msg = err.to_string().to_lowercase();
    if permission_denied || msg.contains("permission denied") {
        EXIT_NOPERM
    } else if msg.contains("missing required argument") {
        EXIT_USAGE
    } else {
        EXIT_ERROR
    }
}

/// Resolve the process context from CLI arguments.
///
/// - `procmaps my-app` - find process by name
/// - `procmaps --pid 1234` - explicit PID
fn resolve_process(args: &Args) -> Result<Process> {
    if let Some(ref name) = args.process {
        if args.pid.is_some() {
            anyhow::bail!(
                "Cannot use PROCESS argument with --pid.\n\n\
                 Use either:\n  \
                 procmaps my-app              (auto-detect)\n  \
                 procmaps --pid 1234          (explicit PID)"
            );
        }
        let found = find_process_by_name(name)?;
        info!("Matched '{name}' to {} ({})", found.pid, found.command);
        return Ok(found.process());
    }

    if let Some(pid) = args.pid {
        let pid = Pid(pid);
        check_process_exists(pid)?;
        return Ok(Process::new(pid));
    }

    anyhow::bail!(
        "Missing required argument: PROCESS or --pid\n\n\
         Usage:\n  \
         procmaps my-app              Auto-detect PID\n  \
         procmaps --pid 1234          Explicit PID\n\n\
         Run 'procmaps --help' for more options"
    )
}

fn run() -> Result<()> {
    let args = Args::parse();
    let process = resolve_process(&args)?;

    if !args.quiet && !args.json {
        println!("procmaps v{}", env!("CARGO_PKG_VERSION"));
        println!("pid: {}", process.pid().0);
        match process.exe_path() {
            Ok(exe) => println!("exe: {}", exe.display()),
            Err(e) => warn!("Cannot resolve {}: {e}", process.exe_link().display()),
        }
    }

    if let Some(addr) = args.find {
        let region = process
            .find(addr)
            .with_context(|| format!("Failed to read maps of {}", process.pid()))?
            .with_context(|| format!("No region of {} contains 0x{addr:x}", process.pid()))?;
        let out = if args.json { render_json([&region])? } else { render_lines([&region]) };
        print!("{out}");
        return Ok(());
    }

    let mapping = process
        .parse_maps()
        .with_context(|| format!("Failed to read maps of {}", process.pid()))?;

    if args.threads {
        if let Ok(release) = kernel_release() {
            if !stack_thread_ids_supported(&release) {
                warn!("Kernel {release} does not label thread stacks; no thread ids expected");
            }
        }
        let out = if args.json {
            render_threads_json(mapping.stack_threads())?
        } else {
            render_threads(mapping.stack_threads())
        };
        print!("{out}");
        return Ok(());
    }

    let regions = mapping.iter().filter(|r| args.region_type.map_or(true, |t| r.region_type == t));
    let out = if args.json { render_json(regions)? } else { render_lines(regions) };
    print!("{out}");

    Ok(())
}
