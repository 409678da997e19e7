//! Resolve a process name to a [`Process`] context.
//!
//! Candidates come from `/proc/<pid>/stat` (command name, run state) and
//! `/proc/<pid>/exe`. Exact name matches beat substring matches, so
//! `procmaps app` picks `app` over `app-helper` when both run.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::Pid;
use crate::process::Process;

/// A process matched by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessMatch {
    pub pid: Pid,
    pub exe_path: PathBuf,
    pub command: String,
}

impl ProcessMatch {
    #[must_use]
    pub fn process(&self) -> Process {
        Process::new(self.pid)
    }
}

/// How well a candidate matched the requested name
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum MatchKind {
    Partial,
    Exact,
}

/// The fields of `/proc/<pid>/stat` the lookup needs
#[derive(Debug, PartialEq, Eq)]
struct StatSummary {
    command: String,
    state: char,
}

impl StatSummary {
    /// Zombies and exiting tasks have no address space left to inspect
    fn is_inspectable(&self) -> bool {
        !matches!(self.state, 'Z' | 'X' | 'x')
    }
}

/// Find a single live process by name.
///
/// Kernel threads and processes whose `exe` is unreadable are skipped, as
/// are zombies. The calling process never matches itself.
///
/// # Errors
/// - `/proc` cannot be listed
/// - no process matches
/// - several processes match equally well
pub fn find_process_by_name(name: &str) -> Result<ProcessMatch> {
    let own_pid = Pid::current();
    let mut candidates = Vec::new();

    for entry in fs::read_dir("/proc").context("Failed to read /proc")?.flatten() {
        let Ok(pid) = entry.file_name().to_string_lossy().parse::<i32>() else {
            continue;
        };
        let pid = Pid(pid);
        if pid == own_pid {
            continue;
        }

        let Ok(exe_path) = Process::new(pid).exe_path() else {
            continue;
        };
        let Some(stat) = fs::read_to_string(entry.path().join("stat"))
            .ok()
            .and_then(|s| parse_stat(&s))
        else {
            continue;
        };
        if !stat.is_inspectable() {
            continue;
        }

        if let Some(kind) = match_kind(&stat.command, &exe_path, name) {
            candidates.push((kind, ProcessMatch { pid, exe_path, command: stat.command }));
        }
    }

    select(name, candidates)
}

/// Keep the best-ranked candidates and require exactly one.
fn select(name: &str, mut candidates: Vec<(MatchKind, ProcessMatch)>) -> Result<ProcessMatch> {
    let Some(best) = candidates.iter().map(|(kind, _)| *kind).max() else {
        bail!(
            "No running process named '{name}'.\n\
             List candidates with: pgrep -l {name}"
        );
    };
    candidates.retain(|(kind, _)| *kind == best);

    if candidates.len() == 1 {
        return Ok(candidates.remove(0).1);
    }

    let pids: Vec<String> = candidates
        .iter()
        .map(|(_, m)| format!("  {} {} ({})", m.pid, m.command, m.exe_path.display()))
        .collect();
    bail!(
        "'{name}' is ambiguous, {} processes match:\n{}\n\n\
         Pick one with: procmaps --pid <PID>",
        candidates.len(),
        pids.join("\n")
    )
}

/// Parse "pid (comm) state ..." from `/proc/<pid>/stat`.
///
/// The command may itself contain parentheses, so it runs up to the last `)`.
fn parse_stat(stat: &str) -> Option<StatSummary> {
    let (head, tail) = stat.rsplit_once(')')?;
    let (_, command) = head.split_once('(')?;
    let state = tail.trim_start().chars().next()?;
    Some(StatSummary { command: command.to_string(), state })
}

/// Rank `pattern` against a candidate's command name and executable.
///
/// A pattern with a directory part is compared by its basename; a full path
/// equal to the executable is exact as well.
fn match_kind(command: &str, exe_path: &Path, pattern: &str) -> Option<MatchKind> {
    let exe_name = exe_path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    let wanted = Path::new(pattern).file_name().and_then(|n| n.to_str()).unwrap_or(pattern);

    if exe_path == Path::new(pattern) || command == wanted || exe_name == wanted {
        Some(MatchKind::Exact)
    } else if command.contains(wanted) || exe_name.contains(wanted) {
        Some(MatchKind::Partial)
    } else {
        None
    }
}
