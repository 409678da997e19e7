//! Rendering of regions for the terminal and for `--json`

// String formatting intentionally uses format! for clarity
#![allow(clippy::format_push_string)]

use anyhow::Result;
use serde::Serialize;

use crate::domain::Tid;
use crate::mapping::Region;

/// A stack region with its owning thread, for `--threads --json`
#[derive(Serialize)]
struct ThreadStack<'a> {
    tid: Tid,
    #[serde(flatten)]
    region: &'a Region,
}

/// `<type> <canonical maps line>` per region
pub fn render_lines<'a>(regions: impl IntoIterator<Item = &'a Region>) -> String {
    let mut out = String::new();
    for region in regions {
        out.push_str(&format!("{:<8} {region}\n", region.region_type.as_str()));
    }
    out
}

pub fn render_json<'a>(regions: impl IntoIterator<Item = &'a Region>) -> Result<String> {
    let regions: Vec<&Region> = regions.into_iter().collect();
    Ok(serde_json::to_string_pretty(&regions)?)
}

/// `<tid> <canonical maps line>` per stack
pub fn render_threads<'a>(stacks: impl IntoIterator<Item = (Tid, &'a Region)>) -> String {
    let mut out = String::new();
    for (tid, region) in stacks {
        out.push_str(&format!("{:<8} {region}\n", tid.0));
    }
    out
}

pub fn render_threads_json<'a>(stacks: impl IntoIterator<Item = (Tid, &'a Region)>) -> Result<String> {
    let stacks: Vec<ThreadStack<'_>> =
        stacks.into_iter().map(|(tid, region)| ThreadStack { tid, region }).collect();
    Ok(serde_json::to_string_pretty(&stacks)?)
}
