//! Command-line argument parsing and output formatting

pub mod args;
pub mod output;

pub use args::{parse_address, Args};
