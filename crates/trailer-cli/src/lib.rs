//! Library components of the `trailer` command-line tool.

pub mod config;
pub mod logging;
