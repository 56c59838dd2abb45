//! I/O helpers: filesystem edits, version control, config.

pub mod apply;
pub mod config;
pub mod git;
