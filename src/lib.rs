//! Instruction-file edit applier.
//!
//! `edict` reads a plain-text instruction file (`cmd:arg|arg|...`, one edit
//! per line), applies the edits to a working tree in file order, and commits
//! the result to a dedicated branch once at least one edit applied. The
//! architecture enforces a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (line parsing, typed command
//!   construction). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (filesystem edits, git, config).
//!   Isolated to enable mocking in tests.
//!
//! [`run`] coordinates core logic with I/O to implement the CLI commands.

pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod run;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
