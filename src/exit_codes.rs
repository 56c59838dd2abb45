//! Stable exit codes for edict CLI commands.

/// Run succeeded, including "no edits applied" and a missing instruction file.
pub const OK: i32 = 0;
/// Fatal run failure: the final commit sequence, an unreadable instruction
/// file, or invalid config.
pub const FAILURE: i32 = 1;
