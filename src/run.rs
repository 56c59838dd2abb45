//! Orchestration for a single `edict apply` run.
//!
//! Records are applied unconditionally in file order; no retries, no
//! rollback. Partial application is an accepted outcome. The commit step is
//! the only fatal failure.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::core::command::EditCommand;
use crate::core::record::{LineOutcome, classify_lines};
use crate::io::apply::{EditOutcome, apply_edit};
use crate::io::config::EdictConfig;
use crate::io::git::Vcs;

/// Per-run options beyond the config file.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Parse and report without touching the filesystem.
    pub dry_run: bool,
    /// Skip the commit step even if edits applied.
    pub no_commit: bool,
}

/// Result of a full apply run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOutcome {
    /// Records whose operation ran to completion.
    pub applied: usize,
    /// Records whose operation failed (missing target, I/O error).
    pub failed: usize,
    /// Lines skipped during parsing (no colon, unknown command, wrong arity).
    pub skipped: usize,
    /// Whether the commit step ran.
    pub committed: bool,
}

impl RunOutcome {
    /// True once at least one edit succeeded; gates the commit.
    pub fn applied_any(&self) -> bool {
        self.applied > 0
    }
}

/// Apply the instruction file beneath `root`, committing via `vcs` when at
/// least one edit applied.
///
/// A missing instruction file is "nothing to do", not an error. The only
/// errors this returns are an unreadable instruction file and a failed
/// commit sequence.
pub fn run_apply<V: Vcs>(
    root: &Path,
    cfg: &EdictConfig,
    vcs: &V,
    options: &RunOptions,
) -> Result<RunOutcome> {
    let instruction_path = root.join(&cfg.instruction_path);
    if !instruction_path.exists() {
        info!(path = %instruction_path.display(), "no instruction file, nothing to do");
        return Ok(RunOutcome::default());
    }

    match vcs.status_clean() {
        Ok(true) => debug!("worktree is clean"),
        Ok(false) => warn!("worktree has local changes, proceeding anyway"),
        Err(err) => warn!(error = %err, "could not check worktree status"),
    }

    let text = fs::read_to_string(&instruction_path)
        .with_context(|| format!("read {}", instruction_path.display()))?;

    let mut outcome = RunOutcome::default();

    for (line_no, classified) in classify_lines(&text) {
        let record = match classified {
            LineOutcome::Blank | LineOutcome::Comment => continue,
            LineOutcome::MissingDelimiter => {
                warn!(line = line_no, "invalid line (missing ':'), skipping");
                outcome.skipped += 1;
                continue;
            }
            LineOutcome::Record(record) => record,
        };

        let command = match EditCommand::from_record(&record) {
            Ok(command) => command,
            Err(err) => {
                warn!(line = line_no, %err, "skipping record");
                outcome.skipped += 1;
                continue;
            }
        };

        if options.dry_run {
            info!(
                line = line_no,
                command = %record.command,
                path = %command.path().display(),
                "dry run, not applied"
            );
            continue;
        }

        debug!(line = line_no, command = %record.command, "applying");
        match apply_edit(root, &command) {
            Ok(EditOutcome::Applied) => outcome.applied += 1,
            Ok(EditOutcome::NotFound(path)) => {
                warn!(line = line_no, path = %path.display(), "target not found");
                outcome.failed += 1;
            }
            Err(err) => {
                warn!(line = line_no, error = %err, "edit failed");
                outcome.failed += 1;
            }
        }
    }

    if !outcome.applied_any() {
        info!("no edits applied, skipping commit");
        return Ok(outcome);
    }
    if options.no_commit {
        info!("--no-commit set, leaving worktree uncommitted");
        return Ok(outcome);
    }

    commit_edits(vcs, cfg).context("commit applied edits")?;
    outcome.committed = true;
    info!(branch = %cfg.branch, "edits committed");
    Ok(outcome)
}

fn commit_edits<V: Vcs>(vcs: &V, cfg: &EdictConfig) -> Result<()> {
    vcs.create_or_reset_branch(&cfg.branch)?;
    vcs.stage_all()?;
    vcs.commit(&cfg.commit_message)?;
    Ok(())
}

/// Report from parse-only validation (`edict check`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckReport {
    /// Records that would dispatch to an edit operation.
    pub valid: usize,
    /// Human-readable problems, one per rejected line.
    pub problems: Vec<String>,
}

/// Parse the instruction file at `path` and report problems without applying.
pub fn check_file(path: &Path) -> Result<CheckReport> {
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let mut report = CheckReport::default();
    for (line_no, classified) in classify_lines(&text) {
        match classified {
            LineOutcome::Blank | LineOutcome::Comment => {}
            LineOutcome::MissingDelimiter => report
                .problems
                .push(format!("line {line_no}: missing ':' separator")),
            LineOutcome::Record(record) => match EditCommand::from_record(&record) {
                Ok(_) => report.valid += 1,
                Err(err) => report.problems.push(format!("line {line_no}: {err}")),
            },
        }
    }
    Ok(report)
}
