//! Filesystem edit operations against an explicit working root.
//!
//! Each operation is best-effort: a failure marks the record as not applied
//! and the run continues. The permissive cases (overwriting an existing file
//! on `create`, a missing `old` substring on `replace`) are warnings, not
//! failures.

use std::fs;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::core::command::EditCommand;

/// Result of attempting one edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// The operation ran to completion (possibly with warnings).
    Applied,
    /// The target path does not exist under the working root.
    NotFound(PathBuf),
}

/// Apply one edit beneath `root`.
///
/// I/O errors (unreadable file, permission denied) propagate with context;
/// the caller treats them as "record did not apply" and continues.
pub fn apply_edit(root: &Path, command: &EditCommand) -> Result<EditOutcome> {
    match command {
        EditCommand::Replace { path, old, new } => replace(root, path, old, new),
        EditCommand::Create { path, content } => create(root, path, content),
        EditCommand::Append { path, content } => append(root, path, content),
        EditCommand::Delete { path } => delete(root, path),
    }
}

fn replace(root: &Path, path: &Path, old: &str, new: &str) -> Result<EditOutcome> {
    let target = root.join(path);
    if !target.exists() {
        return Ok(EditOutcome::NotFound(path.to_path_buf()));
    }
    let text =
        fs::read_to_string(&target).with_context(|| format!("read {}", target.display()))?;
    // Absence of the target substring is non-fatal: warn and write back
    // unchanged so the record still counts as attempted.
    if !text.contains(old) {
        warn!(path = %target.display(), "replace target not found in file");
    }
    let replaced = text.replace(old, new);
    fs::write(&target, replaced).with_context(|| format!("write {}", target.display()))?;
    Ok(EditOutcome::Applied)
}

fn create(root: &Path, path: &Path, content: &str) -> Result<EditOutcome> {
    let target = root.join(path);
    ensure_parent(&target)?;
    if target.exists() {
        warn!(path = %target.display(), "file already exists, overwriting");
    }
    fs::write(&target, content).with_context(|| format!("write {}", target.display()))?;
    Ok(EditOutcome::Applied)
}

fn append(root: &Path, path: &Path, content: &str) -> Result<EditOutcome> {
    let target = root.join(path);
    if !target.exists() {
        debug!(path = %target.display(), "file absent, creating fresh");
        ensure_parent(&target)?;
    }
    let mut file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(&target)
        .with_context(|| format!("open {} for append", target.display()))?;
    file.write_all(content.as_bytes())
        .with_context(|| format!("append to {}", target.display()))?;
    Ok(EditOutcome::Applied)
}

fn delete(root: &Path, path: &Path) -> Result<EditOutcome> {
    let target = root.join(path);
    if !target.exists() {
        return Ok(EditOutcome::NotFound(path.to_path_buf()));
    }
    if target.is_dir() {
        fs::remove_dir_all(&target)
            .with_context(|| format!("remove directory {}", target.display()))?;
    } else {
        fs::remove_file(&target).with_context(|| format!("remove {}", target.display()))?;
    }
    Ok(EditOutcome::Applied)
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    Ok(())
}
