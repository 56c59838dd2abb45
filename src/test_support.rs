//! Test-only helpers: a temp git repository and a recording [`Vcs`] double.

use std::cell::RefCell;
use std::fs;
use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result, anyhow};

use crate::io::git::Vcs;

/// Temp git repository with identity configured and an initial commit.
pub struct TestRepo {
    dir: tempfile::TempDir,
}

impl TestRepo {
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir().context("tempdir")?;
        let root = dir.path();
        git(root, &["init"])?;
        git(root, &["config", "user.email", "test@example.com"])?;
        git(root, &["config", "user.name", "test"])?;
        fs::write(root.join("README.md"), "hi\n").context("write README.md")?;
        git(root, &["add", "README.md"])?;
        git(root, &["commit", "-m", "chore: init"])?;
        Ok(Self { dir })
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Write the instruction file at `relative_path`, creating parents.
    pub fn write_instructions(&self, relative_path: &str, contents: &str) -> Result<()> {
        let path = self.root().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create {}", parent.display()))?;
        }
        fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }

    pub fn current_branch(&self) -> Result<String> {
        git_capture(self.root(), &["rev-parse", "--abbrev-ref", "HEAD"])
    }

    pub fn last_commit_message(&self) -> Result<String> {
        git_capture(self.root(), &["log", "-1", "--pretty=%B"])
    }

    pub fn commit_count(&self) -> Result<usize> {
        let out = git_capture(self.root(), &["rev-list", "--count", "HEAD"])?;
        out.parse().context("parse commit count")
    }
}

fn git(root: &Path, args: &[&str]) -> Result<()> {
    let output = Command::new("git")
        .args(args)
        .current_dir(root)
        .output()
        .with_context(|| format!("spawn git {}", args.join(" ")))?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(anyhow!("git {} failed: {}", args.join(" "), stderr.trim()));
    }
    Ok(())
}

fn git_capture(root: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(root)
        .output()
        .with_context(|| format!("spawn git {}", args.join(" ")))?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(anyhow!("git {} failed: {}", args.join(" "), stderr.trim()));
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Recording [`Vcs`] double for driver tests without a git binary.
#[derive(Debug, Default)]
pub struct MockVcs {
    calls: RefCell<Vec<String>>,
    fail_commit: bool,
    dirty: bool,
}

impl MockVcs {
    /// Double whose `commit` call fails, for fatal-path tests.
    pub fn failing_commit() -> Self {
        Self {
            fail_commit: true,
            ..Self::default()
        }
    }

    /// Double reporting a dirty worktree.
    pub fn dirty() -> Self {
        Self {
            dirty: true,
            ..Self::default()
        }
    }

    /// Calls recorded so far, in invocation order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl Vcs for MockVcs {
    fn create_or_reset_branch(&self, branch: &str) -> Result<()> {
        self.calls.borrow_mut().push(format!("branch {branch}"));
        Ok(())
    }

    fn stage_all(&self) -> Result<()> {
        self.calls.borrow_mut().push("stage".to_string());
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<()> {
        self.calls.borrow_mut().push(format!("commit {message}"));
        if self.fail_commit {
            return Err(anyhow!("commit rejected"));
        }
        Ok(())
    }

    fn status_clean(&self) -> Result<bool> {
        self.calls.borrow_mut().push("status".to_string());
        Ok(!self.dirty)
    }
}
