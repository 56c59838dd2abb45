//! Git adapter for the commit step.
//!
//! The commit sequence is the run's only fatal failure mode, so the
//! collaborator stays behind a narrow trait that tests can mock without a
//! git binary.

use std::path::PathBuf;
use std::process::{Command, Output};

use anyhow::{Context, Result, anyhow};
use tracing::debug;

/// Narrow version-control seam used after a successful apply loop.
pub trait Vcs {
    /// Create the branch at current HEAD, resetting it if it already exists.
    fn create_or_reset_branch(&self, branch: &str) -> Result<()>;
    /// Stage all changes (respects .gitignore).
    fn stage_all(&self) -> Result<()>;
    /// Commit staged changes with a message.
    fn commit(&self, message: &str) -> Result<()>;
    /// True if the worktree has no changes (including untracked files).
    fn status_clean(&self) -> Result<bool>;
}

/// [`Vcs`] implementation wrapping `git` subprocess calls.
#[derive(Debug, Clone)]
pub struct GitCli {
    workdir: PathBuf,
}

impl GitCli {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    fn run_capture(&self, args: &[&str]) -> Result<String> {
        let output = self.run_checked(args)?;
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    fn run_checked(&self, args: &[&str]) -> Result<Output> {
        let output = self.run(args)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!("git {} failed: {}", args.join(" "), stderr.trim()));
        }
        Ok(output)
    }

    fn run(&self, args: &[&str]) -> Result<Output> {
        Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .with_context(|| format!("spawn git {}", args.join(" ")))
    }
}

impl Vcs for GitCli {
    fn create_or_reset_branch(&self, branch: &str) -> Result<()> {
        debug!(branch, "creating or resetting branch");
        self.run_checked(&["checkout", "-B", branch])?;
        Ok(())
    }

    fn stage_all(&self) -> Result<()> {
        self.run_checked(&["add", "-A"])?;
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<()> {
        debug!("committing staged changes");
        self.run_checked(&["commit", "-m", message])?;
        Ok(())
    }

    fn status_clean(&self) -> Result<bool> {
        let out = self.run_capture(&["status", "--porcelain=v1", "-uall"])?;
        Ok(out.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestRepo;
    use std::fs;

    #[test]
    fn status_clean_reflects_untracked_files() {
        let repo = TestRepo::new().expect("repo");
        let git = GitCli::new(repo.root());
        assert!(git.status_clean().expect("status"));

        fs::write(repo.root().join("new.txt"), "x").expect("write");
        assert!(!git.status_clean().expect("status"));
    }

    #[test]
    fn branch_stage_commit_sequence_lands_a_commit() {
        let repo = TestRepo::new().expect("repo");
        let git = GitCli::new(repo.root());

        fs::write(repo.root().join("change.txt"), "hello").expect("write");
        git.create_or_reset_branch("ai/auto-changes").expect("branch");
        git.stage_all().expect("stage");
        git.commit("apply edits").expect("commit");

        assert_eq!(repo.current_branch().expect("branch"), "ai/auto-changes");
        assert!(repo.last_commit_message().expect("log").contains("apply edits"));
        assert!(git.status_clean().expect("status"));
    }

    #[test]
    fn create_or_reset_branch_resets_existing_branch() {
        let repo = TestRepo::new().expect("repo");
        let git = GitCli::new(repo.root());

        git.create_or_reset_branch("ai/auto-changes").expect("first");
        // Resetting while already on the branch must succeed.
        git.create_or_reset_branch("ai/auto-changes").expect("second");
        assert_eq!(repo.current_branch().expect("branch"), "ai/auto-changes");
    }

    #[test]
    fn commit_with_nothing_staged_fails() {
        let repo = TestRepo::new().expect("repo");
        let git = GitCli::new(repo.root());
        let err = git.commit("empty").expect_err("commit should fail");
        assert!(err.to_string().contains("git commit"));
    }
}
