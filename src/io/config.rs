//! Tool configuration stored at `edict.toml` in the working root.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

/// Config file name looked up under the working root.
pub const CONFIG_FILE: &str = "edict.toml";

/// Edit-run configuration (TOML).
///
/// Intended to be edited by humans. Missing fields default to the values the
/// tool has always used.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EdictConfig {
    /// Instruction file, relative to the working root.
    pub instruction_path: String,

    /// Branch that receives the applied edits.
    pub branch: String,

    /// Message for the final commit.
    pub commit_message: String,
}

impl Default for EdictConfig {
    fn default() -> Self {
        Self {
            instruction_path: ".github/ai_instructions/instruction.txt".to_string(),
            branch: "ai/auto-changes".to_string(),
            commit_message: "chore(edict): apply instruction file".to_string(),
        }
    }
}

impl EdictConfig {
    pub fn validate(&self) -> Result<()> {
        if self.instruction_path.trim().is_empty() {
            return Err(anyhow!("instruction_path must be non-empty"));
        }
        if self.branch.trim().is_empty() {
            return Err(anyhow!("branch must be non-empty"));
        }
        if self.commit_message.trim().is_empty() {
            return Err(anyhow!("commit_message must be non-empty"));
        }
        Ok(())
    }
}

/// Load config from `edict.toml` under `root`.
///
/// If the file is missing, returns `EdictConfig::default()`.
pub fn load_config(root: &Path) -> Result<EdictConfig> {
    let path = root.join(CONFIG_FILE);
    if !path.exists() {
        let cfg = EdictConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let cfg: EdictConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(temp.path()).expect("load");
        assert_eq!(cfg, EdictConfig::default());
    }

    #[test]
    fn load_merges_partial_file_over_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        fs::write(
            temp.path().join(CONFIG_FILE),
            "branch = \"edits/nightly\"\n",
        )
        .expect("write");
        let cfg = load_config(temp.path()).expect("load");
        assert_eq!(cfg.branch, "edits/nightly");
        assert_eq!(
            cfg.instruction_path,
            EdictConfig::default().instruction_path
        );
    }

    #[test]
    fn empty_branch_is_rejected() {
        let temp = tempfile::tempdir().expect("tempdir");
        fs::write(temp.path().join(CONFIG_FILE), "branch = \" \"\n").expect("write");
        let err = load_config(temp.path()).expect_err("load should fail");
        assert!(err.to_string().contains("branch must be non-empty"));
    }
}
