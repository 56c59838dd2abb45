//! Command-line entry point for `edict`.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};

use edict::exit_codes;
use edict::io::config::load_config;
use edict::io::git::GitCli;
use edict::run::{RunOptions, check_file, run_apply};

#[derive(Parser)]
#[command(
    name = "edict",
    version,
    about = "Apply instruction-file edits to a working tree and commit them to a branch"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Apply the instruction file and commit the result.
    Apply {
        /// Instruction file, relative to the working root (defaults to the
        /// configured path).
        #[arg(short, long)]
        file: Option<PathBuf>,
        /// Working root the edits run against.
        #[arg(long, default_value = ".")]
        root: PathBuf,
        /// Apply edits but skip branch creation and commit.
        #[arg(long)]
        no_commit: bool,
        /// Parse and report without touching the filesystem.
        #[arg(long)]
        dry_run: bool,
    },
    /// Parse the instruction file and report problems without applying.
    Check {
        /// Instruction file, relative to the working root (defaults to the
        /// configured path).
        #[arg(short, long)]
        file: Option<PathBuf>,
        /// Working root the instruction file resolves against.
        #[arg(long, default_value = ".")]
        root: PathBuf,
    },
}

fn main() {
    edict::logging::init();
    let code = match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{:#}", err);
            exit_codes::FAILURE
        }
    };
    std::process::exit(code);
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    match cli.command {
        Command::Apply {
            file,
            root,
            no_commit,
            dry_run,
        } => cmd_apply(file, &root, no_commit, dry_run),
        Command::Check { file, root } => cmd_check(file, &root),
    }
}

fn cmd_apply(file: Option<PathBuf>, root: &Path, no_commit: bool, dry_run: bool) -> Result<i32> {
    let mut cfg = load_config(root)?;
    if let Some(file) = file {
        cfg.instruction_path = file.to_string_lossy().into_owned();
    }

    let instruction = root.join(&cfg.instruction_path);
    if !instruction.exists() {
        println!("no instruction file at {}, nothing to do", instruction.display());
        return Ok(exit_codes::OK);
    }

    let vcs = GitCli::new(root);
    let options = RunOptions { dry_run, no_commit };
    let outcome = run_apply(root, &cfg, &vcs, &options)?;

    println!(
        "applied: {}  failed: {}  skipped: {}  committed: {}",
        outcome.applied, outcome.failed, outcome.skipped, outcome.committed
    );
    Ok(exit_codes::OK)
}

fn cmd_check(file: Option<PathBuf>, root: &Path) -> Result<i32> {
    let mut cfg = load_config(root)?;
    if let Some(file) = file {
        cfg.instruction_path = file.to_string_lossy().into_owned();
    }

    let path = root.join(&cfg.instruction_path);
    if !path.exists() {
        println!("no instruction file at {}", path.display());
        return Ok(exit_codes::OK);
    }

    let report = check_file(&path)?;
    println!("valid records: {}", report.valid);
    for problem in &report.problems {
        println!("  {problem}");
    }
    Ok(exit_codes::OK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_apply_defaults() {
        let cli = Cli::parse_from(["edict", "apply"]);
        match cli.command {
            Command::Apply {
                file,
                root,
                no_commit,
                dry_run,
            } => {
                assert_eq!(file, None);
                assert_eq!(root, PathBuf::from("."));
                assert!(!no_commit);
                assert!(!dry_run);
            }
            Command::Check { .. } => panic!("expected apply"),
        }
    }

    #[test]
    fn parse_apply_flags() {
        let cli = Cli::parse_from([
            "edict",
            "apply",
            "--file",
            "edits.txt",
            "--root",
            "/tmp/tree",
            "--no-commit",
            "--dry-run",
        ]);
        match cli.command {
            Command::Apply {
                file,
                root,
                no_commit,
                dry_run,
            } => {
                assert_eq!(file, Some(PathBuf::from("edits.txt")));
                assert_eq!(root, PathBuf::from("/tmp/tree"));
                assert!(no_commit);
                assert!(dry_run);
            }
            Command::Check { .. } => panic!("expected apply"),
        }
    }

    #[test]
    fn parse_check() {
        let cli = Cli::parse_from(["edict", "check", "--file", "edits.txt"]);
        assert!(matches!(cli.command, Command::Check { .. }));
    }
}
