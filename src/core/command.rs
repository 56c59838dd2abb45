//! Typed edit commands with per-variant arity.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::core::record::InstructionRecord;

/// One file edit, arity checked at construction.
///
/// Paths are relative to the working root and resolved by the applier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    /// Replace all occurrences of `old` with `new` in the file at `path`.
    Replace {
        path: PathBuf,
        old: String,
        new: String,
    },
    /// Create (or overwrite) the file at `path` with `content`.
    Create { path: PathBuf, content: String },
    /// Append `content` to the file at `path`, creating it if absent.
    Append { path: PathBuf, content: String },
    /// Remove the file or directory tree at `path`.
    Delete { path: PathBuf },
}

/// Why a record could not become an [`EditCommand`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    UnknownCommand {
        command: String,
    },
    WrongArity {
        command: String,
        expected: usize,
        got: usize,
    },
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::UnknownCommand { command } => {
                write!(f, "unknown command '{command}'")
            }
            RecordError::WrongArity {
                command,
                expected,
                got,
            } => {
                write!(f, "'{command}' requires {expected} argument(s), got {got}")
            }
        }
    }
}

impl EditCommand {
    /// Build a typed command from a raw record.
    ///
    /// Rejection skips the record, never the run.
    pub fn from_record(record: &InstructionRecord) -> Result<Self, RecordError> {
        let args = &record.args;
        match record.command.as_str() {
            "replace" => {
                expect_arity(record, 3)?;
                Ok(Self::Replace {
                    path: PathBuf::from(&args[0]),
                    old: args[1].clone(),
                    new: args[2].clone(),
                })
            }
            "create" => {
                expect_arity(record, 2)?;
                Ok(Self::Create {
                    path: PathBuf::from(&args[0]),
                    content: args[1].clone(),
                })
            }
            "append" => {
                expect_arity(record, 2)?;
                Ok(Self::Append {
                    path: PathBuf::from(&args[0]),
                    content: args[1].clone(),
                })
            }
            "delete" => {
                expect_arity(record, 1)?;
                Ok(Self::Delete {
                    path: PathBuf::from(&args[0]),
                })
            }
            _ => Err(RecordError::UnknownCommand {
                command: record.command.clone(),
            }),
        }
    }

    /// Target path of the edit, relative to the working root.
    pub fn path(&self) -> &Path {
        match self {
            EditCommand::Replace { path, .. }
            | EditCommand::Create { path, .. }
            | EditCommand::Append { path, .. }
            | EditCommand::Delete { path } => path,
        }
    }
}

fn expect_arity(record: &InstructionRecord, expected: usize) -> Result<(), RecordError> {
    let got = record.args.len();
    if got != expected {
        return Err(RecordError::WrongArity {
            command: record.command.clone(),
            expected,
            got,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(command: &str, args: &[&str]) -> InstructionRecord {
        InstructionRecord {
            command: command.to_string(),
            args: args.iter().map(|arg| arg.to_string()).collect(),
        }
    }

    #[test]
    fn builds_each_variant() {
        assert_eq!(
            EditCommand::from_record(&record("replace", &["a.txt", "old", "new"])),
            Ok(EditCommand::Replace {
                path: PathBuf::from("a.txt"),
                old: "old".to_string(),
                new: "new".to_string(),
            })
        );
        assert_eq!(
            EditCommand::from_record(&record("create", &["dir/b.txt", "body"])),
            Ok(EditCommand::Create {
                path: PathBuf::from("dir/b.txt"),
                content: "body".to_string(),
            })
        );
        assert_eq!(
            EditCommand::from_record(&record("append", &["b.txt", "more"])),
            Ok(EditCommand::Append {
                path: PathBuf::from("b.txt"),
                content: "more".to_string(),
            })
        );
        assert_eq!(
            EditCommand::from_record(&record("delete", &["dir"])),
            Ok(EditCommand::Delete {
                path: PathBuf::from("dir"),
            })
        );
    }

    #[test]
    fn wrong_arity_is_rejected_per_record() {
        let err = EditCommand::from_record(&record("replace", &["a.txt", "old"])).unwrap_err();
        assert_eq!(
            err,
            RecordError::WrongArity {
                command: "replace".to_string(),
                expected: 3,
                got: 2,
            }
        );
        assert!(err.to_string().contains("requires 3 argument(s)"));

        let err = EditCommand::from_record(&record("delete", &["a", "b"])).unwrap_err();
        assert!(matches!(err, RecordError::WrongArity { expected: 1, got: 2, .. }));
    }

    #[test]
    fn unknown_command_is_rejected() {
        let err = EditCommand::from_record(&record("rename", &["a", "b"])).unwrap_err();
        assert_eq!(
            err,
            RecordError::UnknownCommand {
                command: "rename".to_string(),
            }
        );
        assert!(err.to_string().contains("unknown command"));
    }

    #[test]
    fn path_accessor_covers_all_variants() {
        let commands = [
            EditCommand::from_record(&record("replace", &["p", "o", "n"])).unwrap(),
            EditCommand::from_record(&record("create", &["p", "c"])).unwrap(),
            EditCommand::from_record(&record("append", &["p", "c"])).unwrap(),
            EditCommand::from_record(&record("delete", &["p"])).unwrap(),
        ];
        for command in &commands {
            assert_eq!(command.path(), Path::new("p"));
        }
    }
}
