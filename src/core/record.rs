//! Instruction-file line parsing.
//!
//! One instruction per line: `<command>:<arg1>|<arg2>|...`. The command token
//! is the substring before the first colon, trimmed and lower-cased; the
//! remainder splits on `|` into arguments, each trimmed. Arity is not checked
//! here; that happens when a record becomes an
//! [`EditCommand`](crate::core::command::EditCommand).

/// One parsed instruction line: command token plus ordered arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionRecord {
    pub command: String,
    pub args: Vec<String>,
}

impl InstructionRecord {
    /// Re-serialize into `cmd:a|b|c` form.
    ///
    /// Round-trips byte-for-byte with [`classify_line`] modulo whitespace
    /// trimming.
    pub fn to_line(&self) -> String {
        format!("{}:{}", self.command, self.args.join("|"))
    }
}

/// Classification of a single raw instruction-file line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// Empty after trimming.
    Blank,
    /// Starts with `#`.
    Comment,
    /// No colon separator; reported and skipped, parsing continues.
    MissingDelimiter,
    /// A well-formed `cmd:args` line.
    Record(InstructionRecord),
}

/// Classify one raw line.
pub fn classify_line(line: &str) -> LineOutcome {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineOutcome::Blank;
    }
    if trimmed.starts_with('#') {
        return LineOutcome::Comment;
    }
    let Some((cmd, rest)) = trimmed.split_once(':') else {
        return LineOutcome::MissingDelimiter;
    };
    let command = cmd.trim().to_lowercase();
    let args = rest
        .trim()
        .split('|')
        .map(|arg| arg.trim().to_string())
        .collect();
    LineOutcome::Record(InstructionRecord { command, args })
}

/// Lazily classify every line of an instruction file, paired with its
/// 1-indexed line number.
pub fn classify_lines(text: &str) -> impl Iterator<Item = (usize, LineOutcome)> + '_ {
    text.lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, classify_line(line)))
}
