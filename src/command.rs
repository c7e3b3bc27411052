//! Tokenizer for shell command lines
//!
//! Task names contain spaces, so arguments may be wrapped in quotes.
//! Splitting follows POSIX shell word rules via `shell_words`.

use anyhow::{Context, Result};

/// Split a command line into arguments
///
/// # Examples
/// ```
/// # use habit_ledger::command::split_args;
/// let args = split_args(r#"inc "push a commit""#).unwrap();
/// assert_eq!(args, vec!["inc", "push a commit"]);
/// ```
pub fn split_args(line: &str) -> Result<Vec<String>> {
    shell_words::split(line).with_context(|| format!("Failed to parse command: {line}"))
}
