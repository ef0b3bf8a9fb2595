//! cli::parse
//!
//! Line grammar for scripts and the REPL.
//!
//! # Grammar
//!
//! ```text
//! add <name> <value>        value parsed as JSON, bare words become strings
//! get <name>
//! remove <name>
//! commit <message...>
//! checkout <hash>
//! head
//! log
//! branch [list]
//! branch create <name>
//! branch checkout <name>
//! branch remove <name>
//! help | exit | quit
//! ```
//!
//! Blank lines and lines starting with `#` are skipped. The bare verbs
//! `remove` and `checkout` work on the active branch's content; the
//! branch-level forms live under `branch`.

use serde_json::Value;
use thiserror::Error;

use crate::core::command::Command;

/// Errors from parsing one input line.
#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("unknown command '{0}' (try 'help')")]
    UnknownCommand(String),

    #[error("unknown branch subcommand '{0}' (try 'help')")]
    UnknownBranchCommand(String),

    #[error("usage: {0}")]
    Usage(&'static str),
}

/// One parsed input line.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    /// A store command.
    Command(Command),
    /// Print the grammar.
    Help,
    /// End the session.
    Exit,
}

/// Parse one line. Returns `None` for blank and comment lines.
pub fn parse_line(line: &str) -> Result<Option<Input>, ParseError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (verb, rest) = split_word(line);
    let input = match verb {
        "add" => {
            let (name, value) = split_word(rest);
            if name.is_empty() || value.is_empty() {
                return Err(ParseError::Usage("add <name> <value>"));
            }
            Input::Command(Command::Add(name.to_string(), parse_value(value)))
        }
        "get" => Input::Command(Command::Get(single_arg(rest, "get <name>")?)),
        "remove" => Input::Command(Command::RemoveObject(single_arg(rest, "remove <name>")?)),
        "commit" => {
            if rest.is_empty() {
                return Err(ParseError::Usage("commit <message>"));
            }
            Input::Command(Command::Commit(rest.to_string()))
        }
        "checkout" => Input::Command(Command::CheckoutCommit(single_arg(
            rest,
            "checkout <hash>",
        )?)),
        "head" => Input::Command(no_args(rest, Command::Head, "head")?),
        "log" => Input::Command(no_args(rest, Command::Log, "log")?),
        "branch" => Input::Command(parse_branch(rest)?),
        "help" => no_args(rest, Input::Help, "help")?,
        "exit" => no_args(rest, Input::Exit, "exit")?,
        "quit" => no_args(rest, Input::Exit, "quit")?,
        other => return Err(ParseError::UnknownCommand(other.to_string())),
    };

    Ok(Some(input))
}

/// Parse everything after the `branch` verb.
fn parse_branch(rest: &str) -> Result<Command, ParseError> {
    let (sub, rest) = split_word(rest);
    match sub {
        "" | "list" => no_args(rest, Command::List, "branch [list]"),
        "create" => Ok(Command::Create(single_arg(rest, "branch create <name>")?)),
        "checkout" => Ok(Command::CheckoutBranch(single_arg(
            rest,
            "branch checkout <name>",
        )?)),
        "remove" => Ok(Command::RemoveBranch(single_arg(
            rest,
            "branch remove <name>",
        )?)),
        other => Err(ParseError::UnknownBranchCommand(other.to_string())),
    }
}

/// Split off the first whitespace-delimited word.
fn split_word(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    match input.find(char::is_whitespace) {
        Some(idx) => (&input[..idx], input[idx..].trim_start()),
        None => (input, ""),
    }
}

/// Exactly one word, or a usage error.
fn single_arg(rest: &str, usage: &'static str) -> Result<String, ParseError> {
    let (arg, extra) = split_word(rest);
    if arg.is_empty() || !extra.is_empty() {
        return Err(ParseError::Usage(usage));
    }
    Ok(arg.to_string())
}

/// No words at all, or a usage error.
fn no_args<T>(rest: &str, value: T, usage: &'static str) -> Result<T, ParseError> {
    if rest.is_empty() {
        Ok(value)
    } else {
        Err(ParseError::Usage(usage))
    }
}

/// Values are JSON when they parse as JSON; anything else is taken as a
/// bare string, so `add x hello` stores `"hello"`.
fn parse_value(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}
