//! core::command
//!
//! The explicit command vocabulary.
//!
//! # Design
//!
//! The command surface is small and fixed, so it is spelled out twice in
//! complementary forms:
//!
//! - [`ContentOps`] is the seven-operation interface of a branch's working
//!   state, implemented once by `Branch` and re-exposed by `Repository`
//!   through explicit delegation. There is no open-ended forwarding.
//! - [`Command`] is the same surface (plus branch management) as plain
//!   data, for the dispatcher (`Repository::execute`), result chaining
//!   (`Repository::chain`), and the REPL parser.

use serde_json::Value;

use super::outcome::Outcome;

/// The fixed content-command surface of a branch.
///
/// Every method returns an [`Outcome`]; none of them can fail in the
/// `Result` sense. See the `Branch` implementation for the per-command
/// state machine.
pub trait ContentOps {
    /// Look up a committed object by name in the head commit.
    fn get(&self, name: &str) -> Outcome;

    /// Stage an object, replacing any staged object of the same name.
    fn add(&mut self, name: &str, value: Value) -> Outcome;

    /// Unstage the object named `name`.
    fn remove_object(&mut self, name: &str) -> Outcome;

    /// Freeze the staging set into a new commit.
    fn commit(&mut self, message: &str) -> Outcome;

    /// Move the head to the commit with the given identity hash.
    fn checkout_commit(&mut self, hash: &str) -> Outcome;

    /// Report the head commit's message.
    fn head(&self) -> Outcome;

    /// Render the commit history, newest first.
    fn log(&self) -> Outcome;
}

/// One command as data.
///
/// Content commands target a branch's working state; the remaining four
/// manage branches and are always handled by the repository itself.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Fork a new branch off the active branch's history.
    Create(String),
    /// Switch the active branch.
    CheckoutBranch(String),
    /// Delete a branch (never the active one).
    RemoveBranch(String),
    /// List branch names, marking the active one.
    List,
    /// Look up a committed object.
    Get(String),
    /// Stage an object.
    Add(String, Value),
    /// Unstage an object.
    RemoveObject(String),
    /// Freeze staged changes into a commit.
    Commit(String),
    /// Move the head to a past commit.
    CheckoutCommit(String),
    /// Report the head commit's message.
    Head,
    /// Render the commit history.
    Log,
}

impl Command {
    /// Whether this command targets a branch's working state rather than
    /// the repository's branch set.
    pub fn is_content(&self) -> bool {
        matches!(
            self,
            Command::Get(_)
                | Command::Add(_, _)
                | Command::RemoveObject(_)
                | Command::Commit(_)
                | Command::CheckoutCommit(_)
                | Command::Head
                | Command::Log
        )
    }
}
