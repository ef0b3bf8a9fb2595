//! core::outcome
//!
//! The uniform result every operation returns.
//!
//! # Design
//!
//! Failures here are ordinary values, not errors: an [`Outcome`] carries a
//! success flag, a human-readable message, and an optional payload. The
//! engine never panics or aborts on a bad command; callers check
//! [`Outcome::is_success`] before trusting the payload.
//!
//! # Chaining
//!
//! Each outcome also names the entity that should receive a follow-up
//! command, the [`Receiver`] tag. `get`, `head`, and `log` chain onto the
//! branch that answered them; every mutation and all branch management
//! chain onto the repository. `Repository::chain` resolves the tag and
//! forwards; the tag is plain data, so an outcome never borrows the store.

use std::sync::Arc;

use serde_json::Value;

use super::commit::Commit;
use super::types::BranchName;

/// Which entity a chained command is routed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Receiver {
    /// The repository that produced (or forwarded) the outcome.
    Repository,
    /// A specific branch, by name. Routing survives an active-branch
    /// switch; it fails only if the branch has since been removed.
    Branch(BranchName),
}

/// Data attached to a successful outcome.
#[derive(Debug, Clone)]
pub enum Payload {
    /// Object content: stored, found, or removed values, or a head message.
    Value(Value),
    /// The commit selected by a historical checkout.
    Commit(Arc<Commit>),
    /// Commits in reverse chronological order, from `log`.
    History(Vec<Arc<Commit>>),
    /// Branch names in lexicographic order, from `list`.
    Branches(Vec<BranchName>),
}

impl Payload {
    /// The payload as a plain value, if it is one.
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Payload::Value(value) => Some(value),
            _ => None,
        }
    }

    /// The payload as a commit, if it is one.
    pub fn as_commit(&self) -> Option<&Arc<Commit>> {
        match self {
            Payload::Commit(commit) => Some(commit),
            _ => None,
        }
    }

    /// The payload as a commit history, if it is one.
    pub fn as_history(&self) -> Option<&[Arc<Commit>]> {
        match self {
            Payload::History(commits) => Some(commits),
            _ => None,
        }
    }

    /// The payload as a branch listing, if it is one.
    pub fn as_branches(&self) -> Option<&[BranchName]> {
        match self {
            Payload::Branches(names) => Some(names),
            _ => None,
        }
    }
}

/// The result of one command: success flag, message, optional payload,
/// and the receiver for any chained command.
///
/// # Example
///
/// ```
/// use strata::core::repo::Repository;
///
/// let mut repo = Repository::new();
/// let outcome = repo.add("x", 1);
///
/// assert!(outcome.is_success());
/// assert_eq!(outcome.message(), "Added x to stage.");
/// assert_eq!(outcome.value(), Some(&serde_json::json!(1)));
/// ```
#[derive(Debug, Clone)]
pub struct Outcome {
    success: bool,
    message: String,
    payload: Option<Payload>,
    receiver: Receiver,
}

impl Outcome {
    /// A successful outcome with no payload.
    pub(crate) fn success(message: impl Into<String>, receiver: Receiver) -> Self {
        Self {
            success: true,
            message: message.into(),
            payload: None,
            receiver,
        }
    }

    /// A failed outcome. Failures never carry a payload.
    pub(crate) fn failure(message: impl Into<String>, receiver: Receiver) -> Self {
        Self {
            success: false,
            message: message.into(),
            payload: None,
            receiver,
        }
    }

    /// Attach a payload.
    pub(crate) fn with_payload(mut self, payload: Payload) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Whether the command succeeded.
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Whether the command failed. Always the negation of
    /// [`Outcome::is_success`].
    pub fn is_error(&self) -> bool {
        !self.success
    }

    /// The human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The payload, if any.
    pub fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }

    /// Shortcut for the payload as a plain value.
    pub fn value(&self) -> Option<&Value> {
        self.payload().and_then(Payload::as_value)
    }

    /// The entity a chained command is routed to.
    pub fn receiver(&self) -> &Receiver {
        &self.receiver
    }
}
