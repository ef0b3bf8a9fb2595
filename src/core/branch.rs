//! core::branch
//!
//! The branch state machine.
//!
//! # States
//!
//! A branch is **Empty** (no commits, no head, empty stage) until its first
//! commit, then **Active** (head points at some commit, stage is a copy of
//! that commit's records). A historical checkout can detach the head onto
//! any past commit; history itself is append-only and never rewritten.
//!
//! # Invariants
//!
//! - `head` is `None` exactly when `history` is empty.
//! - After construction, a commit, or a checkout, the stage is a fresh
//!   copy of the head's records (empty when there is no head); the stage
//!   never aliases a commit's snapshot.
//! - `pending` counts successful staging mutations since the last commit
//!   and resets to zero on commit and on checkout.

use std::sync::Arc;

use serde_json::Value;

use super::command::ContentOps;
use super::commit::Commit;
use super::outcome::{Outcome, Payload, Receiver};
use super::record::RecordSet;
use super::types::BranchName;

/// A named, append-only line of commits plus the mutable working state
/// layered on top of it.
///
/// Branches are created by the repository, at construction or by forking
/// the active branch. Forked branches share their prior commits by
/// reference count: the `Vec` of history diverges, the commits do not.
#[derive(Debug, Clone)]
pub struct Branch {
    name: BranchName,
    history: Vec<Arc<Commit>>,
    stage: RecordSet,
    head: Option<Arc<Commit>>,
    pending: usize,
}

impl Branch {
    /// Create an empty branch.
    pub(crate) fn new(name: BranchName) -> Self {
        Self::with_history(name, Vec::new())
    }

    /// Create a branch seeded with an existing history (the fork path).
    ///
    /// The head is the latest commit of that history and the stage starts
    /// as a copy of its records.
    pub(crate) fn with_history(name: BranchName, history: Vec<Arc<Commit>>) -> Self {
        let head = history.last().cloned();
        let stage = head
            .as_ref()
            .map(|commit| commit.records().clone())
            .unwrap_or_default();
        Self {
            name,
            history,
            stage,
            head,
            pending: 0,
        }
    }

    /// The branch name.
    pub fn name(&self) -> &BranchName {
        &self.name
    }

    /// The commit history, oldest first.
    pub fn commits(&self) -> &[Arc<Commit>] {
        &self.history
    }

    /// The commit the branch currently views, if any.
    pub fn head_commit(&self) -> Option<&Arc<Commit>> {
        self.head.as_ref()
    }

    /// Staged add/remove operations since the last commit.
    pub fn pending_changes(&self) -> usize {
        self.pending
    }

    /// The staging set.
    pub fn staged(&self) -> &RecordSet {
        &self.stage
    }

    fn chains_here(&self) -> Receiver {
        Receiver::Branch(self.name.clone())
    }

    fn no_commits_yet(&self) -> Outcome {
        Outcome::failure(
            format!("Branch {} does not have any commits yet.", self.name),
            self.chains_here(),
        )
    }
}

impl ContentOps for Branch {
    /// Look up `name` in the head commit's records. The stage is never
    /// consulted: an added-but-uncommitted object is not yet gettable.
    fn get(&self, name: &str) -> Outcome {
        let Some(head) = &self.head else {
            return Outcome::failure(
                format!("Object {name} is not committed."),
                self.chains_here(),
            );
        };
        match head.records().find(name) {
            Some(record) => Outcome::success(format!("Found object {name}."), self.chains_here())
                .with_payload(Payload::Value(record.value.clone())),
            None => Outcome::failure(
                format!("Object {name} is not committed."),
                self.chains_here(),
            ),
        }
    }

    /// Stage `value` under `name`, last write wins. Replacing an already
    /// staged name still counts as a pending change. Never fails.
    fn add(&mut self, name: &str, value: Value) -> Outcome {
        self.pending += 1;
        self.stage.upsert(name, value.clone());
        Outcome::success(format!("Added {name} to stage."), Receiver::Repository)
            .with_payload(Payload::Value(value))
    }

    /// Unstage `name`. A miss fails without touching the stage or the
    /// pending counter.
    fn remove_object(&mut self, name: &str) -> Outcome {
        match self.stage.remove(name) {
            Some(record) => {
                self.pending += 1;
                Outcome::success(format!("Added {name} for removal."), Receiver::Repository)
                    .with_payload(Payload::Value(record.value))
            }
            None => Outcome::failure(
                format!("Object {name} is not committed."),
                Receiver::Repository,
            ),
        }
    }

    /// Freeze the stage into a new commit and append it to history.
    /// Fails when nothing is pending.
    fn commit(&mut self, message: &str) -> Outcome {
        if self.pending == 0 {
            return Outcome::failure(
                "Nothing to commit, working directory clean.",
                Receiver::Repository,
            );
        }

        let changed = self.pending;
        let commit = Arc::new(Commit::new(message, self.stage.clone()));
        self.stage = commit.records().clone();
        self.head = Some(Arc::clone(&commit));
        self.history.push(commit);
        self.pending = 0;

        Outcome::success(
            format!("{message}\n\t{changed} objects changed"),
            Receiver::Repository,
        )
    }

    /// Move the head onto the commit identified by `hash` and restore its
    /// snapshot as the stage. The history is untouched: a later commit
    /// appends after the existing entries, it never rewrites them.
    fn checkout_commit(&mut self, hash: &str) -> Outcome {
        let target = self
            .history
            .iter()
            .find(|commit| commit.id().as_str() == hash)
            .cloned();
        let Some(target) = target else {
            return Outcome::failure(
                format!("Commit {hash} does not exist."),
                Receiver::Repository,
            );
        };

        self.stage = target.records().clone();
        self.head = Some(Arc::clone(&target));
        self.pending = 0;

        Outcome::success(format!("HEAD is now at {hash}."), Receiver::Repository)
            .with_payload(Payload::Commit(target))
    }

    /// Report the head commit's message, or fail when the branch has no
    /// commits.
    fn head(&self) -> Outcome {
        match &self.head {
            Some(commit) => Outcome::success(commit.message(), self.chains_here())
                .with_payload(Payload::Value(Value::String(commit.message().to_string()))),
            None => self.no_commits_yet(),
        }
    }

    /// Render the full history, newest first. A detached head does not
    /// filter the log.
    fn log(&self) -> Outcome {
        if self.history.is_empty() {
            return self.no_commits_yet();
        }

        let newest_first: Vec<Arc<Commit>> = self.history.iter().rev().cloned().collect();
        let rendered = newest_first
            .iter()
            .map(|commit| commit.describe())
            .collect::<Vec<_>>()
            .join("\n\n");

        Outcome::success(rendered, self.chains_here())
            .with_payload(Payload::History(newest_first))
    }
}
