//! core::commit
//!
//! Immutable snapshots of staged state.
//!
//! # Invariants
//!
//! - A commit's record set is a deep copy taken at creation time; later
//!   staging mutations never reach a past commit.
//! - A commit never changes after construction. Branches share commits
//!   across forks by reference count, which is only sound because of this.
//! - Identity is derived from timestamp and message alone (see
//!   [`CommitId`]); changing what a commit contains cannot change what it
//!   is called.

use serde::Serialize;

use super::record::RecordSet;
use super::types::{CommitId, Timestamp};

/// An immutable snapshot: a message, a creation timestamp, the frozen
/// records, and a derived identity.
///
/// Commits only enter a branch's history through a successful `commit`
/// command; the constructors here build standalone values (useful for
/// deterministic ids in tests) but cannot inject history.
///
/// # Example
///
/// ```
/// use strata::core::commit::Commit;
/// use strata::core::record::RecordSet;
/// use serde_json::json;
///
/// let mut stage = RecordSet::new();
/// stage.upsert("x", json!(1));
///
/// let commit = Commit::new("first", stage);
/// assert_eq!(commit.message(), "first");
/// assert_eq!(commit.records().len(), 1);
/// assert_eq!(commit.id().as_str().len(), 64);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Commit {
    message: String,
    timestamp: Timestamp,
    records: RecordSet,
    id: CommitId,
}

impl Commit {
    /// Create a commit stamped with the current time.
    pub fn new(message: impl Into<String>, records: RecordSet) -> Self {
        Self::at(Timestamp::now(), message, records)
    }

    /// Create a commit with an explicit timestamp.
    pub fn at(timestamp: Timestamp, message: impl Into<String>, records: RecordSet) -> Self {
        let message = message.into();
        let id = CommitId::digest(&timestamp, &message);
        Self {
            message,
            timestamp,
            records,
            id,
        }
    }

    /// The commit message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// When the commit was created.
    pub fn timestamp(&self) -> &Timestamp {
        &self.timestamp
    }

    /// The frozen records.
    pub fn records(&self) -> &RecordSet {
        &self.records
    }

    /// The identity hash.
    pub fn id(&self) -> &CommitId {
        &self.id
    }

    /// Render the log entry for this commit: identity, human-readable
    /// date, and message.
    pub fn describe(&self) -> String {
        format!(
            "Commit {}\nDate: {}\n\n\t{}",
            self.id,
            self.timestamp.format_human(),
            self.message
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn fixed_stamp() -> Timestamp {
        let dt = chrono::Utc.with_ymd_and_hms(2016, 1, 4, 11, 12, 13).unwrap();
        Timestamp::from_datetime(dt)
    }

    #[test]
    fn id_matches_digest_of_timestamp_and_message() {
        let commit = Commit::new("first", RecordSet::new());
        assert_eq!(
            commit.id(),
            &CommitId::digest(commit.timestamp(), commit.message())
        );
    }

    #[test]
    fn records_are_a_frozen_copy() {
        let mut stage = RecordSet::new();
        stage.upsert("x", json!(1));

        let commit = Commit::new("first", stage.clone());

        // Mutating the stage afterwards does not reach the commit.
        stage.upsert("x", json!(2));
        stage.upsert("y", json!(3));

        assert_eq!(commit.records().len(), 1);
        assert_eq!(commit.records().find("x").unwrap().value, json!(1));
    }

    #[test]
    fn identity_ignores_records() {
        let mut records = RecordSet::new();
        records.upsert("x", json!(1));

        let with_content = Commit::at(fixed_stamp(), "same", records);
        let without_content = Commit::at(fixed_stamp(), "same", RecordSet::new());

        // Identical identity, different content: the preserved collision.
        assert_eq!(with_content.id(), without_content.id());
        assert_ne!(with_content, without_content);
    }

    #[test]
    fn describe_renders_hash_date_and_message() {
        let commit = Commit::at(fixed_stamp(), "add feature", RecordSet::new());
        let expected = format!(
            "Commit {}\nDate: Mon Jan 04 11:12 2016 +0000\n\n\tadd feature",
            commit.id()
        );
        assert_eq!(commit.describe(), expected);
    }
}
