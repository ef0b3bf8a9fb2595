//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`BranchName`] - Validated branch name
//! - [`CommitId`] - Commit identity (hex-encoded SHA-256)
//! - [`Timestamp`] - UTC creation time of a commit
//!
//! # Validation
//!
//! These types enforce validity at construction time. Invalid values
//! cannot be represented, preventing entire classes of bugs.
//!
//! # Examples
//!
//! ```
//! use strata::core::types::{BranchName, CommitId};
//!
//! // Valid constructions
//! let branch = BranchName::new("feature/login").unwrap();
//! let id = CommitId::new(
//!     "b5bb9d8014a0f9b1d61e21e796d78dccdf1352f23cd32812f4850b878ae4944c",
//! ).unwrap();
//!
//! // Invalid constructions fail at creation time
//! assert!(BranchName::new("has space").is_err());
//! assert!(CommitId::new("not-a-digest").is_err());
//! ```

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid branch name: {0}")]
    InvalidBranchName(String),

    #[error("invalid commit id: {0}")]
    InvalidCommitId(String),
}

impl TypeError {
    /// The bare reason, without the "invalid ..." prefix `Display` adds.
    pub fn reason(&self) -> &str {
        match self {
            TypeError::InvalidBranchName(reason) => reason,
            TypeError::InvalidCommitId(reason) => reason,
        }
    }
}

/// A validated branch name.
///
/// The store is not backed by git refs, so only the rules that keep names
/// printable and unambiguous are enforced:
/// - Cannot be empty
/// - Cannot contain whitespace or ASCII control characters
/// - Cannot start with `-` (would read as a flag in the CLI)
///
/// # Example
///
/// ```
/// use strata::core::types::BranchName;
///
/// let name = BranchName::new("feature/login").unwrap();
/// assert_eq!(name.as_str(), "feature/login");
///
/// assert!(BranchName::new("").is_err());
/// assert!(BranchName::new("-flag").is_err());
/// assert!(BranchName::new("has space").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BranchName(String);

impl BranchName {
    /// Create a new validated branch name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidBranchName` if the name is empty, starts
    /// with `-`, or contains whitespace or control characters.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        Self::validate(&name)?;
        Ok(Self(name))
    }

    /// The conventional name of the branch every new repository starts with.
    ///
    /// # Example
    ///
    /// ```
    /// use strata::core::types::BranchName;
    ///
    /// assert_eq!(BranchName::initial().as_str(), "master");
    /// ```
    pub fn initial() -> Self {
        // Always passes validation.
        Self("master".to_string())
    }

    /// Validate a branch name.
    fn validate(name: &str) -> Result<(), TypeError> {
        if name.is_empty() {
            return Err(TypeError::InvalidBranchName("cannot be empty".into()));
        }

        if name.starts_with('-') {
            return Err(TypeError::InvalidBranchName(
                "cannot start with '-'".into(),
            ));
        }

        for c in name.chars() {
            if c.is_whitespace() {
                return Err(TypeError::InvalidBranchName(
                    "cannot contain whitespace".into(),
                ));
            }
            if c.is_ascii_control() {
                return Err(TypeError::InvalidBranchName(
                    "cannot contain control characters".into(),
                ));
            }
        }

        Ok(())
    }

    /// Get the branch name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for BranchName {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<BranchName> for String {
    fn from(name: BranchName) -> Self {
        name.0
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Lets branch maps be probed with plain `&str` keys. Sound because the
// derived `Ord` compares the inner string exactly as `str` does.
impl std::borrow::Borrow<str> for BranchName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A commit identity: the hex-encoded SHA-256 digest of the commit's
/// RFC 3339 timestamp concatenated with its message.
///
/// The digest deliberately excludes the committed records. This keeps
/// identity stable for a given (timestamp, message) pair regardless of
/// content: a preserved compatibility decision, and it means two commits
/// created in the same instant with the same message collide.
///
/// # Example
///
/// ```
/// use strata::core::types::{CommitId, Timestamp};
///
/// let stamp = Timestamp::now();
/// let id = CommitId::digest(&stamp, "first commit");
/// assert_eq!(id.as_str().len(), 64);
/// assert_eq!(id, CommitId::digest(&stamp, "first commit"));
///
/// // Abbreviated form for display
/// let short = id.short(7);
/// assert_eq!(short.len(), 7);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CommitId(String);

impl CommitId {
    /// Create a validated commit id from an existing hex string.
    ///
    /// The id is normalized to lowercase.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidCommitId` if the string is not 64 hex
    /// characters.
    pub fn new(id: impl Into<String>) -> Result<Self, TypeError> {
        let id = id.into().to_ascii_lowercase();
        Self::validate(&id)?;
        Ok(Self(id))
    }

    /// Compute the identity of a commit from its timestamp and message.
    pub fn digest(timestamp: &Timestamp, message: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(timestamp.to_string().as_bytes());
        hasher.update(message.as_bytes());
        Self(hex::encode(hasher.finalize()))
    }

    /// Get an abbreviated form of the id.
    ///
    /// Returns the first `len` characters. If `len` exceeds the id length,
    /// returns the full id.
    pub fn short(&self, len: usize) -> &str {
        let end = len.min(self.0.len());
        &self.0[..end]
    }

    /// Validate a commit id.
    fn validate(id: &str) -> Result<(), TypeError> {
        if id.len() != 64 {
            return Err(TypeError::InvalidCommitId(format!(
                "expected 64 hex characters, got {}",
                id.len()
            )));
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(TypeError::InvalidCommitId(
                "commit id must be hexadecimal".into(),
            ));
        }
        Ok(())
    }

    /// Get the commit id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CommitId {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<CommitId> for String {
    fn from(id: CommitId) -> Self {
        id.0
    }
}

impl AsRef<str> for CommitId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CommitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A UTC timestamp recorded when a commit is created.
///
/// `Display` renders RFC 3339 (the form the identity digest hashes);
/// [`Timestamp::format_human`] renders the fixed human-readable form used
/// by `log`.
///
/// # Example
///
/// ```
/// use strata::core::types::Timestamp;
///
/// let now = Timestamp::now();
/// println!("created at {}", now);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamp(chrono::DateTime<chrono::Utc>);

impl Timestamp {
    /// Create a timestamp for the current moment.
    pub fn now() -> Self {
        Self(chrono::Utc::now())
    }

    /// Create a timestamp from a chrono DateTime.
    pub fn from_datetime(dt: chrono::DateTime<chrono::Utc>) -> Self {
        Self(dt)
    }

    /// Get the underlying datetime.
    pub fn as_datetime(&self) -> &chrono::DateTime<chrono::Utc> {
        &self.0
    }

    /// Render the fixed human-readable form used in log output:
    /// weekday, month, day, time, year, zone.
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::TimeZone;
    /// use strata::core::types::Timestamp;
    ///
    /// let dt = chrono::Utc.with_ymd_and_hms(2016, 1, 4, 11, 12, 0).unwrap();
    /// let stamp = Timestamp::from_datetime(dt);
    /// assert_eq!(stamp.format_human(), "Mon Jan 04 11:12 2016 +0000");
    /// ```
    pub fn format_human(&self) -> String {
        self.0.format("%a %b %d %H:%M %Y %z").to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}
