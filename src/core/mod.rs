//! core
//!
//! Core domain types and the store engine for Strata.
//!
//! # Modules
//!
//! - [`types`] - Strong types: BranchName, CommitId, Timestamp
//! - [`record`] - Named object records and the staging record set
//! - [`commit`] - Immutable commits with digest identity
//! - [`branch`] - The branch state machine
//! - [`repo`] - Branch collection, routing, and chaining
//! - [`outcome`] - The uniform operation result
//! - [`command`] - Command vocabulary and the content-operation trait
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - Commits are immutable; branches share ancestry by reference count
//! - Bad commands produce failure outcomes, never panics or `Err`

pub mod branch;
pub mod command;
pub mod commit;
pub mod config;
pub mod outcome;
pub mod record;
pub mod repo;
pub mod types;

pub use branch::Branch;
pub use command::{Command, ContentOps};
pub use commit::Commit;
pub use outcome::{Outcome, Payload, Receiver};
pub use record::{ObjectRecord, RecordSet};
pub use repo::{BranchManager, Repository};
