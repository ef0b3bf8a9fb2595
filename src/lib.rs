//! Strata - an in-memory object store with git-style staging, commits,
//! and branches
//!
//! Strata keeps named JSON values in a staging area, freezes them into
//! immutable commits, and organizes history into branches that can fork,
//! switch, and be removed. Everything lives in process memory; nothing
//! touches disk except the optional driver config.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line driver (parses lines, delegates to the store)
//! - [`core`] - Domain types, the branch state machine, and routing
//! - [`ui`] - Output utilities
//!
//! # Correctness Invariants
//!
//! 1. Commits are immutable once created; history is append-only
//! 2. Forked branches share ancestry by reference count, never by aliasing
//!    mutable state
//! 3. Bad commands produce failure outcomes; the store never panics on input
//!
//! # Example
//!
//! ```
//! use strata::core::repo::Repository;
//!
//! let mut repo = Repository::new();
//! repo.add("answer", 42);
//! repo.commit("initial data");
//!
//! repo.branch().create("feature");
//! repo.branch().checkout("feature");
//! repo.add("answer", 54);
//! repo.commit("revised");
//!
//! // Each branch sees its own head.
//! assert_eq!(repo.get("answer").value(), Some(&serde_json::json!(54)));
//! repo.branch().checkout("master");
//! assert_eq!(repo.get("answer").value(), Some(&serde_json::json!(42)));
//! ```

pub mod cli;
pub mod core;
pub mod ui;
