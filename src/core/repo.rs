//! core::repo
//!
//! The repository: a set of named branches, one of them active, plus the
//! routing that sends each command to the right place.
//!
//! # Routing
//!
//! Content commands (`get`, `add`, `remove_object`, `commit`,
//! `checkout_commit`, `head`, `log`) are delegated to the active branch
//! through inherent methods. Branch management (`create`,
//! `checkout_branch`, `remove_branch`, `list`) lives here; the
//! [`BranchManager`] view exposes the same four under their short names,
//! which keeps the overloaded verbs `checkout` and `remove` unambiguous.
//!
//! # Invariants
//!
//! - `active` is always a key of `branches`; the repository starts with one
//!   branch and `remove_branch` refuses the active one, so the map is never
//!   empty.
//! - Forked branches share prior commits by reference count. New commits
//!   land only on the branch that made them.

use std::collections::BTreeMap;

use serde_json::Value;

use super::branch::Branch;
use super::command::{Command, ContentOps};
use super::outcome::{Outcome, Payload, Receiver};
use super::types::BranchName;

/// An in-memory object store shaped like a small git: staged records,
/// commits, branches.
///
/// Every command returns an [`Outcome`]; nothing here returns `Result`.
/// A repository always has at least one branch and exactly one of them is
/// active.
///
/// # Example
///
/// ```
/// use strata::core::repo::Repository;
///
/// let mut repo = Repository::new();
/// repo.add("answer", 42);
/// let outcome = repo.commit("initial data");
///
/// assert!(outcome.is_success());
/// assert_eq!(repo.get("answer").value(), Some(&serde_json::json!(42)));
/// ```
#[derive(Debug, Clone)]
pub struct Repository {
    branches: BTreeMap<BranchName, Branch>,
    active: BranchName,
}

impl Repository {
    /// Create a repository with a single empty `master` branch.
    pub fn new() -> Self {
        Self::with_initial_branch(BranchName::initial())
    }

    /// Create a repository whose single starting branch has the given name.
    pub fn with_initial_branch(name: BranchName) -> Self {
        let mut branches = BTreeMap::new();
        branches.insert(name.clone(), Branch::new(name.clone()));
        Self {
            branches,
            active: name,
        }
    }

    // --- branch management ---

    /// Fork a new branch off the active branch's current history.
    ///
    /// The new branch views the same commits (shared by reference count)
    /// with its head at the latest one; it does not become active. Fails
    /// on an invalid or already taken name.
    pub fn create(&mut self, name: &str) -> Outcome {
        let name = match BranchName::new(name) {
            Ok(name) => name,
            Err(err) => {
                return Outcome::failure(
                    format!("Invalid branch name: {}.", err.reason()),
                    Receiver::Repository,
                )
            }
        };

        if self.branches.contains_key(&name) {
            return Outcome::failure(
                format!("Branch {name} already exists."),
                Receiver::Repository,
            );
        }

        let history = self.active_branch().commits().to_vec();
        self.branches
            .insert(name.clone(), Branch::with_history(name.clone(), history));

        Outcome::success(format!("Created branch {name}."), Receiver::Repository)
    }

    /// Make `name` the active branch. The target branch's own head and
    /// stage are left exactly as it last had them.
    pub fn checkout_branch(&mut self, name: &str) -> Outcome {
        let Some((key, _)) = self.branches.get_key_value(name) else {
            return self.no_such_branch(name);
        };
        self.active = key.clone();

        Outcome::success(
            format!("Switched to branch {name}."),
            Receiver::Repository,
        )
    }

    /// Delete the branch named `name`. The active branch cannot be
    /// removed.
    pub fn remove_branch(&mut self, name: &str) -> Outcome {
        if !self.branches.contains_key(name) {
            return self.no_such_branch(name);
        }
        if self.active.as_str() == name {
            return Outcome::failure("Cannot remove current branch.", Receiver::Repository);
        }
        self.branches.remove(name);

        Outcome::success(format!("Removed branch {name}."), Receiver::Repository)
    }

    /// List all branch names in lexicographic order, the active one marked
    /// with `* `. Always succeeds.
    pub fn list(&self) -> Outcome {
        let names: Vec<BranchName> = self.branches.keys().cloned().collect();
        let rendered = names
            .iter()
            .map(|name| {
                if *name == self.active {
                    format!("* {name}")
                } else {
                    format!("  {name}")
                }
            })
            .collect::<Vec<_>>()
            .join("\n");

        Outcome::success(rendered, Receiver::Repository).with_payload(Payload::Branches(names))
    }

    /// The branch-management view: `create`, `checkout`, `remove`, `list`,
    /// all at the branch level.
    ///
    /// # Example
    ///
    /// ```
    /// use strata::core::repo::Repository;
    ///
    /// let mut repo = Repository::new();
    /// repo.branch().create("feature");
    /// repo.branch().checkout("feature");
    ///
    /// assert_eq!(repo.active_branch().name().as_str(), "feature");
    /// ```
    pub fn branch(&mut self) -> BranchManager<'_> {
        BranchManager { repo: self }
    }

    // --- content commands, delegated to the active branch ---

    /// Look up a committed object on the active branch.
    pub fn get(&self, name: &str) -> Outcome {
        self.active_branch().get(name)
    }

    /// Stage an object on the active branch. Accepts anything that
    /// converts into a JSON value.
    pub fn add(&mut self, name: &str, value: impl Into<Value>) -> Outcome {
        let value = value.into();
        self.active_branch_mut().add(name, value)
    }

    /// Unstage an object on the active branch.
    pub fn remove_object(&mut self, name: &str) -> Outcome {
        self.active_branch_mut().remove_object(name)
    }

    /// Commit the active branch's staged changes.
    pub fn commit(&mut self, message: &str) -> Outcome {
        self.active_branch_mut().commit(message)
    }

    /// Move the active branch's head to a past commit.
    pub fn checkout_commit(&mut self, hash: &str) -> Outcome {
        self.active_branch_mut().checkout_commit(hash)
    }

    /// Report the active branch's head commit message.
    pub fn head(&self) -> Outcome {
        self.active_branch().head()
    }

    /// Render the active branch's history, newest first.
    pub fn log(&self) -> Outcome {
        self.active_branch().log()
    }

    // --- dispatch ---

    /// Apply one [`Command`]: content commands go to the active branch,
    /// management commands are handled here.
    pub fn execute(&mut self, command: Command) -> Outcome {
        match command {
            Command::Create(name) => self.create(&name),
            Command::CheckoutBranch(name) => self.checkout_branch(&name),
            Command::RemoveBranch(name) => self.remove_branch(&name),
            Command::List => self.list(),
            content => {
                let active = self.active.clone();
                self.dispatch_content(&active, content)
            }
        }
    }

    /// Apply `command` to the entity named by `outcome`'s receiver tag.
    ///
    /// A branch tag routes content commands to that branch even when it is
    /// no longer active; if it has since been removed, the command fails
    /// with the branch-not-found message. Management commands always
    /// resolve to the repository. Chaining never inspects the outcome's
    /// success flag: a command chained onto a failure still runs.
    ///
    /// # Example
    ///
    /// ```
    /// use strata::core::{command::Command, repo::Repository};
    ///
    /// let mut repo = Repository::new();
    /// let added = repo.add("x", 1);
    /// let committed = repo.chain(&added, Command::Commit("first".into()));
    ///
    /// assert!(committed.is_success());
    /// ```
    pub fn chain(&mut self, outcome: &Outcome, command: Command) -> Outcome {
        match outcome.receiver() {
            Receiver::Branch(name) if command.is_content() => {
                let name = name.clone();
                self.dispatch_content(&name, command)
            }
            _ => self.execute(command),
        }
    }

    fn dispatch_content(&mut self, target: &BranchName, command: Command) -> Outcome {
        let Some(branch) = self.branches.get_mut(target) else {
            return self.no_such_branch(target.as_str());
        };
        match command {
            Command::Get(name) => branch.get(&name),
            Command::Add(name, value) => branch.add(&name, value),
            Command::RemoveObject(name) => branch.remove_object(&name),
            Command::Commit(message) => branch.commit(&message),
            Command::CheckoutCommit(hash) => branch.checkout_commit(&hash),
            Command::Head => branch.head(),
            Command::Log => branch.log(),
            Command::Create(_)
            | Command::CheckoutBranch(_)
            | Command::RemoveBranch(_)
            | Command::List => unreachable!(), // both callers filter on is_content()
        }
    }

    // --- read accessors ---

    /// The active branch.
    pub fn active_branch(&self) -> &Branch {
        self.branches
            .get(&self.active)
            .expect("active branch is always present")
    }

    fn active_branch_mut(&mut self) -> &mut Branch {
        self.branches
            .get_mut(&self.active)
            .expect("active branch is always present")
    }

    /// Look up a branch by name.
    pub fn find_branch(&self, name: &str) -> Option<&Branch> {
        self.branches.get(name)
    }

    fn no_such_branch(&self, name: &str) -> Outcome {
        Outcome::failure(
            format!("Branch {name} does not exist."),
            Receiver::Repository,
        )
    }
}

impl Default for Repository {
    fn default() -> Self {
        Self::new()
    }
}

/// Branch-level view of a [`Repository`], where `checkout` and `remove`
/// mean *branch* checkout and removal.
pub struct BranchManager<'a> {
    repo: &'a mut Repository,
}

impl BranchManager<'_> {
    /// Fork a new branch off the active branch.
    pub fn create(&mut self, name: &str) -> Outcome {
        self.repo.create(name)
    }

    /// Switch the active branch.
    pub fn checkout(&mut self, name: &str) -> Outcome {
        self.repo.checkout_branch(name)
    }

    /// Delete a branch.
    pub fn remove(&mut self, name: &str) -> Outcome {
        self.repo.remove_branch(name)
    }

    /// List branch names, marking the active one.
    pub fn list(&self) -> Outcome {
        self.repo.list()
    }
}
