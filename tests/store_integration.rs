//! Integration tests for the store engine.
//!
//! These tests exercise full sessions against the library surface:
//! staging, committing, history navigation, branch management, and
//! outcome chaining.

use std::sync::Arc;

use serde_json::json;

use strata::core::command::Command;
use strata::core::repo::Repository;
use strata::core::types::BranchName;

// =============================================================================
// Test Fixtures
// =============================================================================

/// A repository with one commit (`x = 1`, message "first") on master.
fn seeded() -> Repository {
    let mut repo = Repository::new();
    repo.add("x", json!(1));
    repo.commit("first");
    repo
}

/// The full identity hash of the `index`-th commit on the active branch.
fn commit_id(repo: &Repository, index: usize) -> String {
    repo.active_branch().commits()[index].id().as_str().to_string()
}

// =============================================================================
// Staging and committing
// =============================================================================

#[test]
fn stage_commit_get_session() {
    let mut repo = Repository::new();

    let added = repo.add("name", json!("Pesho"));
    assert!(added.is_success());
    assert_eq!(added.message(), "Added name to stage.");
    assert_eq!(added.value(), Some(&json!("Pesho")));

    let added = repo.add("age", json!(20));
    assert_eq!(added.message(), "Added age to stage.");

    let committed = repo.commit("two objects");
    assert!(committed.is_success());
    assert_eq!(committed.message(), "two objects\n\t2 objects changed");

    let got = repo.get("age");
    assert!(got.is_success());
    assert_eq!(got.message(), "Found object age.");
    assert_eq!(got.value(), Some(&json!(20)));
}

#[test]
fn staged_objects_are_not_visible_until_committed() {
    let mut repo = Repository::new();
    repo.add("x", json!(1));

    let got = repo.get("x");
    assert!(got.is_error());
    assert_eq!(got.message(), "Object x is not committed.");

    repo.commit("first");
    assert!(repo.get("x").is_success());
}

#[test]
fn replacing_a_value_counts_each_write() {
    let mut repo = seeded();
    repo.add("x", json!(2));
    repo.add("x", json!(3));

    let committed = repo.commit("rewrites");
    assert_eq!(committed.message(), "rewrites\n\t2 objects changed");
    assert_eq!(repo.get("x").value(), Some(&json!(3)));
}

#[test]
fn removal_lands_with_the_next_commit() {
    let mut repo = seeded();

    let removed = repo.remove_object("x");
    assert!(removed.is_success());
    assert_eq!(removed.message(), "Added x for removal.");
    assert_eq!(removed.value(), Some(&json!(1)));

    // Still committed until the removal itself is committed.
    assert!(repo.get("x").is_success());

    repo.commit("drop x");
    let got = repo.get("x");
    assert!(got.is_error());
    assert_eq!(got.message(), "Object x is not committed.");
}

#[test]
fn empty_commit_is_rejected() {
    let mut repo = seeded();
    let outcome = repo.commit("nothing");

    assert!(outcome.is_error());
    assert_eq!(outcome.message(), "Nothing to commit, working directory clean.");
    assert_eq!(repo.active_branch().commits().len(), 1);
}

#[test]
fn structured_values_survive_a_round_trip() {
    let mut repo = Repository::new();
    let value = json!({ "name": "Pesho", "tags": ["a", "b"], "score": 9.5 });
    repo.add("profile", value.clone());
    repo.commit("structured");

    assert_eq!(repo.get("profile").value(), Some(&value));
}

// =============================================================================
// History navigation
// =============================================================================

#[test]
fn checkout_restores_an_earlier_snapshot() {
    let mut repo = seeded();
    let first = commit_id(&repo, 0);

    repo.add("x", json!(2));
    repo.add("y", json!(9));
    repo.commit("second");
    assert_eq!(repo.get("x").value(), Some(&json!(2)));

    let outcome = repo.checkout_commit(&first);
    assert!(outcome.is_success());
    assert_eq!(outcome.message(), format!("HEAD is now at {first}."));

    assert_eq!(repo.get("x").value(), Some(&json!(1)));
    assert!(repo.get("y").is_error());
    assert_eq!(repo.head().message(), "first");
}

#[test]
fn unknown_hash_is_rejected() {
    let mut repo = seeded();
    let outcome = repo.checkout_commit("cafebabe");

    assert!(outcome.is_error());
    assert_eq!(outcome.message(), "Commit cafebabe does not exist.");
}

#[test]
fn commit_after_detached_checkout_appends() {
    let mut repo = seeded();
    let first = commit_id(&repo, 0);
    repo.add("y", json!(2));
    repo.commit("second");

    repo.checkout_commit(&first);
    repo.add("z", json!(3));
    repo.commit("third");

    let messages: Vec<&str> = repo
        .active_branch()
        .commits()
        .iter()
        .map(|commit| commit.message())
        .collect();
    assert_eq!(messages, vec!["first", "second", "third"]);

    // The new snapshot grew from the detached view, not from "second".
    assert_eq!(repo.get("x").value(), Some(&json!(1)));
    assert!(repo.get("y").is_error());
    assert_eq!(repo.get("z").value(), Some(&json!(3)));
}

#[test]
fn log_renders_full_history_newest_first() {
    let mut repo = seeded();
    repo.add("y", json!(2));
    repo.commit("second");

    let logged = repo.log();
    assert!(logged.is_success());

    let entries: Vec<String> = repo
        .active_branch()
        .commits()
        .iter()
        .rev()
        .map(|commit| commit.describe())
        .collect();
    assert_eq!(logged.message(), entries.join("\n\n"));

    let first_entry = &entries[1];
    assert!(first_entry.starts_with("Commit "));
    assert!(first_entry.contains("\nDate: "));
    assert!(first_entry.ends_with("\n\n\tfirst"));
}

#[test]
fn head_and_log_fail_on_a_fresh_branch() {
    let repo = Repository::new();

    let head = repo.head();
    assert!(head.is_error());
    assert_eq!(head.message(), "Branch master does not have any commits yet.");

    let logged = repo.log();
    assert!(logged.is_error());
    assert_eq!(logged.message(), "Branch master does not have any commits yet.");
}

// =============================================================================
// Branches
// =============================================================================

#[test]
fn fork_switch_and_diverge() {
    let mut repo = seeded();

    assert_eq!(repo.branch().create("feature").message(), "Created branch feature.");
    assert_eq!(
        repo.branch().checkout("feature").message(),
        "Switched to branch feature."
    );

    // The fork reads its inherited history before committing anything.
    assert_eq!(repo.get("x").value(), Some(&json!(1)));

    repo.add("y", json!(2));
    repo.commit("feature work");

    assert_eq!(repo.get("y").value(), Some(&json!(2)));
    repo.branch().checkout("master");
    assert!(repo.get("y").is_error());

    assert_eq!(repo.find_branch("feature").unwrap().commits().len(), 2);
    assert_eq!(repo.find_branch("master").unwrap().commits().len(), 1);
}

#[test]
fn forked_history_is_shared_not_copied() {
    let mut repo = seeded();
    repo.branch().create("feature");

    let on_master = Arc::clone(&repo.find_branch("master").unwrap().commits()[0]);
    let on_feature = Arc::clone(&repo.find_branch("feature").unwrap().commits()[0]);
    assert!(Arc::ptr_eq(&on_master, &on_feature));
}

#[test]
fn fork_starts_at_the_source_head_with_clean_stage() {
    let mut repo = seeded();
    repo.add("pending", json!(true)); // staged but never committed

    repo.branch().create("feature");
    let feature = repo.find_branch("feature").unwrap();

    assert_eq!(feature.pending_changes(), 0);
    assert!(feature.staged().find("pending").is_none());
    assert_eq!(feature.head_commit().unwrap().message(), "first");
}

#[test]
fn branch_listing_marks_the_active_branch() {
    let mut repo = seeded();
    repo.branch().create("beta");
    repo.branch().create("alpha");

    assert_eq!(repo.branch().list().message(), "  alpha\n  beta\n* master");

    repo.branch().checkout("alpha");
    assert_eq!(repo.branch().list().message(), "* alpha\n  beta\n  master");
}

#[test]
fn branch_management_failures() {
    let mut repo = seeded();
    repo.branch().create("feature");

    assert_eq!(
        repo.branch().create("feature").message(),
        "Branch feature already exists."
    );
    assert_eq!(
        repo.branch().create("bad name").message(),
        "Invalid branch name: cannot contain whitespace."
    );
    assert_eq!(
        repo.branch().checkout("ghost").message(),
        "Branch ghost does not exist."
    );
    assert_eq!(
        repo.branch().remove("ghost").message(),
        "Branch ghost does not exist."
    );
    assert_eq!(
        repo.branch().remove("master").message(),
        "Cannot remove current branch."
    );
}

#[test]
fn a_removed_branch_keeps_shared_commits_alive() {
    let mut repo = seeded();
    repo.branch().create("feature");
    repo.branch().remove("feature");

    // Master still reads its history fine.
    assert_eq!(repo.get("x").value(), Some(&json!(1)));
    assert!(repo.log().is_success());
}

#[test]
fn custom_initial_branch() {
    let name = BranchName::new("main").unwrap();
    let mut repo = Repository::with_initial_branch(name);

    repo.add("x", json!(1));
    repo.commit("first");

    assert_eq!(repo.branch().list().message(), "* main");
    let head = repo.head();
    assert_eq!(head.message(), "first");
}

// =============================================================================
// Chaining
// =============================================================================

#[test]
fn chained_session_reads_like_a_pipeline() {
    let mut repo = Repository::new();

    let a = repo.add("x", json!(1));
    let b = repo.chain(&a, Command::Add("y".into(), json!(2)));
    let c = repo.chain(&b, Command::Commit("both".into()));
    let d = repo.chain(&c, Command::Get("x".into()));

    assert!(a.is_success() && b.is_success() && c.is_success() && d.is_success());
    assert_eq!(c.message(), "both\n\t2 objects changed");
    assert_eq!(d.value(), Some(&json!(1)));
}

#[test]
fn branch_tagged_outcomes_pin_their_branch() {
    let mut repo = seeded();
    let got = repo.get("x");

    repo.branch().create("feature");
    repo.branch().checkout("feature");
    repo.add("y", json!(2));
    repo.commit("feature work");

    // The chained log reads master's single-entry history even though
    // feature is now active and has two commits.
    let logged = repo.chain(&got, Command::Log);
    let history = logged.payload().and_then(|p| p.as_history()).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].message(), "first");
}

#[test]
fn chaining_onto_a_removed_branch_fails() {
    let mut repo = seeded();
    repo.branch().create("feature");
    repo.branch().checkout("feature");
    let got = repo.get("x");

    repo.branch().checkout("master");
    repo.branch().remove("feature");

    let outcome = repo.chain(&got, Command::Head);
    assert!(outcome.is_error());
    assert_eq!(outcome.message(), "Branch feature does not exist.");
}

#[test]
fn chaining_runs_even_after_failures() {
    let mut repo = Repository::new();

    let failed = repo.get("missing");
    assert!(failed.is_error());

    let added = repo.chain(&failed, Command::Add("x".into(), json!(1)));
    assert!(added.is_success());

    let committed = repo.chain(&added, Command::Commit("recovered".into()));
    assert_eq!(committed.message(), "recovered\n\t1 objects changed");
}

// =============================================================================
// Identity
// =============================================================================

#[test]
fn commit_ids_are_stable_across_branches() {
    let mut repo = seeded();
    repo.branch().create("feature");

    let on_master = commit_id(&repo, 0);
    let on_feature = repo.find_branch("feature").unwrap().commits()[0]
        .id()
        .as_str()
        .to_string();
    assert_eq!(on_master, on_feature);
    assert_eq!(on_master.len(), 64);
}

#[test]
fn checkout_works_from_a_forked_branch() {
    let mut repo = seeded();
    let first = commit_id(&repo, 0);

    repo.add("y", json!(2));
    repo.commit("second");
    repo.branch().create("feature");
    repo.branch().checkout("feature");

    // The forked branch can navigate to the shared ancestor by hash.
    let outcome = repo.checkout_commit(&first);
    assert!(outcome.is_success());
    assert_eq!(repo.head().message(), "first");
    assert!(repo.get("y").is_error());
}
