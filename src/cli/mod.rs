//! cli
//!
//! Command-line driver for the store.
//!
//! # Responsibilities
//!
//! - Parse arguments and load configuration
//! - Feed script or stdin lines through the line grammar
//! - Render outcomes, honoring the quiet flag
//!
//! # Architecture
//!
//! The driver is thin. Every line becomes a [`crate::core::Command`] and is
//! applied through `Repository::execute`; the store itself never prints.
//! Engine failures are rendered to stderr and the session continues; only
//! I/O faults (unreadable script, broken stdin) end the run with an error.

pub mod args;
pub mod parse;

pub use args::Cli;
pub use parse::{Input, ParseError};

use std::fs;
use std::io::BufRead;
use std::path::Path;

use anyhow::{Context, Result};

use crate::core::command::Command;
use crate::core::config::Config;
use crate::core::repo::Repository;
use crate::ui::output::{self, Verbosity};

const HELP: &str = "\
Commands:
  add <name> <value>        stage an object (value is JSON or a bare string)
  get <name>                look up a committed object
  remove <name>             unstage an object
  commit <message>          freeze staged changes into a commit
  checkout <hash>           move the head to a past commit
  head                      show the head commit's message
  log                       show the commit history, newest first
  branch [list]             list branches
  branch create <name>      fork a branch off the active one
  branch checkout <name>    switch the active branch
  branch remove <name>      delete a branch
  help                      show this message
  exit | quit               end the session";

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let config = Config::load(cli.config.as_deref())?;
    let verbosity = Verbosity::from_flags(cli.quiet || config.is_quiet());
    let mut repo = Repository::with_initial_branch(config.starting_branch()?);

    match &cli.script {
        Some(path) => run_script(&mut repo, path, verbosity),
        None => run_repl(&mut repo, verbosity),
    }
}

/// Execute a script file, one command per line.
fn run_script(repo: &mut Repository, path: &Path, verbosity: Verbosity) -> Result<()> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read script '{}'", path.display()))?;

    for line in contents.lines() {
        if !handle_line(repo, line, verbosity) {
            break;
        }
    }
    Ok(())
}

/// Read commands from stdin until EOF or an exit directive.
fn run_repl(repo: &mut Repository, verbosity: Verbosity) -> Result<()> {
    let stdin = std::io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        line.clear();
        let read = reader
            .read_line(&mut line)
            .context("failed to read from stdin")?;
        if read == 0 {
            break;
        }
        if !handle_line(repo, &line, verbosity) {
            break;
        }
    }
    Ok(())
}

/// Process one input line. Returns `false` when the session should end.
fn handle_line(repo: &mut Repository, line: &str, verbosity: Verbosity) -> bool {
    match parse::parse_line(line) {
        Ok(Some(Input::Command(command))) => apply(repo, command, verbosity),
        Ok(Some(Input::Help)) => output::print(HELP, Verbosity::Normal),
        Ok(Some(Input::Exit)) => return false,
        Ok(None) => {}
        Err(err) => output::error(err),
    }
    true
}

/// Apply one command and render its outcome.
fn apply(repo: &mut Repository, command: Command, verbosity: Verbosity) {
    let is_get = matches!(command, Command::Get(_));
    let renders = is_get
        || matches!(
            command,
            Command::Head | Command::Log | Command::List
        );

    let outcome = repo.execute(command);
    if outcome.is_error() {
        output::error(outcome.message());
        return;
    }

    if renders {
        // Requested data is the point of these commands; it prints even
        // under --quiet.
        output::print(outcome.message(), Verbosity::Normal);
        if is_get {
            if let Some(value) = outcome.value() {
                output::print(value, Verbosity::Normal);
            }
        }
    } else {
        output::success(outcome.message(), verbosity);
    }
}
