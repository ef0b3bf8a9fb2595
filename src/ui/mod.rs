//! ui
//!
//! Output utilities for the driver.
//!
//! # Modules
//!
//! - [`output`] - Output formatting and display
//!
//! # Design
//!
//! All writes to the terminal go through this module. The store engine
//! itself never prints; the driver renders outcomes and honors the quiet
//! flag here.

pub mod output;
