//! Integration test suite for wp-svn-update
//!
//! Runs the compiled binary against a scripted `svn` (see `common`), so these
//! tests need a unix shell and are skipped elsewhere.
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! - **update**: summaries, confirmation and the svn commands issued
//! - **errors**: fatal errors, messages and exit codes

#![cfg(unix)]

#[path = "../common/mod.rs"]
mod common;

mod errors;
mod update;
