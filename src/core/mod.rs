//! Core types shared across wp-svn-update
//!
//! - [`WpSvnError`] - enumerated fatal failures of the update workflow
//! - [`ErrorContext`] - user-facing wrapper with suggestions
//! - [`user_friendly_error`] - convert any [`anyhow::Error`] for display

pub mod error;

pub use error::{ErrorContext, WpSvnError, user_friendly_error};
