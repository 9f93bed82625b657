//! Platform and terminal helpers
//!
//! - [`platform`] - svn binary lookup and target directory resolution
//! - [`progress`] - spinner shown while update information is collected

pub mod platform;
pub mod progress;

pub use platform::{command_exists, get_svn_command, is_windows, resolve_target_dir};
pub use progress::ProgressBar;
