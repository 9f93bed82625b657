//! Constants shared across the update workflow.
//!
//! Everything that names a path inside the WordPress tree, an svn property or a
//! line of user-facing output lives here, so the summary printer, the apply phase
//! and the tests agree on the exact text.

/// Plugins directory, relative to the WordPress root, that carries `svn:externals`.
pub const DEFAULT_PLUGINS_DIR: &str = "wp-content/plugins";

/// Name of the svn property holding plugin externals.
pub const EXTERNALS_PROPERTY: &str = "svn:externals";

/// Default svn executable name.
pub const DEFAULT_SVN_COMMAND: &str = "svn";

/// Prefix for the temporary file handed to `svn propset -F`.
pub const EXTERNALS_TEMPFILE_PREFIX: &str = "wp-svn-update-";

/// Pseudo-version reported for URLs that follow trunk.
pub const TRUNK_VERSION: &str = "trunk";

/// Printed as the last line of every run, successful or not.
pub const EXIT_NOTICE: &str = "(exiting...)";

/// Confirmation prompt, repeated until the user answers "y".
pub const CONFIRM_PROMPT: &str = "Type \"y\" to confirm";

/// Environment variable overriding the configuration file location.
pub const CONFIG_PATH_ENV: &str = "WP_SVN_UPDATE_CONFIG";

/// Environment variable disabling the progress spinner.
pub const NO_PROGRESS_ENV: &str = "WP_SVN_UPDATE_NO_PROGRESS";
