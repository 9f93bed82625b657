//! The update workflow: find newer tags, show them, apply them.
//!
//! # Pipeline
//!
//! 1. [`discovery`] turns a repository URL into an [`UpdateInfo`] by classifying it
//!    as trunk or tag and listing the `tags/` directory.
//! 2. [`externals`] parses the plugins directory's `svn:externals` property into
//!    [`PluginExternal`]s, each with its own [`UpdateInfo`].
//! 3. [`plan`] gathers both into an [`UpdatePlan`] and prints the summary.
//! 4. [`apply`] writes the regenerated externals and switches/updates the working
//!    copy.
//!
//! [`workflow`] strings these together with the [`confirm`] prompt.

pub mod apply;
pub mod confirm;
pub mod discovery;
pub mod externals;
pub mod plan;
pub mod workflow;

pub use discovery::{TargetKind, find_newest};
pub use externals::{ExternalDefinition, ExternalsEntry, ExternalsFormat, PluginExternal};
pub use plan::UpdatePlan;
pub use workflow::{RunOutcome, Updater};

use crate::constants::TRUNK_VERSION;

/// What is known about one target (the core install or one plugin).
///
/// Built once by [`find_newest`] and only read afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateInfo {
    /// URL the working copy or external currently points at
    pub current_url: String,
    /// Current tag, `"trunk"`, or `None` when the URL could not be classified
    pub current_version: Option<String>,
    /// URL of the newest tag (equal to `current_url` for trunk and parse errors)
    pub new_url: String,
    /// Newest tag, `"trunk"`, or `None` when the URL could not be classified
    pub new_version: Option<String>,
    /// Whether switching to `new_url` is proposed
    pub is_update: bool,
    /// The URL matched neither the trunk nor the tags layout
    pub is_parse_error: bool,
}

impl UpdateInfo {
    /// A URL following trunk. Trunk is never version-compared and is always
    /// reported as an update (a switch to the same URL, i.e. a plain update).
    #[must_use]
    pub fn trunk(url: &str) -> Self {
        Self {
            current_url: url.to_string(),
            current_version: Some(TRUNK_VERSION.to_string()),
            new_url: url.to_string(),
            new_version: Some(TRUNK_VERSION.to_string()),
            is_update: true,
            is_parse_error: false,
        }
    }

    /// A URL that is neither trunk nor a tag.
    #[must_use]
    pub fn parse_error(url: &str) -> Self {
        Self {
            current_url: url.to_string(),
            current_version: None,
            new_url: url.to_string(),
            new_version: None,
            is_update: false,
            is_parse_error: true,
        }
    }

    /// Current version for display, `"unknown"` when it could not be determined.
    #[must_use]
    pub fn current_version_label(&self) -> &str {
        self.current_version.as_deref().unwrap_or("unknown")
    }

    /// New version for display, `"unknown"` when it could not be determined.
    #[must_use]
    pub fn new_version_label(&self) -> &str {
        self.new_version.as_deref().unwrap_or("unknown")
    }
}
