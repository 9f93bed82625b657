//! The set of proposed changes and its printed summary.

use std::io::Write;

use super::{ExternalsEntry, PluginExternal, UpdateInfo};

/// Everything the apply phase needs, collected before anything is changed.
#[derive(Debug, Clone)]
pub struct UpdatePlan {
    /// Discovery result for the WordPress install itself
    pub core: UpdateInfo,
    /// Externals of the plugins directory, in property order
    pub externals: Vec<ExternalsEntry>,
}

impl UpdatePlan {
    /// Plan for `core` with no externals.
    #[must_use]
    pub fn new(core: UpdateInfo) -> Self {
        Self {
            core,
            externals: Vec::new(),
        }
    }

    /// Plugin externals (unparsed lines skipped).
    pub fn plugins(&self) -> impl Iterator<Item = &PluginExternal> {
        self.externals.iter().filter_map(|entry| match entry {
            ExternalsEntry::Plugin(plugin) => Some(plugin),
            ExternalsEntry::Unparsed(_) => None,
        })
    }

    /// The core install will be switched.
    #[must_use]
    pub fn core_changed(&self) -> bool {
        self.core.is_update
    }

    /// At least one unpinned plugin has a newer version.
    #[must_use]
    pub fn externals_changed(&self) -> bool {
        self.plugins().any(PluginExternal::proposes_update)
    }

    /// Anything to do at all.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.core_changed() || self.externals_changed()
    }

    /// Regenerated `svn:externals` text, one line per entry, newline-terminated.
    #[must_use]
    pub fn externals_property(&self) -> String {
        self.externals.iter().map(|entry| entry.externals_line() + "\n").collect()
    }

    /// Print the human-readable summary of proposed changes.
    pub fn write_summary<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(out, "Changes to be performed")?;
        writeln!(out, "=======================")?;

        writeln!(out, "Wordpress:")?;
        if self.core.is_update {
            writeln!(
                out,
                "\t{} -> {}",
                self.core.current_version_label(),
                self.core.new_version_label()
            )?;
        } else {
            writeln!(
                out,
                "\tNo change (current version = {})",
                self.core.current_version_label()
            )?;
        }

        writeln!(out, "Plugins (externals):")?;
        for plugin in self.plugins() {
            if plugin.proposes_update() {
                writeln!(
                    out,
                    "\t{}: {} -> {}",
                    plugin.name(),
                    plugin.update.current_version_label(),
                    plugin.update.new_version_label()
                )?;
            } else {
                let pinned = plugin.pinned_revision().map(|rev| format!(" {rev}")).unwrap_or_default();
                writeln!(
                    out,
                    "\t{}: No change (current version = {}{})",
                    plugin.name(),
                    plugin.update.current_version_label(),
                    pinned
                )?;
            }
        }

        Ok(())
    }
}
