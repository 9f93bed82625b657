//! Progress feedback while the workflow talks to the repository.
//!
//! Collecting update information issues one `svn ls` per plugin, which can take a
//! while on a slow connection. [`ProgressBar`] wraps an `indicatif` spinner on stderr
//! so the summary on stdout stays untouched.
//!
//! The spinner is hidden when it was disabled (`--no-progress`,
//! `WP_SVN_UPDATE_NO_PROGRESS`, config file) or when stderr is not a terminal
//! (indicatif's own draw-target check).

use indicatif::{ProgressBar as IndicatifBar, ProgressStyle as IndicatifStyle};
use std::time::Duration;

fn spinner_style() -> IndicatifStyle {
    IndicatifStyle::default_spinner()
        .template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| IndicatifStyle::default_spinner())
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "✓"])
}

/// Spinner shown while update information is collected.
pub struct ProgressBar {
    inner: IndicatifBar,
}

impl ProgressBar {
    /// Creates a spinner, or a hidden one when progress output is disabled.
    #[must_use]
    pub fn new_spinner(enabled: bool) -> Self {
        let bar = if !enabled {
            IndicatifBar::hidden()
        } else {
            let bar = IndicatifBar::new_spinner();
            bar.set_style(spinner_style());
            bar.enable_steady_tick(Duration::from_millis(100));
            bar
        };
        Self {
            inner: bar,
        }
    }

    /// A spinner that never draws. Used by tests and non-interactive callers.
    #[must_use]
    pub fn hidden() -> Self {
        Self {
            inner: IndicatifBar::hidden(),
        }
    }

    /// Sets the message displayed next to the spinner.
    pub fn set_message(&self, msg: impl Into<String>) {
        self.inner.set_message(msg.into());
    }

    /// Removes the spinner line so following output starts on a clean line.
    pub fn finish_and_clear(&self) {
        self.inner.finish_and_clear();
    }

    /// Hides the spinner while `f` writes to the terminal.
    pub fn suspend<F: FnOnce() -> R, R>(&self, f: F) -> R {
        self.inner.suspend(f)
    }

    /// Whether the spinner is actually drawn.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.inner.is_hidden()
    }
}

impl Drop for ProgressBar {
    fn drop(&mut self) {
        if !self.inner.is_finished() {
            self.inner.finish_and_clear();
        }
    }
}
