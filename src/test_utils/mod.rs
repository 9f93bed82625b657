//! Test utilities for wp-svn-update
//!
//! - [`ScriptedSvn`] - an in-memory [`SvnClient`] with canned output that records
//!   every call, so workflow tests can assert exactly which svn commands ran
//! - [`init_test_logging`] - opt-in tracing output for tests
//!
//! # Example
//!
//! ```rust,no_run
//! use wp_svn_update::test_utils::ScriptedSvn;
//!
//! let svn = ScriptedSvn::new()
//!     .with_info_url("http://core.svn.wordpress.org/tags/3.2.1")
//!     .with_listing("http://core.svn.wordpress.org/tags/", "3.2.1/\n3.3/\n");
//! ```

use anyhow::{Result, anyhow};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::constants::EXTERNALS_PROPERTY;
use crate::core::WpSvnError;
use crate::svn::SvnClient;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Uses `level` when given, otherwise `RUST_LOG`; does nothing when neither is set.
///
/// ```bash
/// RUST_LOG=svn=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}

/// In-memory [`SvnClient`] with scripted responses.
#[derive(Debug, Default)]
pub struct ScriptedSvn {
    info: String,
    listings: HashMap<String, String>,
    externals: HashMap<String, String>,
    failing: Vec<String>,
    calls: RefCell<Vec<String>>,
    written_externals: RefCell<Vec<String>>,
    externals_files: RefCell<Vec<PathBuf>>,
}

impl ScriptedSvn {
    /// Client whose `svn info` prints nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw `svn info` output.
    #[must_use]
    pub fn with_info(mut self, output: &str) -> Self {
        self.info = output.to_string();
        self
    }

    /// `svn info` output for a working copy checked out from `url`.
    #[must_use]
    pub fn with_info_url(self, url: &str) -> Self {
        self.with_info(&format!(
            "Path: .\nWorking Copy Root Path: /var/www/blog\nURL: {url}\nRevision: 18600\nNode Kind: directory\n"
        ))
    }

    /// `svn ls <url>` output.
    #[must_use]
    pub fn with_listing(mut self, url: &str, output: &str) -> Self {
        self.listings.insert(url.to_string(), output.to_string());
        self
    }

    /// `svn:externals` property text of `path`.
    #[must_use]
    pub fn with_externals(mut self, path: &str, property: &str) -> Self {
        self.externals.insert(path.to_string(), property.to_string());
        self
    }

    /// Make every call of `operation` (e.g. "ls", "propset") fail after recording it.
    #[must_use]
    pub fn failing_on(mut self, operation: &str) -> Self {
        self.failing.push(operation.to_string());
        self
    }

    /// Calls so far, formatted as svn command lines without the program name.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Contents of every file handed to `propset`, read at call time.
    pub fn written_externals(&self) -> Vec<String> {
        self.written_externals.borrow().clone()
    }

    /// Paths of every file handed to `propset`.
    pub fn externals_files(&self) -> Vec<PathBuf> {
        self.externals_files.borrow().clone()
    }

    fn record(&self, operation: &str, call: String) -> Result<()> {
        self.calls.borrow_mut().push(call);
        if self.failing.iter().any(|op| op == operation) {
            return Err(WpSvnError::SvnCommandError {
                operation: operation.to_string(),
                stderr: format!("svn: E000000: scripted {operation} failure"),
            }
            .into());
        }
        Ok(())
    }
}

impl SvnClient for ScriptedSvn {
    async fn info(&self) -> Result<String> {
        self.record("info", "info".to_string())?;
        Ok(self.info.clone())
    }

    async fn list(&self, url: &str) -> Result<String> {
        self.record("ls", format!("ls {url}"))?;
        self.listings.get(url).cloned().ok_or_else(|| anyhow!("no listing scripted for {url}"))
    }

    async fn get_externals(&self, path: &str) -> Result<String> {
        self.record("propget", format!("propget {EXTERNALS_PROPERTY} {path}"))?;
        Ok(self.externals.get(path).cloned().unwrap_or_default())
    }

    async fn set_externals(&self, path: &str, file: &Path) -> Result<()> {
        self.externals_files.borrow_mut().push(file.to_path_buf());
        self.written_externals.borrow_mut().push(std::fs::read_to_string(file)?);
        self.record("propset", format!("propset {EXTERNALS_PROPERTY} {path} -F {}", file.display()))
    }

    async fn switch(&self, url: &str) -> Result<()> {
        self.record("switch", format!("switch {url}"))
    }

    async fn update(&self) -> Result<()> {
        self.record("update", "update".to_string())
    }
}
