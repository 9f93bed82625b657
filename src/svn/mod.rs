//! Subversion client integration
//!
//! wp-svn-update never talks to a repository itself: every read and write goes
//! through the system `svn` binary, the same way a person maintaining the blog would
//! do it by hand. This module exposes that as the [`SvnClient`] trait so the update
//! workflow can be driven by a scripted client in tests.
//!
//! # Operations
//!
//! | Method | svn invocation | Output consumed |
//! |--------|----------------|-----------------|
//! | [`SvnClient::info`] | `svn info` | the `URL:` line |
//! | [`SvnClient::list`] | `svn ls <url>` | one entry per line |
//! | [`SvnClient::get_externals`] | `svn propget svn:externals <path>` | one definition per line |
//! | [`SvnClient::set_externals`] | `svn propset svn:externals <path> -F <file>` | none |
//! | [`SvnClient::switch`] | `svn switch <url>` | none |
//! | [`SvnClient::update`] | `svn update` | none |
//!
//! Read operations capture output; mutating operations inherit stdio so svn's own
//! progress reaches the terminal.

pub mod command_builder;

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::core::WpSvnError;
use command_builder::SvnCommand;

/// The svn operations the update workflow needs.
///
/// Implementations run against a fixed working copy.
#[allow(async_fn_in_trait)]
pub trait SvnClient {
    /// Raw output of `svn info`.
    async fn info(&self) -> Result<String>;

    /// Raw output of `svn ls <url>`.
    async fn list(&self, url: &str) -> Result<String>;

    /// Raw `svn:externals` property text of `path`.
    async fn get_externals(&self, path: &str) -> Result<String>;

    /// Set the `svn:externals` property of `path` from the contents of `file`.
    async fn set_externals(&self, path: &str, file: &Path) -> Result<()>;

    /// `svn switch <url>` of the working copy root.
    async fn switch(&self, url: &str) -> Result<()>;

    /// `svn update` of the working copy root.
    async fn update(&self) -> Result<()>;
}

/// [`SvnClient`] backed by the system svn binary.
#[derive(Debug, Clone)]
pub struct SystemSvn {
    program: String,
    working_copy: PathBuf,
}

impl SystemSvn {
    /// Client running `program` inside `working_copy`.
    pub fn new(program: impl Into<String>, working_copy: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            working_copy: working_copy.into(),
        }
    }

    fn prepare(&self, cmd: SvnCommand) -> SvnCommand {
        cmd.program(&self.program).current_dir(&self.working_copy)
    }
}

impl SvnClient for SystemSvn {
    async fn info(&self) -> Result<String> {
        self.prepare(SvnCommand::info()).execute_stdout().await
    }

    async fn list(&self, url: &str) -> Result<String> {
        self.prepare(SvnCommand::list(url)).execute_stdout().await
    }

    async fn get_externals(&self, path: &str) -> Result<String> {
        self.prepare(SvnCommand::propget_externals(path)).execute_stdout().await
    }

    async fn set_externals(&self, path: &str, file: &Path) -> Result<()> {
        self.prepare(SvnCommand::propset_externals(path, file))
            .inherit_stdio()
            .execute_success()
            .await
    }

    async fn switch(&self, url: &str) -> Result<()> {
        self.prepare(SvnCommand::switch(url)).inherit_stdio().execute_success().await
    }

    async fn update(&self) -> Result<()> {
        self.prepare(SvnCommand::update()).inherit_stdio().execute_success().await
    }
}

/// Extract the repository URL from `svn info` output.
///
/// Returns [`WpSvnError::SvnInfoParseError`] when no `URL: ` line is present.
pub fn parse_info_url(info_output: &str) -> Result<String, WpSvnError> {
    info_output
        .lines()
        .find_map(|line| line.trim_end_matches('\r').strip_prefix("URL: "))
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
        .ok_or_else(|| WpSvnError::SvnInfoParseError {
            stderr: String::new(),
        })
}

/// Split `svn ls` output into entry names, without trailing slashes.
#[must_use]
pub fn parse_listing(ls_output: &str) -> Vec<String> {
    ls_output
        .lines()
        .map(|line| line.trim().trim_end_matches('/'))
        .filter(|entry| !entry.is_empty())
        .map(String::from)
        .collect()
}
