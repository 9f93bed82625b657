//! The end-to-end update run against one working copy.

use anyhow::Result;
use std::io::Write;
use tokio::io::AsyncBufRead;

use super::apply::{ApplyReport, apply_plan};
use super::confirm::confirm;
use super::discovery::{TargetKind, find_newest};
use super::externals::{ExternalsLine, parse_externals};
use super::{ExternalsEntry, PluginExternal, UpdateInfo, UpdatePlan};
use crate::core::WpSvnError;
use crate::svn::{SvnClient, parse_info_url};
use crate::utils::progress::ProgressBar;

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The summary showed no pending change; nothing was run
    NothingToDo,
    /// Changes were confirmed (or forced) and applied
    Applied(ApplyReport),
}

/// Drives the update of one WordPress working copy through an [`SvnClient`].
///
/// # Examples
///
/// ```rust,no_run
/// use wp_svn_update::svn::SystemSvn;
/// use wp_svn_update::update::Updater;
///
/// # async fn example() -> anyhow::Result<()> {
/// let svn = SystemSvn::new("svn", "/var/www/blog");
/// let updater = Updater::new(&svn, "wp-content/plugins").with_force(true);
///
/// let mut stdin = tokio::io::BufReader::new(tokio::io::stdin());
/// updater.run(&mut stdin, &mut std::io::stdout()).await?;
/// # Ok(())
/// # }
/// ```
pub struct Updater<'a, C: SvnClient> {
    client: &'a C,
    plugins_dir: String,
    force: bool,
    progress: ProgressBar,
}

impl<'a, C: SvnClient> Updater<'a, C> {
    /// Updater for the working copy behind `client`; plugins live in `plugins_dir`.
    pub fn new(client: &'a C, plugins_dir: impl Into<String>) -> Self {
        Self {
            client,
            plugins_dir: plugins_dir.into(),
            force: false,
            progress: ProgressBar::hidden(),
        }
    }

    /// Skip the confirmation prompt.
    #[must_use]
    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Show `progress` while update information is collected.
    #[must_use]
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    fn report_error<W: Write>(&self, out: &mut W, message: &str) -> Result<()> {
        tracing::warn!("{}", message);
        self.progress.suspend(|| writeln!(out, "ERROR: {message}"))?;
        Ok(())
    }

    /// Newest version for `url`, downgraded to a per-item error when it cannot be
    /// determined.
    ///
    /// A URL that is neither trunk nor a tag, or whose tags directory cannot be
    /// listed, prints an `ERROR:` line on `out` and comes back as
    /// [`UpdateInfo::parse_error`], so the item is kept unchanged.
    async fn lookup<W: Write>(&self, out: &mut W, url: &str, kind: TargetKind) -> Result<UpdateInfo> {
        let update = match find_newest(self.client, url, kind).await {
            Ok(update) if !update.is_parse_error => return Ok(update),
            Ok(update) => update,
            Err(e) => {
                tracing::warn!("Listing tags for {} failed: {:#}", url, e);
                UpdateInfo::parse_error(url)
            }
        };

        self.report_error(out, &format!("Cannot determine newest version of current svn url: {url}"))?;
        Ok(update)
    }

    /// Collect update information for the core install and every plugin external.
    ///
    /// Only a failing or URL-less `svn info` is fatal
    /// ([`WpSvnError::SvnInfoParseError`]). Lookup problems of the core install or
    /// of a single plugin only produce an `ERROR:` line on `out`.
    pub async fn collect<W: Write>(&self, out: &mut W) -> Result<UpdatePlan> {
        self.progress.set_message("Reading svn info");
        let info = match self.client.info().await {
            Ok(info) => info,
            Err(e) => return Err(info_failure(e)),
        };
        let current_url = parse_info_url(&info)?;
        tracing::info!("Working copy URL: {}", current_url);

        self.progress.set_message("Looking up newest WordPress version");
        let core = self.lookup(out, &current_url, TargetKind::Core).await?;

        let mut plan = UpdatePlan::new(core);

        self.progress.set_message(format!("Reading externals of {}", self.plugins_dir));
        let property = match self.client.get_externals(&self.plugins_dir).await {
            Ok(property) => property,
            Err(e) => {
                // svn >= 1.9 fails propget when the property is absent
                tracing::warn!("No externals read from {}: {:#}", self.plugins_dir, e);
                String::new()
            }
        };

        for line in parse_externals(&property)? {
            let entry = match line {
                ExternalsLine::Definition(definition) => {
                    self.progress.set_message(format!("Looking up {}", definition.name));
                    let update = self.lookup(out, &definition.url, TargetKind::Plugin).await?;
                    ExternalsEntry::Plugin(PluginExternal {
                        definition,
                        update,
                    })
                }
                ExternalsLine::Unparsed(line) => {
                    self.report_error(out, &format!("Cannot parse externals definition: {line}"))?;
                    ExternalsEntry::Unparsed(line)
                }
            };
            plan.externals.push(entry);
        }

        self.progress.finish_and_clear();
        Ok(plan)
    }

    /// Collect, print the summary, confirm and apply.
    ///
    /// The prompt reads from `input` and only appears when something is pending and
    /// the updater is not forced. Input ending without a `y` aborts with
    /// [`WpSvnError::ConfirmationAborted`] before any change is made.
    pub async fn run<R, W>(&self, input: &mut R, out: &mut W) -> Result<RunOutcome>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let plan = self.collect(out).await?;
        plan.write_summary(out)?;
        out.flush()?;

        if !plan.has_changes() {
            tracing::info!("Everything is up to date");
            return Ok(RunOutcome::NothingToDo);
        }

        if !self.force && !confirm(input, out).await? {
            return Err(WpSvnError::ConfirmationAborted.into());
        }

        let report = apply_plan(self.client, &plan, &self.plugins_dir).await?;
        Ok(RunOutcome::Applied(report))
    }
}

/// A failed `svn info` means the target is not a usable working copy.
fn info_failure(error: anyhow::Error) -> anyhow::Error {
    let stderr = match error.downcast_ref::<WpSvnError>() {
        Some(WpSvnError::SvnCommandError {
            stderr,
            ..
        }) => Some(stderr.clone()),
        _ => None,
    };

    match stderr {
        Some(stderr) => WpSvnError::SvnInfoParseError {
            stderr,
        }
        .into(),
        None => error,
    }
}
