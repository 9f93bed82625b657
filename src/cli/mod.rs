//! Command-line interface for wp-svn-update.
//!
//! ```bash
//! # Inspect the blog in /var/www/blog, confirm before changing anything
//! wp-svn-update /var/www/blog
//!
//! # Apply without asking (cron, deploy scripts)
//! wp-svn-update -f /var/www/blog
//!
//! # Plugins in a non-standard location, custom svn binary
//! wp-svn-update --plugins-dir content/plugins --svn /opt/subversion/bin/svn .
//! ```
//!
//! # Logging
//!
//! Diagnostics go to stderr through `tracing`. `RUST_LOG` takes precedence when
//! set; otherwise `--verbose` selects `debug`, `--quiet` selects `error` and the
//! default is `warn`, which keeps the summary on stdout readable.


use anyhow::Result;
use clap::Parser;
use clap::builder::FalseyValueParser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use crate::config::{CliSettings, FileConfig, RunConfig};
use crate::constants::{CONFIG_PATH_ENV, NO_PROGRESS_ENV};
use crate::core::WpSvnError;
use crate::svn::SystemSvn;
use crate::update::{RunOutcome, Updater};
use crate::utils::platform::{command_exists, resolve_target_dir};
use crate::utils::progress::ProgressBar;

/// Switch a Subversion-managed WordPress install and its plugin externals to
/// their newest tags.
#[derive(Parser, Debug)]
#[command(
    name = "wp-svn-update",
    version,
    about = "Find and apply newer WordPress and plugin tags in an svn working copy",
    long_about = "Looks up the newest tag of the WordPress install in TARGET and of every plugin \
                  listed in the svn:externals of its plugins directory, prints the proposed \
                  changes and, after confirmation, applies them with svn propset/switch/update."
)]
pub struct Cli {
    /// WordPress working copy (defaults to the current directory)
    pub target: Option<PathBuf>,

    /// Apply changes without asking for confirmation
    #[arg(short, long)]
    pub force: bool,

    /// svn executable to use
    #[arg(long, env = "WP_SVN_UPDATE_SVN", value_name = "PROGRAM")]
    pub svn: Option<String>,

    /// Plugins directory carrying svn:externals, relative to TARGET
    #[arg(long, env = "WP_SVN_UPDATE_PLUGINS_DIR", value_name = "DIR")]
    pub plugins_dir: Option<String>,

    /// Path to a configuration file
    #[arg(short, long, env = CONFIG_PATH_ENV, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Do not show a spinner while collecting update information
    #[arg(long, env = NO_PROGRESS_ENV, value_parser = FalseyValueParser::new())]
    pub no_progress: bool,

    /// Show debug output
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only show errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Log level implied by `--verbose` / `--quiet`.
    #[must_use]
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        }
    }

    /// Resolve configuration and run the update.
    pub async fn execute(self) -> Result<RunOutcome> {
        init_logging(self.log_level());

        let file = FileConfig::load_with_optional(self.config.as_deref()).await?;
        let cwd = std::env::current_dir()?;
        let target = resolve_target_dir(self.target.as_deref().unwrap_or(Path::new(".")), &cwd)?;

        let config = RunConfig::resolve(
            target,
            self.force,
            CliSettings {
                svn: self.svn,
                plugins_dir: self.plugins_dir,
                no_progress: self.no_progress,
            },
            file,
        );

        run(&config).await
    }
}

/// Run the update described by `config` against the system svn, reading the
/// confirmation from stdin and printing to stdout.
pub async fn run(config: &RunConfig) -> Result<RunOutcome> {
    if !command_exists(&config.svn) {
        return Err(WpSvnError::SvnNotFound {
            command: config.svn.clone(),
        }
        .into());
    }

    tracing::debug!("Running with {:?}", config);

    let svn = SystemSvn::new(config.svn.as_str(), config.target.as_path());
    let updater = Updater::new(&svn, config.plugins_dir.as_str())
        .with_force(config.force)
        .with_progress(ProgressBar::new_spinner(config.show_progress));

    let mut stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    updater.run(&mut stdin, &mut stdout).await
}

fn init_logging(default_level: &str) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(default_level)
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
