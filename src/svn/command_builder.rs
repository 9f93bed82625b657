//! Type-safe svn command builder
//!
//! Every svn invocation goes through [`SvnCommand`]: arguments are an explicit
//! vector handed to the process API (never a shell string), the working copy is set
//! per command instead of changing the process directory, and failures are mapped to
//! [`WpSvnError`] in one place.

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

use crate::constants::EXTERNALS_PROPERTY;
use crate::core::WpSvnError;
use crate::utils::platform::get_svn_command;

/// Builder for constructing and executing svn commands.
///
/// # Examples
///
/// ```rust,no_run
/// use wp_svn_update::svn::command_builder::SvnCommand;
///
/// # async fn example() -> anyhow::Result<()> {
/// let listing = SvnCommand::list("https://core.svn.wordpress.org/tags/")
///     .current_dir("/var/www/blog")
///     .execute_stdout()
///     .await?;
///
/// SvnCommand::update()
///     .current_dir("/var/www/blog")
///     .inherit_stdio()
///     .execute_success()
///     .await?;
/// # Ok(())
/// # }
/// ```
///
/// # Default Configuration
///
/// - **Program**: `svn` (`svn.exe` on Windows)
/// - **Output capture**: Enabled
/// - **Working directory**: Current process directory
/// - **Timeout**: none, svn is awaited until it exits
pub struct SvnCommand {
    /// svn executable name or path
    program: String,

    /// Command arguments (e.g. ["ls", "https://..."])
    args: Vec<String>,

    /// Working directory for command execution
    current_dir: Option<PathBuf>,

    /// Whether to capture output (true) or inherit stdio (false)
    capture_output: bool,

    /// Environment variables to set for the svn process
    env_vars: Vec<(String, String)>,
}

impl Default for SvnCommand {
    fn default() -> Self {
        Self {
            program: get_svn_command().to_string(),
            args: Vec::new(),
            current_dir: None,
            capture_output: true,
            env_vars: Vec::new(),
        }
    }
}

impl SvnCommand {
    /// Creates a new svn command builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a different svn executable (name looked up in `PATH`, or a path).
    pub fn program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Sets the working directory for the svn process.
    ///
    /// svn has no `-C` flag, so the directory is applied to the child process only.
    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.current_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Adds a single argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Adds multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Adds an environment variable for this invocation only.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.push((key.into(), value.into()));
        self
    }

    /// Lets svn use the terminal directly.
    ///
    /// Used for the mutating commands: svn's progress output reaches the user and
    /// credential or conflict prompts can be answered.
    pub const fn inherit_stdio(mut self) -> Self {
        self.capture_output = false;
        self
    }

    /// Arguments as they will be passed to svn.
    #[must_use]
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    fn spawn_error(&self, e: std::io::Error) -> anyhow::Error {
        if e.kind() == std::io::ErrorKind::NotFound {
            return WpSvnError::SvnNotFound {
                command: self.program.clone(),
            }
            .into();
        }
        anyhow::Error::new(e)
            .context(format!("Failed to execute {} {}", self.program, self.args.join(" ")))
    }

    /// Run the command; returns captured stdout (empty when stdio is inherited).
    async fn execute(self) -> Result<String> {
        let start = std::time::Instant::now();
        let operation = self.args.first().cloned().unwrap_or_else(|| "unknown".to_string());

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);

        if let Some(ref dir) = self.current_dir {
            cmd.current_dir(dir);
        }

        tracing::debug!(target: "svn", "Executing command: {} {}", self.program, self.args.join(" "));

        for (key, value) in &self.env_vars {
            tracing::trace!(target: "svn", "Setting env var: {}={}", key, value);
            cmd.env(key, value);
        }

        let (status, stdout, stderr) = if self.capture_output {
            cmd.stdin(Stdio::null());
            cmd.stdout(Stdio::piped());
            cmd.stderr(Stdio::piped());
            let output = cmd.output().await.map_err(|e| self.spawn_error(e))?;
            (
                output.status,
                String::from_utf8_lossy(&output.stdout).to_string(),
                String::from_utf8_lossy(&output.stderr).to_string(),
            )
        } else {
            cmd.stdin(Stdio::inherit());
            cmd.stdout(Stdio::inherit());
            cmd.stderr(Stdio::inherit());
            let status = cmd.status().await.map_err(|e| self.spawn_error(e))?;
            (status, String::new(), String::new())
        };

        if !status.success() {
            tracing::debug!(target: "svn", "Command failed with exit code: {:?}", status.code());
            if !stderr.is_empty() {
                tracing::debug!(target: "svn", "Error: {}", stderr.trim());
            }

            return Err(WpSvnError::SvnCommandError {
                operation,
                stderr: if stderr.is_empty() {
                    stdout
                } else {
                    stderr
                },
            }
            .into());
        }

        if !stdout.is_empty() {
            tracing::trace!(target: "svn", "{}", stdout.trim());
        }
        if !stderr.is_empty() {
            tracing::debug!(target: "svn", "{}", stderr.trim());
        }

        let elapsed = start.elapsed();
        if elapsed.as_secs() > 1 {
            tracing::info!(target: "svn::perf", "svn {} took {:.2}s", operation, elapsed.as_secs_f64());
        } else if elapsed.as_millis() > 100 {
            tracing::debug!(target: "svn::perf", "svn {} took {}ms", operation, elapsed.as_millis());
        }

        Ok(stdout)
    }

    /// Execute the command and return stdout.
    pub async fn execute_stdout(self) -> Result<String> {
        self.execute().await
    }

    /// Execute the command and only check for success.
    pub async fn execute_success(self) -> Result<()> {
        self.execute().await?;
        Ok(())
    }
}

// Convenience builders for the svn operations the updater uses

impl SvnCommand {
    /// `svn info` of the working copy
    pub fn info() -> Self {
        // English messages so the `URL:` line can be found
        Self::new().arg("info").env("LC_MESSAGES", "C")
    }

    /// `svn ls <url>`
    pub fn list(url: &str) -> Self {
        Self::new().args(["ls", url])
    }

    /// `svn propget svn:externals <path>`
    pub fn propget_externals(path: &str) -> Self {
        Self::new().args(["propget", EXTERNALS_PROPERTY, path])
    }

    /// `svn propset svn:externals <path> -F <file>`
    pub fn propset_externals(path: &str, file: impl AsRef<Path>) -> Self {
        Self::new().args([
            "propset".to_string(),
            EXTERNALS_PROPERTY.to_string(),
            path.to_string(),
            "-F".to_string(),
            file.as_ref().display().to_string(),
        ])
    }

    /// `svn switch <url>`
    pub fn switch(url: &str) -> Self {
        Self::new().args(["switch", url])
    }

    /// `svn update`
    pub fn update() -> Self {
        Self::new().arg("update")
    }
}
