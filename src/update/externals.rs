//! Parsing and regenerating the plugins directory's `svn:externals` property.
//!
//! Two definition formats exist:
//!
//! ```text
//! # pre-1.5 format: local name, optional revision, URL
//! akismet http://plugins.svn.wordpress.org/akismet/tags/2.5.3/
//! wp-super-cache -r 41000 http://plugins.svn.wordpress.org/wp-super-cache/tags/0.9.9/
//!
//! # 1.5+ format: optional revision, URL, local name
//! -r 41000 http://plugins.svn.wordpress.org/wp-super-cache/tags/0.9.9/ wp-super-cache
//! ```
//!
//! A pinned revision is a deliberate choice by whoever maintains the blog: the
//! plugin is listed but never proposed for a switch. Its regenerated line still
//! points at the newest tag and keeps the revision token, so if another plugin
//! triggers a property rewrite the pinned one moves along with its revision intact.

use anyhow::{Context, Result};
use regex::Regex;

use super::UpdateInfo;

/// Which definition format a line used; regeneration writes the same one back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExternalsFormat {
    /// `name [-r N] URL`
    Legacy,
    /// `[-r N] URL name`
    Modern,
}

/// One parsed externals definition, before any repository access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalDefinition {
    /// Local directory name of the plugin
    pub name: String,
    /// Revision token exactly as written, including its surrounding whitespace
    /// (e.g. `" -r 41000"` for legacy lines)
    pub revision_token: Option<String>,
    /// Repository URL
    pub url: String,
    /// Format the line was written in
    pub format: ExternalsFormat,
}

impl ExternalDefinition {
    /// Revision token without surrounding whitespace, e.g. `"-r 41000"`.
    #[must_use]
    pub fn pinned_revision(&self) -> Option<&str> {
        self.revision_token.as_deref().map(str::trim).filter(|token| !token.is_empty())
    }

    /// Render the definition pointing at `url`, keeping name, revision and format.
    #[must_use]
    pub fn render(&self, url: &str) -> String {
        let revision = self.revision_token.as_deref().unwrap_or("");
        match self.format {
            ExternalsFormat::Legacy => format!("{}{} {}", self.name, revision, url),
            ExternalsFormat::Modern => format!("{}{} {}", revision, url, self.name),
        }
    }
}

/// One line of the externals property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExternalsLine {
    /// A recognised definition
    Definition(ExternalDefinition),
    /// A line in neither format; carried over verbatim
    Unparsed(String),
}

struct ExternalsParser {
    legacy: Regex,
    modern: Regex,
}

impl ExternalsParser {
    fn new() -> Result<Self> {
        Ok(Self {
            legacy: Regex::new(r"(?i)^(.+?)(\s+-r\s*\d+)?\s+(.*)$")
                .context("Invalid externals pattern")?,
            modern: Regex::new(
                r"(?i)^(-r\s*\d+\s+)?((?:[a-z][a-z0-9+.\-]*://|\^/|//)\S+)\s+(\S.*)$",
            )
            .context("Invalid externals pattern")?,
        })
    }

    fn parse_line(&self, line: &str) -> ExternalsLine {
        // URL-first lines would also satisfy the legacy pattern, so try them first
        if let Some(captures) = self.modern.captures(line) {
            return ExternalsLine::Definition(ExternalDefinition {
                name: captures[3].trim().to_string(),
                revision_token: captures.get(1).map(|m| m.as_str().to_string()),
                url: captures[2].to_string(),
                format: ExternalsFormat::Modern,
            });
        }

        if let Some(captures) = self.legacy.captures(line) {
            let url = captures[3].trim().to_string();
            if !url.is_empty() {
                return ExternalsLine::Definition(ExternalDefinition {
                    name: captures[1].to_string(),
                    revision_token: captures.get(2).map(|m| m.as_str().to_string()),
                    url,
                    format: ExternalsFormat::Legacy,
                });
            }
        }

        ExternalsLine::Unparsed(line.to_string())
    }
}

/// Parse the raw property text. Blank lines are skipped.
pub fn parse_externals(property: &str) -> Result<Vec<ExternalsLine>> {
    let parser = ExternalsParser::new()?;
    Ok(property
        .lines()
        .map(|line| line.trim_end_matches('\r').trim_end())
        .filter(|line| !line.trim().is_empty())
        .map(|line| parser.parse_line(line.trim_start()))
        .collect())
}

/// A plugin external together with what discovery found out about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginExternal {
    /// The parsed definition
    pub definition: ExternalDefinition,
    /// Discovery result for the definition's URL
    pub update: UpdateInfo,
}

impl PluginExternal {
    /// Local directory name of the plugin.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.definition.name
    }

    /// Pinned revision token, if any.
    #[must_use]
    pub fn pinned_revision(&self) -> Option<&str> {
        self.definition.pinned_revision()
    }

    /// A newer version exists and the plugin is not pinned.
    #[must_use]
    pub fn proposes_update(&self) -> bool {
        self.update.is_update && self.pinned_revision().is_none()
    }

    /// Definition line for the new property, pointing at the newest URL.
    #[must_use]
    pub fn externals_line(&self) -> String {
        self.definition.render(&self.update.new_url)
    }
}

/// An externals property line with its discovery result attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExternalsEntry {
    /// A plugin external
    Plugin(PluginExternal),
    /// A line that could not be parsed; written back unchanged
    Unparsed(String),
}

impl ExternalsEntry {
    /// Line to write into the regenerated property.
    #[must_use]
    pub fn externals_line(&self) -> String {
        match self {
            Self::Plugin(plugin) => plugin.externals_line(),
            Self::Unparsed(line) => line.clone(),
        }
    }
}
