//! Newest-version discovery for a repository URL.
//!
//! WordPress core and every plugin on `plugins.svn.wordpress.org` use the standard
//! `trunk/` + `tags/<version>/` layout:
//!
//! ```text
//! http://core.svn.wordpress.org/trunk/
//! http://core.svn.wordpress.org/tags/3.2.1/
//! http://plugins.svn.wordpress.org/akismet/trunk/
//! http://plugins.svn.wordpress.org/akismet/tags/2.5.3/
//! ```
//!
//! A trunk URL is always treated as up to date. A tag URL is compared against the
//! newest entry of `svn ls <base>/tags/`. Anything else is reported back as a parse
//! error on the returned [`UpdateInfo`]; the caller decides how loud to be about it.

use anyhow::{Context, Result};
use regex::Regex;

use super::UpdateInfo;
use crate::svn::{SvnClient, parse_listing};
use crate::version::VersionComparator;

/// Which layout rules apply to a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    /// The WordPress install itself: `<repo>/trunk` or `<repo>/tags/<v>`
    Core,
    /// A plugin external: at least one path segment (the plugin) before
    /// `trunk` or `tags`
    Plugin,
}

impl TargetKind {
    fn plugin_part(self) -> &'static str {
        match self {
            Self::Core => "",
            Self::Plugin => "/.+?",
        }
    }

    fn trunk_pattern(self) -> Result<Regex> {
        Regex::new(&format!(r"http.+?{}/trunk(?:/|$)", self.plugin_part()))
            .context("Invalid trunk URL pattern")
    }

    fn tags_pattern(self) -> Result<Regex> {
        Regex::new(&format!(r"^(http.+?{}/tags/)(.+?)/?$", self.plugin_part()))
            .context("Invalid tags URL pattern")
    }
}

/// Where a URL points, before any repository access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlLayout {
    /// Follows trunk
    Trunk,
    /// Points at a tag; `base` ends with `/tags/`
    Tag {
        /// The `.../tags/` directory to list
        base: String,
        /// Tag name without slashes
        version: String,
    },
    /// Neither trunk nor a tag
    Unknown,
}

/// Classify a URL as trunk, tag or unknown.
pub fn classify_url(url: &str, kind: TargetKind) -> Result<UrlLayout> {
    if kind.trunk_pattern()?.is_match(url) {
        return Ok(UrlLayout::Trunk);
    }

    if let Some(captures) = kind.tags_pattern()?.captures(url) {
        let version = captures[2].trim_matches('/').to_string();
        if !version.is_empty() {
            return Ok(UrlLayout::Tag {
                base: captures[1].to_string(),
                version,
            });
        }
    }

    Ok(UrlLayout::Unknown)
}

/// Determine the newest available version for `url`.
///
/// Only tag URLs touch the repository (`svn ls` of the tags directory). A failing
/// `svn ls` is returned as an error; an unclassifiable URL is not, it comes back
/// as [`UpdateInfo::parse_error`].
pub async fn find_newest<C: SvnClient>(client: &C, url: &str, kind: TargetKind) -> Result<UpdateInfo> {
    match classify_url(url, kind)? {
        UrlLayout::Trunk => {
            tracing::debug!("{} follows trunk", url);
            Ok(UpdateInfo::trunk(url))
        }
        UrlLayout::Tag {
            base,
            version,
        } => {
            let listing = client.list(&base).await?;
            let tags = parse_listing(&listing);
            let newest = VersionComparator::get_latest(&tags).unwrap_or(&version).to_string();
            let is_update = VersionComparator::is_newer(&newest, &version);

            tracing::debug!(
                "{}: current tag {}, newest of {} tags is {}",
                url,
                version,
                tags.len(),
                newest
            );

            Ok(UpdateInfo {
                current_url: url.to_string(),
                current_version: Some(version),
                new_url: format!("{base}{newest}/"),
                new_version: Some(newest),
                is_update,
                is_parse_error: false,
            })
        }
        UrlLayout::Unknown => {
            tracing::warn!("Cannot classify svn url {} as trunk or tag", url);
            Ok(UpdateInfo::parse_error(url))
        }
    }
}
