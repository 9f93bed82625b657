//! Picking the newest tag and deciding whether it is an update.
//!
//! `svn ls` lists tags alphabetically, so the last entry is not necessarily the
//! newest (`3.10/` sorts before `3.9/`). [`VersionComparator::get_latest`] orders the
//! listing by [`TagVersion`] instead and only falls back to the listing order when
//! nothing in it parses as a version.

use super::TagVersion;

/// Version comparison helpers for tag listings.
pub struct VersionComparator;

impl VersionComparator {
    /// Returns the newest entry of a tags listing.
    ///
    /// Entries that are not dotted versions are ignored. When no entry parses, the
    /// last entry is returned as-is; an empty listing yields `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use wp_svn_update::version::VersionComparator;
    ///
    /// let tags = vec!["3.1".to_string(), "3.10".to_string(), "3.9".to_string()];
    /// assert_eq!(VersionComparator::get_latest(&tags), Some("3.10"));
    /// ```
    #[must_use]
    pub fn get_latest(tags: &[String]) -> Option<&str> {
        let latest = tags
            .iter()
            .filter_map(|tag| TagVersion::parse(tag).ok().map(|version| (tag, version)))
            // max_by keeps the last of equal elements, i.e. the later listing entry
            .max_by(|(_, a), (_, b)| a.cmp(b))
            .map(|(tag, _)| tag.as_str());

        if latest.is_none() && !tags.is_empty() {
            tracing::debug!("No version-like tag in listing, using last entry");
        }

        latest.or_else(|| tags.last().map(String::as_str))
    }

    /// Whether `candidate` is strictly newer than `current`.
    ///
    /// Tags that do not parse are never considered newer, and a current tag that
    /// does not parse is never considered outdated.
    #[must_use]
    pub fn is_newer(candidate: &str, current: &str) -> bool {
        match (TagVersion::parse(candidate), TagVersion::parse(current)) {
            (Ok(candidate), Ok(current)) => candidate > current,
            _ => false,
        }
    }
}
