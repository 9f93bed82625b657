//! Tag version parsing and ordering.
//!
//! WordPress and plugin tags are dotted numbers with a varying number of
//! components (`3.2`, `3.2.1`, `2.5.4.1`) and occasionally a pre-release suffix
//! (`3.3-beta1`). They are not strict semantic versions, so [`TagVersion`] parses
//! them leniently:
//!
//! - an optional leading `v` is ignored
//! - numeric components are compared left to right, missing components count as
//!   zero (`3.2` == `3.2.0`)
//! - a `-suffix` makes a pre-release, ordered with semver pre-release precedence and
//!   always below the plain release
//!
//! - [`comparison`] - picking the newest tag of a listing, newer-than checks

pub mod comparison;

use semver::Prerelease;
use std::cmp::Ordering;

pub use comparison::VersionComparator;

/// A parsed tag version.
#[derive(Debug, Clone)]
pub struct TagVersion {
    components: Vec<u64>,
    pre: Prerelease,
}

/// Error returned for tags that are not dotted versions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a dotted version")]
pub struct InvalidTagVersion(pub String);

impl TagVersion {
    /// Parse a tag name. See the module documentation for the accepted shapes.
    pub fn parse(tag: &str) -> Result<Self, InvalidTagVersion> {
        let invalid = || InvalidTagVersion(tag.to_string());
        let trimmed = tag.trim().trim_matches('/');
        let body = trimmed.strip_prefix(['v', 'V']).unwrap_or(trimmed);

        let (numbers, suffix) = match body.split_once('-') {
            Some((numbers, suffix)) => (numbers, Some(suffix)),
            None => (body, None),
        };

        if numbers.is_empty() {
            return Err(invalid());
        }

        let components = numbers
            .split('.')
            .map(|part| part.parse::<u64>().map_err(|_| invalid()))
            .collect::<Result<Vec<_>, _>>()?;

        let pre = match suffix {
            Some(suffix) => Prerelease::new(suffix).map_err(|_| invalid())?,
            None => Prerelease::EMPTY,
        };

        Ok(Self {
            components,
            pre,
        })
    }

    fn component(&self, index: usize) -> u64 {
        self.components.get(index).copied().unwrap_or(0)
    }
}

impl Ord for TagVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.components.len().max(other.components.len());
        for i in 0..len {
            match self.component(i).cmp(&other.component(i)) {
                Ordering::Equal => {}
                ord => return ord,
            }
        }

        // Empty pre-release sorts above any pre-release
        match (self.pre.is_empty(), other.pre.is_empty()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => self.pre.cmp(&other.pre),
        }
    }
}

impl PartialOrd for TagVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for TagVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for TagVersion {}
