use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;
use thiserror::Error;

static VERSION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]+)\.([0-9]+)\.([0-9]+)(?:[-_]([0-9]+))?").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    #[error("No version found in {0:?}")]
    NotFound(String),
    #[error("Version component out of range in {0:?}: {1}")]
    Overflow(String, ParseIntError),
}

/// A `major.minor.patch` version with an optional upstream revision.
///
/// Upstream tags releases as `3.7.0-3`, but `pkgver` may not contain hyphens,
/// so the same value is written as `3.7.0_3` inside a PKGBUILD. Parsing
/// accepts either separator.
///
/// Ordering compares the fields in declaration order, a missing revision
/// sorts before any present revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub upstream_revision: Option<u64>,
}

impl Version {
    /// Extract the first version found anywhere in `s`.
    pub fn parse(s: &str) -> Result<Version, VersionError> {
        let caps = VERSION_RE
            .captures(s)
            .ok_or_else(|| VersionError::NotFound(s.to_string()))?;

        let num = |digits: &str| {
            digits
                .parse::<u64>()
                .map_err(|err| VersionError::Overflow(s.to_string(), err))
        };

        Ok(Version {
            major: num(&caps[1])?,
            minor: num(&caps[2])?,
            patch: num(&caps[3])?,
            upstream_revision: caps.get(4).map(|m| num(m.as_str())).transpose()?,
        })
    }

    /// Format for the `pkgver` field, eg. `3.7.0_3`.
    pub fn to_pkgver(&self) -> String {
        self.render('_')
    }

    /// Format used by upstream release tags, eg. `3.7.0-3`.
    pub fn to_upstream(&self) -> String {
        self.render('-')
    }

    fn render(&self, sep: char) -> String {
        let mut out = format!("{}.{}.{}", self.major, self.minor, self.patch);
        if let Some(rev) = self.upstream_revision {
            out.push(sep);
            out.push_str(&rev.to_string());
        }
        out
    }

    pub fn is_same_major(&self, other: &Version) -> bool {
        self.major == other.major
    }

    pub fn is_same_minor(&self, other: &Version) -> bool {
        self.is_same_major(other) && self.minor == other.minor
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.to_upstream())
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Version, VersionError> {
        Version::parse(s)
    }
}
