//! Appliance versions and per-version widget picks.
//!
//! Several screens changed markup between appliance releases. Views pick the
//! matching widget once, at construction, through [`VersionPick`].

use crate::result::{ViewError, ViewResult};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Dotted numeric appliance version
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Version {
    /// Sorts below every real version
    Lowest,
    /// A concrete version such as `5.8.0.17`
    Release(Vec<u32>),
    /// Sorts above every real version
    Latest,
}

impl Version {
    /// Version below every release
    #[must_use]
    pub const fn lowest() -> Self {
        Self::Lowest
    }

    /// Version above every release
    #[must_use]
    pub const fn latest() -> Self {
        Self::Latest
    }

    /// Parse a dotted version string
    pub fn parse(input: &str) -> ViewResult<Self> {
        input.parse()
    }

    fn components(&self) -> &[u32] {
        match self {
            Self::Release(parts) => parts,
            Self::Lowest | Self::Latest => &[],
        }
    }

    const fn rank(&self) -> u8 {
        match self {
            Self::Lowest => 0,
            Self::Release(_) => 1,
            Self::Latest => 2,
        }
    }
}

impl Default for Version {
    fn default() -> Self {
        Self::Latest
    }
}

impl FromStr for Version {
    type Err = ViewError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        match trimmed {
            "lowest" => return Ok(Self::Lowest),
            "latest" | "master" => return Ok(Self::Latest),
            _ => {}
        }
        let parts = trimmed
            .split('.')
            .map(str::parse::<u32>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| ViewError::InvalidVersion {
                input: input.to_string(),
            })?;
        Ok(Self::Release(parts))
    }
}

impl TryFrom<String> for Version {
    type Error = ViewError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Version> for String {
    fn from(version: Version) -> Self {
        version.to_string()
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lowest => f.write_str("lowest"),
            Self::Latest => f.write_str("latest"),
            Self::Release(parts) => {
                let rendered: Vec<String> = parts.iter().map(u32::to_string).collect();
                f.write_str(&rendered.join("."))
            }
        }
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.rank().cmp(&other.rank()) {
            Ordering::Equal => {}
            unequal => return unequal,
        }
        let (a, b) = (self.components(), other.components());
        for i in 0..a.len().max(b.len()) {
            let ordering = a
                .get(i)
                .copied()
                .unwrap_or(0)
                .cmp(&b.get(i).copied().unwrap_or(0));
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

/// Value chosen by appliance version
#[derive(Debug, Clone)]
pub struct VersionPick<T> {
    picks: Vec<(Version, T)>,
}

impl<T> Default for VersionPick<T> {
    fn default() -> Self {
        Self { picks: Vec::new() }
    }
}

impl<T> VersionPick<T> {
    /// Create an empty pick table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `value` from `since` onwards
    #[must_use]
    pub fn with(mut self, since: Version, value: T) -> Self {
        self.picks.push((since, value));
        self
    }

    /// Use `value` from the version string `since` onwards
    pub fn since(self, since: &str, value: T) -> ViewResult<Self> {
        Ok(self.with(Version::parse(since)?, value))
    }

    /// Borrow the value for `version`
    pub fn pick(&self, version: &Version) -> ViewResult<&T> {
        self.best_index(version).map(|i| &self.picks[i].1)
    }

    /// Take the value for `version`
    pub fn into_pick(mut self, version: &Version) -> ViewResult<T> {
        let index = self.best_index(version)?;
        Ok(self.picks.swap_remove(index).1)
    }

    fn best_index(&self, version: &Version) -> ViewResult<usize> {
        self.picks
            .iter()
            .enumerate()
            .filter(|(_, (since, _))| since <= version)
            .max_by(|(_, (a, _)), (_, (b, _))| a.cmp(b))
            .map(|(i, _)| i)
            .ok_or_else(|| ViewError::UnsupportedVersion {
                version: version.to_string(),
            })
    }
}
