use crate::error::{MsgtmError, Result};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static SEMVER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^v?(\d+)\.(\d+)\.(\d+)$").expect("valid semver regex"));

/// Semantic version representation
///
/// Ordering is lexicographic over (major, minor, patch), which is what the
/// derived `Ord` gives for this field order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SemVer {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl SemVer {
    /// Create a new version
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        SemVer {
            major,
            minor,
            patch,
        }
    }

    /// Parse a version string (e.g., "v1.2.3" or "1.2.3" -> SemVer(1,2,3))
    ///
    /// Surrounding whitespace is ignored; anything else outside the
    /// `v?MAJOR.MINOR.PATCH` shape is rejected.
    pub fn parse(s: &str) -> Result<Self> {
        let captures = SEMVER_RE
            .captures(s.trim())
            .ok_or_else(|| MsgtmError::InvalidFormat(s.to_string()))?;

        let component = |i: usize| -> Result<u32> {
            captures[i]
                .parse::<u32>()
                .map_err(|_| MsgtmError::InvalidFormat(s.to_string()))
        };

        Ok(SemVer {
            major: component(1)?,
            minor: component(2)?,
            patch: component(3)?,
        })
    }

    /// `{major+1, 0, 0}`; fails with `VersionOverflow` at `u32::MAX`.
    pub fn major_up(&self) -> Result<Self> {
        Ok(SemVer::new(self.step(self.major)?, 0, 0))
    }

    pub fn minor_up(&self) -> Result<Self> {
        Ok(SemVer::new(self.major, self.step(self.minor)?, 0))
    }

    pub fn patch_up(&self) -> Result<Self> {
        Ok(SemVer::new(self.major, self.minor, self.step(self.patch)?))
    }

    /// Bump version according to bump type
    pub fn bump(&self, bump_type: VersionBump) -> Result<Self> {
        match bump_type {
            VersionBump::Major => self.major_up(),
            VersionBump::Minor => self.minor_up(),
            VersionBump::Patch => self.patch_up(),
        }
    }

    fn step(&self, component: u32) -> Result<u32> {
        component
            .checked_add(1)
            .ok_or_else(|| MsgtmError::VersionOverflow(self.to_string()))
    }
}

impl FromStr for SemVer {
    type Err = MsgtmError;

    fn from_str(s: &str) -> Result<Self> {
        SemVer::parse(s)
    }
}

impl fmt::Display for SemVer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl Serialize for SemVer {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SemVer {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        SemVer::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Version bump type decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionBump {
    Major,
    Minor,
    Patch,
}

impl fmt::Display for VersionBump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionBump::Major => write!(f, "major"),
            VersionBump::Minor => write!(f, "minor"),
            VersionBump::Patch => write!(f, "patch"),
        }
    }
}
