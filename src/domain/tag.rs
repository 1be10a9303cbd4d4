use crate::domain::version::{SemVer, VersionBump};
use crate::error::{MsgtmError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

static SERVICE_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-zA-Z0-9-]+)-v(\d+)\.(\d+)\.(\d+)$").expect("valid service tag regex")
});

static SERVICE_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9-]+$").expect("valid service name regex"));

static SERVICE_TAG_WITHOUT_V_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-zA-Z0-9-]+)-(\d+)\.(\d+)\.(\d+)$").expect("valid service tag regex")
});

/// Identifier of one service in the repository
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceName(String);

impl ServiceName {
    pub fn new(name: impl Into<String>) -> Self {
        ServiceName(name.into())
    }

    /// A name that can appear in a service tag
    pub fn parse(name: &str) -> Result<Self> {
        let name = name.trim();
        if SERVICE_NAME_RE.is_match(name) {
            Ok(ServiceName::new(name))
        } else {
            Err(MsgtmError::InvalidServiceName(name.to_string()))
        }
    }

    pub fn is_valid(&self) -> bool {
        SERVICE_NAME_RE.is_match(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ServiceName {
    fn from(name: &str) -> Self {
        ServiceName::new(name)
    }
}

impl From<String> for ServiceName {
    fn from(name: String) -> Self {
        ServiceName(name)
    }
}

/// A tag name exactly as the repository reports it
///
/// May or may not encode a service tag; non-service tags share the same
/// namespace.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RawTag(String);

impl RawTag {
    pub fn new(name: impl Into<String>) -> Self {
        RawTag(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_service_tag(&self) -> Result<ServiceTag> {
        ServiceTag::parse(&self.0)
    }
}

impl fmt::Display for RawTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RawTag {
    fn from(name: &str) -> Self {
        RawTag::new(name)
    }
}

impl From<String> for RawTag {
    fn from(name: String) -> Self {
        RawTag(name)
    }
}

/// A service paired with its semantic version, e.g. `checkout-v1.2.3`
///
/// Ordering compares versions first and only falls back to the service
/// name to stay consistent with `Eq`; within one service family it is the
/// plain version order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServiceTag {
    pub service: ServiceName,
    pub version: SemVer,
}

impl ServiceTag {
    pub fn new(service: impl Into<ServiceName>, version: SemVer) -> Self {
        ServiceTag {
            service: service.into(),
            version,
        }
    }

    /// Parse `NAME-vX.Y.Z` or `NAME-X.Y.Z`
    ///
    /// The name is everything before the final version suffix. Service
    /// names cannot contain dots, so that split is unique even for
    /// hyphenated names such as `api-v2-v1.0.0`.
    pub fn parse(raw: &str) -> Result<Self> {
        let captures = SERVICE_TAG_RE
            .captures(raw)
            .or_else(|| SERVICE_TAG_WITHOUT_V_RE.captures(raw))
            .ok_or_else(|| MsgtmError::InvalidServiceTagFormat(raw.to_string()))?;

        let version = SemVer::parse(&format!("{}.{}.{}", &captures[2], &captures[3], &captures[4]))
            .map_err(|_| MsgtmError::InvalidServiceTagFormat(raw.to_string()))?;

        Ok(ServiceTag::new(&captures[1], version))
    }

    pub fn bump(&self, bump_type: VersionBump) -> Result<Self> {
        Ok(ServiceTag {
            service: self.service.clone(),
            version: self.version.bump(bump_type)?,
        })
    }

    /// Compare versions only; meaningful for tags of the same service.
    pub fn compare_version(&self, other: &ServiceTag) -> Ordering {
        self.version.cmp(&other.version)
    }

    pub fn to_raw(&self) -> RawTag {
        RawTag(self.to_string())
    }
}

impl Ord for ServiceTag {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare_version(other)
            .then_with(|| self.service.cmp(&other.service))
    }
}

impl PartialOrd for ServiceTag {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ServiceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.service, self.version)
    }
}
