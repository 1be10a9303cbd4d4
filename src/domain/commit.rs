use serde::{Deserialize, Serialize};
use std::fmt;

/// Revision the CLI targets when no commit id is given.
pub const HEAD: &str = "HEAD";

/// Remote the CLI talks to when none is given.
pub const ORIGIN: &str = "origin";

/// Identifies a commit (full hash, abbreviated hash, or any revision git understands)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommitId(String);

impl CommitId {
    pub fn new(id: impl Into<String>) -> Self {
        CommitId(id.into())
    }

    pub fn head() -> Self {
        CommitId::new(HEAD)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolve an optional CLI value, falling back to `HEAD`.
    pub fn or_head(id: Option<&str>) -> Self {
        match id {
            Some(id) if !id.trim().is_empty() => CommitId::new(id.trim()),
            _ => CommitId::head(),
        }
    }
}

impl Default for CommitId {
    fn default() -> Self {
        CommitId::head()
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CommitId {
    fn from(id: &str) -> Self {
        CommitId::new(id)
    }
}

/// Name of a git remote
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RemoteAddr(String);

impl RemoteAddr {
    pub fn new(remote: impl Into<String>) -> Self {
        RemoteAddr(remote.into())
    }

    pub fn origin() -> Self {
        RemoteAddr::new(ORIGIN)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RemoteAddr {
    fn default() -> Self {
        RemoteAddr::origin()
    }
}

impl fmt::Display for RemoteAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RemoteAddr {
    fn from(remote: &str) -> Self {
        RemoteAddr::new(remote)
    }
}
