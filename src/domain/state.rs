//! Persisted "last known" tag state per service.
//!
//! The on-disk document looks like
//!
//! ```yaml
//! services:
//!   - name: checkout
//!     latest:
//!       tag:
//!         version: v1.0.0
//!       commitId: 3f2a9c1
//!       description: first release
//!     prev: null
//! ```
//!
//! A tag stores only its version; its service is the enclosing entry's name.

use crate::domain::commit::CommitId;
use crate::domain::tag::{ServiceName, ServiceTag};
use crate::domain::version::SemVer;
use crate::error::{MsgtmError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::io::{Read, Write};
use std::path::Path;
use std::str::FromStr;

/// One point-in-time record linking a service tag to the commit it marks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceTagInfo {
    pub tag: ServiceTag,
    pub commit_id: CommitId,
    pub description: Option<String>,
    pub commit_comment: Option<String>,
}

impl ServiceTagInfo {
    pub fn new(tag: ServiceTag, commit_id: CommitId) -> Self {
        ServiceTagInfo {
            tag,
            commit_id,
            description: None,
            commit_comment: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_commit_comment(mut self, comment: impl Into<String>) -> Self {
        self.commit_comment = Some(comment.into());
        self
    }
}

/// Latest and previous tag of one service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceTagState {
    pub name: ServiceName,
    pub latest: Option<ServiceTagInfo>,
    pub prev: Option<ServiceTagInfo>,
}

impl ServiceTagState {
    pub fn new(name: ServiceName) -> Self {
        ServiceTagState {
            name,
            latest: None,
            prev: None,
        }
    }

    /// Shift the current latest into prev and install `info` as latest.
    ///
    /// The stored tag always belongs to this entry's service.
    pub fn update_latest(&mut self, info: ServiceTagInfo) {
        let info = self.owned(info);
        self.prev = self.latest.replace(info);
    }

    pub fn set_prev(&mut self, prev: Option<ServiceTagInfo>) {
        self.prev = prev.map(|info| self.owned(info));
    }

    fn owned(&self, mut info: ServiceTagInfo) -> ServiceTagInfo {
        if info.tag.service != self.name {
            info.tag.service = self.name.clone();
        }
        info
    }
}

/// Encoding of a state file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateFormat {
    #[default]
    Yaml,
    Json,
}

impl StateFormat {
    /// `.json` files are JSON, everything else is YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => StateFormat::Json,
            _ => StateFormat::Yaml,
        }
    }
}

impl FromStr for StateFormat {
    type Err = MsgtmError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "yaml" | "yml" => Ok(StateFormat::Yaml),
            "json" => Ok(StateFormat::Json),
            other => Err(MsgtmError::config(format!(
                "Unknown state format '{}' - expected yaml or json",
                other
            ))),
        }
    }
}

/// Per-service tag state, at most one entry per service name
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TrackedState {
    services: Vec<ServiceTagState>,
}

impl TrackedState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed entries with neither latest nor prev set
    pub fn with_services<I>(names: I) -> Self
    where
        I: IntoIterator<Item = ServiceName>,
    {
        let mut state = TrackedState::new();
        for name in names {
            state.entry_mut(&name);
        }
        state
    }

    pub fn services(&self) -> &[ServiceTagState] {
        &self.services
    }

    pub fn service_names(&self) -> Vec<ServiceName> {
        self.services.iter().map(|s| s.name.clone()).collect()
    }

    pub fn get(&self, name: &ServiceName) -> Option<&ServiceTagState> {
        self.services.iter().find(|s| &s.name == name)
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// Record `info` as the newest tag of `name`.
    ///
    /// Inserts the entry when missing; otherwise the previous latest moves
    /// into prev.
    pub fn update(&mut self, name: &ServiceName, info: ServiceTagInfo) -> &ServiceTagState {
        let entry = self.entry_mut(name);
        entry.update_latest(info);
        entry
    }

    /// Overwrite the prev slot of `name`, inserting the entry when missing.
    pub fn set_prev(&mut self, name: &ServiceName, prev: Option<ServiceTagInfo>) {
        self.entry_mut(name).set_prev(prev);
    }

    fn entry_mut(&mut self, name: &ServiceName) -> &mut ServiceTagState {
        let index = match self.services.iter().position(|s| &s.name == name) {
            Some(index) => index,
            None => {
                self.services.push(ServiceTagState::new(name.clone()));
                self.services.len() - 1
            }
        };
        &mut self.services[index]
    }

    pub fn read<R: Read>(mut reader: R, format: StateFormat) -> Result<Self> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        Self::from_str_with(&content, format)
    }

    pub fn write<W: Write>(&self, writer: W, format: StateFormat) -> Result<()> {
        let document = StateDocument::from(self);
        match format {
            StateFormat::Yaml => serde_yaml::to_writer(writer, &document)?,
            StateFormat::Json => serde_json::to_writer(writer, &document)?,
        }
        Ok(())
    }

    pub fn from_str_with(content: &str, format: StateFormat) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(TrackedState::new());
        }
        let document: StateDocument = match format {
            StateFormat::Yaml => serde_yaml::from_str(content)?,
            StateFormat::Json => serde_json::from_str(content)?,
        };
        TrackedState::try_from(document)
    }

    /// Read a state file; format follows the extension unless given.
    pub fn load(path: &Path, format: Option<StateFormat>) -> Result<Self> {
        let format = format.unwrap_or_else(|| StateFormat::from_path(path));
        let content = fs::read_to_string(path).map_err(|e| {
            MsgtmError::state(format!("Cannot read state file '{}': {}", path.display(), e))
        })?;
        Self::from_str_with(&content, format)
    }

    /// Serialize fully before touching the file so a failure leaves it intact.
    pub fn save(&self, path: &Path, format: Option<StateFormat>) -> Result<()> {
        let format = format.unwrap_or_else(|| StateFormat::from_path(path));
        let mut buffer = Vec::new();
        self.write(&mut buffer, format)?;
        fs::write(path, buffer).map_err(|e| {
            MsgtmError::state(format!("Cannot write state file '{}': {}", path.display(), e))
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct StateDocument {
    #[serde(default)]
    services: Vec<ServiceEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ServiceEntry {
    name: ServiceName,
    #[serde(default)]
    latest: Option<InfoEntry>,
    #[serde(default)]
    prev: Option<InfoEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InfoEntry {
    tag: TagEntry,
    commit_id: CommitId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    commit_comment: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TagEntry {
    version: SemVer,
}

impl From<&ServiceTagInfo> for InfoEntry {
    fn from(info: &ServiceTagInfo) -> Self {
        InfoEntry {
            tag: TagEntry {
                version: info.tag.version,
            },
            commit_id: info.commit_id.clone(),
            description: info.description.clone(),
            commit_comment: info.commit_comment.clone(),
        }
    }
}

impl InfoEntry {
    fn into_info(self, name: &ServiceName) -> ServiceTagInfo {
        ServiceTagInfo {
            tag: ServiceTag::new(name.clone(), self.tag.version),
            commit_id: self.commit_id,
            description: self.description,
            commit_comment: self.commit_comment,
        }
    }
}

impl From<&TrackedState> for StateDocument {
    fn from(state: &TrackedState) -> Self {
        StateDocument {
            services: state
                .services
                .iter()
                .map(|s| ServiceEntry {
                    name: s.name.clone(),
                    latest: s.latest.as_ref().map(InfoEntry::from),
                    prev: s.prev.as_ref().map(InfoEntry::from),
                })
                .collect(),
        }
    }
}

impl TryFrom<StateDocument> for TrackedState {
    type Error = MsgtmError;

    fn try_from(document: StateDocument) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut services = Vec::with_capacity(document.services.len());
        for entry in document.services {
            if !seen.insert(entry.name.clone()) {
                return Err(MsgtmError::state(format!(
                    "Duplicate entry for service '{}'",
                    entry.name
                )));
            }
            services.push(ServiceTagState {
                latest: entry.latest.map(|info| info.into_info(&entry.name)),
                prev: entry.prev.map(|info| info.into_info(&entry.name)),
                name: entry.name,
            });
        }
        Ok(TrackedState { services })
    }
}
