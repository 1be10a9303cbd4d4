use crate::domain::{CommitId, RawTag, RemoteAddr, HEAD};
use crate::error::{MsgtmError, Result};
use crate::git::TagBackend;
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// A tag held by [MockBackend]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockTag {
    pub commit: String,
    pub message: Option<String>,
}

/// In-memory backend for testing without a git repository
///
/// Commits are opaque ids; the most recently added commit is `HEAD`.
/// Every trait call is recorded so tests can assert on ordering and
/// round-trip counts.
#[derive(Debug, Default)]
pub struct MockBackend {
    commits: BTreeSet<String>,
    head: Option<String>,
    tags: RefCell<BTreeMap<String, MockTag>>,
    remotes: RefCell<BTreeMap<String, BTreeSet<String>>>,
    failing: HashSet<&'static str>,
    calls: RefCell<Vec<String>>,
}

impl MockBackend {
    /// Create a new empty mock backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a commit carrying lightweight tags; it becomes `HEAD`
    pub fn with_commit(mut self, commit: &str, tags: &[&str]) -> Self {
        self.commits.insert(commit.to_string());
        self.head = Some(commit.to_string());
        for tag in tags {
            self.tags.get_mut().insert(
                tag.to_string(),
                MockTag {
                    commit: commit.to_string(),
                    message: None,
                },
            );
        }
        self
    }

    /// Declare a remote holding the given tags
    pub fn with_remote(mut self, remote: &str, tags: &[&str]) -> Self {
        self.remotes.get_mut().insert(
            remote.to_string(),
            tags.iter().map(|t| t.to_string()).collect(),
        );
        self
    }

    /// Make one trait method fail with a backend error, e.g. `"push_tags"`
    pub fn failing_on(mut self, operation: &'static str) -> Self {
        self.failing.insert(operation);
        self
    }

    pub fn tag_names(&self) -> Vec<String> {
        self.tags.borrow().keys().cloned().collect()
    }

    pub fn tag(&self, name: &str) -> Option<MockTag> {
        self.tags.borrow().get(name).cloned()
    }

    pub fn remote_tags(&self, remote: &str) -> Vec<String> {
        self.remotes
            .borrow()
            .get(remote)
            .map(|tags| tags.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Names of the trait methods called so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn enter(&self, operation: &'static str) -> Result<()> {
        self.calls.borrow_mut().push(operation.to_string());
        if self.failing.contains(operation) {
            return Err(MsgtmError::backend(format!("{} failed", operation)));
        }
        Ok(())
    }

    fn resolve(&self, commit_id: &CommitId) -> Result<String> {
        if commit_id.as_str() == HEAD {
            return self
                .head
                .clone()
                .ok_or_else(|| MsgtmError::not_found("HEAD has no commit"));
        }
        if self.commits.contains(commit_id.as_str()) {
            Ok(commit_id.to_string())
        } else {
            Err(MsgtmError::not_found(format!("commit '{}'", commit_id)))
        }
    }
}

impl TagBackend for MockBackend {
    fn list_all_tags(&self) -> Result<Vec<RawTag>> {
        self.enter("list_all_tags")?;
        Ok(self.tags.borrow().keys().map(|t| RawTag::new(t.as_str())).collect())
    }

    fn show_tags_at_commit(&self, commit_id: &CommitId) -> Result<Vec<RawTag>> {
        self.enter("show_tags_at_commit")?;
        let commit = self.resolve(commit_id)?;
        Ok(self
            .tags
            .borrow()
            .iter()
            .filter(|(_, tag)| tag.commit == commit)
            .map(|(name, _)| RawTag::new(name.as_str()))
            .collect())
    }

    fn find_commit_for_tag(&self, tag: &RawTag) -> Result<CommitId> {
        self.enter("find_commit_for_tag")?;
        self.tags
            .borrow()
            .get(tag.as_str())
            .map(|t| CommitId::new(t.commit.as_str()))
            .ok_or_else(|| MsgtmError::not_found(format!("tag '{}'", tag)))
    }

    fn create_tag(&self, commit_id: &CommitId, tag: &str, message: Option<&str>) -> Result<()> {
        self.enter("create_tag")?;
        let commit = self.resolve(commit_id)?;
        let mut tags = self.tags.borrow_mut();
        if tags.contains_key(tag) {
            return Err(MsgtmError::backend(format!("tag '{}' already exists", tag)));
        }
        tags.insert(
            tag.to_string(),
            MockTag {
                commit,
                message: message.map(str::to_string),
            },
        );
        Ok(())
    }

    fn delete_local_tag(&self, tag: &str, force: bool) -> Result<()> {
        self.enter("delete_local_tag")?;
        if self.tags.borrow_mut().remove(tag).is_none() && !force {
            return Err(MsgtmError::not_found(format!("tag '{}'", tag)));
        }
        Ok(())
    }

    fn delete_remote_tag(&self, remote: &RemoteAddr, tags: &[&str]) -> Result<()> {
        self.enter("delete_remote_tag")?;
        let mut remotes = self.remotes.borrow_mut();
        let remote_tags = remotes
            .get_mut(remote.as_str())
            .ok_or_else(|| MsgtmError::remote(format!("Cannot find remote: {}", remote)))?;
        for tag in tags {
            if !remote_tags.remove(*tag) {
                return Err(MsgtmError::remote(format!(
                    "remote ref does not exist: refs/tags/{}",
                    tag
                )));
            }
        }
        Ok(())
    }

    fn push_tags(&self, remote: &RemoteAddr, tags: &[&str]) -> Result<()> {
        self.enter("push_tags")?;
        let local = self.tags.borrow();
        let mut remotes = self.remotes.borrow_mut();
        let remote_tags = remotes
            .get_mut(remote.as_str())
            .ok_or_else(|| MsgtmError::remote(format!("Cannot find remote: {}", remote)))?;
        for tag in tags {
            if !local.contains_key(*tag) {
                return Err(MsgtmError::remote(format!("src refspec {} does not match any", tag)));
            }
            remote_tags.insert(tag.to_string());
        }
        Ok(())
    }
}
