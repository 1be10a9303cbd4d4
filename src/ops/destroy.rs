//! Ways to remove service tags, composable into one ordered pipeline.

use crate::domain::{RawTag, RemoteAddr};
use crate::error::Result;
use crate::git::TagBackend;
use tracing::{info, warn};

/// Removes a set of tags from one place
pub trait DestroyServiceTags {
    fn destroy(&self, tags: &[RawTag]) -> Result<()>;
}

/// Deletes tags from the local repository, one at a time
pub struct LocalDestroyer<'a, B> {
    backend: &'a B,
    force: bool,
}

impl<'a, B: TagBackend> LocalDestroyer<'a, B> {
    pub fn new(backend: &'a B, force: bool) -> Self {
        LocalDestroyer { backend, force }
    }
}

impl<B: TagBackend> DestroyServiceTags for LocalDestroyer<'_, B> {
    fn destroy(&self, tags: &[RawTag]) -> Result<()> {
        for tag in tags {
            self.backend.delete_local_tag(tag.as_str(), self.force)?;
            info!(tag = %tag, "deleted local tag");
        }
        Ok(())
    }
}

/// Deletes tags on a remote in a single push
pub struct RemoteDestroyer<'a, B> {
    backend: &'a B,
    remote: RemoteAddr,
}

impl<'a, B: TagBackend> RemoteDestroyer<'a, B> {
    pub fn new(backend: &'a B, remote: RemoteAddr) -> Self {
        RemoteDestroyer { backend, remote }
    }
}

impl<B: TagBackend> DestroyServiceTags for RemoteDestroyer<'_, B> {
    fn destroy(&self, tags: &[RawTag]) -> Result<()> {
        if tags.is_empty() {
            return Ok(());
        }
        let names: Vec<&str> = tags.iter().map(RawTag::as_str).collect();
        self.backend.delete_remote_tag(&self.remote, &names)?;
        info!(remote = %self.remote, count = names.len(), "deleted remote tags");
        Ok(())
    }
}

/// Runs destroyers in order; the first failure stops the rest
#[derive(Default)]
pub struct CompositeDestroyer<'a> {
    steps: Vec<Box<dyn DestroyServiceTags + 'a>>,
}

impl<'a> CompositeDestroyer<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, step: impl DestroyServiceTags + 'a) {
        self.steps.push(Box::new(step));
    }

    pub fn with(mut self, step: impl DestroyServiceTags + 'a) -> Self {
        self.push(step);
        self
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl DestroyServiceTags for CompositeDestroyer<'_> {
    fn destroy(&self, tags: &[RawTag]) -> Result<()> {
        if self.steps.is_empty() {
            warn!("no destroy step configured, tags are kept");
        }
        for step in &self.steps {
            step.destroy(tags)?;
        }
        Ok(())
    }
}
