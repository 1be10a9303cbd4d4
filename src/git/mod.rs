//! Tag backend abstraction layer
//!
//! Every repository side effect msgtm performs goes through the
//! [TagBackend] trait, so orchestration code never talks to git directly.
//!
//! # Overview
//!
//! - [repository::Git2Backend]: the real implementation using the `git2` crate
//! - [mock::MockBackend]: an in-memory implementation for testing
//! - [observed::LoggingBackend]: a decorator that traces every call of an
//!   inner backend
//!
//! # Usage
//!
//! ```rust
//! # use msgtm::git::{MockBackend, TagBackend};
//! # use msgtm::domain::CommitId;
//! # fn example() -> msgtm::Result<()> {
//! let backend = MockBackend::new().with_commit("c1", &["checkout-v1.0.0"]);
//! let tags = backend.show_tags_at_commit(&CommitId::new("c1"))?;
//! assert_eq!(tags.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod observed;
pub mod repository;

pub use mock::MockBackend;
pub use observed::LoggingBackend;
pub use repository::Git2Backend;

use crate::domain::{CommitId, RawTag, RemoteAddr};
use crate::error::Result;

/// Tag operations against a repository
///
/// ## Error Handling
///
/// All methods return [crate::error::Result<T>]. Implementations map their
/// underlying failures (like `git2::Error`) to [crate::error::MsgtmError]
/// variants; callers propagate them unmodified.
///
/// ## Implementations
///
/// - [Git2Backend](repository::Git2Backend): libgit2 through the `git2` crate
/// - [MockBackend](mock::MockBackend): in-memory test double
/// - [LoggingBackend](observed::LoggingBackend): tracing decorator
pub trait TagBackend {
    /// Get all tags in the repository
    ///
    /// # Returns
    /// * `Ok(Vec<RawTag>)` - Every tag name, service tag or not
    /// * `Err` - If the tag list cannot be read
    fn list_all_tags(&self) -> Result<Vec<RawTag>>;

    /// Get the tags pointing at a commit
    ///
    /// Annotated tags count when they peel to the commit.
    ///
    /// # Arguments
    /// * `commit_id` - Any revision that resolves to a commit (e.g. "HEAD")
    fn show_tags_at_commit(&self, commit_id: &CommitId) -> Result<Vec<RawTag>>;

    /// Resolve the commit a tag points at
    ///
    /// # Returns
    /// * `Ok(CommitId)` - Full hash of the tagged commit
    /// * `Err(MsgtmError::NotFound)` - If the tag does not exist
    fn find_commit_for_tag(&self, tag: &RawTag) -> Result<CommitId>;

    /// Create a tag at a commit
    ///
    /// Annotated when `message` is given, lightweight otherwise. Fails if the
    /// tag already exists.
    fn create_tag(&self, commit_id: &CommitId, tag: &str, message: Option<&str>) -> Result<()>;

    /// Delete a local tag
    ///
    /// With `force`, a tag that does not exist is not an error.
    fn delete_local_tag(&self, tag: &str, force: bool) -> Result<()>;

    /// Delete tags on a remote
    fn delete_remote_tag(&self, remote: &RemoteAddr, tags: &[&str]) -> Result<()>;

    /// Push tags to a remote
    ///
    /// # Example
    /// ```rust
    /// # use msgtm::git::{MockBackend, TagBackend};
    /// # use msgtm::domain::RemoteAddr;
    /// # fn example() -> msgtm::Result<()> {
    /// let backend = MockBackend::new().with_commit("c1", &["checkout-v1.0.0"]);
    /// backend.push_tags(&RemoteAddr::origin(), &["checkout-v1.0.0"])?;
    /// # Ok(())
    /// # }
    /// ```
    fn push_tags(&self, remote: &RemoteAddr, tags: &[&str]) -> Result<()>;
}

impl<B: TagBackend + ?Sized> TagBackend for &B {
    fn list_all_tags(&self) -> Result<Vec<RawTag>> {
        (**self).list_all_tags()
    }

    fn show_tags_at_commit(&self, commit_id: &CommitId) -> Result<Vec<RawTag>> {
        (**self).show_tags_at_commit(commit_id)
    }

    fn find_commit_for_tag(&self, tag: &RawTag) -> Result<CommitId> {
        (**self).find_commit_for_tag(tag)
    }

    fn create_tag(&self, commit_id: &CommitId, tag: &str, message: Option<&str>) -> Result<()> {
        (**self).create_tag(commit_id, tag, message)
    }

    fn delete_local_tag(&self, tag: &str, force: bool) -> Result<()> {
        (**self).delete_local_tag(tag, force)
    }

    fn delete_remote_tag(&self, remote: &RemoteAddr, tags: &[&str]) -> Result<()> {
        (**self).delete_remote_tag(remote, tags)
    }

    fn push_tags(&self, remote: &RemoteAddr, tags: &[&str]) -> Result<()> {
        (**self).push_tags(remote, tags)
    }
}
