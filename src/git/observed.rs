use crate::domain::{CommitId, RawTag, RemoteAddr};
use crate::error::Result;
use crate::git::TagBackend;
use tracing::{debug, error};

/// Decorator that traces every call made to an inner backend
///
/// Each operation is logged at debug level before and after it runs;
/// failures are logged at error level and returned unchanged.
pub struct LoggingBackend<B> {
    inner: B,
}

impl<B: TagBackend> LoggingBackend<B> {
    pub fn new(inner: B) -> Self {
        LoggingBackend { inner }
    }

    pub fn inner(&self) -> &B {
        &self.inner
    }

    pub fn into_inner(self) -> B {
        self.inner
    }
}

fn observe<T>(operation: &str, result: Result<T>) -> Result<T> {
    match &result {
        Ok(_) => debug!(operation, "git operation succeeded"),
        Err(e) => error!(operation, error = %e, "git operation failed"),
    }
    result
}

impl<B: TagBackend> TagBackend for LoggingBackend<B> {
    fn list_all_tags(&self) -> Result<Vec<RawTag>> {
        debug!("listing all tags");
        let result = self.inner.list_all_tags();
        if let Ok(tags) = &result {
            debug!(count = tags.len(), "found tags");
        }
        observe("list_all_tags", result)
    }

    fn show_tags_at_commit(&self, commit_id: &CommitId) -> Result<Vec<RawTag>> {
        debug!(commit = %commit_id, "showing tags at commit");
        let result = self.inner.show_tags_at_commit(commit_id);
        if let Ok(tags) = &result {
            debug!(commit = %commit_id, count = tags.len(), "found tags at commit");
        }
        observe("show_tags_at_commit", result)
    }

    fn find_commit_for_tag(&self, tag: &RawTag) -> Result<CommitId> {
        debug!(tag = %tag, "resolving tag commit");
        observe("find_commit_for_tag", self.inner.find_commit_for_tag(tag))
    }

    fn create_tag(&self, commit_id: &CommitId, tag: &str, message: Option<&str>) -> Result<()> {
        debug!(commit = %commit_id, tag, annotated = message.is_some(), "creating tag");
        observe("create_tag", self.inner.create_tag(commit_id, tag, message))
    }

    fn delete_local_tag(&self, tag: &str, force: bool) -> Result<()> {
        debug!(tag, force, "deleting local tag");
        observe("delete_local_tag", self.inner.delete_local_tag(tag, force))
    }

    fn delete_remote_tag(&self, remote: &RemoteAddr, tags: &[&str]) -> Result<()> {
        debug!(remote = %remote, ?tags, "deleting remote tags");
        observe("delete_remote_tag", self.inner.delete_remote_tag(remote, tags))
    }

    fn push_tags(&self, remote: &RemoteAddr, tags: &[&str]) -> Result<()> {
        debug!(remote = %remote, ?tags, "pushing tags");
        observe("push_tags", self.inner.push_tags(remote, tags))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MsgtmError;
    use crate::git::MockBackend;

    #[test]
    fn test_logging_backend_delegates() {
        let backend = LoggingBackend::new(MockBackend::new().with_commit("c1", &["a-v1.0.0"]));

        let tags = backend.show_tags_at_commit(&CommitId::head()).unwrap();
        assert_eq!(tags, vec![RawTag::from("a-v1.0.0")]);
        backend.create_tag(&CommitId::head(), "a-v1.1.0", None).unwrap();

        assert_eq!(
            backend.inner().calls(),
            vec!["show_tags_at_commit".to_string(), "create_tag".to_string()]
        );
    }

    #[test]
    fn test_logging_backend_passes_errors_through() {
        let backend = LoggingBackend::new(MockBackend::new().failing_on("push_tags"));
        let result = backend.push_tags(&RemoteAddr::origin(), &["a-v1.0.0"]);
        assert!(matches!(result, Err(MsgtmError::Backend(_))));
    }
}
