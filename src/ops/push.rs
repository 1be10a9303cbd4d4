use crate::domain::{pair_service_tags, CommitId, RawTag, RemoteAddr, ServiceTag};
use crate::error::Result;
use crate::git::TagBackend;
use tracing::{info, warn};

/// Service tags among the tags on a commit, with their repository names
pub fn plan_push(tags_on_commit: &[RawTag]) -> Vec<(RawTag, ServiceTag)> {
    pair_service_tags(tags_on_commit)
}

/// Push every service tag at `commit_id` to `remote` in one push.
pub fn push_all<B: TagBackend>(
    backend: &B,
    remote: &RemoteAddr,
    commit_id: &CommitId,
    dry_run: bool,
) -> Result<Vec<ServiceTag>> {
    let tags_on_commit = backend.show_tags_at_commit(commit_id)?;
    let (raw, tags): (Vec<RawTag>, Vec<ServiceTag>) = plan_push(&tags_on_commit).into_iter().unzip();

    if tags.is_empty() {
        warn!(commit = %commit_id, "no service tags to push");
        return Ok(tags);
    }
    if dry_run {
        info!(remote = %remote, count = tags.len(), "dry run, nothing pushed");
        return Ok(tags);
    }

    let names: Vec<&str> = raw.iter().map(RawTag::as_str).collect();
    backend.push_tags(remote, &names)?;
    info!(remote = %remote, count = names.len(), "pushed tags");
    Ok(tags)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::MockBackend;

    #[test]
    fn test_push_service_tags_only() {
        let backend = MockBackend::new()
            .with_commit("c1", &["a-v1.0.0", "b-2.0.0", "normal-tag"])
            .with_remote("origin", &[]);

        let pushed = push_all(&backend, &RemoteAddr::origin(), &CommitId::head(), false).unwrap();

        assert_eq!(pushed.len(), 2);
        assert_eq!(
            backend.remote_tags("origin"),
            vec!["a-v1.0.0".to_string(), "b-2.0.0".to_string()]
        );
    }

    #[test]
    fn test_push_nothing_skips_backend_push() {
        let backend = MockBackend::new()
            .with_commit("c1", &["normal-tag"])
            .with_remote("origin", &[]);
        let pushed = push_all(&backend, &RemoteAddr::origin(), &CommitId::head(), false).unwrap();
        assert!(pushed.is_empty());
        assert_eq!(backend.calls(), vec!["show_tags_at_commit".to_string()]);
    }

    #[test]
    fn test_push_dry_run() {
        let backend = MockBackend::new()
            .with_commit("c1", &["a-v1.0.0"])
            .with_remote("origin", &[]);
        push_all(&backend, &RemoteAddr::origin(), &CommitId::head(), true).unwrap();
        assert!(backend.remote_tags("origin").is_empty());
    }

    #[test]
    fn test_push_failure_propagates() {
        let backend = MockBackend::new()
            .with_commit("c1", &["a-v1.0.0"])
            .with_remote("origin", &[])
            .failing_on("push_tags");
        assert!(push_all(&backend, &RemoteAddr::origin(), &CommitId::head(), false).is_err());
    }
}
