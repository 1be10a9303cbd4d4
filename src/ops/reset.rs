use crate::domain::{pair_service_tags, CommitId, RawTag, ServiceTag};
use crate::error::Result;
use crate::git::TagBackend;
use crate::ops::DestroyServiceTags;
use tracing::{info, warn};

/// Service tags among the tags on a commit, with their repository names
///
/// Non-service tags on the same commit are never touched.
pub fn plan_reset(tags_on_commit: &[RawTag]) -> Vec<(RawTag, ServiceTag)> {
    pair_service_tags(tags_on_commit)
}

/// Remove every service tag pointing at `commit_id` through `destroyer`.
///
/// Where the tags are removed (locally, on a remote, or both, in which
/// order) is decided by the destroyer.
pub fn reset_service_tags<B, D>(
    backend: &B,
    destroyer: &D,
    commit_id: &CommitId,
    dry_run: bool,
) -> Result<Vec<ServiceTag>>
where
    B: TagBackend,
    D: DestroyServiceTags + ?Sized,
{
    let tags_on_commit = backend.show_tags_at_commit(commit_id)?;
    let (raw, tags): (Vec<RawTag>, Vec<ServiceTag>) = plan_reset(&tags_on_commit).into_iter().unzip();

    if tags.is_empty() {
        warn!(commit = %commit_id, "no service tags on commit");
        return Ok(tags);
    }
    if dry_run {
        info!(commit = %commit_id, count = tags.len(), "dry run, no tags removed");
        return Ok(tags);
    }

    destroyer.destroy(&raw)?;
    Ok(tags)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RemoteAddr, SemVer};
    use crate::git::MockBackend;
    use crate::ops::{CompositeDestroyer, LocalDestroyer, RemoteDestroyer};

    #[test]
    fn test_reset_local_only() {
        let backend = MockBackend::new()
            .with_commit("c1", &["a-v1.0.0"])
            .with_commit("c2", &["a-v1.1.0", "b-1.0.0", "normal-tag"]);
        let destroyer = LocalDestroyer::new(&backend, false);

        let removed = reset_service_tags(&backend, &destroyer, &CommitId::head(), false).unwrap();

        assert_eq!(
            removed,
            vec![
                ServiceTag::new("a", SemVer::new(1, 1, 0)),
                ServiceTag::new("b", SemVer::new(1, 0, 0)),
            ]
        );
        assert_eq!(
            backend.tag_names(),
            vec!["a-v1.0.0".to_string(), "normal-tag".to_string()]
        );
    }

    #[test]
    fn test_reset_remote_then_local() {
        let backend = MockBackend::new()
            .with_commit("c1", &["a-v1.0.0"])
            .with_remote("origin", &["a-v1.0.0"]);
        let destroyer = CompositeDestroyer::new()
            .with(RemoteDestroyer::new(&backend, RemoteAddr::origin()))
            .with(LocalDestroyer::new(&backend, false));

        reset_service_tags(&backend, &destroyer, &CommitId::new("c1"), false).unwrap();

        assert!(backend.tag_names().is_empty());
        assert!(backend.remote_tags("origin").is_empty());
        assert_eq!(
            backend.calls(),
            vec![
                "show_tags_at_commit".to_string(),
                "delete_remote_tag".to_string(),
                "delete_local_tag".to_string(),
            ]
        );
    }

    #[test]
    fn test_reset_commit_without_service_tags() {
        let backend = MockBackend::new().with_commit("c1", &["normal-tag"]);
        let destroyer = LocalDestroyer::new(&backend, false);
        let removed = reset_service_tags(&backend, &destroyer, &CommitId::head(), false).unwrap();
        assert!(removed.is_empty());
        assert_eq!(backend.tag_names(), vec!["normal-tag".to_string()]);
    }

    #[test]
    fn test_reset_dry_run() {
        let backend = MockBackend::new().with_commit("c1", &["a-v1.0.0"]);
        let destroyer = LocalDestroyer::new(&backend, false);
        let removed = reset_service_tags(&backend, &destroyer, &CommitId::head(), true).unwrap();
        assert_eq!(removed.len(), 1);
        assert_eq!(backend.tag_names(), vec!["a-v1.0.0".to_string()]);
    }

    #[test]
    fn test_reset_unknown_commit() {
        let backend = MockBackend::new().with_commit("c1", &["a-v1.0.0"]);
        let destroyer = LocalDestroyer::new(&backend, false);
        assert!(reset_service_tags(&backend, &destroyer, &CommitId::new("nope"), false).is_err());
    }
}
