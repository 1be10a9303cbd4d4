//! Reconciles a [TrackedState] with the tags that exist in the repository.
//!
//! For each service with service tags, the highest version becomes
//! `latest` and the next lower one `prev`. Services whose tags have all
//! disappeared keep their recorded entries.

use crate::domain::{
    pair_service_tags, sort_by_service_then_version, CommitId, RawTag, ServiceTag, ServiceTagInfo,
    StateFormat, TrackedState,
};
use crate::error::Result;
use crate::git::TagBackend;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

/// Apply the live tag set to `state`.
///
/// `commit_lookup` resolves a tag to its commit; it is called at most twice
/// per service. Its first error aborts the sync and is returned unchanged.
/// A version that the state already recorded keeps its `description` and
/// `commitComment`.
pub fn sync_state<F>(mut state: TrackedState, live_tags: &[RawTag], mut commit_lookup: F) -> Result<TrackedState>
where
    F: FnMut(&RawTag) -> Result<CommitId>,
{
    let pairs = pair_service_tags(live_tags);
    let mut raw_names: HashMap<ServiceTag, RawTag> = HashMap::with_capacity(pairs.len());
    let mut tags = Vec::with_capacity(pairs.len());
    for (raw, tag) in pairs {
        raw_names.entry(tag.clone()).or_insert(raw);
        tags.push(tag);
    }

    for (service, mut group) in sort_by_service_then_version(tags) {
        // `svc-1.2.3` and `svc-v1.2.3` are one version
        group.dedup();

        let previous = state.get(&service).cloned();
        let mut resolve = |tag: &ServiceTag| -> Result<ServiceTagInfo> {
            let raw = raw_names.get(tag).cloned().unwrap_or_else(|| tag.to_raw());
            let commit_id = commit_lookup(&raw)?;
            let mut info = ServiceTagInfo::new(tag.clone(), commit_id);
            if let Some(recorded) = previous
                .iter()
                .flat_map(|s| s.latest.iter().chain(s.prev.iter()))
                .find(|recorded| &recorded.tag == tag)
            {
                info.description = recorded.description.clone();
                info.commit_comment = recorded.commit_comment.clone();
            }
            Ok(info)
        };

        let latest = match group.last() {
            Some(tag) => resolve(tag)?,
            None => continue,
        };
        let prev = match group.len() {
            0 | 1 => None,
            n => Some(resolve(&group[n - 2])?),
        };

        debug!(
            service = %service,
            latest = %latest.tag,
            prev = ?prev.as_ref().map(|p| &p.tag),
            "synced service"
        );
        state.update(&service, latest);
        state.set_prev(&service, prev);
    }

    Ok(state)
}

/// Sync the state file at `path` against `backend` and write it back.
///
/// A missing file counts as an empty state. Nothing is written when the
/// sync fails.
pub fn sync_state_file<B: TagBackend>(
    backend: &B,
    path: &Path,
    format: Option<StateFormat>,
) -> Result<TrackedState> {
    let state = if path.exists() {
        TrackedState::load(path, format)?
    } else {
        debug!(path = %path.display(), "state file missing, starting empty");
        TrackedState::new()
    };

    let live_tags = backend.list_all_tags()?;
    let synced = sync_state(state, &live_tags, |raw| backend.find_commit_for_tag(raw))?;

    synced.save(path, format)?;
    info!(path = %path.display(), services = synced.len(), "state file synced");
    Ok(synced)
}
