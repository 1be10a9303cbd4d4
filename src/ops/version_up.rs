use crate::domain::{bump_all, CommitId, RawTag, ServiceFilter, ServiceName, ServiceTag, VersionBump};
use crate::error::Result;
use crate::git::TagBackend;
use crate::ops::{apply_tags, TagAnnotation};
use tracing::{info, warn};

/// Next tag of every service not in `excluded`
///
/// An empty `excluded` list keeps every service.
pub fn plan_version_up(
    live_tags: &[RawTag],
    bump_type: VersionBump,
    excluded: &[ServiceName],
) -> Vec<ServiceTag> {
    let kept = ServiceFilter::Except(excluded.to_vec()).restrict(live_tags);
    bump_all(&kept, bump_type)
}

/// Bump every service's highest tag and tag the result at `commit_id`.
pub fn version_up_all_service_tags<B: TagBackend>(
    backend: &B,
    commit_id: &CommitId,
    bump_type: VersionBump,
    excluded: &[ServiceName],
    annotation: &TagAnnotation,
    dry_run: bool,
) -> Result<Vec<ServiceTag>> {
    let live_tags = backend.list_all_tags()?;
    let tags = plan_version_up(&live_tags, bump_type, excluded);

    if tags.is_empty() {
        warn!("no service tags found to bump");
        return Ok(tags);
    }
    info!(bump = %bump_type, count = tags.len(), "planned version up");
    if dry_run {
        return Ok(tags);
    }

    apply_tags(backend, commit_id, &tags, annotation)?;
    Ok(tags)
}
