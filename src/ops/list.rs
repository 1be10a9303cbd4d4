use crate::domain::{pair_service_tags, ServiceFilter, ServiceTagInfo};
use crate::error::Result;
use crate::git::TagBackend;

/// Service tags allowed by `filter` with the commit each points at
///
/// Sorted by service name, then ascending version.
pub fn list_service_tags<B: TagBackend>(backend: &B, filter: &ServiceFilter) -> Result<Vec<ServiceTagInfo>> {
    let live_tags = backend.list_all_tags()?;
    let mut pairs = pair_service_tags(&filter.restrict(&live_tags));
    pairs.sort_by(|(_, a), (_, b)| {
        a.service
            .cmp(&b.service)
            .then_with(|| a.compare_version(b))
    });

    pairs
        .into_iter()
        .map(|(raw, tag)| {
            let commit_id = backend.find_commit_for_tag(&raw)?;
            Ok(ServiceTagInfo::new(tag, commit_id))
        })
        .collect()
}
