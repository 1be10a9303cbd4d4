use crate::domain::{CommitId, SemVer, ServiceName, ServiceTag, TrackedState};
use crate::error::{MsgtmError, Result};
use crate::git::TagBackend;
use crate::ops::{apply_tags, TagAnnotation};
use std::path::Path;
use tracing::info;

/// One tag per service at a fixed version
///
/// Existing tags are not consulted. A service listed twice gets one tag.
pub fn plan_service_tags(service_names: &[ServiceName], version: SemVer) -> Vec<ServiceTag> {
    let mut tags: Vec<ServiceTag> = Vec::with_capacity(service_names.len());
    for name in service_names {
        if !tags.iter().any(|tag| &tag.service == name) {
            tags.push(ServiceTag::new(name.clone(), version));
        }
    }
    tags
}

/// Tag every service in `service_names` with `version` at `commit_id`.
///
/// # Returns
/// * `Ok(Vec<ServiceTag>)` - The tags created, or that would be created with `dry_run`
/// * `Err(MsgtmError::InvalidServiceName)` - Before anything is created
/// * `Err` - The first backend failure; tags created before it stay
pub fn create_service_tags<B: TagBackend>(
    backend: &B,
    commit_id: &CommitId,
    service_names: &[ServiceName],
    version: SemVer,
    annotation: &TagAnnotation,
    dry_run: bool,
) -> Result<Vec<ServiceTag>> {
    if let Some(invalid) = service_names.iter().find(|name| !name.is_valid()) {
        return Err(MsgtmError::InvalidServiceName(invalid.to_string()));
    }
    let tags = plan_service_tags(service_names, version);
    if dry_run {
        info!(count = tags.len(), "dry run, no tags created");
        return Ok(tags);
    }
    apply_tags(backend, commit_id, &tags, annotation)?;
    Ok(tags)
}

/// Service names listed in a file of the state-file shape
pub fn load_service_names(path: &Path) -> Result<Vec<ServiceName>> {
    Ok(TrackedState::load(path, None)?.service_names())
}
