use crate::domain::{ServiceName, StateFormat, TrackedState};
use crate::error::{MsgtmError, Result};
use std::path::Path;
use tracing::info;

/// Write a fresh state file listing `service_names` with no tags recorded.
///
/// An existing file is only replaced with `force`.
pub fn init_state_file(
    path: &Path,
    service_names: &[ServiceName],
    format: Option<StateFormat>,
    force: bool,
) -> Result<TrackedState> {
    if path.exists() && !force {
        return Err(MsgtmError::state(format!(
            "'{}' already exists, use --force to overwrite",
            path.display()
        )));
    }

    let state = TrackedState::with_services(service_names.iter().cloned());
    state.save(path, format)?;
    info!(path = %path.display(), services = state.len(), "initialized state file");
    Ok(state)
}
