//! Tag operations
//!
//! Each operation is split in two: a pure `plan_*` function that decides
//! which tags are affected, and an executing function that applies the plan
//! through a [TagBackend](crate::git::TagBackend). With `dry_run` the
//! executing function stops after planning.

pub mod create;
pub mod destroy;
pub mod init;
pub mod list;
pub mod push;
pub mod reset;
pub mod sync;
pub mod version_up;

pub use create::{create_service_tags, load_service_names, plan_service_tags};
pub use destroy::{CompositeDestroyer, DestroyServiceTags, LocalDestroyer, RemoteDestroyer};
pub use init::init_state_file;
pub use list::list_service_tags;
pub use push::{plan_push, push_all};
pub use reset::{plan_reset, reset_service_tags};
pub use sync::{sync_state, sync_state_file};
pub use version_up::{plan_version_up, version_up_all_service_tags};

use crate::domain::{CommitId, ServiceTag};
use crate::error::Result;
use crate::git::TagBackend;
use tracing::info;

/// Message template used for annotated tags when none is configured
pub const DEFAULT_TAG_MESSAGE: &str = "Add {tag} tags to {commit}";

/// How new tags are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagAnnotation {
    Lightweight,
    /// Annotated with a message template; `{tag}` and `{commit}` are
    /// substituted
    Annotated(String),
}

impl Default for TagAnnotation {
    fn default() -> Self {
        TagAnnotation::Annotated(DEFAULT_TAG_MESSAGE.to_string())
    }
}

impl TagAnnotation {
    /// The tag message, or `None` for a lightweight tag
    pub fn render(&self, tag: &ServiceTag, commit_id: &CommitId) -> Option<String> {
        match self {
            TagAnnotation::Lightweight => None,
            TagAnnotation::Annotated(template) => Some(
                template
                    .replace("{tag}", &tag.to_string())
                    .replace("{commit}", commit_id.as_str()),
            ),
        }
    }
}

/// Create every tag in `tags` at `commit_id`; the first failure aborts.
pub(crate) fn apply_tags<B: TagBackend>(
    backend: &B,
    commit_id: &CommitId,
    tags: &[ServiceTag],
    annotation: &TagAnnotation,
) -> Result<()> {
    for tag in tags {
        let message = annotation.render(tag, commit_id);
        backend.create_tag(commit_id, &tag.to_string(), message.as_deref())?;
        info!(tag = %tag, commit = %commit_id, "created tag");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SemVer;

    #[test]
    fn test_render_default_message() {
        let tag = ServiceTag::new("checkout", SemVer::new(1, 2, 3));
        assert_eq!(
            TagAnnotation::default().render(&tag, &CommitId::head()),
            Some("Add checkout-v1.2.3 tags to HEAD".to_string())
        );
    }

    #[test]
    fn test_render_lightweight() {
        let tag = ServiceTag::new("checkout", SemVer::new(1, 2, 3));
        assert_eq!(TagAnnotation::Lightweight.render(&tag, &CommitId::head()), None);
    }

    #[test]
    fn test_render_custom_template() {
        let tag = ServiceTag::new("api", SemVer::new(0, 1, 0));
        let annotation = TagAnnotation::Annotated("release {tag}".to_string());
        assert_eq!(
            annotation.render(&tag, &CommitId::new("abc123")),
            Some("release api-v0.1.0".to_string())
        );
    }
}
