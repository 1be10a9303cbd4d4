//! Domain logic - pure tag rules independent of git operations

pub mod commit;
pub mod reconcile;
pub mod state;
pub mod tag;
pub mod version;

pub use commit::{CommitId, RemoteAddr, HEAD, ORIGIN};
pub use reconcile::{
    bump_all, filter_service_tags, pair_service_tags, sort_by_service_then_version, ServiceFilter,
};
pub use state::{ServiceTagInfo, ServiceTagState, StateFormat, TrackedState};
pub use tag::{RawTag, ServiceName, ServiceTag};
pub use version::{SemVer, VersionBump};
