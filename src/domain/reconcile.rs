//! Decisions over an unordered bag of raw tags.
//!
//! Non-service tags share the tag namespace with service tags, so every
//! function here drops tags that fail to parse instead of failing.

use crate::domain::tag::{RawTag, ServiceName, ServiceTag};
use crate::domain::version::VersionBump;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use tracing::warn;

/// Which services an operation looks at
///
/// Services are matched by exact name, never by prefix, so `api` does not
/// select `api-gateway`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ServiceFilter {
    #[default]
    All,
    Only(Vec<ServiceName>),
    Except(Vec<ServiceName>),
}

impl ServiceFilter {
    /// `Only` with an empty list selects nothing; `Except` with an empty
    /// list selects everything.
    pub fn allows(&self, name: &ServiceName) -> bool {
        match self {
            ServiceFilter::All => true,
            ServiceFilter::Only(names) => names.contains(name),
            ServiceFilter::Except(names) => !names.contains(name),
        }
    }

    /// Raw tags that parse as service tags of an allowed service
    pub fn restrict(&self, raw_tags: &[RawTag]) -> Vec<RawTag> {
        raw_tags
            .iter()
            .filter(|raw| {
                raw.to_service_tag()
                    .map(|tag| self.allows(&tag.service))
                    .unwrap_or(false)
            })
            .cloned()
            .collect()
    }
}

/// Keep the tags that parse as service tags, in input order.
pub fn filter_service_tags(raw_tags: &[RawTag]) -> Vec<ServiceTag> {
    raw_tags
        .iter()
        .filter_map(|raw| raw.to_service_tag().ok())
        .collect()
}

/// Like [filter_service_tags], keeping the name each tag has in the
/// repository; `svc-1.2.3` and `svc-v1.2.3` parse to the same tag.
pub fn pair_service_tags(raw_tags: &[RawTag]) -> Vec<(RawTag, ServiceTag)> {
    raw_tags
        .iter()
        .filter_map(|raw| raw.to_service_tag().ok().map(|tag| (raw.clone(), tag)))
        .collect()
}

/// Bump every service tag and keep one winner per service.
///
/// A service usually has several historical tags; each one is bumped and
/// only the highest result survives, so a stale tag never produces a
/// duplicate next version. A later candidate replaces the incumbent only
/// when strictly greater. The result is ordered by service name.
///
/// A tag whose bumped component would overflow yields no candidate.
pub fn bump_all(raw_tags: &[RawTag], bump_type: VersionBump) -> Vec<ServiceTag> {
    let mut winners: BTreeMap<ServiceName, ServiceTag> = BTreeMap::new();

    let candidates = filter_service_tags(raw_tags)
        .into_iter()
        .filter_map(|tag| match tag.bump(bump_type) {
            Ok(bumped) => Some(bumped),
            Err(err) => {
                warn!(tag = %tag, error = %err, "skipping tag");
                None
            }
        });

    for candidate in candidates {
        match winners.entry(candidate.service.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(candidate);
            }
            Entry::Occupied(mut slot) => {
                if candidate.compare_version(slot.get()).is_gt() {
                    slot.insert(candidate);
                }
            }
        }
    }

    winners.into_values().collect()
}

/// Group tags by service, each group sorted ascending by version.
///
/// The last element of a group is the service's latest tag, the one
/// before it the previous tag.
pub fn sort_by_service_then_version(tags: Vec<ServiceTag>) -> BTreeMap<ServiceName, Vec<ServiceTag>> {
    let mut grouped: BTreeMap<ServiceName, Vec<ServiceTag>> = BTreeMap::new();
    for tag in tags {
        grouped.entry(tag.service.clone()).or_default().push(tag);
    }
    for group in grouped.values_mut() {
        group.sort_by(|a, b| a.compare_version(b));
    }
    grouped
}
