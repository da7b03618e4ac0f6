//! Shared ranking and deduplication helpers.
//!
//! Every query applies the same deterministic tie-break: priority descending,
//! then id ascending. Composing callers that concatenate query results use
//! `dedupe_by_id` to keep sequences duplicate-free while preserving the
//! precedence of earlier matches.

use crate::catalog::model::ImageAsset;
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// The common ranking order: priority descending, id ascending.
pub fn ordering(a: &ImageAsset, b: &ImageAsset) -> Ordering {
    b.priority
        .cmp(&a.priority)
        .then_with(|| a.id.cmp(&b.id))
}

/// Stable-sort a result sequence into ranking order.
pub fn rank(assets: &mut Vec<&ImageAsset>) {
    assets.sort_by(|a, b| ordering(a, b));
}

/// Drop repeated ids, keeping the first occurrence.
///
/// Input order is preserved, so a caller concatenating a curated sequence
/// with a supplemental one keeps the curated entry when both contain the
/// same asset.
pub fn dedupe_by_id<'a>(assets: Vec<&'a ImageAsset>) -> Vec<&'a ImageAsset> {
    let mut seen = BTreeSet::new();
    assets
        .into_iter()
        .filter(|asset| seen.insert(asset.id.clone()))
        .collect()
}
