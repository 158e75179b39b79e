//! Invariant proofs for resolution and invalidation.
//!
//! Each `test_*` entrypoint runs the matching `inv_*` proof under `cargo test` and is a
//! link target for module docs otherwise.
#![allow(dead_code)]

#[cfg(doc)]
pub(crate) fn test_published_linearization_survives_invalidation() {}

#[cfg(doc)]
pub(crate) fn test_ancestor_index_covers_published() {}

#[cfg(doc)]
pub(crate) fn test_dependents_never_recompute_from_stale_ancestor() {}

#[cfg(doc)]
pub(crate) fn test_former_ancestors_are_pruned() {}

#[cfg(test)]
mod proofs;

#[cfg(test)]
#[allow(unused_imports)]
pub(crate) use proofs::{
	assert_index_covers_published, test_ancestor_index_covers_published,
	test_dependents_never_recompute_from_stale_ancestor, test_former_ancestors_are_pruned,
	test_published_linearization_survives_invalidation,
};
