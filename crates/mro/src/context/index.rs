//! Reverse dependency index.
//!
//! # Invariants
//!
//! - For every class A with a published linearization and every ancestor B in it,
//!   A ∈ index[B] (see `invariants::test_ancestor_index_covers_published`).
//! - Empty dependent sets are removed, so `len` counts ancestors with live dependents.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::core::ClassId;

/// Ancestor → classes whose linearization currently includes it.
#[derive(Clone, Debug, Default)]
pub(crate) struct AncestorIndex {
	dependents: FxHashMap<ClassId, FxHashSet<ClassId>>,
}

impl AncestorIndex {
	pub(crate) fn insert(&mut self, ancestor: ClassId, dependent: ClassId) {
		self.dependents.entry(ancestor).or_default().insert(dependent);
	}

	pub(crate) fn remove(&mut self, ancestor: ClassId, dependent: ClassId) {
		if let Some(set) = self.dependents.get_mut(&ancestor) {
			set.remove(&dependent);
			if set.is_empty() {
				self.dependents.remove(&ancestor);
			}
		}
	}

	pub(crate) fn contains(&self, ancestor: ClassId, dependent: ClassId) -> bool {
		self.dependents
			.get(&ancestor)
			.is_some_and(|set| set.contains(&dependent))
	}

	/// Snapshot of the dependents of `ancestor`, sorted by handle.
	pub(crate) fn dependents(&self, ancestor: ClassId) -> Vec<ClassId> {
		let mut out: Vec<ClassId> = self
			.dependents
			.get(&ancestor)
			.map(|set| set.iter().copied().collect())
			.unwrap_or_default();
		out.sort_unstable();
		out
	}

	#[cfg(test)]
	pub(crate) fn len(&self) -> usize {
		self.dependents.len()
	}
}
