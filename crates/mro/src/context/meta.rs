//! Per-class cache metadata.

use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::core::{ClassId, MethodId};
use crate::linear::{AlgorithmId, IsaSet, Linearization};

/// Cached linearizations of one class.
///
/// The common case is a single linearization for the selected algorithm. A class resolved
/// under a second algorithm (as an ancestor of a class selecting it, or after switching)
/// upgrades to a map keyed by algorithm.
#[derive(Clone, Debug, Default)]
pub(crate) enum CacheSlot {
	#[default]
	Empty,
	/// Belongs to the selected algorithm.
	Current(Arc<Linearization>),
	All(FxHashMap<AlgorithmId, Arc<Linearization>>),
}

/// Cached destructor lookup, valid only under the global generation it was stamped with.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct DestructorCache {
	pub(crate) method: Option<MethodId>,
	/// `0` means nothing cached.
	pub(crate) generation: u64,
}

/// Resolution metadata for one class.
///
/// Created on the first query and kept for the life of the context. Cloning duplicates
/// the cache handles: a single-slot cache costs one refcount increment, a multi-algorithm
/// map becomes a new map of shared linearizations.
#[derive(Clone, Debug)]
pub struct MroMeta {
	pub(crate) selected: AlgorithmId,
	pub(crate) slot: CacheSlot,
	pub(crate) isa: Option<IsaSet>,
	pub(crate) package_gen: u64,
	pub(crate) cache_gen: u64,
	pub(crate) next_method: FxHashMap<Arc<str>, Option<MethodId>>,
	pub(crate) destructor: DestructorCache,
	/// Ancestors registered by discarded linearizations, pruned on the next publication.
	pub(crate) pending_prune: FxHashSet<ClassId>,
}

impl MroMeta {
	pub(crate) fn new(selected: AlgorithmId) -> Self {
		Self {
			selected,
			slot: CacheSlot::Empty,
			isa: None,
			package_gen: 0,
			cache_gen: 0,
			next_method: FxHashMap::default(),
			destructor: DestructorCache::default(),
			pending_prune: FxHashSet::default(),
		}
	}

	/// Selected algorithm.
	pub fn algorithm(&self) -> &AlgorithmId {
		&self.selected
	}

	/// Bumped on every hierarchy change and local method change.
	pub fn package_gen(&self) -> u64 {
		self.package_gen
	}

	/// Bumped on every change affecting resolvable methods.
	pub fn cache_gen(&self) -> u64 {
		self.cache_gen
	}

	/// Global generation the destructor cache was stamped with; `0` when empty.
	pub fn destructor_gen(&self) -> u64 {
		self.destructor.generation
	}

	/// True if any linearization is cached.
	pub fn is_built(&self) -> bool {
		!matches!(self.slot, CacheSlot::Empty)
	}

	/// True if more than one algorithm's linearization may be cached.
	pub fn has_multiple_caches(&self) -> bool {
		matches!(self.slot, CacheSlot::All(_))
	}

	pub(crate) fn cached(&self, algorithm: &AlgorithmId) -> Option<&Arc<Linearization>> {
		match &self.slot {
			CacheSlot::Current(linear) if *algorithm == self.selected => Some(linear),
			CacheSlot::All(map) => map.get(algorithm),
			_ => None,
		}
	}

	pub(crate) fn store(&mut self, algorithm: &AlgorithmId, linear: Arc<Linearization>) {
		let slot = std::mem::take(&mut self.slot);
		self.slot = match slot {
			CacheSlot::Empty if *algorithm == self.selected => CacheSlot::Current(linear),
			CacheSlot::Current(_) if *algorithm == self.selected => CacheSlot::Current(linear),
			CacheSlot::Empty => {
				let mut map = FxHashMap::default();
				map.insert(algorithm.clone(), linear);
				CacheSlot::All(map)
			}
			CacheSlot::Current(current) => {
				let mut map = FxHashMap::default();
				map.insert(self.selected.clone(), current);
				map.insert(algorithm.clone(), linear);
				CacheSlot::All(map)
			}
			CacheSlot::All(mut map) => {
				map.insert(algorithm.clone(), linear);
				CacheSlot::All(map)
			}
		};
	}

	/// Every cached linearization regardless of algorithm.
	pub(crate) fn linearizations(&self) -> Vec<&Arc<Linearization>> {
		match &self.slot {
			CacheSlot::Empty => Vec::new(),
			CacheSlot::Current(linear) => vec![linear],
			CacheSlot::All(map) => map.values().collect(),
		}
	}

	/// Drops every cached linearization and the membership set, remembering the ancestors
	/// they registered so publication can prune them later.
	pub(crate) fn discard(&mut self) {
		let slot = std::mem::take(&mut self.slot);
		let discarded: Vec<Arc<Linearization>> = match slot {
			CacheSlot::Empty => Vec::new(),
			CacheSlot::Current(linear) => vec![linear],
			CacheSlot::All(map) => map.into_values().collect(),
		};
		for linear in &discarded {
			self.pending_prune
				.extend(linear.ancestors().iter().map(|entry| entry.id));
		}
		self.isa = None;
	}

	/// Switches the selected algorithm. Returns false if it was already selected.
	pub(crate) fn select(&mut self, algorithm: AlgorithmId) -> bool {
		if algorithm == self.selected {
			return false;
		}
		// The single slot is owned by the outgoing algorithm; keep it under that id.
		self.slot = match std::mem::take(&mut self.slot) {
			CacheSlot::Current(current) => {
				let mut map = FxHashMap::default();
				map.insert(self.selected.clone(), current);
				CacheSlot::All(map)
			}
			other => other,
		};
		self.selected = algorithm;
		self.cache_gen += 1;
		self.next_method.clear();
		self.isa = None;
		true
	}

	pub(crate) fn clear_method_caches(&mut self) {
		self.next_method.clear();
		self.destructor = DestructorCache::default();
	}
}
