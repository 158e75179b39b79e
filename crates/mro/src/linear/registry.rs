//! Algorithm registry with atomic publication.
//!
//! # Role
//!
//! Maps algorithm names to resolvers. The table is an immutable snapshot behind an
//! [`ArcSwap`]; registration builds an extended snapshot and publishes it with a CAS
//! loop, so lookups are wait-free and concurrent registrations are never lost.
//!
//! # Invariants
//!
//! - Registration is idempotent: registering a name again overwrites its resolver.
//! - A snapshot already loaded by a reader is unaffected by later registrations.

use std::sync::Arc;

use arc_swap::ArcSwap;
use rustc_hash::FxHashMap;

use super::algorithm::{Algorithm, AlgorithmId, LinearizationAlgorithm, Resolution};
use super::{C3, Dfs};
use crate::core::{ClassId, ClassRef, MroError, Result};

/// One published state of the registry.
#[derive(Clone, Default)]
struct Snapshot {
	by_name: FxHashMap<AlgorithmId, Algorithm>,
}

/// Shared name → resolver table.
pub struct AlgorithmRegistry {
	snap: ArcSwap<Snapshot>,
}

impl Default for AlgorithmRegistry {
	fn default() -> Self {
		Self::with_builtins()
	}
}

impl std::fmt::Debug for AlgorithmRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("AlgorithmRegistry")
			.field("names", &self.names())
			.finish()
	}
}

impl AlgorithmRegistry {
	/// Creates a registry with no algorithms.
	pub fn empty() -> Self {
		Self {
			snap: ArcSwap::from_pointee(Snapshot::default()),
		}
	}

	/// Creates a registry seeded with `"c3"` and `"dfs"`.
	pub fn with_builtins() -> Self {
		let registry = Self::empty();
		registry.register("c3", Arc::new(C3));
		registry.register("dfs", Arc::new(Dfs));
		registry
	}

	/// Inserts or overwrites the resolver registered under `name`.
	pub fn register(&self, name: &str, resolver: Arc<dyn LinearizationAlgorithm>) -> Algorithm {
		let algorithm = Algorithm::new(AlgorithmId::new(name), resolver);

		loop {
			let old = self.snap.load_full();
			let mut next = Snapshot::clone(&old);
			let replaced = next
				.by_name
				.insert(algorithm.id().clone(), algorithm.clone())
				.is_some();
			let next = Arc::new(next);

			let prev = self.snap.compare_and_swap(&old, next);
			if Arc::ptr_eq(&prev, &old) {
				tracing::debug!(
					algorithm = %algorithm.id(),
					replaced,
					"registered linearization algorithm"
				);
				return algorithm;
			}
			// CAS failed, retry against the newer snapshot
		}
	}

	/// Registers a closure as a resolver.
	pub fn register_fn<F>(&self, name: &str, resolver: F) -> Algorithm
	where
		F: Fn(&mut Resolution<'_>, ClassId) -> Result<Vec<ClassRef>> + Send + Sync + 'static,
	{
		self.register(name, Arc::new(resolver))
	}

	/// Looks up an algorithm by name.
	pub fn lookup(&self, name: &str) -> Result<Algorithm> {
		self.snap
			.load()
			.by_name
			.get(name)
			.cloned()
			.ok_or_else(|| MroError::unknown_algorithm(name))
	}

	pub fn contains(&self, name: &str) -> bool {
		self.snap.load().by_name.contains_key(name)
	}

	/// Registered names in sorted order.
	pub fn names(&self) -> Vec<AlgorithmId> {
		let mut names: Vec<_> = self.snap.load().by_name.keys().cloned().collect();
		names.sort_unstable();
		names
	}

	pub fn len(&self) -> usize {
		self.snap.load().by_name.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}
