#![cfg_attr(doc, allow(rustdoc::private_intra_doc_links))]
//! Linearization engine.
//!
//! # Purpose
//!
//! Turns a class and its ancestor graph into an ordered, duplicate-free method
//! resolution order. Two resolvers ship with the crate ([`C3`] and [`Dfs`]); hosts may
//! register more through the [`AlgorithmRegistry`].
//!
//! # Mental Model
//!
//! 1. **Selection:** Every class has a selected algorithm (default `"c3"`).
//! 2. **Resolution:** The algorithm receives a [`Resolution`] cursor, asks it for the
//!    linearizations of direct ancestors (recursing one level deeper each time) and
//!    returns the merged sequence.
//! 3. **Publication:** The context wraps the sequence in an immutable [`Linearization`],
//!    caches it under the algorithm id and registers the class in the ancestor index.
//! 4. **Consumption:** Readers receive `Arc<Linearization>` handles. Invalidation replaces
//!    the cached handle; handles already given out stay readable but may be stale.
//!
//! # Key Types
//!
//! | Type | Role |
//! |------|------|
//! | [`Linearization`] | Immutable published MRO, class first. |
//! | [`IsaSet`] | Flattened, read-only membership set derived from a linearization. |
//! | [`MroView`] | Pair returned by `get_linear_isa`. |
//! | [`LinearizationAlgorithm`] | Resolver interface. |
//! | [`AlgorithmRegistry`] | Shared name → resolver table with atomic publication. |
//!
//! # Invariants
//!
//! - A published linearization is never mutated.
//!   - Enforced in: [`Linearization`] (no `&mut` API).
//!   - Tested by: [`crate::invariants::test_published_linearization_survives_invalidation`]
//!   - Failure symptom: Readers observe a half-rewritten MRO.
//! - The first entry is the class itself and no class appears twice.
//!   - Enforced in: [`Linearization::from_resolved`].
//!   - Tested by: `linear::tests::custom_resolver_output_is_normalized`
//!   - Failure symptom: Method dispatch visits a class twice.

mod algorithm;
mod c3;
mod dfs;
mod registry;

pub use algorithm::{Algorithm, AlgorithmId, LinearizationAlgorithm, Resolution};
pub use c3::C3;
pub use dfs::Dfs;
pub use registry::AlgorithmRegistry;

use std::sync::Arc;

use rustc_hash::FxHashSet;

use crate::core::{ClassId, ClassRef};

/// An immutable method resolution order.
#[derive(Debug, PartialEq, Eq)]
pub struct Linearization {
	algorithm: AlgorithmId,
	entries: Box<[ClassRef]>,
}

impl Linearization {
	/// Wraps resolver output, forcing `head` first and dropping repeated classes.
	pub(crate) fn from_resolved(
		algorithm: AlgorithmId,
		head: ClassRef,
		resolved: Vec<ClassRef>,
	) -> Self {
		let mut seen = FxHashSet::default();
		let mut entries = Vec::with_capacity(resolved.len() + 1);
		seen.insert(head.id);
		entries.push(head);
		for entry in resolved {
			if seen.insert(entry.id) {
				entries.push(entry);
			}
		}
		Self {
			algorithm,
			entries: entries.into_boxed_slice(),
		}
	}

	/// Algorithm that produced this order.
	pub fn algorithm(&self) -> &AlgorithmId {
		&self.algorithm
	}

	/// The class itself.
	pub fn head(&self) -> &ClassRef {
		&self.entries[0]
	}

	/// All entries, class first.
	pub fn entries(&self) -> &[ClassRef] {
		&self.entries
	}

	/// Entries after the class itself.
	pub fn ancestors(&self) -> &[ClassRef] {
		&self.entries[1..]
	}

	pub fn iter(&self) -> std::slice::Iter<'_, ClassRef> {
		self.entries.iter()
	}

	pub fn ids(&self) -> impl Iterator<Item = ClassId> + '_ {
		self.entries.iter().map(|entry| entry.id)
	}

	pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
		self.entries.iter().map(|entry| entry.name())
	}

	pub fn contains(&self, class: ClassId) -> bool {
		self.entries.iter().any(|entry| entry.id == class)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Always false; a linearization contains at least its own class.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Copy with the head renamed, leaving the merge order untouched.
	pub(crate) fn with_head_name(&self, name: Arc<str>) -> Self {
		let mut entries = self.entries.to_vec();
		entries[0].name = name;
		Self {
			algorithm: self.algorithm.clone(),
			entries: entries.into_boxed_slice(),
		}
	}
}

impl<'a> IntoIterator for &'a Linearization {
	type Item = &'a ClassRef;
	type IntoIter = std::slice::Iter<'a, ClassRef>;

	fn into_iter(self) -> Self::IntoIter {
		self.entries.iter()
	}
}

/// Read-only flattened membership set: every name an `is_a` query may match.
#[derive(Clone, Debug, Default)]
pub struct IsaSet(Arc<FxHashSet<Arc<str>>>);

impl IsaSet {
	pub(crate) fn from_names(names: FxHashSet<Arc<str>>) -> Self {
		Self(Arc::new(names))
	}

	#[inline]
	pub fn contains(&self, name: &str) -> bool {
		self.0.contains(name)
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Names in unspecified order.
	pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
		self.0.iter().map(|name| &**name)
	}

	/// Returns true if both handles share one allocation.
	pub fn ptr_eq(&self, other: &IsaSet) -> bool {
		Arc::ptr_eq(&self.0, &other.0)
	}
}

/// Linearization and membership set of one class, as returned by `get_linear_isa`.
#[derive(Clone, Debug)]
pub struct MroView {
	linearization: Arc<Linearization>,
	isa: IsaSet,
}

impl MroView {
	pub(crate) fn new(linearization: Arc<Linearization>, isa: IsaSet) -> Self {
		Self { linearization, isa }
	}

	pub fn linearization(&self) -> &Arc<Linearization> {
		&self.linearization
	}

	pub fn isa(&self) -> &IsaSet {
		&self.isa
	}

	pub fn into_parts(self) -> (Arc<Linearization>, IsaSet) {
		(self.linearization, self.isa)
	}
}
