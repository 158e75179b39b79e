//! The namespace seam consumed by the resolver.
//!
//! # Role
//!
//! Class storage, member dictionaries and the namespace tree live outside this crate.
//! The resolver only needs the read surface of [`Hierarchy`]; namespace relocation
//! additionally needs to rewrite effective names through [`HierarchyMut`].
//!
//! # Invariants
//!
//! - The first effective name is the canonical name. A class with no effective names is
//!   anonymous and cannot be linearized.
//! - [`AncestorEntry::Tombstone`] always resolves to [`Hierarchy::universal`].

use std::sync::Arc;

use super::ids::ClassId;

/// One slot of a class's direct-ancestor sequence.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AncestorEntry {
	Present(ClassId),
	/// Deleted slot; treated as the universal base class.
	Tombstone,
}

impl AncestorEntry {
	/// Resolves the slot to a concrete class.
	#[inline]
	pub fn resolve(self, universal: ClassId) -> ClassId {
		match self {
			AncestorEntry::Present(id) => id,
			AncestorEntry::Tombstone => universal,
		}
	}
}

impl From<ClassId> for AncestorEntry {
	fn from(id: ClassId) -> Self {
		AncestorEntry::Present(id)
	}
}

/// Read access to class identity, ancestry and nesting.
pub trait Hierarchy {
	/// Effective names under which the class is reachable; the first is canonical.
	fn names(&self, class: ClassId) -> &[Arc<str>];

	/// Ordered direct-ancestor sequence.
	fn ancestors(&self, class: ClassId) -> &[AncestorEntry];

	/// Resolves an effective name or alias to a class.
	fn lookup(&self, name: &str) -> Option<ClassId>;

	/// Classes nested directly under `class`, keyed by their short name.
	fn nested(&self, class: ClassId) -> Vec<(Arc<str>, ClassId)>;

	/// The universal base class every class implicitly inherits from.
	fn universal(&self) -> ClassId;

	/// Canonical name, or `None` for an anonymous class.
	#[inline]
	fn canonical_name(&self, class: ClassId) -> Option<&Arc<str>> {
		self.names(class).first()
	}
}

/// Name rewriting used while relocating classes in the namespace tree.
pub trait HierarchyMut: Hierarchy {
	/// Adds an effective name. Adding an existing name is a no-op.
	fn add_name(&mut self, class: ClassId, name: &str);

	/// Removes an effective name. Removing a missing name is a no-op.
	fn remove_name(&mut self, class: ClassId, name: &str);
}
