//! In-memory reference namespace.
//!
//! A tree of named slots, each holding a class handle, plus an arena of class
//! descriptors. Hosts with their own symbol tables implement [`Hierarchy`] directly; this
//! type backs the tests and small embedders.
//!
//! Slots and names are separate: [`Namespace::bind`] only rewrites a slot, and the
//! effective names of the classes involved change when the move is reported through
//! [`ResolverContext::namespace_moved`](crate::ResolverContext::namespace_moved).

use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::core::{AncestorEntry, ClassId, Hierarchy, HierarchyMut};

/// Path separator between namespace segments.
pub const SEPARATOR: &str = "::";

/// Name of the universal base class seeded into every namespace.
pub const UNIVERSAL: &str = "UNIVERSAL";

type Slots = IndexMap<Arc<str>, ClassId>;

/// Storage for one class.
#[derive(Debug, Clone, Default)]
pub struct ClassDescriptor {
	names: SmallVec<[Arc<str>; 1]>,
	aliases: SmallVec<[Arc<str>; 1]>,
	ancestors: Vec<AncestorEntry>,
	nested: Slots,
}

impl ClassDescriptor {
	fn named(name: &str) -> Self {
		let mut names = SmallVec::new();
		names.push(Arc::from(name));
		Self {
			names,
			..Self::default()
		}
	}

	/// Effective names, canonical first.
	pub fn names(&self) -> &[Arc<str>] {
		&self.names
	}

	/// Lookup-only aliases.
	pub fn aliases(&self) -> &[Arc<str>] {
		&self.aliases
	}

	pub fn ancestors(&self) -> &[AncestorEntry] {
		&self.ancestors
	}

	/// Nested slots in insertion order.
	pub fn nested(&self) -> impl Iterator<Item = (&str, ClassId)> + '_ {
		self.nested.iter().map(|(short, &id)| (&**short, id))
	}
}

/// Arena-backed namespace tree.
///
/// Class handles are indices into the arena. Methods taking a [`ClassId`] panic if the
/// handle was not issued by this namespace.
#[derive(Debug, Clone)]
pub struct Namespace {
	classes: Vec<ClassDescriptor>,
	root: Slots,
	by_name: FxHashMap<Arc<str>, ClassId>,
	universal: ClassId,
}

impl Default for Namespace {
	fn default() -> Self {
		Self::new()
	}
}

impl Namespace {
	/// Creates a namespace holding only the universal base class.
	pub fn new() -> Self {
		let mut ns = Self {
			classes: Vec::new(),
			root: Slots::default(),
			by_name: FxHashMap::default(),
			universal: ClassId::from_u32(0),
		};
		ns.universal = ns.define(UNIVERSAL, &[]);
		ns
	}

	/// Defines the class at `path`, or reuses the one already there, and replaces its
	/// direct ancestors. Missing enclosing namespaces are created as parentless classes.
	pub fn define(&mut self, path: &str, parents: &[ClassId]) -> ClassId {
		let (parent, leaf) = self.ensure_parent(path);
		let existing = self.slots(parent).and_then(|slots| slots.get(leaf)).copied();
		let class = match existing {
			Some(class) => class,
			None => {
				let class = self.alloc(ClassDescriptor::named(path));
				self.slots_mut(parent).insert(Arc::from(leaf), class);
				class
			}
		};
		self.set_ancestors(class, parents);
		class
	}

	/// Defines a class reachable under no name.
	pub fn define_anonymous(&mut self, parents: &[ClassId]) -> ClassId {
		let class = self.alloc(ClassDescriptor::default());
		self.set_ancestors(class, parents);
		class
	}

	/// Replaces the direct-ancestor list. The caller reports the change to the resolver.
	pub fn set_ancestors(&mut self, class: ClassId, parents: &[ClassId]) {
		self.descriptor_mut(class).ancestors =
			parents.iter().copied().map(AncestorEntry::from).collect();
	}

	pub fn push_ancestor(&mut self, class: ClassId, parent: ClassId) {
		self.descriptor_mut(class)
			.ancestors
			.push(AncestorEntry::Present(parent));
	}

	/// Replaces the ancestor at `position` with a tombstone. Returns false if there is no
	/// such position.
	pub fn tombstone_ancestor(&mut self, class: ClassId, position: usize) -> bool {
		match self.descriptor_mut(class).ancestors.get_mut(position) {
			Some(entry) => {
				*entry = AncestorEntry::Tombstone;
				true
			}
			None => false,
		}
	}

	/// Makes `name` resolve to `class` without giving the class a new effective name.
	pub fn alias(&mut self, name: &str, class: ClassId) {
		let name: Arc<str> = Arc::from(name);
		self.descriptor_mut(class).aliases.push(Arc::clone(&name));
		self.by_name.insert(name, class);
	}

	/// Stores `class` in the slot at `location` (clearing it for `None`) and returns the
	/// previous occupant.
	pub fn bind(&mut self, location: &str, class: Option<ClassId>) -> Option<ClassId> {
		let (parent, leaf) = self.ensure_parent(location);
		let slots = self.slots_mut(parent);
		match class {
			Some(class) => slots.insert(Arc::from(leaf), class),
			None => slots.shift_remove(leaf),
		}
	}

	/// Follows slots from the root. Unlike [`Hierarchy::lookup`] this ignores names and
	/// aliases.
	pub fn resolve_path(&self, path: &str) -> Option<ClassId> {
		let mut parent = None;
		for segment in path.split(SEPARATOR) {
			parent = Some(*self.slots(parent)?.get(segment)?);
		}
		parent
	}

	pub fn descriptor(&self, class: ClassId) -> Option<&ClassDescriptor> {
		self.classes.get(class.as_index())
	}

	pub fn len(&self) -> usize {
		self.classes.len()
	}

	/// Always false; the universal base class is always present.
	pub fn is_empty(&self) -> bool {
		self.classes.is_empty()
	}

	fn alloc(&mut self, descriptor: ClassDescriptor) -> ClassId {
		let class = ClassId::from_u32(self.classes.len() as u32);
		for name in &descriptor.names {
			self.by_name.insert(Arc::clone(name), class);
		}
		self.classes.push(descriptor);
		class
	}

	fn descriptor_mut(&mut self, class: ClassId) -> &mut ClassDescriptor {
		&mut self.classes[class.as_index()]
	}

	fn slots(&self, parent: Option<ClassId>) -> Option<&Slots> {
		match parent {
			None => Some(&self.root),
			Some(class) => self.descriptor(class).map(|desc| &desc.nested),
		}
	}

	fn slots_mut(&mut self, parent: Option<ClassId>) -> &mut Slots {
		match parent {
			None => &mut self.root,
			Some(class) => &mut self.descriptor_mut(class).nested,
		}
	}

	/// Splits off the last segment, creating the enclosing namespaces.
	fn ensure_parent<'p>(&mut self, path: &'p str) -> (Option<ClassId>, &'p str) {
		match path.rsplit_once(SEPARATOR) {
			Some((prefix, leaf)) => (self.ensure_path(prefix), leaf),
			None => (None, path),
		}
	}

	fn ensure_path(&mut self, path: &str) -> Option<ClassId> {
		let mut parent = None;
		let mut walked = String::with_capacity(path.len());
		for segment in path.split(SEPARATOR) {
			if !walked.is_empty() {
				walked.push_str(SEPARATOR);
			}
			walked.push_str(segment);

			let existing = self.slots(parent).and_then(|slots| slots.get(segment)).copied();
			let class = match existing {
				Some(class) => class,
				None => {
					let class = self.alloc(ClassDescriptor::named(&walked));
					self.slots_mut(parent).insert(Arc::from(segment), class);
					class
				}
			};
			parent = Some(class);
		}
		parent
	}
}

impl Hierarchy for Namespace {
	fn names(&self, class: ClassId) -> &[Arc<str>] {
		self.descriptor(class)
			.map_or(&[][..], |desc| desc.names.as_slice())
	}

	fn ancestors(&self, class: ClassId) -> &[AncestorEntry] {
		self.descriptor(class)
			.map_or(&[][..], |desc| desc.ancestors.as_slice())
	}

	fn lookup(&self, name: &str) -> Option<ClassId> {
		self.by_name.get(name).copied()
	}

	fn nested(&self, class: ClassId) -> Vec<(Arc<str>, ClassId)> {
		self.descriptor(class)
			.map(|desc| {
				desc.nested
					.iter()
					.map(|(short, &id)| (Arc::clone(short), id))
					.collect()
			})
			.unwrap_or_default()
	}

	fn universal(&self) -> ClassId {
		self.universal
	}
}

impl HierarchyMut for Namespace {
	fn add_name(&mut self, class: ClassId, name: &str) {
		let desc = self.descriptor_mut(class);
		if desc.names.iter().any(|existing| &**existing == name) {
			return;
		}
		let name: Arc<str> = Arc::from(name);
		desc.names.push(Arc::clone(&name));
		self.by_name.insert(name, class);
	}

	fn remove_name(&mut self, class: ClassId, name: &str) {
		let desc = self.descriptor_mut(class);
		desc.names.retain(|existing| &**existing != name);
		if self.by_name.get(name) == Some(&class) {
			self.by_name.remove(name);
		}
	}
}

#[cfg(test)]
mod tests;
