//! Lightweight handles shared by the resolver and the namespace.

use std::fmt;
use std::sync::Arc;

/// Dense handle for a class descriptor.
///
/// Issued by the namespace and stable across renames and relocations. It carries no
/// memory address, so it can be copied freely between contexts.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct ClassId(u32);

impl ClassId {
	/// Creates a handle from its raw index.
	#[inline]
	pub const fn from_u32(raw: u32) -> Self {
		Self(raw)
	}

	/// Returns the raw index.
	#[inline]
	pub const fn as_u32(self) -> u32 {
		self.0
	}

	#[inline]
	pub(crate) const fn as_index(self) -> usize {
		self.0 as usize
	}
}

impl fmt::Display for ClassId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// Opaque handle for a method body held in dispatch-side caches.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct MethodId(pub u32);

/// One entry of a linearization: a class handle plus the canonical name it had when the
/// linearization was built.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ClassRef {
	pub id: ClassId,
	pub name: Arc<str>,
}

impl ClassRef {
	pub fn new(id: ClassId, name: Arc<str>) -> Self {
		Self { id, name }
	}

	/// Returns the captured name.
	#[inline]
	pub fn name(&self) -> &str {
		&self.name
	}
}

impl fmt::Debug for ClassRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}{}", self.name, self.id)
	}
}

impl fmt::Display for ClassRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.name)
	}
}
