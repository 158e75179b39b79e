//! Resolver interface and the recursion cursor handed to resolvers.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use super::Linearization;
use crate::context::ResolverContext;
use crate::core::{ClassId, ClassRef, Hierarchy, MroError, Result};

/// Interned name of a registered algorithm.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AlgorithmId(Arc<str>);

impl AlgorithmId {
	pub fn new(name: &str) -> Self {
		Self(Arc::from(name))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl Borrow<str> for AlgorithmId {
	fn borrow(&self) -> &str {
		&self.0
	}
}

impl fmt::Debug for AlgorithmId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Debug::fmt(&*self.0, f)
	}
}

impl fmt::Display for AlgorithmId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl PartialEq<str> for AlgorithmId {
	fn eq(&self, other: &str) -> bool {
		&*self.0 == other
	}
}

impl PartialEq<&str> for AlgorithmId {
	fn eq(&self, other: &&str) -> bool {
		&*self.0 == *other
	}
}

/// A linearization strategy.
///
/// Implementations compute the order for one class and delegate ancestors back to the
/// cursor, which applies the depth guard, caching and publication.
pub trait LinearizationAlgorithm: Send + Sync + 'static {
	/// Computes the MRO of `class`, class first.
	///
	/// The output is normalized on publication: the class is forced first and repeated
	/// classes are dropped.
	fn resolve(&self, cx: &mut Resolution<'_>, class: ClassId) -> Result<Vec<ClassRef>>;

	/// Whether results already carry the class's current canonical name, so the accessor
	/// never needs to rewrite the head entry after a rename.
	fn is_canonical(&self) -> bool {
		false
	}
}

impl<F> LinearizationAlgorithm for F
where
	F: Fn(&mut Resolution<'_>, ClassId) -> Result<Vec<ClassRef>> + Send + Sync + 'static,
{
	fn resolve(&self, cx: &mut Resolution<'_>, class: ClassId) -> Result<Vec<ClassRef>> {
		self(cx, class)
	}
}

/// A registered algorithm: its id plus the shared resolver.
#[derive(Clone)]
pub struct Algorithm {
	id: AlgorithmId,
	resolver: Arc<dyn LinearizationAlgorithm>,
}

impl Algorithm {
	pub(crate) fn new(id: AlgorithmId, resolver: Arc<dyn LinearizationAlgorithm>) -> Self {
		Self { id, resolver }
	}

	pub fn id(&self) -> &AlgorithmId {
		&self.id
	}

	pub fn name(&self) -> &str {
		self.id.as_str()
	}

	pub fn is_canonical(&self) -> bool {
		self.resolver.is_canonical()
	}

	pub(crate) fn resolver(&self) -> Arc<dyn LinearizationAlgorithm> {
		Arc::clone(&self.resolver)
	}

	/// Returns true if both handles share one resolver.
	pub fn same_resolver(&self, other: &Algorithm) -> bool {
		Arc::ptr_eq(&self.resolver, &other.resolver)
	}
}

impl fmt::Debug for Algorithm {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Algorithm")
			.field("id", &self.id)
			.field("canonical", &self.is_canonical())
			.finish()
	}
}

/// Cursor for one level of a resolution.
///
/// Holds the context, the hierarchy being resolved, the algorithm in use and the current
/// depth. Ancestor linearizations requested through it are resolved with the same
/// algorithm one level deeper.
pub struct Resolution<'a> {
	pub(crate) ctx: &'a mut ResolverContext,
	pub(crate) hierarchy: &'a dyn Hierarchy,
	pub(crate) algorithm: &'a Algorithm,
	pub(crate) depth: usize,
}

impl Resolution<'_> {
	pub fn hierarchy(&self) -> &dyn Hierarchy {
		self.hierarchy
	}

	pub fn algorithm(&self) -> &Algorithm {
		self.algorithm
	}

	pub fn depth(&self) -> usize {
		self.depth
	}

	/// Entry for `class` under its current canonical name.
	pub fn class_ref(&self, class: ClassId) -> Result<ClassRef> {
		self.hierarchy
			.canonical_name(class)
			.map(|name| ClassRef::new(class, Arc::clone(name)))
			.ok_or(MroError::AnonymousClass { class })
	}

	/// Direct ancestors of `class` with tombstones resolved to the universal base.
	pub fn direct_ancestors(&self, class: ClassId) -> Vec<ClassId> {
		let universal = self.hierarchy.universal();
		self.hierarchy
			.ancestors(class)
			.iter()
			.map(|entry| entry.resolve(universal))
			.collect()
	}

	/// Linearization of an ancestor under the same algorithm, one level deeper.
	pub fn parent_linearization(&mut self, parent: ClassId) -> Result<Arc<Linearization>> {
		self.ctx
			.linearize(self.hierarchy, self.algorithm, parent, self.depth + 1)
	}
}
