#![cfg_attr(doc, allow(rustdoc::private_intra_doc_links))]
//! Resolver context: per-class caches, the ancestor index and the query surface.
//!
//! # Purpose
//!
//! A [`ResolverContext`] holds everything one interpreter instance needs to answer MRO and
//! membership queries: the shared [`AlgorithmRegistry`], the reverse [`AncestorIndex`], one
//! [`MroMeta`] per queried class and the global method-cache generation. It is passed
//! explicitly to every operation, so independent interpreters (and tests) never share
//! caches.
//!
//! # Mental Model
//!
//! 1. **Query:** [`ResolverContext::get_linear_isa`] resolves the class under its selected
//!    algorithm, reusing cached linearizations and publishing new ones.
//! 2. **Mutation:** The host calls [`ResolverContext::ancestor_changed`],
//!    [`ResolverContext::method_changed`] or [`ResolverContext::namespace_moved`] after
//!    changing the hierarchy. Stale caches are discarded and generations bumped.
//! 3. **Recompute:** Discarded classes recompute on their next query. Only the mutated
//!    class itself is recomputed eagerly, to register it against its new ancestors.
//!
//! # Invariants
//!
//! - Every published linearization is registered in the ancestor index.
//!   - Enforced in: [`ResolverContext::publish`].
//!   - Tested by: [`crate::invariants::test_ancestor_index_covers_published`]
//!   - Failure symptom: A descendant keeps serving an MRO after its ancestor changed.
//! - Invalidation discards every dependent before anything is recomputed.
//!   - Enforced in: [`ResolverContext::ancestor_changed`].
//!   - Tested by: [`crate::invariants::test_dependents_never_recompute_from_stale_ancestor`]
//!   - Failure symptom: A descendant rebuilt mid-walk from its ancestor's old MRO.
//! - An ancestor no longer in a class's MRO stops listing the class as a dependent.
//!   - Enforced in: [`ResolverContext::publish`] (pending-prune diff).
//!   - Tested by: [`crate::invariants::test_former_ancestors_are_pruned`]
//!   - Failure symptom: Unrelated classes are invalidated forever after a reparent.

mod index;
mod invalidate;
mod meta;

use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};

pub(crate) use index::AncestorIndex;
pub use meta::MroMeta;
use meta::DestructorCache;

use crate::core::{ClassId, ClassRef, Hierarchy, MethodId, MroConfig, MroError, Result};
use crate::linear::{
	Algorithm, AlgorithmId, AlgorithmRegistry, IsaSet, Linearization, MroView, Resolution,
};

/// Per-interpreter resolution state.
#[derive(Debug)]
pub struct ResolverContext {
	config: MroConfig,
	registry: Arc<AlgorithmRegistry>,
	default_algorithm: AlgorithmId,
	pub(crate) index: AncestorIndex,
	pub(crate) metas: FxHashMap<ClassId, MroMeta>,
	/// Method-cache generation shared by every class; starts at 1.
	pub(crate) global_gen: u64,
}

impl Default for ResolverContext {
	fn default() -> Self {
		Self::with_builtins()
	}
}

impl ResolverContext {
	/// Creates a context over `registry` with the default configuration.
	pub fn new(registry: Arc<AlgorithmRegistry>) -> Self {
		let config = MroConfig::default();
		let default_algorithm = AlgorithmId::new(&config.default_algorithm);
		Self {
			config,
			registry,
			default_algorithm,
			index: AncestorIndex::default(),
			metas: FxHashMap::default(),
			global_gen: 1,
		}
	}

	/// Creates a context over a fresh registry seeded with the builtin algorithms.
	pub fn with_builtins() -> Self {
		Self::new(Arc::new(AlgorithmRegistry::with_builtins()))
	}

	/// Creates a context with an explicit configuration.
	///
	/// Fails with [`MroError::UnknownAlgorithm`] if the configured default algorithm is not
	/// registered.
	pub fn with_config(config: MroConfig, registry: Arc<AlgorithmRegistry>) -> Result<Self> {
		let default_algorithm = registry.lookup(&config.default_algorithm)?.id().clone();
		Ok(Self {
			config,
			registry,
			default_algorithm,
			index: AncestorIndex::default(),
			metas: FxHashMap::default(),
			global_gen: 1,
		})
	}

	pub fn config(&self) -> &MroConfig {
		&self.config
	}

	pub fn registry(&self) -> &Arc<AlgorithmRegistry> {
		&self.registry
	}

	/// Metadata of a class that has been queried or mutated at least once.
	pub fn meta(&self, class: ClassId) -> Option<&MroMeta> {
		self.metas.get(&class)
	}

	pub(crate) fn meta_mut(&mut self, class: ClassId) -> &mut MroMeta {
		let default_algorithm = &self.default_algorithm;
		self.metas
			.entry(class)
			.or_insert_with(|| MroMeta::new(default_algorithm.clone()))
	}

	/// Duplicates this context for a cloned interpreter.
	///
	/// The registry is shared. Per-class metadata is duplicated with its cached
	/// linearizations shared by reference, and the ancestor index is rebuilt from those
	/// caches, so the copy never observes later mutations of the original.
	pub fn duplicate_for_clone(&self) -> Self {
		let mut metas = self.metas.clone();
		let mut index = AncestorIndex::default();
		for (&class, meta) in metas.iter_mut() {
			meta.pending_prune.clear();
			for linear in meta.linearizations() {
				for entry in linear.ancestors() {
					index.insert(entry.id, class);
				}
			}
		}
		Self {
			config: self.config.clone(),
			registry: Arc::clone(&self.registry),
			default_algorithm: self.default_algorithm.clone(),
			index,
			metas,
			global_gen: self.global_gen,
		}
	}

	/// Resolves `class` under `algorithm` at the given depth, consulting and filling the
	/// cache.
	pub(crate) fn linearize(
		&mut self,
		hierarchy: &dyn Hierarchy,
		algorithm: &Algorithm,
		class: ClassId,
		depth: usize,
	) -> Result<Arc<Linearization>> {
		let name = hierarchy
			.canonical_name(class)
			.cloned()
			.ok_or(MroError::AnonymousClass { class })?;
		if depth > self.config.max_depth {
			return Err(MroError::RecursionTooDeep {
				class: name,
				limit: self.config.max_depth,
			});
		}
		if let Some(cached) = self
			.metas
			.get(&class)
			.and_then(|meta| meta.cached(algorithm.id()))
		{
			return Ok(Arc::clone(cached));
		}

		let resolver = algorithm.resolver();
		let resolved = {
			let mut cx = Resolution {
				ctx: self,
				hierarchy,
				algorithm,
				depth,
			};
			resolver.resolve(&mut cx, class)?
		};
		let linear = Arc::new(Linearization::from_resolved(
			algorithm.id().clone(),
			ClassRef::new(class, name),
			resolved,
		));
		self.publish(class, algorithm.id(), &linear);
		Ok(linear)
	}

	/// Caches a fresh linearization and brings the ancestor index in line with it.
	fn publish(&mut self, class: ClassId, algorithm: &AlgorithmId, linear: &Arc<Linearization>) {
		for entry in linear.ancestors() {
			self.index.insert(entry.id, class);
		}

		let meta = self.meta_mut(class);
		meta.store(algorithm, Arc::clone(linear));
		let pending = std::mem::take(&mut meta.pending_prune);
		if !pending.is_empty() {
			let current: FxHashSet<ClassId> = linear.ids().collect();
			for former in pending {
				if !current.contains(&former) {
					self.index.remove(former, class);
				}
			}
		}

		tracing::trace!(
			class = %linear.head(),
			algorithm = %algorithm,
			len = linear.len(),
			"published linearization"
		);
	}

	fn selected_algorithm(&self, class: ClassId) -> Result<Algorithm> {
		let selected = self
			.metas
			.get(&class)
			.map_or(&self.default_algorithm, |meta| &meta.selected);
		self.registry.lookup(selected.as_str())
	}

	/// Returns the MRO of `class` under its selected algorithm and its membership set.
	///
	/// If the class was renamed after its linearization was cached, the returned view
	/// carries the current canonical name in its head entry; the cache itself is left
	/// untouched.
	pub fn get_linear_isa(
		&mut self,
		hierarchy: &dyn Hierarchy,
		class: ClassId,
	) -> Result<MroView> {
		let algorithm = self.selected_algorithm(class)?;
		let stored = self.linearize(hierarchy, &algorithm, class, 0)?;
		let canonical = hierarchy
			.canonical_name(class)
			.cloned()
			.ok_or(MroError::AnonymousClass { class })?;

		let linear = if !algorithm.is_canonical() && stored.head().name != canonical {
			Arc::new(stored.with_head_name(canonical))
		} else {
			stored
		};

		let isa = self
			.meta_mut(class)
			.isa
			.get_or_insert_with(|| build_isa(hierarchy, &linear))
			.clone();
		Ok(MroView::new(linear, isa))
	}

	/// Returns true if `class` is, or inherits from, the class named `target`.
	///
	/// `target` may be any effective name or alias. Absence is not an error; errors only
	/// come from resolving `class` itself.
	pub fn is_a(
		&mut self,
		hierarchy: &dyn Hierarchy,
		class: ClassId,
		target: &str,
	) -> Result<bool> {
		let view = self.get_linear_isa(hierarchy, class)?;
		if view.isa().contains(target) {
			return Ok(true);
		}
		let found = hierarchy
			.lookup(target)
			.and_then(|resolved| hierarchy.canonical_name(resolved))
			.is_some_and(|canonical| &**canonical != target && view.isa().contains(canonical));
		Ok(found)
	}

	/// Selects the algorithm used for `class`.
	///
	/// Cached linearizations are kept under their own algorithm. The local cache generation
	/// is bumped and the next-method cache cleared; descendants are left alone.
	pub fn set_algorithm(&mut self, class: ClassId, name: &str) -> Result<()> {
		let algorithm = self.registry.lookup(name)?;
		let meta = self.meta_mut(class);
		let previous = meta.selected.clone();
		if meta.select(algorithm.id().clone()) {
			tracing::debug!(
				%class,
				from = %previous,
				to = %algorithm.id(),
				"switched linearization algorithm"
			);
		}
		Ok(())
	}

	/// Selected algorithm of `class`.
	pub fn algorithm_of(&self, class: ClassId) -> &AlgorithmId {
		self.metas
			.get(&class)
			.map_or(&self.default_algorithm, |meta| &meta.selected)
	}

	/// Stored linearization for the selected algorithm, without resolving.
	pub fn cached_linearization(&self, class: ClassId) -> Option<Arc<Linearization>> {
		let meta = self.metas.get(&class)?;
		meta.cached(&meta.selected).cloned()
	}

	pub fn package_gen(&self, class: ClassId) -> u64 {
		self.metas.get(&class).map_or(0, MroMeta::package_gen)
	}

	pub fn cache_gen(&self, class: ClassId) -> u64 {
		self.metas.get(&class).map_or(0, MroMeta::cache_gen)
	}

	pub fn destructor_gen(&self, class: ClassId) -> u64 {
		self.metas.get(&class).map_or(0, MroMeta::destructor_gen)
	}

	/// Method-cache generation shared by every class.
	pub fn global_cache_gen(&self) -> u64 {
		self.global_gen
	}

	/// Classes whose linearization currently includes `class`, sorted by handle.
	pub fn dependents(&self, class: ClassId) -> Vec<ClassId> {
		self.index.dependents(class)
	}

	/// True if a change to `class` can affect every class: it is the universal base, or
	/// the universal base inherits from it.
	pub fn is_universal(&self, hierarchy: &dyn Hierarchy, class: ClassId) -> bool {
		let universal = hierarchy.universal();
		class == universal || self.index.contains(class, universal)
	}

	/// Records the method found after `class` for `key`; `None` records that there is none.
	pub fn cache_next_method(&mut self, class: ClassId, key: &str, method: Option<MethodId>) {
		self.meta_mut(class).next_method.insert(Arc::from(key), method);
	}

	/// Cached next-method lookup: `None` on a miss, `Some(None)` for a cached absence.
	pub fn cached_next_method(&self, class: ClassId, key: &str) -> Option<Option<MethodId>> {
		self.metas.get(&class)?.next_method.get(key).copied()
	}

	/// Records the destructor of `class` under the current global generation.
	pub fn cache_destructor(&mut self, class: ClassId, method: Option<MethodId>) {
		let generation = self.global_gen;
		self.meta_mut(class).destructor = DestructorCache { method, generation };
	}

	/// Cached destructor if it was recorded under the current global generation.
	pub fn cached_destructor(&self, class: ClassId) -> Option<Option<MethodId>> {
		let cache = self.metas.get(&class)?.destructor;
		(cache.generation != 0 && cache.generation == self.global_gen).then_some(cache.method)
	}
}

fn build_isa(hierarchy: &dyn Hierarchy, linear: &Linearization) -> IsaSet {
	let mut names = FxHashSet::default();
	for entry in linear {
		names.insert(Arc::clone(&entry.name));
		names.extend(hierarchy.names(entry.id).iter().cloned());
	}
	names.extend(hierarchy.names(hierarchy.universal()).iter().cloned());
	IsaSet::from_names(names)
}
