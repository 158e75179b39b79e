//! Hierarchy mutation notifications.
//!
//! Every entry point applies all discards and generation bumps before recomputing
//! anything, so no resolution can observe a half-invalidated graph.

use std::sync::Arc;

use indexmap::IndexSet;
use rustc_hash::FxHashSet;

use super::ResolverContext;
use crate::core::{ClassId, Hierarchy, HierarchyMut, Result};
use crate::namespace::SEPARATOR;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RenameKind {
	Remove,
	Add,
}

#[derive(Debug)]
struct Rename {
	class: ClassId,
	name: Arc<str>,
	kind: RenameKind,
}

impl ResolverContext {
	/// Notifies that the direct-ancestor list of `class` changed.
	///
	/// Discards the caches of `class` and every class whose MRO includes it, bumps the
	/// relevant generations, then eagerly recomputes `class` so it registers against its
	/// new ancestors. Dependents recompute on their next query. Errors from the eager
	/// recomputation are returned after all invalidation has been applied.
	pub fn ancestor_changed(&mut self, hierarchy: &dyn Hierarchy, class: ClassId) -> Result<()> {
		let universal = self.is_universal(hierarchy, class);
		let dependents = self.index.dependents(class);

		let meta = self.meta_mut(class);
		meta.discard();
		meta.package_gen += 1;
		if !universal {
			meta.cache_gen += 1;
		}
		meta.clear_method_caches();
		if universal {
			self.global_gen += 1;
		}

		for &dependent in &dependents {
			let meta = self.meta_mut(dependent);
			meta.discard();
			if !universal {
				meta.cache_gen += 1;
			}
			meta.clear_method_caches();
		}

		tracing::debug!(
			%class,
			name = ?hierarchy.canonical_name(class),
			dependents = dependents.len(),
			universal,
			"ancestor list changed"
		);

		if hierarchy.canonical_name(class).is_none() {
			// Nothing to publish, so drop every former registration now.
			let pending = std::mem::take(&mut self.meta_mut(class).pending_prune);
			for former in pending {
				self.index.remove(former, class);
			}
			return Ok(());
		}

		self.get_linear_isa(hierarchy, class).map(|_| ())
	}

	/// Notifies that a method was defined, removed or redefined in `class`.
	///
	/// Linearizations stay valid; only generations move and method caches are cleared,
	/// here and in every dependent.
	pub fn method_changed(&mut self, hierarchy: &dyn Hierarchy, class: ClassId) {
		let universal = self.is_universal(hierarchy, class);

		let meta = self.meta_mut(class);
		meta.package_gen += 1;
		if !universal {
			meta.cache_gen += 1;
		}
		meta.clear_method_caches();
		if universal {
			self.global_gen += 1;
		}

		let dependents = self.index.dependents(class);
		for &dependent in &dependents {
			let meta = self.meta_mut(dependent);
			if !universal {
				meta.cache_gen += 1;
			}
			meta.clear_method_caches();
		}

		tracing::trace!(%class, dependents = dependents.len(), universal, "method changed");
	}

	/// Notifies that the namespace slot at `location` now holds `new_class` instead of
	/// `old_class`.
	///
	/// Every class nested under `old_class` loses its name below `location`; every class
	/// nested under `new_class` gains one. All renames are applied before any class is
	/// invalidated. Each affected class is invalidated exactly once even if an earlier
	/// recomputation fails; the first error is returned. Rebinding a slot to the class it
	/// already holds is a no-op.
	pub fn namespace_moved<H: HierarchyMut>(
		&mut self,
		hierarchy: &mut H,
		new_class: Option<ClassId>,
		old_class: Option<ClassId>,
		location: &str,
	) -> Result<()> {
		// Rebinding a slot to its current occupant changes no names.
		if new_class == old_class {
			return Ok(());
		}

		let mut renames = Vec::new();
		let mut affected = IndexSet::new();
		if let Some(old) = old_class {
			gather(
				&*hierarchy,
				old,
				location,
				RenameKind::Remove,
				&mut renames,
				&mut affected,
				&mut FxHashSet::default(),
			);
		}
		if let Some(new) = new_class {
			gather(
				&*hierarchy,
				new,
				location,
				RenameKind::Add,
				&mut renames,
				&mut affected,
				&mut FxHashSet::default(),
			);
		}

		for rename in &renames {
			match rename.kind {
				RenameKind::Remove => hierarchy.remove_name(rename.class, &rename.name),
				RenameKind::Add => hierarchy.add_name(rename.class, &rename.name),
			}
		}

		tracing::debug!(
			location,
			renames = renames.len(),
			affected = affected.len(),
			"namespace moved"
		);

		let mut first_error = None;
		for class in affected {
			if let Err(err) = self.ancestor_changed(&*hierarchy, class) {
				first_error.get_or_insert(err);
			}
		}
		first_error.map_or(Ok(()), Err)
	}

	/// Invalidates every method cache in the context at once.
	pub fn invalidate_all_method_caches(&mut self) {
		self.global_gen += 1;
		tracing::trace!(global_gen = self.global_gen, "invalidated all method caches");
	}
}

fn gather<H: Hierarchy + ?Sized>(
	hierarchy: &H,
	class: ClassId,
	path: &str,
	kind: RenameKind,
	renames: &mut Vec<Rename>,
	affected: &mut IndexSet<ClassId>,
	seen: &mut FxHashSet<ClassId>,
) {
	if !seen.insert(class) {
		return;
	}
	affected.insert(class);
	renames.push(Rename {
		class,
		name: Arc::from(path),
		kind,
	});
	for (short, child) in hierarchy.nested(class) {
		let child_path = format!("{path}{SEPARATOR}{short}");
		gather(hierarchy, child, &child_path, kind, renames, affected, seen);
	}
}
