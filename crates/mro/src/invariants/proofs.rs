use std::sync::Arc;

use pretty_assertions::assert_eq;

use crate::context::ResolverContext;
use crate::core::{ClassId, Hierarchy};
use crate::namespace::Namespace;

/// Every (ancestor, class) pair of every cached linearization, checked against the index.
pub(crate) fn assert_index_covers_published(ctx: &ResolverContext) {
	for (&class, meta) in &ctx.metas {
		for linear in meta.linearizations() {
			for entry in linear.ancestors() {
				assert!(
					ctx.index.contains(entry.id, class),
					"{} missing from the dependents of {}",
					linear.head(),
					entry.name
				);
			}
		}
	}
}

fn diamond() -> (Namespace, [ClassId; 4]) {
	let mut ns = Namespace::new();
	let a = ns.define("A", &[]);
	let b = ns.define("B", &[a]);
	let c = ns.define("C", &[a]);
	let d = ns.define("D", &[b, c]);
	(ns, [a, b, c, d])
}

/// Invariant: A published linearization is never mutated; invalidation replaces it.
pub(crate) fn inv_published_linearization_survives_invalidation() {
	let (mut ns, [a, b, _, d]) = diamond();
	let mut ctx = ResolverContext::with_builtins();

	let before = Arc::clone(ctx.get_linear_isa(&ns, d).unwrap().linearization());
	let snapshot: Vec<String> = before.names().map(str::to_owned).collect();

	let z = ns.define("Z", &[]);
	ns.set_ancestors(b, &[z, a]);
	ctx.ancestor_changed(&ns, b).unwrap();

	let after = Arc::clone(ctx.get_linear_isa(&ns, d).unwrap().linearization());
	assert!(!Arc::ptr_eq(&before, &after));
	assert_eq!(before.names().collect::<Vec<_>>(), snapshot);
	assert_eq!(after.names().collect::<Vec<_>>(), ["D", "B", "Z", "C", "A"]);
}

#[cfg_attr(test, test)]
pub(crate) fn test_published_linearization_survives_invalidation() {
	inv_published_linearization_survives_invalidation()
}

/// Invariant: Every published linearization is registered in the ancestor index.
pub(crate) fn inv_ancestor_index_covers_published() {
	let (mut ns, [a, b, c, d]) = diamond();
	let mut ctx = ResolverContext::with_builtins();

	ctx.get_linear_isa(&ns, d).unwrap();
	assert_index_covers_published(&ctx);
	assert_eq!(ctx.dependents(a), vec![b, c, d]);

	// A second algorithm's cache is covered as well.
	ctx.set_algorithm(d, "dfs").unwrap();
	ctx.get_linear_isa(&ns, d).unwrap();
	assert_index_covers_published(&ctx);

	let e = ns.define("E", &[]);
	ns.push_ancestor(c, e);
	ctx.ancestor_changed(&ns, c).unwrap();
	ctx.get_linear_isa(&ns, d).unwrap();
	assert_index_covers_published(&ctx);
	assert!(ctx.dependents(e).contains(&d));
}

#[cfg_attr(test, test)]
pub(crate) fn test_ancestor_index_covers_published() {
	inv_ancestor_index_covers_published()
}

/// Invariant: Invalidation discards every dependent before anything is recomputed.
pub(crate) fn inv_dependents_never_recompute_from_stale_ancestor() {
	let (mut ns, [a, b, _, d]) = diamond();
	let mut ctx = ResolverContext::with_builtins();
	ctx.get_linear_isa(&ns, d).unwrap();

	let z = ns.define("Z", &[]);
	ns.set_ancestors(a, &[z]);
	ctx.ancestor_changed(&ns, a).unwrap();

	// Only the mutated class is recomputed eagerly.
	assert!(ctx.cached_linearization(a).is_some());
	assert!(ctx.cached_linearization(b).is_none());
	assert!(ctx.cached_linearization(d).is_none());

	let view = ctx.get_linear_isa(&ns, d).unwrap();
	assert_eq!(
		view.linearization().names().collect::<Vec<_>>(),
		["D", "B", "C", "A", "Z"]
	);
	assert!(view.isa().contains("Z"));
}

#[cfg_attr(test, test)]
pub(crate) fn test_dependents_never_recompute_from_stale_ancestor() {
	inv_dependents_never_recompute_from_stale_ancestor()
}

/// Invariant: An ancestor dropped from a class's MRO stops listing the class.
pub(crate) fn inv_former_ancestors_are_pruned() {
	let mut ns = Namespace::new();
	let a = ns.define("A", &[]);
	let b = ns.define("B", &[a]);
	let c = ns.define("C", &[b]);
	let mut ctx = ResolverContext::with_builtins();
	ctx.get_linear_isa(&ns, c).unwrap();
	assert_eq!(ctx.dependents(a), vec![b, c]);

	ns.set_ancestors(b, &[]);
	ctx.ancestor_changed(&ns, b).unwrap();
	assert_eq!(ctx.dependents(a), vec![c], "b pruned on its eager recompute");

	ctx.get_linear_isa(&ns, c).unwrap();
	assert!(ctx.dependents(a).is_empty(), "c pruned when it recomputes");
	assert_eq!(ctx.dependents(b), vec![c]);
	assert_index_covers_published(&ctx);

	// An anonymous class has nothing to publish and is pruned immediately.
	let anon = ns.define_anonymous(&[a]);
	ctx.ancestor_changed(&ns, anon).unwrap();
	assert!(ctx.dependents(a).is_empty());
	assert!(ns.canonical_name(anon).is_none());
}

#[cfg_attr(test, test)]
pub(crate) fn test_former_ancestors_are_pruned() {
	inv_former_ancestors_are_pruned()
}
