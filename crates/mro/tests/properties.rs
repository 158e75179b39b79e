//! Incremental invalidation against from-scratch resolution on random acyclic hierarchies.

use lineage_mro::{ClassId, Hierarchy, MroError, Namespace, ResolverContext};
use proptest::prelude::*;
use proptest::sample::Index;

/// Parent picks per class; resolved against lower-numbered classes only, so every graph is
/// acyclic.
type Shape = Vec<Vec<Index>>;

/// A mutation: the class to reparent and its new parent picks.
type Mutation = (Index, Vec<Index>);

fn arb_shape() -> impl Strategy<Value = Shape> {
	prop::collection::vec(prop::collection::vec(any::<Index>(), 0..4), 2..12)
}

fn arb_mutations() -> impl Strategy<Value = Vec<Mutation>> {
	prop::collection::vec((any::<Index>(), prop::collection::vec(any::<Index>(), 0..4)), 1..8)
}

fn parents_of(classes: &[ClassId], position: usize, picks: &[Index]) -> Vec<ClassId> {
	if position == 0 {
		return Vec::new();
	}
	let mut parents: Vec<ClassId> = Vec::new();
	for pick in picks {
		let parent = classes[pick.index(position)];
		if !parents.contains(&parent) {
			parents.push(parent);
		}
	}
	parents
}

fn build(shape: &Shape) -> (Namespace, Vec<ClassId>) {
	let mut ns = Namespace::new();
	let mut classes = Vec::with_capacity(shape.len());
	for (position, picks) in shape.iter().enumerate() {
		let parents = parents_of(&classes, position, picks);
		classes.push(ns.define(&format!("K{position}"), &parents));
	}
	(ns, classes)
}

fn select(ctx: &mut ResolverContext, classes: &[ClassId], dfs_mask: &[bool]) {
	for (&class, &dfs) in classes.iter().zip(dfs_mask) {
		if dfs {
			ctx.set_algorithm(class, "dfs").unwrap();
		}
	}
}

fn resolve_all(
	ctx: &mut ResolverContext,
	ns: &Namespace,
	classes: &[ClassId],
) -> Vec<Result<Vec<String>, MroError>> {
	classes
		.iter()
		.map(|&class| {
			ctx.get_linear_isa(ns, class).map(|view| {
				view.linearization()
					.names()
					.map(str::to_owned)
					.collect()
			})
		})
		.collect()
}

/// Every cached (class, ancestor) pair must be visible through `dependents`.
fn check_index(ctx: &ResolverContext, classes: &[ClassId]) -> Result<(), TestCaseError> {
	for &class in classes {
		let Some(linear) = ctx.cached_linearization(class) else {
			continue;
		};
		for entry in linear.ancestors() {
			prop_assert!(
				ctx.dependents(entry.id).contains(&class),
				"{} missing from dependents of {}",
				linear.head(),
				entry
			);
		}
	}
	Ok(())
}

proptest! {
	/// After any sequence of reparentings, cached answers match a fresh context.
	#[test]
	fn prop_incremental_matches_fresh(
		shape in arb_shape(),
		mutations in arb_mutations(),
		dfs_mask in prop::collection::vec(any::<bool>(), 12),
	) {
		let (mut ns, classes) = build(&shape);
		let mut ctx = ResolverContext::with_builtins();
		select(&mut ctx, &classes, &dfs_mask);
		resolve_all(&mut ctx, &ns, &classes);
		check_index(&ctx, &classes)?;

		for (target, picks) in &mutations {
			let position = target.index(classes.len());
			let class = classes[position];
			let parents = parents_of(&classes, position, picks);
			ns.set_ancestors(class, &parents);
			// Eager recompute may legitimately fail on an inconsistent C3 merge.
			let _ = ctx.ancestor_changed(&ns, class);
			check_index(&ctx, &classes)?;

			resolve_all(&mut ctx, &ns, &classes);
			check_index(&ctx, &classes)?;
		}

		let mut fresh = ResolverContext::with_builtins();
		select(&mut fresh, &classes, &dfs_mask);
		prop_assert_eq!(
			resolve_all(&mut ctx, &ns, &classes),
			resolve_all(&mut fresh, &ns, &classes)
		);
	}

	/// A successful C3 result starts with the class and never repeats a class.
	#[test]
	fn prop_linearization_is_duplicate_free(shape in arb_shape()) {
		let (ns, classes) = build(&shape);
		let mut ctx = ResolverContext::with_builtins();
		for &class in &classes {
			let Ok(view) = ctx.get_linear_isa(&ns, class) else {
				continue;
			};
			let ids: Vec<ClassId> = view.linearization().ids().collect();
			prop_assert_eq!(ids[0], class);
			let mut sorted = ids.clone();
			sorted.sort_unstable();
			sorted.dedup();
			prop_assert_eq!(sorted.len(), ids.len());
		}
	}

	/// Each parent's C3 order is a subsequence of its child's.
	#[test]
	fn prop_c3_is_monotonic(shape in arb_shape()) {
		let (ns, classes) = build(&shape);
		let mut ctx = ResolverContext::with_builtins();
		for &class in &classes {
			let Ok(view) = ctx.get_linear_isa(&ns, class) else {
				continue;
			};
			let child: Vec<ClassId> = view.linearization().ids().collect();
			for parent in ns.ancestors(class) {
				let parent = parent.resolve(ns.universal());
				let parent_view = ctx.get_linear_isa(&ns, parent).unwrap();
				let mut rest = child.iter();
				for id in parent_view.linearization().ids() {
					prop_assert!(rest.any(|&c| c == id), "parent order not preserved");
				}
			}
		}
	}
}
