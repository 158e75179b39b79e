use pretty_assertions::assert_eq;

use super::*;

#[test]
fn new_namespace_seeds_universal() {
	let ns = Namespace::new();
	let universal = ns.universal();
	assert_eq!(ns.lookup(UNIVERSAL), Some(universal));
	assert_eq!(ns.canonical_name(universal).map(|name| &**name), Some(UNIVERSAL));
	assert!(ns.ancestors(universal).is_empty());
	assert_eq!(ns.len(), 1);
}

#[test]
fn define_creates_enclosing_namespaces() {
	let mut ns = Namespace::new();
	let leaf = ns.define("Foo::Bar::Baz", &[]);

	let foo = ns.resolve_path("Foo").expect("Foo created");
	let bar = ns.resolve_path("Foo::Bar").expect("Foo::Bar created");
	assert_eq!(ns.resolve_path("Foo::Bar::Baz"), Some(leaf));
	assert_eq!(ns.canonical_name(bar).map(|name| &**name), Some("Foo::Bar"));
	assert_eq!(ns.nested(foo), vec![(Arc::<str>::from("Bar"), bar)]);
	assert_eq!(ns.lookup("Foo::Bar::Baz"), Some(leaf));
}

#[test]
fn define_reuses_existing_class_and_replaces_ancestors() {
	let mut ns = Namespace::new();
	let a = ns.define("A", &[]);
	let b = ns.define("B", &[]);
	let c = ns.define("C", &[a]);
	assert_eq!(ns.define("C", &[b]), c);
	assert_eq!(ns.ancestors(c), &[AncestorEntry::Present(b)]);
}

#[test]
fn anonymous_class_has_no_names() {
	let mut ns = Namespace::new();
	let a = ns.define("A", &[]);
	let anon = ns.define_anonymous(&[a]);
	assert!(ns.canonical_name(anon).is_none());
	assert_eq!(ns.ancestors(anon), &[AncestorEntry::Present(a)]);
}

#[test]
fn tombstone_replaces_one_slot() {
	let mut ns = Namespace::new();
	let a = ns.define("A", &[]);
	let b = ns.define("B", &[]);
	let c = ns.define("C", &[a, b]);

	assert!(ns.tombstone_ancestor(c, 0));
	assert!(!ns.tombstone_ancestor(c, 5));
	assert_eq!(ns.ancestors(c), &[AncestorEntry::Tombstone, AncestorEntry::Present(b)]);

	ns.push_ancestor(c, a);
	assert_eq!(ns.ancestors(c).len(), 3);
}

#[test]
fn alias_resolves_without_becoming_a_name() {
	let mut ns = Namespace::new();
	let a = ns.define("A", &[]);
	ns.alias("Alias", a);

	assert_eq!(ns.lookup("Alias"), Some(a));
	assert_eq!(ns.names(a), &[Arc::<str>::from("A")]);
	assert_eq!(ns.descriptor(a).map(|desc| desc.aliases().len()), Some(1));
}

#[test]
fn bind_swaps_slot_occupants_only() {
	let mut ns = Namespace::new();
	let a = ns.define("A", &[]);
	let b = ns.define("B", &[]);

	assert_eq!(ns.bind("A", Some(b)), Some(a));
	assert_eq!(ns.resolve_path("A"), Some(b));
	// Names only move through HierarchyMut.
	assert_eq!(ns.lookup("A"), Some(a));

	assert_eq!(ns.bind("A", None), Some(b));
	assert_eq!(ns.resolve_path("A"), None);
	assert_eq!(ns.bind("New::Slot", Some(a)), None);
	assert_eq!(ns.resolve_path("New::Slot"), Some(a));
}

#[test]
fn names_are_added_and_removed() {
	let mut ns = Namespace::new();
	let a = ns.define("A", &[]);

	ns.add_name(a, "Other");
	ns.add_name(a, "Other");
	assert_eq!(ns.names(a).len(), 2);
	assert_eq!(ns.lookup("Other"), Some(a));

	ns.remove_name(a, "A");
	assert_eq!(ns.canonical_name(a).map(|name| &**name), Some("Other"));
	assert_eq!(ns.lookup("A"), None);

	ns.remove_name(a, "Missing");
	assert_eq!(ns.names(a).len(), 1);
}

#[test]
fn unknown_handles_read_as_empty() {
	let ns = Namespace::new();
	let foreign = ClassId::from_u32(99);
	assert!(ns.names(foreign).is_empty());
	assert!(ns.ancestors(foreign).is_empty());
	assert!(ns.nested(foreign).is_empty());
	assert!(ns.descriptor(foreign).is_none());
}
