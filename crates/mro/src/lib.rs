//! Class-hierarchy linearization and method-resolution caches.
//!
//! Given classes related by a multiple-inheritance ancestor graph, this crate computes,
//! caches and incrementally invalidates each class's method resolution order (MRO).
//!
//! # Modules
//!
//! - [`core`] - Handles, errors, configuration and the [`Hierarchy`] seam
//! - [`linear`] - Published linearizations, the C3/DFS resolvers and the algorithm registry
//! - [`context`] - [`ResolverContext`]: per-class caches, membership and invalidation
//! - [`namespace`] - In-memory reference [`Namespace`] implementing [`Hierarchy`]
//!
//! # Example
//!
//! ```ignore
//! let mut ns = Namespace::new();
//! let a = ns.define("A", &[]);
//! let b = ns.define("B", &[a]);
//! let c = ns.define("C", &[a]);
//! let d = ns.define("D", &[b, c]);
//!
//! let mut ctx = ResolverContext::with_builtins();
//! let view = ctx.get_linear_isa(&ns, d)?;
//! assert_eq!(view.linearization().names().collect::<Vec<_>>(), ["D", "B", "C", "A"]);
//! assert!(ctx.is_a(&ns, d, "A")?);
//! ```

pub mod context;
pub mod core;
pub mod linear;
pub mod namespace;

pub use context::{MroMeta, ResolverContext};
pub use core::{
	AncestorEntry, ClassId, ClassRef, ConfigError, Hierarchy, HierarchyMut, MethodId, MroConfig,
	MroError, Result,
};
pub use linear::{
	Algorithm, AlgorithmId, AlgorithmRegistry, C3, Dfs, IsaSet, Linearization,
	LinearizationAlgorithm, MroView, Resolution,
};
pub use namespace::{ClassDescriptor, Namespace};

#[cfg(any(test, doc))]
pub(crate) mod invariants;
