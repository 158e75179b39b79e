//! Shared resolver infrastructure: handles, errors, configuration and the hierarchy seam.

pub mod config;
pub mod error;
pub mod hierarchy;
pub mod ids;

pub use config::{ConfigError, MroConfig};
pub use error::{MroError, Result};
pub use hierarchy::{AncestorEntry, Hierarchy, HierarchyMut};
pub use ids::{ClassId, ClassRef, MethodId};
