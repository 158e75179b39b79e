use rustc_hash::FxHashSet;

use super::algorithm::{LinearizationAlgorithm, Resolution};
use crate::core::{ClassId, ClassRef, Result};

/// Depth-first, left-to-right resolver, registered as `"dfs"`.
///
/// The class, then each direct ancestor's own dfs order in declaration order, keeping the
/// first occurrence of every class.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dfs;

impl LinearizationAlgorithm for Dfs {
	fn resolve(&self, cx: &mut Resolution<'_>, class: ClassId) -> Result<Vec<ClassRef>> {
		let head = cx.class_ref(class)?;
		let mut seen = FxHashSet::default();
		seen.insert(class);
		let mut result = vec![head];

		for parent in cx.direct_ancestors(class) {
			let parent_linear = cx.parent_linearization(parent)?;
			for entry in parent_linear.iter() {
				if seen.insert(entry.id) {
					result.push(entry.clone());
				}
			}
		}

		Ok(result)
	}
}
