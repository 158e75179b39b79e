use std::sync::Arc;

use super::ids::ClassId;

/// Result alias for resolver operations.
pub type Result<T, E = MroError> = std::result::Result<T, E>;

/// Fatal resolution errors.
///
/// Every variant is reported to the immediate caller; nothing is retried and no
/// default ordering is substituted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MroError {
	/// The ancestor graph is deeper than the configured limit (usually a cycle).
	#[error("recursive inheritance detected in class '{class}' (depth limit {limit})")]
	RecursionTooDeep { class: Arc<str>, limit: usize },

	/// The class has no canonical name to linearize under.
	#[error("can't linearize anonymous class {class}")]
	AnonymousClass { class: ClassId },

	/// The C3 merge found no acceptable candidate.
	#[error(
		"inconsistent hierarchy during C3 merge of class '{class}':\n\tcurrent merge results [\n{}\t]\n\tmerging failed on '{blocking}'",
		render_partial(.partial)
	)]
	InconsistentHierarchy {
		class: Arc<str>,
		partial: Vec<Arc<str>>,
		blocking: Arc<str>,
	},

	/// No linearization algorithm is registered under the name.
	#[error("invalid mro name: '{name}'")]
	UnknownAlgorithm { name: String },
}

fn render_partial(partial: &[Arc<str>]) -> String {
	partial.iter().map(|name| format!("\t\t{name},\n")).collect()
}

impl MroError {
	pub(crate) fn unknown_algorithm(name: impl Into<String>) -> Self {
		Self::UnknownAlgorithm { name: name.into() }
	}
}
