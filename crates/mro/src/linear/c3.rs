//! C3 linearization.
//!
//! The merge guarantees local precedence order (a class precedes its direct ancestors in
//! the order they were declared), monotonicity (an ancestor's MRO is a subsequence of its
//! descendants' MROs) and consistent extension.
//!
//! # Merge
//!
//! `seqs` holds every parent linearization followed by the direct-ancestor list. `tails`
//! counts, over all sequences, every class that sits behind a head. A head is acceptable
//! when its tail count is zero; the first acceptable head is appended to the result and
//! every sequence headed by it advances, decrementing the count of the newly exposed
//! head. When heads remain but none is acceptable the hierarchy is inconsistent.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::algorithm::{LinearizationAlgorithm, Resolution};
use super::Linearization;
use crate::core::{ClassId, ClassRef, MroError, Result};

/// The default resolver, registered as `"c3"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct C3;

impl LinearizationAlgorithm for C3 {
	fn resolve(&self, cx: &mut Resolution<'_>, class: ClassId) -> Result<Vec<ClassRef>> {
		let head = cx.class_ref(class)?;
		let parents = cx.direct_ancestors(class);

		match parents.as_slice() {
			[] => Ok(vec![head]),
			// Single inheritance: the merge of one sequence is the sequence itself.
			&[parent] => {
				let parent_linear = cx.parent_linearization(parent)?;
				let mut result = Vec::with_capacity(parent_linear.len() + 1);
				result.push(head);
				result.extend(parent_linear.iter().cloned());
				Ok(result)
			}
			_ => {
				let mut parent_linears = Vec::with_capacity(parents.len());
				for &parent in &parents {
					parent_linears.push(cx.parent_linearization(parent)?);
				}
				let direct = parents
					.iter()
					.map(|&parent| cx.class_ref(parent))
					.collect::<Result<Vec<_>>>()?;
				merge(head, &parent_linears, &direct)
			}
		}
	}
}

fn merge(
	head: ClassRef,
	parent_linears: &[Arc<Linearization>],
	direct: &[ClassRef],
) -> Result<Vec<ClassRef>> {
	let seqs: Vec<&[ClassRef]> = parent_linears
		.iter()
		.map(|linear| linear.entries())
		.chain(std::iter::once(direct))
		.collect();
	let mut cursors = vec![0usize; seqs.len()];

	let mut tails: FxHashMap<ClassId, usize> = FxHashMap::default();
	for seq in &seqs {
		for entry in seq.iter().skip(1) {
			*tails.entry(entry.id).or_default() += 1;
		}
	}

	let mut result = vec![head];
	loop {
		let mut winner: Option<&ClassRef> = None;
		let mut blocked: Option<&ClassRef> = None;
		for (seq, &cursor) in seqs.iter().zip(&cursors) {
			let Some(candidate) = seq.get(cursor) else {
				continue;
			};
			if tails.get(&candidate.id).copied().unwrap_or(0) == 0 {
				winner = Some(candidate);
				break;
			}
			blocked.get_or_insert(candidate);
		}

		let winner = match (winner, blocked) {
			(Some(winner), _) => winner.clone(),
			(None, None) => break,
			(None, Some(blocking)) => {
				let class = Arc::clone(&result[0].name);
				tracing::debug!(class = %class, blocking = %blocking, "C3 merge failed");
				return Err(MroError::InconsistentHierarchy {
					class,
					partial: result.iter().map(|entry| Arc::clone(&entry.name)).collect(),
					blocking: Arc::clone(&blocking.name),
				});
			}
		};

		for (seq, cursor) in seqs.iter().zip(cursors.iter_mut()) {
			if seq.get(*cursor).is_some_and(|entry| entry.id == winner.id) {
				*cursor += 1;
				if let Some(exposed) = seq.get(*cursor)
					&& let Some(count) = tails.get_mut(&exposed.id)
				{
					*count -= 1;
				}
			}
		}
		result.push(winner);
	}

	Ok(result)
}
