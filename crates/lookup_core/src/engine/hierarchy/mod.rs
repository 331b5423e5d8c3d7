use std::sync::Arc;

use crate::engine::TypeInfo;

/// One type level visited by the composer.
#[derive(Debug, Clone)]
pub struct HierarchyLevel {
	/// Type whose declared members belong to this level.
	pub ty: Arc<TypeInfo>,
	/// Distance marker: the most-derived level is 1, each base level adds one.
	pub depth: u32,
}

/// Collect the base chain of `ty`, most-derived first.
///
/// The absolute root (the type without a base) is included only when
/// `include_root` is set. Inheritance is acyclic, so no visited set is kept.
pub fn hierarchy(ty: &Arc<TypeInfo>, include_root: bool) -> Vec<Arc<TypeInfo>> {
	let mut types = Vec::new();
	let mut current = ty.clone();
	while let Some(base) = current.base().cloned() {
		types.push(current);
		current = base;
	}
	if include_root {
		types.push(current);
	}
	types
}

/// Levels in walk order: most-base first, depth decreasing toward the most-derived type.
pub fn levels(ty: &Arc<TypeInfo>, include_root: bool) -> Vec<HierarchyLevel> {
	let types = hierarchy(ty, include_root);
	let count = types.len() as u32;
	types
		.into_iter()
		.rev()
		.enumerate()
		.map(|(idx, ty)| HierarchyLevel { ty, depth: count - idx as u32 })
		.collect()
}
