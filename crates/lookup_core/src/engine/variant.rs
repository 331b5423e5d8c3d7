use std::sync::Arc;

use crate::engine::Value;

/// One named candidate result produced by a resolver or extension handler.
#[derive(Debug, Clone)]
pub struct Variant {
	value: Value,
	description: Option<Arc<str>>,
	disabled: bool,
}

impl Variant {
	/// Result without a label.
	pub fn new(value: impl Into<Value>) -> Self {
		Self {
			value: value.into(),
			description: None,
			disabled: false,
		}
	}

	/// Result with a label.
	pub fn with_description(value: impl Into<Value>, description: impl Into<Arc<str>>) -> Self {
		Self {
			value: value.into(),
			description: Some(description.into()),
			disabled: false,
		}
	}

	/// Sentinel marking a member as intentionally unsupported.
	pub fn disabled() -> Self {
		Self {
			value: Value::Null,
			description: None,
			disabled: true,
		}
	}

	/// Produced value.
	pub fn value(&self) -> &Value {
		&self.value
	}

	/// Label, if any.
	pub fn description(&self) -> Option<&Arc<str>> {
		self.description.as_ref()
	}

	/// Whether this is the disabled sentinel.
	pub fn is_disabled(&self) -> bool {
		self.disabled
	}
}

/// Ordered collection of variants for one logical member.
#[derive(Debug, Clone, Default)]
pub struct Variants {
	items: Vec<Variant>,
}

impl Variants {
	/// Empty collection.
	pub fn new() -> Self {
		Self::default()
	}

	/// Empty collection with room for `capacity` results.
	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			items: Vec::with_capacity(capacity),
		}
	}

	/// Collection holding only the disabled sentinel.
	pub fn disabled() -> Self {
		Self {
			items: vec![Variant::disabled()],
		}
	}

	/// Append a labelled result.
	pub fn add(mut self, value: impl Into<Value>, description: impl Into<Arc<str>>) -> Self {
		self.items.push(Variant::with_description(value, description));
		self
	}

	/// Append a prepared variant.
	pub fn push(&mut self, variant: Variant) {
		self.items.push(variant);
	}

	/// Number of results.
	pub fn len(&self) -> usize {
		self.items.len()
	}

	/// Whether there are no results.
	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	/// Iterate results in insertion order.
	pub fn iter(&self) -> std::slice::Iter<'_, Variant> {
		self.items.iter()
	}

	/// The only result, when there is exactly one.
	pub fn single(&self) -> Option<&Variant> {
		match self.items.as_slice() {
			[only] => Some(only),
			_ => None,
		}
	}
}

impl FromIterator<Variant> for Variants {
	fn from_iter<I: IntoIterator<Item = Variant>>(iter: I) -> Self {
		Self {
			items: iter.into_iter().collect(),
		}
	}
}

impl<'a> IntoIterator for &'a Variants {
	type Item = &'a Variant;
	type IntoIter = std::slice::Iter<'a, Variant>;

	fn into_iter(self) -> Self::IntoIter {
		self.items.iter()
	}
}
