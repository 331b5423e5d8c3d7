use std::sync::Arc;
use std::time::Duration;

use bitflags::bitflags;

use crate::engine::{Descriptor, MemberInfo, MemberKind, Value};

bitflags! {
	/// Display attributes of one decomposed member.
	#[derive(Debug, Clone, Copy, PartialEq, Eq)]
	pub struct MemberAttributes: u8 {
		/// Not publicly visible.
		const PRIVATE = 1 << 0;
		/// Type-level member.
		const STATIC = 1 << 1;
		/// Property.
		const PROPERTY = 1 << 2;
		/// Method.
		const METHOD = 1 << 3;
		/// Field.
		const FIELD = 1 << 4;
		/// Event.
		const EVENT = 1 << 5;
		/// Descriptor-contributed synthetic member.
		const EXTENSION = 1 << 6;
	}
}

impl MemberAttributes {
	/// Attributes describing a reflected member.
	pub fn of(member: &MemberInfo) -> Self {
		let mut attributes = match member.kind {
			MemberKind::Field => Self::FIELD,
			MemberKind::Property => Self::PROPERTY,
			MemberKind::Method => Self::METHOD,
			MemberKind::Event => Self::EVENT,
		};
		if !member.is_public() {
			attributes |= Self::PRIVATE;
		}
		if member.is_static {
			attributes |= Self::STATIC;
		}
		attributes
	}

	/// Compact label such as `private static property`.
	pub fn label(self) -> String {
		let mut parts = Vec::new();
		if self.contains(Self::PRIVATE) {
			parts.push("private");
		}
		if self.contains(Self::STATIC) {
			parts.push("static");
		}
		for (flag, name) in [
			(Self::FIELD, "field"),
			(Self::PROPERTY, "property"),
			(Self::METHOD, "method"),
			(Self::EVENT, "event"),
			(Self::EXTENSION, "extension"),
		] {
			if self.contains(flag) {
				parts.push(name);
			}
		}
		if parts.is_empty() { "item".to_owned() } else { parts.join(" ") }
	}
}

/// Root result for one inspected value.
#[derive(Debug, Clone)]
pub struct DecomposedObject {
	/// Display name.
	pub name: String,
	/// Optional free text.
	pub description: Option<String>,
	/// Runtime type name.
	pub type_name: String,
	/// Namespace-qualified runtime type name.
	pub type_full_name: String,
	/// Inspected value handle; `Null` only for the null sentinel.
	pub raw_value: Value,
	/// Descriptor resolved for the root; `None` for the null sentinel.
	pub descriptor: Option<Arc<dyn Descriptor>>,
	/// Members in walk order; empty for root-only projections.
	pub members: Vec<DecomposedMember>,
}

/// One reflected or synthetic member at a hierarchy depth.
#[derive(Debug, Clone)]
pub struct DecomposedMember {
	/// Hierarchy level; 1 is the most-derived type, 0 marks enumerable items.
	pub depth: u32,
	/// Formatted signature.
	pub name: String,
	/// Declaring type name.
	pub declaring_type_name: String,
	/// Namespace-qualified declaring type name.
	pub declaring_type_full_name: String,
	/// Kind and visibility flags.
	pub attributes: MemberAttributes,
	/// Time spent producing the value.
	pub computation_time: Duration,
	/// Bytes allocated while producing the value.
	pub allocated_bytes: u64,
	/// Produced value.
	pub value: DecomposedValue,
}

impl DecomposedMember {
	/// Computation time in fractional milliseconds.
	pub fn computation_time_ms(&self) -> f64 {
		self.computation_time.as_secs_f64() * 1000.0
	}
}

/// Outcome of evaluating one member.
#[derive(Debug, Clone)]
pub struct DecomposedValue {
	/// Produced value after redirection; a [`Value::Fault`] on failure.
	pub raw_value: Value,
	/// Display label.
	pub name: String,
	/// Description carried through the redirection chain.
	pub description: Option<String>,
	/// Runtime type name of the produced value.
	pub type_name: String,
	/// Namespace-qualified runtime type name of the produced value.
	pub type_full_name: String,
	/// Descriptor resolved for the produced value's runtime type.
	pub descriptor: Option<Arc<dyn Descriptor>>,
}
