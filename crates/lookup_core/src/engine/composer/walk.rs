use std::sync::Arc;

use crate::engine::enumerate::Evaluation;
use crate::engine::redirect::create_value;
use crate::engine::{
	DecomposeOptions, DecomposedMember, Descriptor, Fault, LookupError, Measurement, MemberAttributes, Result, TypeInfo, Value,
};

/// Explicit per-call walk state threaded through the enumerators.
pub(crate) struct WalkContext<'o> {
	pub(crate) options: &'o DecomposeOptions,
	pub(crate) input: &'o Value,
	depth: u32,
	subtype: Option<Arc<TypeInfo>>,
	descriptor: Option<Arc<dyn Descriptor>>,
	members: Vec<DecomposedMember>,
}

impl<'o> WalkContext<'o> {
	pub(crate) fn new(options: &'o DecomposeOptions, input: &'o Value) -> Self {
		Self {
			options,
			input,
			depth: 0,
			subtype: None,
			descriptor: None,
			members: Vec::with_capacity(32),
		}
	}

	/// Move to the next hierarchy level.
	pub(crate) fn enter(&mut self, ty: Arc<TypeInfo>, depth: u32, descriptor: Option<Arc<dyn Descriptor>>) {
		self.subtype = Some(ty);
		self.depth = depth;
		self.descriptor = descriptor;
	}

	/// Declaring type of the current level.
	pub(crate) fn subtype(&self) -> Result<&Arc<TypeInfo>> {
		self.subtype.as_ref().ok_or(LookupError::EngineState { accessor: "subtype" })
	}

	/// Descriptor resolved for the current level.
	pub(crate) fn descriptor(&self) -> Option<&Arc<dyn Descriptor>> {
		self.descriptor.as_ref()
	}

	/// Append one evaluated member; gated unsupported results are dropped.
	pub(crate) fn write(&mut self, name: String, attributes: MemberAttributes, evaluation: Evaluation, measurement: Measurement) -> Result<()> {
		let (raw, description) = match evaluation {
			Evaluation::Value(value, description) => (value, description.map(|text| text.to_string())),
			Evaluation::Unsupported(reason) => {
				if !self.options.include_unsupported {
					return Ok(());
				}
				(Value::from(Fault::not_supported(reason)), None)
			}
			Evaluation::Failed(fault) => {
				tracing::trace!(member = %name, kind = fault.kind(), fault = %fault, "member evaluation failed");
				(Value::from(fault), None)
			}
		};

		let subtype = self.subtype()?.clone();
		let value = create_value(self.options, &name, raw, description)?;
		self.members.push(DecomposedMember {
			depth: self.depth,
			name,
			declaring_type_name: subtype.name().to_owned(),
			declaring_type_full_name: subtype.full_name(),
			attributes,
			computation_time: measurement.elapsed,
			allocated_bytes: measurement.allocated_bytes,
			value,
		});
		Ok(())
	}

	pub(crate) fn into_members(self) -> Vec<DecomposedMember> {
		self.members
	}
}
