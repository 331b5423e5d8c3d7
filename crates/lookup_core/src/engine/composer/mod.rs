use std::borrow::Cow;
use std::sync::Arc;

use crate::engine::enumerate::{
	append_enumerable_items, decompose_events, decompose_fields, decompose_methods, decompose_properties, execute_extensions,
};
use crate::engine::{BindingFlags, DecomposeOptions, DecomposedMember, DecomposedObject, Result, TypeInfo, Value, levels, object_type};

mod walk;

pub(crate) use walk::WalkContext;

/// One decomposition call.
///
/// A composer owns nothing but its input handle and options; every
/// `decompose*` call builds a fresh walk context, so one composer can be
/// queried repeatedly and independent composers never share state.
#[derive(Debug)]
pub struct LookupComposer<'o> {
	input: Value,
	description: Option<String>,
	options: Cow<'o, DecomposeOptions>,
}

impl<'o> LookupComposer<'o> {
	/// Prepare a decomposition of `value`; `None` options use [`DecomposeOptions::default`].
	///
	/// A [`Value::Variant`] root is unwrapped and its description is carried to the result.
	pub fn new(value: &Value, options: Option<&'o DecomposeOptions>) -> Self {
		let (input, description) = match value {
			Value::Variant(variant) => (variant.value().clone(), variant.description().map(|text| text.to_string())),
			other => (other.clone(), None),
		};
		let options = match options {
			Some(options) => Cow::Borrowed(options),
			None => Cow::Owned(DecomposeOptions::default()),
		};
		Self {
			input,
			description,
			options,
		}
	}

	/// Value being decomposed, after variant unwrapping.
	pub fn input(&self) -> &Value {
		&self.input
	}

	/// Options in effect.
	pub fn options(&self) -> &DecomposeOptions {
		&self.options
	}

	/// Root node plus its full member list.
	pub fn decompose(&self) -> Result<DecomposedObject> {
		let mut object = self.decompose_object()?;
		object.members = self.decompose_members()?;
		Ok(object)
	}

	/// Root node without members.
	pub fn decompose_object(&self) -> Result<DecomposedObject> {
		if self.input.is_null() {
			return Ok(self.null_object());
		}

		let descriptor = (self.options.type_resolver)(&self.input, None)?;
		let ty = match &self.input {
			Value::Type(ty) => ty.clone(),
			other => other.type_info(),
		};
		Ok(DecomposedObject {
			name: descriptor.name().unwrap_or_else(|| self.input.display_label()),
			description: self.description.clone().or_else(|| descriptor.description()),
			type_name: ty.name().to_owned(),
			type_full_name: ty.full_name(),
			raw_value: self.input.clone(),
			descriptor: Some(descriptor),
			members: Vec::new(),
		})
	}

	/// Flat ordered member list; the per-node expansion path.
	pub fn decompose_members(&self) -> Result<Vec<DecomposedMember>> {
		let members = match &self.input {
			Value::Null => Vec::new(),
			Value::Type(ty) => self.walk_static(ty)?,
			_ => self.walk_instance()?,
		};
		tracing::debug!(
			type_name = %self.input.type_info().full_name(),
			input = self.input.kind(),
			members = members.len(),
			"decomposed members"
		);
		Ok(members)
	}

	fn walk_instance(&self) -> Result<Vec<DecomposedMember>> {
		let options = self.options();
		let ty = self.input.type_info();
		let mut ctx = WalkContext::new(options, &self.input);

		walk_levels(&mut ctx, &ty, options.binding_flags())?;
		append_enumerable_items(&mut ctx, &ty)?;
		Ok(ctx.into_members())
	}

	/// Static members of `ty` and its bases; getters run without a receiver.
	fn walk_static(&self, ty: &Arc<TypeInfo>) -> Result<Vec<DecomposedMember>> {
		let options = self.options();
		let receiver = Value::Null;
		let mut ctx = WalkContext::new(options, &receiver);

		walk_levels(&mut ctx, ty, options.static_binding_flags())?;
		Ok(ctx.into_members())
	}

	fn null_object(&self) -> DecomposedObject {
		let ty = object_type();
		DecomposedObject {
			name: "null".to_owned(),
			description: self.description.clone(),
			type_name: ty.name().to_owned(),
			type_full_name: ty.full_name(),
			raw_value: Value::Null,
			descriptor: None,
			members: Vec::new(),
		}
	}
}

/// Enumerate every hierarchy level of `ty`, most-base first.
fn walk_levels(ctx: &mut WalkContext<'_>, ty: &Arc<TypeInfo>, flags: BindingFlags) -> Result<()> {
	let options = ctx.options;
	for level in levels(ty, options.include_root) {
		let descriptor = (options.type_resolver)(ctx.input, Some(&level.ty))?;
		ctx.enter(level.ty, level.depth, Some(descriptor));

		if options.include_fields {
			decompose_fields(ctx, flags)?;
		}
		decompose_properties(ctx, flags)?;
		decompose_methods(ctx, flags)?;
		if options.include_events {
			decompose_events(ctx, flags)?;
		}
		execute_extensions(ctx)?;
	}
	Ok(())
}

/// Decompose `value` into its root node and members.
pub fn decompose(value: &Value, options: Option<&DecomposeOptions>) -> Result<DecomposedObject> {
	LookupComposer::new(value, options).decompose()
}

/// Decompose only the root node of `value`.
pub fn decompose_object(value: &Value, options: Option<&DecomposeOptions>) -> Result<DecomposedObject> {
	LookupComposer::new(value, options).decompose_object()
}

/// Decompose only the members of `value`.
pub fn decompose_members(value: &Value, options: Option<&DecomposeOptions>) -> Result<Vec<DecomposedMember>> {
	LookupComposer::new(value, options).decompose_members()
}
