use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use crate::engine::composer::WalkContext;
use crate::engine::{
	BindingFlags, Descriptor, ExtensionManager, Fault, Handler, Measurement, MemberAttributes, MemberInfo, MemberKind, Result, TypeInfo, Value,
	Variant, context_matches, measure,
};

pub(crate) const UNSUPPORTED_METHOD: &str = "Unsupported method overload";
pub(crate) const VOID_METHOD: &str = "Method does not return a value";
pub(crate) const UNIMPLEMENTED_METHOD: &str = "Method does not have an implementation";
pub(crate) const UNSUPPORTED_PROPERTY: &str = "Unsupported property overload";
pub(crate) const NO_GETTER: &str = "Property does not have a get accessor, it cannot be read";
pub(crate) const NO_FIELD_ACCESSOR: &str = "Field does not have a value accessor";
pub(crate) const DISABLED: &str = "Member is disabled";

/// Result of evaluating one member before it is collapsed into a display value.
#[derive(Debug)]
pub(crate) enum Evaluation {
	/// Produced value with an optional variant label.
	Value(Value, Option<Arc<str>>),
	/// Deliberately not evaluated; emitted only when unsupported members are included.
	Unsupported(Arc<str>),
	/// Evaluation raised a fault; always emitted.
	Failed(Fault),
}

impl Evaluation {
	fn from_invoke(result: std::result::Result<Value, Fault>) -> Self {
		match result {
			Ok(value) => Self::Value(value, None),
			Err(fault) => Self::Failed(fault.into_cause()),
		}
	}
}

/// Unwrap resolver and extension results into a single evaluation.
pub(crate) fn collapse(value: Value) -> Evaluation {
	match value {
		Value::Variant(variant) => collapse_variant(&variant),
		Value::Variants(items) => match items.single() {
			Some(only) => collapse_variant(only),
			None if items.is_empty() => Evaluation::Unsupported(Arc::from(DISABLED)),
			None => Evaluation::Value(Value::Variants(items), None),
		},
		other => Evaluation::Value(other, None),
	}
}

fn collapse_variant(variant: &Variant) -> Evaluation {
	if variant.is_disabled() {
		return Evaluation::Unsupported(Arc::from(DISABLED));
	}
	Evaluation::Value(variant.value().clone(), variant.description().cloned())
}

/// Run a descriptor-provided handler, catching failures and panics.
pub(crate) fn run_handler(handler: Handler<'_>) -> Evaluation {
	match catch_unwind(AssertUnwindSafe(handler)) {
		Ok(Ok(value)) => collapse(value),
		Ok(Err(fault)) => Evaluation::Failed(fault.into_cause()),
		Err(payload) => Evaluation::Failed(Fault::from_panic(payload)),
	}
}

/// Fields declared at the current level.
pub(crate) fn decompose_fields(ctx: &mut WalkContext<'_>, flags: BindingFlags) -> Result<()> {
	let members = ctx.subtype()?.fields(flags);
	decompose_all(ctx, &members)
}

/// Properties declared at the current level.
pub(crate) fn decompose_properties(ctx: &mut WalkContext<'_>, flags: BindingFlags) -> Result<()> {
	let members = ctx.subtype()?.properties(flags);
	decompose_all(ctx, &members)
}

/// Methods declared at the current level.
pub(crate) fn decompose_methods(ctx: &mut WalkContext<'_>, flags: BindingFlags) -> Result<()> {
	let members = ctx.subtype()?.methods(flags);
	decompose_all(ctx, &members)
}

/// Events declared at the current level.
pub(crate) fn decompose_events(ctx: &mut WalkContext<'_>, flags: BindingFlags) -> Result<()> {
	let members = ctx.subtype()?.events(flags);
	decompose_all(ctx, &members)
}

fn decompose_all(ctx: &mut WalkContext<'_>, members: &[Arc<MemberInfo>]) -> Result<()> {
	for member in members {
		// Family + security-critical members fault the host on touch; they are never evaluated.
		if member.is_unsafe() || member.is_special_name {
			continue;
		}

		let (evaluation, measurement) = evaluate(ctx, member);
		ctx.write(member.signature(), MemberAttributes::of(member), evaluation, measurement)?;
	}
	Ok(())
}

fn evaluate(ctx: &WalkContext<'_>, member: &Arc<MemberInfo>) -> (Evaluation, Measurement) {
	match catch_unwind(AssertUnwindSafe(|| resolve(ctx, member))) {
		Ok(Some(handler)) => return measure(|| run_handler(handler)),
		Ok(None) => {}
		Err(payload) => return (Evaluation::Failed(Fault::from_panic(payload)), Measurement::default()),
	}

	if let Some(evaluation) = check_shape(member) {
		return (evaluation, Measurement::default());
	}

	if member.kind == MemberKind::Event {
		return (Evaluation::Value(Value::Member(member.clone()), None), Measurement::default());
	}

	let target = ctx.input;
	let (result, measurement) = measure(|| member.invoke(target));
	(Evaluation::from_invoke(result), measurement)
}

/// Offer the level descriptor a chance to override `member`; context-typed resolvers go first.
fn resolve<'a>(ctx: &'a WalkContext<'_>, member: &MemberInfo) -> Option<Handler<'a>> {
	let descriptor = ctx.descriptor()?.as_ref();
	if let (Some(resolver), Some(context)) = (descriptor.as_context_resolver(), ctx.options.context()) {
		if context_matches(resolver.context_type(), context) {
			if let Some(handler) = resolver.resolve_with(context, &member.name, &member.parameters) {
				return Some(handler);
			}
		}
	}
	descriptor.as_resolver()?.resolve(&member.name, &member.parameters)
}

/// Placeholder for members that cannot be auto-invoked with zero context.
fn check_shape(member: &MemberInfo) -> Option<Evaluation> {
	let requires_args = member.parameters.iter().any(|param| !param.optional);
	match member.kind {
		MemberKind::Field if member.getter.is_none() => Some(Evaluation::Failed(Fault::not_supported(NO_FIELD_ACCESSOR))),
		MemberKind::Property if requires_args => Some(Evaluation::Unsupported(Arc::from(UNSUPPORTED_PROPERTY))),
		MemberKind::Property if member.getter.is_none() => Some(Evaluation::Failed(Fault::not_supported(NO_GETTER))),
		MemberKind::Method if requires_args => Some(Evaluation::Unsupported(Arc::from(UNSUPPORTED_METHOD))),
		MemberKind::Method if member.return_type.is_none() => Some(Evaluation::Unsupported(Arc::from(VOID_METHOD))),
		MemberKind::Method if member.getter.is_none() => Some(Evaluation::Failed(Fault::not_supported(UNIMPLEMENTED_METHOD))),
		_ => None,
	}
}

/// Synthetic members registered by the level descriptor, appended after reflected ones.
pub(crate) fn execute_extensions(ctx: &mut WalkContext<'_>) -> Result<()> {
	let options = ctx.options;
	if !options.enable_extensions {
		return Ok(());
	}
	let Some(descriptor) = ctx.descriptor().cloned() else {
		return Ok(());
	};

	let mut manager = ExtensionManager::new();
	let registered = catch_unwind(AssertUnwindSafe(|| register(descriptor.as_ref(), options.context(), &mut manager)));
	if let Err(payload) = registered {
		let subtype = ctx.subtype()?.full_name();
		tracing::warn!(type_name = %subtype, fault = %Fault::from_panic(payload), "extension registration panicked");
	}

	for (name, handler) in manager.into_entries() {
		let (evaluation, measurement) = measure(|| run_handler(handler));
		ctx.write(name.to_string(), MemberAttributes::EXTENSION, evaluation, measurement)?;
	}
	Ok(())
}

fn register<'a>(descriptor: &'a dyn Descriptor, context: Option<&'a dyn Any>, manager: &mut ExtensionManager<'a>) {
	if let (Some(extension), Some(context)) = (descriptor.as_context_extension(), context) {
		if context_matches(extension.context_type(), context) {
			extension.register_extensions_with(manager, context);
		}
	}
	if let Some(extension) = descriptor.as_extension() {
		extension.register_extensions(manager);
	}
}

/// Indexed pseudo-members for an enumerable input, declared by its runtime type at depth 0.
pub(crate) fn append_enumerable_items(ctx: &mut WalkContext<'_>, ty: &Arc<TypeInfo>) -> Result<()> {
	let Some(enumerator) = ty.enumerator().cloned() else {
		return Ok(());
	};
	ctx.enter(ty.clone(), 0, None);

	let input = ctx.input;
	let (items, measurement) = measure(|| catch_unwind(AssertUnwindSafe(|| enumerator(input))));
	let items = match items {
		Ok(Ok(items)) => items,
		Ok(Err(fault)) => return ctx.write("[...]".to_owned(), MemberAttributes::empty(), Evaluation::Failed(fault.into_cause()), measurement),
		Err(payload) => {
			let fault = Fault::from_panic(payload);
			return ctx.write("[...]".to_owned(), MemberAttributes::empty(), Evaluation::Failed(fault), measurement);
		}
	};

	for (idx, item) in items.into_iter().enumerate() {
		ctx.write(format!("[{idx}]"), MemberAttributes::empty(), collapse(item), Measurement::default())?;
	}
	Ok(())
}
