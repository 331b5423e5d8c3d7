use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use crate::engine::{DecomposeOptions, DecomposedValue, Descriptor, Fault, Result, Value, context_matches};

/// Value after following its redirector chain.
pub(crate) struct Redirected {
	pub(crate) value: Value,
	pub(crate) descriptor: Arc<dyn Descriptor>,
	pub(crate) description: Option<String>,
}

/// Resolve the descriptor for `value` and follow redirections until one declines.
///
/// Every step re-resolves a fresh descriptor. A caller-supplied description is
/// kept for the whole chain; otherwise the latest descriptor description wins
/// and a step without one keeps the previous one.
pub(crate) fn redirect_value(options: &DecomposeOptions, target: &str, value: Value, description: Option<String>) -> Result<Redirected> {
	let mut descriptor = (options.type_resolver)(&value, None)?;
	let labelled = description.is_some();
	let mut description = description.or_else(|| descriptor.description());
	let mut value = value;

	if !options.enable_redirection || options.max_redirects == 0 {
		return Ok(Redirected {
			value,
			descriptor,
			description,
		});
	}

	let mut steps = 0;
	while let Some(next) = try_redirect(descriptor.as_ref(), target, options.context()) {
		if steps == options.max_redirects {
			tracing::warn!(
				member = target,
				max_redirects = options.max_redirects,
				type_name = %value.type_info().full_name(),
				"redirection chain truncated"
			);
			break;
		}
		value = next;
		descriptor = (options.type_resolver)(&value, None)?;
		if !labelled && let Some(text) = descriptor.description() {
			description = Some(text);
		}
		steps += 1;
	}

	Ok(Redirected {
		value,
		descriptor,
		description,
	})
}

/// Build the displayable value for one member result.
pub(crate) fn create_value(options: &DecomposeOptions, target: &str, value: Value, description: Option<String>) -> Result<DecomposedValue> {
	let Redirected {
		value,
		descriptor,
		description,
	} = redirect_value(options, target, value, description)?;

	let ty = value.type_info();
	Ok(DecomposedValue {
		name: descriptor.name().unwrap_or_else(|| value.display_label()),
		description,
		type_name: ty.name().to_owned(),
		type_full_name: ty.full_name(),
		raw_value: value,
		descriptor: Some(descriptor),
	})
}

fn try_redirect(descriptor: &dyn Descriptor, target: &str, context: Option<&dyn Any>) -> Option<Value> {
	let attempt = catch_unwind(AssertUnwindSafe(|| {
		if let (Some(redirector), Some(context)) = (descriptor.as_context_redirector(), context) {
			if context_matches(redirector.context_type(), context) {
				if let Some(value) = redirector.try_redirect_with(target, context) {
					return Some(value);
				}
			}
		}
		descriptor.as_redirector().and_then(|redirector| redirector.try_redirect(target))
	}));

	match attempt {
		Ok(value) => value,
		Err(payload) => {
			tracing::trace!(member = target, fault = %Fault::from_panic(payload), "redirector panicked, keeping value");
			None
		}
	}
}

#[cfg(test)]
mod tests;
