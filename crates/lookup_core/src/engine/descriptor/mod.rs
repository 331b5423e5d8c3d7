use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

use crate::engine::{Fault, LookupError, ParameterInfo, TypeInfo, Value};

/// Zero-argument producer for a resolved or synthetic member value.
pub type Handler<'a> = Box<dyn FnOnce() -> Result<Value, Fault> + 'a>;

/// Maps `(value, declaring type)` to the descriptor customizing it.
///
/// The declaring type is `None` when resolving a value's own descriptor and
/// `Some` when resolving the descriptor for one hierarchy level.
pub type TypeResolver = Arc<dyn Fn(&Value, Option<&TypeInfo>) -> Result<Arc<dyn Descriptor>, LookupError>>;

/// Pluggable customization of how a value is named, resolved, redirected, and extended.
///
/// Capabilities are discovered through the `as_*` accessors; a descriptor
/// implements any subset of them.
pub trait Descriptor {
	/// Display name; `None` falls back to the value's label.
	fn name(&self) -> Option<String> {
		None
	}

	/// Free-text description.
	fn description(&self) -> Option<String> {
		None
	}

	/// Context-free member override.
	fn as_resolver(&self) -> Option<&dyn Resolver> {
		None
	}

	/// Context-typed member override, tried before [`Descriptor::as_resolver`].
	fn as_context_resolver(&self) -> Option<&dyn ContextResolver> {
		None
	}

	/// Context-free value substitution.
	fn as_redirector(&self) -> Option<&dyn Redirector> {
		None
	}

	/// Context-typed value substitution, tried before [`Descriptor::as_redirector`].
	fn as_context_redirector(&self) -> Option<&dyn ContextRedirector> {
		None
	}

	/// Context-free synthetic members.
	fn as_extension(&self) -> Option<&dyn Extension> {
		None
	}

	/// Context-typed synthetic members, registered before [`Descriptor::as_extension`].
	fn as_context_extension(&self) -> Option<&dyn ContextExtension> {
		None
	}
}

impl fmt::Debug for dyn Descriptor + '_ {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Descriptor")
			.field("name", &self.name())
			.field("resolver", &(self.as_resolver().is_some() || self.as_context_resolver().is_some()))
			.field("redirector", &(self.as_redirector().is_some() || self.as_context_redirector().is_some()))
			.field("extension", &(self.as_extension().is_some() || self.as_context_extension().is_some()))
			.finish()
	}
}

/// Overrides how individual members are evaluated.
pub trait Resolver {
	/// Handler for `target` with `parameters`, or `None` to defer to reflection.
	fn resolve(&self, target: &str, parameters: &[ParameterInfo]) -> Option<Handler<'_>>;
}

/// [`Resolver`] that needs the ambient context.
pub trait ContextResolver {
	/// Concrete context type this resolver expects.
	fn context_type(&self) -> TypeId;

	/// Handler for `target`; only called when the context has [`ContextResolver::context_type`].
	fn resolve_with<'a>(&'a self, context: &'a dyn Any, target: &str, parameters: &[ParameterInfo]) -> Option<Handler<'a>>;
}

/// Substitutes a wrapper value with the value it stands for.
pub trait Redirector {
	/// Replacement for the value displayed under `target`, or `None` to decline.
	fn try_redirect(&self, target: &str) -> Option<Value>;
}

/// [`Redirector`] that needs the ambient context.
pub trait ContextRedirector {
	/// Concrete context type this redirector expects.
	fn context_type(&self) -> TypeId;

	/// Replacement for the value displayed under `target`, or `None` to decline.
	fn try_redirect_with(&self, target: &str, context: &dyn Any) -> Option<Value>;
}

/// Contributes synthetic members for the current declaring type.
pub trait Extension {
	/// Register zero or more named handlers.
	fn register_extensions<'a>(&'a self, manager: &mut ExtensionManager<'a>);
}

/// [`Extension`] that needs the ambient context.
pub trait ContextExtension {
	/// Concrete context type this extension expects.
	fn context_type(&self) -> TypeId;

	/// Register zero or more named handlers with access to `context`.
	fn register_extensions_with<'a>(&'a self, manager: &mut ExtensionManager<'a>, context: &'a dyn Any);
}

/// Registration sink for extension members, kept in registration order.
#[derive(Default)]
pub struct ExtensionManager<'a> {
	entries: Vec<(Arc<str>, Handler<'a>)>,
}

impl<'a> ExtensionManager<'a> {
	/// Empty sink.
	pub fn new() -> Self {
		Self { entries: Vec::new() }
	}

	/// Register a synthetic member named `name`.
	pub fn register(&mut self, name: impl Into<Arc<str>>, handler: impl FnOnce() -> Result<Value, Fault> + 'a) {
		self.entries.push((name.into(), Box::new(handler)));
	}

	/// Number of registered members.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether nothing was registered.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Registered names in order.
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.entries.iter().map(|(name, _)| name.as_ref())
	}

	pub(crate) fn into_entries(self) -> Vec<(Arc<str>, Handler<'a>)> {
		self.entries
	}
}

/// Whether `context` is an instance of `expected`.
pub fn context_matches(expected: TypeId, context: &dyn Any) -> bool {
	(*context).type_id() == expected
}

/// Descriptor used when no plug-in customizes a value.
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
	name: String,
}

impl TypeDescriptor {
	/// Describe `value` by its display label.
	pub fn for_value(value: &Value) -> Self {
		Self { name: value.display_label() }
	}
}

impl Descriptor for TypeDescriptor {
	fn name(&self) -> Option<String> {
		Some(self.name.clone())
	}
}

/// Resolver producing a [`TypeDescriptor`] for every value.
pub fn default_resolver() -> TypeResolver {
	Arc::new(|value: &Value, _: Option<&TypeInfo>| Ok(Arc::new(TypeDescriptor::for_value(value)) as Arc<dyn Descriptor>))
}
