use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::engine::{BindingFlags, Descriptor, LookupError, TypeInfo, TypeResolver, Value, default_resolver};

/// Per-call decomposition configuration.
#[derive(Clone)]
pub struct DecomposeOptions {
	/// Walk the absolute root type too.
	pub include_root: bool,
	/// Enumerate fields.
	pub include_fields: bool,
	/// Enumerate events.
	pub include_events: bool,
	/// Emit placeholder values for members that cannot be auto-invoked instead of skipping them.
	pub include_unsupported: bool,
	/// Enumerate non-public members.
	pub include_private_members: bool,
	/// Enumerate static members of instances.
	pub include_static_members: bool,
	/// Let descriptors contribute extension members.
	pub enable_extensions: bool,
	/// Follow redirector chains.
	pub enable_redirection: bool,
	/// Maximum redirection steps for one value.
	pub max_redirects: usize,
	/// Value -> descriptor mapping.
	pub type_resolver: TypeResolver,
	/// Ambient value handed to context-typed descriptor capabilities.
	pub context: Option<Arc<dyn Any>>,
}

impl Default for DecomposeOptions {
	fn default() -> Self {
		Self {
			include_root: false,
			include_fields: false,
			include_events: false,
			include_unsupported: false,
			include_private_members: false,
			include_static_members: false,
			enable_extensions: true,
			enable_redirection: true,
			max_redirects: 16,
			type_resolver: default_resolver(),
			context: None,
		}
	}
}

impl DecomposeOptions {
	/// Preset exposing every member kind.
	pub fn all_members() -> Self {
		Self {
			include_root: true,
			include_fields: true,
			include_events: true,
			include_unsupported: true,
			include_private_members: true,
			include_static_members: true,
			..Self::default()
		}
	}

	/// Preset with descriptor extensions and redirection turned off.
	pub fn reflection_only() -> Self {
		Self {
			enable_extensions: false,
			enable_redirection: false,
			..Self::default()
		}
	}

	/// Replace the type resolver.
	pub fn with_resolver(mut self, resolver: impl Fn(&Value, Option<&TypeInfo>) -> Result<Arc<dyn Descriptor>, LookupError> + 'static) -> Self {
		self.type_resolver = Arc::new(resolver);
		self
	}

	/// Set the ambient context.
	pub fn with_context<C: Any>(mut self, context: C) -> Self {
		self.context = Some(Arc::new(context));
		self
	}

	/// Borrow the ambient context.
	pub fn context(&self) -> Option<&dyn Any> {
		self.context.as_deref()
	}

	/// Flags for one instance hierarchy level.
	pub fn binding_flags(&self) -> BindingFlags {
		let mut flags = BindingFlags::PUBLIC | BindingFlags::INSTANCE | BindingFlags::DECLARED_ONLY;
		if self.include_private_members {
			flags |= BindingFlags::NON_PUBLIC;
		}
		if self.include_static_members {
			flags |= BindingFlags::STATIC;
		}
		flags
	}

	/// Flags for one level of a static (type) walk.
	pub fn static_binding_flags(&self) -> BindingFlags {
		let mut flags = BindingFlags::PUBLIC | BindingFlags::STATIC | BindingFlags::DECLARED_ONLY;
		if self.include_private_members {
			flags |= BindingFlags::NON_PUBLIC;
		}
		flags
	}
}

impl fmt::Debug for DecomposeOptions {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DecomposeOptions")
			.field("include_root", &self.include_root)
			.field("include_fields", &self.include_fields)
			.field("include_events", &self.include_events)
			.field("include_unsupported", &self.include_unsupported)
			.field("include_private_members", &self.include_private_members)
			.field("include_static_members", &self.include_static_members)
			.field("enable_extensions", &self.enable_extensions)
			.field("enable_redirection", &self.enable_redirection)
			.field("max_redirects", &self.max_redirects)
			.field("context", &self.context.is_some())
			.finish()
	}
}
