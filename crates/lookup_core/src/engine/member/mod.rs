use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use bitflags::bitflags;

use crate::engine::{Fault, Value};

/// Zero-argument value accessor; receives the inspected instance (`Null` for static members).
pub type Getter = Arc<dyn Fn(&Value) -> Result<Value, Fault> + Send + Sync>;

bitflags! {
	/// Member filter used by the enumerators.
	#[derive(Debug, Clone, Copy, PartialEq, Eq)]
	pub struct BindingFlags: u8 {
		/// Public members.
		const PUBLIC = 1 << 0;
		/// Family, assembly, and private members.
		const NON_PUBLIC = 1 << 1;
		/// Instance members.
		const INSTANCE = 1 << 2;
		/// Static members.
		const STATIC = 1 << 3;
		/// Only members declared at the queried level.
		const DECLARED_ONLY = 1 << 4;
	}
}

/// Closed set of reflectable member kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
	/// Stored field.
	Field,
	/// Accessor-backed property.
	Property,
	/// Callable method.
	Method,
	/// Event declaration.
	Event,
}

impl MemberKind {
	/// Display label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Field => "Field",
			Self::Property => "Property",
			Self::Method => "Method",
			Self::Event => "Event",
		}
	}
}

/// Member accessibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
	/// Visible everywhere.
	Public,
	/// Visible to derived types.
	Family,
	/// Visible inside the declaring module.
	Assembly,
	/// Visible only to the declaring type.
	Private,
}

/// One declared parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterInfo {
	/// Parameter name.
	pub name: Arc<str>,
	/// Parameter type name.
	pub type_name: Arc<str>,
	/// Whether callers may omit it.
	pub optional: bool,
}

/// Reflectable member metadata plus its zero-argument accessor.
#[derive(Clone)]
pub struct MemberInfo {
	/// Member name.
	pub name: Arc<str>,
	/// Member kind.
	pub kind: MemberKind,
	/// Accessibility.
	pub visibility: Visibility,
	/// Static (type-level) member.
	pub is_static: bool,
	/// Compiler-generated member such as a property accessor exposed as a method.
	pub is_special_name: bool,
	/// Touching this member faults the host runtime when it is also family-visible.
	pub is_security_critical: bool,
	/// Declared parameters.
	pub parameters: Vec<ParameterInfo>,
	/// Declared value type; `None` for members that return nothing.
	pub return_type: Option<Arc<str>>,
	/// Accessor; `None` for set-only properties and unimplemented members.
	pub getter: Option<Getter>,
}

impl MemberInfo {
	fn new(name: impl Into<Arc<str>>, kind: MemberKind, return_type: Option<Arc<str>>) -> Self {
		Self {
			name: name.into(),
			kind,
			visibility: Visibility::Public,
			is_static: false,
			is_special_name: false,
			is_security_critical: false,
			parameters: Vec::new(),
			return_type,
			getter: None,
		}
	}

	/// Declare a field of `type_name`.
	pub fn field(name: impl Into<Arc<str>>, type_name: impl Into<Arc<str>>) -> Self {
		Self::new(name, MemberKind::Field, Some(type_name.into()))
	}

	/// Declare a property of `type_name`.
	pub fn property(name: impl Into<Arc<str>>, type_name: impl Into<Arc<str>>) -> Self {
		Self::new(name, MemberKind::Property, Some(type_name.into()))
	}

	/// Declare a method returning nothing until [`MemberInfo::returns`] is called.
	pub fn method(name: impl Into<Arc<str>>) -> Self {
		Self::new(name, MemberKind::Method, None)
	}

	/// Declare an event with the given handler type.
	pub fn event(name: impl Into<Arc<str>>, handler_type: impl Into<Arc<str>>) -> Self {
		Self::new(name, MemberKind::Event, Some(handler_type.into()))
	}

	/// Set the declared value type.
	pub fn returns(mut self, type_name: impl Into<Arc<str>>) -> Self {
		self.return_type = Some(type_name.into());
		self
	}

	/// Append a required parameter.
	pub fn param(mut self, name: impl Into<Arc<str>>, type_name: impl Into<Arc<str>>) -> Self {
		self.parameters.push(ParameterInfo {
			name: name.into(),
			type_name: type_name.into(),
			optional: false,
		});
		self
	}

	/// Append an optional parameter.
	pub fn optional_param(mut self, name: impl Into<Arc<str>>, type_name: impl Into<Arc<str>>) -> Self {
		self.parameters.push(ParameterInfo {
			name: name.into(),
			type_name: type_name.into(),
			optional: true,
		});
		self
	}

	/// Set accessibility.
	pub fn visibility(mut self, visibility: Visibility) -> Self {
		self.visibility = visibility;
		self
	}

	/// Mark as private.
	pub fn private(self) -> Self {
		self.visibility(Visibility::Private)
	}

	/// Mark as family-visible.
	pub fn family(self) -> Self {
		self.visibility(Visibility::Family)
	}

	/// Mark as a static member.
	pub fn as_static(mut self) -> Self {
		self.is_static = true;
		self
	}

	/// Mark as compiler-generated.
	pub fn special_name(mut self) -> Self {
		self.is_special_name = true;
		self
	}

	/// Mark as security-critical.
	pub fn security_critical(mut self) -> Self {
		self.is_security_critical = true;
		self
	}

	/// Accessor over a concrete receiver type.
	pub fn getter<T: 'static>(mut self, get: impl Fn(&T) -> Result<Value, Fault> + Send + Sync + 'static) -> Self {
		self.getter = Some(Arc::new(move |target: &Value| {
			let this = target.downcast_ref::<T>().ok_or_else(|| Fault::TargetMismatch {
				expected: Arc::from(short_type_name::<T>()),
				got: Arc::from(target.type_info().name()),
			})?;
			get(this)
		}));
		self
	}

	/// Accessor that ignores the receiver.
	pub fn static_getter(mut self, get: impl Fn() -> Result<Value, Fault> + Send + Sync + 'static) -> Self {
		self.getter = Some(Arc::new(move |_: &Value| get()));
		self
	}

	/// Accessor over the raw receiver value.
	pub fn value_getter(mut self, get: impl Fn(&Value) -> Result<Value, Fault> + Send + Sync + 'static) -> Self {
		self.getter = Some(Arc::new(get));
		self
	}

	/// Whether the member is public.
	pub fn is_public(&self) -> bool {
		self.visibility == Visibility::Public
	}

	/// Family-visible and security-critical: must never be touched.
	pub fn is_unsafe(&self) -> bool {
		self.visibility == Visibility::Family && self.is_security_critical
	}

	/// Whether this member passes `flags`.
	pub fn matches(&self, flags: BindingFlags) -> bool {
		let visible = if self.is_public() {
			flags.contains(BindingFlags::PUBLIC)
		} else {
			flags.contains(BindingFlags::NON_PUBLIC)
		};
		let scoped = if self.is_static {
			flags.contains(BindingFlags::STATIC)
		} else {
			flags.contains(BindingFlags::INSTANCE)
		};
		visible && scoped
	}

	/// Display signature; parameterized members list their parameters.
	pub fn signature(&self) -> String {
		if self.parameters.is_empty() {
			return self.name.to_string();
		}

		let params = self
			.parameters
			.iter()
			.map(|param| format!("{} {}", param.type_name, param.name))
			.collect::<Vec<_>>()
			.join(", ");
		format!("{}({params})", self.name)
	}

	/// Invoke the accessor reflectively.
	///
	/// Callee errors and panics come back wrapped in [`Fault::TargetInvocation`];
	/// receiver validation failures are returned unwrapped.
	pub fn invoke(&self, target: &Value) -> Result<Value, Fault> {
		let Some(getter) = &self.getter else {
			return Err(Fault::not_supported(format!("Member {} does not have an accessor", self.name)));
		};
		if !self.is_static && target.is_null() {
			return Err(Fault::raised("TargetException", "Non-static member requires a target"));
		}

		match catch_unwind(AssertUnwindSafe(|| getter(target))) {
			Ok(Ok(value)) => Ok(value),
			Ok(Err(fault @ Fault::TargetMismatch { .. })) => Err(fault),
			Ok(Err(fault)) => Err(Fault::invocation(fault)),
			Err(payload) => Err(Fault::invocation(Fault::from_panic(payload))),
		}
	}
}

impl fmt::Debug for MemberInfo {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("MemberInfo")
			.field("name", &self.name)
			.field("kind", &self.kind)
			.field("visibility", &self.visibility)
			.field("is_static", &self.is_static)
			.field("parameters", &self.parameters.len())
			.field("return_type", &self.return_type)
			.field("readable", &self.getter.is_some())
			.finish()
	}
}

fn short_type_name<T>() -> &'static str {
	let full = std::any::type_name::<T>();
	full.rsplit("::").next().unwrap_or(full)
}
