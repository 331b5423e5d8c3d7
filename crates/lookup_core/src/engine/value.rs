use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

use crate::engine::builtin;
use crate::engine::{Fault, MemberInfo, TypeInfo, Variant, Variants};

/// Instance registered with the lookup runtime.
///
/// Implementors expose their runtime type so the composer can walk the
/// registered member surface. Instances are shared through `Arc` handles and
/// never cloned by the engine.
pub trait Object: Any {
	/// Runtime type of this instance.
	fn type_info(&self) -> Arc<TypeInfo>;

	/// Upcast used to recover the concrete Rust type.
	fn as_any(&self) -> &dyn Any;

	/// View of this instance as the Rust value backing a base type.
	///
	/// Composite objects override this to hand out embedded base parts, so
	/// getters registered on a base type keep working on derived instances.
	fn as_base(&self, type_id: TypeId) -> Option<&dyn Any> {
		let any = self.as_any();
		((*any).type_id() == type_id).then_some(any)
	}

	/// Display form used by `ToString` and default labels.
	fn display(&self) -> Option<String> {
		None
	}
}

/// Value flowing through a decomposition.
///
/// Cloning a value clones handles, never inspected objects.
#[derive(Clone, Default)]
pub enum Value {
	/// Absent value.
	#[default]
	Null,
	/// Boolean.
	Bool(bool),
	/// Signed integer.
	I64(i64),
	/// Unsigned integer.
	U64(u64),
	/// Floating point.
	F64(f64),
	/// Text.
	String(Arc<str>),
	/// Ordered collection.
	List(Arc<[Value]>),
	/// Type handle; decomposes static members.
	Type(Arc<TypeInfo>),
	/// Registered object instance.
	Object(Arc<dyn Object>),
	/// Single named resolver result.
	Variant(Arc<Variant>),
	/// Several named resolver results.
	Variants(Arc<Variants>),
	/// Member metadata, used for events.
	Member(Arc<MemberInfo>),
	/// Captured evaluation failure.
	Fault(Arc<Fault>),
}

impl Value {
	/// Wrap an object instance.
	pub fn object(object: impl Object) -> Self {
		Self::Object(Arc::new(object))
	}

	/// Build a list value.
	pub fn list(items: impl IntoIterator<Item = Value>) -> Self {
		Self::List(items.into_iter().collect())
	}

	/// Whether this is the absent value.
	pub fn is_null(&self) -> bool {
		matches!(self, Self::Null)
	}

	/// Runtime type of this value.
	pub fn type_info(&self) -> Arc<TypeInfo> {
		match self {
			Self::Null => builtin::object_type(),
			Self::Bool(_) => builtin::boolean_type(),
			Self::I64(_) => builtin::int64_type(),
			Self::U64(_) => builtin::uint64_type(),
			Self::F64(_) => builtin::double_type(),
			Self::String(_) => builtin::string_type(),
			Self::List(_) => builtin::list_type(),
			Self::Type(_) => builtin::type_type(),
			Self::Object(object) => object.type_info(),
			Self::Variant(_) => builtin::variant_type(),
			Self::Variants(_) => builtin::variants_type(),
			Self::Member(_) => builtin::member_type(),
			Self::Fault(_) => builtin::fault_type(),
		}
	}

	/// Handle identity: same object, same type, or both null.
	pub fn same_ref(&self, other: &Value) -> bool {
		match (self, other) {
			(Self::Null, Self::Null) => true,
			(Self::Object(a), Self::Object(b)) => std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b)),
			(Self::Type(a), Self::Type(b)) => Arc::ptr_eq(a, b),
			(Self::List(a), Self::List(b)) => Arc::ptr_eq(a, b),
			(Self::Variant(a), Self::Variant(b)) => Arc::ptr_eq(a, b),
			(Self::Variants(a), Self::Variants(b)) => Arc::ptr_eq(a, b),
			(Self::Member(a), Self::Member(b)) => Arc::ptr_eq(a, b),
			(Self::Fault(a), Self::Fault(b)) => Arc::ptr_eq(a, b),
			_ => false,
		}
	}

	/// Borrow the object as `T`, or as the `T` part of a composite object.
	pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
		match self {
			Self::Object(object) => object.as_base(TypeId::of::<T>())?.downcast_ref::<T>(),
			_ => None,
		}
	}

	/// Human-readable label used when no descriptor supplies a name.
	pub fn display_label(&self) -> String {
		match self {
			Self::Null => "null".to_owned(),
			Self::Bool(value) => value.to_string(),
			Self::I64(value) => value.to_string(),
			Self::U64(value) => value.to_string(),
			Self::F64(value) => value.to_string(),
			Self::String(value) => value.to_string(),
			Self::List(items) => format!("List[{}]", items.len()),
			Self::Type(ty) => ty.name().to_owned(),
			Self::Object(object) => object.display().unwrap_or_else(|| object.type_info().name().to_owned()),
			Self::Variant(variant) => variant.value().display_label(),
			Self::Variants(items) => format!("Variants[{}]", items.len()),
			Self::Member(member) => member.signature(),
			Self::Fault(fault) => fault.to_string(),
		}
	}

	/// Integer payload, if any.
	pub fn as_i64(&self) -> Option<i64> {
		match self {
			Self::I64(value) => Some(*value),
			Self::U64(value) => i64::try_from(*value).ok(),
			_ => None,
		}
	}

	/// Floating point payload, if any.
	pub fn as_f64(&self) -> Option<f64> {
		match self {
			Self::F64(value) => Some(*value),
			_ => None,
		}
	}

	/// Boolean payload, if any.
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Self::Bool(value) => Some(*value),
			_ => None,
		}
	}

	/// Text payload, if any.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::String(value) => Some(value),
			_ => None,
		}
	}

	/// Fault payload, if any.
	pub fn as_fault(&self) -> Option<&Fault> {
		match self {
			Self::Fault(fault) => Some(fault),
			_ => None,
		}
	}

	/// Short value kind name.
	pub fn kind(&self) -> &'static str {
		match self {
			Self::Null => "Null",
			Self::Bool(_) => "Bool",
			Self::I64(_) => "I64",
			Self::U64(_) => "U64",
			Self::F64(_) => "F64",
			Self::String(_) => "String",
			Self::List(_) => "List",
			Self::Type(_) => "Type",
			Self::Object(_) => "Object",
			Self::Variant(_) => "Variant",
			Self::Variants(_) => "Variants",
			Self::Member(_) => "Member",
			Self::Fault(_) => "Fault",
		}
	}
}

impl fmt::Debug for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Null => f.write_str("Null"),
			Self::String(value) => write!(f, "String({value:?})"),
			Self::Object(object) => write!(f, "Object({})", object.type_info().full_name()),
			Self::Fault(fault) => write!(f, "Fault({}: {fault})", fault.kind()),
			other => write!(f, "{}({})", other.kind(), other.display_label()),
		}
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<i32> for Value {
	fn from(value: i32) -> Self {
		Self::I64(i64::from(value))
	}
}

impl From<i64> for Value {
	fn from(value: i64) -> Self {
		Self::I64(value)
	}
}

impl From<u64> for Value {
	fn from(value: u64) -> Self {
		Self::U64(value)
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Self::F64(value)
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Self::String(Arc::from(value))
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Self::String(Arc::from(value))
	}
}

impl From<Arc<str>> for Value {
	fn from(value: Arc<str>) -> Self {
		Self::String(value)
	}
}

impl From<Arc<TypeInfo>> for Value {
	fn from(value: Arc<TypeInfo>) -> Self {
		Self::Type(value)
	}
}

impl From<Fault> for Value {
	fn from(value: Fault) -> Self {
		Self::Fault(Arc::new(value))
	}
}

impl From<Variant> for Value {
	fn from(value: Variant) -> Self {
		Self::Variant(Arc::new(value))
	}
}

impl From<Variants> for Value {
	fn from(value: Variants) -> Self {
		Self::Variants(Arc::new(value))
	}
}

impl<T: Into<Value>> From<Option<T>> for Value {
	fn from(value: Option<T>) -> Self {
		value.map_or(Self::Null, Into::into)
	}
}
