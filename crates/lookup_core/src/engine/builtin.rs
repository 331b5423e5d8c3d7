use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, LazyLock};

use crate::engine::{Fault, MemberInfo, TypeInfo, Value};

const SYSTEM: &str = "System";
const ENGINE: &str = "Lookup.Engine";

static OBJECT: LazyLock<Arc<TypeInfo>> = LazyLock::new(|| {
	TypeInfo::builder("Object")
		.namespace(SYSTEM)
		.root()
		.member(MemberInfo::method("GetType").returns("Type").value_getter(|this| Ok(Value::Type(this.type_info()))))
		.member(MemberInfo::method("ToString").returns("String").value_getter(|this| Ok(this.display_label().into())))
		.member(MemberInfo::method("GetHashCode").returns("Int64").value_getter(|this| Ok(Value::I64(hash_code(this)))))
		.member(MemberInfo::method("Equals").returns("Boolean").param("obj", "Object"))
		.member(MemberInfo::method("Finalize").family())
		.build()
});

static BOOLEAN: LazyLock<Arc<TypeInfo>> = LazyLock::new(|| TypeInfo::builder("Boolean").namespace(SYSTEM).build());
static INT64: LazyLock<Arc<TypeInfo>> = LazyLock::new(|| TypeInfo::builder("Int64").namespace(SYSTEM).build());
static UINT64: LazyLock<Arc<TypeInfo>> = LazyLock::new(|| TypeInfo::builder("UInt64").namespace(SYSTEM).build());
static DOUBLE: LazyLock<Arc<TypeInfo>> = LazyLock::new(|| TypeInfo::builder("Double").namespace(SYSTEM).build());

static STRING: LazyLock<Arc<TypeInfo>> = LazyLock::new(|| {
	TypeInfo::builder("String")
		.namespace(SYSTEM)
		.member(MemberInfo::property("Length", "Int64").value_getter(|this| match this {
			Value::String(text) => Ok(Value::I64(text.chars().count() as i64)),
			other => Err(mismatch("String", other)),
		}))
		.build()
});

static LIST: LazyLock<Arc<TypeInfo>> = LazyLock::new(|| {
	TypeInfo::builder("List")
		.namespace(SYSTEM)
		.member(MemberInfo::property("Count", "Int64").value_getter(|this| match this {
			Value::List(items) => Ok(Value::I64(items.len() as i64)),
			other => Err(mismatch("List", other)),
		}))
		.enumerator(|this| match this {
			Value::List(items) => Ok(items.to_vec()),
			other => Err(mismatch("List", other)),
		})
		.build()
});

static TYPE: LazyLock<Arc<TypeInfo>> = LazyLock::new(|| {
	TypeInfo::builder("Type")
		.namespace(SYSTEM)
		.member(MemberInfo::property("Name", "String").value_getter(|this| with_type(this, |ty| ty.name().into())))
		.member(MemberInfo::property("FullName", "String").value_getter(|this| with_type(this, |ty| ty.full_name().into())))
		.member(MemberInfo::property("Namespace", "String").value_getter(|this| with_type(this, |ty| ty.namespace().into())))
		.member(MemberInfo::property("BaseType", "Type").value_getter(|this| with_type(this, |ty| ty.base().cloned().into())))
		.build()
});

static FAULT: LazyLock<Arc<TypeInfo>> = LazyLock::new(|| {
	TypeInfo::builder("Fault")
		.namespace(ENGINE)
		.member(MemberInfo::property("Message", "String").value_getter(|this| with_fault(this, |fault| fault.to_string().into())))
		.member(MemberInfo::property("Kind", "String").value_getter(|this| with_fault(this, |fault| fault.kind().into())))
		.member(
			MemberInfo::property("InnerFault", "Fault")
				.value_getter(|this| with_fault(this, |fault| fault.inner().cloned().map(Value::from).unwrap_or_default())),
		)
		.build()
});

static MEMBER: LazyLock<Arc<TypeInfo>> = LazyLock::new(|| {
	TypeInfo::builder("MemberInfo")
		.namespace(ENGINE)
		.member(MemberInfo::property("Name", "String").value_getter(|this| with_member(this, |member| member.name.clone().into())))
		.member(MemberInfo::property("MemberType", "String").value_getter(|this| with_member(this, |member| member.kind.as_str().into())))
		.member(MemberInfo::property("IsStatic", "Boolean").value_getter(|this| with_member(this, |member| member.is_static.into())))
		.member(
			MemberInfo::property("HandlerType", "String")
				.value_getter(|this| with_member(this, |member| member.return_type.clone().into())),
		)
		.build()
});

static VARIANT: LazyLock<Arc<TypeInfo>> = LazyLock::new(|| {
	TypeInfo::builder("Variant")
		.namespace(ENGINE)
		.member(MemberInfo::property("Value", "Object").value_getter(|this| match this {
			Value::Variant(variant) => Ok(variant.value().clone()),
			other => Err(mismatch("Variant", other)),
		}))
		.member(MemberInfo::property("Description", "String").value_getter(|this| match this {
			Value::Variant(variant) => Ok(variant.description().cloned().into()),
			other => Err(mismatch("Variant", other)),
		}))
		.build()
});

static VARIANTS: LazyLock<Arc<TypeInfo>> = LazyLock::new(|| {
	TypeInfo::builder("Variants")
		.namespace(ENGINE)
		.member(MemberInfo::property("Count", "Int64").value_getter(|this| match this {
			Value::Variants(items) => Ok(Value::I64(items.len() as i64)),
			other => Err(mismatch("Variants", other)),
		}))
		.enumerator(|this| match this {
			Value::Variants(items) => Ok(items.iter().cloned().map(Value::from).collect()),
			other => Err(mismatch("Variants", other)),
		})
		.build()
});

/// Absolute hierarchy root.
pub fn object_type() -> Arc<TypeInfo> {
	OBJECT.clone()
}

/// Boolean primitive.
pub fn boolean_type() -> Arc<TypeInfo> {
	BOOLEAN.clone()
}

/// Signed integer primitive.
pub fn int64_type() -> Arc<TypeInfo> {
	INT64.clone()
}

/// Unsigned integer primitive.
pub fn uint64_type() -> Arc<TypeInfo> {
	UINT64.clone()
}

/// Floating point primitive.
pub fn double_type() -> Arc<TypeInfo> {
	DOUBLE.clone()
}

/// Text primitive; never enumerated.
pub fn string_type() -> Arc<TypeInfo> {
	STRING.clone()
}

/// Builtin ordered collection.
pub fn list_type() -> Arc<TypeInfo> {
	LIST.clone()
}

/// Type handles.
pub fn type_type() -> Arc<TypeInfo> {
	TYPE.clone()
}

/// Captured failures.
pub fn fault_type() -> Arc<TypeInfo> {
	FAULT.clone()
}

/// Member metadata (event values).
pub fn member_type() -> Arc<TypeInfo> {
	MEMBER.clone()
}

/// Single resolver result.
pub fn variant_type() -> Arc<TypeInfo> {
	VARIANT.clone()
}

/// Resolver result collection.
pub fn variants_type() -> Arc<TypeInfo> {
	VARIANTS.clone()
}

fn hash_code(value: &Value) -> i64 {
	match value {
		Value::Object(object) => Arc::as_ptr(object).cast::<()>() as usize as i64,
		other => {
			let mut hasher = DefaultHasher::new();
			other.kind().hash(&mut hasher);
			other.display_label().hash(&mut hasher);
			hasher.finish() as i64
		}
	}
}

fn mismatch(expected: &str, got: &Value) -> Fault {
	Fault::TargetMismatch {
		expected: Arc::from(expected),
		got: Arc::from(got.type_info().name()),
	}
}

fn with_type(this: &Value, read: impl FnOnce(&Arc<TypeInfo>) -> Value) -> Result<Value, Fault> {
	match this {
		Value::Type(ty) => Ok(read(ty)),
		other => Err(mismatch("Type", other)),
	}
}

fn with_fault(this: &Value, read: impl FnOnce(&Fault) -> Value) -> Result<Value, Fault> {
	match this {
		Value::Fault(fault) => Ok(read(fault)),
		other => Err(mismatch("Fault", other)),
	}
}

fn with_member(this: &Value, read: impl FnOnce(&MemberInfo) -> Value) -> Result<Value, Fault> {
	match this {
		Value::Member(member) => Ok(read(member)),
		other => Err(mismatch("MemberInfo", other)),
	}
}
