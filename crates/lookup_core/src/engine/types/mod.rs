use std::fmt;
use std::sync::Arc;

use crate::engine::builtin;
use crate::engine::{BindingFlags, Fault, MemberInfo, MemberKind, Value};

/// Enumerator capability: yields the elements of an enumerable instance.
pub type Enumerator = Arc<dyn Fn(&Value) -> Result<Vec<Value>, Fault> + Send + Sync>;

/// Registered runtime type with its declared member surface.
pub struct TypeInfo {
	name: Arc<str>,
	namespace: Arc<str>,
	base: Option<Arc<TypeInfo>>,
	members: Vec<Arc<MemberInfo>>,
	enumerator: Option<Enumerator>,
}

impl TypeInfo {
	/// Start building a type deriving from the builtin `Object` root.
	pub fn builder(name: impl Into<Arc<str>>) -> TypeBuilder {
		TypeBuilder {
			name: name.into(),
			namespace: Arc::from(""),
			base: None,
			root: false,
			members: Vec::new(),
			enumerator: None,
		}
	}

	/// Short type name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Namespace, empty for global types.
	pub fn namespace(&self) -> &str {
		&self.namespace
	}

	/// Namespace-qualified type name.
	pub fn full_name(&self) -> String {
		if self.namespace.is_empty() {
			self.name.to_string()
		} else {
			format!("{}.{}", self.namespace, self.name)
		}
	}

	/// Direct base type; `None` only for the absolute root.
	pub fn base(&self) -> Option<&Arc<TypeInfo>> {
		self.base.as_ref()
	}

	/// Members declared at exactly this level, in declaration order.
	pub fn declared_members(&self) -> &[Arc<MemberInfo>] {
		&self.members
	}

	/// Members matching `flags`, derived levels first unless `DECLARED_ONLY` is set.
	pub fn members(&self, flags: BindingFlags) -> Vec<Arc<MemberInfo>> {
		let mut out = Vec::new();
		let mut current = Some(self);
		while let Some(ty) = current {
			out.extend(ty.members.iter().filter(|member| member.matches(flags)).cloned());
			if flags.contains(BindingFlags::DECLARED_ONLY) {
				break;
			}
			current = ty.base.as_deref();
		}
		out
	}

	/// Fields matching `flags`.
	pub fn fields(&self, flags: BindingFlags) -> Vec<Arc<MemberInfo>> {
		self.members_of_kind(MemberKind::Field, flags)
	}

	/// Properties matching `flags`.
	pub fn properties(&self, flags: BindingFlags) -> Vec<Arc<MemberInfo>> {
		self.members_of_kind(MemberKind::Property, flags)
	}

	/// Methods matching `flags`.
	pub fn methods(&self, flags: BindingFlags) -> Vec<Arc<MemberInfo>> {
		self.members_of_kind(MemberKind::Method, flags)
	}

	/// Events matching `flags`.
	pub fn events(&self, flags: BindingFlags) -> Vec<Arc<MemberInfo>> {
		self.members_of_kind(MemberKind::Event, flags)
	}

	/// Nearest enumerator along the base chain.
	pub fn enumerator(&self) -> Option<&Enumerator> {
		let mut current = Some(self);
		while let Some(ty) = current {
			if let Some(enumerator) = &ty.enumerator {
				return Some(enumerator);
			}
			current = ty.base.as_deref();
		}
		None
	}

	/// Same type identity (pointer or qualified name).
	pub fn is(&self, other: &TypeInfo) -> bool {
		std::ptr::eq(self, other) || (self.name == other.name && self.namespace == other.namespace)
	}

	/// Whether `ancestor` appears on this type's base chain (including itself).
	pub fn is_subclass_of(&self, ancestor: &TypeInfo) -> bool {
		let mut current = Some(self);
		while let Some(ty) = current {
			if ty.is(ancestor) {
				return true;
			}
			current = ty.base.as_deref();
		}
		false
	}

	fn members_of_kind(&self, kind: MemberKind, flags: BindingFlags) -> Vec<Arc<MemberInfo>> {
		let mut out = self.members(flags);
		out.retain(|member| member.kind == kind);
		out
	}
}

impl fmt::Debug for TypeInfo {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TypeInfo")
			.field("full_name", &self.full_name())
			.field("base", &self.base.as_ref().map(|base| base.full_name()))
			.field("members", &self.members.len())
			.field("enumerable", &self.enumerator.is_some())
			.finish()
	}
}

/// Builder for [`TypeInfo`].
pub struct TypeBuilder {
	name: Arc<str>,
	namespace: Arc<str>,
	base: Option<Arc<TypeInfo>>,
	root: bool,
	members: Vec<Arc<MemberInfo>>,
	enumerator: Option<Enumerator>,
}

impl TypeBuilder {
	/// Set the namespace used by the qualified name.
	pub fn namespace(mut self, namespace: impl Into<Arc<str>>) -> Self {
		self.namespace = namespace.into();
		self
	}

	/// Derive from `base` instead of the builtin root.
	pub fn base(mut self, base: &Arc<TypeInfo>) -> Self {
		self.base = Some(base.clone());
		self
	}

	/// Declare a member at this level.
	pub fn member(mut self, member: MemberInfo) -> Self {
		self.members.push(Arc::new(member));
		self
	}

	/// Make instances enumerable.
	pub fn enumerator(mut self, enumerator: impl Fn(&Value) -> Result<Vec<Value>, Fault> + Send + Sync + 'static) -> Self {
		self.enumerator = Some(Arc::new(enumerator));
		self
	}

	/// Mark this type as the hierarchy root; only the builtin `Object` uses this.
	pub(crate) fn root(mut self) -> Self {
		self.root = true;
		self
	}

	/// Finish the type.
	pub fn build(self) -> Arc<TypeInfo> {
		let base = if self.root { None } else { Some(self.base.unwrap_or_else(builtin::object_type)) };
		Arc::new(TypeInfo {
			name: self.name,
			namespace: self.namespace,
			base,
			members: self.members,
			enumerator: self.enumerator,
		})
	}
}

#[cfg(test)]
mod tests;
