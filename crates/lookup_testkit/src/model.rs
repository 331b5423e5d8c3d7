use std::any::{Any, TypeId};
use std::sync::{Arc, LazyLock};

use lookup::engine::{Fault, MemberInfo, Object, TypeInfo, Value};

/// Namespace of every sample type.
pub const NAMESPACE: &str = "Sample.Model";

/// Building element; the base of every placed object in the sample model.
#[derive(Debug, Clone)]
pub struct Element {
	/// Stable numeric id.
	pub id: i64,
	/// Display name.
	pub name: String,
	/// Category label; `None` makes the `Category` getter fail.
	pub category: Option<String>,
	/// Deleted from its document; most getters fault.
	pub disposed: bool,
	/// Named parameters.
	pub parameters: Vec<Parameter>,
}

impl Element {
	/// Live element with a category and two parameters.
	pub fn new(id: i64, name: impl Into<String>) -> Self {
		Self {
			id,
			name: name.into(),
			category: Some("Generic Models".to_owned()),
			disposed: false,
			parameters: vec![Parameter::new("Mark", "A1"), Parameter::new("Comments", "")],
		}
	}

	fn alive(&self) -> Result<&Self, Fault> {
		if self.disposed { Err(Fault::disposed("Element")) } else { Ok(self) }
	}
}

impl Object for Element {
	fn type_info(&self) -> Arc<TypeInfo> {
		element_type()
	}

	fn as_any(&self) -> &dyn Any {
		self
	}

	fn display(&self) -> Option<String> {
		Some(self.name.clone())
	}
}

/// Wall: an element with a length and a layer stack.
#[derive(Debug, Clone)]
pub struct Wall {
	/// Element part.
	pub element: Element,
	/// Length in millimetres.
	pub length_mm: f64,
	/// Layer names from exterior to interior.
	pub layers: Vec<String>,
}

impl Object for Wall {
	fn type_info(&self) -> Arc<TypeInfo> {
		wall_type()
	}

	fn as_any(&self) -> &dyn Any {
		self
	}

	fn as_base(&self, type_id: TypeId) -> Option<&dyn Any> {
		if type_id == TypeId::of::<Element>() {
			return Some(&self.element);
		}
		(type_id == TypeId::of::<Self>()).then_some(self as &dyn Any)
	}

	fn display(&self) -> Option<String> {
		Some(self.element.name.clone())
	}
}

/// Named value attached to an element.
#[derive(Debug, Clone)]
pub struct Parameter {
	/// Parameter name.
	pub name: String,
	/// Stored text.
	pub value: String,
}

impl Parameter {
	/// Text parameter.
	pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			value: value.into(),
		}
	}
}

impl Object for Parameter {
	fn type_info(&self) -> Arc<TypeInfo> {
		parameter_type()
	}

	fn as_any(&self) -> &dyn Any {
		self
	}

	fn display(&self) -> Option<String> {
		Some(self.name.clone())
	}
}

/// Thin wrapper that only points at a parameter; redirected before display.
#[derive(Debug, Clone)]
pub struct ParameterHandle {
	/// Wrapped parameter.
	pub target: Arc<Parameter>,
}

impl Object for ParameterHandle {
	fn type_info(&self) -> Arc<TypeInfo> {
		handle_type()
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}

/// Host document; also used as the ambient decomposition context.
#[derive(Debug, Clone)]
pub struct Document {
	/// Document title.
	pub title: String,
	/// Display length unit, `mm` or `m`.
	pub units: String,
	/// Elements placed in the document.
	pub elements: Vec<Value>,
}

impl Object for Document {
	fn type_info(&self) -> Arc<TypeInfo> {
		document_type()
	}

	fn as_any(&self) -> &dyn Any {
		self
	}

	fn display(&self) -> Option<String> {
		Some(self.title.clone())
	}
}

/// Enumerable element selection.
#[derive(Debug, Clone)]
pub struct ElementSet {
	/// Selected elements.
	pub items: Vec<Value>,
}

impl Object for ElementSet {
	fn type_info(&self) -> Arc<TypeInfo> {
		element_set_type()
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}

static ELEMENT: LazyLock<Arc<TypeInfo>> = LazyLock::new(|| {
	TypeInfo::builder("Element")
		.namespace(NAMESPACE)
		.member(MemberInfo::field("id", "Int64").private().getter(|element: &Element| Ok(Value::from(element.id))))
		.member(MemberInfo::field("Origin", "String").as_static().static_getter(|| Ok(Value::from("Project Base Point"))))
		.member(MemberInfo::property("Id", "Int64").getter(|element: &Element| Ok(Value::from(element.id))))
		.member(MemberInfo::property("Name", "String").getter(|element: &Element| Ok(Value::from(element.alive()?.name.as_str()))))
		.member(MemberInfo::property("Category", "String").getter(|element: &Element| {
			let element = element.alive()?;
			let category = element
				.category
				.as_deref()
				.ok_or_else(|| Fault::raised("InvalidOperationException", "Element has no category"))?;
			Ok(Value::from(category))
		}))
		.member(MemberInfo::property("IsValid", "Boolean").getter(|element: &Element| Ok(Value::from(!element.disposed))))
		.member(MemberInfo::property("Comment", "String"))
		.member(MemberInfo::property("Parameter", "Parameter").param("name", "String").getter(|element: &Element| {
			Ok(element.parameters.first().cloned().map(Value::object).unwrap_or_default())
		}))
		.member(MemberInfo::property("MarkHandle", "ParameterHandle").getter(|element: &Element| {
			let parameter = element.alive()?.parameters.first().cloned().ok_or_else(|| Fault::raised("KeyNotFoundException", "Mark"))?;
			Ok(Value::object(ParameterHandle {
				target: Arc::new(parameter),
			}))
		}))
		.member(MemberInfo::property("Instances", "Int64").as_static().static_getter(|| Ok(Value::from(3))))
		.member(MemberInfo::property("LastError", "String").private().getter(|_: &Element| Ok(Value::Null)))
		.member(
			MemberInfo::method("GetParameter")
				.param("name", "String")
				.returns("Parameter")
				.getter(|element: &Element| Ok(element.parameters.first().cloned().map(Value::object).unwrap_or_default())),
		)
		.member(MemberInfo::method("GetDependentIds").optional_param("includeHidden", "Boolean").returns("List").getter(|element: &Element| {
			let element = element.alive()?;
			Ok(Value::list([Value::from(element.id + 1), Value::from(element.id + 2)]))
		}))
		.member(MemberInfo::method("Delete"))
		.member(MemberInfo::method("get_Name").returns("String").special_name().getter(|element: &Element| Ok(Value::from(element.name.as_str()))))
		.member(
			MemberInfo::method("ReleaseUnmanagedResources")
				.family()
				.security_critical()
				.returns("Boolean")
				.getter(|_: &Element| -> Result<Value, Fault> { panic!("security-critical member evaluated") }),
		)
		.member(MemberInfo::event("Changed", "EventHandler"))
		.build()
});

static WALL: LazyLock<Arc<TypeInfo>> = LazyLock::new(|| {
	TypeInfo::builder("Wall")
		.namespace(NAMESPACE)
		.base(&ELEMENT)
		.member(MemberInfo::property("Length", "Double").getter(|wall: &Wall| Ok(Value::from(wall.length_mm))))
		.member(MemberInfo::property("Layers", "List").getter(|wall: &Wall| {
			Ok(Value::list(wall.layers.iter().map(|layer| Value::from(layer.as_str()))))
		}))
		.member(MemberInfo::method("Flip").returns("Boolean").getter(|wall: &Wall| Ok(Value::from(!wall.layers.is_empty()))))
		.member(MemberInfo::property("Thickness", "Double").getter(|wall: &Wall| -> Result<Value, Fault> {
			if wall.layers.is_empty() {
				panic!("wall has no layers");
			}
			Ok(Value::from(wall.layers.len() as f64 * 50.0))
		}))
		.build()
});

static PARAMETER: LazyLock<Arc<TypeInfo>> = LazyLock::new(|| {
	TypeInfo::builder("Parameter")
		.namespace(NAMESPACE)
		.member(MemberInfo::property("Name", "String").getter(|parameter: &Parameter| Ok(Value::from(parameter.name.as_str()))))
		.member(MemberInfo::property("Value", "String").getter(|parameter: &Parameter| Ok(Value::from(parameter.value.as_str()))))
		.member(MemberInfo::property("HasValue", "Boolean").getter(|parameter: &Parameter| Ok(Value::from(!parameter.value.is_empty()))))
		.build()
});

static HANDLE: LazyLock<Arc<TypeInfo>> = LazyLock::new(|| {
	TypeInfo::builder("ParameterHandle")
		.namespace(NAMESPACE)
		.member(MemberInfo::property("IsBound", "Boolean").getter(|_: &ParameterHandle| Ok(Value::from(true))))
		.build()
});

static DOCUMENT: LazyLock<Arc<TypeInfo>> = LazyLock::new(|| {
	TypeInfo::builder("Document")
		.namespace(NAMESPACE)
		.member(MemberInfo::property("Title", "String").getter(|document: &Document| Ok(Value::from(document.title.as_str()))))
		.member(MemberInfo::property("Units", "String").getter(|document: &Document| Ok(Value::from(document.units.as_str()))))
		.member(MemberInfo::property("Elements", "List").getter(|document: &Document| Ok(Value::list(document.elements.iter().cloned()))))
		.member(MemberInfo::method("Save"))
		.build()
});

static ELEMENT_SET: LazyLock<Arc<TypeInfo>> = LazyLock::new(|| {
	TypeInfo::builder("ElementSet")
		.namespace(NAMESPACE)
		.member(MemberInfo::property("Size", "Int64").getter(|set: &ElementSet| Ok(Value::from(set.items.len() as i64))))
		.enumerator(|this| match this.downcast_ref::<ElementSet>() {
			Some(set) => Ok(set.items.clone()),
			None => Err(Fault::raised("InvalidCastException", "not an element set")),
		})
		.build()
});

/// `Sample.Model.Element`.
pub fn element_type() -> Arc<TypeInfo> {
	ELEMENT.clone()
}

/// `Sample.Model.Wall`, derived from `Element`.
pub fn wall_type() -> Arc<TypeInfo> {
	WALL.clone()
}

/// `Sample.Model.Parameter`.
pub fn parameter_type() -> Arc<TypeInfo> {
	PARAMETER.clone()
}

/// `Sample.Model.ParameterHandle`.
pub fn handle_type() -> Arc<TypeInfo> {
	HANDLE.clone()
}

/// `Sample.Model.Document`.
pub fn document_type() -> Arc<TypeInfo> {
	DOCUMENT.clone()
}

/// `Sample.Model.ElementSet`.
pub fn element_set_type() -> Arc<TypeInfo> {
	ELEMENT_SET.clone()
}

/// Every registered sample type.
pub fn sample_types() -> Vec<Arc<TypeInfo>> {
	vec![element_type(), wall_type(), parameter_type(), handle_type(), document_type(), element_set_type()]
}
