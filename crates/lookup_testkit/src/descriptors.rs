use std::any::{Any, TypeId};
use std::sync::Arc;

use lookup::engine::{
	ContextExtension, ContextResolver, Descriptor, Extension, ExtensionManager, Fault, Handler, LookupError, ParameterInfo, Redirector, Resolver,
	TypeDescriptor, TypeInfo, Value, Variant, Variants,
};

use crate::model::{Document, Element, NAMESPACE, Parameter, ParameterHandle, Wall};

/// Descriptor for `Element` values and the `Element` hierarchy level.
#[derive(Debug, Clone)]
pub struct ElementDescriptor {
	id: i64,
	name: String,
	parameters: Vec<Parameter>,
}

impl ElementDescriptor {
	/// Describe `element`.
	pub fn new(element: &Element) -> Self {
		Self {
			id: element.id,
			name: element.name.clone(),
			parameters: element.parameters.clone(),
		}
	}
}

impl Descriptor for ElementDescriptor {
	fn name(&self) -> Option<String> {
		Some(format!("{}, ID{}", self.name, self.id))
	}

	fn as_resolver(&self) -> Option<&dyn Resolver> {
		Some(self)
	}

	fn as_extension(&self) -> Option<&dyn Extension> {
		Some(self)
	}
}

impl Resolver for ElementDescriptor {
	fn resolve(&self, target: &str, _: &[ParameterInfo]) -> Option<Handler<'_>> {
		match target {
			"GetParameter" | "Parameter" => Some(Box::new(|| -> Result<Value, Fault> {
				let variants = self
					.parameters
					.iter()
					.fold(Variants::with_capacity(self.parameters.len()), |variants, parameter| {
						variants.add(Value::object(parameter.clone()), parameter.name.as_str())
					});
				Ok(Value::from(variants))
			})),
			"Delete" => Some(Box::new(|| -> Result<Value, Fault> { Ok(Value::from(Variant::disabled())) })),
			_ => None,
		}
	}
}

impl Extension for ElementDescriptor {
	fn register_extensions<'a>(&'a self, manager: &mut ExtensionManager<'a>) {
		manager.register("HEX", || Ok(Value::from(format!("{:#X}", self.id))));
		manager.register("BoundingBox", || Err(Fault::raised("InvalidOperationException", "Element has no geometry in this view")));
	}
}

/// Descriptor for the `Wall` level: unit-aware length and a document extension.
#[derive(Debug, Clone)]
pub struct WallDescriptor {
	length_mm: f64,
}

impl WallDescriptor {
	/// Describe `wall`.
	pub fn new(wall: &Wall) -> Self {
		Self { length_mm: wall.length_mm }
	}
}

impl Descriptor for WallDescriptor {
	fn description(&self) -> Option<String> {
		Some("Vertical partition".to_owned())
	}

	fn as_context_resolver(&self) -> Option<&dyn ContextResolver> {
		Some(self)
	}

	fn as_context_extension(&self) -> Option<&dyn ContextExtension> {
		Some(self)
	}
}

impl ContextResolver for WallDescriptor {
	fn context_type(&self) -> TypeId {
		TypeId::of::<Document>()
	}

	fn resolve_with<'a>(&'a self, context: &'a dyn Any, target: &str, _: &[ParameterInfo]) -> Option<Handler<'a>> {
		let document = context.downcast_ref::<Document>()?;
		if target != "Length" {
			return None;
		}
		Some(Box::new(move || -> Result<Value, Fault> {
			let converted = match document.units.as_str() {
				"m" => Variant::with_description(self.length_mm / 1000.0, "metres"),
				_ => Variant::with_description(self.length_mm, "millimetres"),
			};
			Ok(Value::from(converted))
		}))
	}
}

impl ContextExtension for WallDescriptor {
	fn context_type(&self) -> TypeId {
		TypeId::of::<Document>()
	}

	fn register_extensions_with<'a>(&'a self, manager: &mut ExtensionManager<'a>, context: &'a dyn Any) {
		let Some(document) = context.downcast_ref::<Document>() else {
			return;
		};
		manager.register("Document", move || Ok(Value::from(document.title.as_str())));
	}
}

/// Descriptor for parameter handles; redirects to the wrapped parameter.
#[derive(Debug, Clone)]
pub struct HandleDescriptor {
	target: Arc<Parameter>,
}

impl Descriptor for HandleDescriptor {
	fn name(&self) -> Option<String> {
		Some(format!("Handle -> {}", self.target.name))
	}

	fn as_redirector(&self) -> Option<&dyn Redirector> {
		Some(self)
	}
}

impl Redirector for HandleDescriptor {
	fn try_redirect(&self, _: &str) -> Option<Value> {
		Some(Value::object(Parameter::clone(&self.target)))
	}
}

/// Descriptor for parameters.
#[derive(Debug, Clone)]
pub struct ParameterDescriptor {
	name: String,
	value: String,
}

impl Descriptor for ParameterDescriptor {
	fn name(&self) -> Option<String> {
		Some(self.name.clone())
	}

	fn description(&self) -> Option<String> {
		(!self.value.is_empty()).then(|| format!("= {}", self.value))
	}
}

/// Resolver wiring every sample type to its descriptor.
///
/// Level lookups (`level` is `Some`) pick the descriptor by the level type;
/// value lookups pick it by the value's runtime type. Values without a
/// matching backing object fall back to [`TypeDescriptor`], except for a
/// non-null value claiming a sample type it cannot back.
pub fn sample_resolver(value: &Value, level: Option<&TypeInfo>) -> Result<Arc<dyn Descriptor>, LookupError> {
	let type_name = match level {
		Some(ty) => ty.full_name(),
		None => value.type_info().full_name(),
	};
	let Some(short) = type_name.strip_prefix(NAMESPACE).and_then(|rest| rest.strip_prefix('.')) else {
		return Ok(Arc::new(TypeDescriptor::for_value(value)));
	};
	if value.is_null() {
		return Ok(Arc::new(TypeDescriptor::for_value(value)));
	}

	let mismatch = || LookupError::Resolver {
		type_name: type_name.clone(),
		message: format!("value of type {} is not backed by {short}", value.type_info().full_name()),
	};
	let descriptor: Arc<dyn Descriptor> = match short {
		"Element" => Arc::new(ElementDescriptor::new(value.downcast_ref::<Element>().ok_or_else(mismatch)?)),
		"Wall" => Arc::new(WallDescriptor::new(value.downcast_ref::<Wall>().ok_or_else(mismatch)?)),
		"ParameterHandle" => {
			let handle = value.downcast_ref::<ParameterHandle>().ok_or_else(mismatch)?;
			Arc::new(HandleDescriptor {
				target: handle.target.clone(),
			})
		}
		"Parameter" => {
			let parameter = value.downcast_ref::<Parameter>().ok_or_else(mismatch)?;
			Arc::new(ParameterDescriptor {
				name: parameter.name.clone(),
				value: parameter.value.clone(),
			})
		}
		_ => Arc::new(TypeDescriptor::for_value(value)),
	};
	Ok(descriptor)
}
