//! Shared fixtures for workspace crates: a small building-model object graph
//! plus descriptors exercising every decomposition capability.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use lookup::engine::{DecomposeOptions, Value, Variant, Variants};

mod descriptors;
mod model;

pub use descriptors::{ElementDescriptor, HandleDescriptor, ParameterDescriptor, WallDescriptor, sample_resolver};
pub use model::{
	Document, Element, ElementSet, NAMESPACE, Parameter, ParameterHandle, Wall, document_type, element_set_type, element_type, handle_type,
	parameter_type, sample_types, wall_type,
};

/// Names accepted by [`sample_target`], in listing order.
pub const TARGETS: &[&str] = &[
	"element",
	"wall",
	"bare-wall",
	"disposed",
	"parameter",
	"handle",
	"document",
	"selection",
	"variant",
	"variants",
	"null",
];

/// Live generic element.
pub fn sample_element() -> Element {
	Element::new(101, "Generic Box")
}

/// Layered exterior wall.
pub fn sample_wall() -> Wall {
	Wall {
		element: Element::new(202, "Basic Wall"),
		length_mm: 4250.0,
		layers: vec!["Brick".to_owned(), "Insulation".to_owned(), "Plaster".to_owned()],
	}
}

/// Document holding the sample element and wall, displayed in metres.
pub fn sample_document() -> Document {
	Document {
		title: "Sample Project".to_owned(),
		units: "m".to_owned(),
		elements: vec![Value::object(sample_element()), Value::object(sample_wall())],
	}
}

/// Resolve a target name to a sample value; `type:<Name>` yields a type handle.
pub fn sample_target(name: &str) -> Option<Value> {
	if let Some(type_name) = name.strip_prefix("type:") {
		return model::sample_types().into_iter().find(|ty| ty.name() == type_name).map(Value::Type);
	}

	let value = match name {
		"element" => Value::object(sample_element()),
		"wall" => Value::object(sample_wall()),
		"bare-wall" => Value::object(Wall {
			layers: Vec::new(),
			..sample_wall()
		}),
		"disposed" => Value::object(Element {
			disposed: true,
			category: None,
			..Element::new(303, "Deleted Box")
		}),
		"parameter" => Value::object(Parameter::new("Mark", "A1")),
		"handle" => Value::object(ParameterHandle {
			target: Arc::new(Parameter::new("Mark", "A1")),
		}),
		"document" => Value::object(sample_document()),
		"selection" => Value::object(ElementSet {
			items: sample_document().elements,
		}),
		"variants" => Value::from(Variants::new().add(Value::object(sample_element()), "primary").add(Value::object(sample_wall()), "secondary")),
		"variant" => Value::from(Variant::with_description(Value::object(sample_wall()), "picked in view")),
		"null" => Value::Null,
		_ => return None,
	};
	Some(value)
}

/// `base` wired to [`sample_resolver`] with the sample document as context.
pub fn sample_options(base: DecomposeOptions) -> DecomposeOptions {
	base.with_resolver(sample_resolver).with_context(sample_document())
}

/// Resolve the workspace root path.
pub fn workspace_root() -> PathBuf {
	let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
	manifest_dir
		.join("..")
		.join("..")
		.canonicalize()
		.unwrap_or_else(|_| manifest_dir.join("..").join(".."))
}

/// Resolve the workspace target directory.
pub fn target_dir() -> PathBuf {
	std::env::var_os("CARGO_TARGET_DIR")
		.map(PathBuf::from)
		.unwrap_or_else(|| workspace_root().join("target"))
}
