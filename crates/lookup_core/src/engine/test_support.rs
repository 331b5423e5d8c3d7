use std::any::{Any, TypeId};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, LazyLock};

use crate::engine::{
	ContextExtension, ContextResolver, DecomposeOptions, DecomposedMember, Descriptor, Extension, ExtensionManager, Fault, Handler, MemberInfo,
	Object, ParameterInfo, Redirector, Resolver, TypeDescriptor, TypeInfo, Value, Variant, Variants,
};

pub(crate) struct Point {
	pub(crate) x: i64,
}

impl Object for Point {
	fn type_info(&self) -> Arc<TypeInfo> {
		POINT.clone()
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}

static POINT: LazyLock<Arc<TypeInfo>> = LazyLock::new(|| {
	TypeInfo::builder("Point")
		.namespace("Fixture")
		.member(MemberInfo::property("X", "Int64").getter(|point: &Point| Ok(Value::from(point.x))))
		.build()
});

pub(crate) fn point(x: i64) -> Value {
	Value::object(Point { x })
}

pub(crate) struct Shape {
	pub(crate) area: f64,
}

pub(crate) struct Widget {
	pub(crate) shape: Shape,
	pub(crate) label: String,
}

impl Object for Widget {
	fn type_info(&self) -> Arc<TypeInfo> {
		WIDGET.clone()
	}

	fn as_any(&self) -> &dyn Any {
		self
	}

	fn as_base(&self, type_id: TypeId) -> Option<&dyn Any> {
		if type_id == TypeId::of::<Shape>() {
			return Some(&self.shape);
		}
		(type_id == TypeId::of::<Self>()).then_some(self as &dyn Any)
	}

	fn display(&self) -> Option<String> {
		Some(format!("Widget {}", self.label))
	}
}

pub(crate) fn shape_type() -> Arc<TypeInfo> {
	SHAPE.clone()
}

pub(crate) fn widget_type() -> Arc<TypeInfo> {
	WIDGET.clone()
}

static SHAPE: LazyLock<Arc<TypeInfo>> = LazyLock::new(|| {
	TypeInfo::builder("Shape")
		.namespace("Fixture")
		.member(MemberInfo::property("Area", "Double").getter(|shape: &Shape| Ok(Value::from(shape.area))))
		.member(MemberInfo::property("Sides", "Int64").as_static().static_getter(|| Ok(Value::from(4))))
		.build()
});

static WIDGET: LazyLock<Arc<TypeInfo>> = LazyLock::new(|| {
	TypeInfo::builder("Widget")
		.namespace("Fixture")
		.base(&SHAPE)
		.member(MemberInfo::field("label", "String").private().getter(|widget: &Widget| Ok(Value::from(widget.label.as_str()))))
		.member(MemberInfo::field("Version", "Int64").as_static().static_getter(|| Ok(Value::from(3))))
		.member(MemberInfo::property("X", "Int64").getter(|_: &Widget| Ok(Value::from(42))))
		.member(MemberInfo::property("Broken", "Int64").getter(|_: &Widget| Err(Fault::raised("InvalidOperationException", "Widget is broken"))))
		.member(MemberInfo::property("Panicky", "Int64").getter(|_: &Widget| -> Result<Value, Fault> { panic!("widget getter panicked") }))
		.member(MemberInfo::property("Secret", "String"))
		.member(MemberInfo::property("Item", "Int64").param("index", "Int64").getter(|_: &Widget| Ok(Value::from(0))))
		.member(MemberInfo::property("Hidden", "Int64").private().getter(|_: &Widget| Ok(Value::from(7))))
		.member(MemberInfo::property("Instances", "Int64").as_static().static_getter(|| Ok(Value::from(1))))
		.member(MemberInfo::method("Scale").param("factor", "Double").returns("Double").getter(|_: &Widget| Ok(Value::from(1.0))))
		.member(MemberInfo::method("Reset"))
		.member(MemberInfo::method("Describe").optional_param("format", "String").returns("String").getter(|widget: &Widget| {
			Ok(Value::from(format!("widget {}", widget.label)))
		}))
		.member(MemberInfo::method("get_X").returns("Int64").special_name().getter(|_: &Widget| Ok(Value::from(42))))
		.member(
			MemberInfo::method("Unload")
				.returns("Boolean")
				.family()
				.security_critical()
				.getter(|_: &Widget| -> Result<Value, Fault> { panic!("security-critical member touched") }),
		)
		.member(MemberInfo::event("Changed", "EventHandler"))
		.build()
});

pub(crate) fn widget() -> Value {
	Value::object(Widget {
		shape: Shape { area: 2.5 },
		label: "alpha".to_owned(),
	})
}

pub(crate) struct Tape;

impl Object for Tape {
	fn type_info(&self) -> Arc<TypeInfo> {
		TAPE.clone()
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}

static TAPE: LazyLock<Arc<TypeInfo>> = LazyLock::new(|| {
	TypeInfo::builder("Tape")
		.namespace("Fixture")
		.enumerator(|_| Err(Fault::invocation(Fault::raised("IOException", "tape is torn"))))
		.build()
});

/// Enumerable object whose enumerator always fails.
pub(crate) fn tape() -> Value {
	Value::object(Tape)
}

/// Members whose name equals `name`.
pub(crate) fn find<'a>(members: &'a [DecomposedMember], name: &str) -> Option<&'a DecomposedMember> {
	members.iter().find(|member| member.name == name)
}

pub(crate) fn names(members: &[DecomposedMember]) -> Vec<&str> {
	members.iter().map(|member| member.name.as_str()).collect()
}

/// Resolver that counts every call and returns plain type descriptors.
pub(crate) fn counting_options(base: DecomposeOptions) -> (DecomposeOptions, Arc<AtomicUsize>) {
	let calls = Arc::new(AtomicUsize::new(0));
	let counter = calls.clone();
	let options = base.with_resolver(move |value, _| {
		counter.fetch_add(1, Ordering::SeqCst);
		Ok(Arc::new(TypeDescriptor::for_value(value)) as Arc<dyn Descriptor>)
	});
	(options, calls)
}

/// Route every value and level through `descriptor`.
pub(crate) fn options_with(base: DecomposeOptions, descriptor: impl Descriptor + 'static) -> DecomposeOptions {
	let descriptor: Arc<dyn Descriptor> = Arc::new(descriptor);
	base.with_resolver(move |_, _| Ok(descriptor.clone()))
}

/// Overrides `X` and disables `Broken`; registers extensions including one that fails.
pub(crate) struct WidgetDescriptor;

impl Descriptor for WidgetDescriptor {
	fn name(&self) -> Option<String> {
		Some("widget".to_owned())
	}

	fn description(&self) -> Option<String> {
		Some("fixture widget".to_owned())
	}

	fn as_resolver(&self) -> Option<&dyn Resolver> {
		Some(self)
	}

	fn as_extension(&self) -> Option<&dyn Extension> {
		Some(self)
	}
}

impl Resolver for WidgetDescriptor {
	fn resolve(&self, target: &str, _: &[ParameterInfo]) -> Option<Handler<'_>> {
		match target {
			"X" => Some(handler(|| Variant::with_description(100, "overridden").into())),
			"Broken" => Some(handler(|| Variants::disabled().into())),
			"Scale" => Some(handler(|| Variants::new().add(2.0, "double").add(0.5, "half").into())),
			_ => None,
		}
	}
}

impl Extension for WidgetDescriptor {
	fn register_extensions<'a>(&'a self, manager: &mut ExtensionManager<'a>) {
		manager.register("HEX", || Err(Fault::raised("FormatException", "no hex form")));
		manager.register("Tag", || Ok(Value::from("tagged")));
	}
}

fn handler<'a>(produce: impl FnOnce() -> Value + 'a) -> Handler<'a> {
	Box::new(move || Ok(produce()))
}

/// Ambient context for context-typed capabilities.
pub(crate) struct Session {
	pub(crate) user: &'static str,
}

/// Context-typed resolver and extension keyed on [`Session`].
pub(crate) struct SessionDescriptor;

impl Descriptor for SessionDescriptor {
	fn as_context_resolver(&self) -> Option<&dyn ContextResolver> {
		Some(self)
	}

	fn as_resolver(&self) -> Option<&dyn Resolver> {
		Some(self)
	}

	fn as_context_extension(&self) -> Option<&dyn ContextExtension> {
		Some(self)
	}

	fn as_extension(&self) -> Option<&dyn Extension> {
		Some(self)
	}
}

impl ContextResolver for SessionDescriptor {
	fn context_type(&self) -> TypeId {
		TypeId::of::<Session>()
	}

	fn resolve_with<'a>(&'a self, context: &'a dyn Any, target: &str, _: &[ParameterInfo]) -> Option<Handler<'a>> {
		let session = context.downcast_ref::<Session>()?;
		(target == "X").then(|| handler(move || Value::from(session.user)))
	}
}

impl Resolver for SessionDescriptor {
	fn resolve(&self, target: &str, _: &[ParameterInfo]) -> Option<Handler<'_>> {
		(target == "X").then(|| handler(|| Value::from("anonymous")))
	}
}

impl ContextExtension for SessionDescriptor {
	fn context_type(&self) -> TypeId {
		TypeId::of::<Session>()
	}

	fn register_extensions_with<'a>(&'a self, manager: &mut ExtensionManager<'a>, context: &'a dyn Any) {
		if let Some(session) = context.downcast_ref::<Session>() {
			manager.register("User", move || Ok(Value::from(session.user)));
		}
	}
}

impl Extension for SessionDescriptor {
	fn register_extensions<'a>(&'a self, manager: &mut ExtensionManager<'a>) {
		manager.register("Plain", || Ok(Value::from(true)));
	}
}

/// Redirector that declines every time.
pub(crate) struct Declining;

impl Descriptor for Declining {
	fn as_redirector(&self) -> Option<&dyn Redirector> {
		Some(self)
	}
}

impl Redirector for Declining {
	fn try_redirect(&self, _: &str) -> Option<Value> {
		None
	}
}

/// Redirects an integer to its successor, forever.
pub(crate) struct Successor {
	pub(crate) value: i64,
	pub(crate) description: Option<&'static str>,
}

impl Descriptor for Successor {
	fn description(&self) -> Option<String> {
		self.description.map(str::to_owned)
	}

	fn as_redirector(&self) -> Option<&dyn Redirector> {
		Some(self)
	}
}

impl Redirector for Successor {
	fn try_redirect(&self, _: &str) -> Option<Value> {
		Some(Value::from(self.value + 1))
	}
}
