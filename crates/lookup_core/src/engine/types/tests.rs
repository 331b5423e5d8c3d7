use crate::engine::test_support::{shape_type, widget_type};
use crate::engine::{BindingFlags, MemberInfo, TypeInfo, Value, list_type, object_type, string_type};

#[test]
fn types_without_explicit_base_derive_from_object() {
	let ty = TypeInfo::builder("Plain").namespace("Fixture").build();
	let base = ty.base().expect("registered types have a base");
	assert!(base.is(&object_type()));
	assert!(object_type().base().is_none());
	assert_eq!(ty.full_name(), "Fixture.Plain");
	assert_eq!(TypeInfo::builder("Global").build().full_name(), "Global");
}

#[test]
fn declared_only_stops_at_the_queried_level() {
	let widget = widget_type();
	let flags = BindingFlags::PUBLIC | BindingFlags::INSTANCE;

	let declared = widget.properties(flags | BindingFlags::DECLARED_ONLY);
	assert!(declared.iter().all(|member| member.name.as_ref() != "Area"));

	let inherited = widget.properties(flags);
	let names = inherited.iter().map(|member| member.name.as_ref()).collect::<Vec<_>>();
	assert!(names.contains(&"X"));
	assert_eq!(names.last(), Some(&"Area"));
}

#[test]
fn binding_flags_filter_visibility_and_scope() {
	let widget = widget_type();
	let public_static = widget.members(BindingFlags::PUBLIC | BindingFlags::STATIC | BindingFlags::DECLARED_ONLY);
	let names = public_static.iter().map(|member| member.name.as_ref()).collect::<Vec<_>>();
	assert_eq!(names, ["Version", "Instances"]);

	let private = widget.members(BindingFlags::NON_PUBLIC | BindingFlags::INSTANCE | BindingFlags::DECLARED_ONLY);
	let names = private.iter().map(|member| member.name.as_ref()).collect::<Vec<_>>();
	assert_eq!(names, ["label", "Hidden", "Unload"]);
}

#[test]
fn member_kinds_are_partitioned() {
	let widget = widget_type();
	let flags = BindingFlags::all() - BindingFlags::DECLARED_ONLY;
	assert_eq!(widget.fields(flags).len(), 2);
	assert_eq!(widget.events(flags).len(), 1);
	assert!(widget.methods(flags).iter().any(|member| member.name.as_ref() == "GetType"));
}

#[test]
fn subclass_checks_walk_the_base_chain() {
	let widget = widget_type();
	assert!(widget.is_subclass_of(&shape_type()));
	assert!(widget.is_subclass_of(&object_type()));
	assert!(!shape_type().is_subclass_of(&widget));
}

#[test]
fn enumerator_is_inherited() {
	let bag = TypeInfo::builder("Bag").base(&list_type()).member(MemberInfo::property("Tag", "String")).build();
	let enumerator = bag.enumerator().expect("inherits list enumerator");
	let items = enumerator(&Value::list([Value::from(1), Value::from(2)])).expect("list enumerates");
	assert_eq!(items.len(), 2);
	assert!(string_type().enumerator().is_none());
}
