#![allow(missing_docs)]

use lookup::engine::{DecomposeOptions, DecomposedMember, Fault, MemberAttributes, Value, decompose, decompose_members, decompose_object};
use lookup_testkit::{sample_options, sample_resolver, sample_target};

fn target(name: &str) -> Value {
	sample_target(name).unwrap_or_else(|| panic!("sample target {name} exists"))
}

fn member<'a>(members: &'a [DecomposedMember], name: &str) -> &'a DecomposedMember {
	members.iter().find(|member| member.name == name).unwrap_or_else(|| panic!("member {name} listed"))
}

fn fault_of(member: &DecomposedMember) -> &Fault {
	member.value.raw_value.as_fault().unwrap_or_else(|| panic!("member {} should hold a fault", member.name))
}

#[test]
fn wall_members_follow_hierarchy_and_descriptors() {
	let options = sample_options(DecomposeOptions::default());
	let members = decompose_members(&target("wall"), Some(&options)).expect("wall decomposes");

	let names = members.iter().map(|member| member.name.as_str()).collect::<Vec<_>>();
	assert_eq!(
		names,
		[
			"Id",
			"Name",
			"Category",
			"IsValid",
			"Comment",
			"Parameter(String name)",
			"MarkHandle",
			"GetParameter(String name)",
			"GetDependentIds(Boolean includeHidden)",
			"HEX",
			"BoundingBox",
			"Length",
			"Layers",
			"Thickness",
			"Flip",
			"Document",
		]
	);
	assert!(members[..11].iter().all(|member| member.depth == 2 && member.declaring_type_name == "Element"));
	assert!(members[11..].iter().all(|member| member.depth == 1 && member.declaring_type_name == "Wall"));
}

#[test]
fn wall_values_carry_resolved_and_redirected_results() {
	let options = sample_options(DecomposeOptions::default());
	let members = decompose_members(&target("wall"), Some(&options)).expect("wall decomposes");

	assert_eq!(member(&members, "Id").value.raw_value.as_i64(), Some(202));
	assert_eq!(member(&members, "HEX").value.raw_value.as_str(), Some("0xCA"));
	assert_eq!(fault_of(member(&members, "BoundingBox")).kind(), "InvalidOperationException");
	assert_eq!(fault_of(member(&members, "Comment")).to_string(), "Property does not have a get accessor, it cannot be read");

	let length = member(&members, "Length");
	assert_eq!(length.value.raw_value.as_f64(), Some(4.25));
	assert_eq!(length.value.description.as_deref(), Some("metres"));

	let handle = member(&members, "MarkHandle");
	assert_eq!(handle.value.type_name, "Parameter");
	assert_eq!(handle.value.name, "Mark");
	assert_eq!(handle.value.description.as_deref(), Some("= A1"));

	let parameters = member(&members, "GetParameter(String name)");
	assert!(matches!(&parameters.value.raw_value, Value::Variants(items) if items.len() == 2));
	assert_eq!(member(&members, "Document").value.raw_value.as_str(), Some("Sample Project"));
	assert_eq!(member(&members, "Document").attributes, MemberAttributes::EXTENSION);
}

#[test]
fn context_free_run_skips_context_capabilities() {
	let options = DecomposeOptions::default().with_resolver(sample_resolver);
	let members = decompose_members(&target("wall"), Some(&options)).expect("wall decomposes");

	assert_eq!(member(&members, "Length").value.raw_value.as_f64(), Some(4250.0));
	assert!(members.iter().all(|member| member.name != "Document"));
}

#[test]
fn disposed_element_reports_each_member_failure() {
	let options = sample_options(DecomposeOptions::default());
	let members = decompose_members(&target("disposed"), Some(&options)).expect("disposed element decomposes");

	for name in ["Name", "Category", "MarkHandle", "GetDependentIds(Boolean includeHidden)"] {
		assert_eq!(fault_of(member(&members, name)).kind(), "ObjectDisposedException", "{name}");
	}
	assert_eq!(member(&members, "Id").value.raw_value.as_i64(), Some(303));
	assert_eq!(member(&members, "IsValid").value.raw_value.as_bool(), Some(false));
}

#[test]
fn panicking_getter_is_isolated() {
	let options = sample_options(DecomposeOptions::default());
	let members = decompose_members(&target("bare-wall"), Some(&options)).expect("bare wall decomposes");

	let thickness = fault_of(member(&members, "Thickness"));
	assert!(matches!(thickness, Fault::Panicked { .. }));
	assert_eq!(member(&members, "Flip").value.raw_value.as_bool(), Some(false));
}

#[test]
fn security_critical_members_are_never_evaluated() {
	let options = sample_options(DecomposeOptions::all_members());
	let members = decompose_members(&target("element"), Some(&options)).expect("element decomposes");

	assert!(members.iter().all(|member| member.name != "ReleaseUnmanagedResources"));
	assert!(members.iter().all(|member| member.name != "get_Name"));
	assert!(member(&members, "LastError").attributes.contains(MemberAttributes::PRIVATE));
	assert!(member(&members, "Origin").attributes.contains(MemberAttributes::STATIC | MemberAttributes::FIELD));
	assert_eq!(fault_of(member(&members, "Delete")).to_string(), "Member is disabled");
}

#[test]
fn selection_enumerates_its_elements() {
	let options = sample_options(DecomposeOptions::default());
	let members = decompose_members(&target("selection"), Some(&options)).expect("selection decomposes");

	let names = members.iter().map(|member| member.name.as_str()).collect::<Vec<_>>();
	assert_eq!(names, ["Size", "[0]", "[1]"]);
	assert_eq!(member(&members, "[0]").value.name, "Generic Box, ID101");
	assert_eq!(member(&members, "[1]").value.type_name, "Wall");
	assert_eq!(member(&members, "[1]").depth, 0);
}

#[test]
fn variants_root_lists_each_entry() {
	let members = decompose_members(&target("variants"), None).expect("variants decompose");
	let names = members.iter().map(|member| member.name.as_str()).collect::<Vec<_>>();
	assert_eq!(names, ["Count", "[0]", "[1]"]);
	assert_eq!(member(&members, "[0]").value.description.as_deref(), Some("primary"));
	assert_eq!(member(&members, "[1]").value.type_name, "Wall");
}

#[test]
fn type_target_lists_static_members() {
	let options = sample_options(DecomposeOptions {
		include_fields: true,
		..DecomposeOptions::default()
	});
	let object = decompose(&target("type:Wall"), Some(&options)).expect("type decomposes");

	assert_eq!(object.type_full_name, "Sample.Model.Wall");
	let names = object.members.iter().map(|member| member.name.as_str()).collect::<Vec<_>>();
	assert_eq!(names, ["Origin", "Instances"]);
	assert!(object.members.iter().all(|member| member.depth == 2));
}

#[test]
fn variant_root_keeps_handle_identity() {
	let root = target("variant");
	let Value::Variant(variant) = &root else {
		panic!("variant target is a variant");
	};
	let object = decompose_object(&root, Some(&sample_options(DecomposeOptions::default()))).expect("variant root decomposes");

	assert!(object.raw_value.same_ref(variant.value()));
	assert_eq!(object.type_name, "Wall");
	assert_eq!(object.description.as_deref(), Some("picked in view"));
}

#[test]
fn null_target_is_the_sentinel() {
	let object = decompose(&target("null"), Some(&sample_options(DecomposeOptions::default()))).expect("null decomposes");
	assert_eq!(object.type_name, "Object");
	assert!(object.raw_value.is_null());
	assert!(object.members.is_empty());
}
