use lookup::engine::{DecomposedMember, DecomposedObject, DecomposedValue, Value};

#[derive(serde::Serialize)]
pub(crate) struct ObjectJson {
	pub target: String,
	pub name: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	#[serde(rename = "type")]
	pub type_name: String,
	pub type_full_name: String,
	pub kind: &'static str,
	pub has_descriptor: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub members: Option<Vec<MemberJson>>,
}

#[derive(serde::Serialize)]
pub(crate) struct MembersJson {
	pub target: String,
	pub members: Vec<MemberJson>,
}

#[derive(serde::Serialize)]
pub(crate) struct MemberJson {
	pub depth: u32,
	pub name: String,
	pub declaring_type: String,
	pub declaring_type_full_name: String,
	pub attributes: String,
	pub time_ms: f64,
	pub allocated_bytes: u64,
	pub value: ValueJson,
}

#[derive(serde::Serialize)]
pub(crate) struct ValueJson {
	pub name: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	#[serde(rename = "type")]
	pub type_name: String,
	pub type_full_name: String,
	pub kind: &'static str,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub fault: Option<FaultJson>,
}

#[derive(serde::Serialize)]
pub(crate) struct FaultJson {
	pub kind: String,
	pub message: String,
}

impl ObjectJson {
	pub(crate) fn new(target: &str, object: &DecomposedObject, with_members: bool) -> Self {
		Self {
			target: target.to_owned(),
			name: object.name.clone(),
			description: object.description.clone(),
			type_name: object.type_name.clone(),
			type_full_name: object.type_full_name.clone(),
			kind: object.raw_value.kind(),
			has_descriptor: object.descriptor.is_some(),
			members: with_members.then(|| object.members.iter().map(MemberJson::from).collect()),
		}
	}
}

impl From<&DecomposedMember> for MemberJson {
	fn from(member: &DecomposedMember) -> Self {
		Self {
			depth: member.depth,
			name: member.name.clone(),
			declaring_type: member.declaring_type_name.clone(),
			declaring_type_full_name: member.declaring_type_full_name.clone(),
			attributes: member.attributes.label(),
			time_ms: member.computation_time_ms(),
			allocated_bytes: member.allocated_bytes,
			value: ValueJson::from(&member.value),
		}
	}
}

impl From<&DecomposedValue> for ValueJson {
	fn from(value: &DecomposedValue) -> Self {
		Self {
			name: value.name.clone(),
			description: value.description.clone(),
			type_name: value.type_name.clone(),
			type_full_name: value.type_full_name.clone(),
			kind: value.raw_value.kind(),
			fault: value.raw_value.as_fault().map(|fault| FaultJson {
				kind: fault.kind().to_owned(),
				message: fault.to_string(),
			}),
		}
	}
}

/// Print the root projection as `key: value` lines.
pub(crate) fn print_object(target: &str, object: &DecomposedObject) {
	println!("target: {target}");
	println!("name: {}", object.name);
	if let Some(description) = &object.description {
		println!("description: {description}");
	}
	println!("type: {} ({})", object.type_name, object.type_full_name);
	println!("kind: {}", object.raw_value.kind());
	println!("descriptor: {}", if object.descriptor.is_some() { "yes" } else { "no" });
}

/// Print members as a tab-separated table.
pub(crate) fn print_members(members: &[DecomposedMember]) {
	println!("depth\tdeclaring_type\tname\tattributes\ttime_ms\tbytes\tvalue");
	for member in members {
		println!(
			"{}\t{}\t{}\t{}\t{:.3}\t{}\t{}",
			member.depth,
			member.declaring_type_name,
			member.name,
			member.attributes.label(),
			member.computation_time_ms(),
			member.allocated_bytes,
			value_cell(&member.value)
		);
	}
}

fn value_cell(value: &DecomposedValue) -> String {
	if let Value::Fault(fault) = &value.raw_value {
		return format!("! {}: {fault}", fault.kind());
	}
	match &value.description {
		Some(description) => format!("{} ({description})", value.name),
		None => value.name.clone(),
	}
}
