use lookup::engine::hierarchy;
use lookup_testkit::sample_types;

use crate::cmd::util::emit_json;
use crate::error::Result;

#[derive(clap::Args)]
pub struct Args {
	#[arg(long)]
	pub json: bool,
}

/// List sample-model types with their base chain.
pub fn run(args: Args) -> Result<()> {
	let Args { json } = args;

	let rows: Vec<TypeRow> = sample_types()
		.iter()
		.map(|ty| TypeRow {
			name: ty.name().to_owned(),
			full_name: ty.full_name(),
			hierarchy: hierarchy(ty, true).iter().map(|level| level.name().to_owned()).collect(),
			declared_members: ty.declared_members().len(),
			enumerable: ty.enumerator().is_some(),
		})
		.collect();

	if json {
		return emit_json(&TypesJson { types: rows });
	}

	println!("types: {}", rows.len());
	println!("name\tfull_name\tdeclared_members\tenumerable\thierarchy");
	for row in &rows {
		println!(
			"{}\t{}\t{}\t{}\t{}",
			row.name,
			row.full_name,
			row.declared_members,
			row.enumerable,
			row.hierarchy.join(" < ")
		);
	}
	Ok(())
}

#[derive(serde::Serialize)]
struct TypesJson {
	types: Vec<TypeRow>,
}

#[derive(serde::Serialize)]
struct TypeRow {
	name: String,
	full_name: String,
	hierarchy: Vec<String>,
	declared_members: usize,
	enumerable: bool,
}
