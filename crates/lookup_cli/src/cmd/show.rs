use lookup::engine::decompose;

use crate::cmd::render::{ObjectJson, print_members, print_object};
use crate::cmd::util::{DecomposeFlags, emit_json, parse_target};
use crate::error::Result;

#[derive(clap::Args)]
pub struct Args {
	pub target: String,
	#[command(flatten)]
	pub flags: DecomposeFlags,
	#[arg(long)]
	pub json: bool,
}

/// Decompose one sample target: root projection followed by its members.
pub fn run(args: Args) -> Result<()> {
	let Args { target, flags, json } = args;

	let value = parse_target(&target)?;
	let options = flags.options();
	let object = decompose(&value, Some(&options))?;

	if json {
		return emit_json(&ObjectJson::new(&target, &object, true));
	}

	print_object(&target, &object);
	println!("members: {}", object.members.len());
	print_members(&object.members);
	Ok(())
}
