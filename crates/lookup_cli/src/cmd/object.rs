use lookup::engine::decompose_object;

use crate::cmd::render::{ObjectJson, print_object};
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

/// Print the root projection of one sample target without walking members.
pub fn run(args: Args) -> Result<()> {
	let Args { target, flags, json } = args;

	let value = parse_target(&target)?;
	let options = flags.options();
	let object = decompose_object(&value, Some(&options))?;

	if json {
		return emit_json(&ObjectJson::new(&target, &object, false));
	}

	print_object(&target, &object);
	Ok(())
}
