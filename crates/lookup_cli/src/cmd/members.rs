use lookup::engine::decompose_members;

use crate::cmd::render::{MemberJson, MembersJson, print_members};
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

/// Decompose the members of one sample target.
pub fn run(args: Args) -> Result<()> {
	let Args { target, flags, json } = args;

	let value = parse_target(&target)?;
	let options = flags.options();
	let members = decompose_members(&value, Some(&options))?;

	if json {
		let payload = MembersJson {
			target,
			members: members.iter().map(MemberJson::from).collect(),
		};
		return emit_json(&payload);
	}

	println!("target: {target}");
	println!("members: {}", members.len());
	print_members(&members);
	Ok(())
}
