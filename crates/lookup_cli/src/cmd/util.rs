use lookup::engine::{DecomposeOptions, Value};
use lookup_testkit::{TARGETS, sample_options, sample_target};

use crate::error::{CliError, Result};

/// Decomposition switches shared by every target command.
#[derive(clap::Args, Debug, Clone, Copy, Default)]
pub struct DecomposeFlags {
	/// Enumerate fields.
	#[arg(long)]
	pub fields: bool,
	/// Enumerate events.
	#[arg(long)]
	pub events: bool,
	/// Show members that cannot be evaluated without arguments.
	#[arg(long)]
	pub unsupported: bool,
	/// Enumerate non-public members.
	#[arg(long)]
	pub private: bool,
	/// Enumerate static members of instances.
	#[arg(long = "static")]
	pub statics: bool,
	/// Walk the root `Object` level too.
	#[arg(long)]
	pub root: bool,
	/// Skip descriptor extension members.
	#[arg(long = "no-extensions")]
	pub no_extensions: bool,
	/// Do not follow redirectors.
	#[arg(long = "no-redirect")]
	pub no_redirect: bool,
	/// Decompose without the sample document as context.
	#[arg(long = "no-context")]
	pub no_context: bool,
}

impl DecomposeFlags {
	/// Engine options wired to the sample resolver.
	pub(crate) fn options(self) -> DecomposeOptions {
		let base = DecomposeOptions {
			include_root: self.root,
			include_fields: self.fields,
			include_events: self.events,
			include_unsupported: self.unsupported,
			include_private_members: self.private,
			include_static_members: self.statics,
			enable_extensions: !self.no_extensions,
			enable_redirection: !self.no_redirect,
			..DecomposeOptions::default()
		};
		let options = sample_options(base);
		if self.no_context { DecomposeOptions { context: None, ..options } } else { options }
	}
}

/// Resolve a target name to a sample value.
pub(crate) fn parse_target(name: &str) -> Result<Value> {
	sample_target(name).ok_or_else(|| CliError::UnknownTarget {
		name: name.to_owned(),
		expected: TARGETS.join(", "),
	})
}

/// Print a serde payload as pretty JSON on stdout.
pub(crate) fn emit_json<T: serde::Serialize>(payload: &T) -> Result<()> {
	println!("{}", serde_json::to_string_pretty(payload)?);
	Ok(())
}
