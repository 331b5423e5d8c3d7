#![allow(missing_docs)]

use clap::{Parser, Subcommand};
use lookup::engine::CountingAllocator;

mod cmd;
mod error;

#[global_allocator]
static ALLOCATOR: CountingAllocator = CountingAllocator;

#[derive(Parser)]
#[command(name = "lookup", about = "Runtime object decomposition over the sample model")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	Types(cmd::types::Args),
	Members(cmd::members::Args),
	Object(cmd::object::Args),
	Show(cmd::show::Args),
}

fn main() {
	tracing_subscriber::fmt()
		.with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
		.with_writer(std::io::stderr)
		.init();

	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> error::Result<()> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Types(args) => cmd::types::run(args),
		Commands::Members(args) => cmd::members::run(args),
		Commands::Object(args) => cmd::object::run(args),
		Commands::Show(args) => cmd::show::run(args),
	}
}
