use lookup::engine::LookupError;
use thiserror::Error;

/// Failure surfaced by a CLI command.
#[derive(Debug, Error)]
pub enum CliError {
	/// Engine-level failure.
	#[error(transparent)]
	Lookup(#[from] LookupError),
	/// Target name is not a sample object or sample type.
	#[error("unknown target {name}; expected one of {expected} or type:<Name>")]
	UnknownTarget { name: String, expected: String },
	/// JSON rendering failed.
	#[error("failed to render json: {0}")]
	Json(#[from] serde_json::Error),
}

/// CLI result alias.
pub type Result<T> = std::result::Result<T, CliError>;
