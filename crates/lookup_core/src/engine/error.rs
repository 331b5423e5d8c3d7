use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, LookupError>;

/// Engine-level failures that abort a whole decomposition call.
///
/// Failures of individual members never surface here; they are captured as
/// [`crate::engine::Fault`] values on the member that produced them.
#[derive(Debug, Error)]
pub enum LookupError {
	/// Per-call walk state was read before the walk entered a type level.
	#[error("engine state not initialized: {accessor} read before the walk entered a type level")]
	EngineState {
		/// Accessor that was used too early.
		accessor: &'static str,
	},
	/// The configured type resolver could not produce a descriptor.
	#[error("type resolver failed for {type_name}: {message}")]
	Resolver {
		/// Runtime type name of the value being resolved.
		type_name: String,
		/// Resolver-provided failure text.
		message: String,
	},
}
