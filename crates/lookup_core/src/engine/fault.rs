use std::any::Any;
use std::sync::Arc;

use thiserror::Error;

/// Failure captured while evaluating one member.
///
/// A fault is a value: it is stored as the member's raw value so the UI can
/// show why a member has no result, distinct from a genuine `null`.
#[derive(Debug, Clone, Error)]
pub enum Fault {
	/// Error returned by inspected code.
	#[error("{message}")]
	Raised {
		/// Error category, e.g. `InvalidOperationException`.
		kind: Arc<str>,
		/// Human-readable message.
		message: Arc<str>,
	},
	/// Reflection plumbing wrapper around a callee failure.
	#[error("Exception has been thrown by the target of an invocation")]
	TargetInvocation {
		/// Failure raised by the invoked member itself.
		#[source]
		inner: Arc<Fault>,
	},
	/// Inspected code panicked.
	#[error("{message}")]
	Panicked {
		/// Panic payload text.
		message: Arc<str>,
	},
	/// Member shape cannot be evaluated without context.
	#[error("{reason}")]
	NotSupported {
		/// Descriptive reason shown in place of a value.
		reason: Arc<str>,
	},
	/// Invocation target does not have the member's declaring type.
	#[error("Object of type {got} cannot be converted to target type {expected}")]
	TargetMismatch {
		/// Expected receiver type.
		expected: Arc<str>,
		/// Actual receiver type.
		got: Arc<str>,
	},
	/// Underlying native object is no longer valid.
	#[error("Cannot access a disposed object of type {type_name}")]
	ObjectDisposed {
		/// Type name of the disposed wrapper.
		type_name: Arc<str>,
	},
}

impl Fault {
	/// Build an error raised by inspected code.
	pub fn raised(kind: impl Into<Arc<str>>, message: impl Into<Arc<str>>) -> Self {
		Self::Raised {
			kind: kind.into(),
			message: message.into(),
		}
	}

	/// Build a descriptive unsupported-shape fault.
	pub fn not_supported(reason: impl Into<Arc<str>>) -> Self {
		Self::NotSupported { reason: reason.into() }
	}

	/// Build a disposed-object fault.
	pub fn disposed(type_name: impl Into<Arc<str>>) -> Self {
		Self::ObjectDisposed { type_name: type_name.into() }
	}

	/// Wrap a callee failure the way reflective invocation does.
	pub fn invocation(inner: Fault) -> Self {
		Self::TargetInvocation { inner: Arc::new(inner) }
	}

	/// Convert a caught panic payload into a fault.
	pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
		let message = if let Some(text) = payload.downcast_ref::<&'static str>() {
			Arc::<str>::from(*text)
		} else if let Some(text) = payload.downcast_ref::<String>() {
			Arc::<str>::from(text.as_str())
		} else {
			Arc::<str>::from("panic with non-string payload")
		};
		Self::Panicked { message }
	}

	/// Strip one invocation wrapper, returning the real cause.
	pub fn into_cause(self) -> Self {
		match self {
			Self::TargetInvocation { inner } => Arc::unwrap_or_clone(inner),
			other => other,
		}
	}

	/// Short category label for display.
	pub fn kind(&self) -> &str {
		match self {
			Self::Raised { kind, .. } => kind,
			Self::TargetInvocation { .. } => "TargetInvocationException",
			Self::Panicked { .. } => "Panic",
			Self::NotSupported { .. } => "NotSupportedException",
			Self::TargetMismatch { .. } => "TargetException",
			Self::ObjectDisposed { .. } => "ObjectDisposedException",
		}
	}

	/// Wrapped cause, if any.
	pub fn inner(&self) -> Option<&Fault> {
		match self {
			Self::TargetInvocation { inner } => Some(inner),
			_ => None,
		}
	}
}
