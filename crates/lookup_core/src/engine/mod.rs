mod builtin;
mod composer;
mod descriptor;
mod diagnostics;
mod enumerate;
mod error;
mod fault;
mod hierarchy;
mod member;
mod model;
mod options;
mod redirect;
mod types;
mod value;
mod variant;

#[cfg(test)]
mod test_support;

/// Builtin runtime types shared by every decomposition.
pub use builtin::{
	boolean_type, double_type, fault_type, int64_type, list_type, member_type, object_type, string_type, type_type, uint64_type, variant_type,
	variants_type,
};
/// Decomposition entry points.
pub use composer::{LookupComposer, decompose, decompose_members, decompose_object};
/// Descriptor protocol consumed by the composer.
pub use descriptor::{
	ContextExtension, ContextRedirector, ContextResolver, Descriptor, Extension, ExtensionManager, Handler, Redirector, Resolver, TypeDescriptor,
	TypeResolver, context_matches, default_resolver,
};
/// Timing and allocation probes.
pub use diagnostics::{CountingAllocator, Measurement, MemoryDiagnoser, ProbeScope, TimeDiagnoser, allocated_bytes, measure};
/// Error and result aliases.
pub use error::{LookupError, Result};
/// Failure values surfaced in place of member values.
pub use fault::Fault;
/// Type hierarchy walk.
pub use hierarchy::{HierarchyLevel, hierarchy, levels};
/// Reflectable member metadata.
pub use member::{BindingFlags, Getter, MemberInfo, MemberKind, ParameterInfo, Visibility};
/// Decomposition result model.
pub use model::{DecomposedMember, DecomposedObject, DecomposedValue, MemberAttributes};
/// Per-call configuration.
pub use options::DecomposeOptions;
/// Runtime type metadata.
pub use types::{Enumerator, TypeBuilder, TypeInfo};
/// Inspected values.
pub use value::{Object, Value};
/// Named resolver and extension results.
pub use variant::{Variant, Variants};
