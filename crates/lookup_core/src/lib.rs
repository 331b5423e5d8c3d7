//! Public library API for decomposing live objects into displayable member trees.

/// Type metadata, member enumeration, descriptor protocol, and the decomposition composer.
pub mod engine;
