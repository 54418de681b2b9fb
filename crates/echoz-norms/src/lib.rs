//! echoz-norms
//!
//! Normative reference data and the Z-score maths. Pure computation, no I/O.
//! Defines the allometric transform, the parameter registry it reads its
//! constants from, batch score computation, and the built-in reference sets.

pub mod error;
pub mod registry;
pub mod scoring;
pub mod sources;
pub mod transform;

use registry::ParameterRegistry;

/// Trait implemented by each published set of normative values.
pub trait NormativeSource: Send + Sync {
    /// Unique identifier for this source (e.g., "pettersen_detroit").
    fn id(&self) -> &str;

    /// Human-readable name (e.g., "Pettersen / Detroit").
    fn name(&self) -> &str;

    /// Literature reference for the published values.
    fn citation(&self) -> &str;

    /// The parameters this source defines.
    fn registry(&self) -> &ParameterRegistry;

    /// Parameter names in lexical order.
    fn parameter_names(&self) -> Vec<&str> {
        self.registry().names()
    }
}

/// Return all built-in sources.
pub fn all_sources() -> Vec<Box<dyn NormativeSource>> {
    vec![Box::new(sources::pettersen_detroit::PettersenDetroit)]
}

/// Look up a built-in source by ID.
pub fn get_source(id: &str) -> Option<Box<dyn NormativeSource>> {
    all_sources().into_iter().find(|s| s.id() == id)
}
