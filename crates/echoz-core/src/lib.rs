//! echoz-core
//!
//! Pure domain types, document schema keys, and the template configuration
//! validator. No numeric norms and no rendering; this is the shared
//! vocabulary of the echoz system.

pub mod error;
pub mod models;
pub mod schema;
pub mod validation;
