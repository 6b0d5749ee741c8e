//! Core types and service wiring for the skipper skip hire selector.

/// Domain models and identifiers shared by providers and front-ends.
pub mod model;
/// Traits describing the provider and checkout interfaces.
pub mod ports;
/// Tax-inclusive price calculation.
pub mod pricing;
/// High-level service facade used by clients.
pub mod service;

pub use model::*;
pub use ports::*;
pub use pricing::*;
pub use service::*;
