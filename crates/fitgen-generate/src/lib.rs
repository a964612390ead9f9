//! Synthetic data generation for the fitgen fitness store.
//!
//! The engine applies the schema, then runs each entity generator inside its
//! own atomic store unit so a failing user never aborts the whole run.

pub mod engine;
pub mod errors;
pub mod generators;
pub mod model;
pub mod schema;
pub mod store;
pub mod synth;

pub use engine::GenerationEngine;
pub use errors::GenerationError;
pub use model::{GenerateOptions, GenerationReport, UnitFailure, UnitKind};
pub use schema::apply_schema;
pub use store::{SqliteStore, Store, StoreError, StoreUnit};
pub use synth::Synthesizer;
