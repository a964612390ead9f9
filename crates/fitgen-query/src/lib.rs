//! Labeled-query runner for a populated fitness store.
//!
//! Parses a file of `-- label` / statement pairs, binds the optional user
//! parameter, executes against SQLite and renders the rows.

pub mod catalog;
pub mod errors;
pub mod params;
pub mod render;
pub mod runner;

pub use catalog::{LabeledQuery, QueryCatalog};
pub use errors::QueryError;
pub use params::bind_parameters;
pub use render::render_rows;
pub use runner::{CellValue, QueryOutput, QueryRunner};
