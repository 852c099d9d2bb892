//! Arena model for refgen.
//!
//! An arena is the set of named tables (workstations) a competition
//! round runs on, each tagged with a table-type code, plus the pool of
//! cavity types available for precision placement.
//!
//! # Layout
//!
//! - [`ArenaDescription`]: the raw input, as supplied by a config loader.
//! - [`Table`]: one named surface.
//! - [`TableRegistry`]: tables indexed by type code, queried by the
//!   generation engine.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod description;
pub mod registry;
pub mod table;

pub use description::ArenaDescription;
pub use registry::TableRegistry;
pub use table::{table_types, Table};
