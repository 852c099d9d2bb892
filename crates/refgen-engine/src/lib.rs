//! Task generation engine for refgen.
//!
//! Turns an arena description and a set of named task definitions into
//! concrete, reproducible task instances: which objects exist, where
//! they start, and where (or into what) they must be delivered.
//!
//! The entry point is [`TaskGenerator`]; the stage logic lives in
//! [`GenerationEngine`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod engine;
pub mod error;
pub mod feasibility;
pub mod generator;
pub mod inventory;
pub(crate) mod placement;
pub mod task;

pub use config::{keys, ConfigError, GeneratorConfig, TaskDefinition, TaskDefinitions};
pub use engine::{GenerationEngine, TaskInputs};
pub use error::GenerateError;
pub use feasibility::{Capability, Infeasibility};
pub use generator::TaskGenerator;
pub use task::{GeneratedTask, ObjectInstance};
