//! refgen: a seeded task generator for robotics benchmark competitions.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all refgen sub-crates. For most users, adding `refgen` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use refgen::prelude::*;
//!
//! let arena = ArenaDescription::new()
//!     .with_workstation("WS01", "10")
//!     .with_workstation("WS02", "05")
//!     .with_workstation("PP01", "PP")
//!     .with_cavity("M20_H", 3)
//!     .with_cavity("R20_V", 3);
//!
//! let mut tasks = TaskDefinitions::new();
//! tasks.insert(
//!     "PPT".to_string(),
//!     TaskDefinition::new()
//!         .with(keys::SEED, 7)
//!         .with(keys::OBJECT_COUNT, 3)
//!         .with(keys::PP, 2)
//!         .with("M20", 2)
//!         .with("R20", 2),
//! );
//!
//! let mut generator = TaskGenerator::new(arena, tasks).unwrap();
//! let task = generator.generate("PPT").unwrap();
//! assert_eq!(task.cavities().count(), 5);
//! assert_eq!(task.placements().count(), 3);
//!
//! // Same seed, same task.
//! assert_eq!(generator.generate("PPT").unwrap(), task);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `refgen-core` | IDs, type-code codec, inventory quotas |
//! | [`arena`] | `refgen-arena` | Arena description and table registry |
//! | [`engine`] | `refgen-engine` | Task definitions, feasibility, generation |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and IDs (`refgen-core`).
///
/// Contains [`types::TableId`], [`types::ObjectId`], the type-code codec
/// ([`types::classify`]) and [`types::ObjectTypeQuota`].
pub use refgen_core as types;

/// Arena description and table registry (`refgen-arena`).
///
/// [`arena::ArenaDescription`] is the input; [`arena::TableRegistry`]
/// resolves the [`types::TableId`]s found in generated tasks.
pub use refgen_arena as arena;

/// Task definitions, feasibility checks and the generator (`refgen-engine`).
///
/// [`engine::TaskGenerator`] is the entry point; [`engine::keys`] lists
/// every recognised task option.
pub use refgen_engine as engine;

/// Common imports for typical refgen usage.
///
/// ```rust
/// use refgen::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use refgen_core::{classify, Category, Classification, ObjectId, Orientation, TableId};

    // Arena
    pub use refgen_arena::{ArenaDescription, Table, TableRegistry};

    // Configuration
    pub use refgen_engine::{keys, GeneratorConfig, TaskDefinition, TaskDefinitions};

    // Output
    pub use refgen_engine::{GeneratedTask, ObjectInstance, TaskGenerator};

    // Errors
    pub use refgen_engine::{ConfigError, GenerateError, Infeasibility};
}
