//! Task definitions, generator configuration, and construction errors.
//!
//! [`TaskDefinition`] is the option map of one named task. Option values
//! are integers; flags are stored as `0`/`1`. Keys made only of
//! uppercase letters, digits and underscores are object type codes with
//! their requested count; every other key is a quota or flag listed in
//! [`keys`].
//!
//! [`GeneratorConfig`] holds the engine tunables and is checked by
//! [`validate()`](GeneratorConfig::validate) when a
//! [`TaskGenerator`](crate::TaskGenerator) is built.

use std::error::Error;
use std::fmt;

use indexmap::IndexMap;
use refgen_arena::table_types;
use refgen_core::TypeCodeError;

use crate::feasibility::Infeasibility;

// ── Option keys ────────────────────────────────────────────────────

/// Recognised task option names.
pub mod keys {
    /// Total number of objects to transport.
    pub const OBJECT_COUNT: &str = "object_count";
    /// Number of waypoints of a navigation task.
    pub const WAYPOINT_COUNT: &str = "waypoint_count";
    /// Number of precision-placement goals.
    pub const PP: &str = "pp";
    /// Number of objects to place into containers.
    pub const CONTAINER_PLACING: &str = "container_placing";
    /// Number of objects to place onto a shelf.
    pub const SHELF_GRASPING: &str = "shelf_grasping";
    /// Number of objects to pick from a shelf.
    pub const SHELF_PICKING: &str = "shelf_picking";
    /// Number of objects to grasp from the rotating table.
    pub const RT_GRASPING: &str = "rt_grasping";
    /// Number of objects to pick from the rotating table.
    pub const RT_PICKING: &str = "rt_picking";
    /// Task uses zero-height tables.
    pub const TABLE_HEIGHT_0: &str = "table_height_0";
    /// Task uses 5 cm tables.
    pub const TABLE_HEIGHT_5: &str = "table_height_5";
    /// Task uses 10 cm tables.
    pub const TABLE_HEIGHT_10: &str = "table_height_10";
    /// Task uses 15 cm tables.
    pub const TABLE_HEIGHT_15: &str = "table_height_15";
    /// RNG seed for reproducible generation.
    pub const SEED: &str = "seed";
    /// Containers may also stand on shelves.
    pub const CONTAINER_IN_SHELF: &str = "container_in_shelf";
    /// Precision placement accepts any orientation.
    pub const PP_TEAM_ORIENTATION: &str = "pp_team_orientation";

    /// Height flags paired with the table type they require.
    pub const HEIGHT_FLAGS: [(&str, &str); 4] = [
        (TABLE_HEIGHT_0, super::table_types::HEIGHT_0),
        (TABLE_HEIGHT_5, super::table_types::HEIGHT_5),
        (TABLE_HEIGHT_10, super::table_types::HEIGHT_10),
        (TABLE_HEIGHT_15, super::table_types::HEIGHT_15),
    ];
}

/// Whether an option key names an object type code (`[A-Z0-9_]+`).
pub fn is_object_code(key: &str) -> bool {
    !key.is_empty()
        && key
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'_')
}

// ── TaskDefinition ─────────────────────────────────────────────────

/// Options of one named task, in configuration order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TaskDefinition {
    options: IndexMap<String, i64>,
}

/// Named task definitions, in configuration order.
pub type TaskDefinitions = IndexMap<String, TaskDefinition>;

impl TaskDefinition {
    /// Create an empty definition.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an option, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: i64) {
        self.options.insert(key.into(), value);
    }

    /// Set an option, builder style.
    pub fn with(mut self, key: impl Into<String>, value: i64) -> Self {
        self.set(key, value);
        self
    }

    /// Set a flag (`1` or `0`), builder style.
    pub fn with_flag(self, key: impl Into<String>, on: bool) -> Self {
        self.with(key, i64::from(on))
    }

    /// Raw option value.
    pub fn value(&self, key: &str) -> Option<i64> {
        self.options.get(key).copied()
    }

    /// Option as a count; absent and negative values count as zero.
    pub fn count(&self, key: &str) -> u32 {
        self.value(key)
            .map_or(0, |v| u32::try_from(v.max(0)).unwrap_or(u32::MAX))
    }

    /// Option as a flag; set when present and non-zero.
    pub fn flag(&self, key: &str) -> bool {
        self.value(key).is_some_and(|v| v != 0)
    }

    /// Whether a quota is requested: present and non-negative.
    pub fn is_defined(&self, key: &str) -> bool {
        self.value(key).is_some_and(|v| v >= 0)
    }

    /// All options in configuration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.options.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Object type codes with a positive requested count.
    pub fn object_entries(&self) -> impl Iterator<Item = (&str, u32)> {
        self.iter().filter_map(|(key, value)| {
            if value > 0 && is_object_code(key) {
                Some((key, u32::try_from(value).unwrap_or(u32::MAX)))
            } else {
                None
            }
        })
    }
}

impl<K: Into<String>> FromIterator<(K, i64)> for TaskDefinition {
    fn from_iter<I: IntoIterator<Item = (K, i64)>>(iter: I) -> Self {
        Self {
            options: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while building a [`TaskGenerator`](crate::TaskGenerator).
///
/// Any of these means the arena/task-set pairing is unusable; no
/// generator instance is produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The arena or a task fails an arena-level feasibility check.
    Infeasible(Infeasibility),
    /// A cavity or object type code could not be decoded.
    InvalidTypeCode {
        /// Task declaring the code; `None` for arena cavities.
        task: Option<String>,
        /// The decoding failure.
        source: TypeCodeError,
    },
    /// A [`GeneratorConfig`] invariant is violated.
    InvalidGeneratorConfig {
        /// Which invariant was violated.
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Infeasible(e) => write!(f, "infeasible configuration: {e}"),
            Self::InvalidTypeCode {
                task: Some(task),
                source,
            } => write!(f, "{task}: {source}"),
            Self::InvalidTypeCode { task: None, source } => {
                write!(f, "arena cavities: {source}")
            }
            Self::InvalidGeneratorConfig { reason } => {
                write!(f, "invalid generator config: {reason}")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Infeasible(e) => Some(e),
            Self::InvalidTypeCode { source, .. } => Some(source),
            Self::InvalidGeneratorConfig { .. } => None,
        }
    }
}

impl From<Infeasibility> for ConfigError {
    fn from(e: Infeasibility) -> Self {
        Self::Infeasible(e)
    }
}

// ── GeneratorConfig ────────────────────────────────────────────────

/// Engine tunables shared by every task of a generator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Initial RNG seed, used until a task supplies its own `seed`.
    /// Default: 0.
    pub seed: u64,
    /// Cavities drawn per precision-placement table. Default: 5.
    pub cavities_per_pp_table: u32,
    /// Table types containers stand on, also used as the pool of
    /// pickup tables. Default: the four height classes.
    pub container_table_types: Vec<String>,
    /// Type code of precision-placement tables. Default: `"PP"`.
    pub precision_table_type: String,
    /// Type code of shelves. Default: `"SH"`.
    pub shelf_table_type: String,
    /// Type code of rotating tables. Default: `"TT"`.
    pub rotating_table_type: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            cavities_per_pp_table: 5,
            container_table_types: table_types::HEIGHTS
                .iter()
                .map(|t| t.to_string())
                .collect(),
            precision_table_type: table_types::PRECISION_PLACEMENT.to_string(),
            shelf_table_type: table_types::SHELF.to_string(),
            rotating_table_type: table_types::ROTATING_TABLE.to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Table types containers of `def` may stand on: the container
    /// table types, plus the shelf when `container_in_shelf` is set.
    pub fn container_tables_for(&self, def: &TaskDefinition) -> Vec<String> {
        let mut table_types = self.container_table_types.clone();
        if def.flag(keys::CONTAINER_IN_SHELF) {
            table_types.push(self.shelf_table_type.clone());
        }
        table_types
    }

    /// Validate all structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cavities_per_pp_table == 0 {
            return Err(ConfigError::InvalidGeneratorConfig {
                reason: "cavities_per_pp_table must be at least 1".to_string(),
            });
        }
        if self.container_table_types.is_empty() {
            return Err(ConfigError::InvalidGeneratorConfig {
                reason: "container_table_types must not be empty".to_string(),
            });
        }
        for (name, value) in [
            ("precision_table_type", &self.precision_table_type),
            ("shelf_table_type", &self.shelf_table_type),
            ("rotating_table_type", &self.rotating_table_type),
        ] {
            if value.is_empty() {
                return Err(ConfigError::InvalidGeneratorConfig {
                    reason: format!("{name} must not be empty"),
                });
            }
        }
        Ok(())
    }
}
