//! Reusable arenas and task definitions.
//!
//! - [`standard_arena`]: two precision-placement tables, a shelf, a
//!   rotating table, and one table of every height class, with a cavity
//!   pool covering every form used by [`standard_objects`].
//! - [`minimal_arena`]: two plain tables, nothing else.
//! - [`transport_task`], [`precision_task`], [`navigation_task`]:
//!   reference tasks built with [`TaskBuilder`].

use refgen_arena::ArenaDescription;
use refgen_engine::{keys, TaskDefinition, TaskDefinitions};

/// Object types and counts available in the standard tasks.
///
/// Every cavity form of [`standard_arena`] has at least four matching
/// objects, enough for ten precision-placement goals.
pub fn standard_objects() -> Vec<(&'static str, i64)> {
    vec![
        ("F20_20_B", 3),
        ("F20_20_G", 3),
        ("S40_40_B", 3),
        ("S40_40_G", 3),
        ("M20", 4),
        ("M30", 4),
        ("R20", 4),
        ("AXIS", 2),
        ("BEARING", 2),
    ]
}

pub fn standard_arena() -> ArenaDescription {
    ArenaDescription::new()
        .with_workstation("WS01", "00")
        .with_workstation("WS02", "05")
        .with_workstation("WS03", "10")
        .with_workstation("WS04", "10")
        .with_workstation("WS05", "15")
        .with_workstation("PP01", "PP")
        .with_workstation("PP02", "PP")
        .with_workstation("SH01", "SH")
        .with_workstation("TT01", "TT")
        .with_cavity("F20_20_H", 2)
        .with_cavity("F20_20_V", 2)
        .with_cavity("S40_40_H", 2)
        .with_cavity("S40_40_V", 2)
        .with_cavity("M20_H", 2)
        .with_cavity("M20_V", 1)
        .with_cavity("M30_H", 2)
        .with_cavity("M30_V", 1)
        .with_cavity("R20_H", 1)
        .with_cavity("R20_V", 1)
}

pub fn minimal_arena() -> ArenaDescription {
    ArenaDescription::new()
        .with_workstation("WS01", "10")
        .with_workstation("WS02", "05")
}

/// Fluent builder over [`TaskDefinition`].
#[derive(Clone, Debug, Default)]
pub struct TaskBuilder {
    def: TaskDefinition,
}

impl TaskBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn objects(mut self, count: i64) -> Self {
        self.def.set(keys::OBJECT_COUNT, count);
        self
    }

    pub fn waypoints(mut self, count: i64) -> Self {
        self.def.set(keys::WAYPOINT_COUNT, count);
        self
    }

    pub fn seed(mut self, seed: i64) -> Self {
        self.def.set(keys::SEED, seed);
        self
    }

    /// Set any quota or flag.
    pub fn option(mut self, key: &str, value: i64) -> Self {
        self.def.set(key, value);
        self
    }

    pub fn flag(self, key: &str) -> Self {
        self.option(key, 1)
    }

    /// Allow `count` instances of the object type `code`.
    pub fn allow(mut self, code: &str, count: i64) -> Self {
        self.def.set(code, count);
        self
    }

    /// Allow every type of [`standard_objects`].
    pub fn standard_objects(self) -> Self {
        standard_objects()
            .into_iter()
            .fold(self, |b, (code, count)| b.allow(code, count))
    }

    pub fn build(self) -> TaskDefinition {
        self.def
    }
}

/// Plain transportation: `object_count` free transports.
pub fn transport_task(objects: i64, seed: i64) -> TaskDefinition {
    TaskBuilder::new()
        .objects(objects)
        .seed(seed)
        .standard_objects()
        .build()
}

/// Precision placement plus container placement on the standard arena.
pub fn precision_task(seed: i64) -> TaskDefinition {
    TaskBuilder::new()
        .objects(8)
        .seed(seed)
        .option(keys::PP, 3)
        .option(keys::CONTAINER_PLACING, 2)
        .allow("CONTAINER_RED", 1)
        .allow("CONTAINER_BLUE", 1)
        .standard_objects()
        .build()
}

/// Navigation only.
pub fn navigation_task(waypoints: i64, seed: i64) -> TaskDefinition {
    TaskBuilder::new().waypoints(waypoints).seed(seed).build()
}

/// `BTT1` (transport), `PPT` (precision) and `BNT` (navigation).
pub fn standard_tasks() -> TaskDefinitions {
    let mut tasks = TaskDefinitions::new();
    tasks.insert("BTT1".to_string(), transport_task(5, 1));
    tasks.insert("PPT".to_string(), precision_task(2));
    tasks.insert("BNT".to_string(), navigation_task(4, 3));
    tasks
}
