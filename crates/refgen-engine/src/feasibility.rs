//! Feasibility checks run before any randomness is spent.
//!
//! [`check_arena`] runs once when a generator is built; [`check_task`]
//! runs at the start of every generation call. Both fail fast with an
//! [`Infeasibility`] naming the task and the missing capability.

use std::error::Error;
use std::fmt;

use refgen_arena::TableRegistry;
use refgen_core::{Category, ObjectTypeQuota};

use crate::config::{keys, GeneratorConfig, TaskDefinition, TaskDefinitions};

/// Arena capability a task may depend on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Capability {
    /// A shelf (`shelf_grasping` / `shelf_picking`).
    Shelf,
    /// A rotating table (`rt_grasping` / `rt_picking`).
    RotatingTable,
    /// A precision-placement table (`pp`).
    PrecisionPlacement,
    /// A table of the given height class in cm (`table_height_*`).
    TableHeight(u8),
    /// A table containers can stand on (any container unit allowed).
    ContainerTable,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shelf => write!(f, "shelf"),
            Self::RotatingTable => write!(f, "rotating table"),
            Self::PrecisionPlacement => write!(f, "precision placement"),
            Self::TableHeight(0) => write!(f, "zero height table"),
            Self::TableHeight(cm) => write!(f, "{cm}cm table"),
            Self::ContainerTable => write!(f, "containers"),
        }
    }
}

/// A failed feasibility check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Infeasibility {
    /// Fewer than two tables exist in the arena.
    TooFewTables {
        /// Number of registered tables.
        available: usize,
    },
    /// The task set is empty.
    NoTasks,
    /// A task requests neither objects nor waypoints.
    EmptyTask {
        /// Offending task.
        task: String,
    },
    /// A transportation task lists no object types to draw from.
    NoAllowedObjects {
        /// Offending task.
        task: String,
    },
    /// A navigation task asks for more waypoints than there are tables.
    TooFewWaypointTables {
        /// Offending task.
        task: String,
        /// Requested waypoint count.
        requested: u32,
        /// Registered tables.
        available: usize,
    },
    /// A task needs a table type the arena lacks.
    MissingTableType {
        /// Offending task.
        task: String,
        /// What the task wants to exercise.
        capability: Capability,
        /// Table-type code that would provide it.
        table_type: String,
    },
}

impl fmt::Display for Infeasibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewTables { available } => write!(
                f,
                "at least two tables need to exist in the arena, found {available}"
            ),
            Self::NoTasks => write!(f, "no tasks configured"),
            Self::EmptyTask { task } => {
                write!(f, "{task}: empty task defined (no objects and no waypoints)")
            }
            Self::NoAllowedObjects { task } => {
                write!(f, "{task}: transportation task without allowed objects defined")
            }
            Self::TooFewWaypointTables {
                task,
                requested,
                available,
            } => write!(
                f,
                "{task}: navigation task needs {requested} workstations, arena has {available}"
            ),
            Self::MissingTableType {
                task,
                capability,
                table_type,
            } => write!(
                f,
                "{task}: transportation task involving {capability} requested in an arena \
                 without it (no table of type {table_type})"
            ),
        }
    }
}

impl Error for Infeasibility {}

/// Global sanity of an arena/task-set pairing.
///
/// Checks, in order: at least two tables, at least one task, no task
/// with both `object_count` and `waypoint_count` zero. Absent keys count
/// as zero; negative values do not.
pub fn check_arena(registry: &TableRegistry, tasks: &TaskDefinitions) -> Result<(), Infeasibility> {
    if registry.len() < 2 {
        return Err(Infeasibility::TooFewTables {
            available: registry.len(),
        });
    }
    if tasks.is_empty() {
        return Err(Infeasibility::NoTasks);
    }
    for (name, def) in tasks {
        let zero = |key: &str| def.value(key).unwrap_or(0) == 0;
        if zero(keys::OBJECT_COUNT) && zero(keys::WAYPOINT_COUNT) {
            return Err(Infeasibility::EmptyTask { task: name.clone() });
        }
    }
    Ok(())
}

/// Whether `task` can be generated in the arena at all.
///
/// `available_objects` is the task's derived object inventory.
pub fn check_task(
    task: &str,
    def: &TaskDefinition,
    registry: &TableRegistry,
    available_objects: &[ObjectTypeQuota],
    config: &GeneratorConfig,
) -> Result<(), Infeasibility> {
    if def.is_defined(keys::OBJECT_COUNT) && available_objects.is_empty() {
        return Err(Infeasibility::NoAllowedObjects {
            task: task.to_string(),
        });
    }
    if def.is_defined(keys::WAYPOINT_COUNT) {
        let requested = def.count(keys::WAYPOINT_COUNT);
        if registry.len() < requested as usize {
            return Err(Infeasibility::TooFewWaypointTables {
                task: task.to_string(),
                requested,
                available: registry.len(),
            });
        }
    }

    let missing = |capability: Capability, table_type: &str| -> Result<(), Infeasibility> {
        if registry.contains_type(table_type) {
            Ok(())
        } else {
            Err(Infeasibility::MissingTableType {
                task: task.to_string(),
                capability,
                table_type: table_type.to_string(),
            })
        }
    };

    if def.flag(keys::SHELF_GRASPING) || def.flag(keys::SHELF_PICKING) {
        missing(Capability::Shelf, &config.shelf_table_type)?;
    }
    if def.flag(keys::RT_GRASPING) || def.flag(keys::RT_PICKING) {
        missing(Capability::RotatingTable, &config.rotating_table_type)?;
    }
    if def.flag(keys::PP) {
        missing(Capability::PrecisionPlacement, &config.precision_table_type)?;
    }
    for (&(flag, table_type), cm) in keys::HEIGHT_FLAGS.iter().zip([0u8, 5, 10, 15]) {
        if def.flag(flag) {
            missing(Capability::TableHeight(cm), table_type)?;
        }
    }

    let has_containers = available_objects
        .iter()
        .any(|q| q.classification.category == Category::Container && !q.is_exhausted());
    if has_containers {
        let table_types = config.container_tables_for(def);
        if !table_types.iter().any(|t| registry.contains_type(t)) {
            return Err(Infeasibility::MissingTableType {
                task: task.to_string(),
                capability: Capability::ContainerTable,
                table_type: table_types.join("/"),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use refgen_arena::ArenaDescription;

    fn registry(tables: &[(&str, &str)]) -> TableRegistry {
        let mut arena = ArenaDescription::new();
        for (name, t) in tables {
            arena = arena.with_workstation(*name, *t);
        }
        TableRegistry::build(&arena)
    }

    fn objects() -> Vec<ObjectTypeQuota> {
        vec![ObjectTypeQuota::from_code("M20", 2).unwrap()]
    }

    fn tasks(defs: Vec<(&str, TaskDefinition)>) -> TaskDefinitions {
        defs.into_iter().map(|(n, d)| (n.to_string(), d)).collect()
    }

    #[test]
    fn arena_with_one_table_rejected() {
        let reg = registry(&[("WS01", "10")]);
        let t = tasks(vec![("BTT1", TaskDefinition::new().with(keys::OBJECT_COUNT, 1))]);
        match check_arena(&reg, &t) {
            Err(Infeasibility::TooFewTables { available: 1 }) => {}
            other => panic!("expected TooFewTables, got {other:?}"),
        }
    }

    #[test]
    fn arena_without_tasks_rejected() {
        let reg = registry(&[("WS01", "10"), ("WS02", "05")]);
        assert_eq!(check_arena(&reg, &TaskDefinitions::new()), Err(Infeasibility::NoTasks));
    }

    #[test]
    fn empty_task_rejected_by_name() {
        let reg = registry(&[("WS01", "10"), ("WS02", "05")]);
        let t = tasks(vec![
            ("BNT", TaskDefinition::new().with(keys::WAYPOINT_COUNT, 2)),
            ("EMPTY", TaskDefinition::new().with(keys::OBJECT_COUNT, 0)),
        ]);
        match check_arena(&reg, &t) {
            Err(e @ Infeasibility::EmptyTask { .. }) => {
                assert!(e.to_string().starts_with("EMPTY:"));
            }
            other => panic!("expected EmptyTask, got {other:?}"),
        }
    }

    #[test]
    fn negative_counts_are_not_empty() {
        let reg = registry(&[("WS01", "10"), ("WS02", "05")]);
        let t = tasks(vec![(
            "T",
            TaskDefinition::new()
                .with(keys::OBJECT_COUNT, -1)
                .with(keys::WAYPOINT_COUNT, -1),
        )]);
        assert!(check_arena(&reg, &t).is_ok());
        // Absent keys still count as zero.
        let t = tasks(vec![("T", TaskDefinition::new().with(keys::SEED, 4))]);
        assert!(matches!(
            check_arena(&reg, &t),
            Err(Infeasibility::EmptyTask { .. })
        ));
    }

    #[test]
    fn containers_need_a_container_table() {
        let reg = registry(&[("PP01", "PP"), ("SH01", "SH")]);
        let objects = vec![ObjectTypeQuota::from_code("CONTAINER_RED", 1).unwrap()];
        let def = TaskDefinition::new().with(keys::OBJECT_COUNT, 0);
        match check_task("T", &def, &reg, &objects, &GeneratorConfig::default()) {
            Err(
                e @ Infeasibility::MissingTableType {
                    capability: Capability::ContainerTable,
                    ..
                },
            ) => {
                assert!(e.to_string().contains("containers"));
                assert!(e.to_string().contains("00/05/10/15"));
            }
            other => panic!("expected MissingTableType(ContainerTable), got {other:?}"),
        }
        let in_shelf = def.with_flag(keys::CONTAINER_IN_SHELF, true);
        assert!(check_task("T", &in_shelf, &reg, &objects, &GeneratorConfig::default()).is_ok());
    }

    #[test]
    fn valid_arena_accepted() {
        let reg = registry(&[("WS01", "10"), ("WS02", "05")]);
        let t = tasks(vec![("BTT1", TaskDefinition::new().with(keys::OBJECT_COUNT, 3))]);
        assert!(check_arena(&reg, &t).is_ok());
    }

    #[test]
    fn defined_object_count_needs_objects() {
        let reg = registry(&[("WS01", "10"), ("WS02", "05")]);
        let def = TaskDefinition::new().with(keys::OBJECT_COUNT, 0);
        match check_task("BTT1", &def, &reg, &[], &GeneratorConfig::default()) {
            Err(Infeasibility::NoAllowedObjects { task }) => assert_eq!(task, "BTT1"),
            other => panic!("expected NoAllowedObjects, got {other:?}"),
        }
        // Negative means "not requested".
        let def = TaskDefinition::new().with(keys::OBJECT_COUNT, -1);
        assert!(check_task("BTT1", &def, &reg, &[], &GeneratorConfig::default()).is_ok());
    }

    #[test]
    fn waypoints_bounded_by_table_count() {
        let reg = registry(&[("WS01", "10"), ("WS02", "05")]);
        let def = TaskDefinition::new().with(keys::WAYPOINT_COUNT, 3);
        match check_task("BNT", &def, &reg, &objects(), &GeneratorConfig::default()) {
            Err(Infeasibility::TooFewWaypointTables {
                requested: 3,
                available: 2,
                ..
            }) => {}
            other => panic!("expected TooFewWaypointTables, got {other:?}"),
        }
        let def = TaskDefinition::new().with(keys::WAYPOINT_COUNT, 2);
        assert!(check_task("BNT", &def, &reg, &objects(), &GeneratorConfig::default()).is_ok());
    }

    #[test]
    fn shelf_task_without_shelf_names_shelf() {
        let reg = registry(&[("WS01", "10"), ("WS02", "05")]);
        let def = TaskDefinition::new()
            .with(keys::OBJECT_COUNT, 2)
            .with_flag(keys::SHELF_GRASPING, true);
        let err = check_task("BTT2", &def, &reg, &objects(), &GeneratorConfig::default())
            .unwrap_err();
        assert_eq!(
            err,
            Infeasibility::MissingTableType {
                task: "BTT2".to_string(),
                capability: Capability::Shelf,
                table_type: "SH".to_string(),
            }
        );
        let msg = err.to_string();
        assert!(msg.contains("BTT2"));
        assert!(msg.contains("shelf"));
    }

    #[test]
    fn each_flag_maps_to_its_table_type() {
        let reg = registry(&[("WS01", "10"), ("WS02", "05")]);
        let cases = [
            (keys::SHELF_PICKING, "SH"),
            (keys::RT_GRASPING, "TT"),
            (keys::RT_PICKING, "TT"),
            (keys::PP, "PP"),
            (keys::TABLE_HEIGHT_0, "00"),
            (keys::TABLE_HEIGHT_15, "15"),
        ];
        for (flag, expected) in cases {
            let def = TaskDefinition::new().with(keys::OBJECT_COUNT, 1).with(flag, 1);
            match check_task("T", &def, &reg, &objects(), &GeneratorConfig::default()) {
                Err(Infeasibility::MissingTableType { table_type, .. }) => {
                    assert_eq!(table_type, expected, "flag {flag}");
                }
                other => panic!("flag {flag}: expected MissingTableType, got {other:?}"),
            }
        }
        for flag in [keys::TABLE_HEIGHT_5, keys::TABLE_HEIGHT_10] {
            let def = TaskDefinition::new().with(keys::OBJECT_COUNT, 1).with(flag, 1);
            assert!(check_task("T", &def, &reg, &objects(), &GeneratorConfig::default()).is_ok());
        }
    }

    #[test]
    fn height_capability_messages() {
        assert_eq!(Capability::TableHeight(0).to_string(), "zero height table");
        assert_eq!(Capability::TableHeight(10).to_string(), "10cm table");
        assert_eq!(Capability::RotatingTable.to_string(), "rotating table");
    }
}
