//! The task generator facade.
//!
//! [`TaskGenerator`] binds one arena to a set of named task definitions
//! and exposes [`generate()`](TaskGenerator::generate). Construction
//! runs the arena-level feasibility check and decodes every type code
//! once; an invalid pairing never yields a generator.

use indexmap::IndexMap;
use refgen_arena::{ArenaDescription, TableRegistry};
use refgen_core::ObjectTypeQuota;
use tracing::debug;

use crate::config::{ConfigError, GeneratorConfig, TaskDefinitions};
use crate::engine::{GenerationEngine, TaskInputs, LOG_TARGET};
use crate::error::GenerateError;
use crate::feasibility::check_arena;
use crate::inventory::{cavity_template, object_template};
use crate::task::GeneratedTask;

// Compile-time assertion: TaskGenerator is Send.
// Calls take `&mut self`, so sharing one instance needs a lock.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<TaskGenerator>();
    }
};

/// Generates concrete tasks for one arena.
///
/// # Example
///
/// ```
/// use refgen_arena::ArenaDescription;
/// use refgen_engine::{keys, TaskDefinition, TaskDefinitions, TaskGenerator};
///
/// let arena = ArenaDescription::new()
///     .with_workstation("WS01", "10")
///     .with_workstation("WS02", "05");
/// let mut tasks = TaskDefinitions::new();
/// tasks.insert(
///     "BTT1".to_string(),
///     TaskDefinition::new()
///         .with(keys::OBJECT_COUNT, 2)
///         .with("M20", 3),
/// );
///
/// let mut generator = TaskGenerator::new(arena, tasks)?;
/// let task = generator.generate("BTT1")?;
/// for object in task.placements() {
///     println!("{object}");
/// }
/// assert_eq!(task.placements().count(), 2);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct TaskGenerator {
    registry: TableRegistry,
    tasks: TaskDefinitions,
    cavities: Vec<ObjectTypeQuota>,
    objects: IndexMap<String, Vec<ObjectTypeQuota>>,
    engine: GenerationEngine,
}

impl TaskGenerator {
    /// Build a generator with the default [`GeneratorConfig`].
    pub fn new(arena: ArenaDescription, tasks: TaskDefinitions) -> Result<Self, ConfigError> {
        Self::with_config(arena, tasks, GeneratorConfig::default())
    }

    /// Build a generator with explicit engine tunables.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidGeneratorConfig`] for bad tunables,
    /// [`ConfigError::Infeasible`] when the arena has fewer than two
    /// tables, no task is configured, or a task is empty, and
    /// [`ConfigError::InvalidTypeCode`] for undecodable type codes.
    pub fn with_config(
        arena: ArenaDescription,
        tasks: TaskDefinitions,
        config: GeneratorConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let registry = TableRegistry::build(&arena);
        check_arena(&registry, &tasks)?;

        let cavities = cavity_template(&arena)?;
        let objects = tasks
            .iter()
            .map(|(name, def)| Ok((name.clone(), object_template(name, def)?)))
            .collect::<Result<IndexMap<_, _>, ConfigError>>()?;

        debug!(
            target: LOG_TARGET,
            tables = registry.len(),
            cavity_types = cavities.len(),
            tasks = tasks.len(),
            "task generator ready"
        );
        Ok(Self {
            registry,
            tasks,
            cavities,
            objects,
            engine: GenerationEngine::new(config),
        })
    }

    /// Generate the task called `name`.
    ///
    /// # Errors
    ///
    /// [`GenerateError::UnknownTask`] listing the valid names if `name`
    /// is not configured; otherwise any error of
    /// [`GenerationEngine::generate`].
    pub fn generate(&mut self, name: &str) -> Result<GeneratedTask, GenerateError> {
        let Some((name, def)) = self.tasks.get_key_value(name) else {
            return Err(GenerateError::UnknownTask {
                name: name.to_string(),
                valid: self.tasks.keys().cloned().collect(),
            });
        };
        let objects = self.objects.get(name).map_or(&[][..], Vec::as_slice);
        self.engine.generate(TaskInputs {
            name,
            def,
            registry: &self.registry,
            cavities: &self.cavities,
            objects,
        })
    }

    /// Configured task names, in configuration order.
    pub fn task_names(&self) -> impl Iterator<Item = &str> {
        self.tasks.keys().map(String::as_str)
    }

    /// The arena's tables, for resolving [`TableId`](refgen_core::TableId)s.
    pub fn registry(&self) -> &TableRegistry {
        &self.registry
    }

    /// Engine tunables.
    pub fn config(&self) -> &GeneratorConfig {
        self.engine.config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{keys, TaskDefinition};
    use crate::feasibility::Infeasibility;

    fn arena() -> ArenaDescription {
        ArenaDescription::new()
            .with_workstation("WS01", "10")
            .with_workstation("WS02", "05")
            .with_cavity("M20_H", 3)
    }

    fn tasks() -> TaskDefinitions {
        let mut tasks = TaskDefinitions::new();
        tasks.insert(
            "BTT1".to_string(),
            TaskDefinition::new().with(keys::OBJECT_COUNT, 2).with("M20", 3),
        );
        tasks
    }

    #[test]
    fn unknown_task_lists_configured_names() {
        let mut generator = TaskGenerator::new(arena(), tasks()).unwrap();
        match generator.generate("NOPE") {
            Err(GenerateError::UnknownTask { name, valid }) => {
                assert_eq!(name, "NOPE");
                assert_eq!(valid, vec!["BTT1".to_string()]);
            }
            other => panic!("expected UnknownTask, got {other:?}"),
        }
    }

    #[test]
    fn one_table_arena_rejected() {
        let arena = ArenaDescription::new().with_workstation("WS01", "10");
        match TaskGenerator::new(arena, tasks()) {
            Err(ConfigError::Infeasible(Infeasibility::TooFewTables { available: 1 })) => {}
            other => panic!("expected TooFewTables, got {other:?}"),
        }
    }

    #[test]
    fn invalid_cavity_code_rejected() {
        let arena = arena().with_cavity("H", 1);
        match TaskGenerator::new(arena, tasks()) {
            Err(ConfigError::InvalidTypeCode { task: None, .. }) => {}
            other => panic!("expected InvalidTypeCode, got {other:?}"),
        }
    }

    #[test]
    fn invalid_generator_config_rejected() {
        let config = GeneratorConfig {
            cavities_per_pp_table: 0,
            ..GeneratorConfig::default()
        };
        assert!(matches!(
            TaskGenerator::with_config(arena(), tasks(), config),
            Err(ConfigError::InvalidGeneratorConfig { .. })
        ));
    }

    #[test]
    fn generates_requested_objects() {
        let mut generator = TaskGenerator::new(arena(), tasks()).unwrap();
        let task = generator.generate("BTT1").unwrap();
        assert_eq!(task.name, "BTT1");
        assert_eq!(task.placements().count(), 2);
        // No PP table, so no cavities.
        assert_eq!(task.cavities().count(), 0);
        for object in task.placements() {
            assert_ne!(object.source, object.destination);
        }
        assert_eq!(generator.task_names().collect::<Vec<_>>(), vec!["BTT1"]);
        assert_eq!(generator.registry().len(), 2);
    }
}
