//! Seeded generation engine.
//!
//! [`GenerationEngine`] owns the pseudo-random source; everything else a
//! call touches lives in a per-call [`Run`]. Stages execute in a fixed
//! order and consume quota and inventory as they go:
//!
//! 1. cavities on precision-placement tables
//! 2. precision-placement goals into those cavities (`pp`)
//! 3. containers on container tables
//! 4. placements into containers (`container_placing`)
//! 5. placements onto shelves (`shelf_grasping`)
//! 6. picks from shelves (`shelf_picking`)
//! 7. picks from rotating tables (`rt_grasping + rt_picking`)
//! 8. free transports until `object_count` objects are moved
//! 9. waypoints (`waypoint_count`)
//!
//! The task-level feasibility check runs before the RNG is touched, so
//! an infeasible task leaves the random stream untouched.
//!
//! # Ownership model
//!
//! The engine is [`Send`] but mutated by every call; concurrent use of
//! one engine needs external synchronization. Independent engines share
//! nothing.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use refgen_arena::TableRegistry;
use refgen_core::{total_count, Category, Classification, ObjectId, ObjectTypeQuota, TableId};
use tracing::{debug, info, warn};

use crate::config::{keys, GeneratorConfig, TaskDefinition};
use crate::error::GenerateError;
use crate::feasibility::check_task;
use crate::placement::Target;
use crate::task::{GeneratedTask, ObjectInstance};

pub(crate) const LOG_TARGET: &str = "refgen::generator";

// ── GenerationEngine ───────────────────────────────────────────────

/// Stateful orchestrator producing one [`GeneratedTask`] per call.
#[derive(Debug)]
pub struct GenerationEngine {
    rng: ChaCha8Rng,
    config: GeneratorConfig,
}

/// Read-only inputs of one generation call.
#[derive(Clone, Copy, Debug)]
pub struct TaskInputs<'a> {
    /// Task name.
    pub name: &'a str,
    /// Task options.
    pub def: &'a TaskDefinition,
    /// Arena tables.
    pub registry: &'a TableRegistry,
    /// Cavity inventory template.
    pub cavities: &'a [ObjectTypeQuota],
    /// Object inventory template of this task.
    pub objects: &'a [ObjectTypeQuota],
}

impl GenerationEngine {
    /// Create an engine seeded with `config.seed`.
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
        }
    }

    /// The engine's configuration.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate one task.
    ///
    /// Re-seeds the RNG when the task defines `seed`; otherwise the
    /// stream continues from the previous call.
    ///
    /// # Errors
    ///
    /// [`GenerateError::Infeasible`] before any randomness is used, or a
    /// stage error when a quota cannot be met from the inventory.
    pub fn generate(&mut self, inputs: TaskInputs<'_>) -> Result<GeneratedTask, GenerateError> {
        debug!(target: LOG_TARGET, "tables:\n{}", inputs.registry);
        debug!(target: LOG_TARGET, cavities = ?inputs.cavities, "cavity inventory");
        debug!(target: LOG_TARGET, objects = ?inputs.objects, "object types");

        check_task(
            inputs.name,
            inputs.def,
            inputs.registry,
            inputs.objects,
            &self.config,
        )?;

        let seed = inputs.def.value(keys::SEED).map(|s| s as u64);
        if let Some(seed) = seed {
            self.rng = ChaCha8Rng::seed_from_u64(seed);
        }
        info!(target: LOG_TARGET, task = inputs.name, ?seed, "generating task");

        let mut run = Run::new(inputs, &self.config, &mut self.rng);

        let cavities = run.generate_cavities(inputs.cavities.to_vec());
        run.fill_precision_placement(&cavities)?;
        let containers = run.generate_containers()?;
        run.fill_containers(&containers)?;
        run.place_on_shelves()?;
        run.pick_from_shelves()?;
        run.pick_from_rotating_tables()?;
        run.fill_remaining()?;
        let waypoints = run.draw_waypoints();

        let task = GeneratedTask {
            name: inputs.name.to_string(),
            seed,
            objects: run.objects,
            waypoints,
        };
        info!(
            target: LOG_TARGET,
            task = inputs.name,
            objects = task.len(),
            cavities = task.cavities().count(),
            containers = task.containers().count(),
            waypoints = task.waypoints.len(),
            "task generated"
        );
        debug!(target: LOG_TARGET, "objects:\n{task}");
        Ok(task)
    }
}

// ── Run ────────────────────────────────────────────────────────────

/// State of one generation call.
pub(crate) struct Run<'a> {
    pub(crate) def: &'a TaskDefinition,
    pub(crate) registry: &'a TableRegistry,
    pub(crate) config: &'a GeneratorConfig,
    pub(crate) rng: &'a mut ChaCha8Rng,
    /// Owns every instance; ids are positions.
    pub(crate) objects: Vec<ObjectInstance>,
    /// Object inventory, consumed by placements.
    pub(crate) available: Vec<ObjectTypeQuota>,
    /// Tables objects are picked up from or delivered to by default.
    pub(crate) pickup_tables: Vec<TableId>,
    /// Objects moved so far by placements and picks.
    pub(crate) transports: u32,
}

impl<'a> Run<'a> {
    pub(crate) fn new(
        inputs: TaskInputs<'a>,
        config: &'a GeneratorConfig,
        rng: &'a mut ChaCha8Rng,
    ) -> Self {
        let flagged: Vec<&str> = keys::HEIGHT_FLAGS
            .iter()
            .filter(|(flag, _)| inputs.def.flag(flag))
            .map(|(_, table_type)| *table_type)
            .collect();
        let pickup_tables = if flagged.is_empty() {
            inputs.registry.ids_of_types(&config.container_table_types)
        } else {
            inputs.registry.ids_of_types(&flagged)
        };
        Self {
            def: inputs.def,
            registry: inputs.registry,
            config,
            rng,
            objects: Vec::new(),
            available: inputs.objects.to_vec(),
            pickup_tables,
            transports: 0,
        }
    }

    /// Append an instance, assigning the next id.
    pub(crate) fn push(&mut self, classification: Classification) -> ObjectId {
        let id = ObjectId(self.objects.len() as u32);
        self.objects.push(ObjectInstance::new(id, classification));
        id
    }

    pub(crate) fn instance_mut(&mut self, id: ObjectId) -> &mut ObjectInstance {
        &mut self.objects[id.index()]
    }

    /// Uniform choice from a non-empty slice of table ids.
    pub(crate) fn choose_table(
        &mut self,
        tables: &[TableId],
        purpose: &'static str,
    ) -> Result<TableId, GenerateError> {
        if tables.is_empty() {
            return Err(GenerateError::NoEligibleTable { purpose });
        }
        Ok(tables[self.rng.random_range(0..tables.len())])
    }

    fn tables_of(&self, table_type: &str) -> Vec<TableId> {
        self.registry.ids_of_types(&[table_type])
    }

    /// Stage: cavities on precision-placement tables.
    ///
    /// Only cavity types whose form matches a transportable object type
    /// with stock are drawn. Demand is `cavities_per_pp_table` per PP
    /// table, capped by supply (a shortfall is only warned about). The
    /// filtered type list is shuffled and
    /// walked from the front; once the walk passes the end it wraps
    /// around, skipping exhausted types. Every cavity then lands on a
    /// uniformly chosen PP table.
    fn generate_cavities(&mut self, mut pool: Vec<ObjectTypeQuota>) -> Vec<ObjectId> {
        let pp_tables = self.tables_of(&self.config.precision_table_type);
        pool.retain(|cavity| {
            self.available.iter().any(|q| {
                !q.is_exhausted()
                    && q.classification.is_transportable()
                    && q.classification.form == cavity.classification.form
            })
        });
        let wanted = pp_tables.len() as u64 * u64::from(self.config.cavities_per_pp_table);
        let supply = total_count(&pool);
        if wanted > supply {
            warn!(
                target: LOG_TARGET,
                pp_tables = pp_tables.len(),
                available = supply,
                needed = wanted,
                "not enough cavities available for precision-placement tables"
            );
        }
        let to_generate = wanted.min(supply) as usize;

        pool.shuffle(&mut *self.rng);
        let mut cavities = Vec::with_capacity(to_generate);
        let mut cursor = 0;
        while cavities.len() < to_generate {
            let slot = cursor % pool.len();
            let quota = &mut pool[slot];
            if quota.take() {
                let classification = quota.classification.clone();
                cavities.push(self.push(classification));
            }
            cursor += 1;
        }

        for &cavity in &cavities {
            let table = pp_tables[self.rng.random_range(0..pp_tables.len())];
            let instance = self.instance_mut(cavity);
            instance.source = Some(table);
            instance.destination = Some(table);
        }
        debug!(target: LOG_TARGET, generated = cavities.len(), "cavities generated");
        cavities
    }

    /// Stage: `pp` placements into distinct, uniformly drawn cavities
    /// (partial Fisher–Yates over the generated cavities).
    fn fill_precision_placement(&mut self, cavities: &[ObjectId]) -> Result<(), GenerateError> {
        let requested = self.def.count(keys::PP);
        if cavities.len() < requested as usize {
            return Err(GenerateError::InsufficientCavities {
                requested,
                generated: cavities.len(),
            });
        }
        let mut live = cavities.to_vec();
        let mut remaining = live.len();
        for _ in 0..requested {
            let selected = self.rng.random_range(0..remaining);
            self.place(Target::Object(live[selected]))?;
            live.swap(selected, remaining - 1);
            remaining -= 1;
        }
        Ok(())
    }

    /// Stage: one container per requested container unit, each on a
    /// uniformly chosen container table (shelves included when
    /// `container_in_shelf` is set).
    fn generate_containers(&mut self) -> Result<Vec<ObjectId>, GenerateError> {
        let table_types = self.config.container_tables_for(self.def);
        let tables = self.registry.ids_of_types(&table_types);

        let mut kinds = Vec::new();
        for quota in &mut self.available {
            if quota.classification.category == Category::Container && !quota.is_exhausted() {
                kinds.push((quota.classification.clone(), quota.count));
                quota.count = 0;
            }
        }

        let mut containers = Vec::new();
        for (classification, count) in kinds {
            for _ in 0..count {
                let table = self.choose_table(&tables, "container")?;
                let id = self.push(classification.clone());
                let instance = self.instance_mut(id);
                instance.source = Some(table);
                instance.destination = Some(table);
                containers.push(id);
            }
        }

        let requested = self.def.count(keys::CONTAINER_PLACING);
        if requested > 0 && containers.is_empty() {
            return Err(GenerateError::InsufficientContainers {
                requested,
                generated: containers.len(),
            });
        }
        debug!(target: LOG_TARGET, generated = containers.len(), "containers generated");
        Ok(containers)
    }

    /// Stage: `container_placing` placements, each into a uniformly
    /// chosen container (with replacement).
    fn fill_containers(&mut self, containers: &[ObjectId]) -> Result<(), GenerateError> {
        for _ in 0..self.def.count(keys::CONTAINER_PLACING) {
            let container = containers[self.rng.random_range(0..containers.len())];
            self.place(Target::Object(container))?;
        }
        Ok(())
    }

    /// Stage: `shelf_grasping` objects delivered onto random shelves.
    fn place_on_shelves(&mut self) -> Result<(), GenerateError> {
        let shelves = self.tables_of(&self.config.shelf_table_type);
        for _ in 0..self.def.count(keys::SHELF_GRASPING) {
            let shelf = self.choose_table(&shelves, "shelf placement")?;
            self.place(Target::Table(shelf))?;
        }
        Ok(())
    }

    /// Stage: `shelf_picking` objects picked from random shelves.
    fn pick_from_shelves(&mut self) -> Result<(), GenerateError> {
        let shelves = self.tables_of(&self.config.shelf_table_type);
        for _ in 0..self.def.count(keys::SHELF_PICKING) {
            let shelf = self.choose_table(&shelves, "shelf pick")?;
            self.pick(shelf)?;
        }
        Ok(())
    }

    /// Stage: `rt_grasping + rt_picking` objects picked from random
    /// rotating tables.
    fn pick_from_rotating_tables(&mut self) -> Result<(), GenerateError> {
        let rotating = self.tables_of(&self.config.rotating_table_type);
        let picks = self
            .def
            .count(keys::RT_GRASPING)
            .saturating_add(self.def.count(keys::RT_PICKING));
        for _ in 0..picks {
            let table = self.choose_table(&rotating, "rotating table pick")?;
            self.pick(table)?;
        }
        Ok(())
    }

    /// Stage: free transports until `object_count` objects are moved.
    fn fill_remaining(&mut self) -> Result<(), GenerateError> {
        let object_count = self.def.count(keys::OBJECT_COUNT);
        if self.transports > object_count && self.def.is_defined(keys::OBJECT_COUNT) {
            warn!(
                target: LOG_TARGET,
                object_count,
                sub_tasks = self.transports,
                "sub-task quotas exceed object_count"
            );
        }
        let pickup = self.pickup_tables.clone();
        for _ in self.transports..object_count {
            let source = self.choose_table(&pickup, "pickup")?;
            self.pick(source)?;
        }
        Ok(())
    }

    /// Stage: `waypoint_count` distinct tables in visiting order.
    fn draw_waypoints(&mut self) -> Vec<TableId> {
        let wanted = self.def.count(keys::WAYPOINT_COUNT) as usize;
        if wanted == 0 {
            return Vec::new();
        }
        let mut ids = self.registry.ids();
        ids.shuffle(&mut *self.rng);
        ids.truncate(wanted);
        ids
    }
}
