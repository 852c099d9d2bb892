//! The placement step.
//!
//! Every transported object is produced here, either by
//! [`place`](Run::place) (deliver to a table, container or cavity) or by
//! [`pick`](Run::pick) (collect from a table and deliver to a pickup
//! table).
//!
//! Object types are drawn uniformly among the eligible types, not
//! weighted by remaining count. Eligible means a plain or colored
//! object with stock left; cavities additionally require a matching
//! form. The pickup side is a uniformly chosen pickup table.

use rand::Rng;
use refgen_core::{Category, ObjectId, Orientation, TableId};
use smallvec::SmallVec;
use tracing::debug;

use crate::config::keys;
use crate::engine::{Run, LOG_TARGET};
use crate::error::GenerateError;

/// Where a placed object must end up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Target {
    /// Onto a table.
    Table(TableId),
    /// Into a container or cavity instance.
    Object(ObjectId),
}

impl Run<'_> {
    /// Generate one object delivered to `target`.
    pub(crate) fn place(&mut self, target: Target) -> Result<ObjectId, GenerateError> {
        let (destination, container, form) = match target {
            Target::Table(table) => (Some(table), None, None),
            Target::Object(id) => {
                let relax = self.def.flag(keys::PP_TEAM_ORIENTATION);
                let instance = self.instance_mut(id);
                let is_cavity = instance.category() == Category::Cavity;
                if is_cavity && relax {
                    instance.classification.orientation = Orientation::Free;
                }
                let form = is_cavity.then(|| instance.classification.form.clone());
                (instance.destination, Some(id), form)
            }
        };
        debug!(target: LOG_TARGET, into = %self.describe(target), "placing object");

        let Some(kind) = self.choose_type(form.as_deref()) else {
            return Err(GenerateError::InventoryExhausted {
                target: self.describe(target),
            });
        };
        let source = self.random_pickup()?;
        Ok(self.spawn(kind, source, destination, container))
    }

    /// Generate one object collected from `source`.
    pub(crate) fn pick(&mut self, source: TableId) -> Result<ObjectId, GenerateError> {
        let Some(kind) = self.choose_type(None) else {
            return Err(GenerateError::InventoryExhausted {
                target: format!("pick from {}", self.describe(Target::Table(source))),
            });
        };
        let destination = self.delivery_table(source)?;
        Ok(self.spawn(kind, source, Some(destination), None))
    }

    /// Index of a uniformly chosen eligible object type.
    fn choose_type(&mut self, form: Option<&str>) -> Option<usize> {
        let eligible: SmallVec<[usize; 16]> = self
            .available
            .iter()
            .enumerate()
            .filter(|(_, q)| {
                !q.is_exhausted()
                    && q.classification.is_transportable()
                    && form.is_none_or(|f| q.classification.form == f)
            })
            .map(|(i, _)| i)
            .collect();
        if eligible.is_empty() {
            return None;
        }
        Some(eligible[self.rng.random_range(0..eligible.len())])
    }

    fn random_pickup(&mut self) -> Result<TableId, GenerateError> {
        if self.pickup_tables.is_empty() {
            return Err(GenerateError::NoEligibleTable { purpose: "pickup" });
        }
        let idx = self.rng.random_range(0..self.pickup_tables.len());
        Ok(self.pickup_tables[idx])
    }

    /// A pickup table other than `source`, falling back to any other
    /// table when the pickup pool has nothing else.
    fn delivery_table(&mut self, source: TableId) -> Result<TableId, GenerateError> {
        let mut candidates: Vec<TableId> = self
            .pickup_tables
            .iter()
            .copied()
            .filter(|t| *t != source)
            .collect();
        if candidates.is_empty() {
            candidates = self
                .registry
                .ids()
                .into_iter()
                .filter(|t| *t != source)
                .collect();
        }
        self.choose_table(&candidates, "delivery")
    }

    fn spawn(
        &mut self,
        kind: usize,
        source: TableId,
        destination: Option<TableId>,
        container: Option<ObjectId>,
    ) -> ObjectId {
        let quota = &mut self.available[kind];
        let taken = quota.take();
        debug_assert!(taken, "chose exhausted type {}", quota.classification);
        let classification = quota.classification.clone();
        let id = self.push(classification);
        let instance = self.instance_mut(id);
        instance.source = Some(source);
        instance.destination = destination;
        instance.container = container;
        debug!(target: LOG_TARGET, "generated {instance}");
        self.transports += 1;
        id
    }

    fn describe(&self, target: Target) -> String {
        match target {
            Target::Table(id) => self
                .registry
                .get(id)
                .map_or_else(|| format!("table {id}"), |t| t.to_string()),
            Target::Object(id) => {
                let instance = &self.objects[id.index()];
                format!("{} {}({})", instance.category(), instance.classification, id)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GeneratorConfig, TaskDefinition};
    use crate::engine::TaskInputs;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use refgen_arena::{ArenaDescription, TableRegistry};
    use refgen_core::ObjectTypeQuota;

    #[test]
    fn picks_consume_stock_exactly() {
        let registry = TableRegistry::build(
            &ArenaDescription::new()
                .with_workstation("WS01", "10")
                .with_workstation("WS02", "05"),
        );
        let def = TaskDefinition::new().with(keys::OBJECT_COUNT, 3);
        let objects = vec![
            ObjectTypeQuota::from_code("M20", 2).unwrap(),
            ObjectTypeQuota::from_code("CONTAINER_RED", 1).unwrap(),
            ObjectTypeQuota::from_code("R20_H", 4).unwrap(),
        ];
        let inputs = TaskInputs {
            name: "T",
            def: &def,
            registry: &registry,
            cavities: &[],
            objects: &objects,
        };
        let config = GeneratorConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut run = Run::new(inputs, &config, &mut rng);

        run.pick(TableId(0)).unwrap();
        run.pick(TableId(1)).unwrap();
        assert_eq!(run.available[0].count, 0);
        assert_eq!(run.transports, 2);
        match run.pick(TableId(0)) {
            Err(GenerateError::InventoryExhausted { target }) => {
                assert_eq!(target, "pick from Table WS01(10)");
            }
            other => panic!("expected InventoryExhausted, got {other:?}"),
        }
        // Containers and cavities are never transported.
        assert_eq!(run.available[1].count, 1);
        assert_eq!(run.available[2].count, 4);
        assert_eq!(run.objects.len(), 2);
    }

    #[test]
    fn cavity_target_requires_matching_form() {
        let registry = TableRegistry::build(
            &ArenaDescription::new()
                .with_workstation("WS01", "10")
                .with_workstation("PP01", "PP"),
        );
        let def = TaskDefinition::new().with(keys::PP_TEAM_ORIENTATION, 1);
        let objects = vec![
            ObjectTypeQuota::from_code("R20", 3).unwrap(),
            ObjectTypeQuota::from_code("M20", 1).unwrap(),
        ];
        let inputs = TaskInputs {
            name: "T",
            def: &def,
            registry: &registry,
            cavities: &[],
            objects: &objects,
        };
        let config = GeneratorConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut run = Run::new(inputs, &config, &mut rng);
        let cavity = run.push(refgen_core::classify("M20_V").unwrap());
        run.instance_mut(cavity).destination = Some(TableId(1));

        let placed = run.place(Target::Object(cavity)).unwrap();
        let object = &run.objects[placed.index()];
        assert_eq!(object.classification.form, "M20");
        assert_eq!(object.destination, Some(TableId(1)));
        assert_eq!(object.source, Some(TableId(0)));
        assert_eq!(object.container, Some(cavity));
        assert_eq!(
            run.objects[cavity.index()].classification.orientation,
            Orientation::Free
        );
        assert!(matches!(
            run.place(Target::Object(cavity)),
            Err(GenerateError::InventoryExhausted { .. })
        ));
    }
}
