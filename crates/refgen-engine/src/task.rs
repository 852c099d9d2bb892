//! Generated task output.
//!
//! A [`GeneratedTask`] owns every [`ObjectInstance`] produced by one
//! generation call. Instances refer to tables by [`TableId`] (resolved
//! through the generator's [`TableRegistry`](refgen_arena::TableRegistry))
//! and to other instances by [`ObjectId`], which is also their position
//! in [`GeneratedTask::objects`].

use std::fmt;

use refgen_core::{Category, Classification, ObjectId, TableId};

// ── ObjectInstance ─────────────────────────────────────────────────

/// One concrete object, cavity or container of a generated task.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectInstance {
    /// Unique within the task; equals the position in the object list.
    pub id: ObjectId,
    /// Decoded type.
    pub classification: Classification,
    /// Where the object starts.
    pub source: Option<TableId>,
    /// Where the object must end up.
    pub destination: Option<TableId>,
    /// Container or cavity the object must be placed into.
    pub container: Option<ObjectId>,
}

impl ObjectInstance {
    /// An unplaced instance of `classification`.
    pub fn new(id: ObjectId, classification: Classification) -> Self {
        Self {
            id,
            classification,
            source: None,
            destination: None,
            container: None,
        }
    }

    /// Shorthand for `self.classification.category`.
    pub fn category(&self) -> Category {
        self.classification.category
    }
}

impl fmt::Display for ObjectInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Object {}({}):", self.classification, self.id)?;
        if let Some(src) = self.source {
            write!(f, " Src: {src}")?;
        }
        if let Some(dst) = self.destination {
            write!(f, " Dst: {dst}")?;
        }
        if let Some(cont) = self.container {
            write!(f, " Cont: {cont}")?;
        }
        Ok(())
    }
}

// ── GeneratedTask ──────────────────────────────────────────────────

/// The finished result of one generation call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedTask {
    /// Name of the task definition this was generated from.
    pub name: String,
    /// Seed applied for this call, if the task defined one.
    pub seed: Option<u64>,
    /// Every generated instance, in generation order.
    pub objects: Vec<ObjectInstance>,
    /// Tables to visit, in order, for navigation tasks.
    pub waypoints: Vec<TableId>,
}

impl GeneratedTask {
    /// Resolve an object id.
    pub fn object(&self, id: ObjectId) -> Option<&ObjectInstance> {
        self.objects.get(id.index())
    }

    /// Number of generated instances.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// `true` if nothing was generated.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Instances of one category, in generation order.
    pub fn objects_of(&self, category: Category) -> impl Iterator<Item = &ObjectInstance> {
        self.objects
            .iter()
            .filter(move |o| o.category() == category)
    }

    /// All containers.
    pub fn containers(&self) -> impl Iterator<Item = &ObjectInstance> {
        self.objects_of(Category::Container)
    }

    /// All cavities.
    pub fn cavities(&self) -> impl Iterator<Item = &ObjectInstance> {
        self.objects_of(Category::Cavity)
    }

    /// Transported objects: everything that is neither a container nor
    /// a cavity.
    pub fn placements(&self) -> impl Iterator<Item = &ObjectInstance> {
        self.objects
            .iter()
            .filter(|o| o.classification.is_transportable())
    }

    /// Objects placed into `target`.
    pub fn contents_of(&self, target: ObjectId) -> impl Iterator<Item = &ObjectInstance> {
        self.objects
            .iter()
            .filter(move |o| o.container == Some(target))
    }
}

impl fmt::Display for GeneratedTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Task {}:", self.name)?;
        for object in &self.objects {
            writeln!(f, "{object}")?;
        }
        if !self.waypoints.is_empty() {
            let route: Vec<_> = self.waypoints.iter().map(|t| t.to_string()).collect();
            writeln!(f, "Waypoints: {}", route.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use refgen_core::classify;

    fn instance(id: u32, code: &str) -> ObjectInstance {
        ObjectInstance::new(ObjectId(id), classify(code).unwrap())
    }

    fn sample() -> GeneratedTask {
        let cavity = ObjectInstance {
            source: Some(TableId(1)),
            destination: Some(TableId(1)),
            ..instance(0, "M20_H")
        };
        let container = ObjectInstance {
            source: Some(TableId(2)),
            destination: Some(TableId(2)),
            ..instance(1, "CONTAINER_RED")
        };
        let placed = ObjectInstance {
            source: Some(TableId(3)),
            destination: Some(TableId(1)),
            container: Some(ObjectId(0)),
            ..instance(2, "M20")
        };
        GeneratedTask {
            name: "BTT1".to_string(),
            seed: Some(4),
            objects: vec![cavity, container, placed],
            waypoints: vec![TableId(0), TableId(3)],
        }
    }

    #[test]
    fn category_queries() {
        let task = sample();
        assert_eq!(task.len(), 3);
        assert!(!task.is_empty());
        assert_eq!(task.cavities().count(), 1);
        assert_eq!(task.containers().count(), 1);
        assert_eq!(task.placements().count(), 1);
        assert_eq!(task.contents_of(ObjectId(0)).count(), 1);
        assert_eq!(task.contents_of(ObjectId(1)).count(), 0);
        assert_eq!(task.object(ObjectId(2)).unwrap().container, Some(ObjectId(0)));
        assert!(task.object(ObjectId(3)).is_none());
    }

    #[test]
    fn object_display_lists_links() {
        let task = sample();
        assert_eq!(
            task.objects[2].to_string(),
            "Object M20(2): Src: T3 Dst: T1 Cont: 0"
        );
        assert_eq!(instance(5, "F20_20_G").to_string(), "Object F20_20_G(5):");
    }

    #[test]
    fn task_display_includes_waypoints() {
        let text = sample().to_string();
        assert!(text.starts_with("Task BTT1:"));
        assert!(text.contains("Waypoints: T0 T3"));
    }
}
