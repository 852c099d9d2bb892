//! Benchmark profiles for the refgen task generator.
//!
//! - [`reference_profile`]: a competition-sized arena with one task per
//!   stage family
//! - [`stress_profile`]: a large arena where every stage runs at high
//!   quota
//!
//! Both profiles are deterministic: every task carries a seed.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use refgen_arena::ArenaDescription;
use refgen_engine::{keys, TaskDefinition, TaskDefinitions};

const HEIGHTS: [&str; 4] = ["00", "05", "10", "15"];
const FORMS: [&str; 6] = ["F20_20", "S40_40", "M20", "M30", "R20", "M20_100"];

/// Arena with `tables` workstations per height class, `pp_tables`
/// precision-placement tables, one shelf and one rotating table.
///
/// Every form gets `per_form` cavities in each orientation.
pub fn arena(tables: usize, pp_tables: usize, per_form: u32) -> ArenaDescription {
    let mut arena = ArenaDescription::new();
    let mut n = 0;
    for height in HEIGHTS {
        for _ in 0..tables {
            n += 1;
            arena = arena.with_workstation(format!("WS{n:02}"), height);
        }
    }
    for i in 1..=pp_tables {
        arena = arena.with_workstation(format!("PP{i:02}"), "PP");
    }
    arena = arena
        .with_workstation("SH01", "SH")
        .with_workstation("TT01", "TT");
    for form in FORMS {
        arena = arena
            .with_cavity(format!("{form}_H"), per_form)
            .with_cavity(format!("{form}_V"), per_form);
    }
    arena
}

/// Task exercising every stage with `scale` units of each quota.
pub fn mixed_task(scale: i64, seed: i64) -> TaskDefinition {
    let mut def = TaskDefinition::new()
        .with(keys::SEED, seed)
        .with(keys::OBJECT_COUNT, 6 * scale)
        .with(keys::WAYPOINT_COUNT, scale)
        .with(keys::PP, scale)
        .with(keys::CONTAINER_PLACING, scale)
        .with(keys::SHELF_GRASPING, scale)
        .with(keys::SHELF_PICKING, scale)
        .with(keys::RT_PICKING, scale)
        .with("CONTAINER_RED", scale)
        .with("CONTAINER_BLUE", scale);
    for form in FORMS {
        def.set(form, 4 * scale);
    }
    def
}

/// Competition-sized profile: one table per height class, two PP tables.
pub fn reference_profile() -> (ArenaDescription, TaskDefinitions) {
    let mut tasks = TaskDefinitions::new();
    tasks.insert("MIXED".to_string(), mixed_task(2, 42));
    tasks.insert(
        "NAV".to_string(),
        TaskDefinition::new()
            .with(keys::SEED, 42)
            .with(keys::WAYPOINT_COUNT, 5),
    );
    (arena(1, 2, 2), tasks)
}

/// Stress profile: 25 tables per height class, 20 PP tables.
pub fn stress_profile() -> (ArenaDescription, TaskDefinitions) {
    let mut tasks = TaskDefinitions::new();
    tasks.insert("MIXED".to_string(), mixed_task(25, 42));
    (arena(25, 20, 20), tasks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use refgen_engine::TaskGenerator;

    #[test]
    fn reference_profile_generates() {
        let (arena, tasks) = reference_profile();
        let mut generator = TaskGenerator::new(arena, tasks).unwrap();
        let task = generator.generate("MIXED").unwrap();
        assert_eq!(task.placements().count(), 12);
        assert_eq!(generator.generate("NAV").unwrap().waypoints.len(), 5);
    }

    #[test]
    fn stress_profile_generates() {
        let (arena, tasks) = stress_profile();
        let mut generator = TaskGenerator::new(arena, tasks).unwrap();
        let task = generator.generate("MIXED").unwrap();
        assert_eq!(task.placements().count(), 150);
        assert_eq!(task.cavities().count(), 100);
    }
}
