//! Inventory templates.
//!
//! Templates are decoded once when a generator is built and cloned at
//! the start of every call, so consuming stock in one call never leaks
//! into the next.

use refgen_arena::ArenaDescription;
use refgen_core::ObjectTypeQuota;

use crate::config::{ConfigError, TaskDefinition};

/// Cavity types with a non-zero count, in arena order.
pub fn cavity_template(arena: &ArenaDescription) -> Result<Vec<ObjectTypeQuota>, ConfigError> {
    arena
        .cavities
        .iter()
        .filter(|(_, count)| **count > 0)
        .map(|(code, count)| {
            ObjectTypeQuota::from_code(code, *count)
                .map_err(|source| ConfigError::InvalidTypeCode { task: None, source })
        })
        .collect()
}

/// Object types a task may draw from, in configuration order.
///
/// Only option keys that look like type codes and carry a positive
/// count contribute.
pub fn object_template(
    task: &str,
    def: &TaskDefinition,
) -> Result<Vec<ObjectTypeQuota>, ConfigError> {
    def.object_entries()
        .map(|(code, count)| {
            ObjectTypeQuota::from_code(code, count).map_err(|source| {
                ConfigError::InvalidTypeCode {
                    task: Some(task.to_string()),
                    source,
                }
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::keys;
    use refgen_core::{Category, TypeCodeError};

    #[test]
    fn cavity_template_skips_empty_types() {
        let arena = ArenaDescription::new()
            .with_cavity("M20_H", 2)
            .with_cavity("M20_V", 0)
            .with_cavity("F20_20_V", 1);
        let cavities = cavity_template(&arena).unwrap();
        assert_eq!(cavities.len(), 2);
        assert_eq!(cavities[0].classification.form, "M20");
        assert_eq!(cavities[1].count, 1);
        assert!(cavities
            .iter()
            .all(|q| q.classification.category == Category::Cavity));
    }

    #[test]
    fn object_template_keeps_config_order() {
        let def = TaskDefinition::new()
            .with(keys::OBJECT_COUNT, 3)
            .with("S40_40_B", 1)
            .with("CONTAINER_RED", 2)
            .with(keys::SEED, 9)
            .with("M20", 4);
        let objects = object_template("BTT1", &def).unwrap();
        let codes: Vec<_> = objects
            .iter()
            .map(|q| q.classification.to_string())
            .collect();
        assert_eq!(codes, vec!["S40_40_B", "CONTAINER_RED", "M20"]);
    }

    #[test]
    fn single_character_code_is_invalid() {
        let def = TaskDefinition::new().with("X", 1);
        match object_template("BTT1", &def) {
            Err(ConfigError::InvalidTypeCode { task, source }) => {
                assert_eq!(task.as_deref(), Some("BTT1"));
                assert_eq!(
                    source,
                    TypeCodeError::TooShort {
                        code: "X".to_string()
                    }
                );
            }
            other => panic!("expected InvalidTypeCode, got {other:?}"),
        }
    }
}
