//! Tables indexed by table-type code.
//!
//! The registry is built once from an [`ArenaDescription`] and never
//! mutated afterwards. Tables are stored in workstation order, so a
//! [`TableId`] is stable for the lifetime of the registry; the type
//! index maps each type code to its tables in that same order.

use std::fmt;

use indexmap::IndexMap;
use refgen_core::TableId;
use smallvec::SmallVec;

use crate::description::ArenaDescription;
use crate::table::Table;

/// Multi-valued mapping from table-type code to tables.
#[derive(Clone, Debug, Default)]
pub struct TableRegistry {
    tables: Vec<Table>,
    by_type: IndexMap<String, SmallVec<[TableId; 4]>>,
}

impl TableRegistry {
    /// Index the arena's workstations. O(number of workstations).
    pub fn build(arena: &ArenaDescription) -> Self {
        let mut registry = Self::default();
        for (name, table_type) in &arena.workstations {
            registry.insert(Table::new(name.as_str(), table_type.as_str()));
        }
        registry
    }

    fn insert(&mut self, table: Table) {
        let id = TableId(self.tables.len() as u32);
        self.by_type
            .entry(table.table_type.clone())
            .or_default()
            .push(id);
        self.tables.push(table);
    }

    /// Number of registered tables.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// `true` if the arena has no tables.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Resolve a table id.
    pub fn get(&self, id: TableId) -> Option<&Table> {
        self.tables.get(id.index())
    }

    /// All tables with their ids, in workstation order.
    pub fn iter(&self) -> impl Iterator<Item = (TableId, &Table)> {
        self.tables
            .iter()
            .enumerate()
            .map(|(i, t)| (TableId(i as u32), t))
    }

    /// All table ids, in workstation order.
    pub fn ids(&self) -> Vec<TableId> {
        (0..self.tables.len()).map(|i| TableId(i as u32)).collect()
    }

    /// Number of tables of `table_type`.
    pub fn count(&self, table_type: &str) -> usize {
        self.by_type.get(table_type).map_or(0, |ids| ids.len())
    }

    /// Whether at least one table of `table_type` exists.
    pub fn contains_type(&self, table_type: &str) -> bool {
        self.count(table_type) > 0
    }

    /// Ids of every table whose type is in `types`.
    ///
    /// Groups follow the order of `types`; within a group, tables keep
    /// workstation order. A type listed twice contributes once. Returns
    /// an empty vector when nothing matches, so callers must check
    /// before sampling.
    pub fn ids_of_types<S: AsRef<str>>(&self, types: &[S]) -> Vec<TableId> {
        let mut seen: SmallVec<[&str; 8]> = SmallVec::new();
        let mut ids = Vec::new();
        for table_type in types {
            let table_type = table_type.as_ref();
            if seen.contains(&table_type) {
                continue;
            }
            seen.push(table_type);
            if let Some(group) = self.by_type.get(table_type) {
                ids.extend_from_slice(group);
            }
        }
        ids
    }

    /// Tables whose type is in `types`, in the order of
    /// [`ids_of_types`](Self::ids_of_types).
    pub fn tables_of_types<S: AsRef<str>>(&self, types: &[S]) -> Vec<&Table> {
        self.ids_of_types(types)
            .into_iter()
            .filter_map(|id| self.get(id))
            .collect()
    }
}

impl fmt::Display for TableRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (table_type, ids) in &self.by_type {
            for id in ids {
                if let Some(table) = self.get(*id) {
                    writeln!(f, "{table_type} = {table}")?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::table_types;
    use proptest::prelude::*;

    fn arena() -> ArenaDescription {
        ArenaDescription::new()
            .with_workstation("WS01", "10")
            .with_workstation("PP01", "PP")
            .with_workstation("WS02", "05")
            .with_workstation("PP02", "PP")
            .with_workstation("SH01", "SH")
    }

    #[test]
    fn build_indexes_every_workstation() {
        let reg = TableRegistry::build(&arena());
        assert_eq!(reg.len(), 5);
        assert!(!reg.is_empty());
        assert_eq!(reg.count(table_types::PRECISION_PLACEMENT), 2);
        assert_eq!(reg.count(table_types::SHELF), 1);
        assert_eq!(reg.count(table_types::ROTATING_TABLE), 0);
        assert!(!reg.contains_type("TT"));
        assert_eq!(reg.get(TableId(1)).unwrap().name, "PP01");
        assert!(reg.get(TableId(5)).is_none());
    }

    #[test]
    fn ids_of_types_groups_by_requested_order() {
        let reg = TableRegistry::build(&arena());
        assert_eq!(
            reg.ids_of_types(&["PP", "10"]),
            vec![TableId(1), TableId(3), TableId(0)]
        );
        assert_eq!(reg.ids_of_types(&["05", "05"]), vec![TableId(2)]);
    }

    #[test]
    fn unmatched_types_return_empty() {
        let reg = TableRegistry::build(&arena());
        assert!(reg.ids_of_types(&["TT", "15"]).is_empty());
        assert!(reg.tables_of_types::<&str>(&[]).is_empty());
    }

    #[test]
    fn tables_of_types_resolves_names() {
        let reg = TableRegistry::build(&arena());
        let names: Vec<_> = reg
            .tables_of_types(&["SH", "05"])
            .into_iter()
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(names, vec!["SH01", "WS02"]);
    }

    #[test]
    fn display_lists_tables_by_type() {
        let reg = TableRegistry::build(&arena());
        let text = reg.to_string();
        assert!(text.contains("PP = Table PP01(PP)"));
        assert!(text.contains("SH = Table SH01(SH)"));
        assert_eq!(text.lines().count(), 5);
    }

    proptest! {
        #[test]
        fn every_table_lands_in_its_group(types in prop::collection::vec("[0-9A-Z]{2}", 0..20)) {
            let mut arena = ArenaDescription::new();
            for (i, t) in types.iter().enumerate() {
                arena = arena.with_workstation(format!("WS{i:02}"), t.as_str());
            }
            let reg = TableRegistry::build(&arena);
            prop_assert_eq!(reg.len(), types.len());
            for (id, table) in reg.iter() {
                prop_assert!(reg.ids_of_types(&[table.table_type.as_str()]).contains(&id));
            }
            let total: usize = reg.ids_of_types(&types[..]).len();
            prop_assert_eq!(total, types.len());
        }
    }
}
