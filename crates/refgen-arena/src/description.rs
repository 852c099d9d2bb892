//! Raw arena input.

use indexmap::IndexMap;

/// Description of a competition arena.
///
/// Both maps keep insertion order; that order fixes table ids and the
/// cavity template order, which seeded generation relies on.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArenaDescription {
    /// Table name → table-type code (e.g. `"WS03" → "10"`).
    pub workstations: IndexMap<String, String>,
    /// Cavity type code → number of cavities of that type available.
    pub cavities: IndexMap<String, u32>,
}

impl ArenaDescription {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a workstation, builder style.
    pub fn with_workstation(mut self, name: impl Into<String>, table_type: impl Into<String>) -> Self {
        self.workstations.insert(name.into(), table_type.into());
        self
    }

    /// Add a cavity type, builder style.
    pub fn with_cavity(mut self, code: impl Into<String>, count: u32) -> Self {
        self.cavities.insert(code.into(), count);
        self
    }
}
