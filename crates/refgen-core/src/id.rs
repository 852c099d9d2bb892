//! Strongly-typed identifiers for tables and generated objects.
//!
//! Entities refer to each other through these ids rather than through
//! references, so the collections that own them can grow freely.

use std::fmt;

/// Identifies a table (workstation) within a table registry.
///
/// `TableId(n)` is the n-th table in the arena's workstation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TableId(pub u32);

impl TableId {
    /// Position of the table in its registry.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

impl From<u32> for TableId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies an object instance within one generated task.
///
/// Ids are handed out from zero at the start of every generation call,
/// so `ObjectId(n)` is also the n-th entry of the task's object list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u32);

impl ObjectId {
    /// Position of the object in its owning task.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ObjectId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_index_and_display() {
        assert_eq!(TableId(3).index(), 3);
        assert_eq!(ObjectId::from(7).index(), 7);
        assert_eq!(TableId(2).to_string(), "T2");
        assert_eq!(ObjectId(11).to_string(), "11");
    }

    #[test]
    fn ids_order_by_value() {
        let mut ids = vec![ObjectId(4), ObjectId(0), ObjectId(2)];
        ids.sort();
        assert_eq!(ids, vec![ObjectId(0), ObjectId(2), ObjectId(4)]);
    }
}
