//! Tables and well-known table-type codes.

use std::fmt;

/// Table-type codes with a fixed meaning to the generator.
pub mod table_types {
    /// Precision-placement table holding cavities.
    pub const PRECISION_PLACEMENT: &str = "PP";
    /// Shelf.
    pub const SHELF: &str = "SH";
    /// Rotating (conveyor) table.
    pub const ROTATING_TABLE: &str = "TT";
    /// Zero-height table.
    pub const HEIGHT_0: &str = "00";
    /// 5 cm table.
    pub const HEIGHT_5: &str = "05";
    /// 10 cm table.
    pub const HEIGHT_10: &str = "10";
    /// 15 cm table.
    pub const HEIGHT_15: &str = "15";
    /// All height classes, lowest first.
    pub const HEIGHTS: [&str; 4] = [HEIGHT_0, HEIGHT_5, HEIGHT_10, HEIGHT_15];
}

/// A named physical surface in the arena.
///
/// Identity is the name; several tables may share a type code.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Table {
    /// Workstation name, unique within an arena.
    pub name: String,
    /// Table-type code such as `"PP"` or `"10"`.
    pub table_type: String,
}

impl Table {
    /// Create a table.
    pub fn new(name: impl Into<String>, table_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table_type: table_type.into(),
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Table {}({})", self.name, self.table_type)
    }
}
