//! Errors from a single generation call.
//!
//! None of these corrupt generator state: every call rebuilds its
//! inventories from the immutable templates. A failed call yields no
//! [`GeneratedTask`](crate::GeneratedTask).

use std::error::Error;
use std::fmt;

use crate::feasibility::Infeasibility;

/// Errors from [`TaskGenerator::generate()`](crate::TaskGenerator::generate).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GenerateError {
    /// The requested task name is not configured.
    UnknownTask {
        /// The requested name.
        name: String,
        /// Every configured task name.
        valid: Vec<String>,
    },
    /// The task fails a task-level feasibility check.
    Infeasible(Infeasibility),
    /// Fewer cavities were generated than `pp` asks for.
    InsufficientCavities {
        /// Requested precision-placement goals.
        requested: u32,
        /// Cavities actually generated.
        generated: usize,
    },
    /// `container_placing` was requested but no container was generated.
    InsufficientContainers {
        /// Requested container placements.
        requested: u32,
        /// Containers actually generated.
        generated: usize,
    },
    /// No object type with remaining stock fits the target.
    InventoryExhausted {
        /// Description of the placement target.
        target: String,
    },
    /// A stage needs a table but none of the eligible types exist.
    NoEligibleTable {
        /// What the table was needed for.
        purpose: &'static str,
    },
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownTask { name, valid } => write!(
                f,
                "no task '{name}' configured; valid tasks are: {}",
                valid.join(" ")
            ),
            Self::Infeasible(e) => write!(f, "infeasible task: {e}"),
            Self::InsufficientCavities {
                requested,
                generated,
            } => write!(
                f,
                "not enough cavities generated: generated {generated}, needed {requested}"
            ),
            Self::InsufficientContainers {
                requested,
                generated,
            } => write!(
                f,
                "not enough containers generated for {requested} placements: \
                 generated {generated}, needed at least 1"
            ),
            Self::InventoryExhausted { target } => {
                write!(f, "no object type left to place at {target}")
            }
            Self::NoEligibleTable { purpose } => {
                write!(f, "no eligible table for {purpose}")
            }
        }
    }
}

impl Error for GenerateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Infeasible(e) => Some(e),
            _ => None,
        }
    }
}

impl From<Infeasibility> for GenerateError {
    fn from(e: Infeasibility) -> Self {
        Self::Infeasible(e)
    }
}
