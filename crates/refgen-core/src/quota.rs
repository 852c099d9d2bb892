//! Inventory entries: an object type with a remaining count.

use crate::classify::{classify, Classification};
use crate::error::TypeCodeError;

/// How many more instances of one object type may still be generated.
///
/// Inventories are cloned from immutable templates at the start of
/// each generation call and consumed with [`take`](Self::take).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectTypeQuota {
    /// Decoded type.
    pub classification: Classification,
    /// Remaining instances.
    pub count: u32,
}

impl ObjectTypeQuota {
    /// Build a quota entry from a classification.
    pub fn new(classification: Classification, count: u32) -> Self {
        Self {
            classification,
            count,
        }
    }

    /// Decode `code` and build a quota entry for it.
    pub fn from_code(code: &str, count: u32) -> Result<Self, TypeCodeError> {
        Ok(Self::new(classify(code)?, count))
    }

    /// `true` once no instances remain.
    pub fn is_exhausted(&self) -> bool {
        self.count == 0
    }

    /// Consume one instance, returning `false` if none remained.
    pub fn take(&mut self) -> bool {
        match self.count.checked_sub(1) {
            Some(rest) => {
                self.count = rest;
                true
            }
            None => false,
        }
    }
}

/// Total remaining instances across an inventory.
pub fn total_count(quotas: &[ObjectTypeQuota]) -> u64 {
    quotas.iter().map(|q| u64::from(q.count)).sum()
}
