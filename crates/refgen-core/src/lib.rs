//! Core types for the refgen benchmark task generator.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the identifiers shared by every other crate, the type-code codec
//! that turns compact strings such as `"F20_20_B"` into a structured
//! [`Classification`], and the [`ObjectTypeQuota`] inventory entry.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod classify;
pub mod error;
pub mod id;
pub mod quota;

pub use classify::{classify, Category, Classification, Orientation};
pub use error::TypeCodeError;
pub use id::{ObjectId, TableId};
pub use quota::{total_count, ObjectTypeQuota};
