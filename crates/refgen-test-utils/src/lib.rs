//! Test fixtures for refgen development.
//!
//! Provides a competition-sized arena ([`standard_arena`]), a few
//! reference task definitions, and [`TaskBuilder`] for assembling ad-hoc
//! tasks in tests.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{
    minimal_arena, navigation_task, precision_task, standard_arena, standard_tasks,
    transport_task, TaskBuilder,
};
