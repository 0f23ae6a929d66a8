//! Domain model for day-file content.
//!
//! # Responsibility
//! - Define the records written into day files.
//!
//! # Invariants
//! - A rendered entry always occupies exactly one line.

pub mod entry;
