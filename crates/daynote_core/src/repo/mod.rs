//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented day-file access contracts.
//! - Isolate filesystem details from service orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`) in addition to I/O
//!   errors.

pub mod day_file_repo;
