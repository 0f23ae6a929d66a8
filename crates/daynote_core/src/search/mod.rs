//! Keyword search entry points.
//!
//! # Responsibility
//! - Expose line-level keyword search over stored day files.
//! - Keep result shaping inside core.

pub mod scan;
