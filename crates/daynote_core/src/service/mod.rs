//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate template, repository and clock calls into use-case APIs.
//! - Keep the CLI decoupled from storage details.

pub mod memory_service;
