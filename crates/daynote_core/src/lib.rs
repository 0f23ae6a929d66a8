//! Core domain logic for daynote.
//! This crate is the single source of truth for day-file invariants.

pub mod clock;
pub mod config;
pub mod layout;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod section;
pub mod service;
pub mod template;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{Config, ConfigError};
pub use layout::MemoryLayout;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::entry::{Entry, EntryValidationError};
pub use repo::day_file_repo::{DayFileRepository, FsDayFileRepository, RepoError, RepoResult};
pub use search::scan::{search_all, SearchError, SearchHit, SearchQuery, SearchResult};
pub use service::memory_service::{
    AddOutcome, EnsureOutcome, MemoryResult, MemoryService, MemoryServiceError,
};
pub use template::{resolve_template, DEFAULT_TEMPLATE};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
