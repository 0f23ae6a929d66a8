//! Day-file use-case service.
//!
//! # Responsibility
//! - Ensure today's day file exists, seeded from the resolved template.
//! - Append timestamped entries under the Context heading.
//! - Read today's summary lines and run keyword search.
//!
//! # Invariants
//! - An existing day file is never recreated or overwritten by `ensure`.
//! - "Today" and entry timestamps come only from the injected clock.
//! - Concurrent writers to the same day file are not coordinated.

use crate::clock::{format_date, Clock};
use crate::model::entry::{Entry, EntryValidationError};
use crate::repo::day_file_repo::{DayFileRepository, RepoError};
use crate::search::scan::{search_all, SearchHit, SearchQuery, SearchResult};
use crate::section::{insert_under_heading, section_lines};
use crate::template::{render_template, resolve_template, CONTEXT_HEADING, SUMMARY_HEADING};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Service error for day-file use-cases.
#[derive(Debug)]
pub enum MemoryServiceError {
    /// Entry input is invalid.
    InvalidEntry(EntryValidationError),
    /// Today's file has no heading with this name.
    SectionNotFound(&'static str),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for MemoryServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidEntry(err) => write!(f, "{err}"),
            Self::SectionNotFound(heading) => write!(f, "section not found: `{heading}`"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for MemoryServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidEntry(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::SectionNotFound(_) => None,
        }
    }
}

impl From<EntryValidationError> for MemoryServiceError {
    fn from(value: EntryValidationError) -> Self {
        Self::InvalidEntry(value)
    }
}

impl From<RepoError> for MemoryServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

pub type MemoryResult<T> = Result<T, MemoryServiceError>;

/// Outcome of ensuring today's day file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnsureOutcome {
    /// This call wrote the file from the template.
    Created(PathBuf),
    /// The file already existed and was left untouched.
    Existing(PathBuf),
}

impl EnsureOutcome {
    pub fn path(&self) -> &Path {
        match self {
            Self::Created(path) | Self::Existing(path) => path,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}

/// Result of appending one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddOutcome {
    /// How today's file was obtained before the append.
    pub file: EnsureOutcome,
    /// Rendered entry line as written.
    pub entry: String,
}

/// Day-file service facade over a repository and a clock.
pub struct MemoryService<R: DayFileRepository, C: Clock> {
    repo: R,
    clock: C,
    template_path: Option<PathBuf>,
}

impl<R: DayFileRepository, C: Clock> MemoryService<R, C> {
    /// Creates a service that seeds new files from the built-in template.
    pub fn new(repo: R, clock: C) -> Self {
        Self {
            repo,
            clock,
            template_path: None,
        }
    }

    /// Uses the template region of the document at `path` when available.
    pub fn with_template(mut self, path: impl Into<PathBuf>) -> Self {
        self.template_path = Some(path.into());
        self
    }

    /// Today's date as `YYYY-MM-DD`.
    pub fn today_date(&self) -> String {
        self.clock.today()
    }

    pub fn today_file_path(&self) -> PathBuf {
        self.repo.path_for(&self.today_date())
    }

    /// Ensures today's file exists.
    ///
    /// # Side effects
    /// - Creates the memory directory and the day file on first call of the
    ///   day.
    pub fn ensure_today_file(&self) -> MemoryResult<EnsureOutcome> {
        self.ensure_file_for(&self.today_date())
    }

    /// Appends `- [HH:MM] <message>` under today's Context heading.
    ///
    /// The clock is read once, so the entry time and the target file always
    /// belong to the same day.
    ///
    /// # Errors
    /// - `InvalidEntry` when `message` is blank.
    /// - `Repo` when today's file cannot be created, read or written.
    pub fn add_entry(&self, message: &str) -> MemoryResult<AddOutcome> {
        let now = self.clock.now();
        let entry = Entry::new(now.time(), message)?;
        let date = format_date(now.date());
        let file = self.ensure_file_for(&date)?;

        let content = self
            .repo
            .read(&date)?
            .ok_or_else(|| RepoError::NotFound(file.path().to_path_buf()))?;
        let line = entry.to_string();
        let updated = insert_under_heading(&content, CONTEXT_HEADING, &line);
        self.repo.write(&date, &updated)?;

        info!(
            "event=entry_add module=service status=ok date={} chars={}",
            date,
            entry.message.chars().count()
        );
        Ok(AddOutcome { file, entry: line })
    }

    /// Returns non-blank lines of today's Summary section.
    ///
    /// `max_lines` of `None` or `Some(0)` returns every line.
    pub fn today_summary(&self, max_lines: Option<usize>) -> MemoryResult<Vec<String>> {
        let date = self.today_date();
        let content = self
            .repo
            .read(&date)?
            .ok_or_else(|| RepoError::NotFound(self.repo.path_for(&date)))?;
        section_lines(&content, SUMMARY_HEADING, max_lines)
            .ok_or(MemoryServiceError::SectionNotFound(SUMMARY_HEADING))
    }

    /// Searches every stored day file.
    pub fn search(&self, query: &SearchQuery) -> SearchResult<Vec<SearchHit>> {
        search_all(self.repo.directory(), self.repo.extension(), query)
    }

    fn ensure_file_for(&self, date: &str) -> MemoryResult<EnsureOutcome> {
        let path = self.repo.path_for(date);
        if self.repo.exists(date)? {
            return Ok(EnsureOutcome::Existing(path));
        }

        let template = resolve_template(self.template_path.as_deref());
        let content = render_template(&template, date);
        if self.repo.create(date, &content)? {
            Ok(EnsureOutcome::Created(path))
        } else {
            Ok(EnsureOutcome::Existing(path))
        }
    }
}
