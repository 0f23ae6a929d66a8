//! Case-insensitive substring scan over day files.
//!
//! # Responsibility
//! - Provide keyword search over every stored day file.
//! - Return typed hits carrying file name and line number.
//!
//! # Invariants
//! - Files are visited in lexical file-name order, lines in file order.
//! - Unreadable files are skipped, never fatal.

use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

/// Result type for search APIs.
pub type SearchResult<T> = Result<T, SearchError>;

/// Search-layer error.
#[derive(Debug)]
pub enum SearchError {
    /// Keyword is blank after trimming.
    EmptyKeyword,
    /// The memory directory does not exist yet.
    MissingDirectory(PathBuf),
    /// The memory directory exists but cannot be listed.
    Io { path: PathBuf, source: io::Error },
}

impl Display for SearchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyKeyword => write!(f, "keyword is empty"),
            Self::MissingDirectory(path) => {
                write!(f, "memory directory not found: {}", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "failed to list `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for SearchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Search options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Keyword matched case-insensitively as a substring.
    pub text: String,
    /// Maximum number of hits; `None` scans everything.
    pub limit: Option<usize>,
}

impl SearchQuery {
    /// Creates an unlimited query.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            limit: None,
        }
    }

    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }
}

/// Single matching line returned by [`search_all`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    /// File name without directory.
    pub file: String,
    /// 1-based line number.
    pub line: usize,
    /// The matching line as stored.
    pub text: String,
}

impl Display for SearchHit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}: {}", self.file, self.line, self.text)
    }
}

/// Scans every `*.{extension}` file in `dir` for `query`.
///
/// Returns an empty list when nothing matches or `limit` is zero.
pub fn search_all(dir: &Path, extension: &str, query: &SearchQuery) -> SearchResult<Vec<SearchHit>> {
    let keyword = query.text.trim();
    if keyword.is_empty() {
        return Err(SearchError::EmptyKeyword);
    }
    if query.limit == Some(0) {
        return Ok(Vec::new());
    }

    let files = list_files(dir, extension)?;
    let needle = keyword.to_lowercase();
    let mut hits = Vec::new();

    for path in &files {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                warn!(
                    "event=search_skip module=search status=skip file={} kind={:?}",
                    path.display(),
                    err.kind()
                );
                continue;
            }
        };
        let file = file_name(path);

        for (idx, line) in content.lines().enumerate() {
            if !line.to_lowercase().contains(&needle) {
                continue;
            }
            hits.push(SearchHit {
                file: file.clone(),
                line: idx + 1,
                text: line.to_string(),
            });
            if query.limit.is_some_and(|max| hits.len() >= max) {
                log_done(files.len(), hits.len());
                return Ok(hits);
            }
        }
    }

    log_done(files.len(), hits.len());
    Ok(hits)
}

fn list_files(dir: &Path, extension: &str) -> SearchResult<Vec<PathBuf>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Err(SearchError::MissingDirectory(dir.to_path_buf()));
        }
        Err(source) => {
            return Err(SearchError::Io {
                path: dir.to_path_buf(),
                source,
            });
        }
    };

    let mut files = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| path.extension().is_some_and(|ext| ext == extension))
        .collect::<Vec<_>>();
    files.sort_by_key(|path| path.file_name().map(|name| name.to_os_string()));
    Ok(files)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn log_done(files: usize, hits: usize) {
    info!(
        "event=search module=search status=ok files={} hits={}",
        files, hits
    );
}
