//! Day-file repository contracts and filesystem implementation.
//!
//! # Responsibility
//! - Map ISO dates to day-file paths.
//! - Keep raw filesystem calls out of service orchestration.
//!
//! # Invariants
//! - `create` never overwrites an existing file.
//! - Every I/O failure carries the path it happened on.

use crate::layout::MemoryLayout;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::{self, OpenOptions};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for day-file persistence.
#[derive(Debug)]
pub enum RepoError {
    /// Filesystem call failed.
    Io {
        op: &'static str,
        path: PathBuf,
        source: io::Error,
    },
    /// Requested day file does not exist.
    NotFound(PathBuf),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { op, path, source } => {
                write!(f, "failed to {op} `{}`: {source}", path.display())
            }
            Self::NotFound(path) => write!(f, "day file not found: {}", path.display()),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::NotFound(_) => None,
        }
    }
}

impl RepoError {
    fn io(op: &'static str, path: &Path, source: io::Error) -> Self {
        Self::Io {
            op,
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Repository interface for day-file storage.
pub trait DayFileRepository {
    /// Returns the path a day file for `date` lives at.
    fn path_for(&self, date: &str) -> PathBuf;
    /// Returns whether a day file for `date` exists, without reading it.
    fn exists(&self, date: &str) -> RepoResult<bool>;
    /// Reads a day file, `Ok(None)` when it does not exist.
    fn read(&self, date: &str) -> RepoResult<Option<String>>;
    /// Creates a day file with `content` unless one already exists.
    ///
    /// Returns `true` when this call created the file.
    fn create(&self, date: &str, content: &str) -> RepoResult<bool>;
    /// Replaces the content of an existing day file.
    fn write(&self, date: &str, content: &str) -> RepoResult<()>;
    /// Directory holding every day file.
    fn directory(&self) -> &Path;
    /// Extension shared by day files, without the dot.
    fn extension(&self) -> &str;
}

/// Day-file repository backed by a directory on disk.
pub struct FsDayFileRepository {
    layout: MemoryLayout,
}

impl FsDayFileRepository {
    pub fn new(layout: MemoryLayout) -> Self {
        Self { layout }
    }

    fn ensure_directory(&self) -> RepoResult<()> {
        let dir = self.layout.memory_dir.as_path();
        fs::create_dir_all(dir).map_err(|err| RepoError::io("create directory", dir, err))
    }
}

impl DayFileRepository for FsDayFileRepository {
    fn path_for(&self, date: &str) -> PathBuf {
        self.layout.day_file_path(date)
    }

    fn exists(&self, date: &str) -> RepoResult<bool> {
        let path = self.path_for(date);
        path.try_exists().map_err(|err| RepoError::io("stat", &path, err))
    }

    fn read(&self, date: &str) -> RepoResult<Option<String>> {
        let path = self.path_for(date);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(RepoError::io("read", &path, err)),
        }
    }

    fn create(&self, date: &str, content: &str) -> RepoResult<bool> {
        self.ensure_directory()?;
        let path = self.path_for(date);

        let file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::AlreadyExists => return Ok(false),
            Err(err) => {
                error!(
                    "event=day_file_create module=repo status=error date={} error={}",
                    date, err
                );
                return Err(RepoError::io("create", &path, err));
            }
        };
        write_or_discard(file, &path, content)?;

        info!(
            "event=day_file_create module=repo status=ok date={} bytes={}",
            date,
            content.len()
        );
        Ok(true)
    }

    fn write(&self, date: &str, content: &str) -> RepoResult<()> {
        let path = self.path_for(date);
        if !path.is_file() {
            return Err(RepoError::NotFound(path));
        }
        fs::write(&path, content).map_err(|err| RepoError::io("write", &path, err))
    }

    fn directory(&self) -> &Path {
        &self.layout.memory_dir
    }

    fn extension(&self) -> &str {
        &self.layout.extension
    }
}

// A partially written day file would count as existing forever after.
fn write_or_discard(mut file: impl Write, path: &Path, content: &str) -> RepoResult<()> {
    let written = file.write_all(content.as_bytes()).and_then(|()| file.flush());
    drop(file);
    if let Err(err) = written {
        if let Err(remove_err) = fs::remove_file(path) {
            error!(
                "event=day_file_discard module=repo status=error file={} error={}",
                path.display(),
                remove_err
            );
        }
        return Err(RepoError::io("write", path, err));
    }
    Ok(())
}
