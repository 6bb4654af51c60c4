//! Database file resolution.
//!
//! The database ships inside the deployment bundle, but where the bundle ends
//! up depends on how the function runs: from the repository root during local
//! development, next to the binary for some builds, and under the platform's
//! task root in production. [`DatabaseLocator`] tries an ordered list of
//! candidates and picks the first file that exists.

use std::env;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::LookupError;

/// File name of the rankings database.
pub const DATABASE_FILE_NAME: &str = "data.db";

/// Environment variable the serverless platform sets to the bundle root.
pub const TASK_ROOT_ENV: &str = "LAMBDA_TASK_ROOT";

/// One place the database file may live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbCandidate {
    /// A full path to the database file, as configured by the operator.
    File(PathBuf),

    /// A directory expected to contain the database file.
    Dir(PathBuf),

    /// The process working directory.
    WorkingDir,

    /// The directory containing the running executable.
    ExecutableDir,

    /// A directory named by an environment variable, skipped when unset.
    EnvDir(String),
}

impl DbCandidate {
    /// The file path this candidate points at, if it can be determined.
    pub fn path(&self, file_name: &str) -> Option<PathBuf> {
        match self {
            DbCandidate::File(path) => Some(path.clone()),
            DbCandidate::Dir(dir) => Some(dir.join(file_name)),
            DbCandidate::WorkingDir => env::current_dir().ok().map(|dir| dir.join(file_name)),
            DbCandidate::ExecutableDir => env::current_exe()
                .ok()
                .and_then(|exe| exe.parent().map(|dir| dir.join(file_name))),
            DbCandidate::EnvDir(var) => env::var_os(var)
                .filter(|value| !value.is_empty())
                .map(|dir| Path::new(&dir).join(file_name)),
        }
    }
}

/// Ordered list of database candidates; the first existing file wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseLocator {
    file_name: String,
    candidates: Vec<DbCandidate>,
}

impl DatabaseLocator {
    /// Create a locator with an explicit candidate list.
    pub fn new(candidates: Vec<DbCandidate>) -> Self {
        Self {
            file_name: DATABASE_FILE_NAME.to_string(),
            candidates,
        }
    }

    /// The standard search order: working directory, executable directory,
    /// then `$LAMBDA_TASK_ROOT`.
    pub fn platform_default() -> Self {
        Self::new(vec![
            DbCandidate::WorkingDir,
            DbCandidate::ExecutableDir,
            DbCandidate::EnvDir(TASK_ROOT_ENV.to_string()),
        ])
    }

    /// Try `path` before every other candidate.
    pub fn with_override(mut self, path: impl Into<PathBuf>) -> Self {
        self.candidates.insert(0, DbCandidate::File(path.into()));
        self
    }

    /// Look for a different file name in directory candidates.
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    pub fn candidates(&self) -> &[DbCandidate] {
        &self.candidates
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Return the first candidate path that exists on the filesystem.
    ///
    /// # Errors
    ///
    /// [`LookupError::DatabaseNotFound`] listing every path that was checked.
    pub fn resolve(&self) -> Result<PathBuf, LookupError> {
        let mut searched = Vec::with_capacity(self.candidates.len());

        for candidate in &self.candidates {
            let Some(path) = candidate.path(&self.file_name) else {
                continue;
            };
            if path.exists() {
                debug!(path = %path.display(), "Resolved database path");
                return Ok(path);
            }
            searched.push(path);
        }

        Err(LookupError::DatabaseNotFound {
            file_name: self.file_name.clone(),
            searched,
        })
    }
}

impl Default for DatabaseLocator {
    fn default() -> Self {
        Self::platform_default()
    }
}
