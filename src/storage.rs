//! Storage layer for td
//!
//! Every task is one YAML record inside the project-local `.td/` directory.
//!
//! # Directory Structure
//!
//! ```text
//! <root>/.td/
//!   config.toml          # Optional configuration
//!   .lock                # Advisory lock held by mutating operations
//!   tasks/
//!     <id>.yaml          # One record per task, named by id
//! ```
//!
//! The project root is resolved once per invocation and carried by a
//! [`TaskStore`] value; nothing here reads the current directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::{Config, CONFIG_FILE};
use crate::error::{Error, Result};
use crate::lock::{self, FileLock};
use crate::slug::validate_id;
use crate::task::Task;

/// Name of the project marker directory
pub const TD_DIR: &str = ".td";

/// Name of the records directory inside `.td/`
pub const TASKS_DIR: &str = "tasks";

/// Name of the lock file inside `.td/`
pub const LOCK_FILE: &str = ".lock";

const RECORD_EXT: &str = "yaml";

/// Create `.td/` (with `tasks/` and a default config) inside `dir`.
///
/// Fails with `AlreadyInitialized` if `dir/.td` already exists. The layout
/// is built in a staging directory next to it and renamed into place, so a
/// failed init leaves no partial `.td/` behind. Returns the project root.
pub fn init_project(dir: &Path) -> Result<PathBuf> {
    let td_dir = dir.join(TD_DIR);
    if td_dir.exists() {
        return Err(Error::AlreadyInitialized(td_dir));
    }

    let staging = tempfile::Builder::new()
        .prefix(".td-init-")
        .tempdir_in(dir)?;
    fs::create_dir(staging.path().join(TASKS_DIR))?;
    Config::default().save(&staging.path().join(CONFIG_FILE))?;
    fs::rename(staging.path(), &td_dir)?;
    tracing::debug!(root = %dir.display(), "initialized project");

    Ok(dir.to_path_buf())
}

/// Walk from `start` up to the filesystem root looking for `.td/`.
pub fn find_root(start: &Path) -> Result<PathBuf> {
    let start = start
        .canonicalize()
        .unwrap_or_else(|_| start.to_path_buf());

    for dir in start.ancestors() {
        if dir.join(TD_DIR).is_dir() {
            tracing::debug!(root = %dir.display(), "found project root");
            return Ok(dir.to_path_buf());
        }
    }

    Err(Error::NotInitialized(start))
}

/// Authoritative store for one project's tasks
#[derive(Debug, Clone)]
pub struct TaskStore {
    root: PathBuf,
    config: Config,
}

impl TaskStore {
    /// Bind a store to an already-resolved project root.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let td_dir = root.join(TD_DIR);
        if !td_dir.is_dir() {
            return Err(Error::NotInitialized(root));
        }
        let config = Config::load_from_dir(&td_dir)?;
        Ok(Self { root, config })
    }

    /// `find_root` followed by `open`.
    pub fn discover(start: &Path) -> Result<Self> {
        Self::open(find_root(start)?)
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    // =========================================================================
    // Path accessors
    // =========================================================================

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn td_dir(&self) -> PathBuf {
        self.root.join(TD_DIR)
    }

    pub fn tasks_dir(&self) -> PathBuf {
        self.td_dir().join(TASKS_DIR)
    }

    pub fn lock_path(&self) -> PathBuf {
        self.td_dir().join(LOCK_FILE)
    }

    /// Path of the record for `id`. `id` must already be validated.
    pub fn record_path(&self, id: &str) -> PathBuf {
        self.tasks_dir().join(format!("{id}.{RECORD_EXT}"))
    }

    fn lock(&self) -> Result<FileLock> {
        FileLock::acquire(self.lock_path(), self.config.lock.timeout_ms)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Whether a record exists for `id`. Malformed ids never exist.
    pub fn exists(&self, id: &str) -> bool {
        validate_id(id).is_ok() && self.record_path(id).is_file()
    }

    /// Ids of every record on disk, sorted.
    pub fn ids(&self) -> Result<Vec<String>> {
        let entries = match fs::read_dir(self.tasks_dir()) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let mut ids = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(RECORD_EXT) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            if validate_id(stem).is_err() || !path.is_file() {
                tracing::debug!(path = %path.display(), "skipping non-record file");
                continue;
            }
            ids.push(stem.to_string());
        }
        ids.sort();
        Ok(ids)
    }

    /// `base` if unused, otherwise the first free `base-2`, `base-3`, ...
    pub fn resolve_unique_id(&self, base: &str) -> Result<String> {
        validate_id(base)?;
        if !self.exists(base) {
            return Ok(base.to_string());
        }
        let mut n: u64 = 2;
        loop {
            let candidate = format!("{base}-{n}");
            if !self.exists(&candidate) {
                return Ok(candidate);
            }
            n += 1;
        }
    }

    /// Map user input to a stored id: exact match, else a unique prefix.
    pub fn resolve_id(&self, input: &str) -> Result<String> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(Error::invalid("id", input));
        }
        let needle = trimmed.to_lowercase();
        if self.exists(&needle) {
            return Ok(needle);
        }

        let mut matches: Vec<String> = self
            .ids()?
            .into_iter()
            .filter(|id| id.starts_with(&needle))
            .collect();

        match matches.len() {
            0 => Err(Error::NotFound(trimmed.to_string())),
            1 => Ok(matches.remove(0)),
            _ => Err(Error::AmbiguousId {
                id: trimmed.to_string(),
                candidates: matches,
            }),
        }
    }

    /// Read exactly one record.
    pub fn load(&self, id: &str) -> Result<Task> {
        if validate_id(id).is_err() {
            return Err(Error::NotFound(id.to_string()));
        }

        let path = self.record_path(id);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(Error::NotFound(id.to_string()));
            }
            Err(err) if err.kind() == io::ErrorKind::InvalidData => {
                return Err(Error::corrupt(id, err));
            }
            Err(err) => return Err(err.into()),
        };

        Task::from_yaml(id, &content)
    }

    /// Read every record. A single corrupt record fails the whole call.
    pub fn load_all(&self) -> Result<Vec<Task>> {
        let ids = self.ids()?;
        let mut tasks = Vec::with_capacity(ids.len());
        for id in ids {
            match self.load(&id) {
                Ok(task) => tasks.push(task),
                // Removed between listing and reading.
                Err(Error::NotFound(_)) => continue,
                Err(err) => return Err(err),
            }
        }
        Ok(tasks)
    }

    // =========================================================================
    // Mutations (locked)
    // =========================================================================

    /// Insert a new record; never overwrites.
    pub fn create(&self, task: &Task) -> Result<()> {
        task.validate()?;
        let _lock = self.lock()?;
        if self.exists(&task.id) {
            return Err(Error::AlreadyExists(task.id.clone()));
        }
        self.write_record(task)
    }

    /// Write the full record for `task.id`, creating or replacing it.
    pub fn save(&self, task: &Task) -> Result<()> {
        task.validate()?;
        let _lock = self.lock()?;
        self.write_record(task)
    }

    /// Remove the record for `id`. Children keep their `parent` reference.
    pub fn delete(&self, id: &str) -> Result<()> {
        let _lock = self.lock()?;
        if !self.exists(id) {
            return Err(Error::NotFound(id.to_string()));
        }
        match fs::remove_file(self.record_path(id)) {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(Error::NotFound(id.to_string()));
            }
            Err(err) => return Err(err.into()),
        }
        tracing::debug!(id, "deleted task record");
        Ok(())
    }

    fn write_record(&self, task: &Task) -> Result<()> {
        let yaml = task.to_yaml()?;
        lock::write_atomic(self.record_path(&task.id), yaml.as_bytes())?;
        tracing::debug!(id = %task.id, state = %task.state, "wrote task record");
        Ok(())
    }
}
