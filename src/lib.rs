//! td - local task state manager library
//!
//! Tasks are plain YAML records in a project-local `.td/` directory. This
//! crate provides the task store and the `td` command-line interface on top
//! of it.
//!
//! # Module Organization
//!
//! - `slug`: id derivation and validation
//! - `state`: the `focus`/`active`/`later`/`done` lifecycle
//! - `task`: the task record, ordering and filtering
//! - `clock`: injectable time source
//! - `storage`: project discovery and the on-disk task store
//! - `lock`: advisory locking and atomic writes
//! - `config`: `.td/config.toml` loading
//! - `error`: error types and exit codes
//! - `output`: JSON and human output helpers
//! - `cli`: command-line interface using clap

pub mod cli;
pub mod clock;
pub mod config;
pub mod error;
pub mod lock;
pub mod output;
pub mod slug;
pub mod state;
pub mod storage;
pub mod task;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{Error, Result};
pub use slug::{slugify, validate_id};
pub use state::{validate_state, State};
pub use storage::{find_root, init_project, TaskStore};
pub use task::Task;
