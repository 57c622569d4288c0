//! Command-line interface for td
//!
//! This module defines the CLI structure using clap derive macros.
//! Command implementations live in submodules; all of them go through a
//! single `TaskStore` resolved from `--dir` (or the current directory).

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::clock::SystemClock;
use crate::error::Result;
use crate::state::State;

mod init;
mod prompt;
mod skill;
mod task;
mod tree;

/// td - a local task state manager
///
/// Tasks live as one YAML file each under `.td/tasks/` in the project root.
#[derive(Parser, Debug)]
#[command(name = "td")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory to start project discovery from (defaults to current directory)
    #[arg(long, global = true, env = "TD_DIR")]
    pub dir: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize .td/ in the current directory
    Init,

    /// Create a new task
    Add {
        /// Task title
        title: String,

        /// Parent task ID
        #[arg(long)]
        parent: Option<String>,

        /// Initial state: focus, active, later, done (default from config: active)
        #[arg(long)]
        state: Option<String>,

        /// Custom task ID instead of one derived from the title
        #[arg(long = "id")]
        custom_id: Option<String>,

        /// Free-text notes
        #[arg(long)]
        notes: Option<String>,
    },

    /// Move a task to focus
    Focus {
        /// Task ID (or unique prefix)
        id: String,
    },

    /// Move a task to active
    Active {
        /// Task ID (or unique prefix)
        id: String,
    },

    /// Park a task for later
    Later {
        /// Task ID (or unique prefix)
        id: String,
    },

    /// Mark a task as done
    Done {
        /// Task ID (or unique prefix)
        id: String,
    },

    /// List tasks
    Ls {
        /// Only tasks in this state
        #[arg(long)]
        state: Option<String>,

        /// Show all tasks including done
        #[arg(long)]
        all: bool,
    },

    /// Show tasks as a tree
    Tree {
        /// Only the subtree under this task
        id: Option<String>,
    },

    /// Show full details of a task
    Show {
        /// Task ID (or unique prefix)
        id: String,
    },

    /// Edit a task's title, notes, or parent
    Edit {
        /// Task ID (or unique prefix)
        id: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New notes (empty string to remove)
        #[arg(long)]
        notes: Option<String>,

        /// New parent ID (empty string to remove)
        #[arg(long)]
        parent: Option<String>,
    },

    /// Move a task under a different parent
    Mv {
        /// Task ID (or unique prefix)
        id: String,

        /// New parent ID
        parent_id: String,
    },

    /// Remove a task
    Rm {
        /// Task ID (or unique prefix)
        id: String,

        /// Skip confirmation
        #[arg(long)]
        force: bool,
    },

    /// Show summary counts by state
    Status,

    /// Print the td usage guide for LLM agents (SKILL.md)
    Skill,
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        let clock = SystemClock;
        let start = match self.dir {
            Some(dir) => dir,
            None => std::env::current_dir()?,
        };
        let ctx = task::Context {
            start,
            json: self.json,
            quiet: self.quiet,
        };

        match self.command {
            Commands::Init => init::run(&ctx),
            Commands::Add {
                title,
                parent,
                state,
                custom_id,
                notes,
            } => task::run_add(
                &ctx,
                &clock,
                task::AddOptions {
                    title,
                    parent,
                    state,
                    custom_id,
                    notes,
                },
            ),
            Commands::Focus { id } => task::run_set_state(&ctx, &clock, &id, State::Focus),
            Commands::Active { id } => task::run_set_state(&ctx, &clock, &id, State::Active),
            Commands::Later { id } => task::run_set_state(&ctx, &clock, &id, State::Later),
            Commands::Done { id } => task::run_set_state(&ctx, &clock, &id, State::Done),
            Commands::Ls { state, all } => task::run_ls(&ctx, state.as_deref(), all),
            Commands::Tree { id } => tree::run(&ctx, id.as_deref()),
            Commands::Show { id } => task::run_show(&ctx, &id),
            Commands::Edit {
                id,
                title,
                notes,
                parent,
            } => task::run_edit(
                &ctx,
                &clock,
                task::EditOptions {
                    id,
                    title,
                    notes,
                    parent,
                },
            ),
            Commands::Mv { id, parent_id } => task::run_mv(&ctx, &clock, &id, &parent_id),
            Commands::Rm { id, force } => task::run_rm(&ctx, &id, force),
            Commands::Status => task::run_status(&ctx),
            Commands::Skill => skill::run(&ctx),
        }
    }
}
