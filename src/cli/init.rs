//! td init command implementation
//!
//! Creates the `.td/` storage directory in the start directory.

use std::path::PathBuf;

use crate::error::Result;
use crate::output::{emit_success, HumanOutput};
use crate::storage::{self, TD_DIR};

use super::task::Context;

#[derive(serde::Serialize)]
struct InitReport {
    root: PathBuf,
    td_dir: PathBuf,
}

pub fn run(ctx: &Context) -> Result<()> {
    let dir = ctx
        .start
        .canonicalize()
        .unwrap_or_else(|_| ctx.start.clone());
    let root = storage::init_project(&dir)?;

    let report = InitReport {
        td_dir: root.join(TD_DIR),
        root: root.clone(),
    };
    let human = HumanOutput::new(format!("Initialized .td/ in {}", root.display()));

    emit_success(ctx.output(), "init", &report, Some(&human))
}
