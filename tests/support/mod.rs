#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use serde_json::Value;
use tempfile::TempDir;

/// A temp directory with an initialized `.td/` project.
pub struct TestProject {
    dir: TempDir,
}

impl TestProject {
    pub fn init() -> Self {
        let project = Self::uninitialized();
        project.td().arg("init").assert().success();
        project
    }

    pub fn uninitialized() -> Self {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn tasks_dir(&self) -> PathBuf {
        self.dir.path().join(".td").join("tasks")
    }

    pub fn record_path(&self, id: &str) -> PathBuf {
        self.tasks_dir().join(format!("{id}.yaml"))
    }

    pub fn read_record(&self, id: &str) -> String {
        fs::read_to_string(self.record_path(id)).expect("read record")
    }

    /// `td` running in the project root.
    pub fn td(&self) -> Command {
        self.td_in(self.dir.path())
    }

    pub fn td_in(&self, dir: &Path) -> Command {
        let mut cmd = td_cmd();
        cmd.current_dir(dir);
        cmd
    }

    /// `td add <title> [args..]`, returning the printed id.
    pub fn add(&self, title: &str, args: &[&str]) -> String {
        let output = self
            .td()
            .arg("add")
            .arg(title)
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        String::from_utf8(output).expect("utf8").trim().to_string()
    }

    /// Run with `--json` and parse the envelope.
    pub fn json(&self, args: &[&str]) -> Value {
        let output = self
            .td()
            .args(args)
            .arg("--json")
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&output).expect("json output")
    }
}

pub fn td_cmd() -> Command {
    let mut cmd = Command::cargo_bin("td").expect("binary");
    cmd.env_remove("TD_DIR").env_remove("RUST_LOG");
    cmd
}
