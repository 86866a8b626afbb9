#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

pub const BOARD_FILE: &str = "kanban.toml";

/// A scratch directory holding one board file and optional `.kan.toml`.
pub struct TestBoard {
    dir: TempDir,
}

impl TestBoard {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn board_path(&self) -> PathBuf {
        self.dir.path().join(BOARD_FILE)
    }

    pub fn write_file(&self, rel_path: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent");
        }
        fs::write(&path, contents).expect("write file");
        path
    }

    pub fn write_board(&self, contents: &str) -> PathBuf {
        self.write_file(BOARD_FILE, contents)
    }

    pub fn write_config(&self, contents: &str) -> PathBuf {
        self.write_file(".kan.toml", contents)
    }

    pub fn read_board(&self) -> String {
        fs::read_to_string(self.board_path()).expect("read board")
    }

    pub fn board_exists(&self) -> bool {
        self.board_path().exists()
    }

    /// Names of everything in the scratch directory, sorted.
    pub fn entries(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.path())
            .expect("read dir")
            .map(|entry| {
                entry
                    .expect("dir entry")
                    .file_name()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        names.sort();
        names
    }

    /// `kan` running in the board directory with a clean environment.
    pub fn kan(&self) -> Command {
        let mut cmd = Command::cargo_bin("kan").expect("binary");
        cmd.current_dir(self.path())
            .env_remove("KAN_FILE")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Run a command that must succeed and return its stdout.
    pub fn run(&self, args: &[&str]) -> String {
        let output = self.kan().args(args).output().expect("run kan");
        assert!(
            output.status.success(),
            "kan {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout).expect("utf8 stdout")
    }

    /// Run with `--json` and return the `data` member of the envelope.
    pub fn run_json(&self, args: &[&str]) -> serde_json::Value {
        let mut full = vec!["--json"];
        full.extend_from_slice(args);
        let stdout = self.run(&full);
        let value: serde_json::Value = serde_json::from_str(&stdout).expect("json output");
        assert_eq!(value["status"], "success");
        value["data"].clone()
    }
}
