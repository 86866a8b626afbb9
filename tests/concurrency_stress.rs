mod support;

use std::collections::HashSet;
use std::path::PathBuf;
use std::process::Command;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use assert_cmd::cargo::cargo_bin;
use kan::error::Error;
use kan::lock::{lock_path_for, FileLock};
use kan::storage::BoardFile;
use predicates::str::contains;
use tempfile::TempDir;

use support::TestBoard;

const READY_POLL_INTERVAL: Duration = Duration::from_millis(25);
const READY_TIMEOUT: Duration = Duration::from_secs(2);

fn kan_bin() -> PathBuf {
    cargo_bin("kan")
}

#[test]
fn lock_helper_process() {
    if std::env::var("KAN_LOCK_HELPER").ok().as_deref() != Some("1") {
        return;
    }

    let path = std::env::var("KAN_LOCK_PATH").expect("KAN_LOCK_PATH");
    let ready = std::env::var("KAN_LOCK_READY").expect("KAN_LOCK_READY");

    let _lock = FileLock::acquire(&path, 5000).expect("lock helper acquire");
    std::fs::write(&ready, "ready").expect("ready write");
    thread::sleep(Duration::from_secs(2));
}

fn spawn_lock_holder(
    lock_path: &std::path::Path,
    ready_path: &std::path::Path,
) -> Result<std::process::Child, Box<dyn std::error::Error>> {
    let mut child = Command::new(std::env::current_exe()?)
        .args(["--exact", "lock_helper_process", "--nocapture"])
        .env("KAN_LOCK_HELPER", "1")
        .env("KAN_LOCK_PATH", lock_path.display().to_string())
        .env("KAN_LOCK_READY", ready_path.display().to_string())
        .spawn()?;

    let start = Instant::now();
    while !ready_path.exists() {
        if start.elapsed() > READY_TIMEOUT {
            let _ = child.kill();
            return Err("lock helper not ready".into());
        }
        thread::sleep(READY_POLL_INTERVAL);
    }
    Ok(child)
}

#[test]
fn board_lock_times_out_when_held_by_other_process() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let board_path = dir.path().join("kanban.toml");
    std::fs::write(&board_path, "format = 1\n")?;
    let ready_path = dir.path().join("ready");
    let mut child = spawn_lock_holder(&lock_path_for(&board_path), &ready_path)?;

    let board = BoardFile::new(&board_path).with_lock_timeout(100);
    match board.load() {
        Ok(_) => return Err("expected lock timeout".into()),
        Err(err) => assert!(matches!(err, Error::LockFailed(_))),
    }

    child.wait()?;
    Ok(())
}

#[test]
fn cli_reports_lock_contention_as_operation_failure() -> Result<(), Box<dyn std::error::Error>> {
    let board = TestBoard::new();
    board.write_config("lock_timeout_ms = 100\n");
    let ready_path = board.path().join("ready");
    let mut child = spawn_lock_holder(&lock_path_for(&board.board_path()), &ready_path)?;

    board
        .kan()
        .args(["add", "task", "blocked by the lock"])
        .assert()
        .code(4)
        .stderr(contains("Lock acquisition failed"));

    child.wait()?;
    assert!(!board.board_exists());
    Ok(())
}

#[test]
fn parallel_adds_get_unique_ids() -> Result<(), Box<dyn std::error::Error>> {
    let board = TestBoard::new();
    let dir = board.path().to_path_buf();
    let bin = Arc::new(kan_bin());
    let count = 8;

    let mut handles = Vec::new();
    for idx in 0..count {
        let dir = dir.clone();
        let bin = Arc::clone(&bin);
        handles.push(thread::spawn(move || {
            Command::new(bin.as_ref())
                .current_dir(&dir)
                .env_remove("KAN_FILE")
                .args(["add", "task", &format!("parallel {idx}")])
                .status()
        }));
    }

    for handle in handles {
        let status = handle.join().expect("join thread")?;
        assert!(status.success());
    }

    let doc = BoardFile::new(board.board_path()).load()?;
    assert_eq!(doc.items.len(), count);

    let ids: HashSet<&str> = doc.items.ids().collect();
    for n in 1..=count {
        assert!(ids.contains(format!("KAN-{n}").as_str()), "missing KAN-{n}");
    }
    let titles: HashSet<&str> = doc.items.iter().map(|item| item.title.as_str()).collect();
    for idx in 0..count {
        assert!(titles.contains(format!("parallel {idx}").as_str()));
    }

    Ok(())
}

#[test]
fn parallel_moves_keep_every_history_entry() -> Result<(), Box<dyn std::error::Error>> {
    let board = TestBoard::new();
    let count = 4;
    for idx in 0..count {
        board.run(&["add", "task", &format!("item {idx}")]);
    }

    let dir = board.path().to_path_buf();
    let bin = Arc::new(kan_bin());
    let mut handles = Vec::new();
    for n in 1..=count {
        let dir = dir.clone();
        let bin = Arc::clone(&bin);
        handles.push(thread::spawn(move || {
            Command::new(bin.as_ref())
                .current_dir(&dir)
                .env_remove("KAN_FILE")
                .args(["move", &format!("KAN-{n}"), "doing"])
                .status()
        }));
    }
    for handle in handles {
        let status = handle.join().expect("join thread")?;
        assert!(status.success());
    }

    let doc = BoardFile::new(board.board_path()).load()?;
    for item in doc.items.iter() {
        assert_eq!(item.status, "doing");
        assert_eq!(item.history.len(), 2);
    }
    Ok(())
}
