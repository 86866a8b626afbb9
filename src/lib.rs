//! kan - a kanban board kept in one plain-text file
//!
//! Items (tasks, bugs, stories) live in lanes of a board. The whole board is
//! a single TOML-subset document meant to be diffed and hand-edited.
//!
//! # Module Organization
//!
//! - `model`: items, boards and the document that holds them
//! - `store`: ordered item collection and list filters
//! - `id`: `PREFIX-N` id allocation
//! - `blocked`: derived blocked status from dependencies
//! - `codec`: board file encoding and lenient decoding
//! - `ops`: create, move, edit and archive
//! - `storage`: locked load-mutate-save of the board file
//! - `lock`: file locking and atomic writes
//! - `config`: settings from `.kan.toml`
//! - `render`, `output`: human and JSON output
//! - `cli`: command-line interface using clap

pub mod blocked;
pub mod cli;
pub mod codec;
pub mod config;
pub mod error;
pub mod id;
pub mod lock;
pub mod model;
pub mod ops;
pub mod output;
pub mod render;
pub mod storage;
pub mod store;

pub use error::{Error, Result};
