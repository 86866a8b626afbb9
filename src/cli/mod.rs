//! Command-line interface for kan
//!
//! This module defines the CLI structure using clap derive macros.
//! Mutating commands live in `item`, read-only views in `view`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::OutputOptions;
use crate::storage::BoardFile;

mod item;
mod view;

/// kan - a kanban board in a text file
///
/// Tracks tasks, bugs and stories across lanes in one diff-friendly file.
#[derive(Parser, Debug)]
#[command(name = "kan")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true, arg_required_else_help = true)]
pub struct Cli {
    /// Board file (defaults to `file` from .kan.toml, else ./kanban.toml)
    #[arg(long, global = true, env = "KAN_FILE")]
    pub file: Option<PathBuf>,

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
    /// Create an item
    Add {
        /// Item type (task, bug, story, ...)
        #[arg(value_name = "TYPE")]
        kind: String,

        /// Item title
        title: String,

        /// Tag to attach (repeatable)
        #[arg(long = "tag", value_name = "TAG")]
        tags: Vec<String>,

        /// Priority token
        #[arg(long)]
        priority: Option<String>,

        /// Starting lane (defaults to the first lane)
        #[arg(long)]
        lane: Option<String>,

        /// Description
        #[arg(long)]
        desc: Option<String>,

        /// Owner
        #[arg(long)]
        assignee: Option<String>,

        /// Comma-separated ids this item depends on
        #[arg(long, value_delimiter = ',', value_name = "IDS")]
        deps: Vec<String>,
    },

    /// Move an item to another lane
    Move {
        /// Item id
        id: String,

        /// Target lane
        lane: String,
    },

    /// Show an item in full, including its blocked state
    Show {
        /// Item id
        id: String,
    },

    /// Change selected fields of an item
    Edit {
        /// Item id
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        desc: Option<String>,

        /// Owner (empty to clear)
        #[arg(long)]
        assignee: Option<String>,

        /// Priority (empty to clear)
        #[arg(long)]
        priority: Option<String>,

        /// Item type
        #[arg(long = "type", value_name = "TYPE")]
        kind: Option<String>,

        /// Comma-separated tags, replacing the current ones
        #[arg(long, value_delimiter = ',', value_name = "TAGS")]
        tags: Option<Vec<String>>,

        /// Comma-separated dependency ids, replacing the current ones
        #[arg(long, value_delimiter = ',', value_name = "IDS")]
        deps: Option<Vec<String>>,
    },

    /// List items; filters combine
    Ls {
        #[arg(long)]
        lane: Option<String>,

        #[arg(long = "type", value_name = "TYPE")]
        kind: Option<String>,

        #[arg(long)]
        tag: Option<String>,

        #[arg(long)]
        assignee: Option<String>,
    },

    /// Show the board as lane columns
    Board,

    /// Show an item's history
    Log {
        /// Item id
        id: String,
    },

    /// Archive an item
    Archive {
        /// Item id
        id: String,
    },

    /// List blocked items and what blocks them
    Blocked,

    #[command(external_subcommand)]
    External(Vec<String>),
}

/// Everything a command needs: settings plus the resolved board file.
#[derive(Debug, Clone)]
pub struct Context {
    pub config: Config,
    pub board: BoardFile,
    pub output: OutputOptions,
}

impl Context {
    /// Resolve config and board path from the working directory.
    pub fn load(file: Option<PathBuf>, output: OutputOptions) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        let config = Config::load_from_dir(&cwd)?;
        let path = file.unwrap_or_else(|| config.board_path(&cwd));
        let board = BoardFile::new(path).with_lock_timeout(config.lock_timeout_ms);
        Ok(Self {
            config,
            board,
            output,
        })
    }
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        if let Commands::External(args) = &self.command {
            let name = args.first().cloned().unwrap_or_default();
            return Err(Error::UnknownCommand(name));
        }

        let output = OutputOptions {
            json: self.json,
            quiet: self.quiet,
        };
        let ctx = Context::load(self.file, output)?;

        match self.command {
            Commands::Add {
                kind,
                title,
                tags,
                priority,
                lane,
                desc,
                assignee,
                deps,
            } => item::run_add(
                &ctx,
                item::AddOptions {
                    kind,
                    title,
                    tags,
                    priority,
                    lane,
                    desc,
                    assignee,
                    deps,
                },
            ),
            Commands::Move { id, lane } => item::run_move(&ctx, &id, &lane),
            Commands::Edit {
                id,
                title,
                desc,
                assignee,
                priority,
                kind,
                tags,
                deps,
            } => item::run_edit(
                &ctx,
                &id,
                item::EditOptions {
                    title,
                    desc,
                    assignee,
                    priority,
                    kind,
                    tags,
                    deps,
                },
            ),
            Commands::Archive { id } => item::run_archive(&ctx, &id),
            Commands::Show { id } => view::run_show(&ctx, &id),
            Commands::Ls {
                lane,
                kind,
                tag,
                assignee,
            } => view::run_ls(
                &ctx,
                view::LsOptions {
                    lane,
                    kind,
                    tag,
                    assignee,
                },
            ),
            Commands::Board => view::run_board(&ctx),
            Commands::Log { id } => view::run_log(&ctx, &id),
            Commands::Blocked => view::run_blocked(&ctx),
            Commands::External(_) => Ok(()),
        }
    }
}
