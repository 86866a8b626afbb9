//! In-memory data model for a kanban board file.
//!
//! A [`Document`] is everything one board file holds: the board definitions
//! and the ordered item collection. Blocked status is never stored here; see
//! [`crate::blocked`].

use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::store::ItemStore;

/// Status given to archived items. Never a lane.
pub const ARCHIVED: &str = "archived";

/// Item type used when none is recorded.
pub const DEFAULT_TYPE: &str = "task";

/// Name of the board synthesized when a file defines none.
pub const DEFAULT_BOARD_NAME: &str = "main";

/// Lanes of the synthesized default board.
pub const DEFAULT_LANES: [&str; 4] = ["backlog", "doing", "review", "done"];

/// Current date in the local timezone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// One timestamped entry of an item's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub at: NaiveDate,
    pub event: String,
}

impl HistoryEntry {
    pub fn new(at: NaiveDate, event: impl Into<String>) -> Self {
        Self {
            at,
            event: event.into(),
        }
    }
}

/// A unit of work on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub status: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub desc: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub deps: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    pub created: NaiveDate,
    pub modified: NaiveDate,
    pub history: Vec<HistoryEntry>,
}

impl Item {
    /// Build an item with every optional field at its default.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        status: impl Into<String>,
        today: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            kind: DEFAULT_TYPE.to_string(),
            title: title.into(),
            status: status.into(),
            tags: Vec::new(),
            desc: String::new(),
            deps: Vec::new(),
            assignee: None,
            priority: None,
            created: today,
            modified: today,
            history: Vec::new(),
        }
    }

    pub fn is_archived(&self) -> bool {
        self.status == ARCHIVED
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|entry| entry == tag)
    }

    /// Append one history entry, then bump `modified`.
    pub fn record(&mut self, today: NaiveDate, event: impl Into<String>) {
        self.history.push(HistoryEntry::new(today, event));
        self.modified = today;
    }
}

/// A named, ordered set of lanes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    pub name: String,
    pub lanes: Vec<String>,
}

impl Board {
    pub fn new(name: impl Into<String>, lanes: Vec<String>) -> Self {
        Self {
            name: name.into(),
            lanes,
        }
    }

    pub fn has_lane(&self, lane: &str) -> bool {
        self.lanes.iter().any(|entry| entry == lane)
    }

    /// Lane new items land in when none is requested.
    pub fn first_lane(&self) -> &str {
        self.lanes
            .first()
            .map(String::as_str)
            .unwrap_or(DEFAULT_LANES[0])
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(
            DEFAULT_BOARD_NAME,
            DEFAULT_LANES.iter().map(|lane| lane.to_string()).collect(),
        )
    }
}

/// Decoded contents of one board file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Never empty; only `new` builds a document.
    boards: Vec<Board>,
    pub items: ItemStore,
}

impl Document {
    /// Build a document, synthesizing the default board if `boards` is empty.
    pub fn new(boards: Vec<Board>, items: ItemStore) -> Self {
        let boards = if boards.is_empty() {
            vec![Board::default()]
        } else {
            boards
        };
        Self { boards, items }
    }

    /// Every board, in file order.
    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    /// The board used for lane validation and board rendering.
    pub fn primary_board(&self) -> &Board {
        &self.boards[0]
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(Vec::new(), ItemStore::default())
    }
}
