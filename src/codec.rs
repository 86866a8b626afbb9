//! Board file codec.
//!
//! A board file is a small, diff-friendly subset of TOML:
//!
//! ```text
//! file      := preamble record*
//! preamble  := key/value lines              (e.g. `format = 1`)
//! record    := header NEWLINE body
//! header    := "[[board]]" | "[[item]]" | any other "[name]" / "[[name]]"
//! body      := key/value lines up to the next header
//! ```
//!
//! ```text
//! format = 1
//!
//! [[board]]
//! name = "main"
//! lanes = ["backlog", "doing", "review", "done"]
//!
//! [[item]]
//! id = "KAN-1"
//! type = "task"
//! title = "Write spec"
//! status = "doing"
//! tags = ["docs"]
//! created = "2026-10-18"
//! modified = "2026-10-19"
//! history = [
//!   ["2026-10-18", "created"],
//!   ["2026-10-19", "backlog -> doing"],
//! ]
//! ```
//!
//! Every record body is parsed on its own, so one broken record never hides
//! the others. Records that fail to parse or lack `id`/`title` (items) or
//! `name`/`lanes` (boards) are skipped. Unknown headers and keys are ignored.
//! Optional fields that are empty are not written and come back as their
//! defaults on decode. Empty strings are not tokens: a blank entry in `tags`
//! or `deps` is dropped on decode, and a blank `type` or `status` falls back
//! to its default.
//!
//! Items are written in store order. Strings are always written as
//! single-line basic strings, so a value can never be mistaken for a header.

use chrono::NaiveDate;
use toml::{Table, Value};
use tracing::{debug, warn};

use crate::model::{today, Board, Document, HistoryEntry, Item, DEFAULT_TYPE};
use crate::store::ItemStore;

/// Version written to the `format` key.
pub const FORMAT_VERSION: i64 = 1;

const DATE_FORMAT: &str = "%Y-%m-%d";
const FILE_BANNER: &str = "# kan board file";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Section {
    Preamble,
    Board,
    Item,
    Other(String),
}

#[derive(Debug)]
struct Chunk {
    section: Section,
    line: usize,
    body: String,
}

/// Decode a board file, defaulting missing dates to today.
pub fn decode(text: &str) -> Document {
    decode_at(text, today())
}

/// Decode a board file, defaulting missing dates to `today`.
pub fn decode_at(text: &str, today: NaiveDate) -> Document {
    let mut board_tables = Vec::new();
    let mut item_tables = Vec::new();

    for chunk in split_chunks(text) {
        let table = match toml::from_str::<Table>(&chunk.body) {
            Ok(table) => table,
            Err(err) => {
                warn!(line = chunk.line, error = %err, "skipping unparseable record");
                continue;
            }
        };
        match chunk.section {
            Section::Preamble => check_format(&table),
            Section::Board => board_tables.push((chunk.line, table)),
            Section::Item => item_tables.push((chunk.line, table)),
            Section::Other(name) => {
                debug!(line = chunk.line, section = %name, "ignoring unknown section");
            }
        }
    }

    let boards: Vec<Board> = board_tables
        .into_iter()
        .filter_map(|(line, table)| {
            let board = board_from_table(&table);
            if board.is_none() {
                warn!(line, "skipping board without name or lanes");
            }
            board
        })
        .collect();

    // Items default to the first lane of the first board, wherever it appears.
    let default_status = boards
        .first()
        .map(|board| board.first_lane().to_string())
        .unwrap_or_else(|| Board::default().first_lane().to_string());

    let items = item_tables
        .into_iter()
        .filter_map(|(line, table)| {
            let item = item_from_table(&table, &default_status, today);
            if item.is_none() {
                warn!(line, "skipping item without id or title");
            }
            item
        })
        .collect();

    Document::new(boards, ItemStore::new(items))
}

/// Encode a document into board file text.
pub fn encode(doc: &Document) -> String {
    let mut out = String::new();
    out.push_str(FILE_BANNER);
    out.push('\n');
    out.push_str(&format!("format = {FORMAT_VERSION}\n"));

    for board in doc.boards() {
        out.push_str("\n[[board]]\n");
        push_field(&mut out, "name", &quote(&board.name));
        push_field(&mut out, "lanes", &quote_list(&board.lanes));
    }

    for item in &doc.items {
        out.push_str("\n[[item]]\n");
        push_item(&mut out, item);
    }

    out
}

fn push_item(out: &mut String, item: &Item) {
    push_field(out, "id", &quote(&item.id));
    push_field(out, "type", &quote(&item.kind));
    push_field(out, "title", &quote(&item.title));
    push_field(out, "status", &quote(&item.status));
    if !item.tags.is_empty() {
        push_field(out, "tags", &quote_list(&item.tags));
    }
    if !item.desc.is_empty() {
        push_field(out, "desc", &quote(&item.desc));
    }
    if !item.deps.is_empty() {
        push_field(out, "deps", &quote_list(&item.deps));
    }
    if let Some(assignee) = item.assignee.as_deref().filter(|value| !value.is_empty()) {
        push_field(out, "assignee", &quote(assignee));
    }
    if let Some(priority) = item.priority.as_deref().filter(|value| !value.is_empty()) {
        push_field(out, "priority", &quote(priority));
    }
    push_field(out, "created", &quote(&format_date(item.created)));
    push_field(out, "modified", &quote(&format_date(item.modified)));
    if !item.history.is_empty() {
        out.push_str("history = [\n");
        for entry in &item.history {
            out.push_str(&format!(
                "  [{}, {}],\n",
                quote(&format_date(entry.at)),
                quote(&entry.event)
            ));
        }
        out.push_str("]\n");
    }
}

fn push_field(out: &mut String, key: &str, value: &str) {
    out.push_str(key);
    out.push_str(" = ");
    out.push_str(value);
    out.push('\n');
}

/// Quote `value` as a single-line TOML basic string.
fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            ch if ch.is_control() => out.push_str(&format!("\\u{:04X}", ch as u32)),
            ch => out.push(ch),
        }
    }
    out.push('"');
    out
}

fn quote_list(values: &[String]) -> String {
    let quoted: Vec<String> = values.iter().map(|value| quote(value)).collect();
    format!("[{}]", quoted.join(", "))
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn split_chunks(text: &str) -> Vec<Chunk> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut chunks = Vec::new();
    let mut current = Chunk {
        section: Section::Preamble,
        line: 1,
        body: String::new(),
    };

    for (idx, line) in text.lines().enumerate() {
        if let Some(section) = header_section(line) {
            chunks.push(current);
            current = Chunk {
                section,
                line: idx + 1,
                body: String::new(),
            };
            continue;
        }
        current.body.push_str(line);
        current.body.push('\n');
    }
    chunks.push(current);
    chunks
}

/// Recognize a table header line. Header names are bare keys, so array
/// literals like `["2026-01-01", "x"]` never qualify.
fn header_section(line: &str) -> Option<Section> {
    let code = line.split('#').next().unwrap_or("").trim();
    let (name, array) = if let Some(inner) = code
        .strip_prefix("[[")
        .and_then(|rest| rest.strip_suffix("]]"))
    {
        (inner.trim(), true)
    } else if let Some(inner) = code.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
        (inner.trim(), false)
    } else {
        return None;
    };

    let bare = !name.is_empty()
        && name
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '_' | '-' | '.'));
    if !bare {
        return None;
    }

    Some(match (array, name) {
        (true, "board") => Section::Board,
        (true, "item") => Section::Item,
        _ => Section::Other(name.to_string()),
    })
}

fn check_format(table: &Table) {
    if let Some(Value::Integer(version)) = table.get("format") {
        if *version > FORMAT_VERSION {
            warn!(
                version,
                supported = FORMAT_VERSION,
                "board file written by a newer format; reading what is understood"
            );
        }
    }
}

fn board_from_table(table: &Table) -> Option<Board> {
    let name = token_field(table, "name")?;
    let lanes = token_list(table, "lanes");
    if lanes.is_empty() {
        return None;
    }
    Some(Board::new(name, lanes))
}

fn item_from_table(table: &Table, default_status: &str, today: NaiveDate) -> Option<Item> {
    let id = token_field(table, "id")?;
    let title = token_field(table, "title")?;

    Some(Item {
        id,
        kind: token_field(table, "type").unwrap_or_else(|| DEFAULT_TYPE.to_string()),
        title,
        status: token_field(table, "status").unwrap_or_else(|| default_status.to_string()),
        tags: token_list(table, "tags"),
        desc: token_field(table, "desc").unwrap_or_default(),
        deps: token_list(table, "deps"),
        assignee: token_field(table, "assignee"),
        priority: token_field(table, "priority"),
        created: date_field(table, "created").unwrap_or(today),
        modified: date_field(table, "modified").unwrap_or(today),
        history: history_field(table),
    })
}

/// Scalar as text. Hand-edited files may use bare numbers for tokens.
fn token(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(text) => text.clone(),
        Value::Integer(number) => number.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

fn token_field(table: &Table, key: &str) -> Option<String> {
    table.get(key).and_then(token)
}

fn token_list(table: &Table, key: &str) -> Vec<String> {
    match table.get(key) {
        Some(Value::Array(values)) => values.iter().filter_map(token).collect(),
        Some(value) => token(value).into_iter().collect(),
        None => Vec::new(),
    }
}

fn date_value(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::String(text) => {
            let text = text.trim();
            let day = text.get(..10).unwrap_or(text);
            NaiveDate::parse_from_str(day, DATE_FORMAT).ok()
        }
        Value::Datetime(datetime) => {
            let date = datetime.date?;
            NaiveDate::from_ymd_opt(
                i32::from(date.year),
                u32::from(date.month),
                u32::from(date.day),
            )
        }
        _ => None,
    }
}

fn date_field(table: &Table, key: &str) -> Option<NaiveDate> {
    table.get(key).and_then(date_value)
}

fn history_field(table: &Table) -> Vec<HistoryEntry> {
    let Some(Value::Array(entries)) = table.get("history") else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(|entry| {
            let parsed = history_entry(entry);
            if parsed.is_none() {
                warn!(entry = %entry, "skipping malformed history entry");
            }
            parsed
        })
        .collect()
}

fn history_entry(value: &Value) -> Option<HistoryEntry> {
    let (at, event) = match value {
        Value::Array(pair) if pair.len() == 2 => (&pair[0], &pair[1]),
        Value::Table(entry) => (entry.get("at")?, entry.get("event")?),
        _ => return None,
    };
    let at = date_value(at)?;
    let event = match event {
        Value::String(text) => text.clone(),
        _ => return None,
    };
    Some(HistoryEntry::new(at, event))
}
