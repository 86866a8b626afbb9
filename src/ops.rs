//! Item mutations: create, move, edit, archive.
//!
//! Each operation changes at most one item, appends exactly one history
//! entry to it and bumps its `modified` date. Lookup and validation failures
//! leave the document untouched, so callers can simply skip the save.

use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::id;
use crate::model::{Document, Item, ARCHIVED, DEFAULT_TYPE};

/// Parameters for a new item.
#[derive(Debug, Clone, Default)]
pub struct NewItem {
    pub kind: Option<String>,
    pub title: String,
    pub tags: Vec<String>,
    pub priority: Option<String>,
    pub lane: Option<String>,
    pub desc: Option<String>,
    pub assignee: Option<String>,
    pub deps: Vec<String>,
}

/// Partial update; `None` leaves the field as it is.
///
/// For `assignee` and `priority`, `Some("")` clears the field.
#[derive(Debug, Clone, Default)]
pub struct ItemEdit {
    pub title: Option<String>,
    pub kind: Option<String>,
    pub desc: Option<String>,
    pub assignee: Option<String>,
    pub priority: Option<String>,
    pub tags: Option<Vec<String>>,
    pub deps: Option<Vec<String>>,
}

impl ItemEdit {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.kind.is_none()
            && self.desc.is_none()
            && self.assignee.is_none()
            && self.priority.is_none()
            && self.tags.is_none()
            && self.deps.is_none()
    }
}

/// Create an item with the next free id and append it to the store.
pub fn create<'a>(
    doc: &'a mut Document,
    prefix: &str,
    new: NewItem,
    today: NaiveDate,
) -> Result<&'a Item> {
    let title = required_text("title", &new.title)?;
    let kind = match new.kind.as_deref() {
        Some(kind) => required_text("type", kind)?,
        None => DEFAULT_TYPE.to_string(),
    };
    let status = match new.lane.as_deref() {
        Some(lane) => lane_of(doc, lane)?,
        None => doc.primary_board().first_lane().to_string(),
    };

    let id = id::next_id(prefix, doc.items.ids())?;
    let mut item = Item::new(id, title, status, today);
    item.kind = kind;
    item.tags = normalize_list(new.tags);
    item.deps = normalize_list(new.deps);
    item.desc = new.desc.unwrap_or_default();
    item.assignee = optional_text(new.assignee);
    item.priority = optional_text(new.priority);
    item.record(today, "created");

    Ok(doc.items.append(item))
}

/// Move an item to another lane of the primary board.
///
/// Archived items stay archived.
pub fn move_item<'a>(
    doc: &'a mut Document,
    id: &str,
    lane: &str,
    today: NaiveDate,
) -> Result<&'a Item> {
    let lane = lane_of(doc, lane)?;
    match doc.items.find(id) {
        None => return Err(Error::ItemNotFound(id.to_string())),
        Some(item) if item.is_archived() => {
            return Err(Error::InvalidArgument(format!(
                "{id} is archived and cannot be moved"
            )))
        }
        Some(_) => {}
    }
    doc.items
        .update(id, |item| {
            let event = format!("{} -> {}", item.status, lane);
            item.status = lane;
            item.record(today, event);
        })
        .ok_or_else(|| Error::ItemNotFound(id.to_string()))
}

/// Apply a partial update; at least one field must be supplied.
pub fn edit<'a>(
    doc: &'a mut Document,
    id: &str,
    edit: ItemEdit,
    today: NaiveDate,
) -> Result<&'a Item> {
    if edit.is_empty() {
        return Err(Error::InvalidArgument(
            "edit needs at least one field to change".to_string(),
        ));
    }
    let title = edit
        .title
        .as_deref()
        .map(|title| required_text("title", title))
        .transpose()?;
    let kind = edit
        .kind
        .as_deref()
        .map(|kind| required_text("type", kind))
        .transpose()?;

    doc.items
        .update(id, |item| {
            if let Some(title) = title {
                item.title = title;
            }
            if let Some(kind) = kind {
                item.kind = kind;
            }
            if let Some(desc) = edit.desc {
                item.desc = desc;
            }
            if let Some(assignee) = edit.assignee {
                item.assignee = optional_text(Some(assignee));
            }
            if let Some(priority) = edit.priority {
                item.priority = optional_text(Some(priority));
            }
            if let Some(tags) = edit.tags {
                item.tags = normalize_list(tags);
            }
            if let Some(deps) = edit.deps {
                item.deps = normalize_list(deps);
            }
            item.record(today, "edited");
        })
        .ok_or_else(|| Error::ItemNotFound(id.to_string()))
}

/// Park an item in the archived state, whatever its current lane.
pub fn archive<'a>(doc: &'a mut Document, id: &str, today: NaiveDate) -> Result<&'a Item> {
    doc.items
        .update(id, |item| {
            item.status = ARCHIVED.to_string();
            item.record(today, "archived");
        })
        .ok_or_else(|| Error::ItemNotFound(id.to_string()))
}

fn lane_of(doc: &Document, lane: &str) -> Result<String> {
    let lane = lane.trim();
    let board = doc.primary_board();
    if board.has_lane(lane) {
        Ok(lane.to_string())
    } else {
        Err(Error::UnknownLane {
            lane: lane.to_string(),
            lanes: board.lanes.join(", "),
        })
    }
}

fn required_text(field: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::InvalidArgument(format!("{field} cannot be empty")));
    }
    Ok(value.to_string())
}

fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Trim entries, drop blanks and duplicates, keep first-seen order.
fn normalize_list(values: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        let value = value.trim();
        if value.is_empty() || out.iter().any(|seen| seen == value) {
            continue;
        }
        out.push(value.to_string());
    }
    out
}
