//! Plain-text views of items and boards.

use crate::model::{Board, Item};

const COLUMN_WIDTH: usize = 24;
const BLOCKED_MARK: &str = "!";

/// One listing row: `KAN-3  bug  doing  Fix the thing [BLOCKED]`.
pub fn item_row(item: &Item, blocked: bool) -> String {
    let mut row = format!(
        "{:<8} {:<6} {:<9} {}",
        item.id, item.kind, item.status, item.title
    );
    if let Some(priority) = item.priority.as_deref() {
        row.push_str(&format!(" ({priority})"));
    }
    if !item.tags.is_empty() {
        row.push_str(&format!(" #{}", item.tags.join(" #")));
    }
    if blocked {
        row.push_str(" [BLOCKED]");
    }
    row
}

/// Full detail for `show`.
pub fn item_detail(item: &Item, blocked_by: &[&str]) -> Vec<String> {
    let mut lines = Vec::new();
    if blocked_by.is_empty() {
        lines.push(format!("{}  {}", item.id, item.title));
    } else {
        lines.push(format!("{}  {}  BLOCKED", item.id, item.title));
    }

    let mut fields: Vec<(&str, String)> = vec![
        ("type", item.kind.clone()),
        ("status", item.status.clone()),
    ];
    if let Some(priority) = &item.priority {
        fields.push(("priority", priority.clone()));
    }
    if let Some(assignee) = &item.assignee {
        fields.push(("assignee", assignee.clone()));
    }
    if !item.tags.is_empty() {
        fields.push(("tags", item.tags.join(", ")));
    }
    if !item.deps.is_empty() {
        fields.push(("deps", item.deps.join(", ")));
    }
    fields.push(("created", item.created.to_string()));
    fields.push(("modified", item.modified.to_string()));
    fields.push(("history", format!("{} entries", item.history.len())));

    for (key, value) in fields {
        lines.push(format!("  {:<10}{value}", format!("{key}:")));
    }
    if !blocked_by.is_empty() {
        lines.push(format!("  blocked by: {}", blocked_by.join(", ")));
    }
    if !item.desc.is_empty() {
        lines.push(String::new());
        lines.extend(item.desc.lines().map(|line| format!("  {line}")));
    }
    lines
}

/// History entries, oldest first.
pub fn history(item: &Item) -> Vec<String> {
    item.history
        .iter()
        .map(|entry| format!("{}  {}", entry.at, entry.event))
        .collect()
}

/// Side-by-side lane columns. `blocked` decides the marker for each item.
pub fn board<'a, I, F>(board: &Board, items: I, blocked: F) -> Vec<String>
where
    I: IntoIterator<Item = &'a Item>,
    F: Fn(&Item) -> bool,
{
    let mut columns: Vec<Vec<String>> = vec![Vec::new(); board.lanes.len()];
    for item in items {
        if let Some(idx) = board.lanes.iter().position(|lane| *lane == item.status) {
            let mark = if blocked(item) { BLOCKED_MARK } else { " " };
            columns[idx].push(fit(&format!("{mark}{} {}", item.id, item.title)));
        }
    }

    let header: Vec<String> = board
        .lanes
        .iter()
        .zip(&columns)
        .map(|(lane, cards)| fit(&format!("{lane} ({})", cards.len())))
        .collect();
    let rule: Vec<String> = board.lanes.iter().map(|_| "-".repeat(COLUMN_WIDTH)).collect();

    let mut lines = vec![join_row(&header), join_row(&rule)];
    let depth = columns.iter().map(Vec::len).max().unwrap_or(0);
    for row in 0..depth {
        let cells: Vec<String> = columns
            .iter()
            .map(|cards| cards.get(row).cloned().unwrap_or_else(|| fit("")))
            .collect();
        lines.push(join_row(&cells));
    }
    lines
}

fn join_row(cells: &[String]) -> String {
    cells.join(" | ").trim_end().to_string()
}

/// Pad or cut to exactly one column width, counting chars.
fn fit(text: &str) -> String {
    let count = text.chars().count();
    if count <= COLUMN_WIDTH {
        format!("{text:<width$}", width = COLUMN_WIDTH)
    } else {
        let mut cut: String = text.chars().take(COLUMN_WIDTH - 1).collect();
        cut.push('~');
        cut
    }
}
