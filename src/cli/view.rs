//! Read-only commands: show, ls, board, log, blocked.

use serde::Serialize;

use crate::blocked;
use crate::cli::Context;
use crate::error::{Error, Result};
use crate::model::{Board, HistoryEntry, Item};
use crate::output::{emit_success, HumanOutput};
use crate::render;
use crate::store::ItemFilter;

pub struct LsOptions {
    pub lane: Option<String>,
    pub kind: Option<String>,
    pub tag: Option<String>,
    pub assignee: Option<String>,
}

#[derive(Serialize)]
struct ItemView<'a> {
    #[serde(flatten)]
    item: &'a Item,
    blocked: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    blocked_by: Vec<&'a str>,
}

#[derive(Serialize)]
struct LaneView<'a> {
    lane: &'a str,
    items: Vec<&'a str>,
}

#[derive(Serialize)]
struct BoardView<'a> {
    board: &'a str,
    lanes: Vec<LaneView<'a>>,
    blocked: Vec<&'a str>,
}

#[derive(Serialize)]
struct LogView<'a> {
    id: &'a str,
    history: &'a [HistoryEntry],
}

pub fn run_show(ctx: &Context, id: &str) -> Result<()> {
    let doc = ctx.board.load()?;
    let item = doc
        .items
        .find(id)
        .ok_or_else(|| Error::ItemNotFound(id.to_string()))?;
    let causes = blocked::blocking_causes(item, &doc.items, &ctx.config.done_lane);

    let mut human = HumanOutput::new("");
    for line in render::item_detail(item, &causes) {
        human.push_line(line);
    }
    let view = ItemView {
        item,
        blocked: !causes.is_empty(),
        blocked_by: causes,
    };
    emit_success(ctx.output, "show", &view, &human)
}

pub fn run_ls(ctx: &Context, options: LsOptions) -> Result<()> {
    let doc = ctx.board.load()?;
    let filter = ItemFilter {
        lane: options.lane,
        kind: options.kind,
        tag: options.tag,
        assignee: options.assignee,
    };
    let done_lane = ctx.config.done_lane.as_str();

    let views: Vec<ItemView> = doc
        .items
        .filter(&filter)
        .map(|item| {
            let causes = blocked::blocking_causes(item, &doc.items, done_lane);
            ItemView {
                item,
                blocked: !causes.is_empty(),
                blocked_by: causes,
            }
        })
        .collect();

    let mut human = HumanOutput::new(format!("{} item(s)", views.len()));
    for view in &views {
        human.push_line(render::item_row(view.item, view.blocked));
    }
    emit_success(ctx.output, "ls", &views, &human)
}

pub fn run_board(ctx: &Context) -> Result<()> {
    let doc = ctx.board.load()?;
    let board: &Board = doc.primary_board();
    let done_lane = ctx.config.done_lane.as_str();
    let is_blocked = |item: &Item| blocked::is_blocked(item, &doc.items, done_lane);

    let lanes = board
        .lanes
        .iter()
        .map(|lane| LaneView {
            lane,
            items: doc
                .items
                .iter()
                .filter(|item| item.status == *lane)
                .map(|item| item.id.as_str())
                .collect(),
        })
        .collect();
    let blocked_ids = doc
        .items
        .iter()
        .filter(|item| board.has_lane(&item.status) && is_blocked(item))
        .map(|item| item.id.as_str())
        .collect();

    let mut human = HumanOutput::new(format!("Board {}", board.name));
    for line in render::board(board, &doc.items, is_blocked) {
        human.push_line(line);
    }
    let view = BoardView {
        board: &board.name,
        lanes,
        blocked: blocked_ids,
    };
    emit_success(ctx.output, "board", &view, &human)
}

pub fn run_log(ctx: &Context, id: &str) -> Result<()> {
    let doc = ctx.board.load()?;
    let item = doc
        .items
        .find(id)
        .ok_or_else(|| Error::ItemNotFound(id.to_string()))?;

    let mut human = HumanOutput::new(format!("History of {}", item.id));
    for line in render::history(item) {
        human.push_line(line);
    }
    let view = LogView {
        id: &item.id,
        history: &item.history,
    };
    emit_success(ctx.output, "log", &view, &human)
}

pub fn run_blocked(ctx: &Context) -> Result<()> {
    let doc = ctx.board.load()?;
    let entries = blocked::blocked_items(&doc.items, &ctx.config.done_lane);

    let mut human = HumanOutput::new(format!("{} blocked item(s)", entries.len()));
    for (item, causes) in &entries {
        human.push_line(format!(
            "{}  {}  blocked by: {}",
            item.id,
            item.title,
            causes.join(", ")
        ));
    }
    let views: Vec<ItemView> = entries
        .into_iter()
        .map(|(item, causes)| ItemView {
            item,
            blocked: true,
            blocked_by: causes,
        })
        .collect();
    emit_success(ctx.output, "blocked", &views, &human)
}
