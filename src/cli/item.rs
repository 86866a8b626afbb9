//! Mutating commands: add, move, edit, archive.

use serde::Serialize;

use crate::cli::Context;
use crate::error::Result;
use crate::model::{today, Item};
use crate::ops::{self, ItemEdit, NewItem};
use crate::output::{emit_success, HumanOutput};

pub struct AddOptions {
    pub kind: String,
    pub title: String,
    pub tags: Vec<String>,
    pub priority: Option<String>,
    pub lane: Option<String>,
    pub desc: Option<String>,
    pub assignee: Option<String>,
    pub deps: Vec<String>,
}

pub struct EditOptions {
    pub title: Option<String>,
    pub desc: Option<String>,
    pub assignee: Option<String>,
    pub priority: Option<String>,
    pub kind: Option<String>,
    pub tags: Option<Vec<String>>,
    pub deps: Option<Vec<String>>,
}

#[derive(Serialize)]
struct MovedOutput<'a> {
    id: &'a str,
    from: &'a str,
    to: &'a str,
}

pub fn run_add(ctx: &Context, options: AddOptions) -> Result<()> {
    let new = NewItem {
        kind: Some(options.kind),
        title: options.title,
        tags: options.tags,
        priority: options.priority,
        lane: options.lane,
        desc: options.desc,
        assignee: options.assignee,
        deps: options.deps,
    };
    let prefix = ctx.config.id_prefix.as_str();
    let item = ctx
        .board
        .update(|doc| ops::create(doc, prefix, new.clone(), today()).cloned())?;

    let mut human = HumanOutput::new(format!("Created {}", item.id));
    human.push_summary("Type", item.kind.as_str());
    human.push_summary("Title", item.title.as_str());
    human.push_summary("Status", item.status.as_str());
    emit_success(ctx.output, "add", &item, &human)
}

pub fn run_move(ctx: &Context, id: &str, lane: &str) -> Result<()> {
    let (from, item) = ctx.board.update(|doc| {
        let from = doc.items.find(id).map(|item| item.status.clone());
        let item = ops::move_item(doc, id, lane, today())?.clone();
        Ok((from.unwrap_or_default(), item))
    })?;

    let human = HumanOutput::new(format!("Moved {}: {} -> {}", item.id, from, item.status));
    let data = MovedOutput {
        id: &item.id,
        from: &from,
        to: &item.status,
    };
    emit_success(ctx.output, "move", &data, &human)
}

pub fn run_edit(ctx: &Context, id: &str, options: EditOptions) -> Result<()> {
    let edit = ItemEdit {
        title: options.title,
        kind: options.kind,
        desc: options.desc,
        assignee: options.assignee,
        priority: options.priority,
        tags: options.tags,
        deps: options.deps,
    };
    let item = ctx
        .board
        .update(|doc| ops::edit(doc, id, edit.clone(), today()).cloned())?;

    emit_item(ctx, "edit", format!("Edited {}", item.id), &item)
}

pub fn run_archive(ctx: &Context, id: &str) -> Result<()> {
    let item = ctx
        .board
        .update(|doc| ops::archive(doc, id, today()).cloned())?;

    emit_item(ctx, "archive", format!("Archived {}", item.id), &item)
}

fn emit_item(ctx: &Context, command: &str, header: String, item: &Item) -> Result<()> {
    let mut human = HumanOutput::new(header);
    human.push_summary("Title", item.title.as_str());
    human.push_summary("Status", item.status.as_str());
    emit_success(ctx.output, command, item, &human)
}
