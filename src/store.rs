//! Ordered item collection with lookup and in-place mutation by id.
//!
//! Items are kept in arrival order; nothing is ever removed.

use serde::Serialize;

use crate::model::Item;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ItemStore {
    items: Vec<Item>,
}

/// Listing filter; every set field must match (logical AND).
#[derive(Debug, Clone, Default)]
pub struct ItemFilter {
    pub lane: Option<String>,
    pub kind: Option<String>,
    pub tag: Option<String>,
    pub assignee: Option<String>,
}

impl ItemFilter {
    pub fn matches(&self, item: &Item) -> bool {
        if let Some(lane) = self.lane.as_deref() {
            if item.status != lane {
                return false;
            }
        }
        if let Some(kind) = self.kind.as_deref() {
            if item.kind != kind {
                return false;
            }
        }
        if let Some(tag) = self.tag.as_deref() {
            if !item.has_tag(tag) {
                return false;
            }
        }
        if let Some(assignee) = self.assignee.as_deref() {
            if item.assignee.as_deref() != Some(assignee) {
                return false;
            }
        }
        true
    }
}

impl ItemStore {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.id.as_str())
    }

    /// Exact-match lookup; the first match wins.
    pub fn find(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Apply `mutator` to the item with `id`, leaving every other item alone.
    ///
    /// Returns the updated item, or `None` when no item has that id.
    pub fn update<F>(&mut self, id: &str, mutator: F) -> Option<&Item>
    where
        F: FnOnce(&mut Item),
    {
        let item = self.items.iter_mut().find(|item| item.id == id)?;
        mutator(&mut *item);
        Some(&*item)
    }

    /// Add a new item after all existing ones.
    pub fn append(&mut self, item: Item) -> &Item {
        self.items.push(item);
        &self.items[self.items.len() - 1]
    }

    pub fn filter<'a>(&'a self, filter: &'a ItemFilter) -> impl Iterator<Item = &'a Item> + 'a {
        self.items.iter().filter(move |item| filter.matches(item))
    }
}

impl<'a> IntoIterator for &'a ItemStore {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
