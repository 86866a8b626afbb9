//! Derived blocked status.
//!
//! An item is blocked while any of its dependencies exists and sits outside
//! the done lane. Dependencies on unknown ids never block. Only direct
//! dependencies are considered, and nothing is cached.

use crate::model::Item;
use crate::store::ItemStore;

/// Dependencies of `item` that currently block it, in declaration order.
pub fn blocking_causes<'a>(item: &'a Item, items: &ItemStore, done_lane: &str) -> Vec<&'a str> {
    item.deps
        .iter()
        .filter(|dep| {
            items
                .find(dep)
                .is_some_and(|target| target.status != done_lane)
        })
        .map(String::as_str)
        .collect()
}

pub fn is_blocked(item: &Item, items: &ItemStore, done_lane: &str) -> bool {
    !blocking_causes(item, items, done_lane).is_empty()
}

/// Every non-archived blocked item with its causes, in store order.
pub fn blocked_items<'a>(items: &'a ItemStore, done_lane: &str) -> Vec<(&'a Item, Vec<&'a str>)> {
    items
        .iter()
        .filter(|item| !item.is_archived())
        .filter_map(|item| {
            let causes = blocking_causes(item, items, done_lane);
            (!causes.is_empty()).then_some((item, causes))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn item(id: &str, status: &str, deps: &[&str]) -> Item {
        let day = NaiveDate::from_ymd_opt(2026, 5, 1).expect("date");
        let mut item = Item::new(id, id, status, day);
        item.deps = deps.iter().map(|dep| dep.to_string()).collect();
        item
    }

    #[test]
    fn no_deps_is_never_blocked() {
        let items = ItemStore::new(vec![item("KAN-1", "doing", &[])]);
        let target = items.find("KAN-1").unwrap();
        assert!(!is_blocked(target, &items, "done"));
        assert!(blocking_causes(target, &items, "done").is_empty());
    }

    #[test]
    fn unfinished_dependency_blocks() {
        let items = ItemStore::new(vec![
            item("KAN-1", "doing", &[]),
            item("KAN-2", "backlog", &["KAN-1"]),
        ]);
        let target = items.find("KAN-2").unwrap();
        assert!(is_blocked(target, &items, "done"));
        assert_eq!(blocking_causes(target, &items, "done"), vec!["KAN-1"]);
    }

    #[test]
    fn done_dependency_unblocks() {
        let items = ItemStore::new(vec![
            item("KAN-1", "done", &[]),
            item("KAN-2", "backlog", &["KAN-1"]),
        ]);
        assert!(!is_blocked(items.find("KAN-2").unwrap(), &items, "done"));
    }

    #[test]
    fn missing_dependency_is_ignored() {
        let items = ItemStore::new(vec![item("KAN-2", "backlog", &["KAN-404"])]);
        assert!(!is_blocked(items.find("KAN-2").unwrap(), &items, "done"));
    }

    #[test]
    fn causes_keep_declaration_order() {
        let items = ItemStore::new(vec![
            item("KAN-1", "review", &[]),
            item("KAN-2", "done", &[]),
            item("KAN-3", "backlog", &[]),
            item("KAN-4", "backlog", &["KAN-3", "KAN-2", "KAN-9", "KAN-1"]),
        ]);
        let target = items.find("KAN-4").unwrap();
        assert_eq!(blocking_causes(target, &items, "done"), vec!["KAN-3", "KAN-1"]);
    }

    #[test]
    fn archived_dependency_still_blocks() {
        let items = ItemStore::new(vec![
            item("KAN-1", "archived", &[]),
            item("KAN-2", "backlog", &["KAN-1"]),
        ]);
        assert!(is_blocked(items.find("KAN-2").unwrap(), &items, "done"));
    }

    #[test]
    fn blocking_is_one_hop() {
        let items = ItemStore::new(vec![
            item("KAN-1", "doing", &[]),
            item("KAN-2", "done", &["KAN-1"]),
            item("KAN-3", "backlog", &["KAN-2"]),
        ]);
        assert!(!is_blocked(items.find("KAN-3").unwrap(), &items, "done"));
        assert!(is_blocked(items.find("KAN-2").unwrap(), &items, "done"));
    }

    #[test]
    fn blocked_flag_matches_causes() {
        let items = ItemStore::new(vec![
            item("KAN-1", "doing", &["KAN-2"]),
            item("KAN-2", "doing", &["KAN-1"]),
            item("KAN-3", "done", &["KAN-1"]),
            item("KAN-4", "backlog", &["KAN-4"]),
            item("KAN-5", "backlog", &["NOPE-1"]),
        ]);
        for target in &items {
            assert_eq!(
                is_blocked(target, &items, "done"),
                !blocking_causes(target, &items, "done").is_empty()
            );
        }
    }

    #[test]
    fn blocked_items_skips_archived() {
        let items = ItemStore::new(vec![
            item("KAN-1", "doing", &[]),
            item("KAN-2", "backlog", &["KAN-1"]),
            item("KAN-3", "archived", &["KAN-1"]),
        ]);
        let blocked = blocked_items(&items, "done");
        assert_eq!(blocked.len(), 1);
        assert_eq!(blocked[0].0.id, "KAN-2");
        assert_eq!(blocked[0].1, vec!["KAN-1"]);
    }
}
