//! Todo list edits.
//!
//! Item ids are assigned once, when the item is added, and never change. All
//! lookups go through the id so that reordering or retexting an item cannot make
//! an edit land on the wrong row.

use uuid::Uuid;

use crate::model::{TodoData, TodoItem};

impl TodoData {
    /// Appends a new unchecked item. Blank input (after trimming) is ignored.
    pub fn add_item(&self, text: &str) -> TodoData {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return self.clone();
        }

        let mut items = self.items.clone();
        items.push(TodoItem {
            id: Uuid::new_v4().to_string(),
            text: trimmed.to_string(),
            done: false,
        });
        TodoData { items }
    }

    pub fn toggle_item(&self, id: &str) -> TodoData {
        self.map_item(id, |item| TodoItem {
            done: !item.done,
            ..item.clone()
        })
    }

    /// Retexts an item. Unlike [`TodoData::add_item`] the text is stored as typed.
    pub fn set_item_text(&self, id: &str, text: &str) -> TodoData {
        self.map_item(id, |item| TodoItem {
            text: text.to_string(),
            ..item.clone()
        })
    }

    pub fn remove_item(&self, id: &str) -> TodoData {
        TodoData {
            items: self
                .items
                .iter()
                .filter(|item| item.id != id)
                .cloned()
                .collect(),
        }
    }

    pub fn item(&self, id: &str) -> Option<&TodoItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Resolves a user-facing item reference: a 1-based position or an id.
    pub fn resolve_item(&self, reference: &str) -> Option<&TodoItem> {
        if let Ok(n) = reference.parse::<usize>() {
            if n >= 1 {
                if let Some(item) = self.items.get(n - 1) {
                    return Some(item);
                }
            }
        }
        self.item(reference)
    }

    pub fn remaining(&self) -> usize {
        self.items.iter().filter(|item| !item.done).count()
    }

    fn map_item<F>(&self, id: &str, f: F) -> TodoData
    where
        F: Fn(&TodoItem) -> TodoItem,
    {
        TodoData {
            items: self
                .items
                .iter()
                .map(|item| if item.id == id { f(item) } else { item.clone() })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(texts: &[&str]) -> TodoData {
        texts
            .iter()
            .fold(TodoData::default(), |acc, text| acc.add_item(text))
    }

    #[test]
    fn test_add_item_trims_and_ignores_blank() {
        let todo = list(&["  milk  ", "   ", ""]);
        assert_eq!(todo.items.len(), 1);
        assert_eq!(todo.items[0].text, "milk");
        assert!(!todo.items[0].done);
    }

    #[test]
    fn test_item_ids_are_unique() {
        let todo = list(&["a", "b", "c"]);
        let mut ids: Vec<&str> = todo.items.iter().map(|i| i.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn test_ids_are_stable_across_edits() {
        let todo = list(&["a", "b"]);
        let id = todo.items[1].id.clone();

        let edited = todo
            .toggle_item(&id)
            .set_item_text(&id, "b, but better")
            .remove_item(&todo.items[0].id);

        assert_eq!(edited.items.len(), 1);
        assert_eq!(edited.items[0].id, id);
        assert_eq!(edited.items[0].text, "b, but better");
        assert!(edited.items[0].done);
    }

    #[test]
    fn test_unknown_id_is_noop() {
        let todo = list(&["a"]);
        assert_eq!(todo.toggle_item("missing"), todo);
        assert_eq!(todo.remove_item("missing"), todo);
    }

    #[test]
    fn test_resolve_item_by_position_or_id() {
        let todo = list(&["a", "b"]);
        assert_eq!(todo.resolve_item("2").map(|i| i.text.as_str()), Some("b"));

        let id = todo.items[0].id.clone();
        assert_eq!(todo.resolve_item(&id).map(|i| i.text.as_str()), Some("a"));
        assert!(todo.resolve_item("0").is_none());
        assert!(todo.resolve_item("9").is_none());
    }

    #[test]
    fn test_remaining_counts_open_items() {
        let todo = list(&["a", "b", "c"]);
        let id = todo.items[0].id.clone();
        assert_eq!(todo.toggle_item(&id).remaining(), 2);
    }
}
