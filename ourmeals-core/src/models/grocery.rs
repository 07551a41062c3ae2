//! Grocery list state.
//!
//! The list is derived from a week plan and replaced wholesale on every
//! regeneration. Items can be checked off as they are purchased.

use chrono::{DateTime, Utc};
use im::Vector;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A line on the grocery list, already formatted for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GroceryItem {
    pub text: String,
    pub checked: bool,
}

impl GroceryItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            checked: false,
        }
    }
}

impl fmt::Display for GroceryItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let check = if self.checked { "[x]" } else { "[ ]" };
        write!(f, "{} {}", check, self.text)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GroceryState {
    pub items: Vector<GroceryItem>,
    #[serde(default, with = "crate::timestamp::option")]
    pub generated_at: Option<DateTime<Utc>>,
}

impl GroceryState {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn checked_count(&self) -> usize {
        self.items.iter().filter(|i| i.checked).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grocery_item_new_is_unchecked() {
        let item = GroceryItem::new("Eggs");
        assert_eq!(item.text, "Eggs");
        assert!(!item.checked);
    }

    #[test]
    fn test_grocery_item_display() {
        let mut item = GroceryItem::new("Cheese (x5)");
        assert_eq!(format!("{}", item), "[ ] Cheese (x5)");
        item.checked = true;
        assert_eq!(format!("{}", item), "[x] Cheese (x5)");
    }

    #[test]
    fn test_checked_count() {
        let mut state = GroceryState::default();
        state.items.push_back(GroceryItem::new("Eggs"));
        state.items.push_back(GroceryItem {
            text: "Milk".to_string(),
            checked: true,
        });
        assert_eq!(state.checked_count(), 1);
        assert!(!state.is_empty());
    }

    #[test]
    fn test_empty_state_json() {
        let json = serde_json::to_value(GroceryState::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"items": [], "generatedAt": null})
        );
    }
}
