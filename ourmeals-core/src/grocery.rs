//! Grocery list derivation.
//!
//! Ingredients from every planned day are grouped by a canonical key
//! (whitespace collapsed, trimmed, lowercased), counted across the week and
//! sorted by key using the Unicode collation algorithm. Days pointing at
//! deleted meals are skipped.

use chrono::{DateTime, Utc};
use feruca::Collator;
use std::collections::HashMap;

use crate::models::{Document, GroceryItem, GroceryState};

/// One distinct ingredient across the planned week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientTally {
    pub key: String,
    /// First trimmed spelling seen for this key.
    pub representative: String,
    pub count: usize,
}

impl IngredientTally {
    /// `"Ground BEEF (x2)"` for `"  ground BEEF "` seen twice. Only the
    /// first character of the representative changes case; the count
    /// suffix only appears above one.
    pub fn display_text(&self) -> String {
        let name = capitalize_first(&self.representative);
        if self.count > 1 {
            format!("{} (x{})", name, self.count)
        } else {
            name
        }
    }
}

pub fn canonical_key(ingredient: &str) -> String {
    ingredient
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Counts ingredients over a complete week plan, sorted by collated key.
/// Returns `None` when there is no seven-day plan.
pub fn tally_week(doc: &Document) -> Option<Vec<IngredientTally>> {
    let plan = doc.complete_week_plan()?;
    let mut tallies: HashMap<String, IngredientTally> = HashMap::new();

    for day in &plan.days {
        let Some(meal) = doc.resolve_day(day) else {
            tracing::debug!("{}: meal {} no longer exists, skipping", day.label, day.meal_id);
            continue;
        };

        for ingredient in &meal.ingredients {
            let key = canonical_key(ingredient);
            if key.is_empty() {
                continue;
            }
            tallies
                .entry(key.clone())
                .or_insert_with(|| IngredientTally {
                    key,
                    representative: ingredient.trim().to_string(),
                    count: 0,
                })
                .count += 1;
        }
    }

    let mut tallies: Vec<IngredientTally> = tallies.into_values().collect();
    sort_by_key_collation(&mut tallies);
    Some(tallies)
}

/// Keys that collate equal fall back to code point order so the result
/// never depends on hash iteration order.
fn sort_by_key_collation(tallies: &mut [IngredientTally]) {
    let mut collator = Collator::default();
    tallies.sort_by(|a, b| {
        collator
            .collate(a.key.as_str(), b.key.as_str())
            .then_with(|| a.key.cmp(&b.key))
    });
}

/// Rebuilds the grocery list from the week plan. Without a complete plan
/// the document is returned unchanged.
pub fn generate_grocery_list(doc: &Document, now: DateTime<Utc>) -> Document {
    let Some(tallies) = tally_week(doc) else {
        tracing::debug!("No complete week plan, grocery list left as is");
        return doc.clone();
    };

    let mut next = doc.clone();
    next.grocery = GroceryState {
        items: tallies
            .iter()
            .map(|t| GroceryItem::new(t.display_text()))
            .collect(),
        generated_at: Some(now),
    };
    tracing::debug!("Generated {} grocery item(s)", next.grocery.items.len());
    next
}

pub fn clear_grocery_list(doc: &Document) -> Document {
    let mut next = doc.clone();
    next.grocery = GroceryState::default();
    next
}

/// Sets the checked flag of the item at `index`. Out of range is a no-op.
pub fn toggle_grocery_item(doc: &Document, index: usize, checked: bool) -> Document {
    let mut next = doc.clone();
    match next.grocery.items.get_mut(index) {
        Some(item) => item.checked = checked,
        None => tracing::debug!("No grocery item at position {}", index),
    }
    next
}

/// Plain-text checklist, one item per line.
pub fn grocery_text(doc: &Document) -> String {
    doc.grocery
        .items
        .iter()
        .map(|item| format!("- {}\n", item))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Meal, WeekPlan};
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 5, 9, 0, 0).unwrap()
    }

    fn doc_with(meals: Vec<Meal>, plan: &[&str]) -> Document {
        let mut doc = Document::new(t0());
        for meal in meals {
            doc.meals.push_back(meal);
        }
        doc.week_plan = Some(WeekPlan::from_meal_ids(plan.iter().copied()));
        doc
    }

    fn texts(doc: &Document) -> Vec<String> {
        doc.grocery.items.iter().map(|i| i.text.clone()).collect()
    }

    #[test]
    fn test_canonical_key() {
        assert_eq!(canonical_key("  ground   BEEF \t"), "ground beef");
        assert_eq!(canonical_key("Cheese"), "cheese");
        assert_eq!(canonical_key("   "), "");
    }

    #[test]
    fn test_capitalize_first_only() {
        assert_eq!(capitalize_first("ground beef"), "Ground beef");
        assert_eq!(capitalize_first("éclair"), "Éclair");
        assert_eq!(capitalize_first(""), "");
    }

    #[test]
    fn test_tacos_and_pizza_week() {
        let doc = doc_with(
            vec![
                Meal::new("t", "Tacos").with_ingredients(["tortillas", "cheese"]),
                Meal::new("p", "Pizza").with_ingredients(["cheese"]),
            ],
            &["t", "p", "t", "p", "t", "p", "t"],
        );

        let next = generate_grocery_list(&doc, t0());
        // cheese is in both meals, so it appears on all seven days
        assert_eq!(texts(&next), vec!["Cheese (x7)", "Tortillas (x4)"]);
        assert!(next.grocery.items.iter().all(|i| !i.checked));
        assert_eq!(next.grocery.generated_at, Some(t0()));
    }

    #[test]
    fn test_messy_spelling_is_merged() {
        let doc = doc_with(
            vec![
                Meal::new("a", "Chili").with_ingredients(["  ground BEEF "]),
                Meal::new("b", "Burgers").with_ingredients(["ground   beef", "buns"]),
            ],
            &["a", "b", "b", "b", "b", "b", "b"],
        );

        let tallies = tally_week(&doc).unwrap();
        assert_eq!(tallies[0].key, "buns");
        assert_eq!(tallies[1].key, "ground beef");
        assert_eq!(tallies[1].representative, "ground BEEF");
        assert_eq!(tallies[1].count, 7);
    }

    #[test]
    fn test_ground_beef_twice() {
        let doc = doc_with(
            vec![
                Meal::new("a", "Chili").with_ingredients(["  ground BEEF "]),
                Meal::new("b", "Salad").with_ingredients(["lettuce"]),
            ],
            &["a", "a", "b", "b", "b", "b", "b"],
        );

        let next = generate_grocery_list(&doc, t0());
        assert_eq!(texts(&next), vec!["Ground BEEF (x2)", "Lettuce (x5)"]);
    }

    #[test]
    fn test_display_keeps_representative_casing() {
        let doc = doc_with(
            vec![Meal::new("a", "Wings").with_ingredients(["iPhone charger", "BBQ sauce"])],
            &["a"; 7],
        );

        let next = generate_grocery_list(&doc, t0());
        assert_eq!(texts(&next), vec!["BBQ sauce (x7)", "IPhone charger (x7)"]);
    }

    #[test]
    fn test_first_spelling_wins_for_display() {
        let doc = doc_with(
            vec![
                Meal::new("a", "Chili").with_ingredients(["ground beef"]),
                Meal::new("b", "Burgers").with_ingredients(["  Ground   BEEF "]),
            ],
            &["a", "b", "b", "b", "b", "b", "b"],
        );

        let next = generate_grocery_list(&doc, t0());
        assert_eq!(texts(&next), vec!["Ground beef (x7)"]);
    }

    #[test]
    fn test_accented_keys_sort_alphabetically() {
        let doc = doc_with(
            vec![Meal::new("a", "Dessert").with_ingredients(["zucchini", "éclair", "apple"])],
            &["a"; 7],
        );

        let next = generate_grocery_list(&doc, t0());
        assert_eq!(texts(&next), vec!["Apple (x7)", "Éclair (x7)", "Zucchini (x7)"]);
    }

    #[test]
    fn test_single_occurrence_has_no_suffix() {
        let doc = doc_with(
            vec![
                Meal::new("a", "Soup").with_ingredients(["water", "salt"]),
                Meal::new("b", "Toast").with_ingredients(["bread"]),
            ],
            &["a", "b", "b", "b", "b", "b", "b"],
        );

        let next = generate_grocery_list(&doc, t0());
        assert_eq!(texts(&next), vec!["Bread (x6)", "Salt", "Water"]);
    }

    #[test]
    fn test_counts_repeat_within_one_meal() {
        let doc = doc_with(
            vec![Meal::new("a", "Double").with_ingredients(["egg", "Egg", ""])],
            &["a"; 7],
        );

        let tallies = tally_week(&doc).unwrap();
        assert_eq!(tallies.len(), 1);
        assert_eq!(tallies[0].count, 14);
    }

    #[test]
    fn test_dangling_days_are_skipped() {
        let doc = doc_with(
            vec![Meal::new("a", "Soup").with_ingredients(["water"])],
            &["a", "gone", "gone", "a", "gone", "gone", "gone"],
        );

        let next = generate_grocery_list(&doc, t0());
        assert_eq!(texts(&next), vec!["Water (x2)"]);
    }

    #[test]
    fn test_incomplete_plan_is_noop() {
        let mut doc = doc_with(vec![Meal::new("a", "Soup").with_ingredients(["water"])], &["a", "a"]);
        doc.grocery.items.push_back(GroceryItem::new("Old item"));

        assert_eq!(generate_grocery_list(&doc, t0()), doc);

        doc.week_plan = None;
        assert_eq!(generate_grocery_list(&doc, t0()), doc);
    }

    #[test]
    fn test_regenerate_replaces_checked_items() {
        let doc = doc_with(vec![Meal::new("a", "Soup").with_ingredients(["water"])], &["a"; 7]);
        let doc = generate_grocery_list(&doc, t0());
        let doc = toggle_grocery_item(&doc, 0, true);
        assert!(doc.grocery.items[0].checked);

        let later = t0() + chrono::Duration::hours(1);
        let regenerated = generate_grocery_list(&doc, later);
        assert!(!regenerated.grocery.items[0].checked);
        assert_eq!(regenerated.grocery.generated_at, Some(later));
    }

    #[test]
    fn test_toggle_grocery_item() {
        let doc = doc_with(
            vec![Meal::new("a", "Soup").with_ingredients(["water", "salt", "leeks"])],
            &["a"; 7],
        );
        let doc = generate_grocery_list(&doc, t0());

        let toggled = toggle_grocery_item(&doc, 1, true);
        let flags: Vec<bool> = toggled.grocery.items.iter().map(|i| i.checked).collect();
        assert_eq!(flags, vec![false, true, false]);
        assert!(doc.grocery.items.iter().all(|i| !i.checked));

        let untoggled = toggle_grocery_item(&toggled, 1, false);
        assert!(untoggled.grocery.items.iter().all(|i| !i.checked));
    }

    #[test]
    fn test_toggle_out_of_range_is_noop() {
        let doc = doc_with(vec![Meal::new("a", "Soup").with_ingredients(["water"])], &["a"; 7]);
        let doc = generate_grocery_list(&doc, t0());
        assert_eq!(toggle_grocery_item(&doc, 5, true), doc);
    }

    #[test]
    fn test_clear_grocery_list() {
        let doc = doc_with(vec![Meal::new("a", "Soup").with_ingredients(["water"])], &["a"; 7]);
        let doc = generate_grocery_list(&doc, t0());

        let cleared = clear_grocery_list(&doc);
        assert!(cleared.grocery.items.is_empty());
        assert!(cleared.grocery.generated_at.is_none());
        assert_eq!(doc.grocery.items.len(), 1);
    }

    #[test]
    fn test_grocery_text() {
        let doc = doc_with(
            vec![Meal::new("a", "Soup").with_ingredients(["water", "salt"])],
            &["a"; 7],
        );
        let doc = toggle_grocery_item(&generate_grocery_list(&doc, t0()), 0, true);
        assert_eq!(grocery_text(&doc), "- [x] Salt (x7)\n- [ ] Water (x7)\n");
    }
}
