//! Meal store operations.
//!
//! Each operation borrows the current document and returns the next one;
//! the caller's document is never modified. Invalid input (a blank name on
//! add, an unknown id) returns an unchanged copy.

use crate::ids::IdSource;
use crate::models::{Document, Meal, MealUpdate};

const SAMPLE_INGREDIENTS: [&str; 3] = ["ground beef", "tortillas", "cheese"];

/// Trims each line and drops the blank ones.
pub fn clean_ingredients<I, S>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .map(|line| line.as_ref().trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}

/// Prepends a new meal. A name that is blank after trimming is a no-op.
pub fn add_meal<I, S>(
    doc: &Document,
    name: &str,
    ingredient_lines: I,
    ids: &dyn IdSource,
) -> Document
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let name = name.trim();
    if name.is_empty() {
        tracing::debug!("Ignoring meal with blank name");
        return doc.clone();
    }

    let meal =
        Meal::new(fresh_id(doc, ids), name).with_ingredients(clean_ingredients(ingredient_lines));
    tracing::debug!("Adding meal '{}' ({})", meal.name, meal.id);

    let mut next = doc.clone();
    next.meals.push_front(meal);
    next
}

/// Prepends "Sample Meal N" with a fixed ingredient list.
pub fn add_sample_meal(doc: &Document, ids: &dyn IdSource) -> Document {
    let name = format!("Sample Meal {}", doc.meals.len() + 1);
    add_meal(doc, &name, SAMPLE_INGREDIENTS, ids)
}

pub fn delete_meal(doc: &Document, id: &str) -> Document {
    let mut next = doc.clone();
    if let Some(index) = next.meals.iter().position(|m| m.id == id) {
        let removed = next.meals.remove(index);
        tracing::debug!("Deleted meal '{}' ({})", removed.name, removed.id);
    }
    next
}

/// Applies a partial update to the meal with `id`. The name is not
/// validated here; callers reject blank names first.
pub fn update_meal(doc: &Document, id: &str, update: &MealUpdate) -> Document {
    let mut next = doc.clone();
    if let Some(index) = next.meals.iter().position(|m| m.id == id) {
        let updated = update.apply_to(&next.meals[index]);
        next.meals.set(index, updated);
    }
    next
}

/// Draws ids until one is not already in the store.
fn fresh_id(doc: &Document, ids: &dyn IdSource) -> String {
    loop {
        let id = ids.next_id();
        if doc.find_meal(&id).is_none() {
            return id;
        }
        tracing::warn!("Id source returned a duplicate id {}, retrying", id);
    }
}
