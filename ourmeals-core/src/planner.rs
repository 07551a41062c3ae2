//! Week plan generation.
//!
//! Meal ids are shuffled uniformly and laid out Mon..Sun. With fewer than
//! seven meals the shuffled order is cycled, so every meal is used once
//! before any meal is used a second time.
//!
//! `settings.avoid_repeats` is not consulted.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{Document, Meal, WeekPlan, Weekday, DAYS_PER_WEEK};

/// A plan slot joined with the meal it points at.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedDay<'a> {
    pub label: Weekday,
    pub meal_id: &'a str,
    /// `None` when the meal was deleted after the plan was generated.
    pub meal: Option<&'a Meal>,
}

/// Picks seven ids from `ids` in shuffled order, cycling when there are
/// fewer than seven. Returns an empty list for no ids.
pub fn pick_week<R: Rng + ?Sized>(ids: &[String], rng: &mut R) -> Vec<String> {
    let mut order = ids.to_vec();
    order.shuffle(rng);
    order.into_iter().cycle().take(DAYS_PER_WEEK).collect()
}

/// Replaces the week plan. With no meals the document is returned
/// unchanged, keeping any existing plan.
pub fn generate_week_plan<R: Rng + ?Sized>(doc: &Document, rng: &mut R) -> Document {
    if doc.meals.is_empty() {
        tracing::debug!("No meals to plan with");
        return doc.clone();
    }

    let ids: Vec<String> = doc.meals.iter().map(|m| m.id.clone()).collect();
    let plan = WeekPlan::from_meal_ids(pick_week(&ids, rng));
    tracing::debug!("Generated week plan from {} meal(s)", ids.len());

    let mut next = doc.clone();
    next.week_plan = Some(plan);
    next
}

pub fn clear_week_plan(doc: &Document) -> Document {
    let mut next = doc.clone();
    next.week_plan = None;
    next
}

/// Resolves each day of a complete plan against the meal store.
pub fn resolve_week(doc: &Document) -> Option<Vec<PlannedDay<'_>>> {
    let plan = doc.complete_week_plan()?;
    let days = plan
        .days
        .iter()
        .map(|day| PlannedDay {
            label: day.label,
            meal_id: day.meal_id.as_str(),
            meal: doc.resolve_day(day),
        })
        .collect();
    Some(days)
}
