use chrono::{DateTime, Utc};
use im::Vector;
use serde::{Deserialize, Serialize};

use super::{DayAssignment, GroceryState, Meal, WeekPlan};

/// Schema version written by this library.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Kept for compatibility with older documents. The planner never reads it.
    pub avoid_repeats: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            avoid_repeats: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    #[serde(with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Meta {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            created_at: now,
            updated_at: now,
        }
    }
}

/// Root persisted state. Every mutation produces a new `Document`; the
/// meal and grocery vectors share structure with the previous one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub version: u32,
    pub meals: Vector<Meal>,
    pub week_plan: Option<WeekPlan>,
    pub grocery: GroceryState,
    pub settings: Settings,
    pub meta: Meta,
}

impl Document {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            version: SCHEMA_VERSION,
            meals: Vector::new(),
            week_plan: None,
            grocery: GroceryState::default(),
            settings: Settings::default(),
            meta: Meta::new(now),
        }
    }

    pub fn find_meal(&self, id: &str) -> Option<&Meal> {
        self.meals.iter().find(|m| m.id == id)
    }

    /// The week plan, if it has all seven days.
    pub fn complete_week_plan(&self) -> Option<&WeekPlan> {
        self.week_plan.as_ref().filter(|p| p.is_complete())
    }

    /// Looks up the meal a day points at. `None` means the meal was deleted.
    pub fn resolve_day(&self, day: &DayAssignment) -> Option<&Meal> {
        self.find_meal(&day.meal_id)
    }

    pub fn touched(&self, now: DateTime<Utc>) -> Self {
        let mut next = self.clone();
        next.meta.updated_at = now;
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 5, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_new_document() {
        let doc = Document::new(now());
        assert_eq!(doc.version, SCHEMA_VERSION);
        assert!(doc.meals.is_empty());
        assert!(doc.week_plan.is_none());
        assert!(doc.grocery.is_empty());
        assert!(doc.grocery.generated_at.is_none());
        assert!(doc.settings.avoid_repeats);
        assert_eq!(doc.meta.created_at, now());
        assert_eq!(doc.meta.updated_at, now());
    }

    #[test]
    fn test_document_json_shape() {
        let json = serde_json::to_value(Document::new(now())).unwrap();
        assert_eq!(json["version"], 1);
        assert_eq!(json["meals"], serde_json::json!([]));
        assert!(json["weekPlan"].is_null());
        assert!(json["grocery"]["generatedAt"].is_null());
        assert_eq!(json["settings"]["avoidRepeats"], true);
        assert_eq!(json["meta"]["createdAt"], "2026-01-05T09:30:00.000Z");
    }

    #[test]
    fn test_touched_leaves_original() {
        let doc = Document::new(now());
        let later = now() + chrono::Duration::minutes(5);

        let next = doc.touched(later);
        assert_eq!(next.meta.updated_at, later);
        assert_eq!(next.meta.created_at, now());
        assert_eq!(doc.meta.updated_at, now());
    }

    #[test]
    fn test_incomplete_plan_is_hidden() {
        let mut doc = Document::new(now());
        doc.week_plan = Some(WeekPlan::from_meal_ids(["a", "b", "c"]));
        assert!(doc.complete_week_plan().is_none());

        doc.week_plan = Some(WeekPlan::from_meal_ids(["a"; 7]));
        assert!(doc.complete_week_plan().is_some());
    }

    #[test]
    fn test_resolve_day_missing_meal() {
        let mut doc = Document::new(now());
        doc.meals.push_back(Meal::new("a", "Tacos"));
        let plan = WeekPlan::from_meal_ids(["a", "gone", "a", "a", "a", "a", "a"]);

        assert_eq!(doc.resolve_day(&plan.days[0]).unwrap().name, "Tacos");
        assert!(doc.resolve_day(&plan.days[1]).is_none());
    }
}
