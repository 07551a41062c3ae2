//! Schema coercion for persisted documents.
//!
//! Whatever was stored under the storage key (older versions, partial
//! writes, hand edits, garbage) is rebuilt field by field into a valid
//! [`Document`]. Coercion never fails and is idempotent: coercing the
//! serialized output of a coercion yields the same document.
//!
//! Only shallow repair happens here. A week plan with the wrong number of
//! days is kept as-is; consumers treat it as "no plan".

use chrono::{DateTime, Utc};
use im::Vector;
use serde_json::{Map, Value};
use std::collections::HashSet;

use crate::models::{
    DayAssignment, Document, GroceryItem, GroceryState, Meal, Meta, Settings, WeekPlan, Weekday,
    SCHEMA_VERSION,
};
use crate::timestamp;

/// Builds a valid document from an arbitrary JSON value.
pub fn coerce(value: &Value, now: DateTime<Utc>) -> Document {
    let Some(obj) = value.as_object() else {
        tracing::debug!("stored state is not an object, starting fresh");
        return Document::new(now);
    };

    Document {
        version: SCHEMA_VERSION,
        meals: coerce_meals(obj.get("meals")),
        week_plan: obj.get("weekPlan").and_then(coerce_week_plan),
        grocery: coerce_grocery(obj.get("grocery"), obj.get("groceryList")),
        settings: coerce_settings(obj.get("settings")),
        meta: coerce_meta(obj.get("meta"), now),
    }
}

/// Parses a raw stored blob. Missing or unparseable input yields a fresh
/// document.
pub fn load_document(raw: Option<&str>, now: DateTime<Utc>) -> Document {
    let Some(raw) = raw else {
        return Document::new(now);
    };

    match serde_json::from_str::<Value>(raw) {
        Ok(value) => coerce(&value, now),
        Err(e) => {
            tracing::warn!("Discarding unreadable stored state: {}", e);
            Document::new(now)
        }
    }
}

fn coerce_meals(value: Option<&Value>) -> Vector<Meal> {
    let Some(Value::Array(entries)) = value else {
        return Vector::new();
    };

    let mut seen = HashSet::new();
    entries
        .iter()
        .filter_map(coerce_meal)
        .filter(|meal| seen.insert(meal.id.clone()))
        .collect()
}

fn coerce_meal(value: &Value) -> Option<Meal> {
    let obj = value.as_object()?;
    let id = obj.get("id")?.as_str()?;
    let name = obj.get("name")?.as_str()?;

    Some(Meal::new(id, name).with_ingredients(strings(obj.get("ingredients"))))
}

fn coerce_week_plan(value: &Value) -> Option<WeekPlan> {
    let obj = value.as_object()?;
    let days = match obj.get("days") {
        Some(Value::Array(entries)) => entries.iter().filter_map(coerce_day).collect(),
        _ => Vec::new(),
    };
    Some(WeekPlan { days })
}

fn coerce_day(value: &Value) -> Option<DayAssignment> {
    let obj = value.as_object()?;
    let label: Weekday = obj.get("label")?.as_str()?.parse().ok()?;
    let meal_id = obj.get("mealId")?.as_str()?;

    Some(DayAssignment {
        label,
        meal_id: meal_id.to_string(),
    })
}

fn coerce_grocery(grocery: Option<&Value>, legacy_list: Option<&Value>) -> GroceryState {
    match grocery.and_then(Value::as_object) {
        Some(obj) => GroceryState {
            items: coerce_grocery_items(obj.get("items")),
            generated_at: obj.get("generatedAt").and_then(parse_timestamp),
        },
        // v1 documents kept a bare `groceryList` array at the top level
        None => GroceryState {
            items: coerce_grocery_items(legacy_list),
            generated_at: None,
        },
    }
}

fn coerce_grocery_items(value: Option<&Value>) -> Vector<GroceryItem> {
    let Some(Value::Array(entries)) = value else {
        return Vector::new();
    };
    entries.iter().filter_map(coerce_grocery_item).collect()
}

fn coerce_grocery_item(value: &Value) -> Option<GroceryItem> {
    match value {
        Value::String(text) => Some(GroceryItem::new(text.as_str())),
        Value::Object(obj) => {
            let text = obj.get("text")?.as_str()?;
            let checked = obj.get("checked").and_then(Value::as_bool).unwrap_or(false);
            Some(GroceryItem {
                text: text.to_string(),
                checked,
            })
        }
        _ => None,
    }
}

fn coerce_settings(value: Option<&Value>) -> Settings {
    let defaults = Settings::default();
    let Some(obj) = value.and_then(Value::as_object) else {
        return defaults;
    };

    Settings {
        avoid_repeats: obj
            .get("avoidRepeats")
            .and_then(Value::as_bool)
            .unwrap_or(defaults.avoid_repeats),
    }
}

fn coerce_meta(value: Option<&Value>, now: DateTime<Utc>) -> Meta {
    let empty = Map::new();
    let obj = value.and_then(Value::as_object).unwrap_or(&empty);

    Meta {
        created_at: obj
            .get("createdAt")
            .and_then(parse_timestamp)
            .unwrap_or(now),
        updated_at: obj
            .get("updatedAt")
            .and_then(parse_timestamp)
            .unwrap_or(now),
    }
}

fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    timestamp::parse(value.as_str()?)
}

fn strings(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(entries)) => entries
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}
