mod document;
mod grocery;
mod meal;
mod week_plan;

pub use document::{Document, Meta, Settings, SCHEMA_VERSION};
pub use grocery::{GroceryItem, GroceryState};
pub use meal::{Meal, MealUpdate};
pub use week_plan::{DayAssignment, WeekPlan, Weekday, DAYS_PER_WEEK};
