//! OurMeals Core Library
//!
//! Meal store, week planner and grocery list derivation over a single
//! persisted document.

pub mod clock;
pub mod grocery;
pub mod ids;
pub mod models;
pub mod planner;
pub mod schema;
pub mod session;
pub mod storage;
pub mod store;
pub mod timestamp;

pub use clock::{Clock, FixedClock, SystemClock};
pub use grocery::{canonical_key, grocery_text, tally_week, IngredientTally};
pub use ids::{IdSource, SequentialIds, UuidIds};
pub use models::{
    DayAssignment, Document, GroceryItem, GroceryState, Meal, MealUpdate, Meta, Settings,
    WeekPlan, Weekday, DAYS_PER_WEEK, SCHEMA_VERSION,
};
pub use planner::{resolve_week, PlannedDay};
pub use schema::{coerce, load_document};
pub use session::{Session, SessionBuilder};
pub use storage::{
    is_valid_key, FileStore, KeyValueStore, MemoryStore, StorageError, DEFAULT_STORAGE_KEY,
};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
