//! The owner of the in-memory document.
//!
//! A `Session` loads the document once, applies each mutation in order,
//! stamps `meta.updated_at` on every change and writes the result back to
//! its store. A failed write is logged and reported through
//! [`Session::has_unsaved_changes`]; the in-memory document stays
//! authoritative until the process exits.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::clock::{Clock, SystemClock};
use crate::grocery;
use crate::ids::{IdSource, UuidIds};
use crate::models::{Document, Meal, MealUpdate};
use crate::planner;
use crate::schema::load_document;
use crate::storage::{KeyValueStore, DEFAULT_STORAGE_KEY};
use crate::store;

pub struct SessionBuilder<S> {
    store: S,
    key: String,
    clock: Box<dyn Clock>,
    ids: Box<dyn IdSource>,
    rng: Option<StdRng>,
}

impl<S: KeyValueStore> SessionBuilder<S> {
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_ids(mut self, ids: impl IdSource + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    /// Makes week plan shuffles reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Some(StdRng::seed_from_u64(seed));
        self
    }

    /// Loads the stored document (falling back to a fresh one) and writes
    /// it straight back so a first run leaves a document behind.
    pub fn open(self) -> Session<S> {
        let raw = match self.store.get(&self.key) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Failed to read stored state: {}", e);
                None
            }
        };
        let doc = load_document(raw.as_deref(), self.clock.now());

        let mut session = Session {
            store: self.store,
            key: self.key,
            clock: self.clock,
            ids: self.ids,
            rng: self.rng.unwrap_or_else(StdRng::from_os_rng),
            doc,
            unsaved: false,
        };
        session.persist();
        session
    }
}

pub struct Session<S> {
    store: S,
    key: String,
    clock: Box<dyn Clock>,
    ids: Box<dyn IdSource>,
    rng: StdRng,
    doc: Document,
    unsaved: bool,
}

impl<S: KeyValueStore> Session<S> {
    pub fn builder(store: S) -> SessionBuilder<S> {
        SessionBuilder {
            store,
            key: DEFAULT_STORAGE_KEY.to_string(),
            clock: Box::new(SystemClock),
            ids: Box::new(UuidIds),
            rng: None,
        }
    }

    /// Opens the default key with the system clock and random ids.
    pub fn open(store: S) -> Self {
        Self::builder(store).open()
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// True when the last write to the store failed.
    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }

    /// Replaces the document with `next` if it differs, stamping
    /// `updated_at` and persisting. Returns whether anything changed.
    pub fn commit(&mut self, next: Document) -> bool {
        if next == self.doc {
            return false;
        }
        self.doc = next.touched(self.clock.now());
        self.persist();
        true
    }

    /// Runs a document transformation through [`Session::commit`].
    pub fn apply<F>(&mut self, f: F) -> bool
    where
        F: FnOnce(&Document) -> Document,
    {
        let next = f(&self.doc);
        self.commit(next)
    }

    /// Drops the stored document and starts over with a fresh one.
    pub fn reset(&mut self) {
        if let Err(e) = self.store.remove(&self.key) {
            tracing::warn!("Failed to remove stored state: {}", e);
        }
        self.doc = Document::new(self.clock.now());
        self.persist();
    }

    /// Adds a meal and returns it. `None` when the name is blank.
    pub fn add_meal<I, T>(&mut self, name: &str, ingredient_lines: I) -> Option<Meal>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let next = store::add_meal(&self.doc, name, ingredient_lines, &*self.ids);
        self.commit_new_meal(next)
    }

    pub fn add_sample_meal(&mut self) -> Option<Meal> {
        let next = store::add_sample_meal(&self.doc, &*self.ids);
        self.commit_new_meal(next)
    }

    pub fn delete_meal(&mut self, id: &str) -> bool {
        self.apply(|doc| store::delete_meal(doc, id))
    }

    pub fn update_meal(&mut self, id: &str, update: &MealUpdate) -> bool {
        self.apply(|doc| store::update_meal(doc, id, update))
    }

    pub fn generate_week_plan(&mut self) -> bool {
        let next = planner::generate_week_plan(&self.doc, &mut self.rng);
        self.commit(next)
    }

    pub fn clear_week_plan(&mut self) -> bool {
        self.apply(planner::clear_week_plan)
    }

    pub fn generate_grocery_list(&mut self) -> bool {
        let now = self.clock.now();
        self.apply(|doc| grocery::generate_grocery_list(doc, now))
    }

    pub fn clear_grocery_list(&mut self) -> bool {
        self.apply(grocery::clear_grocery_list)
    }

    pub fn toggle_grocery_item(&mut self, index: usize, checked: bool) -> bool {
        self.apply(|doc| grocery::toggle_grocery_item(doc, index, checked))
    }

    fn commit_new_meal(&mut self, next: Document) -> Option<Meal> {
        if self.commit(next) {
            self.doc.meals.front().cloned()
        } else {
            None
        }
    }

    fn persist(&mut self) {
        let raw = match serde_json::to_string(&self.doc) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Failed to serialize state: {}", e);
                self.unsaved = true;
                return;
            }
        };

        match self.store.set(&self.key, &raw) {
            Ok(()) => self.unsaved = false,
            Err(e) => {
                tracing::warn!("Failed to save state, keeping changes in memory: {}", e);
                self.unsaved = true;
            }
        }
    }
}
