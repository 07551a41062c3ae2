use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Meal {
    pub id: String,
    pub name: String,
    pub ingredients: Vec<String>,
}

impl Meal {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ingredients: Vec::new(),
        }
    }

    pub fn with_ingredients<I, S>(mut self, ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ingredients = ingredients.into_iter().map(Into::into).collect();
        self
    }
}

impl fmt::Display for Meal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "{}", "=".repeat(self.name.chars().count()))?;

        if self.ingredients.is_empty() {
            writeln!(f, "(no ingredients)")?;
        } else {
            writeln!(f, "Ingredients:")?;
            for ingredient in &self.ingredients {
                writeln!(f, "  - {}", ingredient)?;
            }
        }

        Ok(())
    }
}

/// Partial replacement for a meal's fields. Fields left as `None` keep
/// their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MealUpdate {
    pub name: Option<String>,
    pub ingredients: Option<Vec<String>>,
}

impl MealUpdate {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn ingredients<I, S>(mut self, ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ingredients = Some(ingredients.into_iter().map(Into::into).collect());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.ingredients.is_none()
    }

    pub(crate) fn apply_to(&self, meal: &Meal) -> Meal {
        Meal {
            id: meal.id.clone(),
            name: self.name.clone().unwrap_or_else(|| meal.name.clone()),
            ingredients: self
                .ingredients
                .clone()
                .unwrap_or_else(|| meal.ingredients.clone()),
        }
    }
}
