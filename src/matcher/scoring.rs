//! Ingredient overlap scoring.
//!
//! A recipe ingredient is satisfied by a user ingredient when either name is a
//! case-insensitive substring of the other ("chicken" satisfies "chicken
//! breast", "cherry tomatoes" satisfies "tomatoes"). Only required ingredients
//! count towards the score.

use crate::db::models::{Recipe, ShoppingListItem};
use serde::Serialize;

/// User ingredients lowercased once per search. Entries are kept verbatim,
/// so an empty string satisfies every ingredient.
#[derive(Debug, Clone, Default)]
pub struct Pantry {
    items: Vec<String>,
}

impl Pantry {
    pub fn new<S: AsRef<str>>(ingredients: &[S]) -> Self {
        let items = ingredients
            .iter()
            .map(|ing| ing.as_ref().to_lowercase())
            .collect();
        Self { items }
    }

    /// Whether any pantry item satisfies the recipe ingredient `name`
    pub fn satisfies(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.items
            .iter()
            .any(|have| name.contains(have.as_str()) || have.contains(name.as_str()))
    }
}

/// How well a pantry covers one recipe
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchScore {
    pub matched: usize,
    pub required: usize,
}

impl MatchScore {
    pub fn compute(recipe: &Recipe, pantry: &Pantry) -> Self {
        let mut required = 0;
        let mut matched = 0;
        for ingredient in recipe.required_ingredients() {
            required += 1;
            if pantry.satisfies(&ingredient.name) {
                matched += 1;
            }
        }
        Self { matched, required }
    }

    /// Fraction of required ingredients covered; 0 for recipes with no
    /// required ingredients
    pub fn ratio(&self) -> f64 {
        if self.required == 0 {
            return 0.0;
        }
        self.matched as f64 / self.required as f64
    }

    pub fn is_match(&self) -> bool {
        self.ratio() > 0.0
    }
}

/// Ingredients (required or optional) the pantry does not cover, in recipe
/// order, ready to drop into a shopping list
pub fn missing_ingredients(recipe: &Recipe, pantry: &Pantry) -> Vec<ShoppingListItem> {
    recipe
        .ingredients
        .iter()
        .filter(|ing| !pantry.satisfies(&ing.name))
        .map(|ing| ShoppingListItem {
            ingredient: ing.name.clone(),
            amount: ing.amount.clone(),
            checked: false,
        })
        .collect()
}
