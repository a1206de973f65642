use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

/// Highest rating a recipe can carry (tenths of a star, so 50 = 5.0 stars)
pub const MAX_RATING: u32 = 50;

// Variants are declared easiest first; `Ord` follows that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    #[serde(rename = "Very Easy")]
    VeryEasy,
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::VeryEasy => "Very Easy",
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Very Easy" => Ok(Difficulty::VeryEasy),
            "Easy" => Ok(Difficulty::Easy),
            "Medium" => Ok(Difficulty::Medium),
            "Hard" => Ok(Difficulty::Hard),
            _ => Err(Error::Validation(format!(
                "Invalid difficulty level: {s}. Must be Very Easy, Easy, Medium, or Hard"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub amount: String,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub image: String,
    pub prep_time: u32,
    pub cook_time: u32,
    pub servings: u32,
    pub difficulty: Difficulty,
    pub cuisine: String,
    pub dietary_restrictions: Vec<String>,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<String>,
    pub rating: u32,
    pub review_count: u32,
}

impl Recipe {
    pub(crate) fn from_new(id: i64, new_recipe: NewRecipe, rating: u32, review_count: u32) -> Self {
        Self {
            id,
            title: new_recipe.title,
            description: new_recipe.description,
            image: new_recipe.image,
            prep_time: new_recipe.prep_time,
            cook_time: new_recipe.cook_time,
            servings: new_recipe.servings,
            difficulty: new_recipe.difficulty,
            cuisine: new_recipe.cuisine,
            dietary_restrictions: new_recipe.dietary_restrictions,
            ingredients: new_recipe.ingredients,
            instructions: new_recipe.instructions,
            rating,
            review_count,
        }
    }

    /// Prep plus cook time in minutes
    pub fn total_time_minutes(&self) -> u32 {
        self.prep_time.saturating_add(self.cook_time)
    }

    pub fn required_ingredients(&self) -> impl Iterator<Item = &Ingredient> {
        self.ingredients.iter().filter(|ing| ing.required)
    }

    /// Average rating in stars (42 -> 4.2)
    pub fn stars(&self) -> f32 {
        self.rating as f32 / 10.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecipe {
    pub title: String,
    pub description: String,
    pub image: String,
    pub prep_time: u32,
    pub cook_time: u32,
    pub servings: u32,
    pub difficulty: Difficulty,
    pub cuisine: String,
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    pub id: i64,
    pub user_id: String,
    pub recipe_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingListItem {
    pub ingredient: String,
    pub amount: String,
    #[serde(default)]
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingList {
    pub id: i64,
    pub user_id: String,
    pub name: String,
    pub items: Vec<ShoppingListItem>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewShoppingList {
    pub user_id: String,
    pub name: String,
    #[serde(default)]
    pub items: Vec<ShoppingListItem>,
}

// SQLite row shapes. List-valued columns are stored as JSON text.

#[derive(Debug, Clone, FromRow)]
pub struct RecipeRow {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub image: String,
    pub prep_time: i64,
    pub cook_time: i64,
    pub servings: i64,
    pub difficulty: String,
    pub cuisine: String,
    pub dietary_restrictions: String,
    pub ingredients: String,
    pub instructions: String,
    pub rating: i64,
    pub review_count: i64,
}

fn column_u32(column: &str, value: i64) -> Result<u32> {
    u32::try_from(value)
        .map_err(|_| Error::Internal(format!("Column {column} out of range: {value}")))
}

impl TryFrom<RecipeRow> for Recipe {
    type Error = Error;

    fn try_from(row: RecipeRow) -> Result<Self> {
        Ok(Recipe {
            id: row.id,
            title: row.title,
            description: row.description,
            image: row.image,
            prep_time: column_u32("prep_time", row.prep_time)?,
            cook_time: column_u32("cook_time", row.cook_time)?,
            servings: column_u32("servings", row.servings)?,
            difficulty: row.difficulty.parse()?,
            cuisine: row.cuisine,
            dietary_restrictions: serde_json::from_str(&row.dietary_restrictions)?,
            ingredients: serde_json::from_str(&row.ingredients)?,
            instructions: serde_json::from_str(&row.instructions)?,
            rating: column_u32("rating", row.rating)?,
            review_count: column_u32("review_count", row.review_count)?,
        })
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct ShoppingListRow {
    pub id: i64,
    pub user_id: String,
    pub name: String,
    pub items: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<ShoppingListRow> for ShoppingList {
    type Error = Error;

    fn try_from(row: ShoppingListRow) -> Result<Self> {
        Ok(ShoppingList {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            items: serde_json::from_str(&row.items)?,
            created_at: row.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_wire_format() {
        let json = serde_json::to_string(&Difficulty::VeryEasy).unwrap();
        assert_eq!(json, "\"Very Easy\"");

        let parsed: Difficulty = serde_json::from_str("\"Medium\"").unwrap();
        assert_eq!(parsed, Difficulty::Medium);

        assert!(serde_json::from_str::<Difficulty>("\"Impossible\"").is_err());
        assert!("Very Easy".parse::<Difficulty>().is_ok());
        assert!("very easy".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_recipe_serializes_camel_case() {
        let recipe = Recipe {
            id: 1,
            title: "Toast".to_string(),
            description: "Bread, toasted".to_string(),
            image: "https://example.com/toast.jpg".to_string(),
            prep_time: 1,
            cook_time: 3,
            servings: 1,
            difficulty: Difficulty::VeryEasy,
            cuisine: "American".to_string(),
            dietary_restrictions: vec!["vegetarian".to_string()],
            ingredients: vec![Ingredient {
                name: "bread".to_string(),
                amount: "1 slice".to_string(),
                required: true,
            }],
            instructions: vec!["Toast the bread.".to_string()],
            rating: 42,
            review_count: 7,
        };

        let value = serde_json::to_value(&recipe).unwrap();
        assert_eq!(value["prepTime"], 1);
        assert_eq!(value["dietaryRestrictions"][0], "vegetarian");
        assert_eq!(value["reviewCount"], 7);
        assert_eq!(value["difficulty"], "Very Easy");
        assert_eq!(recipe.total_time_minutes(), 4);
        assert!((recipe.stars() - 4.2).abs() < f32::EPSILON);
    }

    #[test]
    fn test_recipe_row_conversion() {
        let row = RecipeRow {
            id: 3,
            title: "Salad".to_string(),
            description: "Greens".to_string(),
            image: "https://example.com/salad.jpg".to_string(),
            prep_time: 10,
            cook_time: 0,
            servings: 2,
            difficulty: "Easy".to_string(),
            cuisine: "Greek".to_string(),
            dietary_restrictions: r#"["vegan"]"#.to_string(),
            ingredients: r#"[{"name":"lettuce","amount":"1 head","required":true}]"#.to_string(),
            instructions: r#"["Toss."]"#.to_string(),
            rating: 0,
            review_count: 0,
        };

        let recipe = Recipe::try_from(row.clone()).unwrap();
        assert_eq!(recipe.difficulty, Difficulty::Easy);
        assert_eq!(recipe.ingredients[0].name, "lettuce");

        let bad = RecipeRow {
            prep_time: -5,
            ..row
        };
        assert!(Recipe::try_from(bad).is_err());
    }
}
