use crate::db::models::ShoppingListItem;
use crate::matcher::{FavoriteSort, Filters, SearchSort};
use serde::{Deserialize, Serialize};

/// Ingredient search request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub cuisine: Option<String>,
    #[serde(default)]
    pub diet: Option<String>,
    #[serde(default)]
    pub max_time: Option<String>,
    #[serde(default)]
    pub sort: SearchSort,
}

impl SearchRequest {
    pub fn filters(&self) -> Filters {
        Filters::from_raw(
            self.cuisine.as_deref(),
            self.diet.as_deref(),
            self.max_time.as_deref(),
        )
    }
}

/// Query parameters for listing favorites
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FavoritesQuery {
    /// Text matched against title, description and cuisine
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub sort: Option<FavoriteSort>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddFavoriteRequest {
    pub recipe_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateShoppingListRequest {
    pub name: String,
    #[serde(default)]
    pub items: Vec<ShoppingListItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateShoppingListRequest {
    pub items: Vec<ShoppingListItem>,
}

/// Build a shopping list from the ingredients a recipe needs but the user lacks
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MissingIngredientsRequest {
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Acknowledgement for operations with nothing to return
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub store: String,
}
