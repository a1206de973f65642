pub mod memory;
pub mod seed;
pub mod sqlite;

use crate::config::{Settings, StoreBackend};
use crate::db::models::{
    Favorite, NewRecipe, NewShoppingList, Recipe, ShoppingList, ShoppingListItem,
};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Owner of every recipe, favorite and shopping list.
///
/// Implementations hand out ids from per-entity counters starting at 1 and
/// never reuse them. Mutations with nothing to act on (removing an absent
/// favorite, updating or deleting an absent list) succeed without effect.
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// All recipes in insertion order
    async fn get_all_recipes(&self) -> Result<Vec<Recipe>>;

    /// Fails with `Error::NotFound` when the id is unknown
    async fn get_recipe_by_id(&self, id: i64) -> Result<Recipe>;

    /// Insert a validated recipe carrying an existing rating (seed catalogs)
    async fn import_recipe(
        &self,
        recipe: NewRecipe,
        rating: u32,
        review_count: u32,
    ) -> Result<Recipe>;

    /// Insert a new, unrated recipe
    async fn create_recipe(&self, recipe: NewRecipe) -> Result<Recipe> {
        self.import_recipe(recipe, 0, 0).await
    }

    /// Recipes favorited by the user, skipping ids no longer in the store
    async fn get_user_favorites(&self, user_id: &str) -> Result<Vec<Recipe>>;

    /// Returns the existing record when the pair is already a favorite
    async fn add_to_favorites(&self, user_id: &str, recipe_id: i64) -> Result<Favorite>;

    async fn remove_from_favorites(&self, user_id: &str, recipe_id: i64) -> Result<()>;

    async fn get_user_shopping_lists(&self, user_id: &str) -> Result<Vec<ShoppingList>>;

    async fn create_shopping_list(&self, list: NewShoppingList) -> Result<ShoppingList>;

    /// Replace the list's items wholesale
    async fn update_shopping_list(&self, id: i64, items: Vec<ShoppingListItem>) -> Result<()>;

    async fn delete_shopping_list(&self, id: i64) -> Result<()>;

    /// Cheap liveness check used by `/ready`
    async fn ping(&self) -> bool {
        true
    }
}

/// Build the configured store backend
pub async fn build(settings: &Settings) -> Result<Arc<dyn RecipeStore>> {
    match settings.store.backend {
        StoreBackend::Memory => {
            info!("Using in-memory recipe store");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreBackend::Sqlite => {
            let store = SqliteStore::connect(&settings.store).await?;
            info!("Using SQLite recipe store at {}", settings.store.database_url);
            Ok(Arc::new(store))
        }
    }
}
