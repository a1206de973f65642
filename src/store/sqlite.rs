use crate::config::StoreConfig;
use crate::db::{self, models::*, DbPool};
use crate::error::Result;
use crate::store::RecipeStore;
use crate::utils::validation::{
    validate_new_recipe, validate_new_shopping_list, validate_rating, validate_shopping_items,
    validate_user_id,
};
use async_trait::async_trait;
use tracing::debug;

/// Relational store backed by a SQLite pool
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    /// Wrap an existing pool whose migrations have already run
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Open the configured database and bring its schema up to date
    pub async fn connect(config: &StoreConfig) -> Result<Self> {
        let pool = db::init_pool_with_config(config).await?;
        db::run_migrations(&pool).await?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl RecipeStore for SqliteStore {
    async fn get_all_recipes(&self) -> Result<Vec<Recipe>> {
        db::recipes::list_all_recipes(&self.pool).await
    }

    async fn get_recipe_by_id(&self, id: i64) -> Result<Recipe> {
        db::recipes::get_recipe(&self.pool, id).await
    }

    async fn import_recipe(
        &self,
        recipe: NewRecipe,
        rating: u32,
        review_count: u32,
    ) -> Result<Recipe> {
        let recipe = validate_new_recipe(recipe)?;
        validate_rating(rating)?;

        let stored = db::recipes::create_recipe(&self.pool, &recipe, rating, review_count).await?;
        debug!("Stored recipe {} ({})", stored.id, stored.title);
        Ok(stored)
    }

    async fn get_user_favorites(&self, user_id: &str) -> Result<Vec<Recipe>> {
        db::favorites::get_favorite_recipes(&self.pool, user_id).await
    }

    async fn add_to_favorites(&self, user_id: &str, recipe_id: i64) -> Result<Favorite> {
        validate_user_id(user_id)?;
        db::favorites::add_favorite(&self.pool, user_id, recipe_id).await
    }

    async fn remove_from_favorites(&self, user_id: &str, recipe_id: i64) -> Result<()> {
        db::favorites::remove_favorite(&self.pool, user_id, recipe_id).await
    }

    async fn get_user_shopping_lists(&self, user_id: &str) -> Result<Vec<ShoppingList>> {
        db::shopping_lists::list_shopping_lists(&self.pool, user_id).await
    }

    async fn create_shopping_list(&self, list: NewShoppingList) -> Result<ShoppingList> {
        validate_new_shopping_list(&list)?;
        db::shopping_lists::create_shopping_list(&self.pool, &list).await
    }

    async fn update_shopping_list(&self, id: i64, items: Vec<ShoppingListItem>) -> Result<()> {
        validate_shopping_items(&items)?;
        if !db::shopping_lists::update_items(&self.pool, id, &items).await? {
            debug!("Shopping list {} not found, nothing to update", id);
        }
        Ok(())
    }

    async fn delete_shopping_list(&self, id: i64) -> Result<()> {
        db::shopping_lists::delete_shopping_list(&self.pool, id).await?;
        Ok(())
    }

    async fn ping(&self) -> bool {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await.is_ok()
    }
}
