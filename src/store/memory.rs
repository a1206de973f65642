use crate::db::models::{
    Favorite, NewRecipe, NewShoppingList, Recipe, ShoppingList, ShoppingListItem,
};
use crate::error::{Error, Result};
use crate::store::RecipeStore;
use crate::utils::validation::{
    validate_new_recipe, validate_new_shopping_list, validate_rating, validate_shopping_items,
    validate_user_id,
};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::debug;

/// Process-lifetime store. Every mutation takes the single write lock, so
/// writers to the same favorite or list are serialized.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

// BTreeMap keyed by monotonically increasing ids iterates in insertion order.
#[derive(Debug)]
struct State {
    recipes: BTreeMap<i64, Recipe>,
    favorites: BTreeMap<i64, Favorite>,
    shopping_lists: BTreeMap<i64, ShoppingList>,
    next_recipe_id: i64,
    next_favorite_id: i64,
    next_list_id: i64,
}

impl Default for State {
    fn default() -> Self {
        Self {
            recipes: BTreeMap::new(),
            favorites: BTreeMap::new(),
            shopping_lists: BTreeMap::new(),
            next_recipe_id: 1,
            next_favorite_id: 1,
            next_list_id: 1,
        }
    }
}

fn take_id(counter: &mut i64) -> i64 {
    let id = *counter;
    *counter += 1;
    id
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecipeStore for MemoryStore {
    async fn get_all_recipes(&self) -> Result<Vec<Recipe>> {
        let state = self.state.read().await;
        Ok(state.recipes.values().cloned().collect())
    }

    async fn get_recipe_by_id(&self, id: i64) -> Result<Recipe> {
        let state = self.state.read().await;
        state
            .recipes
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("Recipe {id} not found")))
    }

    async fn import_recipe(
        &self,
        recipe: NewRecipe,
        rating: u32,
        review_count: u32,
    ) -> Result<Recipe> {
        let recipe = validate_new_recipe(recipe)?;
        validate_rating(rating)?;

        let mut state = self.state.write().await;
        let id = take_id(&mut state.next_recipe_id);
        let recipe = Recipe::from_new(id, recipe, rating, review_count);
        state.recipes.insert(id, recipe.clone());

        debug!("Stored recipe {} ({})", id, recipe.title);
        Ok(recipe)
    }

    async fn get_user_favorites(&self, user_id: &str) -> Result<Vec<Recipe>> {
        let state = self.state.read().await;
        let recipes = state
            .favorites
            .values()
            .filter(|fav| fav.user_id == user_id)
            .filter_map(|fav| state.recipes.get(&fav.recipe_id).cloned())
            .collect();
        Ok(recipes)
    }

    async fn add_to_favorites(&self, user_id: &str, recipe_id: i64) -> Result<Favorite> {
        validate_user_id(user_id)?;

        let mut state = self.state.write().await;
        if let Some(existing) = state
            .favorites
            .values()
            .find(|fav| fav.user_id == user_id && fav.recipe_id == recipe_id)
        {
            return Ok(existing.clone());
        }

        let id = take_id(&mut state.next_favorite_id);
        let favorite = Favorite {
            id,
            user_id: user_id.to_string(),
            recipe_id,
        };
        state.favorites.insert(id, favorite.clone());
        Ok(favorite)
    }

    async fn remove_from_favorites(&self, user_id: &str, recipe_id: i64) -> Result<()> {
        let mut state = self.state.write().await;
        state
            .favorites
            .retain(|_, fav| !(fav.user_id == user_id && fav.recipe_id == recipe_id));
        Ok(())
    }

    async fn get_user_shopping_lists(&self, user_id: &str) -> Result<Vec<ShoppingList>> {
        let state = self.state.read().await;
        Ok(state
            .shopping_lists
            .values()
            .filter(|list| list.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn create_shopping_list(&self, list: NewShoppingList) -> Result<ShoppingList> {
        validate_new_shopping_list(&list)?;

        let mut state = self.state.write().await;
        let id = take_id(&mut state.next_list_id);
        let list = ShoppingList {
            id,
            user_id: list.user_id,
            name: list.name,
            items: list.items,
            created_at: Utc::now(),
        };
        state.shopping_lists.insert(id, list.clone());
        Ok(list)
    }

    async fn update_shopping_list(&self, id: i64, items: Vec<ShoppingListItem>) -> Result<()> {
        validate_shopping_items(&items)?;

        let mut state = self.state.write().await;
        match state.shopping_lists.get_mut(&id) {
            Some(list) => list.items = items,
            None => debug!("Shopping list {} not found, nothing to update", id),
        }
        Ok(())
    }

    async fn delete_shopping_list(&self, id: i64) -> Result<()> {
        let mut state = self.state.write().await;
        state.shopping_lists.remove(&id);
        Ok(())
    }
}
