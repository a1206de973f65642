use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::{
    api::{auth::AuthUser, models::*},
    config::Settings,
    db::models::{Favorite, NewRecipe, NewShoppingList, Recipe, ShoppingList},
    matcher::{arrange_favorites, MatchEngine},
    store::RecipeStore,
    Error, Result,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecipeStore>,
    pub engine: MatchEngine,
    pub settings: Settings,
}

impl AppState {
    pub fn new(store: Arc<dyn RecipeStore>, settings: Settings) -> Self {
        Self {
            engine: MatchEngine::new(store.clone()),
            store,
            settings,
        }
    }
}

/// Unwrap a JSON body, turning malformed payloads into validation errors
fn json_body<T>(payload: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            warn!("Rejected request body: {}", rejection.body_text());
            Err(Error::Validation(rejection.body_text()))
        }
    }
}

/// Unwrap query parameters, turning unknown values into validation errors
fn query_params<T>(params: std::result::Result<Query<T>, QueryRejection>) -> Result<T> {
    match params {
        Ok(Query(value)) => Ok(value),
        Err(rejection) => {
            warn!("Rejected query string: {}", rejection.body_text());
            Err(Error::Validation(rejection.body_text()))
        }
    }
}

/// GET /api/recipes - List all recipes
pub async fn list_recipes(State(state): State<AppState>) -> Result<Json<Vec<Recipe>>> {
    debug!("List recipes request");
    Ok(Json(state.store.get_all_recipes().await?))
}

/// GET /api/recipes/:id - Get recipe details
pub async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Recipe>> {
    debug!("Get recipe request: {}", id);
    Ok(Json(state.store.get_recipe_by_id(id).await?))
}

/// POST /api/recipes - Add a recipe
pub async fn create_recipe(
    State(state): State<AppState>,
    user: AuthUser,
    payload: std::result::Result<Json<NewRecipe>, JsonRejection>,
) -> Result<Json<Recipe>> {
    let new_recipe = json_body(payload)?;
    debug!("Create recipe request from {}: {}", user.id(), new_recipe.title);
    Ok(Json(state.store.create_recipe(new_recipe).await?))
}

/// POST /api/recipes/search - Rank recipes by the ingredients on hand
pub async fn search_recipes(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<Vec<Recipe>>> {
    let request = json_body(payload)?;
    debug!("Search request: {:?}", request);

    let recipes = state
        .engine
        .search(&request.ingredients, &request.filters(), request.sort)
        .await?;

    Ok(Json(recipes))
}

/// POST /api/recipes/:id/shopping-list - Shopping list of missing ingredients
pub async fn create_missing_ingredients_list(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
    payload: std::result::Result<Json<MissingIngredientsRequest>, JsonRejection>,
) -> Result<Json<ShoppingList>> {
    let request = json_body(payload)?;
    debug!("Missing ingredients list request from {} for recipe {}", user.id(), id);

    let (recipe, items) = state.engine.missing_for(id, &request.ingredients).await?;
    let name = request
        .name
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| format!("Shopping list for {}", recipe.title));

    let list = state
        .store
        .create_shopping_list(NewShoppingList {
            user_id: user.0,
            name,
            items,
        })
        .await?;

    Ok(Json(list))
}

/// GET /api/favorites - Recipes the user has favorited, optionally narrowed
/// by `q` and ordered by `sort`
pub async fn list_favorites(
    State(state): State<AppState>,
    user: AuthUser,
    params: std::result::Result<Query<FavoritesQuery>, QueryRejection>,
) -> Result<Json<Vec<Recipe>>> {
    let params = query_params(params)?;
    debug!("List favorites request from {}: {:?}", user.id(), params);

    let favorites = state.store.get_user_favorites(user.id()).await?;
    Ok(Json(arrange_favorites(
        favorites,
        params.q.as_deref(),
        params.sort,
    )))
}

/// POST /api/favorites - Favorite a recipe
pub async fn add_favorite(
    State(state): State<AppState>,
    user: AuthUser,
    payload: std::result::Result<Json<AddFavoriteRequest>, JsonRejection>,
) -> Result<Json<Favorite>> {
    let request = json_body(payload)?;
    debug!("Add favorite request from {}: {}", user.id(), request.recipe_id);

    // Reject unknown recipes up front; the store itself tolerates dangling ids
    state.store.get_recipe_by_id(request.recipe_id).await?;

    let favorite = state
        .store
        .add_to_favorites(user.id(), request.recipe_id)
        .await?;

    Ok(Json(favorite))
}

/// DELETE /api/favorites/:recipe_id - Remove a favorite
pub async fn remove_favorite(
    State(state): State<AppState>,
    user: AuthUser,
    Path(recipe_id): Path<i64>,
) -> Result<Json<SuccessResponse>> {
    debug!("Remove favorite request from {}: {}", user.id(), recipe_id);
    state
        .store
        .remove_from_favorites(user.id(), recipe_id)
        .await?;
    Ok(Json(SuccessResponse::ok()))
}

/// GET /api/shopping-lists - The user's shopping lists
pub async fn list_shopping_lists(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<ShoppingList>>> {
    debug!("List shopping lists request from {}", user.id());
    Ok(Json(state.store.get_user_shopping_lists(user.id()).await?))
}

/// POST /api/shopping-lists - Create a shopping list
pub async fn create_shopping_list(
    State(state): State<AppState>,
    user: AuthUser,
    payload: std::result::Result<Json<CreateShoppingListRequest>, JsonRejection>,
) -> Result<Json<ShoppingList>> {
    let request = json_body(payload)?;
    debug!("Create shopping list request from {}: {}", user.id(), request.name);

    let list = state
        .store
        .create_shopping_list(NewShoppingList {
            user_id: user.0,
            name: request.name,
            items: request.items,
        })
        .await?;

    Ok(Json(list))
}

/// Lists belonging to other users are treated as absent
async fn owns_shopping_list(state: &AppState, user: &AuthUser, id: i64) -> Result<bool> {
    let lists = state.store.get_user_shopping_lists(user.id()).await?;
    Ok(lists.iter().any(|list| list.id == id))
}

/// PUT /api/shopping-lists/:id - Replace a list's items
pub async fn update_shopping_list(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
    payload: std::result::Result<Json<UpdateShoppingListRequest>, JsonRejection>,
) -> Result<Json<SuccessResponse>> {
    let request = json_body(payload)?;
    debug!("Update shopping list request from {}: {}", user.id(), id);

    if owns_shopping_list(&state, &user, id).await? {
        state.store.update_shopping_list(id, request.items).await?;
    } else {
        debug!("Shopping list {} not owned by {}, nothing to update", id, user.id());
    }
    Ok(Json(SuccessResponse::ok()))
}

/// DELETE /api/shopping-lists/:id - Delete a list
pub async fn delete_shopping_list(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<SuccessResponse>> {
    debug!("Delete shopping list request from {}: {}", user.id(), id);
    if owns_shopping_list(&state, &user, id).await? {
        state.store.delete_shopping_list(id).await?;
    } else {
        debug!("Shopping list {} not owned by {}, nothing to delete", id, user.id());
    }
    Ok(Json(SuccessResponse::ok()))
}

/// GET /health - Health check endpoint
pub async fn health_check() -> Result<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
    }))
}

/// GET /ready - Readiness check endpoint
pub async fn readiness_check(State(state): State<AppState>) -> Result<Json<ReadinessResponse>> {
    let store_healthy = state.store.ping().await;

    Ok(Json(ReadinessResponse {
        ready: store_healthy,
        store: if store_healthy { "ok" } else { "error" }.to_string(),
    }))
}
