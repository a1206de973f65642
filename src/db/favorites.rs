use crate::db::{models::*, DbPool};
use crate::error::Result;

/// Add a favorite, returning the existing row when the pair is already present
pub async fn add_favorite(pool: &DbPool, user_id: &str, recipe_id: i64) -> Result<Favorite> {
    sqlx::query(
        "INSERT INTO user_favorites (user_id, recipe_id) VALUES (?, ?) ON CONFLICT (user_id, recipe_id) DO NOTHING",
    )
    .bind(user_id)
    .bind(recipe_id)
    .execute(pool)
    .await?;

    let favorite = sqlx::query_as::<_, Favorite>(
        "SELECT id, user_id, recipe_id FROM user_favorites WHERE user_id = ? AND recipe_id = ?",
    )
    .bind(user_id)
    .bind(recipe_id)
    .fetch_one(pool)
    .await?;

    Ok(favorite)
}

/// Remove a favorite if present
pub async fn remove_favorite(pool: &DbPool, user_id: &str, recipe_id: i64) -> Result<()> {
    sqlx::query("DELETE FROM user_favorites WHERE user_id = ? AND recipe_id = ?")
        .bind(user_id)
        .bind(recipe_id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Recipes favorited by a user, in the order they were favorited.
/// The inner join drops favorites whose recipe no longer exists.
pub async fn get_favorite_recipes(pool: &DbPool, user_id: &str) -> Result<Vec<Recipe>> {
    let rows = sqlx::query_as::<_, RecipeRow>(
        r#"
        SELECT r.*
        FROM user_favorites f
        JOIN recipes r ON r.id = f.recipe_id
        WHERE f.user_id = ?
        ORDER BY f.id
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(Recipe::try_from).collect()
}

/// Count favorites for a user, dangling ones included
#[cfg(test)]
async fn count_favorites(pool: &DbPool, user_id: &str) -> Result<i64> {
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM user_favorites WHERE user_id = ?")
        .bind(user_id)
        .fetch_one(pool)
        .await?;
    Ok(count.0)
}
