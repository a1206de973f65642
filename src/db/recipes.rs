use crate::db::{models::*, DbPool};
use crate::error::{Error, Result};

/// Insert a recipe with the given rating
pub async fn create_recipe(
    pool: &DbPool,
    new_recipe: &NewRecipe,
    rating: u32,
    review_count: u32,
) -> Result<Recipe> {
    let row = sqlx::query_as::<_, RecipeRow>(
        r#"
        INSERT INTO recipes (
            title, description, image, prep_time, cook_time, servings,
            difficulty, cuisine, dietary_restrictions, ingredients, instructions,
            rating, review_count
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(&new_recipe.title)
    .bind(&new_recipe.description)
    .bind(&new_recipe.image)
    .bind(i64::from(new_recipe.prep_time))
    .bind(i64::from(new_recipe.cook_time))
    .bind(i64::from(new_recipe.servings))
    .bind(new_recipe.difficulty.as_str())
    .bind(&new_recipe.cuisine)
    .bind(serde_json::to_string(&new_recipe.dietary_restrictions)?)
    .bind(serde_json::to_string(&new_recipe.ingredients)?)
    .bind(serde_json::to_string(&new_recipe.instructions)?)
    .bind(i64::from(rating))
    .bind(i64::from(review_count))
    .fetch_one(pool)
    .await?;

    Recipe::try_from(row)
}

/// Get recipe by ID
pub async fn get_recipe(pool: &DbPool, recipe_id: i64) -> Result<Recipe> {
    let row = sqlx::query_as::<_, RecipeRow>("SELECT * FROM recipes WHERE id = ?")
        .bind(recipe_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Recipe {recipe_id} not found")))?;

    Recipe::try_from(row)
}

/// List every recipe in insertion order
pub async fn list_all_recipes(pool: &DbPool) -> Result<Vec<Recipe>> {
    let rows = sqlx::query_as::<_, RecipeRow>("SELECT * FROM recipes ORDER BY id")
        .fetch_all(pool)
        .await?;

    rows.into_iter().map(Recipe::try_from).collect()
}

#[cfg(test)]
async fn count_all_recipes(pool: &DbPool) -> Result<i64> {
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM recipes")
        .fetch_one(pool)
        .await?;
    Ok(count.0)
}
