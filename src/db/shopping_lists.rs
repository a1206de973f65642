use crate::db::{models::*, DbPool};
use crate::error::Result;
use chrono::Utc;

/// Create a new shopping list
pub async fn create_shopping_list(pool: &DbPool, new_list: &NewShoppingList) -> Result<ShoppingList> {
    let now = Utc::now();

    let row = sqlx::query_as::<_, ShoppingListRow>(
        r#"
        INSERT INTO shopping_lists (user_id, name, items, created_at)
        VALUES (?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(&new_list.user_id)
    .bind(&new_list.name)
    .bind(serde_json::to_string(&new_list.items)?)
    .bind(now)
    .fetch_one(pool)
    .await?;

    ShoppingList::try_from(row)
}

/// List a user's shopping lists in creation order
pub async fn list_shopping_lists(pool: &DbPool, user_id: &str) -> Result<Vec<ShoppingList>> {
    let rows = sqlx::query_as::<_, ShoppingListRow>(
        "SELECT * FROM shopping_lists WHERE user_id = ? ORDER BY id",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(ShoppingList::try_from).collect()
}

/// Replace a list's items; returns false when the list does not exist
pub async fn update_items(pool: &DbPool, list_id: i64, items: &[ShoppingListItem]) -> Result<bool> {
    let result = sqlx::query("UPDATE shopping_lists SET items = ? WHERE id = ?")
        .bind(serde_json::to_string(items)?)
        .bind(list_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete a list; returns false when the list does not exist
pub async fn delete_shopping_list(pool: &DbPool, list_id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM shopping_lists WHERE id = ?")
        .bind(list_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
