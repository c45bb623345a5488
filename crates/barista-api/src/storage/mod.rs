//! SQLite persistence for the drinks menu

use crate::config::DatabaseConfig;
use crate::error::{ApiError, Result};
use crate::models::{Drink, RecipeIngredient};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{FromRow, SqlitePool};
use std::str::FromStr;
use tracing::info;

/// Raw database row; the recipe column stores the ingredient list as JSON.
#[derive(Debug, FromRow)]
struct DrinkRow {
    id: i64,
    title: String,
    recipe: String,
}

impl DrinkRow {
    fn into_drink(self) -> Result<Drink> {
        let recipe: Vec<RecipeIngredient> =
            serde_json::from_str(&self.recipe).map_err(|e| ApiError::Internal {
                message: format!("Corrupt recipe column for drink {}: {e}", self.id),
            })?;
        Ok(Drink {
            id: self.id,
            title: self.title,
            recipe,
        })
    }
}

/// Open the connection pool, creating the database file if needed.
pub async fn connect(config: &DatabaseConfig) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.url)
        .map_err(ApiError::Database)?
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Create the schema if it does not exist yet.
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS drinks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL UNIQUE,
            recipe TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema ready");
    Ok(())
}

/// List every drink on the menu, ordered by id.
pub async fn list_drinks(pool: &SqlitePool) -> Result<Vec<Drink>> {
    let rows: Vec<DrinkRow> =
        sqlx::query_as("SELECT id, title, recipe FROM drinks ORDER BY id")
            .fetch_all(pool)
            .await?;

    rows.into_iter().map(DrinkRow::into_drink).collect()
}

/// Fetch one drink by id.
pub async fn get_drink(pool: &SqlitePool, id: i64) -> Result<Option<Drink>> {
    let row: Option<DrinkRow> =
        sqlx::query_as("SELECT id, title, recipe FROM drinks WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?;

    row.map(DrinkRow::into_drink).transpose()
}

/// Insert a new drink and return it with its assigned id.
pub async fn insert_drink(
    pool: &SqlitePool,
    title: &str,
    recipe: &[RecipeIngredient],
) -> Result<Drink> {
    let recipe_json = serde_json::to_string(recipe).map_err(|e| ApiError::Internal {
        message: format!("Failed to encode recipe: {e}"),
    })?;

    let row: DrinkRow = sqlx::query_as(
        "INSERT INTO drinks (title, recipe) VALUES (?, ?) RETURNING id, title, recipe",
    )
    .bind(title)
    .bind(&recipe_json)
    .fetch_one(pool)
    .await?;

    row.into_drink()
}

/// Update title and/or recipe of an existing drink.
///
/// Returns `None` when no row with the given id exists.
pub async fn update_drink(
    pool: &SqlitePool,
    id: i64,
    title: Option<&str>,
    recipe: Option<&[RecipeIngredient]>,
) -> Result<Option<Drink>> {
    let Some(existing) = get_drink(pool, id).await? else {
        return Ok(None);
    };

    let title = title.unwrap_or(existing.title.as_str());
    let recipe = recipe.unwrap_or(existing.recipe.as_slice());
    let recipe_json = serde_json::to_string(recipe).map_err(|e| ApiError::Internal {
        message: format!("Failed to encode recipe: {e}"),
    })?;

    let row: DrinkRow = sqlx::query_as(
        "UPDATE drinks SET title = ?, recipe = ? WHERE id = ? RETURNING id, title, recipe",
    )
    .bind(title)
    .bind(&recipe_json)
    .bind(id)
    .fetch_one(pool)
    .await?;

    row.into_drink().map(Some)
}

/// Delete a drink by id. Returns `false` when no row existed.
pub async fn delete_drink(pool: &SqlitePool, id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM drinks WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_pool() -> SqlitePool {
        // One connection so every query sees the same in-memory database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        run_migrations(&pool).await.unwrap();
        pool
    }

    fn water_recipe() -> Vec<RecipeIngredient> {
        vec![RecipeIngredient {
            name: "water".to_string(),
            color: "blue".to_string(),
            parts: 1,
        }]
    }

    #[tokio::test]
    async fn test_insert_and_list() {
        let pool = test_pool().await;

        let drink = insert_drink(&pool, "water", &water_recipe()).await.unwrap();
        assert_eq!(drink.title, "water");
        assert_eq!(drink.recipe, water_recipe());

        let drinks = list_drinks(&pool).await.unwrap();
        assert_eq!(drinks.len(), 1);
        assert_eq!(drinks[0], drink);
    }

    #[tokio::test]
    async fn test_get_missing_drink() {
        let pool = test_pool().await;
        assert!(get_drink(&pool, 42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_partial_fields() {
        let pool = test_pool().await;
        let drink = insert_drink(&pool, "water", &water_recipe()).await.unwrap();

        // Title only; recipe stays intact.
        let updated = update_drink(&pool, drink.id, Some("sparkling water"), None)
            .await
            .unwrap()
            .expect("row exists");
        assert_eq!(updated.title, "sparkling water");
        assert_eq!(updated.recipe, water_recipe());

        // Recipe only; title stays intact.
        let new_recipe = vec![RecipeIngredient {
            name: "soda".to_string(),
            color: "white".to_string(),
            parts: 2,
        }];
        let updated = update_drink(&pool, drink.id, None, Some(&new_recipe))
            .await
            .unwrap()
            .expect("row exists");
        assert_eq!(updated.title, "sparkling water");
        assert_eq!(updated.recipe, new_recipe);
    }

    #[tokio::test]
    async fn test_update_missing_drink_returns_none() {
        let pool = test_pool().await;
        let result = update_drink(&pool, 99, Some("ghost"), None).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete_drink() {
        let pool = test_pool().await;
        let drink = insert_drink(&pool, "water", &water_recipe()).await.unwrap();

        assert!(delete_drink(&pool, drink.id).await.unwrap());
        assert!(!delete_drink(&pool, drink.id).await.unwrap());
        assert!(list_drinks(&pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_title_is_a_database_error() {
        let pool = test_pool().await;
        insert_drink(&pool, "water", &water_recipe()).await.unwrap();

        let err = insert_drink(&pool, "water", &water_recipe())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Database(_)));
    }
}
