use crate::utils::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

/// A grouping of tracked items ("Food", "Housing", ...).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

/// Item summary embedded in a category-with-items response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryItem {
    pub id: i64,
    pub name: String,
    pub series_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryWithItems {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub items: Vec<CategoryItem>,
}

#[derive(FromRow)]
struct CategoryItemRow {
    category_id: i64,
    category_name: String,
    description: Option<String>,
    item_id: Option<i64>,
    item_name: Option<String>,
    series_id: Option<String>,
}

impl Category {
    /// All categories, ordered by name.
    pub async fn find_all(pool: &SqlitePool) -> ApiResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, description FROM categories ORDER BY name",
        )
        .fetch_all(pool)
        .await?;

        if categories.is_empty() {
            return Err(ApiError::not_found("No data for categories"));
        }

        Ok(categories)
    }

    /// A single category by id.
    pub async fn get(pool: &SqlitePool, id: i64) -> ApiResult<Category> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, name, description FROM categories WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        category.ok_or_else(|| ApiError::not_found(format!("No data for category ID: {id}")))
    }

    /// A category together with its tracked items.
    ///
    /// Single left-join query; a category without items yields one row with
    /// null item columns, which shapes to an empty `items` list.
    pub async fn get_with_items(pool: &SqlitePool, id: i64) -> ApiResult<CategoryWithItems> {
        let rows = sqlx::query_as::<_, CategoryItemRow>(
            "SELECT c.id AS category_id, c.name AS category_name, c.description,
                    t.id AS item_id, t.name AS item_name, t.series_id
             FROM categories AS c
             LEFT JOIN tracked_items AS t ON c.id = t.category_id
             WHERE c.id = ?1",
        )
        .bind(id)
        .fetch_all(pool)
        .await?;

        let Some(first) = rows.first() else {
            return Err(ApiError::not_found(format!("No data for category ID: {id}")));
        };

        let category = CategoryWithItems {
            id: first.category_id,
            name: first.category_name.clone(),
            description: first.description.clone(),
            items: rows
                .iter()
                .filter_map(|row| {
                    Some(CategoryItem {
                        id: row.item_id?,
                        name: row.item_name.clone()?,
                        series_id: row.series_id.clone()?,
                    })
                })
                .collect(),
        };

        Ok(category)
    }
}
