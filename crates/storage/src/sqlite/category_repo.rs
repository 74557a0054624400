use trivia_core::model::{Category, CategoryId};

use super::{
    SqliteRepository,
    mapping::{category_id_to_i64, map_category_row},
};
use crate::repository::{CategoryRepository, StorageError};

#[async_trait::async_trait]
impl CategoryRepository for SqliteRepository {
    async fn list_categories(&self) -> Result<Vec<Category>, StorageError> {
        let rows = sqlx::query("SELECT id, type FROM categories ORDER BY id")
            .fetch_all(self.pool())
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        rows.iter().map(map_category_row).collect()
    }

    async fn get_category(&self, id: CategoryId) -> Result<Option<Category>, StorageError> {
        let row = sqlx::query("SELECT id, type FROM categories WHERE id = ?1")
            .bind(category_id_to_i64(id)?)
            .fetch_optional(self.pool())
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        row.as_ref().map(map_category_row).transpose()
    }
}
