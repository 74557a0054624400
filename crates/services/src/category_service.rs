use std::collections::BTreeMap;
use std::sync::Arc;

use storage::repository::{CategoryRepository, StorageError};
use trivia_core::model::CategoryId;

use crate::error::Fault;
use crate::responses::CategoryList;

/// Resolve a category label by id; `Ok(None)` when the id is unknown.
///
/// Callers decide whether an unknown id is reportable (explicit filters) or
/// merely skipped (opportunistic lookups).
pub(crate) async fn resolve_label(
    categories: &dyn CategoryRepository,
    id: CategoryId,
) -> Result<Option<String>, StorageError> {
    let category = categories.get_category(id).await?;
    Ok(category.map(|c| c.label().to_owned()))
}

/// Full id-to-label mapping, ordered by id.
pub(crate) async fn label_map(
    categories: &dyn CategoryRepository,
) -> Result<BTreeMap<u64, String>, StorageError> {
    let all = categories.list_categories().await?;
    Ok(all
        .into_iter()
        .map(|c| (c.id().value(), c.label().to_owned()))
        .collect())
}

/// Read-only category operations.
#[derive(Clone)]
pub struct CategoryService {
    categories: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    #[must_use]
    pub fn new(categories: Arc<dyn CategoryRepository>) -> Self {
        Self { categories }
    }

    /// List all categories as an id-to-label mapping.
    ///
    /// # Errors
    ///
    /// Returns `Fault::NotFound` when the mapping is empty, and
    /// storage-derived faults otherwise.
    pub async fn list_categories(&self) -> Result<CategoryList, Fault> {
        let categories = label_map(self.categories.as_ref()).await?;
        if categories.is_empty() {
            return Err(Fault::NotFound);
        }
        Ok(CategoryList {
            success: true,
            categories,
        })
    }
}
