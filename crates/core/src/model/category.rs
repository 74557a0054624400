use thiserror::Error;

use crate::model::ids::CategoryId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CategoryError {
    #[error("category label cannot be empty")]
    EmptyLabel,
}

/// A question category. Read-only from the core's perspective; the category
/// store owns the canonical set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    id: CategoryId,
    label: String,
}

impl Category {
    /// Creates a new Category.
    ///
    /// # Errors
    ///
    /// Returns `CategoryError::EmptyLabel` if the label is empty or
    /// whitespace-only.
    pub fn new(id: CategoryId, label: impl Into<String>) -> Result<Self, CategoryError> {
        let label = label.into();
        if label.trim().is_empty() {
            return Err(CategoryError::EmptyLabel);
        }

        Ok(Self {
            id,
            label: label.trim().to_owned(),
        })
    }

    #[must_use]
    pub fn id(&self) -> CategoryId {
        self.id
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}
