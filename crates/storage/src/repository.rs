use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use trivia_core::model::{Category, CategoryId, NewQuestion, Question, QuestionId};

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Persisted shape for a question awaiting a store-assigned id.
///
/// This mirrors the validated domain `NewQuestion` so adapters can bind
/// columns without leaking storage concerns into the domain layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewQuestionRecord {
    pub question: String,
    pub answer: String,
    pub category: CategoryId,
    pub difficulty: u32,
}

impl NewQuestionRecord {
    #[must_use]
    pub fn from_new_question(new_question: &NewQuestion) -> Self {
        Self {
            question: new_question.question().to_owned(),
            answer: new_question.answer().to_owned(),
            category: new_question.category(),
            difficulty: new_question.difficulty(),
        }
    }
}

/// Repository contract for the question store.
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Persist a new question and return the store-assigned id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the question cannot be stored, including
    /// when its category does not exist.
    async fn insert_question(&self, record: NewQuestionRecord)
    -> Result<QuestionId, StorageError>;

    /// Delete a question by id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if no question has this id.
    async fn delete_question(&self, id: QuestionId) -> Result<(), StorageError>;

    /// Fetch a single question by id.
    ///
    /// # Errors
    ///
    /// Returns storage errors; a missing id is `Ok(None)`.
    async fn get_question(&self, id: QuestionId) -> Result<Option<Question>, StorageError>;

    /// List all questions ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the listing read fails.
    async fn list_questions(&self) -> Result<Vec<Question>, StorageError>;

    /// List questions of one category ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the listing read fails.
    async fn list_questions_by_category(
        &self,
        category: CategoryId,
    ) -> Result<Vec<Question>, StorageError>;

    /// List questions whose text contains `term`, case-insensitively,
    /// ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the search read fails.
    async fn search_questions(&self, term: &str) -> Result<Vec<Question>, StorageError>;
}

/// Repository contract for the category store. Read-only; the canonical set
/// is installed by migrations or fixtures.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// List all categories ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the listing read fails.
    async fn list_categories(&self) -> Result<Vec<Category>, StorageError>;

    /// Fetch a category by id.
    ///
    /// # Errors
    ///
    /// Returns storage errors; a missing id is `Ok(None)`.
    async fn get_category(&self, id: CategoryId) -> Result<Option<Category>, StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    questions: Arc<Mutex<BTreeMap<u64, Question>>>,
    categories: Arc<Mutex<BTreeMap<u64, Category>>>,
    next_question_id: Arc<Mutex<u64>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            questions: Arc::new(Mutex::new(BTreeMap::new())),
            categories: Arc::new(Mutex::new(BTreeMap::new())),
            next_question_id: Arc::new(Mutex::new(0)),
        }
    }

    /// Install a category. The trait surface is read-only, so fixtures and
    /// bootstrap code go through this inherent method instead.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn add_category(&self, category: Category) -> Result<(), StorageError> {
        let mut guard = self
            .categories
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(category.id().value(), category);
        Ok(())
    }
}

#[async_trait]
impl QuestionRepository for InMemoryRepository {
    async fn insert_question(
        &self,
        record: NewQuestionRecord,
    ) -> Result<QuestionId, StorageError> {
        {
            let categories = self
                .categories
                .lock()
                .map_err(|e| StorageError::Connection(e.to_string()))?;
            if !categories.contains_key(&record.category.value()) {
                return Err(StorageError::Conflict);
            }
        }

        let mut next = self
            .next_question_id
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *next += 1;
        let id = QuestionId::new(*next);

        let question = Question::new(
            id,
            record.question,
            record.answer,
            record.category,
            record.difficulty,
        )
        .map_err(|e| StorageError::Serialization(e.to_string()))?;

        let mut guard = self
            .questions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(id.value(), question);
        Ok(id)
    }

    async fn delete_question(&self, id: QuestionId) -> Result<(), StorageError> {
        let mut guard = self
            .questions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.remove(&id.value()).ok_or(StorageError::NotFound)?;
        Ok(())
    }

    async fn get_question(&self, id: QuestionId) -> Result<Option<Question>, StorageError> {
        let guard = self
            .questions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(&id.value()).cloned())
    }

    async fn list_questions(&self) -> Result<Vec<Question>, StorageError> {
        let guard = self
            .questions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.values().cloned().collect())
    }

    async fn list_questions_by_category(
        &self,
        category: CategoryId,
    ) -> Result<Vec<Question>, StorageError> {
        let guard = self
            .questions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard
            .values()
            .filter(|q| q.category() == category)
            .cloned()
            .collect())
    }

    async fn search_questions(&self, term: &str) -> Result<Vec<Question>, StorageError> {
        let needle = term.to_lowercase();
        let guard = self
            .questions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard
            .values()
            .filter(|q| q.question().to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl CategoryRepository for InMemoryRepository {
    async fn list_categories(&self) -> Result<Vec<Category>, StorageError> {
        let guard = self
            .categories
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.values().cloned().collect())
    }

    async fn get_category(&self, id: CategoryId) -> Result<Option<Category>, StorageError> {
        let guard = self
            .categories
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(&id.value()).cloned())
    }
}

/// Aggregates question and category repositories behind trait objects for
/// easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub questions: Arc<dyn QuestionRepository>,
    pub categories: Arc<dyn CategoryRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_in_memory(InMemoryRepository::new())
    }

    /// Wrap an existing in-memory repository, e.g. one pre-loaded with
    /// fixture categories.
    #[must_use]
    pub fn from_in_memory(repo: InMemoryRepository) -> Self {
        let questions: Arc<dyn QuestionRepository> = Arc::new(repo.clone());
        let categories: Arc<dyn CategoryRepository> = Arc::new(repo);
        Self {
            questions,
            categories,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_category(id: u64, label: &str) -> Category {
        Category::new(CategoryId::new(id), label).unwrap()
    }

    fn build_record(question: &str, category: u64) -> NewQuestionRecord {
        NewQuestionRecord {
            question: question.to_owned(),
            answer: "A".to_owned(),
            category: CategoryId::new(category),
            difficulty: 2,
        }
    }

    fn seeded_repo() -> InMemoryRepository {
        let repo = InMemoryRepository::new();
        repo.add_category(build_category(1, "Science")).unwrap();
        repo.add_category(build_category(2, "Art")).unwrap();
        repo
    }

    #[tokio::test]
    async fn insert_assigns_increasing_ids_and_lists_in_order() {
        let repo = seeded_repo();

        let first = repo.insert_question(build_record("First?", 1)).await.unwrap();
        let second = repo
            .insert_question(build_record("Second?", 2))
            .await
            .unwrap();
        assert!(second > first);

        let all = repo.list_questions().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id(), first);
        assert_eq!(all[1].id(), second);
    }

    #[tokio::test]
    async fn insert_rejects_unknown_category() {
        let repo = seeded_repo();
        let err = repo
            .insert_question(build_record("Orphan?", 99))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Conflict));
    }

    #[tokio::test]
    async fn delete_is_not_found_after_first_removal() {
        let repo = seeded_repo();
        let id = repo.insert_question(build_record("Gone?", 1)).await.unwrap();

        repo.delete_question(id).await.unwrap();
        let err = repo.delete_question(id).await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound));
        assert!(repo.get_question(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn category_listing_filters_by_category() {
        let repo = seeded_repo();
        repo.insert_question(build_record("Physics?", 1)).await.unwrap();
        repo.insert_question(build_record("Painting?", 2))
            .await
            .unwrap();

        let science = repo
            .list_questions_by_category(CategoryId::new(1))
            .await
            .unwrap();
        assert_eq!(science.len(), 1);
        assert_eq!(science[0].question(), "Physics?");
    }

    #[tokio::test]
    async fn search_matches_substring_case_insensitively() {
        let repo = seeded_repo();
        repo.insert_question(build_record("What movie earned Tom Hanks his third Oscar?", 2))
            .await
            .unwrap();

        let hits = repo.search_questions("tom hanks").await.unwrap();
        assert_eq!(hits.len(), 1);

        let misses = repo.search_questions("penicillin").await.unwrap();
        assert!(misses.is_empty());
    }
}
