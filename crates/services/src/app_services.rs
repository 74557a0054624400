use std::sync::Arc;

use storage::repository::Storage;

use crate::category_service::CategoryService;
use crate::error::AppServicesError;
use crate::question_service::QuestionService;
use crate::quiz_service::QuizService;

/// Assembles the service layer over a storage backend.
#[derive(Clone)]
pub struct AppServices {
    questions: Arc<QuestionService>,
    quiz: Arc<QuizService>,
    categories: Arc<CategoryService>,
}

impl AppServices {
    #[must_use]
    pub fn new(storage: &Storage) -> Self {
        let questions = Arc::new(QuestionService::new(
            Arc::clone(&storage.questions),
            Arc::clone(&storage.categories),
        ));
        let quiz = Arc::new(QuizService::new(
            Arc::clone(&storage.questions),
            Arc::clone(&storage.categories),
        ));
        let categories = Arc::new(CategoryService::new(Arc::clone(&storage.categories)));

        Self {
            questions,
            quiz,
            categories,
        }
    }

    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if connection or migrations fail.
    pub async fn sqlite(db_url: &str) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::new(&storage))
    }

    #[must_use]
    pub fn questions(&self) -> Arc<QuestionService> {
        Arc::clone(&self.questions)
    }

    #[must_use]
    pub fn quiz(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz)
    }

    #[must_use]
    pub fn categories(&self) -> Arc<CategoryService> {
        Arc::clone(&self.categories)
    }
}
