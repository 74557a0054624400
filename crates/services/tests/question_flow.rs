use std::sync::Arc;

use async_trait::async_trait;
use services::{AppServices, Fault};
use storage::repository::{
    CategoryRepository, InMemoryRepository, NewQuestionRecord, QuestionRepository, StorageError,
};
use trivia_core::model::{
    Category, CategoryId, PageRequest, Question, QuestionDraft, QuestionId,
};

#[tokio::test]
async fn question_flow_create_list_search_delete() {
    let services = AppServices::sqlite("sqlite:file:memdb_question_flow?mode=memory&cache=shared")
        .await
        .expect("connect sqlite");
    let questions = services.questions();

    // Categories come pre-seeded by the migration.
    let categories = services
        .categories()
        .list_categories()
        .await
        .expect("list categories");
    assert_eq!(categories.categories.len(), 6);
    assert_eq!(categories.categories.get(&1).map(String::as_str), Some("Science"));

    let created = questions
        .create_question(QuestionDraft::new(
            "What is the heaviest organ in the human body?",
            "The liver",
            1,
            4,
        ))
        .await
        .expect("create question");
    assert!(created.success);

    let listing = questions
        .list_questions(PageRequest::default())
        .await
        .expect("list questions");
    assert_eq!(listing.total_questions, 1);
    assert_eq!(listing.questions[0].id, created.created);
    assert_eq!(listing.questions[0].answer, "The liver");
    assert_eq!(listing.current_category, "");

    let found = questions
        .search("heaviest ORGAN", PageRequest::default())
        .await
        .expect("search");
    assert_eq!(found.total_questions, 1);
    assert_eq!(found.current_category, "Science");

    let deleted = questions
        .delete_question(QuestionId::new(created.created))
        .await
        .expect("delete once");
    assert_eq!(deleted.deleted, created.created);

    let err = questions
        .delete_question(QuestionId::new(created.created))
        .await
        .expect_err("second delete fails");
    assert_eq!(err, Fault::NotFound);

    let err = questions
        .list_questions(PageRequest::default())
        .await
        .expect_err("listing is empty again");
    assert_eq!(err, Fault::NotFound);
}

#[tokio::test]
async fn create_with_missing_field_persists_nothing() {
    let services = AppServices::sqlite("sqlite:file:memdb_reject_flow?mode=memory&cache=shared")
        .await
        .expect("connect sqlite");
    let questions = services.questions();

    let mut draft = QuestionDraft::new("Half a question?", "A", 1, 2);
    draft.difficulty = None;
    let err = questions.create_question(draft).await.expect_err("reject");
    assert_eq!(err, Fault::MalformedRequest);

    let err = questions
        .list_questions(PageRequest::default())
        .await
        .expect_err("nothing was stored");
    assert_eq!(err, Fault::NotFound);
}

#[tokio::test]
async fn unknown_category_listing_is_not_found() {
    let services = AppServices::sqlite("sqlite:file:memdb_unknown_cat?mode=memory&cache=shared")
        .await
        .expect("connect sqlite");

    let err = services
        .questions()
        .list_by_category(CategoryId::new(77), PageRequest::default())
        .await
        .expect_err("unknown category");
    assert_eq!(err, Fault::NotFound);
}

/// A question store whose writes always fail, for classification tests.
struct BrokenQuestionStore;

#[async_trait]
impl QuestionRepository for BrokenQuestionStore {
    async fn insert_question(
        &self,
        _record: NewQuestionRecord,
    ) -> Result<QuestionId, StorageError> {
        Err(StorageError::Connection("disk full".into()))
    }

    async fn delete_question(&self, _id: QuestionId) -> Result<(), StorageError> {
        Err(StorageError::Connection("disk full".into()))
    }

    async fn get_question(&self, id: QuestionId) -> Result<Option<Question>, StorageError> {
        Ok(Some(
            Question::new(id, "Q", "A", CategoryId::new(1), 2).expect("valid question"),
        ))
    }

    async fn list_questions(&self) -> Result<Vec<Question>, StorageError> {
        Ok(Vec::new())
    }

    async fn list_questions_by_category(
        &self,
        _category: CategoryId,
    ) -> Result<Vec<Question>, StorageError> {
        Ok(Vec::new())
    }

    async fn search_questions(&self, _term: &str) -> Result<Vec<Question>, StorageError> {
        Ok(Vec::new())
    }
}

#[tokio::test]
async fn store_failures_surface_as_unprocessable() {
    let categories = InMemoryRepository::new();
    categories
        .add_category(Category::new(CategoryId::new(1), "Science").unwrap())
        .unwrap();
    let category_store: Arc<dyn CategoryRepository> = Arc::new(categories);
    let service = services::QuestionService::new(Arc::new(BrokenQuestionStore), category_store);

    let err = service
        .create_question(QuestionDraft::new("Q", "A", 1, 2))
        .await
        .expect_err("insert fails");
    assert_eq!(err, Fault::Unprocessable);

    let err = service
        .delete_question(QuestionId::new(1))
        .await
        .expect_err("delete fails after lookup");
    assert_eq!(err, Fault::Unprocessable);
}
