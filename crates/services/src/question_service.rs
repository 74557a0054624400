use std::sync::Arc;

use storage::repository::{CategoryRepository, NewQuestionRecord, QuestionRepository};
use trivia_core::model::{
    CategoryId, PAGE_SIZE, PageRequest, Question, QuestionDraft, QuestionId, paginate,
};

use crate::category_service::{label_map, resolve_label};
use crate::error::Fault;
use crate::responses::{CreatedQuestion, DeletedQuestion, QuestionListing, QuestionPage};

/// Orchestrates question listing, search, creation, and deletion.
#[derive(Clone)]
pub struct QuestionService {
    questions: Arc<dyn QuestionRepository>,
    categories: Arc<dyn CategoryRepository>,
}

impl QuestionService {
    #[must_use]
    pub fn new(
        questions: Arc<dyn QuestionRepository>,
        categories: Arc<dyn CategoryRepository>,
    ) -> Self {
        Self {
            questions,
            categories,
        }
    }

    /// One page of the full question listing plus the category map.
    ///
    /// # Errors
    ///
    /// Returns `Fault::NotFound` when the requested page is empty. On this
    /// default listing an empty page means there is nothing to show, whether
    /// the store is empty or the caller paged past the end.
    pub async fn list_questions(&self, page: PageRequest) -> Result<QuestionListing, Fault> {
        let all = self.questions.list_questions().await?;
        let views: Vec<_> = all.iter().map(Question::view).collect();
        let page = paginate(views, page, PAGE_SIZE);
        if page.is_empty() {
            return Err(Fault::NotFound);
        }

        let categories = label_map(self.categories.as_ref()).await?;
        let total_questions = page.total();
        Ok(QuestionListing {
            success: true,
            questions: page.into_items(),
            total_questions,
            categories,
            current_category: String::new(),
        })
    }

    /// One page of questions restricted to a category.
    ///
    /// The total counts the category's questions only. Paging past the end of
    /// an existing category yields an empty page, not an error.
    ///
    /// # Errors
    ///
    /// Returns `Fault::NotFound` when the category id is unknown.
    pub async fn list_by_category(
        &self,
        category: CategoryId,
        page: PageRequest,
    ) -> Result<QuestionPage, Fault> {
        let label = resolve_label(self.categories.as_ref(), category)
            .await?
            .ok_or(Fault::NotFound)?;

        let matches = self.questions.list_questions_by_category(category).await?;
        let views: Vec<_> = matches.iter().map(Question::view).collect();
        let page = paginate(views, page, PAGE_SIZE);
        let total_questions = page.total();
        Ok(QuestionPage {
            success: true,
            questions: page.into_items(),
            total_questions,
            current_category: label,
        })
    }

    /// One page of questions whose text contains `term`, case-insensitively.
    ///
    /// The total counts the full match set before pagination. When exactly
    /// one question matches overall, its category label is resolved and
    /// returned; otherwise the label is empty. An unknown category on the
    /// single match is skipped, not reported.
    ///
    /// # Errors
    ///
    /// Returns `Fault::MalformedRequest` for an empty or whitespace-only
    /// term; callers are expected to route those to the plain listing.
    pub async fn search(&self, term: &str, page: PageRequest) -> Result<QuestionPage, Fault> {
        if term.trim().is_empty() {
            return Err(Fault::MalformedRequest);
        }

        let matches = self.questions.search_questions(term).await?;
        let current_category = if let [only_match] = matches.as_slice() {
            resolve_label(self.categories.as_ref(), only_match.category())
                .await?
                .unwrap_or_default()
        } else {
            String::new()
        };

        let views: Vec<_> = matches.iter().map(Question::view).collect();
        let page = paginate(views, page, PAGE_SIZE);
        let total_questions = page.total();
        Ok(QuestionPage {
            success: true,
            questions: page.into_items(),
            total_questions,
            current_category,
        })
    }

    /// Validate a submission and persist it.
    ///
    /// # Errors
    ///
    /// Returns `Fault::MalformedRequest` when any of the four fields is
    /// missing or invalid, and `Fault::Unprocessable` when the store rejects
    /// the insert.
    pub async fn create_question(&self, draft: QuestionDraft) -> Result<CreatedQuestion, Fault> {
        let new_question = draft.validate()?;
        let record = NewQuestionRecord::from_new_question(&new_question);
        let id = self.questions.insert_question(record).await?;
        Ok(CreatedQuestion {
            success: true,
            created: id.value(),
        })
    }

    /// Delete a question by id.
    ///
    /// # Errors
    ///
    /// Returns `Fault::NotFound` when the id does not exist, and
    /// `Fault::Unprocessable` when the store fails the removal.
    pub async fn delete_question(&self, id: QuestionId) -> Result<DeletedQuestion, Fault> {
        self.questions
            .get_question(id)
            .await?
            .ok_or(Fault::NotFound)?;
        self.questions.delete_question(id).await?;
        Ok(DeletedQuestion {
            success: true,
            deleted: id.value(),
        })
    }
}
