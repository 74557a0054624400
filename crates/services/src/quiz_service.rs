use std::collections::HashSet;
use std::sync::Arc;

use rand::Rng;
use storage::repository::{CategoryRepository, QuestionRepository};
use trivia_core::model::{CategoryId, Question, QuestionId};

use crate::category_service::resolve_label;
use crate::error::Fault;
use crate::responses::QuizRound;

/// Category scope for a quiz session. Clients send the raw id 0 for "all".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizFilter {
    All,
    Category(CategoryId),
}

impl QuizFilter {
    #[must_use]
    pub fn from_raw(raw: u64) -> Self {
        if raw == 0 {
            Self::All
        } else {
            Self::Category(CategoryId::new(raw))
        }
    }
}

/// Serves the quiz flow: one random unseen question per call.
///
/// Stateless across calls; the seen set is supplied by the caller on every
/// request and never persisted.
#[derive(Clone)]
pub struct QuizService {
    questions: Arc<dyn QuestionRepository>,
    categories: Arc<dyn CategoryRepository>,
}

impl QuizService {
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

    /// Pick the next question uniformly at random from the eligible set:
    /// questions matching the filter whose ids are not in `seen`.
    ///
    /// An empty eligible set ends the quiz; the round comes back without a
    /// question and with a count of zero. `total_questions` reports the
    /// eligible-set size before the draw.
    ///
    /// # Errors
    ///
    /// Returns `Fault::MalformedRequest` when a category filter does not
    /// resolve to a known category. Exhaustion is not an error.
    pub async fn next_question(
        &self,
        filter: QuizFilter,
        seen: &HashSet<QuestionId>,
    ) -> Result<QuizRound, Fault> {
        let current_category = match filter {
            QuizFilter::All => "All".to_owned(),
            QuizFilter::Category(id) => resolve_label(self.categories.as_ref(), id)
                .await?
                .ok_or(Fault::MalformedRequest)?,
        };

        let pool = match filter {
            QuizFilter::All => self.questions.list_questions().await?,
            QuizFilter::Category(id) => self.questions.list_questions_by_category(id).await?,
        };
        let eligible: Vec<Question> = pool
            .into_iter()
            .filter(|q| !seen.contains(&q.id()))
            .collect();
        let total_questions = eligible.len();
        let question = draw_uniform(eligible);

        Ok(QuizRound {
            success: true,
            question: question.map(|q| q.view()),
            total_questions,
            current_category,
        })
    }
}

// The eligible set is fetched deterministically; the randomness lives in
// this one draw, never in the store query.
fn draw_uniform(mut eligible: Vec<Question>) -> Option<Question> {
    if eligible.is_empty() {
        return None;
    }
    let index = rand::rng().random_range(0..eligible.len());
    Some(eligible.swap_remove(index))
}
