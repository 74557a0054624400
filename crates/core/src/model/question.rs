use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{CategoryId, QuestionId};

/// Difficulty scores accepted from clients (matches the 1-5 picker).
pub const MIN_DIFFICULTY: u32 = 1;
pub const MAX_DIFFICULTY: u32 = 5;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text is required")]
    MissingQuestionText,

    #[error("answer text is required")]
    MissingAnswerText,

    #[error("category is required")]
    MissingCategory,

    #[error("difficulty is required")]
    MissingDifficulty,

    #[error("question text cannot be empty")]
    EmptyQuestionText,

    #[error("answer text cannot be empty")]
    EmptyAnswerText,

    #[error("difficulty must be between 1 and 5")]
    InvalidDifficulty,
}

/// A trivia question as served to clients.
///
/// Constructed only through validation; immutable once built. The store
/// assigns ids, so creation flows go through [`QuestionDraft`] and
/// [`NewQuestion`] first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    question: String,
    answer: String,
    category: CategoryId,
    difficulty: u32,
}

impl Question {
    /// Creates a new Question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if either text is empty after trimming or the
    /// difficulty falls outside the accepted range.
    pub fn new(
        id: QuestionId,
        question: impl Into<String>,
        answer: impl Into<String>,
        category: CategoryId,
        difficulty: u32,
    ) -> Result<Self, QuestionError> {
        let question = question.into();
        if question.trim().is_empty() {
            return Err(QuestionError::EmptyQuestionText);
        }
        let answer = answer.into();
        if answer.trim().is_empty() {
            return Err(QuestionError::EmptyAnswerText);
        }
        if !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&difficulty) {
            return Err(QuestionError::InvalidDifficulty);
        }

        Ok(Self {
            id,
            question: question.trim().to_owned(),
            answer: answer.trim().to_owned(),
            category,
            difficulty,
        })
    }

    // Accessors
    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    #[must_use]
    pub fn category(&self) -> CategoryId {
        self.category
    }

    #[must_use]
    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    /// Serializable shape served to clients.
    #[must_use]
    pub fn view(&self) -> QuestionView {
        QuestionView {
            id: self.id.value(),
            question: self.question.clone(),
            answer: self.answer.clone(),
            category: self.category.value(),
            difficulty: self.difficulty,
        }
    }
}

/// Wire shape for a single question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionView {
    pub id: u64,
    pub question: String,
    pub answer: String,
    pub category: u64,
    pub difficulty: u32,
}

/// Client-supplied creation payload; every field is optional at the edge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct QuestionDraft {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub category: Option<u64>,
    pub difficulty: Option<u32>,
}

impl QuestionDraft {
    #[must_use]
    pub fn new(
        question: impl Into<String>,
        answer: impl Into<String>,
        category: u64,
        difficulty: u32,
    ) -> Self {
        Self {
            question: Some(question.into()),
            answer: Some(answer.into()),
            category: Some(category),
            difficulty: Some(difficulty),
        }
    }

    /// Check presence of all four fields, then validate content.
    ///
    /// # Errors
    ///
    /// Returns the `Missing*` variant for the first absent field, or content
    /// errors from [`NewQuestion::new`].
    pub fn validate(self) -> Result<NewQuestion, QuestionError> {
        let question = self.question.ok_or(QuestionError::MissingQuestionText)?;
        let answer = self.answer.ok_or(QuestionError::MissingAnswerText)?;
        let category = self.category.ok_or(QuestionError::MissingCategory)?;
        let difficulty = self.difficulty.ok_or(QuestionError::MissingDifficulty)?;

        NewQuestion::new(question, answer, CategoryId::new(category), difficulty)
    }
}

/// A validated question awaiting a store-assigned id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    question: String,
    answer: String,
    category: CategoryId,
    difficulty: u32,
}

impl NewQuestion {
    /// Creates a validated insert shape.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if either text is empty after trimming or the
    /// difficulty falls outside the accepted range.
    pub fn new(
        question: impl Into<String>,
        answer: impl Into<String>,
        category: CategoryId,
        difficulty: u32,
    ) -> Result<Self, QuestionError> {
        let question = question.into();
        if question.trim().is_empty() {
            return Err(QuestionError::EmptyQuestionText);
        }
        let answer = answer.into();
        if answer.trim().is_empty() {
            return Err(QuestionError::EmptyAnswerText);
        }
        if !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&difficulty) {
            return Err(QuestionError::InvalidDifficulty);
        }

        Ok(Self {
            question: question.trim().to_owned(),
            answer: answer.trim().to_owned(),
            category,
            difficulty,
        })
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    #[must_use]
    pub fn category(&self) -> CategoryId {
        self.category
    }

    #[must_use]
    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    /// Attach the store-assigned id.
    #[must_use]
    pub fn into_question(self, id: QuestionId) -> Question {
        Question {
            id,
            question: self.question,
            answer: self.answer,
            category: self.category,
            difficulty: self.difficulty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_new_rejects_empty_text() {
        let err = Question::new(QuestionId::new(1), "   ", "A", CategoryId::new(1), 2).unwrap_err();
        assert_eq!(err, QuestionError::EmptyQuestionText);

        let err = Question::new(QuestionId::new(1), "Q", "", CategoryId::new(1), 2).unwrap_err();
        assert_eq!(err, QuestionError::EmptyAnswerText);
    }

    #[test]
    fn question_new_rejects_out_of_range_difficulty() {
        let err = Question::new(QuestionId::new(1), "Q", "A", CategoryId::new(1), 0).unwrap_err();
        assert_eq!(err, QuestionError::InvalidDifficulty);

        let err = Question::new(QuestionId::new(1), "Q", "A", CategoryId::new(1), 6).unwrap_err();
        assert_eq!(err, QuestionError::InvalidDifficulty);
    }

    #[test]
    fn question_trims_text() {
        let q = Question::new(
            QuestionId::new(7),
            "  Whose autobiography is entitled 'I Know Why the Caged Bird Sings'?  ",
            " Maya Angelou ",
            CategoryId::new(4),
            2,
        )
        .unwrap();

        assert_eq!(
            q.question(),
            "Whose autobiography is entitled 'I Know Why the Caged Bird Sings'?"
        );
        assert_eq!(q.answer(), "Maya Angelou");
    }

    #[test]
    fn view_mirrors_fields() {
        let q = Question::new(QuestionId::new(9), "Q", "A", CategoryId::new(3), 4).unwrap();
        let view = q.view();
        assert_eq!(view.id, 9);
        assert_eq!(view.question, "Q");
        assert_eq!(view.answer, "A");
        assert_eq!(view.category, 3);
        assert_eq!(view.difficulty, 4);
    }

    #[test]
    fn draft_validate_rejects_each_missing_field() {
        let base = QuestionDraft::new("Q", "A", 1, 2);

        let mut draft = base.clone();
        draft.question = None;
        assert_eq!(
            draft.validate().unwrap_err(),
            QuestionError::MissingQuestionText
        );

        let mut draft = base.clone();
        draft.answer = None;
        assert_eq!(
            draft.validate().unwrap_err(),
            QuestionError::MissingAnswerText
        );

        let mut draft = base.clone();
        draft.category = None;
        assert_eq!(draft.validate().unwrap_err(), QuestionError::MissingCategory);

        let mut draft = base;
        draft.difficulty = None;
        assert_eq!(
            draft.validate().unwrap_err(),
            QuestionError::MissingDifficulty
        );
    }

    #[test]
    fn draft_validate_happy_path() {
        let new_question = QuestionDraft::new("Q", "A", 2, 3).validate().unwrap();
        assert_eq!(new_question.question(), "Q");
        assert_eq!(new_question.answer(), "A");
        assert_eq!(new_question.category(), CategoryId::new(2));
        assert_eq!(new_question.difficulty(), 3);

        let q = new_question.into_question(QuestionId::new(24));
        assert_eq!(q.id(), QuestionId::new(24));
    }
}
