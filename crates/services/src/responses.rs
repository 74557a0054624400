//! Serializable response envelopes mirroring the effective client contracts.
//!
//! Every envelope carries a `success` flag; faults serialize through
//! [`ErrorBody`] with the numeric class code and a short message.

use std::collections::BTreeMap;

use serde::Serialize;
use trivia_core::model::QuestionView;

use crate::error::Fault;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryList {
    pub success: bool,
    pub categories: BTreeMap<u64, String>,
}

/// The default question listing: one page plus the category map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionListing {
    pub success: bool,
    pub questions: Vec<QuestionView>,
    pub total_questions: usize,
    pub categories: BTreeMap<u64, String>,
    pub current_category: String,
}

/// A page of questions scoped by a search term or a category filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionPage {
    pub success: bool,
    pub questions: Vec<QuestionView>,
    pub total_questions: usize,
    pub current_category: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedQuestion {
    pub success: bool,
    pub created: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedQuestion {
    pub success: bool,
    pub deleted: u64,
}

/// One quiz turn. `question` is `None` when the eligible set is exhausted,
/// which ends the session without an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizRound {
    pub success: bool,
    pub question: Option<QuestionView>,
    pub total_questions: usize,
    pub current_category: String,
}

impl QuizRound {
    /// True once no eligible question remains.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.question.is_none()
    }
}

/// Structured failure body: success flag, numeric class code, short message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub success: bool,
    pub error: u16,
    pub message: String,
}

impl From<Fault> for ErrorBody {
    fn from(fault: Fault) -> Self {
        Self {
            success: false,
            error: fault.code(),
            message: fault.to_string(),
        }
    }
}
