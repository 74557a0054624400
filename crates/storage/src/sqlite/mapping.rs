use sqlx::Row;
use trivia_core::model::{Category, CategoryId, Question, QuestionId};

use crate::repository::StorageError;

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

fn i64_to_u64(field: &'static str, v: i64) -> Result<u64, StorageError> {
    u64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} sign overflow")))
}

pub(crate) fn question_id_to_i64(id: QuestionId) -> Result<i64, StorageError> {
    i64::try_from(id.value()).map_err(|_| StorageError::Serialization("question_id overflow".into()))
}

pub(crate) fn category_id_to_i64(id: CategoryId) -> Result<i64, StorageError> {
    i64::try_from(id.value()).map_err(|_| StorageError::Serialization("category_id overflow".into()))
}

pub(crate) fn map_question_row(row: &sqlx::sqlite::SqliteRow) -> Result<Question, StorageError> {
    let id = QuestionId::new(i64_to_u64("id", row.try_get("id").map_err(ser)?)?);
    let category = CategoryId::new(i64_to_u64(
        "category",
        row.try_get("category").map_err(ser)?,
    )?);

    let difficulty_i64: i64 = row.try_get("difficulty").map_err(ser)?;
    let difficulty = u32::try_from(difficulty_i64)
        .map_err(|_| StorageError::Serialization(format!("invalid difficulty: {difficulty_i64}")))?;

    Question::new(
        id,
        row.try_get::<String, _>("question").map_err(ser)?,
        row.try_get::<String, _>("answer").map_err(ser)?,
        category,
        difficulty,
    )
    .map_err(ser)
}

pub(crate) fn map_category_row(row: &sqlx::sqlite::SqliteRow) -> Result<Category, StorageError> {
    let id = CategoryId::new(i64_to_u64("id", row.try_get("id").map_err(ser)?)?);
    Category::new(id, row.try_get::<String, _>("type").map_err(ser)?).map_err(ser)
}
