use trivia_core::model::{CategoryId, Question, QuestionId};

use super::{
    SqliteRepository,
    mapping::{category_id_to_i64, map_question_row, question_id_to_i64},
};
use crate::repository::{NewQuestionRecord, QuestionRepository, StorageError};

#[async_trait::async_trait]
impl QuestionRepository for SqliteRepository {
    async fn insert_question(
        &self,
        record: NewQuestionRecord,
    ) -> Result<QuestionId, StorageError> {
        let result = sqlx::query(
            r"
            INSERT INTO questions (question, answer, category, difficulty)
            VALUES (?1, ?2, ?3, ?4)
            ",
        )
        .bind(record.question)
        .bind(record.answer)
        .bind(category_id_to_i64(record.category)?)
        .bind(i64::from(record.difficulty))
        .execute(self.pool())
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let id = u64::try_from(result.last_insert_rowid())
            .map_err(|_| StorageError::Serialization("rowid sign overflow".into()))?;
        Ok(QuestionId::new(id))
    }

    async fn delete_question(&self, id: QuestionId) -> Result<(), StorageError> {
        let result = sqlx::query("DELETE FROM questions WHERE id = ?1")
            .bind(question_id_to_i64(id)?)
            .execute(self.pool())
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }

    async fn get_question(&self, id: QuestionId) -> Result<Option<Question>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT id, question, answer, category, difficulty
            FROM questions
            WHERE id = ?1
            ",
        )
        .bind(question_id_to_i64(id)?)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        row.as_ref().map(map_question_row).transpose()
    }

    async fn list_questions(&self) -> Result<Vec<Question>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, question, answer, category, difficulty
            FROM questions
            ORDER BY id
            ",
        )
        .fetch_all(self.pool())
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        rows.iter().map(map_question_row).collect()
    }

    async fn list_questions_by_category(
        &self,
        category: CategoryId,
    ) -> Result<Vec<Question>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, question, answer, category, difficulty
            FROM questions
            WHERE category = ?1
            ORDER BY id
            ",
        )
        .bind(category_id_to_i64(category)?)
        .fetch_all(self.pool())
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        rows.iter().map(map_question_row).collect()
    }

    async fn search_questions(&self, term: &str) -> Result<Vec<Question>, StorageError> {
        // instr keeps plain-substring semantics; LIKE would treat % and _ in
        // the term as wildcards.
        let rows = sqlx::query(
            r"
            SELECT id, question, answer, category, difficulty
            FROM questions
            WHERE instr(lower(question), lower(?1)) > 0
            ORDER BY id
            ",
        )
        .bind(term)
        .fetch_all(self.pool())
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        rows.iter().map(map_question_row).collect()
    }
}
