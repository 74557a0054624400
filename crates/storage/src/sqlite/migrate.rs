use sqlx::SqlitePool;

use super::SqliteInitError;

/// The canonical category set; seeded once so a fresh database can serve
/// the standard board immediately.
const DEFAULT_CATEGORIES: [(i64, &str); 6] = [
    (1, "Science"),
    (2, "Art"),
    (3, "Geography"),
    (4, "History"),
    (5, "Entertainment"),
    (6, "Sports"),
];

/// Runs a single, consolidated migration for the current schema.
///
/// Creates categories and questions with their index, then seeds the
/// default categories.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), SqliteInitError> {
    async fn is_applied(pool: &SqlitePool, version: i64) -> Result<bool, sqlx::Error> {
        let row = sqlx::query("SELECT 1 FROM schema_migrations WHERE version = ?1")
            .bind(version)
            .fetch_optional(pool)
            .await?;
        Ok(row.is_some())
    }

    sqlx::query(
        r"
            CREATE TABLE IF NOT EXISTS schema_migrations (
                version INTEGER PRIMARY KEY,
                applied_at TEXT NOT NULL
            );
            ",
    )
    .execute(pool)
    .await?;

    // Version 1: full schema.
    if !is_applied(pool, 1).await? {
        let mut tx = pool.begin().await?;

        sqlx::query(
            r"
                CREATE TABLE IF NOT EXISTS categories (
                    id INTEGER PRIMARY KEY,
                    type TEXT NOT NULL CHECK (length(trim(type)) > 0)
                );
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                CREATE TABLE IF NOT EXISTS questions (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    question TEXT NOT NULL CHECK (length(trim(question)) > 0),
                    answer TEXT NOT NULL CHECK (length(trim(answer)) > 0),
                    category INTEGER NOT NULL,
                    difficulty INTEGER NOT NULL CHECK (difficulty BETWEEN 1 AND 5),
                    FOREIGN KEY (category) REFERENCES categories(id)
                );
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                CREATE INDEX IF NOT EXISTS idx_questions_category
                    ON questions(category);
            ",
        )
        .execute(&mut *tx)
        .await?;

        for (id, label) in DEFAULT_CATEGORIES {
            sqlx::query("INSERT OR IGNORE INTO categories (id, type) VALUES (?1, ?2)")
                .bind(id)
                .bind(label)
                .execute(&mut *tx)
                .await?;
        }

        sqlx::query(
            "INSERT INTO schema_migrations (version, applied_at) VALUES (1, datetime('now'))",
        )
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
    }

    Ok(())
}
