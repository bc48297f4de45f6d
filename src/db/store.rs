//! Narrow data-access interface the HTTP handlers are written against.

use async_trait::async_trait;
use sqlx::SqlitePool;

use super::queries::{categories, questions};
use super::{Category, NewQuestion, Question, StoreError};

#[async_trait]
pub trait TriviaStore: Send + Sync {
    async fn all_categories(&self) -> Result<Vec<Category>, StoreError>;

    async fn all_questions(&self) -> Result<Vec<Question>, StoreError>;

    async fn question_count(&self) -> Result<i64, StoreError>;

    /// At most `limit` questions in insertion order, skipping the first `offset`.
    async fn questions_page(&self, offset: i64, limit: i64) -> Result<Vec<Question>, StoreError>;

    async fn question_by_id(&self, id: i64) -> Result<Option<Question>, StoreError>;

    async fn questions_for_category(&self, category: i64) -> Result<Vec<Question>, StoreError>;

    async fn search_questions(&self, term: &str) -> Result<Vec<Question>, StoreError>;

    /// Stores the question and returns the id assigned to it.
    async fn insert_question(&self, question: &NewQuestion) -> Result<i64, StoreError>;

    /// Returns `false` if there was nothing to delete.
    async fn delete_question(&self, id: i64) -> Result<bool, StoreError>;
}

#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TriviaStore for SqliteStore {
    async fn all_categories(&self) -> Result<Vec<Category>, StoreError> {
        Ok(categories::get_all_categories(&self.pool).await?)
    }

    async fn all_questions(&self) -> Result<Vec<Question>, StoreError> {
        Ok(questions::get_all_questions(&self.pool).await?)
    }

    async fn question_count(&self) -> Result<i64, StoreError> {
        Ok(questions::count_questions(&self.pool).await?)
    }

    async fn questions_page(&self, offset: i64, limit: i64) -> Result<Vec<Question>, StoreError> {
        Ok(questions::get_questions_page(&self.pool, limit, offset).await?)
    }

    async fn question_by_id(&self, id: i64) -> Result<Option<Question>, StoreError> {
        Ok(questions::get_question_by_id(&self.pool, id).await?)
    }

    async fn questions_for_category(&self, category: i64) -> Result<Vec<Question>, StoreError> {
        Ok(questions::get_questions_for_category(&self.pool, category).await?)
    }

    async fn search_questions(&self, term: &str) -> Result<Vec<Question>, StoreError> {
        Ok(questions::search_questions(&self.pool, term).await?)
    }

    async fn insert_question(&self, question: &NewQuestion) -> Result<i64, StoreError> {
        Ok(questions::create_question(&self.pool, question).await?)
    }

    async fn delete_question(&self, id: i64) -> Result<bool, StoreError> {
        Ok(questions::delete_question(&self.pool, id).await?)
    }
}
