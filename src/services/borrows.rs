//! Borrow service

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::{BorrowLog, BorrowRequest, NewBorrow},
    repository::Repository,
};

#[derive(Clone)]
pub struct BorrowsService {
    repository: Repository,
}

impl BorrowsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Record one borrow of a book by the given user and take one copy out of stock
    pub async fn borrow_book(&self, user_id: &str, request: BorrowRequest) -> AppResult<BorrowLog> {
        let borrow = NewBorrow::new(user_id.to_string(), request, Utc::now());

        match self.repository.borrows.borrow(&borrow).await {
            Ok(log) => {
                tracing::info!(
                    borrow_id = log.id,
                    book_id = log.book_id,
                    user_id = %log.user_id,
                    "Borrow recorded"
                );
                Ok(log)
            }
            Err(AppError::BadRequest(msg)) => {
                tracing::warn!(book_id = borrow.book_id, user_id = %borrow.user_id, "Borrow rejected: {}", msg);
                Err(AppError::BadRequest(msg))
            }
            Err(e) => Err(e),
        }
    }

    /// List every borrow log
    pub async fn list_borrows(&self) -> AppResult<Vec<BorrowLog>> {
        self.repository.borrows.list().await
    }
}
