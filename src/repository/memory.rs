//! In-memory store backend.
//!
//! Books and borrow logs live behind a single [`RwLock`], so the stock check,
//! the decrement and the log insert of a borrow all happen under one write
//! guard.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::BOOK_NOT_FOUND, borrow_log::BOOK_UNAVAILABLE, Book, BorrowLog, NewBook, NewBorrow,
        UpdateBook,
    },
};

use super::{BookStore, BorrowStore};

#[derive(Default)]
struct MemoryState {
    books: BTreeMap<i32, Book>,
    borrows: Vec<BorrowLog>,
    last_book_id: i32,
    last_borrow_id: i32,
}

#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookStore for MemoryStore {
    async fn list(&self) -> AppResult<Vec<Book>> {
        Ok(self.state.read().await.books.values().cloned().collect())
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        self.state
            .read()
            .await
            .books
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(BOOK_NOT_FOUND.to_string()))
    }

    async fn create(&self, book: &NewBook) -> AppResult<Book> {
        let mut state = self.state.write().await;
        state.last_book_id += 1;

        let now = Utc::now();
        let created = Book {
            id: state.last_book_id,
            title: book.title.clone(),
            author: book.author.clone(),
            stock: book.stock,
            created_at: now,
            updated_at: now,
        };
        state.books.insert(created.id, created.clone());

        Ok(created)
    }

    async fn update(&self, id: i32, changes: &UpdateBook) -> AppResult<Book> {
        let mut state = self.state.write().await;
        let book = state
            .books
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(BOOK_NOT_FOUND.to_string()))?;

        changes.apply(book);
        book.updated_at = Utc::now();

        Ok(book.clone())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        self.state
            .write()
            .await
            .books
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(BOOK_NOT_FOUND.to_string()))
    }
}

#[async_trait]
impl BorrowStore for MemoryStore {
    async fn list(&self) -> AppResult<Vec<BorrowLog>> {
        Ok(self.state.read().await.borrows.clone())
    }

    async fn borrow(&self, borrow: &NewBorrow) -> AppResult<BorrowLog> {
        let mut state = self.state.write().await;
        let now = Utc::now();

        match state.books.get_mut(&borrow.book_id) {
            Some(book) if book.stock > 0 => {
                book.stock -= 1;
                book.updated_at = now;
            }
            _ => return Err(AppError::BadRequest(BOOK_UNAVAILABLE.to_string())),
        }

        state.last_borrow_id += 1;
        let log = BorrowLog {
            id: state.last_borrow_id,
            user_id: borrow.user_id.clone(),
            book_id: borrow.book_id,
            borrow_date: borrow.borrow_date,
            latitude: borrow.latitude,
            longitude: borrow.longitude,
            created_at: now,
            updated_at: now,
        };
        state.borrows.push(log.clone());

        Ok(log)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_book(stock: i32) -> NewBook {
        NewBook {
            title: "Dune".into(),
            author: "Herbert".into(),
            stock,
        }
    }

    fn new_borrow(book_id: i32) -> NewBorrow {
        NewBorrow {
            user_id: "reader-1".into(),
            book_id,
            borrow_date: Utc::now(),
            latitude: Some(-6.2),
            longitude: None,
        }
    }

    #[tokio::test]
    async fn test_ids_are_generated() {
        let store = MemoryStore::new();
        let first = BookStore::create(&store, &new_book(1)).await.unwrap();
        let second = BookStore::create(&store, &new_book(1)).await.unwrap();
        assert_ne!(first.id, second.id);

        // Ids are not reused after a delete
        BookStore::delete(&store, second.id).await.unwrap();
        let third = BookStore::create(&store, &new_book(1)).await.unwrap();
        assert!(third.id > second.id);
    }

    #[tokio::test]
    async fn test_borrow_decrements_stock() {
        let store = MemoryStore::new();
        let book = BookStore::create(&store, &new_book(2)).await.unwrap();

        let log = store.borrow(&new_borrow(book.id)).await.unwrap();
        assert_eq!(log.book_id, book.id);
        assert_eq!(log.user_id, "reader-1");
        assert_eq!(log.latitude, Some(-6.2));
        assert_eq!(store.get_by_id(book.id).await.unwrap().stock, 1);
    }

    #[tokio::test]
    async fn test_borrow_exhausted_changes_nothing() {
        let store = MemoryStore::new();
        let book = BookStore::create(&store, &new_book(0)).await.unwrap();

        let err = store.borrow(&new_borrow(book.id)).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        assert_eq!(store.get_by_id(book.id).await.unwrap().stock, 0);
        assert!(BorrowStore::list(&store).await.unwrap().is_empty());

        let err = store.borrow(&new_borrow(999)).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_delete_keeps_borrow_logs() {
        let store = MemoryStore::new();
        let book = BookStore::create(&store, &new_book(1)).await.unwrap();
        store.borrow(&new_borrow(book.id)).await.unwrap();

        BookStore::delete(&store, book.id).await.unwrap();

        assert!(matches!(
            store.get_by_id(book.id).await,
            Err(AppError::NotFound(_))
        ));
        let logs = BorrowStore::list(&store).await.unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].book_id, book.id);
    }
}
