//! Catalog management service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{book::TITLE_AUTHOR_REQUIRED, Book, CreateBook, NewBook, UpdateBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
    default_stock: i32,
}

impl CatalogService {
    pub fn new(repository: Repository, default_stock: i32) -> Self {
        Self {
            repository,
            default_stock,
        }
    }

    /// List every book in the catalog
    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list().await
    }

    pub async fn get_book(&self, id: i32) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    /// Create a new book; title and author are required, stock falls back to the configured default
    pub async fn create_book(&self, request: CreateBook) -> AppResult<Book> {
        let request = request.normalized();
        request.validate()?;

        let (Some(title), Some(author)) = (request.title, request.author) else {
            return Err(AppError::Validation(TITLE_AUTHOR_REQUIRED.to_string()));
        };

        let stock = match request.stock {
            Some(stock) => stock,
            // `AppConfig::load` rejects this; states assembled by hand may not
            None if self.default_stock < 0 => {
                return Err(AppError::Internal(format!(
                    "Configured default stock {} is negative",
                    self.default_stock
                )))
            }
            None => self.default_stock,
        };

        let book = NewBook {
            title,
            author,
            stock,
        };

        let created = self.repository.books.create(&book).await?;
        tracing::info!(book_id = created.id, stock = created.stock, "Book created");
        Ok(created)
    }

    /// Merge the given fields into an existing book
    pub async fn update_book(&self, id: i32, changes: UpdateBook) -> AppResult<Book> {
        let changes = changes.normalized();
        changes.validate()?;

        let updated = self.repository.books.update(id, &changes).await?;
        tracing::info!(book_id = id, "Book updated");
        Ok(updated)
    }

    /// Delete a book. Borrow logs that reference it are left in place.
    pub async fn delete_book(&self, id: i32) -> AppResult<()> {
        self.repository.books.delete(id).await?;
        tracing::info!(book_id = id, "Book deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;

    use super::*;
    use crate::repository::{MockBookStore, MockBorrowStore};

    fn service(books: MockBookStore, default_stock: i32) -> CatalogService {
        let repository = Repository::from_stores(Arc::new(books), Arc::new(MockBorrowStore::new()));
        CatalogService::new(repository, default_stock)
    }

    fn stored(book: &NewBook) -> Book {
        let now = Utc::now();
        Book {
            id: 1,
            title: book.title.clone(),
            author: book.author.clone(),
            stock: book.stock,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_create_applies_default_stock() {
        let mut books = MockBookStore::new();
        books
            .expect_create()
            .withf(|book| book.stock == 3 && book.title == "Dune")
            .times(1)
            .returning(|book| Ok(stored(book)));

        let created = service(books, 3)
            .create_book(CreateBook {
                title: Some(" Dune ".into()),
                author: Some("Herbert".into()),
                stock: None,
            })
            .await
            .unwrap();

        assert_eq!(created.stock, 3);
        assert_eq!(created.title, "Dune");
    }

    #[tokio::test]
    async fn test_negative_default_stock_never_reaches_store() {
        let mut books = MockBookStore::new();
        books.expect_create().never();

        let result = service(books, -3)
            .create_book(CreateBook {
                title: Some("Dune".into()),
                author: Some("Herbert".into()),
                stock: None,
            })
            .await;
        assert!(matches!(result, Err(AppError::Internal(_))));
    }

    #[tokio::test]
    async fn test_create_without_author_never_reaches_store() {
        let mut books = MockBookStore::new();
        books.expect_create().never();

        let err = service(books, 1)
            .create_book(CreateBook {
                title: Some("Dune".into()),
                author: None,
                stock: Some(2),
            })
            .await
            .unwrap_err();

        match err {
            AppError::Validation(msg) => assert_eq!(msg, TITLE_AUTHOR_REQUIRED),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_update_rejects_blank_title() {
        let mut books = MockBookStore::new();
        books.expect_update().never();

        let result = service(books, 1)
            .update_book(
                1,
                UpdateBook {
                    title: Some("  ".into()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let mut books = MockBookStore::new();
        books
            .expect_list()
            .returning(|| Err(AppError::Database(sqlx::Error::PoolTimedOut)));

        let result = service(books, 1).list_books().await;
        assert!(matches!(result, Err(AppError::Database(_))));
    }
}
