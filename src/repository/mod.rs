//! Repository layer: store interfaces and their backends

pub mod books;
pub mod borrows;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, Pool, Postgres};

use crate::{
    config::{DatabaseConfig, StoreBackend},
    error::{AppError, AppResult},
    models::{Book, BorrowLog, NewBook, NewBorrow, UpdateBook},
};

/// Book persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    /// All books, ordered by id
    async fn list(&self) -> AppResult<Vec<Book>>;

    /// Fails with [`AppError::NotFound`] when absent
    async fn get_by_id(&self, id: i32) -> AppResult<Book>;

    async fn create(&self, book: &NewBook) -> AppResult<Book>;

    /// Fails with [`AppError::NotFound`] when absent
    async fn update(&self, id: i32, changes: &UpdateBook) -> AppResult<Book>;

    /// Removes the book only; borrow logs referencing it are kept
    async fn delete(&self, id: i32) -> AppResult<()>;
}

/// Borrow log persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BorrowStore: Send + Sync {
    /// All borrow logs, ordered by id
    async fn list(&self) -> AppResult<Vec<BorrowLog>>;

    /// Decrement the book's stock and record the log as one atomic unit.
    ///
    /// Fails with [`AppError::BadRequest`] and changes nothing if the book is
    /// absent or has no stock left.
    async fn borrow(&self, borrow: &NewBorrow) -> AppResult<BorrowLog>;
}

#[derive(Clone)]
enum Backend {
    Postgres(Pool<Postgres>),
    Memory,
}

/// Main repository struct holding the configured stores
#[derive(Clone)]
pub struct Repository {
    backend: Backend,
    pub books: Arc<dyn BookStore>,
    pub borrows: Arc<dyn BorrowStore>,
}

impl Repository {
    /// Create a repository backed by PostgreSQL
    pub fn postgres(pool: Pool<Postgres>) -> Self {
        Self {
            books: Arc::new(books::BooksRepository::new(pool.clone())),
            borrows: Arc::new(borrows::BorrowsRepository::new(pool.clone())),
            backend: Backend::Postgres(pool),
        }
    }

    /// Create a repository backed by process memory
    pub fn memory() -> Self {
        let store = Arc::new(memory::MemoryStore::new());
        Self {
            books: store.clone(),
            borrows: store,
            backend: Backend::Memory,
        }
    }

    /// Assemble a repository from arbitrary stores
    pub fn from_stores(books: Arc<dyn BookStore>, borrows: Arc<dyn BorrowStore>) -> Self {
        Self {
            backend: Backend::Memory,
            books,
            borrows,
        }
    }

    /// Open the configured backend; for PostgreSQL this also applies pending migrations
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        match config.backend {
            StoreBackend::Memory => {
                tracing::warn!("Using in-memory store, data will not survive a restart");
                Ok(Self::memory())
            }
            StoreBackend::Postgres => {
                let pool = PgPoolOptions::new()
                    .max_connections(config.max_connections)
                    .min_connections(config.min_connections)
                    .connect(&config.url)
                    .await?;

                tracing::info!("Connected to database");

                sqlx::migrate!("./migrations")
                    .run(&pool)
                    .await
                    .map_err(|e| AppError::Internal(format!("Migration failed: {}", e)))?;

                tracing::info!("Database migrations completed");

                Ok(Self::postgres(pool))
            }
        }
    }

    /// Check that the store answers
    pub async fn ping(&self) -> AppResult<()> {
        match &self.backend {
            Backend::Postgres(pool) => {
                sqlx::query("SELECT 1")
                    .execute(pool)
                    .await
                    .map_err(|e| AppError::Unavailable(e.to_string()))?;
                Ok(())
            }
            Backend::Memory => Ok(()),
        }
    }
}
