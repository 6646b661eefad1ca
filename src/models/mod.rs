//! Data models for the library API

pub mod book;
pub mod borrow_log;

// Re-export commonly used types
pub use book::{Book, CreateBook, NewBook, UpdateBook};
pub use borrow_log::{BorrowLog, BorrowRequest, NewBorrow};
