//! API handlers for the library REST endpoints

pub mod books;
pub mod borrows;
pub mod health;
pub mod openapi;

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts},
    http::request::Parts,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::book::BOOK_NOT_FOUND,
    AppState,
};

/// Admin gate: the request must carry the admin role
pub struct AdminCaller;

#[async_trait]
impl FromRequestParts<AppState> for AdminCaller {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        state.identity.resolve(&parts.headers).require_admin()?;
        Ok(AdminCaller)
    }
}

/// User gate: the request must carry the user role and an identity, which is handed to the handler
pub struct BorrowingUser(pub String);

#[async_trait]
impl FromRequestParts<AppState> for BorrowingUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let caller = state.identity.resolve(&parts.headers);
        let user_id = caller.require_borrower()?;
        Ok(BorrowingUser(user_id.to_string()))
    }
}

/// JSON body extractor whose rejections use the API error envelope
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Plain acknowledgement body
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Book ids arrive as raw path segments; anything non-numeric cannot name a book
pub(crate) fn parse_book_id(raw: &str) -> AppResult<i32> {
    raw.parse()
        .map_err(|_| AppError::NotFound(BOOK_NOT_FOUND.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_book_id() {
        assert_eq!(parse_book_id("12").unwrap(), 12);
        assert!(matches!(parse_book_id("abc"), Err(AppError::NotFound(_))));
        assert!(matches!(parse_book_id(""), Err(AppError::NotFound(_))));
    }
}
