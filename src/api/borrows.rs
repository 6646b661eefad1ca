//! Borrow endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{BorrowLog, BorrowRequest},
    AppState,
};

use super::{ApiJson, BorrowingUser};

/// Borrow acknowledgement carrying the new log entry
#[derive(Serialize, ToSchema)]
pub struct BorrowResponse {
    pub message: String,
    pub data: BorrowLog,
}

/// Borrow a book
#[utoipa::path(
    post,
    path = "/api/borrow",
    tag = "borrows",
    request_body = BorrowRequest,
    params(
        ("x-user-role" = String, Header, description = "Must be `user`"),
        ("x-user-id" = String, Header, description = "Borrower identity")
    ),
    responses(
        (status = 201, description = "Borrow recorded", body = BorrowResponse),
        (status = 400, description = "Book exhausted or not found", body = crate::error::ErrorResponse),
        (status = 403, description = "Missing user role or identity", body = crate::error::ErrorResponse)
    )
)]
pub async fn borrow_book(
    State(state): State<AppState>,
    BorrowingUser(user_id): BorrowingUser,
    ApiJson(request): ApiJson<BorrowRequest>,
) -> AppResult<(StatusCode, Json<BorrowResponse>)> {
    let log = state.services.borrows.borrow_book(&user_id, request).await?;

    Ok((
        StatusCode::CREATED,
        Json(BorrowResponse {
            message: "Borrow recorded".to_string(),
            data: log,
        }),
    ))
}

/// List all borrow logs
#[utoipa::path(
    get,
    path = "/api/borrows",
    tag = "borrows",
    responses(
        (status = 200, description = "All borrow logs", body = Vec<BorrowLog>),
        (status = 500, description = "Store error", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_borrows(State(state): State<AppState>) -> AppResult<Json<Vec<BorrowLog>>> {
    let logs = state.services.borrows.list_borrows().await?;
    Ok(Json(logs))
}
