//! Borrow log model: one immutable record per successful borrow

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr, PickFirst};
use sqlx::FromRow;
use utoipa::ToSchema;

pub const BOOK_UNAVAILABLE: &str = "Book exhausted or not found";

/// Borrow log record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BorrowLog {
    pub id: i32,
    /// Caller identity taken from the request headers, not checked against any user registry
    pub user_id: String,
    /// Not a foreign key: the book may have been deleted since
    pub book_id: i32,
    pub borrow_date: DateTime<Utc>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Borrow request body
#[serde_as]
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BorrowRequest {
    /// Accepts a number or a numeric string
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[schema(value_type = i32)]
    pub book_id: i32,
    /// Coordinates follow the same number-or-string rule
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[schema(value_type = Option<f64>)]
    pub latitude: Option<f64>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[schema(value_type = Option<f64>)]
    pub longitude: Option<f64>,
}

/// Borrow to be recorded by the store
#[derive(Debug, Clone, PartialEq)]
pub struct NewBorrow {
    pub user_id: String,
    pub book_id: i32,
    pub borrow_date: DateTime<Utc>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl NewBorrow {
    pub fn new(user_id: String, request: BorrowRequest, borrow_date: DateTime<Utc>) -> Self {
        Self {
            user_id,
            book_id: request.book_id,
            borrow_date,
            latitude: request.latitude,
            longitude: request.longitude,
        }
    }
}
