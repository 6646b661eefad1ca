//! Caller identity and role resolution
//!
//! Roles and user identifiers are taken verbatim from request headers. No
//! credential store is consulted. Handlers only see a [`Caller`], so another
//! [`IdentityResolver`] can be plugged into the application state without
//! touching route logic.

use axum::http::HeaderMap;

use crate::error::{AppError, AppResult};

pub const ROLE_HEADER: &str = "x-user-role";
pub const USER_ID_HEADER: &str = "x-user-id";

pub const ADMIN_ONLY: &str = "Access denied: administrators only";
pub const USER_REQUIRED: &str = "Access denied: send headers x-user-role: user and x-user-id";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    User,
}

impl Role {
    /// Parse a role value; matching is exact and case-sensitive
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "admin" => Some(Role::Admin),
            "user" => Some(Role::User),
            _ => None,
        }
    }
}

/// Who is making a request, as far as the resolver can tell
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Caller {
    pub role: Option<Role>,
    pub user_id: Option<String>,
}

impl Caller {
    pub fn require_admin(&self) -> AppResult<()> {
        if self.role == Some(Role::Admin) {
            Ok(())
        } else {
            Err(AppError::Authorization(ADMIN_ONLY.to_string()))
        }
    }

    /// Require the user role and a non-empty identity, returning the identity
    pub fn require_borrower(&self) -> AppResult<&str> {
        match (self.role, self.user_id.as_deref()) {
            (Some(Role::User), Some(id)) if !id.is_empty() => Ok(id),
            _ => Err(AppError::Authorization(USER_REQUIRED.to_string())),
        }
    }
}

/// Turns request headers into a [`Caller`]
pub trait IdentityResolver: Send + Sync {
    fn resolve(&self, headers: &HeaderMap) -> Caller;
}

/// Trusts the `x-user-role` and `x-user-id` headers as sent
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderIdentityResolver;

impl IdentityResolver for HeaderIdentityResolver {
    fn resolve(&self, headers: &HeaderMap) -> Caller {
        let header = |name: &str| headers.get(name).and_then(|value| value.to_str().ok());

        Caller {
            role: header(ROLE_HEADER).and_then(Role::parse),
            user_id: header(USER_ID_HEADER)
                .filter(|id| !id.is_empty())
                .map(str::to_string),
        }
    }
}
