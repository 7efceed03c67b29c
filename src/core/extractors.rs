//! Axum extractors for the dispatch layer
//!
//! The principal travels in request headers: a user id plus comma-separated
//! role and grant lists. Gateways that terminate authentication upstream
//! populate these; absent or malformed headers yield an anonymous principal,
//! and the permission gate decides what anonymous callers may do.

use crate::core::auth::Principal;
use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, request::Parts};
use std::convert::Infallible;
use uuid::Uuid;

/// Header carrying the authenticated user id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Header carrying the user's roles, comma-separated.
pub const ROLES_HEADER: &str = "x-roles";

/// Header carrying directly granted permission names, comma-separated.
pub const GRANTS_HEADER: &str = "x-permissions";

fn split_csv(headers: &HeaderMap, name: &str) -> Vec<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

impl Principal {
    /// Parse a principal from request headers.
    ///
    /// A missing or non-UUID user id yields [`Principal::Anonymous`].
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let Some(id) = headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| Uuid::parse_str(v.trim()).ok())
        else {
            return Principal::Anonymous;
        };

        Principal::User {
            id,
            roles: split_csv(headers, ROLES_HEADER),
            grants: split_csv(headers, GRANTS_HEADER),
        }
    }
}

impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Principal::from_headers(&parts.headers))
    }
}
