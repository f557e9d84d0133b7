// Copyright (C) 2026 the Daily Reporting contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session tokens and the authentication extractor.
//!
//! Sessions map a bearer token to a username. The actor is resolved
//! against the current login projection on every request, so a session
//! whose staff record has since been removed stops working.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use daily_reporting_api::AuthenticatedActor;
use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};

use crate::AppState;

/// In-memory session table.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: HashMap<String, String>,
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a session for `username` and returns its token.
    pub fn create(&mut self, username: &str) -> String {
        let timestamp: u128 = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_nanos());
        let token: String = format!("session_{timestamp}_{}", rand::random::<u64>());
        self.sessions.insert(token.clone(), username.to_string());
        token
    }

    /// The username a token belongs to.
    #[must_use]
    pub fn username(&self, token: &str) -> Option<&str> {
        self.sessions.get(token).map(String::as_str)
    }

    /// Ends a session. Returns whether the token was known.
    pub fn remove(&mut self, token: &str) -> bool {
        self.sessions.remove(token).is_some()
    }
}

/// Extractor for authenticated users.
///
/// Validates the `Authorization: Bearer <token>` header and yields the
/// actor together with the token.
///
/// # Errors
///
/// Returns HTTP 401 Unauthorized if:
/// - Authorization header is missing
/// - Authorization header format is invalid
/// - The token is unknown
/// - The login behind the token no longer exists
pub struct SessionUser(pub AuthenticatedActor, pub String);

impl FromRequestParts<AppState> for SessionUser {
    type Rejection = SessionError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header: &str = parts
            .headers
            .get("Authorization")
            .ok_or_else(|| {
                debug!("Missing Authorization header");
                SessionError::MissingAuthorizationHeader
            })?
            .to_str()
            .map_err(|_| {
                warn!("Invalid Authorization header encoding");
                SessionError::InvalidAuthorizationHeader
            })?;

        let token: &str = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            warn!("Authorization header does not start with 'Bearer '");
            SessionError::InvalidAuthorizationHeader
        })?;

        let username: String = state
            .sessions
            .lock()
            .await
            .username(token)
            .map(String::from)
            .ok_or_else(|| {
                warn!("Unknown session token");
                SessionError::InvalidSession(String::from("Unknown session"))
            })?;

        let actor: AuthenticatedActor = state
            .directory
            .lock()
            .await
            .user(&username)
            .map(daily_reporting_api::ProjectedUser::to_actor)
            .ok_or_else(|| {
                warn!(username = %username, "Session user no longer exists");
                SessionError::InvalidSession(String::from("User no longer exists"))
            })?;

        debug!(username = %actor.username, role = %actor.role, "Session validated");

        Ok(Self(actor, token.to_string()))
    }
}

/// Session extraction errors.
#[derive(Debug)]
pub enum SessionError {
    /// Authorization header is missing.
    MissingAuthorizationHeader,
    /// Authorization header format is invalid.
    InvalidAuthorizationHeader,
    /// Session validation failed.
    InvalidSession(String),
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::MissingAuthorizationHeader => {
                (StatusCode::UNAUTHORIZED, "Missing Authorization header")
            }
            Self::InvalidAuthorizationHeader => (
                StatusCode::UNAUTHORIZED,
                "Invalid Authorization header format. Expected: 'Bearer <token>'",
            ),
            Self::InvalidSession(reason) => {
                return (
                    StatusCode::UNAUTHORIZED,
                    format!("Session validation failed: {reason}"),
                )
                    .into_response();
            }
        };

        (status, message).into_response()
    }
}
