//! Authentication helpers used by HTTP handlers.
//!
//! Credential storage is an external collaborator; this fixture check
//! stands in for it so the session flow stays exercisable end to end.
//! Handlers stay focused on request/response mapping.

use thiserror::Error;

use crate::domain::Error as DomainError;
use crate::domain::ports::StaffId;

use super::ApiResult;

/// Validated login credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: String,
}

/// Validation errors raised while parsing login payloads.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginValidationError {
    /// Username is empty after trimming whitespace.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Password is empty.
    #[error("password must not be empty")]
    EmptyPassword,
}

impl LoginCredentials {
    /// Validate and construct credentials from raw request fields.
    pub fn try_from_parts(
        username: &str,
        password: &str,
    ) -> Result<Self, LoginValidationError> {
        if username.trim().is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            username: username.to_owned(),
            password: password.to_owned(),
        })
    }

    /// Supplied username.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Supplied password.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Check credentials against the staff directory fixture.
pub fn authenticate(credentials: &LoginCredentials) -> ApiResult<StaffId> {
    if credentials.username() == "admin" && credentials.password() == "password" {
        StaffId::new(credentials.username())
            .map_err(|err| DomainError::internal(format!("invalid staff id: {err}")))
    } else {
        Err(DomainError::unauthorized("invalid username or password"))
    }
}
