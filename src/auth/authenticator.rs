//! The service provider interface (SPI) for auth.

use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

/// Defines the requirements for authentication back-ends.
///
/// The distinction between the two failure modes matters on the wire: a
/// back-end error turns into a `550` reply while a clean "wrong credentials"
/// verdict (`Ok(false)`) turns into a `530`.
#[async_trait]
pub trait Authenticator: Send + Sync + Debug {
    /// Checks the given username/password combination. Returns whether the
    /// combination is valid, or an error when the back-end could not decide.
    async fn check_passwd(&self, username: &str, password: &str) -> Result<bool, AuthenticationError>;
}

/// The error type for authentication back-end failures.
#[derive(Debug, Error)]
#[error("authentication error")]
pub struct AuthenticationError;

impl From<std::io::Error> for AuthenticationError {
    fn from(_: std::io::Error) -> Self {
        AuthenticationError
    }
}
