//! This module provides an anonymous authenticator.

use super::{AuthenticationError, Authenticator};
use async_trait::async_trait;

/// [`Authenticator`] implementation that simply allows everyone.
///
/// # Example
///
/// ```rust
/// # #[tokio::main]
/// # async fn main() {
/// use libquftp::auth::{AnonymousAuthenticator, Authenticator};
///
/// let my_auth = AnonymousAuthenticator;
/// assert!(my_auth.check_passwd("Finn", "I ❤️ PB").await.unwrap());
/// # }
/// ```
#[derive(Debug)]
pub struct AnonymousAuthenticator;

#[async_trait]
impl Authenticator for AnonymousAuthenticator {
    async fn check_passwd(&self, _username: &str, _password: &str) -> Result<bool, AuthenticationError> {
        Ok(true)
    }
}
