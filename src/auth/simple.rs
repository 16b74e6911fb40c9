//! An authenticator that knows a single username/password pair.

use super::{AuthenticationError, Authenticator};
use async_trait::async_trait;

/// [`Authenticator`] implementation that accepts exactly one configured
/// username/password combination. Handy for the example binary and for
/// tests; real deployments will want something backed by an actual user
/// store.
#[derive(Debug)]
pub struct SimpleAuthenticator {
    name: String,
    password: String,
}

impl SimpleAuthenticator {
    /// Creates an authenticator accepting the given combination.
    pub fn new<N: Into<String>, P: Into<String>>(name: N, password: P) -> Self {
        SimpleAuthenticator {
            name: name.into(),
            password: password.into(),
        }
    }
}

#[async_trait]
impl Authenticator for SimpleAuthenticator {
    async fn check_passwd(&self, username: &str, password: &str) -> Result<bool, AuthenticationError> {
        Ok(username == self.name && password == self.password)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn accepts_only_the_configured_pair() {
        let auth = SimpleAuthenticator::new("admin", "123456");
        assert!(auth.check_passwd("admin", "123456").await.unwrap());
        assert!(!auth.check_passwd("admin", "wrong").await.unwrap());
        assert!(!auth.check_passwd("someone", "123456").await.unwrap());
    }
}
