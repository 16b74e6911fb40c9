//! Contains the service provider interface for authentication back-ends
//! along with two bundled implementations.

mod anonymous;
mod authenticator;
mod simple;

pub use anonymous::AnonymousAuthenticator;
pub use authenticator::{AuthenticationError, Authenticator};
pub use simple::SimpleAuthenticator;
