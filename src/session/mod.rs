pub mod provider;
pub mod store;

pub use provider::{IdentityProvider, IssuedTokenProvider};
pub use store::{SessionState, SessionStore};
