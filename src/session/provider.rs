use tracing::{debug, info};

/// The identity provider boundary: a sign-in attempt either yields a signed
/// ID token or nothing (failure and cancellation look the same).
#[async_trait::async_trait]
pub trait IdentityProvider: Send + Sync {
    fn get_name(&self) -> &str;
    async fn sign_in(&self) -> Option<String>;
}

/// Provider for tokens that were already issued out of band, e.g. pasted on
/// the command line or exported in the environment.
pub struct IssuedTokenProvider {
    name: String,
    token: Option<String>,
}

impl IssuedTokenProvider {
    pub fn new(name: impl Into<String>, token: Option<String>) -> Self {
        let name = name.into();
        info!("Creating issued-token identity provider '{}'", name);
        Self { name, token }
    }
}

#[async_trait::async_trait]
impl IdentityProvider for IssuedTokenProvider {
    fn get_name(&self) -> &str {
        &self.name
    }

    async fn sign_in(&self) -> Option<String> {
        let token = self
            .token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())?;
        debug!("Provider '{}' handing out an ID token", self.name);
        Some(token.to_string())
    }
}
