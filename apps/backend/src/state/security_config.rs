use std::time::Duration;

use jsonwebtoken::Algorithm;

/// Default credential lifetime: one day, matching the `token` cookie's max-age.
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Signing settings shared by the token issuer and the authentication gate.
///
/// Resolved once at startup and never mutated. A missing secret is kept as
/// `None` so the gate can answer with a server-misconfiguration rejection
/// instead of the process refusing to start.
#[derive(Clone)]
pub struct SecurityConfig {
    secret: Option<Vec<u8>>,
    /// JWT algorithm used for both signing and verification (HS256)
    pub algorithm: Algorithm,
    /// Lifetime of freshly minted credentials
    pub token_ttl: Duration,
}

impl SecurityConfig {
    /// Create a new SecurityConfig with the given signing secret.
    ///
    /// An empty secret is treated the same as an absent one.
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        let secret: Vec<u8> = secret.into();
        Self {
            secret: (!secret.is_empty()).then_some(secret),
            algorithm: Algorithm::HS256,
            token_ttl: DEFAULT_TOKEN_TTL,
        }
    }

    /// Configuration with no signing secret.
    pub fn without_secret() -> Self {
        Self {
            secret: None,
            algorithm: Algorithm::HS256,
            token_ttl: DEFAULT_TOKEN_TTL,
        }
    }

    /// Build from an optional secret, e.g. the result of reading `SECRET_KEY`.
    pub fn from_optional(secret: Option<String>) -> Self {
        match secret {
            Some(s) => Self::new(s.into_bytes()),
            None => Self::without_secret(),
        }
    }

    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    pub fn secret(&self) -> Option<&[u8]> {
        self.secret.as_deref()
    }

    pub fn has_secret(&self) -> bool {
        self.secret.is_some()
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self::new("test_secret_key_for_testing_purposes_only")
    }
}

// Never print the secret.
impl std::fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .field("algorithm", &self.algorithm)
            .field("token_ttl", &self.token_ttl)
            .finish()
    }
}
