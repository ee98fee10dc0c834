//! Authentication credentials
//!
//! This module provides authentication credential types and constructors for the store client.

/// Authentication credentials for the store
///
/// The store accepts either a standard bearer token or its own token header;
/// local development deployments typically run unauthenticated.
#[derive(Debug, Clone)]
pub enum ChromaCredentials {
    /// Bearer token authentication (`Authorization: Bearer <token>`)
    BearerToken(String),
    /// Token header authentication (`X-Chroma-Token: <token>`)
    TokenHeader(String),
    /// No authentication (for testing/development)
    None,
}

impl ChromaCredentials {
    /// Create bearer token credentials
    pub fn bearer_token(token: impl Into<String>) -> Self {
        Self::BearerToken(token.into())
    }

    /// Create token header credentials
    pub fn token_header(token: impl Into<String>) -> Self {
        Self::TokenHeader(token.into())
    }

    /// Create credentials with no authentication
    pub fn none() -> Self {
        Self::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials() {
        let bearer = ChromaCredentials::bearer_token("test-token");
        let header = ChromaCredentials::token_header("test-token");
        let none = ChromaCredentials::none();

        match bearer {
            ChromaCredentials::BearerToken(token) => assert_eq!(token, "test-token"),
            _ => panic!("Expected bearer token credentials"),
        }

        match header {
            ChromaCredentials::TokenHeader(token) => assert_eq!(token, "test-token"),
            _ => panic!("Expected token header credentials"),
        }

        match none {
            ChromaCredentials::None => {}
            _ => panic!("Expected no credentials"),
        }
    }
}
