use crate::core::domain::error::{MaasResult, ValidationError};

/// Represents a validated MAAS API key.
///
/// MAAS issues keys as a colon-separated `consumer:token:secret` triple; the
/// three parts become the OAuth consumer key, token and token secret in the
/// `Authorization` header the transport layer builds for every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiKey {
    consumer_key: String,
    token_key: String,
    token_secret: String,
}

impl ApiKey {
    /// Creates a new ApiKey instance with validation.
    ///
    /// # Errors
    ///
    /// Returns `MaasError::Validation` if the key is not a triple of
    /// non-empty, colon-free parts separated by exactly two colons.
    pub fn new(key: impl Into<String>) -> MaasResult<Self> {
        let key = key.into();
        let parts: Vec<&str> = key.split(':').collect();
        if parts.len() != 3 || parts.iter().any(|p| p.is_empty()) {
            return Err(ValidationError::Field {
                field: "api_key".to_string(),
                message: "API key must be of the form 'consumer:token:secret'".to_string(),
            }
            .into());
        }
        Ok(Self {
            consumer_key: parts[0].to_string(),
            token_key: parts[1].to_string(),
            token_secret: parts[2].to_string(),
        })
    }

    /// Creates an ApiKey without validation. Intended for tests.
    #[cfg(test)]
    pub fn new_unchecked(consumer: &str, token: &str, secret: &str) -> Self {
        Self {
            consumer_key: consumer.to_string(),
            token_key: token.to_string(),
            token_secret: secret.to_string(),
        }
    }

    pub fn consumer_key(&self) -> &str {
        &self.consumer_key
    }

    pub fn token_key(&self) -> &str {
        &self.token_key
    }

    pub fn token_secret(&self) -> &str {
        &self.token_secret
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_three_part_keys() {
        let key = ApiKey::new("AbCd:EfGh:IjKl").unwrap();
        assert_eq!(key.consumer_key(), "AbCd");
        assert_eq!(key.token_key(), "EfGh");
        assert_eq!(key.token_secret(), "IjKl");
    }

    #[test]
    fn rejects_wrong_shapes() {
        for bad in ["", "abc", "a:b", "a:b:c:d", "a::c"] {
            assert!(ApiKey::new(bad).is_err(), "accepted {:?}", bad);
        }
    }
}
