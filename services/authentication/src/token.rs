//! Access token issuance.

use crate::error::AuthError;
use rust_common::JwtService;

/// Issues signed access tokens for authenticated users.
pub trait TokenSigner: Send + Sync {
    /// Sign a token carrying `{sub: user_id, email}`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Token`] if signing fails.
    fn sign(&self, user_id: &str, email: &str) -> Result<String, AuthError>;
}

impl TokenSigner for JwtService {
    fn sign(&self, user_id: &str, email: &str) -> Result<String, AuthError> {
        Self::sign(self, user_id, email).map_err(|e| AuthError::Token(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_common::JwtConfig;
    use std::time::Duration;

    #[test]
    fn test_jwt_service_signs_subject_and_email() {
        let jwt = JwtService::new(JwtConfig::new("s3cret", Duration::from_secs(3600)));
        let signer: &dyn TokenSigner = &jwt;

        let token = signer.sign("user-1", "a@x.com").unwrap();
        let claims = jwt.verify(&token).unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.email, "a@x.com");
    }
}
