use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};

use crate::claims::{JwtClaims, TokenValidationError, validate_claims};

/// Token verification collaborator.
///
/// The gate treats *any* failure from this trait uniformly as
/// "not authenticated"; callers must never learn whether a bad token was
/// malformed, forged, or merely expired beyond what the error message says.
pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, TokenValidationError>;
}

impl<T: TokenVerifier + ?Sized> TokenVerifier for std::sync::Arc<T> {
    fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, TokenValidationError> {
        (**self).verify(token, now)
    }
}

/// HS256 bearer-token verifier.
///
/// Signature verification is delegated to `jsonwebtoken`; time-window checks
/// run against our own `issued_at`/`expires_at` claims so clock handling is
/// deterministic and testable.
pub struct Hs256TokenVerifier {
    decoding: DecodingKey,
    validation: Validation,
}

impl Hs256TokenVerifier {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry lives in our own claims, validated by `validate_claims`.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Self {
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }
}

impl TokenVerifier for Hs256TokenVerifier {
    fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, TokenValidationError> {
        let data = jsonwebtoken::decode::<JwtClaims>(token, &self.decoding, &self.validation)
            .map_err(|_| TokenValidationError::Malformed)?;

        validate_claims(&data.claims, now)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use jsonwebtoken::{EncodingKey, Header};
    use staffhq_core::UserId;

    use crate::Role;

    fn mint(secret: &str, issued: DateTime<Utc>, expires: DateTime<Utc>) -> String {
        let claims = JwtClaims {
            sub: UserId::new(),
            role: Role::Admin,
            issued_at: issued,
            expires_at: expires,
        };
        jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("failed to encode jwt")
    }

    #[test]
    fn verifies_a_token_minted_with_the_same_secret() {
        let now = Utc::now();
        let token = mint("s3cret", now, now + Duration::minutes(10));
        let verifier = Hs256TokenVerifier::new(b"s3cret");

        let claims = verifier.verify(&token, now).unwrap();
        assert_eq!(claims.role, Role::Admin);
    }

    #[test]
    fn rejects_wrong_secret_and_expired_tokens() {
        let now = Utc::now();

        let forged = mint("other-secret", now, now + Duration::minutes(10));
        let verifier = Hs256TokenVerifier::new(b"s3cret");
        assert_eq!(
            verifier.verify(&forged, now),
            Err(TokenValidationError::Malformed)
        );

        let stale = mint("s3cret", now - Duration::hours(2), now - Duration::hours(1));
        assert_eq!(
            verifier.verify(&stale, now),
            Err(TokenValidationError::Expired)
        );
    }

    #[test]
    fn rejects_garbage_tokens() {
        let verifier = Hs256TokenVerifier::new(b"s3cret");
        assert_eq!(
            verifier.verify("not-a-jwt", Utc::now()),
            Err(TokenValidationError::Malformed)
        );
    }
}
