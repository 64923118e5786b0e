use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, Header, TokenData, Validation};
use uuid::Uuid;

use crate::entities::token::Claims;
use crate::errors::AuthError;
use crate::settings::{AppConfig, JwtKeys};

const JWT_ALGORITHM: Algorithm = Algorithm::HS512;

/// Verifies access tokens issued by the identity service. `create_jwt` signs with the
/// same shared secret and exists for local tooling and tests.
#[derive(Clone)]
pub struct JwtService {
    keys: JwtKeys,
    access_expiration: Duration,
}

impl JwtService {
    pub fn new(config: &AppConfig) -> Self {
        JwtService {
            keys: JwtKeys::from(config),
            access_expiration: Duration::minutes(60),
        }
    }

    pub fn create_jwt(&self, subject: &Uuid, email: Option<&str>) -> Result<String, AuthError> {
        let now = Utc::now();

        let claims = Claims {
            sub: subject.to_string(),
            email: email.map(str::to_string),
            exp: (now + self.access_expiration).timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(&Header::new(JWT_ALGORITHM), &claims, &self.keys.encoding)
            .map_err(|_| AuthError::TokenCreation)
    }

    pub fn decode_jwt(&self, token: &str) -> Result<TokenData<Claims>, AuthError> {
        let mut validation = Validation::new(JWT_ALGORITHM);
        validation.validate_exp = true;

        decode::<Claims>(token, &self.keys.decoding, &validation).map_err(AuthError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{AppEnvironment, StoreBackend};
    use crate::pdf::layout::PaperSize;

    fn service(secret: &str) -> JwtService {
        JwtService::new(&AppConfig {
            env: AppEnvironment::Testing,
            name: "test".into(),
            port: 0,
            host: "127.0.0.1".into(),
            worker_count: 1,
            store_backend: StoreBackend::Memory,
            database_url: String::new(),
            cors_allowed_origins: vec!["*".into()],
            jwt_secret: secret.into(),
            pdf_paper: PaperSize::A4,
        })
    }

    #[test]
    fn issued_token_round_trips_subject() {
        let jwt = service("a_test_secret_that_is_long_enough_1234567890");
        let owner = Uuid::new_v4();

        let token = jwt.create_jwt(&owner, Some("owner@example.com")).unwrap();
        let claims = jwt.decode_jwt(&token).unwrap().claims;

        assert_eq!(claims.requester_id().unwrap(), owner);
        assert_eq!(claims.email.as_deref(), Some("owner@example.com"));
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let issuer = service("a_test_secret_that_is_long_enough_1234567890");
        let verifier = service("another_secret_that_is_long_enough_0987654321");

        let token = issuer.create_jwt(&Uuid::new_v4(), None).unwrap();
        assert!(matches!(verifier.decode_jwt(&token), Err(AuthError::InvalidToken)));
    }
}
