use std::sync::Arc;

use configs::{AuthConfig, AuthMode};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use tracing::{debug, warn};

use super::domain::{Caller, Claims};
use super::errors::AuthError;

/// Decides whether a request may proceed, given the token it presented.
pub trait AuthStrategy: Send + Sync {
    fn authenticate(&self, token: Option<&str>) -> Result<Caller, AuthError>;
    fn name(&self) -> &'static str;
}

/// HS256 bearer tokens with a mandatory, unexpired `exp`.
pub struct JwtStrategy {
    key: DecodingKey,
    validation: Validation,
}

impl JwtStrategy {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);
        Self { key: DecodingKey::from_secret(secret.as_bytes()), validation }
    }
}

impl AuthStrategy for JwtStrategy {
    fn authenticate(&self, token: Option<&str>) -> Result<Caller, AuthError> {
        let token = token.map(str::trim).filter(|t| !t.is_empty()).ok_or(AuthError::MissingCredentials)?;
        let data = decode::<Claims>(token, &self.key, &self.validation).map_err(|e| {
            debug!(error = %e, "token_rejected");
            AuthError::InvalidToken(e.to_string())
        })?;
        Ok(Caller { subject: data.claims.sub, anonymous: false })
    }

    fn name(&self) -> &'static str { "verify" }
}

/// Admits everything. Development only.
pub struct BypassStrategy;

impl AuthStrategy for BypassStrategy {
    fn authenticate(&self, _token: Option<&str>) -> Result<Caller, AuthError> { Ok(Caller::anonymous()) }

    fn name(&self) -> &'static str { "bypass" }
}

/// Pick the strategy once, at startup.
pub fn from_config(cfg: &AuthConfig) -> Arc<dyn AuthStrategy> {
    match cfg.mode {
        AuthMode::Verify => Arc::new(JwtStrategy::new(&cfg.jwt_secret)),
        AuthMode::Bypass => {
            warn!("authentication bypass enabled; every request is admitted");
            Arc::new(BypassStrategy)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn token(secret: &str, exp_offset_secs: i64) -> String {
        let exp = (chrono::Utc::now().timestamp() + exp_offset_secs) as usize;
        let claims = Claims { sub: "recepcao@lolli.pet".into(), exp };
        encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
    }

    #[test]
    fn verify_accepts_valid_token() {
        let s = JwtStrategy::new("s3cret");
        let caller = s.authenticate(Some(&token("s3cret", 3600))).unwrap();
        assert_eq!(caller.subject, "recepcao@lolli.pet");
        assert!(!caller.anonymous);
    }

    #[test]
    fn verify_rejects_missing_wrong_and_expired() {
        let s = JwtStrategy::new("s3cret");
        assert!(matches!(s.authenticate(None), Err(AuthError::MissingCredentials)));
        assert!(matches!(s.authenticate(Some("  ")), Err(AuthError::MissingCredentials)));
        assert!(matches!(s.authenticate(Some(&token("other", 3600))), Err(AuthError::InvalidToken(_))));
        assert!(matches!(s.authenticate(Some(&token("s3cret", -60))), Err(AuthError::InvalidToken(_))));
        assert!(matches!(s.authenticate(Some("garbage")), Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn bypass_admits_everyone() {
        let caller = BypassStrategy.authenticate(None).unwrap();
        assert!(caller.anonymous);
    }

    #[test]
    fn strategy_follows_config() {
        let verify = from_config(&AuthConfig { mode: AuthMode::Verify, jwt_secret: "x".into() });
        assert_eq!(verify.name(), "verify");
        let bypass = from_config(&AuthConfig { mode: AuthMode::Bypass, jwt_secret: String::new() });
        assert_eq!(bypass.name(), "bypass");
    }
}
