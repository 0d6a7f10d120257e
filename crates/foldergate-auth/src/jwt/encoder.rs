//! JWT token creation with configurable TTL.

use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};

use foldergate_core::config::AuthConfig;
use foldergate_core::error::AppError;
use foldergate_entity::user::OrgRole;

use super::claims::Claims;

/// Creates signed JWT access tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Access token TTL in minutes.
    access_ttl_minutes: u64,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("access_ttl_minutes", &self.access_ttl_minutes)
            .finish()
    }
}

/// A freshly issued access token.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AccessToken {
    /// The encoded token.
    pub token: String,
    /// Expiration timestamp.
    pub expires_at: DateTime<Utc>,
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            access_ttl_minutes: config.access_ttl_minutes,
        }
    }

    /// Issues an access token for a user acting in an org.
    pub fn issue(
        &self,
        user_id: i64,
        org_id: i64,
        role: OrgRole,
        login: &str,
    ) -> Result<AccessToken, AppError> {
        let now = Utc::now();
        let expires_at = i64::try_from(self.access_ttl_minutes)
            .ok()
            .and_then(TimeDelta::try_minutes)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| {
                AppError::configuration(format!(
                    "Access token TTL of {} minutes is out of range",
                    self.access_ttl_minutes
                ))
            })?;

        let claims = Claims {
            sub: user_id,
            org: org_id,
            role,
            login: login.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode access token: {e}")))?;

        Ok(AccessToken { token, expires_at })
    }
}

#[cfg(test)]
mod tests {
    use foldergate_core::error::ErrorKind;

    use super::*;

    fn config(access_ttl_minutes: u64) -> AuthConfig {
        AuthConfig {
            access_ttl_minutes,
            ..AuthConfig::default()
        }
    }

    #[test]
    fn test_expiry_follows_ttl() {
        let before = Utc::now();
        let token = JwtEncoder::new(&config(30))
            .issue(1, 1, OrgRole::Viewer, "viewer")
            .unwrap();

        let ttl = token.expires_at - before;
        assert!(ttl >= TimeDelta::minutes(30));
        assert!(ttl < TimeDelta::minutes(31));
    }

    #[test]
    fn test_out_of_range_ttl_is_a_configuration_error() {
        for minutes in [u64::MAX, i64::MAX as u64, 1 << 50] {
            let err = JwtEncoder::new(&config(minutes))
                .issue(1, 1, OrgRole::Viewer, "viewer")
                .unwrap_err();
            assert_eq!(err.kind, ErrorKind::Configuration);
        }
    }
}
