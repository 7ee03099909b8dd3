use crate::error::{AppError, AppResult};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

/// 令牌由外部认证服务签发，这里只校验 HS256 签名与过期时间
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user_id
    pub exp: i64,
    pub iat: i64,
    #[serde(default = "default_token_type")]
    pub token_type: String, // "access" or "refresh"
}

fn default_token_type() -> String {
    "access".to_string()
}

impl Claims {
    pub fn user_id(&self) -> AppResult<i64> {
        self.sub
            .parse()
            .map_err(|_| AppError::AuthError("Invalid token subject".to_string()))
    }
}

#[derive(Clone)]
pub struct JwtService {
    decoding_key: DecodingKey,
}

impl JwtService {
    pub fn new(secret: &str) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(AppError::JwtError)
    }

    pub fn verify_access_token(&self, token: &str) -> AppResult<Claims> {
        let claims = self.verify_token(token)?;

        if claims.token_type != "access" {
            return Err(AppError::AuthError("Invalid access token type".to_string()));
        }

        Ok(claims)
    }
}

#[cfg(test)]
pub(crate) fn issue_test_token(secret: &str, user_id: i64, token_type: &str) -> String {
    use chrono::{Duration, Utc};
    use jsonwebtoken::{EncodingKey, Header, encode};

    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        exp: (now + Duration::hours(1)).timestamp(),
        iat: now.timestamp(),
        token_type: token_type.to_string(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_access_token() {
        let service = JwtService::new("secret");
        let token = issue_test_token("secret", 42, "access");
        let claims = service.verify_access_token(&token).unwrap();
        assert_eq!(claims.user_id().unwrap(), 42);
    }

    #[test]
    fn test_reject_refresh_token() {
        let service = JwtService::new("secret");
        let token = issue_test_token("secret", 42, "refresh");
        assert!(matches!(
            service.verify_access_token(&token),
            Err(AppError::AuthError(_))
        ));
    }

    #[test]
    fn test_reject_wrong_secret() {
        let service = JwtService::new("secret");
        let token = issue_test_token("other", 42, "access");
        assert!(matches!(
            service.verify_access_token(&token),
            Err(AppError::JwtError(_))
        ));
    }
}
