use std::future::{ready, Ready};

use actix_web::{dev::Payload, http::header::Header, web, FromRequest, HttpRequest};
use actix_web_httpauth::headers::authorization::{Authorization, Bearer};
use argon2::{
    password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header as JwtHeader, Validation};
use rand_core::OsRng;
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, models::AdminUserRow, state::AppState};

/// Tokens are valid for 24 hours; there is no revocation before expiry.
pub const TOKEN_TTL_SECS: i64 = 86_400;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

/// The admin identity attached to a request by a verified bearer token.
#[derive(Clone, Debug)]
pub struct AuthAdmin {
    pub id: i64,
    pub email: String,
}

pub fn hash_password(password: &str) -> Result<String, password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

pub fn verify_password(password: &str, password_hash: &str) -> bool {
    match PasswordHash::new(password_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

pub fn issue_token(admin: &AdminUserRow, secret: &str) -> Result<String, ApiError> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: admin.id,
        email: admin.email.clone(),
        iat: now,
        exp: now + TOKEN_TTL_SECS,
    };
    encode(
        &JwtHeader::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|err| ApiError::Internal(format!("token signing failed: {err}")))
}

pub fn decode_token(token: &str, secret: &str) -> Result<Claims, ApiError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| ApiError::Unauthorized("Invalid or expired token.".to_string()))
}

pub async fn authenticate_credentials(
    state: &AppState,
    email: &str,
    password: &str,
) -> Result<AdminUserRow, ApiError> {
    let user = sqlx::query_as::<_, AdminUserRow>(
        r#"SELECT id, email, password_hash, created_at
           FROM admin_users
           WHERE email = ?
           LIMIT 1"#,
    )
    .bind(email)
    .fetch_optional(&state.db)
    .await?;

    let Some(user) = user else {
        return Err(ApiError::NotFound("User not found.".to_string()));
    };

    if !verify_password(password, &user.password_hash) {
        return Err(ApiError::Unauthorized("Invalid password.".to_string()));
    }

    Ok(user)
}

impl FromRequest for AuthAdmin {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(admin_from_request(req))
    }
}

fn admin_from_request(req: &HttpRequest) -> Result<AuthAdmin, ApiError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| ApiError::Internal("application state not configured".to_string()))?;

    // Missing or unparsable header is rejected before any signature work.
    let header = Authorization::<Bearer>::parse(req)
        .map_err(|_| ApiError::Forbidden("Access denied. No token provided.".to_string()))?;

    let claims = decode_token(header.into_scheme().token(), &state.auth.secret)?;
    Ok(AuthAdmin {
        id: claims.sub,
        email: claims.email,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_admin() -> AdminUserRow {
        AdminUserRow {
            id: 7,
            email: "admin@salao.com".to_string(),
            password_hash: String::new(),
            created_at: Utc::now().to_rfc3339(),
        }
    }

    #[test]
    fn password_hash_round_trip() {
        let hash = hash_password("senha_forte_123").unwrap();
        assert_ne!(hash, "senha_forte_123");
        assert!(verify_password("senha_forte_123", &hash));
        assert!(!verify_password("senha_errada", &hash));
    }

    #[test]
    fn garbage_hash_never_verifies() {
        assert!(!verify_password("anything", "not-a-phc-string"));
    }

    #[test]
    fn token_round_trip() {
        let token = issue_token(&sample_admin(), "secret").unwrap();
        let claims = decode_token(&token, "secret").unwrap();
        assert_eq!(claims.sub, 7);
        assert_eq!(claims.email, "admin@salao.com");
        assert_eq!(claims.exp - claims.iat, TOKEN_TTL_SECS);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = issue_token(&sample_admin(), "secret").unwrap();
        assert!(decode_token(&token, "another-secret").is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: 7,
            email: "admin@salao.com".to_string(),
            iat: now - 2 * TOKEN_TTL_SECS,
            exp: now - TOKEN_TTL_SECS,
        };
        let token = encode(
            &JwtHeader::default(),
            &claims,
            &EncodingKey::from_secret(b"secret"),
        )
        .unwrap();
        assert!(decode_token(&token, "secret").is_err());
    }

    #[test]
    fn malformed_token_is_rejected() {
        assert!(decode_token("definitely.not.a-jwt", "secret").is_err());
    }
}
