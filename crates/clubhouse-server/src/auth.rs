//! Bearer-token gateway for the admin routes.
//!
//! An administrator exchanges the configured password for a signed HS256
//! token at `POST /api/admin/login`; every admin route then requires
//! `Authorization: Bearer <token>`.

use std::sync::Arc;

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::{
  Json,
  extract::{Request, State, rejection::JsonRejection},
  http::{HeaderMap, header},
  middleware::Next,
  response::Response,
};
use chrono::{Duration, TimeDelta, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{ServerConfig, error::Error};

/// Credentials and signing material for the single admin principal.
#[derive(Clone)]
pub struct AuthConfig {
  pub username:      String,
  /// PHC string produced by argon2, e.g. `$argon2id$v=19$…`
  pub password_hash: String,
  pub token_secret:  String,
  pub token_ttl:     Duration,
}

/// Fails unless `token_ttl_hours` is a positive, representable duration.
impl TryFrom<&ServerConfig> for AuthConfig {
  type Error = Error;

  fn try_from(cfg: &ServerConfig) -> Result<Self, Error> {
    let token_ttl = TimeDelta::try_hours(cfg.token_ttl_hours)
      .filter(|ttl| *ttl > TimeDelta::zero())
      .ok_or_else(|| {
        Error::InvalidConfig(format!(
          "token_ttl_hours must be a positive number of hours, got {}",
          cfg.token_ttl_hours
        ))
      })?;

    Ok(Self {
      username: cfg.admin_username.clone(),
      password_hash: cfg.admin_password_hash.clone(),
      token_secret: cfg.token_secret.clone(),
      token_ttl,
    })
  }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
  pub sub: String,
  pub iat: i64,
  pub exp: i64,
}

impl AuthConfig {
  fn secret(&self) -> Result<&[u8], Error> {
    if self.token_secret.is_empty() {
      return Err(Error::NotConfigured);
    }
    Ok(self.token_secret.as_bytes())
  }

  /// Check a login attempt. A missing username means the admin.
  pub fn verify_password(
    &self,
    username: Option<&str>,
    password: &str,
  ) -> Result<(), Error> {
    if self.password_hash.is_empty() {
      return Err(Error::NotConfigured);
    }
    if username.is_some_and(|u| u != self.username) {
      return Err(Error::Unauthorized);
    }

    let parsed = PasswordHash::new(&self.password_hash).map_err(|e| {
      tracing::error!(error = %e, "configured password hash is not a PHC string");
      Error::NotConfigured
    })?;

    Argon2::default()
      .verify_password(password.as_bytes(), &parsed)
      .map_err(|_| Error::Unauthorized)
  }

  /// Sign a fresh token for the admin.
  pub fn issue(&self) -> Result<String, Error> {
    let secret = self.secret()?;
    let now = Utc::now();
    let expires = now.checked_add_signed(self.token_ttl).ok_or_else(|| {
      Error::InvalidConfig("token lifetime overflows the calendar".to_string())
    })?;
    let claims = Claims {
      sub: self.username.clone(),
      iat: now.timestamp(),
      exp: expires.timestamp(),
    };
    Ok(encode(&Header::default(), &claims, &EncodingKey::from_secret(secret))?)
  }

  /// Decode and check a token: signature, expiry, and subject.
  pub fn verify_token(&self, token: &str) -> Result<Claims, Error> {
    let secret = self.secret()?;
    let data = decode::<Claims>(
      token,
      &DecodingKey::from_secret(secret),
      &Validation::default(),
    )
    .map_err(|e| {
      tracing::debug!(error = %e, "rejected bearer token");
      Error::Unauthorized
    })?;

    if data.claims.sub != self.username {
      tracing::warn!(sub = %data.claims.sub, "token for unknown subject");
      return Err(Error::Unauthorized);
    }
    Ok(data.claims)
  }
}

/// Verify the `Authorization: Bearer` header of a request.
pub fn verify_bearer(headers: &HeaderMap, config: &AuthConfig) -> Result<Claims, Error> {
  // A missing secret is a server fault even when the header is absent.
  config.secret()?;

  let token = headers
    .get(header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .and_then(|v| v.strip_prefix("Bearer "))
    .map(str::trim)
    .filter(|t| !t.is_empty())
    .ok_or(Error::Unauthorized)?;

  config.verify_token(token)
}

/// Middleware guarding the admin router.
pub async fn require_admin(
  State(auth): State<Arc<AuthConfig>>,
  req: Request,
  next: Next,
) -> Result<Response, Error> {
  if let Err(e) = verify_bearer(req.headers(), &auth) {
    tracing::warn!(method = %req.method(), uri = %req.uri(), "admin request rejected");
    return Err(e);
  }
  Ok(next.run(req).await)
}

// ─── Login ────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
  #[serde(default)]
  pub username: Option<String>,
  pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
  pub token:      String,
  /// Token lifetime in seconds.
  pub expires_in: i64,
}

pub async fn login(
  State(auth): State<Arc<AuthConfig>>,
  body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<LoginResponse>, Error> {
  let Json(body) = body.map_err(|r| Error::BadRequest(r.body_text()))?;
  let body: LoginRequest =
    serde_json::from_value(body).map_err(|e| Error::BadRequest(e.to_string()))?;
  auth.verify_password(body.username.as_deref(), &body.password)?;
  let token = auth.issue()?;
  tracing::info!(user = %auth.username, "admin logged in");
  Ok(Json(LoginResponse {
    token,
    expires_in: auth.token_ttl.num_seconds(),
  }))
}
