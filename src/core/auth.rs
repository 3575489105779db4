//! Authorization system
//!
//! Tokens are HS256 JWTs issued by the identity provider that shares
//! `JWT_SECRET`. The [`require_auth`] middleware verifies the bearer token
//! and stores an [`AuthContext`] in the request extensions; handlers extract
//! it and check an [`AuthPolicy`].

use crate::config::JwtConfig;
use crate::core::error::{AppError, RequestError};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use validator::Validate;

pub const ROLE_ADMIN: &str = "ADMIN";
pub const ROLE_APPROVER: &str = "APPROVER";

/// Distinguishes short-lived access tokens from refresh tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// JWT payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User identifier in the identity provider
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
    pub typ: TokenKind,
    pub iat: i64,
    pub exp: i64,
}

/// Access and refresh tokens returned by `/auth/refresh`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    /// Access token lifetime in seconds
    pub expires_in: u64,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenDto {
    #[validate(length(min = 1, message = "El token de actualización es obligatorio"))]
    pub refresh_token: String,
}

/// Signing and verification keys for both token kinds
pub struct JwtKeys {
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl JwtKeys {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            access_encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            access_decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            refresh_encoding: EncodingKey::from_secret(config.refresh_secret.as_bytes()),
            refresh_decoding: DecodingKey::from_secret(config.refresh_secret.as_bytes()),
            access_ttl: config.expires_in,
            refresh_ttl: config.refresh_expires_in,
        }
    }

    /// Sign a token of the given kind
    pub fn issue(
        &self,
        kind: TokenKind,
        subject: &str,
        name: Option<&str>,
        roles: &[String],
    ) -> Result<String, AppError> {
        let (key, ttl) = match kind {
            TokenKind::Access => (&self.access_encoding, self.access_ttl),
            TokenKind::Refresh => (&self.refresh_encoding, self.refresh_ttl),
        };
        let iat = Utc::now().timestamp();
        let exp = i64::try_from(ttl.as_secs())
            .ok()
            .and_then(|ttl| iat.checked_add(ttl))
            .ok_or_else(|| AppError::Internal("token lifetime out of range".to_string()))?;
        let claims = Claims {
            sub: subject.to_string(),
            name: name.map(str::to_string),
            roles: roles.to_vec(),
            typ: kind,
            iat,
            exp,
        };

        encode(&Header::new(Algorithm::HS256), &claims, key)
            .map_err(|e| AppError::Internal(format!("failed to sign token: {e}")))
    }

    /// Issue a fresh access/refresh pair for the given identity
    pub fn issue_pair(
        &self,
        subject: &str,
        name: Option<&str>,
        roles: &[String],
    ) -> Result<TokenPair, AppError> {
        Ok(TokenPair {
            access_token: self.issue(TokenKind::Access, subject, name, roles)?,
            refresh_token: self.issue(TokenKind::Refresh, subject, name, roles)?,
            token_type: "Bearer".to_string(),
            expires_in: self.access_ttl.as_secs(),
        })
    }

    /// Verify signature, expiry and token kind
    pub fn verify(&self, token: &str, kind: TokenKind) -> Result<Claims, RequestError> {
        let key = match kind {
            TokenKind::Access => &self.access_decoding,
            TokenKind::Refresh => &self.refresh_decoding,
        };
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let claims = decode::<Claims>(token, key, &validation)
            .map_err(|e| RequestError::Unauthorized {
                message: format!("invalid token: {e}"),
            })?
            .claims;

        if claims.typ != kind {
            return Err(RequestError::Unauthorized {
                message: "wrong token type".to_string(),
            });
        }
        Ok(claims)
    }
}

/// Authorization context extracted from a request
#[derive(Debug, Clone)]
pub enum AuthContext {
    /// Authenticated user
    User {
        user_id: String,
        name: Option<String>,
        roles: Vec<String>,
    },

    /// No authentication (public routes)
    Anonymous,
}

impl AuthContext {
    /// Get user_id if available
    pub fn user_id(&self) -> Option<&str> {
        match self {
            AuthContext::User { user_id, .. } => Some(user_id),
            AuthContext::Anonymous => None,
        }
    }

    pub fn has_role(&self, role: &str) -> bool {
        match self {
            AuthContext::User { roles, .. } => roles.iter().any(|r| r.eq_ignore_ascii_case(role)),
            AuthContext::Anonymous => false,
        }
    }

    /// Check a policy, failing with 401 or 403
    pub fn require(&self, policy: &AuthPolicy) -> Result<(), RequestError> {
        if policy.check(self) {
            return Ok(());
        }
        match self {
            AuthContext::Anonymous => Err(RequestError::Unauthorized {
                message: "authentication required".to_string(),
            }),
            AuthContext::User { .. } => Err(RequestError::Forbidden {
                message: format!("requires {policy}"),
            }),
        }
    }
}

impl From<Claims> for AuthContext {
    fn from(claims: Claims) -> Self {
        AuthContext::User {
            user_id: claims.sub,
            name: claims.name,
            roles: claims.roles,
        }
    }
}

impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .unwrap_or(AuthContext::Anonymous))
    }
}

/// Authorization policy for an operation
#[derive(Debug, Clone)]
pub enum AuthPolicy {
    /// Public access (no auth required)
    Public,

    /// Any authenticated user
    Authenticated,

    /// User must have one of these roles
    HasRole(Vec<String>),
}

impl AuthPolicy {
    /// Shorthand for a role-restricted policy
    pub fn roles(roles: &[&str]) -> Self {
        AuthPolicy::HasRole(roles.iter().map(|r| r.to_string()).collect())
    }

    /// Check if auth context satisfies this policy
    pub fn check(&self, context: &AuthContext) -> bool {
        match self {
            AuthPolicy::Public => true,
            AuthPolicy::Authenticated => !matches!(context, AuthContext::Anonymous),
            AuthPolicy::HasRole(required) => required.iter().any(|r| context.has_role(r)),
        }
    }
}

impl std::fmt::Display for AuthPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthPolicy::Public => f.write_str("public access"),
            AuthPolicy::Authenticated => f.write_str("an authenticated user"),
            AuthPolicy::HasRole(roles) => write!(f, "role {}", roles.join(" or ")),
        }
    }
}

/// Middleware verifying `Authorization: Bearer <access token>`
pub async fn require_auth(
    State(keys): State<Arc<JwtKeys>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(&req).ok_or_else(|| RequestError::Unauthorized {
        message: "missing bearer token".to_string(),
    })?;

    let claims = keys.verify(token, TokenKind::Access)?;
    tracing::debug!(user = %claims.sub, "request authenticated");
    req.extensions_mut().insert(AuthContext::from(claims));

    Ok(next.run(req).await)
}

fn bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if scheme.eq_ignore_ascii_case("bearer") && !token.trim().is_empty() {
        Some(token.trim())
    } else {
        None
    }
}
