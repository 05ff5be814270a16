use crate::utils::{ApiError, ApiResult};
use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use axum::{
    extract::{FromRequestParts, RawPathParams, Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// JWT claims structure
///
/// Tokens carry the user id and email plus issued-at. There is no expiry
/// claim; a token stays valid until the signing secret changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub id: i64,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_admin: Option<bool>,
    pub iat: i64,
}

/// Authenticated user context attached to requests by `auth_middleware`.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: i64,
    pub email: String,
    pub is_admin: bool,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.id,
            email: claims.email,
            is_admin: claims.is_admin.unwrap_or(false),
        }
    }
}

/// Issues and verifies session tokens with an injected signing secret.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Tokens are issued without an expiry claim.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Sign a token for the given user.
    ///
    /// Panics if `user_id` is zero or `email` is empty; callers must only
    /// issue tokens for authenticated users.
    pub fn issue(&self, user_id: i64, email: &str) -> ApiResult<String> {
        assert!(user_id != 0, "token requires a user id");
        assert!(!email.is_empty(), "token requires an email");

        let claims = Claims {
            id: user_id,
            email: email.to_string(),
            is_admin: None,
            iat: Utc::now().timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|_| ApiError::unexpected("Failed to generate token"))
    }

    /// Verify a token and return its claims.
    pub fn verify(&self, token: &str) -> ApiResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| ApiError::unauthorized("Invalid token"))
    }
}

/// Hash a password for storage.
pub fn hash_password(password: &str) -> ApiResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| ApiError::unexpected("Failed to hash password"))?;
    Ok(hash.to_string())
}

/// Verify a password against a stored hash.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    PasswordHash::new(stored_hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

/// Extract a bearer token from request headers.
///
/// The scheme is matched case-insensitively and surrounding whitespace is
/// trimmed from the token.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|auth_header| {
            let (scheme, token) = auth_header.split_once(' ')?;
            if scheme.eq_ignore_ascii_case("bearer") {
                Some(token.trim().to_string())
            } else {
                None
            }
        })
}

/// Authentication middleware.
///
/// If a valid bearer token is present, attaches the decoded identity as an
/// `AuthUser` extension. Missing or invalid tokens leave the request
/// anonymous; this layer never rejects.
pub async fn auth_middleware(
    State(tokens): State<Arc<TokenService>>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(token) = extract_bearer_token(request.headers()) {
        if let Ok(claims) = tokens.verify(&token) {
            request.extensions_mut().insert(AuthUser::from(claims));
        }
    }

    next.run(request).await
}

/// Required authentication middleware (returns 401 if no valid auth)
pub async fn require_auth(request: Request, next: Next) -> Result<Response, ApiError> {
    if request.extensions().get::<AuthUser>().is_none() {
        return Err(ApiError::unauthorized("Unauthorized"));
    }

    Ok(next.run(request).await)
}

/// Required admin middleware (returns 401 if not an admin)
pub async fn require_admin(request: Request, next: Next) -> Result<Response, ApiError> {
    match request.extensions().get::<AuthUser>() {
        Some(user) if user.is_admin => Ok(next.run(request).await),
        _ => Err(ApiError::unauthorized("Unauthorized")),
    }
}

/// Whether an admin identity may stand in for the path owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminOverride {
    Allowed,
    Denied,
}

type GuardFuture = Pin<Box<dyn Future<Output = Result<Response, ApiError>> + Send>>;

/// Build a guard that requires the caller to match the numeric path
/// parameter named `param` (or to be an admin, when the override allows).
///
/// A missing, unparseable, or mismatched parameter yields 401. Use with
/// `axum::middleware::from_fn` as a `route_layer`.
pub fn require_path_owner(
    param: &'static str,
    admin_override: AdminOverride,
) -> impl Fn(Request, Next) -> GuardFuture + Clone {
    move |request: Request, next: Next| {
        Box::pin(async move {
            let caller = request.extensions().get::<AuthUser>().cloned();

            let (mut parts, body) = request.into_parts();
            let params = RawPathParams::from_request_parts(&mut parts, &())
                .await
                .map_err(|_| ApiError::unauthorized("Unauthorized"))?;
            let owner_id = params
                .iter()
                .find(|(name, _)| *name == param)
                .and_then(|(_, value)| value.parse::<i64>().ok());
            let request = Request::from_parts(parts, body);

            let allowed = match &caller {
                Some(user) => {
                    (admin_override == AdminOverride::Allowed && user.is_admin)
                        || owner_id.is_some_and(|owner| user.id == owner)
                }
                None => false,
            };

            if allowed {
                Ok(next.run(request).await)
            } else {
                Err(ApiError::unauthorized("Unauthorized"))
            }
        })
    }
}
