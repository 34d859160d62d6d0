use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from the admin gate
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("You need to be signed in to access this page")]
    Unauthenticated,

    #[error("You do not have permission to access the admin area")]
    Forbidden,
}

/// Claims issued by the sign-in provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    pub exp: usize,
}

/// Signed-in status and admin check
///
/// Sign-in itself is delegated to the identity provider; this only verifies
/// its HS256 tokens and compares the user id against the admin list.
pub struct AuthGate {
    key: Option<DecodingKey>,
    admin_uids: Vec<String>,
}

impl AuthGate {
    pub fn new(jwt_secret: Option<&str>, admin_uids: Vec<String>) -> Self {
        let key = jwt_secret
            .filter(|s| !s.is_empty())
            .map(|s| DecodingKey::from_secret(s.as_bytes()));

        let admin_uids = admin_uids
            .into_iter()
            .map(|uid| uid.trim().to_string())
            .filter(|uid| !uid.is_empty())
            .collect();

        Self { key, admin_uids }
    }

    /// User id of a valid bearer token, if any
    pub fn signed_in_user(&self, req: &actix_web::HttpRequest) -> Option<String> {
        let key = self.key.as_ref()?;
        let token = req
            .headers()
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))?;

        match decode::<Claims>(token.trim(), key, &Validation::new(Algorithm::HS256)) {
            Ok(data) => Some(data.claims.sub),
            Err(e) => {
                tracing::debug!("Rejected bearer token: {}", e);
                None
            }
        }
    }

    pub fn is_admin(&self, user_id: &str) -> bool {
        self.admin_uids.iter().any(|uid| uid == user_id)
    }

    /// User id of a signed-in admin, or why access is denied
    pub fn require_admin(&self, req: &actix_web::HttpRequest) -> Result<String, AuthError> {
        let user_id = self.signed_in_user(req).ok_or(AuthError::Unauthenticated)?;
        if self.is_admin(&user_id) {
            Ok(user_id)
        } else {
            Err(AuthError::Forbidden)
        }
    }
}
