//! Auth0 JWT authentication middleware
//!
//! Validates the bearer token on every protected route and stores an
//! [`AuthContext`] in the request extensions. Permission checks happen in
//! the handlers, which each require their own RBAC permission.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    api::auth::jwt_validator::{
        fetch_jwks, validate_jwt_with_options, verify_audience, verify_issuer, AuthError,
    },
    error::ApiError,
    server::AppState,
};

/// Authenticated caller context, built from the validated token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthContext {
    /// User ID (subject claim)
    pub user_id: String,

    /// RBAC permissions from the token, when the claim was present
    pub permissions: Option<Vec<String>>,
}

impl AuthContext {
    /// Check whether the caller holds a permission.
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions
            .as_ref()
            .is_some_and(|perms| perms.iter().any(|p| p == permission))
    }

    /// Require a permission: a token without a `permissions` claim cannot
    /// be interpreted (400), a token lacking the permission is forbidden
    /// (403).
    pub fn require_permission(&self, permission: &str) -> Result<(), ApiError> {
        let Some(permissions) = &self.permissions else {
            return Err(ApiError::InvalidClaims {
                message: "Unable to parse authentication token.".to_string(),
            });
        };

        if permissions.iter().any(|p| p == permission) {
            Ok(())
        } else {
            warn!("Permission {} not granted to {}", permission, self.user_id);
            Err(ApiError::Authorization)
        }
    }
}

/// Authentication middleware validating Auth0 bearer tokens.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or(ApiError::MissingAuthentication)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .unwrap_or(auth_header)
        .trim();
    if token.is_empty() {
        return Err(ApiError::MissingAuthentication);
    }

    let auth0 = &state.config.auth0;

    let jwks = fetch_jwks(&auth0.jwks_url(), auth0.jwks_cache_ttl())
        .await
        .map_err(|e| {
            warn!("Failed to fetch JWKS from Auth0: {}", e);
            ApiError::AuthServiceUnavailable
        })?;

    let claims = validate_jwt_with_options(
        token,
        &jwks,
        Some(&auth0.audience),
        Some(auth0.allowed_clock_skew()),
    )
    .map_err(map_auth_error)?;

    verify_audience(&claims, &auth0.audience).map_err(map_auth_error)?;
    verify_issuer(&claims, &auth0.issuer()).map_err(map_auth_error)?;

    debug!("Authenticated subject {}", claims.sub);

    let auth_context = AuthContext {
        user_id: claims.sub,
        permissions: claims.permissions,
    };

    req.extensions_mut().insert(auth_context);

    Ok(next.run(req).await)
}

fn map_auth_error(err: AuthError) -> ApiError {
    match err {
        AuthError::MalformedHeader => ApiError::Authentication {
            message: "Authorization malformed.".to_string(),
        },
        AuthError::UnknownKey { .. } => ApiError::Authentication {
            message: "Unable to verify token signature.".to_string(),
        },
        AuthError::Expired => ApiError::Authentication {
            message: "Token expired.".to_string(),
        },
        AuthError::ClaimsMismatch => ApiError::ClaimsMismatch {
            message: "Incorrect claims. Please, check the audience and issuer.".to_string(),
        },
        AuthError::InvalidToken => ApiError::TokenParse,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(permissions: Option<Vec<&str>>) -> AuthContext {
        AuthContext {
            user_id: "auth0|barista".to_string(),
            permissions: permissions
                .map(|p| p.into_iter().map(String::from).collect()),
        }
    }

    #[test]
    fn test_has_permission() {
        let ctx = context(Some(vec!["get:drinks", "post:drinks"]));
        assert!(ctx.has_permission("get:drinks"));
        assert!(!ctx.has_permission("delete:drinks"));
    }

    #[test]
    fn test_require_permission_granted() {
        let ctx = context(Some(vec!["delete:drinks"]));
        assert!(ctx.require_permission("delete:drinks").is_ok());
    }

    #[test]
    fn test_require_permission_missing_claim_is_invalid_claims() {
        let ctx = context(None);
        let err = ctx.require_permission("get:drinks").unwrap_err();
        assert!(matches!(err, ApiError::InvalidClaims { .. }));
    }

    #[test]
    fn test_require_permission_not_granted_is_forbidden() {
        let ctx = context(Some(vec!["get:drinks"]));
        let err = ctx.require_permission("delete:drinks").unwrap_err();
        assert!(matches!(err, ApiError::Authorization));
    }

    #[test]
    fn test_map_auth_error_status_codes() {
        use axum::http::StatusCode;

        assert_eq!(
            map_auth_error(AuthError::Expired).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            map_auth_error(AuthError::ClaimsMismatch).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            map_auth_error(AuthError::InvalidToken).status_code(),
            StatusCode::BAD_REQUEST
        );
    }
}
