//! JWT validation for the Auth0 integration
//!
//! Fetches the tenant JWKS (JSON Web Key Set), caches it, and validates
//! RS256 access tokens: signature, expiry, audience, and issuer. The
//! `permissions` claim (Auth0 RBAC) is surfaced for the authorization layer.

use anyhow::{anyhow, Result};
use jsonwebtoken::{decode, decode_header, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use moka::future::Cache;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, warn};

/// JSON Web Key Set structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwkSet {
    pub keys: Vec<Jwk>,
}

/// JSON Web Key structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Jwk {
    pub kty: String,
    pub kid: Option<String>,
    pub alg: Option<String>,
    pub r#use: Option<String>,
    pub n: Option<String>,
    pub e: Option<String>,
    #[serde(flatten)]
    pub other: HashMap<String, Value>,
}

/// A fetched key set together with its fetch time, so each lookup can be
/// checked against the caller's configured TTL.
#[derive(Debug)]
struct CachedJwks {
    fetched_at: Instant,
    jwks: JwkSet,
}

/// Global JWKS cache, keyed by JWKS URL. The builder TTL is only an upper
/// bound for eviction; freshness is enforced per lookup in [`fetch_jwks`].
static JWKS_CACHE: Lazy<Cache<String, Arc<CachedJwks>>> = Lazy::new(|| {
    Cache::builder()
        .time_to_live(Duration::from_secs(24 * 3600))
        .max_capacity(16)
        .build()
});

/// Errors from token validation, distinguished so the API layer can keep
/// the status codes and error codes the frontend expects.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Token header carries no key id
    #[error("Authorization malformed.")]
    MalformedHeader,

    /// No JWKS key matches the token's key id
    #[error("No matching key found for key ID: {kid}")]
    UnknownKey { kid: String },

    /// Token signature has expired
    #[error("Token expired.")]
    Expired,

    /// Audience or issuer claim does not match ours
    #[error("Incorrect claims. Please, check the audience and issuer.")]
    ClaimsMismatch,

    /// Token could not be decoded or verified
    #[error("Unable to parse authentication token.")]
    InvalidToken,
}

/// Standard JWT claims that we validate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,
    /// Audience (intended recipient of the token)
    pub aud: serde_json::Value,
    /// Issuer (who issued the token)
    pub iss: String,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issued at (Unix timestamp)
    #[serde(default)]
    pub iat: Option<u64>,
    /// RBAC permissions granted to the subject
    #[serde(default)]
    pub permissions: Option<Vec<String>>,
    /// Custom claims
    #[serde(flatten)]
    pub custom: HashMap<String, serde_json::Value>,
}

/// Fetch a JWKS, with per-URL caching.
///
/// # Arguments
/// * `jwks_url` - Full JWKS endpoint URL (see `Auth0Config::jwks_url`)
/// * `cache_ttl` - How long a previously fetched key set stays fresh
pub async fn fetch_jwks(jwks_url: &str, cache_ttl: Duration) -> Result<JwkSet> {
    if let Some(cached) = JWKS_CACHE.get(jwks_url).await {
        if cached.fetched_at.elapsed() < cache_ttl {
            debug!("Using cached JWKS for {}", jwks_url);
            return Ok(cached.jwks.clone());
        }
        JWKS_CACHE.invalidate(jwks_url).await;
    }

    debug!("Fetching JWKS from {}", jwks_url);

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .build()
        .map_err(|e| anyhow!("Failed to create HTTP client: {}", e))?;

    let response = client
        .get(jwks_url)
        .header("User-Agent", concat!("barista-api/", env!("CARGO_PKG_VERSION")))
        .send()
        .await
        .map_err(|e| anyhow!("Failed to fetch JWKS: {}", e))?;

    if !response.status().is_success() {
        return Err(anyhow!(
            "JWKS endpoint returned error status: {}",
            response.status()
        ));
    }

    let jwks: JwkSet = response
        .json()
        .await
        .map_err(|e| anyhow!("Failed to parse JWKS JSON: {}", e))?;

    if jwks.keys.is_empty() {
        return Err(anyhow!("JWKS contains no keys"));
    }

    debug!("Fetched JWKS with {} keys", jwks.keys.len());

    JWKS_CACHE
        .insert(
            jwks_url.to_string(),
            Arc::new(CachedJwks {
                fetched_at: Instant::now(),
                jwks: jwks.clone(),
            }),
        )
        .await;

    Ok(jwks)
}

/// Validate a JWT against the JWKS: signature, expiry, and audience.
///
/// The issuer is checked separately with [`verify_issuer`] so the caller
/// controls the expected value.
pub fn validate_jwt_with_options(
    token: &str,
    jwks: &JwkSet,
    expected_audience: Option<&str>,
    clock_skew: Option<Duration>,
) -> Result<Claims, AuthError> {
    let header = decode_header(token).map_err(|e| {
        debug!("Failed to decode JWT header: {}", e);
        AuthError::InvalidToken
    })?;

    let key_id = header.kid.ok_or(AuthError::MalformedHeader)?;

    let jwk = jwks
        .keys
        .iter()
        .find(|k| k.kid.as_ref() == Some(&key_id))
        .ok_or_else(|| AuthError::UnknownKey { kid: key_id.clone() })?;

    if jwk.kty != "RSA" {
        warn!("Unsupported JWK key type: {}", jwk.kty);
        return Err(AuthError::InvalidToken);
    }

    // JWK carries the RSA components base64url-encoded, which is exactly
    // what from_rsa_components expects.
    let (n, e) = match (&jwk.n, &jwk.e) {
        (Some(n), Some(e)) => (n, e),
        _ => {
            warn!("RSA key {} missing modulus or exponent", key_id);
            return Err(AuthError::InvalidToken);
        }
    };
    let decoding_key = DecodingKey::from_rsa_components(n, e).map_err(|e| {
        warn!("Failed to build decoding key: {}", e);
        AuthError::InvalidToken
    })?;

    let mut validation = Validation::new(Algorithm::RS256);
    if let Some(aud) = expected_audience {
        validation.set_audience(&[aud]);
    } else {
        validation.validate_aud = false;
    }
    if let Some(skew) = clock_skew {
        validation.leeway = skew.as_secs();
    }

    let token_data =
        decode::<Claims>(token, &decoding_key, &validation).map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::Expired,
            ErrorKind::InvalidAudience | ErrorKind::InvalidIssuer => AuthError::ClaimsMismatch,
            _ => {
                debug!("JWT validation failed: {}", e);
                AuthError::InvalidToken
            }
        })?;

    debug!("JWT valid for subject {}", token_data.claims.sub);

    Ok(token_data.claims)
}

/// Verify the token audience against the configured API audience.
///
/// Auth0 tokens carry either a single audience (string) or several (array).
pub fn verify_audience(claims: &Claims, expected: &str) -> Result<(), AuthError> {
    match &claims.aud {
        serde_json::Value::String(aud) => {
            if aud == expected {
                Ok(())
            } else {
                warn!("Audience mismatch: expected={}, got={}", expected, aud);
                Err(AuthError::ClaimsMismatch)
            }
        }
        serde_json::Value::Array(audiences) => {
            let found = audiences
                .iter()
                .any(|aud| aud.as_str() == Some(expected));
            if found {
                Ok(())
            } else {
                warn!(
                    "Audience not found in array: expected={}, got={:?}",
                    expected, audiences
                );
                Err(AuthError::ClaimsMismatch)
            }
        }
        _ => {
            warn!("Invalid audience format in JWT claims");
            Err(AuthError::ClaimsMismatch)
        }
    }
}

/// Verify the token issuer against the configured tenant issuer.
pub fn verify_issuer(claims: &Claims, expected: &str) -> Result<(), AuthError> {
    if claims.iss == expected {
        Ok(())
    } else {
        warn!("Issuer mismatch: expected={}, got={}", expected, claims.iss);
        Err(AuthError::ClaimsMismatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_test_claims(aud: serde_json::Value, iss: &str) -> Claims {
        Claims {
            sub: "auth0|test_user".to_string(),
            aud,
            iss: iss.to_string(),
            exp: 9999999999,
            iat: Some(1234567890),
            permissions: Some(vec!["get:drinks".to_string()]),
            custom: HashMap::new(),
        }
    }

    #[test]
    fn test_verify_audience_string_success() {
        let claims = create_test_claims(json!("coffee-jwt"), "https://tenant.auth0.com/");
        assert!(verify_audience(&claims, "coffee-jwt").is_ok());
    }

    #[test]
    fn test_verify_audience_string_failure() {
        let claims = create_test_claims(json!("coffee-jwt"), "https://tenant.auth0.com/");
        assert!(verify_audience(&claims, "wrong-audience").is_err());
    }

    #[test]
    fn test_verify_audience_array() {
        let claims = create_test_claims(
            json!(["coffee-jwt", "https://tenant.auth0.com/userinfo"]),
            "https://tenant.auth0.com/",
        );
        assert!(verify_audience(&claims, "coffee-jwt").is_ok());
        assert!(verify_audience(&claims, "tea-jwt").is_err());
    }

    #[test]
    fn test_verify_audience_invalid_format() {
        let claims = create_test_claims(json!(123), "https://tenant.auth0.com/");
        assert!(verify_audience(&claims, "coffee-jwt").is_err());
    }

    #[test]
    fn test_verify_issuer() {
        let claims = create_test_claims(json!("coffee-jwt"), "https://tenant.auth0.com/");
        assert!(verify_issuer(&claims, "https://tenant.auth0.com/").is_ok());
        assert!(verify_issuer(&claims, "https://other.auth0.com/").is_err());
    }

    #[test]
    fn test_validate_rejects_garbage_token() {
        let jwks = JwkSet { keys: vec![] };
        let result = validate_jwt_with_options("not-a-jwt", &jwks, None, None);
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_validate_rejects_unknown_kid() {
        // Unsigned token with a kid no JWKS key matches. Header decoding
        // succeeds, key lookup must fail.
        use base64::engine::general_purpose::URL_SAFE_NO_PAD;
        use base64::Engine;

        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"RS256","typ":"JWT","kid":"nope"}"#);
        let payload = URL_SAFE_NO_PAD.encode(r#"{"sub":"x","exp":9999999999}"#);
        let token = format!("{header}.{payload}.sig");

        let jwks = JwkSet { keys: vec![] };
        let result = validate_jwt_with_options(&token, &jwks, None, None);
        assert!(matches!(result, Err(AuthError::UnknownKey { .. })));
    }

    #[test]
    fn test_validate_rejects_missing_kid() {
        use base64::engine::general_purpose::URL_SAFE_NO_PAD;
        use base64::Engine;

        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"RS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(r#"{"sub":"x","exp":9999999999}"#);
        let token = format!("{header}.{payload}.sig");

        let jwks = JwkSet { keys: vec![] };
        let result = validate_jwt_with_options(&token, &jwks, None, None);
        assert!(matches!(result, Err(AuthError::MalformedHeader)));
    }

    fn jwks_body() -> serde_json::Value {
        json!({
            "keys": [{
                "kty": "RSA",
                "kid": "key-1",
                "alg": "RS256",
                "use": "sig",
                "n": "sXchZvVEN2xXpsYwB3Or0blnFJNXfMTNl9MNCGvBWJ8",
                "e": "AQAB"
            }]
        })
    }

    #[tokio::test]
    async fn test_fetch_jwks_caches_within_ttl() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/.well-known/jwks.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(jwks_body()))
            .expect(1)
            .mount(&server)
            .await;

        let url = format!("{}/.well-known/jwks.json", server.uri());
        let ttl = Duration::from_secs(3600);

        let first = fetch_jwks(&url, ttl).await.unwrap();
        assert_eq!(first.keys.len(), 1);

        // Second lookup within the TTL must be served from the cache; the
        // expect(1) above fails the test if the endpoint is hit again.
        let second = fetch_jwks(&url, ttl).await.unwrap();
        assert_eq!(second.keys[0].kid.as_deref(), Some("key-1"));
    }

    #[tokio::test]
    async fn test_fetch_jwks_refetches_after_ttl() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/.well-known/jwks.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(jwks_body()))
            .expect(2)
            .mount(&server)
            .await;

        let url = format!("{}/.well-known/jwks.json", server.uri());

        // A zero TTL makes every cached entry stale immediately.
        fetch_jwks(&url, Duration::ZERO).await.unwrap();
        fetch_jwks(&url, Duration::ZERO).await.unwrap();
    }

    #[tokio::test]
    async fn test_fetch_jwks_rejects_empty_key_set() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/.well-known/jwks.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"keys": []})))
            .mount(&server)
            .await;

        let url = format!("{}/.well-known/jwks.json", server.uri());
        // Wiremock pools listener ports across tests, so another test may
        // already have populated the process-global cache under this URL.
        JWKS_CACHE.invalidate(&url).await;
        let result = fetch_jwks(&url, Duration::from_secs(60)).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_fetch_jwks_unreachable_endpoint_errors() {
        // Nothing listens on the discard port, the connect fails fast.
        let result = fetch_jwks(
            "http://127.0.0.1:9/.well-known/jwks.json",
            Duration::from_secs(60),
        )
        .await;
        assert!(result.is_err());
    }

    #[test]
    fn test_claims_deserialize_without_permissions() {
        let claims: Claims = serde_json::from_value(json!({
            "sub": "auth0|abc",
            "aud": "coffee-jwt",
            "iss": "https://tenant.auth0.com/",
            "exp": 9999999999u64,
            "iat": 1234567890u64,
        }))
        .unwrap();
        assert!(claims.permissions.is_none());
    }
}
