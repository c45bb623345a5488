//! Authentication primitives: JWKS fetching and JWT validation

pub mod jwt_validator;

pub use jwt_validator::{
    fetch_jwks, validate_jwt_with_options, verify_audience, verify_issuer, AuthError, Claims,
    JwkSet,
};
