//! Request authentication guard.
//!
//! Handlers opt into authentication by taking a [`CurrentUser`] argument.
//! The extractor pulls the bearer token out of the `Authorization` header,
//! verifies it and re-resolves the subject against the credential store, so
//! a token stops working the moment its account is removed. Nothing is
//! cached between requests.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{header, HeaderMap};
use terrain_auth::{AuthError, Identity};

use crate::error::AppError;
use crate::AppState;

/// The authenticated account for the current request.
pub struct CurrentUser(pub Identity);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)
            .ok_or_else(|| AppError::Unauthenticated("Missing bearer token".to_string()))?;

        let claims = state.codec.verify(token)?;

        let identity = state
            .store
            .find_by_username(&claims.sub)?
            .ok_or(AuthError::UnknownSubject(claims.sub))?;

        Ok(CurrentUser(identity))
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))?;
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_authorization(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_bearer_token_extracted() {
        let headers = headers_with_authorization("Bearer abc.def.ghi");
        assert_eq!(bearer_token(&headers), Some("abc.def.ghi"));
    }

    #[test]
    fn test_lowercase_scheme_accepted() {
        let headers = headers_with_authorization("bearer abc.def.ghi");
        assert_eq!(bearer_token(&headers), Some("abc.def.ghi"));
    }

    #[test]
    fn test_missing_header() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_wrong_scheme_rejected() {
        let headers = headers_with_authorization("Basic dXNlcjpwYXNz");
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn test_bare_token_rejected() {
        let headers = headers_with_authorization("abc.def.ghi");
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn test_empty_token_rejected() {
        let headers = headers_with_authorization("Bearer ");
        assert_eq!(bearer_token(&headers), None);
    }
}
