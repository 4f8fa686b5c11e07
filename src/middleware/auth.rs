use axum::{extract::Request, http::HeaderMap, middleware::Next, response::Response};

use uuid::Uuid;

use crate::auth::{validate_token, Claims};
use crate::error::ApiError;

/// Name of the session cookie set by the auth provider for browser clients.
pub const AUTH_COOKIE: &str = "auth_token";

/// Authenticated user context extracted from JWT
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.user_id,
            email: claims.email,
        }
    }
}

/// JWT authentication middleware that validates tokens and extracts user context
pub async fn jwt_auth_middleware(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_user = authenticate(&headers)?;

    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}

/// Resolve the current user from the Authorization header or session cookie.
/// Page loaders call this directly so they can redirect instead of 401ing.
pub fn authenticate(headers: &HeaderMap) -> Result<AuthUser, ApiError> {
    let token = extract_token(headers).map_err(ApiError::unauthorized)?;
    let claims = validate_token(&token).map_err(ApiError::unauthorized)?;
    Ok(AuthUser::from(claims))
}

/// Extract the JWT from the Authorization header, falling back to the
/// auth cookie for browser requests.
fn extract_token(headers: &HeaderMap) -> Result<String, String> {
    if let Some(auth_header) = headers
        .get("authorization")
        .or_else(|| headers.get("Authorization"))
    {
        let auth_str = auth_header
            .to_str()
            .map_err(|_| "Invalid Authorization header format".to_string())?;

        return if let Some(token) = auth_str.strip_prefix("Bearer ") {
            if token.trim().is_empty() {
                Err("Empty JWT token".to_string())
            } else {
                Ok(token.to_string())
            }
        } else {
            Err("Authorization header must use Bearer token format".to_string())
        };
    }

    if let Some(token) = extract_cookie(headers, AUTH_COOKIE) {
        return Ok(token);
    }

    Err("Missing Authorization header".to_string())
}

/// Pull a single cookie value out of the Cookie header
fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    let cookie_header = headers.get("cookie").or_else(|| headers.get("Cookie"))?;
    let cookie_str = cookie_header.to_str().ok()?;

    cookie_str.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        if key == name && !value.is_empty() {
            Some(value.to_string())
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(name: &'static str, value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(name, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_missing_header_is_rejected() {
        let headers = HeaderMap::new();
        assert!(extract_token(&headers).is_err());
    }

    #[test]
    fn test_bearer_token_extracted() {
        let headers = headers_with("authorization", "Bearer abc.def.ghi");
        assert_eq!(extract_token(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_non_bearer_scheme_rejected() {
        let headers = headers_with("authorization", "Basic dXNlcjpwYXNz");
        assert!(extract_token(&headers).is_err());
    }

    #[test]
    fn test_empty_bearer_rejected() {
        let headers = headers_with("authorization", "Bearer   ");
        assert!(extract_token(&headers).is_err());
    }

    #[test]
    fn test_cookie_fallback() {
        let headers = headers_with("cookie", "theme=dark; auth_token=tok123; lang=en");
        assert_eq!(extract_token(&headers).unwrap(), "tok123");
    }

    #[test]
    fn test_empty_cookie_value_ignored() {
        let headers = headers_with("cookie", "auth_token=");
        assert!(extract_token(&headers).is_err());
    }
}
