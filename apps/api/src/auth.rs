//! Identity is delegated to an external provider; the gateway in front of this
//! service verifies the session and forwards the subject as `x-user-id`.
//! Handlers only ever see the authenticated UUID.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::errors::AppError;

const USER_ID_HEADER: &str = "x-user-id";

/// Extractor for the authenticated user id. A missing or malformed header is
/// an authorization failure, never a fallback to an anonymous user.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::Unauthorized)?;

        let user_id = Uuid::parse_str(raw).map_err(|_| AppError::Unauthorized)?;
        Ok(AuthenticatedUser(user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(request: Request<()>) -> Result<AuthenticatedUser, AppError> {
        let (mut parts, _) = request.into_parts();
        AuthenticatedUser::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_valid_header_extracts_user_id() {
        let id = Uuid::new_v4();
        let request = Request::builder()
            .header(USER_ID_HEADER, id.to_string())
            .body(())
            .unwrap();

        let user = extract(request).await.unwrap();
        assert_eq!(user.0, id);
    }

    #[tokio::test]
    async fn test_missing_header_is_unauthorized() {
        let request = Request::builder().body(()).unwrap();
        let result = extract(request).await;
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_malformed_header_is_unauthorized() {
        let request = Request::builder()
            .header(USER_ID_HEADER, "not-a-uuid")
            .body(())
            .unwrap();
        let result = extract(request).await;
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }
}
