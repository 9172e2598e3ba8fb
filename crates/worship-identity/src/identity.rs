//! Gateway-injected identity header extractor.

use axum::extract::FromRequestParts;
use http::StatusCode;
use http::request::Parts;

use worship_domain::id::UserId;

use crate::USER_ID_HEADER;

/// Caller identity injected by the gateway via the `x-worship-user-id` header.
///
/// Returns 401 if the header is absent or not an integer.
/// Ministry-level permission checks (403) happen in use cases after extraction.
#[derive(Debug, Clone, Copy)]
pub struct IdentityHeaders {
    pub user_id: UserId,
}

impl<S> FromRequestParts<S> for IdentityHeaders
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    // Header parsing is synchronous so the returned future borrows nothing from `parts`.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse::<UserId>().ok());

        async move {
            let user_id = user_id.ok_or(StatusCode::UNAUTHORIZED)?;
            Ok(Self { user_id })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Request;

    async fn extract_identity(headers: Vec<(&str, &str)>) -> Result<IdentityHeaders, StatusCode> {
        let mut builder = Request::builder().method("GET").uri("/test");
        for (name, value) in headers {
            builder = builder.header(name, value);
        }
        let request = builder.body(()).unwrap();
        let (mut parts, _body) = request.into_parts();
        IdentityHeaders::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn should_extract_valid_identity_header() {
        let identity = extract_identity(vec![("x-worship-user-id", "17")])
            .await
            .unwrap();
        assert_eq!(identity.user_id, UserId(17));
    }

    #[tokio::test]
    async fn should_reject_missing_user_id() {
        let result = extract_identity(vec![]).await;
        assert_eq!(result.unwrap_err(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn should_reject_non_numeric_user_id() {
        let result = extract_identity(vec![("x-worship-user-id", "alice")]).await;
        assert_eq!(result.unwrap_err(), StatusCode::UNAUTHORIZED);
    }
}
