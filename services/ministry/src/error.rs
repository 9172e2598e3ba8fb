use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Ministry service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum MinistryServiceError {
    #[error("user not found")]
    UserNotFound,
    #[error("ministry not found")]
    MinistryNotFound,
    #[error("member not found")]
    MemberNotFound,
    #[error("song not found")]
    SongNotFound,
    #[error("service not found")]
    ServiceNotFound,
    #[error("service member not found")]
    ServiceMemberNotFound,
    #[error("service song not found")]
    ServiceSongNotFound,
    #[error("availability not found")]
    AvailabilityNotFound,
    #[error("username already taken")]
    UsernameTaken,
    #[error("ministry code already taken")]
    MinistryCodeTaken,
    #[error("already a member of this ministry")]
    AlreadyMember,
    #[error("referenced record does not exist")]
    InvalidReference,
    #[error("invalid ministry code")]
    InvalidMinistryCode,
    #[error("end date is before start date")]
    InvalidDateRange,
    #[error("invalid input")]
    InvalidInput,
    #[error("forbidden")]
    Forbidden,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl MinistryServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::MinistryNotFound => "MINISTRY_NOT_FOUND",
            Self::MemberNotFound => "MEMBER_NOT_FOUND",
            Self::SongNotFound => "SONG_NOT_FOUND",
            Self::ServiceNotFound => "SERVICE_NOT_FOUND",
            Self::ServiceMemberNotFound => "SERVICE_MEMBER_NOT_FOUND",
            Self::ServiceSongNotFound => "SERVICE_SONG_NOT_FOUND",
            Self::AvailabilityNotFound => "AVAILABILITY_NOT_FOUND",
            Self::UsernameTaken => "USERNAME_TAKEN",
            Self::MinistryCodeTaken => "MINISTRY_CODE_TAKEN",
            Self::AlreadyMember => "ALREADY_MEMBER",
            Self::InvalidReference => "INVALID_REFERENCE",
            Self::InvalidMinistryCode => "INVALID_MINISTRY_CODE",
            Self::InvalidDateRange => "INVALID_DATE_RANGE",
            Self::InvalidInput => "INVALID_INPUT",
            Self::Forbidden => "FORBIDDEN",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for MinistryServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::UserNotFound
            | Self::MinistryNotFound
            | Self::MemberNotFound
            | Self::SongNotFound
            | Self::ServiceNotFound
            | Self::ServiceMemberNotFound
            | Self::ServiceSongNotFound
            | Self::AvailabilityNotFound => StatusCode::NOT_FOUND,
            Self::UsernameTaken | Self::MinistryCodeTaken | Self::AlreadyMember => {
                StatusCode::CONFLICT
            }
            Self::InvalidReference
            | Self::InvalidMinistryCode
            | Self::InvalidDateRange
            | Self::InvalidInput => StatusCode::BAD_REQUEST,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // 4xx are expected client errors; TraceLayer already records their status.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn assert_error(
        error: MinistryServiceError,
        expected_status: StatusCode,
        expected_kind: &str,
        expected_message: &str,
    ) {
        let resp = error.into_response();
        assert_eq!(resp.status(), expected_status);
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["kind"], expected_kind);
        assert_eq!(json["message"], expected_message);
    }

    #[tokio::test]
    async fn should_return_song_not_found() {
        assert_error(
            MinistryServiceError::SongNotFound,
            StatusCode::NOT_FOUND,
            "SONG_NOT_FOUND",
            "song not found",
        )
        .await;
    }

    #[tokio::test]
    async fn should_return_service_not_found() {
        assert_error(
            MinistryServiceError::ServiceNotFound,
            StatusCode::NOT_FOUND,
            "SERVICE_NOT_FOUND",
            "service not found",
        )
        .await;
    }

    #[tokio::test]
    async fn should_return_username_taken() {
        assert_error(
            MinistryServiceError::UsernameTaken,
            StatusCode::CONFLICT,
            "USERNAME_TAKEN",
            "username already taken",
        )
        .await;
    }

    #[tokio::test]
    async fn should_return_ministry_code_taken() {
        assert_error(
            MinistryServiceError::MinistryCodeTaken,
            StatusCode::CONFLICT,
            "MINISTRY_CODE_TAKEN",
            "ministry code already taken",
        )
        .await;
    }

    #[tokio::test]
    async fn should_return_already_member() {
        assert_error(
            MinistryServiceError::AlreadyMember,
            StatusCode::CONFLICT,
            "ALREADY_MEMBER",
            "already a member of this ministry",
        )
        .await;
    }

    #[tokio::test]
    async fn should_return_invalid_reference() {
        assert_error(
            MinistryServiceError::InvalidReference,
            StatusCode::BAD_REQUEST,
            "INVALID_REFERENCE",
            "referenced record does not exist",
        )
        .await;
    }

    #[tokio::test]
    async fn should_return_invalid_date_range() {
        assert_error(
            MinistryServiceError::InvalidDateRange,
            StatusCode::BAD_REQUEST,
            "INVALID_DATE_RANGE",
            "end date is before start date",
        )
        .await;
    }

    #[tokio::test]
    async fn should_return_forbidden() {
        assert_error(
            MinistryServiceError::Forbidden,
            StatusCode::FORBIDDEN,
            "FORBIDDEN",
            "forbidden",
        )
        .await;
    }

    #[tokio::test]
    async fn should_hide_internal_error_details() {
        assert_error(
            MinistryServiceError::Internal(anyhow::anyhow!("connection refused")),
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL",
            "internal error",
        )
        .await;
    }
}
