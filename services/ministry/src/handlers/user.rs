use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use worship_domain::id::UserId;
use worship_domain::role::UserRole;
use worship_identity::identity::IdentityHeaders;

use crate::domain::types::User;
use crate::error::MinistryServiceError;
use crate::state::AppState;
use crate::usecase::user::{
    GetUserUseCase, RegisterUserInput, RegisterUserUseCase, SyncUserInput, SyncUserUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

/// Public profile. The password hash is never serialized.
#[derive(Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub username: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub profile_image_url: Option<String>,
    pub role: UserRole,
    #[serde(serialize_with = "worship_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "worship_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            phone: user.phone,
            profile_image_url: user.profile_image_url,
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

// ── POST /users ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), MinistryServiceError> {
    let usecase = RegisterUserUseCase {
        repo: state.storage.as_ref(),
    };
    let user = usecase
        .execute(RegisterUserInput {
            username: body.username,
            password: body.password,
            email: body.email,
            first_name: body.first_name,
            last_name: body.last_name,
            phone: body.phone,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

// ── PUT /users/sync ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SyncUserRequest {
    pub external_id: String,
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image_url: Option<String>,
}

pub async fn sync_user(
    State(state): State<AppState>,
    Json(body): Json<SyncUserRequest>,
) -> Result<Json<UserResponse>, MinistryServiceError> {
    let usecase = SyncUserUseCase {
        repo: state.storage.as_ref(),
    };
    let user = usecase
        .execute(SyncUserInput {
            external_id: body.external_id,
            username: body.username,
            email: body.email,
            first_name: body.first_name,
            last_name: body.last_name,
            profile_image_url: body.profile_image_url,
        })
        .await?;
    Ok(Json(user.into()))
}

// ── GET /users/@me ───────────────────────────────────────────────────────────

pub async fn get_me(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, MinistryServiceError> {
    let usecase = GetUserUseCase {
        repo: state.storage.as_ref(),
    };
    let user = usecase.execute(identity.user_id).await?;
    Ok(Json(user.into()))
}
