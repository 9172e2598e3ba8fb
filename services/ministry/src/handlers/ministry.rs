use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use worship_domain::id::{MinistryId, UserId};
use worship_identity::identity::IdentityHeaders;

use crate::domain::types::Ministry;
use crate::error::MinistryServiceError;
use crate::state::AppState;
use crate::usecase::ministry::{
    CreateMinistryInput, CreateMinistryUseCase, GetMinistryUseCase, JoinMinistryUseCase,
    ListMyMinistriesUseCase,
};

#[derive(Serialize)]
pub struct MinistryResponse {
    pub id: MinistryId,
    pub name: String,
    pub code: String,
    pub created_by: UserId,
    pub logo: Option<String>,
    #[serde(serialize_with = "worship_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "worship_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Ministry> for MinistryResponse {
    fn from(m: Ministry) -> Self {
        Self {
            id: m.id,
            name: m.name,
            code: m.code,
            created_by: m.created_by,
            logo: m.logo,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

// ── GET /ministries ──────────────────────────────────────────────────────────

pub async fn list_my_ministries(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<Vec<MinistryResponse>>, MinistryServiceError> {
    let usecase = ListMyMinistriesUseCase {
        repo: state.storage.as_ref(),
    };
    let ministries = usecase.execute(identity.user_id).await?;
    Ok(Json(ministries.into_iter().map(Into::into).collect()))
}

// ── POST /ministries ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateMinistryRequest {
    pub name: String,
    pub code: Option<String>,
    pub logo: Option<String>,
}

pub async fn create_ministry(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<CreateMinistryRequest>,
) -> Result<(StatusCode, Json<MinistryResponse>), MinistryServiceError> {
    let usecase = CreateMinistryUseCase {
        repo: state.storage.as_ref(),
    };
    let ministry = usecase
        .execute(
            identity.user_id,
            CreateMinistryInput {
                name: body.name,
                code: body.code,
                logo: body.logo,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(ministry.into())))
}

// ── GET /ministries/{id} ─────────────────────────────────────────────────────

pub async fn get_ministry(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(ministry_id): Path<MinistryId>,
) -> Result<Json<MinistryResponse>, MinistryServiceError> {
    let usecase = GetMinistryUseCase {
        repo: state.storage.as_ref(),
    };
    let ministry = usecase.execute(ministry_id, identity.user_id).await?;
    Ok(Json(ministry.into()))
}

// ── POST /ministries/join ────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct JoinMinistryRequest {
    pub code: String,
}

pub async fn join_ministry(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<JoinMinistryRequest>,
) -> Result<Json<MinistryResponse>, MinistryServiceError> {
    let usecase = JoinMinistryUseCase {
        repo: state.storage.as_ref(),
    };
    let (ministry, _) = usecase.execute(identity.user_id, &body.code).await?;
    Ok(Json(ministry.into()))
}
