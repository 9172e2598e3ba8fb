use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use worship_domain::id::{AvailabilityId, MinistryId, UserId};
use worship_identity::identity::IdentityHeaders;

use crate::domain::types::{Availability, NewAvailability};
use crate::error::MinistryServiceError;
use crate::state::AppState;
use crate::usecase::availability::{
    CreateAvailabilityUseCase, DeleteAvailabilityUseCase, ListMyAvailabilityUseCase,
};

#[derive(Serialize)]
pub struct AvailabilityResponse {
    pub id: AvailabilityId,
    pub user_id: UserId,
    pub ministry_id: MinistryId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub notes: Option<String>,
}

impl From<Availability> for AvailabilityResponse {
    fn from(a: Availability) -> Self {
        Self {
            id: a.id,
            user_id: a.user_id,
            ministry_id: a.ministry_id,
            start_date: a.start_date,
            end_date: a.end_date,
            notes: a.notes,
        }
    }
}

// ── GET /ministries/{id}/availability ────────────────────────────────────────

pub async fn list_my_availability(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(ministry_id): Path<MinistryId>,
) -> Result<Json<Vec<AvailabilityResponse>>, MinistryServiceError> {
    let usecase = ListMyAvailabilityUseCase {
        repo: state.storage.as_ref(),
    };
    let ranges = usecase.execute(ministry_id, identity.user_id).await?;
    Ok(Json(ranges.into_iter().map(Into::into).collect()))
}

// ── POST /ministries/{id}/availability ───────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateAvailabilityRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub notes: Option<String>,
}

pub async fn create_availability(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(ministry_id): Path<MinistryId>,
    Json(body): Json<CreateAvailabilityRequest>,
) -> Result<(StatusCode, Json<AvailabilityResponse>), MinistryServiceError> {
    let usecase = CreateAvailabilityUseCase {
        repo: state.storage.as_ref(),
    };
    let created = usecase
        .execute(NewAvailability {
            user_id: identity.user_id,
            ministry_id,
            start_date: body.start_date,
            end_date: body.end_date,
            notes: body.notes,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

// ── DELETE /availability/{id} ────────────────────────────────────────────────

pub async fn delete_availability(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<AvailabilityId>,
) -> Result<StatusCode, MinistryServiceError> {
    let usecase = DeleteAvailabilityUseCase {
        repo: state.storage.as_ref(),
    };
    usecase.execute(id, identity.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
