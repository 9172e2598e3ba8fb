use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use worship_core::serde::parse_time_of_day;
use worship_domain::id::{
    MinistryId, MinistryMemberId, ServiceId, ServiceMemberId, ServiceSongId, SongId, UserId,
};
use worship_domain::service::ServiceStatus;
use worship_identity::identity::IdentityHeaders;

use crate::domain::types::{NewService, ServicePatch, ServicePlan, ServiceSong};
use crate::error::MinistryServiceError;
use crate::handlers::song::SongResponse;
use crate::handlers::user::UserResponse;
use crate::state::AppState;
use crate::usecase::service::{
    AddServiceMemberInput, AddServiceMemberUseCase, AddServiceSongInput, AddServiceSongUseCase,
    DeleteServiceUseCase, GetServiceUseCase, ListServicesUseCase, PlanServiceUseCase,
    RemoveServiceMemberUseCase, RemoveServiceSongUseCase, ReorderServiceSongUseCase, RosterEntry,
    ServiceView, SetlistEntry, UpdateServiceUseCase,
};

fn parse_time(raw: &str) -> Result<NaiveTime, MinistryServiceError> {
    parse_time_of_day(raw).ok_or(MinistryServiceError::InvalidInput)
}

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct RosterEntryResponse {
    pub id: ServiceMemberId,
    pub user_id: UserId,
    pub position: String,
    #[serde(serialize_with = "worship_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub user: UserResponse,
}

impl From<RosterEntry> for RosterEntryResponse {
    fn from(RosterEntry { entry, user }: RosterEntry) -> Self {
        Self {
            id: entry.id,
            user_id: entry.user_id,
            position: entry.position,
            created_at: entry.created_at,
            user: user.into(),
        }
    }
}

#[derive(Serialize)]
pub struct SetlistEntryResponse {
    pub id: ServiceSongId,
    pub song_id: SongId,
    pub order: i32,
    /// Key to play in.
    pub key: Option<String>,
    /// Override stored on the setlist entry, if any.
    pub key_override: Option<String>,
    pub song: SongResponse,
}

impl From<SetlistEntry> for SetlistEntryResponse {
    fn from(SetlistEntry { entry, song, key }: SetlistEntry) -> Self {
        Self {
            id: entry.id,
            song_id: entry.song_id,
            order: entry.order,
            key,
            key_override: entry.key,
            song: song.into(),
        }
    }
}

#[derive(Serialize)]
pub struct ServiceResponse {
    pub id: ServiceId,
    pub ministry_id: MinistryId,
    pub name: String,
    pub date: NaiveDate,
    #[serde(serialize_with = "worship_core::serde::to_hh_mm")]
    pub time: NaiveTime,
    #[serde(rename = "type")]
    pub service_type: Option<String>,
    pub notes: Option<String>,
    pub status: ServiceStatus,
    pub members: Vec<RosterEntryResponse>,
    pub songs: Vec<SetlistEntryResponse>,
}

impl From<ServiceView> for ServiceResponse {
    fn from(view: ServiceView) -> Self {
        let s = view.service;
        Self {
            id: s.id,
            ministry_id: s.ministry_id,
            name: s.name,
            date: s.date,
            time: s.time,
            service_type: s.service_type,
            notes: s.notes,
            status: s.status,
            members: view.members.into_iter().map(Into::into).collect(),
            songs: view.songs.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Serialize)]
pub struct ServiceSongResponse {
    pub id: ServiceSongId,
    pub service_id: ServiceId,
    pub song_id: SongId,
    pub order: i32,
    pub key: Option<String>,
}

impl From<ServiceSong> for ServiceSongResponse {
    fn from(s: ServiceSong) -> Self {
        Self {
            id: s.id,
            service_id: s.service_id,
            song_id: s.song_id,
            order: s.order,
            key: s.key,
        }
    }
}

// ── GET /ministries/{id}/services ────────────────────────────────────────────

pub async fn list_services(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(ministry_id): Path<MinistryId>,
) -> Result<Json<Vec<ServiceResponse>>, MinistryServiceError> {
    let usecase = ListServicesUseCase {
        repo: state.storage.as_ref(),
    };
    let views = usecase.execute(ministry_id, identity.user_id, false).await?;
    Ok(Json(views.into_iter().map(Into::into).collect()))
}

// ── GET /ministries/{id}/services/upcoming ───────────────────────────────────

pub async fn list_upcoming_services(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(ministry_id): Path<MinistryId>,
) -> Result<Json<Vec<ServiceResponse>>, MinistryServiceError> {
    let usecase = ListServicesUseCase {
        repo: state.storage.as_ref(),
    };
    let views = usecase.execute(ministry_id, identity.user_id, true).await?;
    Ok(Json(views.into_iter().map(Into::into).collect()))
}

// ── POST /ministries/{id}/services ───────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateServiceRequest {
    pub name: String,
    pub date: NaiveDate,
    /// `HH:MM` or `HH:MM:SS`.
    pub time: String,
    #[serde(rename = "type")]
    pub service_type: Option<String>,
    pub notes: Option<String>,
    #[serde(default)]
    pub status: ServiceStatus,
    #[serde(default)]
    pub member_ids: Vec<MinistryMemberId>,
    #[serde(default)]
    pub song_ids: Vec<SongId>,
}

pub async fn create_service(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(ministry_id): Path<MinistryId>,
    Json(body): Json<CreateServiceRequest>,
) -> Result<(StatusCode, Json<ServiceResponse>), MinistryServiceError> {
    let usecase = PlanServiceUseCase {
        repo: state.storage.as_ref(),
    };
    let plan = ServicePlan {
        service: NewService {
            ministry_id,
            name: body.name,
            date: body.date,
            time: parse_time(&body.time)?,
            service_type: body.service_type,
            notes: body.notes,
            status: body.status,
        },
        member_ids: body.member_ids,
        song_ids: body.song_ids,
    };
    let view = usecase.execute(identity.user_id, plan).await?;
    Ok((StatusCode::CREATED, Json(view.into())))
}

// ── GET /services/{id} ───────────────────────────────────────────────────────

pub async fn get_service(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(service_id): Path<ServiceId>,
) -> Result<Json<ServiceResponse>, MinistryServiceError> {
    let usecase = GetServiceUseCase {
        repo: state.storage.as_ref(),
    };
    let view = usecase.execute(service_id, identity.user_id).await?;
    Ok(Json(view.into()))
}

// ── PATCH /services/{id} ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateServiceRequest {
    pub name: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    #[serde(
        rename = "type",
        default,
        deserialize_with = "worship_core::serde::double_option"
    )]
    pub service_type: Option<Option<String>>,
    #[serde(default, deserialize_with = "worship_core::serde::double_option")]
    pub notes: Option<Option<String>>,
    pub status: Option<ServiceStatus>,
}

pub async fn update_service(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(service_id): Path<ServiceId>,
    Json(body): Json<UpdateServiceRequest>,
) -> Result<Json<ServiceResponse>, MinistryServiceError> {
    let usecase = UpdateServiceUseCase {
        repo: state.storage.as_ref(),
    };
    let patch = ServicePatch {
        name: body.name,
        date: body.date,
        time: body.time.as_deref().map(parse_time).transpose()?,
        service_type: body.service_type,
        notes: body.notes,
        status: body.status,
    };
    let view = usecase.execute(service_id, identity.user_id, patch).await?;
    Ok(Json(view.into()))
}

// ── DELETE /services/{id} ────────────────────────────────────────────────────

pub async fn delete_service(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(service_id): Path<ServiceId>,
) -> Result<StatusCode, MinistryServiceError> {
    let usecase = DeleteServiceUseCase {
        repo: state.storage.as_ref(),
    };
    usecase.execute(service_id, identity.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /services/{id}/members ──────────────────────────────────────────────

#[derive(Deserialize)]
pub struct AddServiceMemberRequest {
    pub user_id: UserId,
    pub position: Option<String>,
}

pub async fn add_service_member(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(service_id): Path<ServiceId>,
    Json(body): Json<AddServiceMemberRequest>,
) -> Result<(StatusCode, Json<RosterEntryResponse>), MinistryServiceError> {
    let usecase = AddServiceMemberUseCase {
        repo: state.storage.as_ref(),
    };
    let entry = usecase
        .execute(
            service_id,
            identity.user_id,
            AddServiceMemberInput {
                user_id: body.user_id,
                position: body.position,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(entry.into())))
}

// ── DELETE /service-members/{id} ─────────────────────────────────────────────

pub async fn remove_service_member(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<ServiceMemberId>,
) -> Result<StatusCode, MinistryServiceError> {
    let usecase = RemoveServiceMemberUseCase {
        repo: state.storage.as_ref(),
    };
    usecase.execute(id, identity.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /services/{id}/songs ────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct AddServiceSongRequest {
    pub song_id: SongId,
    pub order: Option<i32>,
    pub key: Option<String>,
}

pub async fn add_service_song(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(service_id): Path<ServiceId>,
    Json(body): Json<AddServiceSongRequest>,
) -> Result<(StatusCode, Json<SetlistEntryResponse>), MinistryServiceError> {
    let usecase = AddServiceSongUseCase {
        repo: state.storage.as_ref(),
    };
    let entry = usecase
        .execute(
            service_id,
            identity.user_id,
            AddServiceSongInput {
                song_id: body.song_id,
                order: body.order,
                key: body.key,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(entry.into())))
}

// ── PATCH /service-songs/{id} ────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ReorderServiceSongRequest {
    pub order: i32,
}

pub async fn reorder_service_song(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<ServiceSongId>,
    Json(body): Json<ReorderServiceSongRequest>,
) -> Result<Json<ServiceSongResponse>, MinistryServiceError> {
    let usecase = ReorderServiceSongUseCase {
        repo: state.storage.as_ref(),
    };
    let entry = usecase.execute(id, identity.user_id, body.order).await?;
    Ok(Json(entry.into()))
}

// ── DELETE /service-songs/{id} ───────────────────────────────────────────────

pub async fn remove_service_song(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<ServiceSongId>,
) -> Result<StatusCode, MinistryServiceError> {
    let usecase = RemoveServiceSongUseCase {
        repo: state.storage.as_ref(),
    };
    usecase.execute(id, identity.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
