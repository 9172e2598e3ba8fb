use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use worship_domain::id::{MinistryId, MinistryMemberId, UserId};
use worship_domain::role::MemberRole;
use worship_identity::identity::IdentityHeaders;

use crate::domain::types::MinistryMemberPatch;
use crate::error::MinistryServiceError;
use crate::handlers::user::UserResponse;
use crate::state::AppState;
use crate::usecase::member::{
    AddTeamMemberInput, AddTeamMemberUseCase, GetTeamMemberUseCase, ListTeamUseCase,
    RemoveTeamMemberUseCase, TeamMember, UpdateTeamMemberUseCase,
};

#[derive(Serialize)]
pub struct TeamMemberResponse {
    pub id: MinistryMemberId,
    pub ministry_id: MinistryId,
    pub user_id: UserId,
    pub role: MemberRole,
    pub position: Option<String>,
    #[serde(serialize_with = "worship_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "worship_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub user: UserResponse,
}

impl From<TeamMember> for TeamMemberResponse {
    fn from(TeamMember { member, user }: TeamMember) -> Self {
        Self {
            id: member.id,
            ministry_id: member.ministry_id,
            user_id: member.user_id,
            role: member.role,
            position: member.position,
            created_at: member.created_at,
            updated_at: member.updated_at,
            user: user.into(),
        }
    }
}

// ── GET /ministries/{id}/members ─────────────────────────────────────────────

pub async fn list_team(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(ministry_id): Path<MinistryId>,
) -> Result<Json<Vec<TeamMemberResponse>>, MinistryServiceError> {
    let usecase = ListTeamUseCase {
        repo: state.storage.as_ref(),
    };
    let team = usecase.execute(ministry_id, identity.user_id).await?;
    Ok(Json(team.into_iter().map(Into::into).collect()))
}

// ── POST /ministries/{id}/members ────────────────────────────────────────────

#[derive(Deserialize)]
pub struct AddTeamMemberRequest {
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    #[serde(default)]
    pub role: MemberRole,
    pub position: Option<String>,
}

pub async fn add_team_member(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(ministry_id): Path<MinistryId>,
    Json(body): Json<AddTeamMemberRequest>,
) -> Result<(StatusCode, Json<TeamMemberResponse>), MinistryServiceError> {
    let usecase = AddTeamMemberUseCase {
        repo: state.storage.as_ref(),
    };
    let member = usecase
        .execute(
            ministry_id,
            identity.user_id,
            AddTeamMemberInput {
                email: body.email,
                first_name: body.first_name,
                last_name: body.last_name,
                phone: body.phone,
                role: body.role,
                position: body.position,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(member.into())))
}

// ── GET /members/{id} ────────────────────────────────────────────────────────

pub async fn get_team_member(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(member_id): Path<MinistryMemberId>,
) -> Result<Json<TeamMemberResponse>, MinistryServiceError> {
    let usecase = GetTeamMemberUseCase {
        repo: state.storage.as_ref(),
    };
    let member = usecase.execute(member_id, identity.user_id).await?;
    Ok(Json(member.into()))
}

// ── PATCH /members/{id} ──────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateTeamMemberRequest {
    pub role: Option<MemberRole>,
    #[serde(default, deserialize_with = "worship_core::serde::double_option")]
    pub position: Option<Option<String>>,
}

pub async fn update_team_member(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(member_id): Path<MinistryMemberId>,
    Json(body): Json<UpdateTeamMemberRequest>,
) -> Result<Json<TeamMemberResponse>, MinistryServiceError> {
    let usecase = UpdateTeamMemberUseCase {
        repo: state.storage.as_ref(),
    };
    let member = usecase
        .execute(
            member_id,
            identity.user_id,
            MinistryMemberPatch {
                role: body.role,
                position: body.position,
            },
        )
        .await?;
    Ok(Json(member.into()))
}

// ── DELETE /members/{id} ─────────────────────────────────────────────────────

pub async fn remove_team_member(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(member_id): Path<MinistryMemberId>,
) -> Result<StatusCode, MinistryServiceError> {
    let usecase = RemoveTeamMemberUseCase {
        repo: state.storage.as_ref(),
    };
    usecase.execute(member_id, identity.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
