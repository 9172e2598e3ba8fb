use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use worship_domain::id::{MessageId, MinistryId, UserId};
use worship_identity::identity::IdentityHeaders;

use crate::domain::types::{Message, NewMessage};
use crate::error::MinistryServiceError;
use crate::state::AppState;
use crate::usecase::message::{ListMessagesUseCase, MarkMessagesReadUseCase, SendMessageUseCase};

#[derive(Serialize)]
pub struct MessageResponse {
    pub id: MessageId,
    pub ministry_id: MinistryId,
    pub sender_id: UserId,
    pub recipient_id: Option<UserId>,
    pub content: String,
    #[serde(serialize_with = "worship_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub read: bool,
}

impl From<Message> for MessageResponse {
    fn from(m: Message) -> Self {
        Self {
            id: m.id,
            ministry_id: m.ministry_id,
            sender_id: m.sender_id,
            recipient_id: m.recipient_id,
            content: m.content,
            created_at: m.created_at,
            read: m.read,
        }
    }
}

// ── GET /ministries/{id}/messages ────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct MessageListQuery {
    /// Restrict to messages this user sent or directly received.
    pub with: Option<UserId>,
}

pub async fn list_messages(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(ministry_id): Path<MinistryId>,
    Query(query): Query<MessageListQuery>,
) -> Result<Json<Vec<MessageResponse>>, MinistryServiceError> {
    let usecase = ListMessagesUseCase {
        repo: state.storage.as_ref(),
    };
    let messages = usecase
        .execute(ministry_id, identity.user_id, query.with)
        .await?;
    Ok(Json(messages.into_iter().map(Into::into).collect()))
}

// ── POST /ministries/{id}/messages ───────────────────────────────────────────

#[derive(Deserialize)]
pub struct SendMessageRequest {
    pub recipient_id: Option<UserId>,
    pub content: String,
}

pub async fn send_message(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(ministry_id): Path<MinistryId>,
    Json(body): Json<SendMessageRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), MinistryServiceError> {
    let usecase = SendMessageUseCase {
        repo: state.storage.as_ref(),
    };
    let message = usecase
        .execute(NewMessage {
            ministry_id,
            sender_id: identity.user_id,
            recipient_id: body.recipient_id,
            content: body.content,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(message.into())))
}

// ── POST /ministries/{id}/messages/read ──────────────────────────────────────

#[derive(Deserialize)]
pub struct MarkReadRequest {
    pub sender_id: UserId,
}

#[derive(Serialize)]
pub struct MarkReadResponse {
    pub success: bool,
}

/// The path ministry only gates access: read receipts are per sender, so
/// messages from `sender_id` to the caller in other shared ministries flip too.
pub async fn mark_messages_read(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(ministry_id): Path<MinistryId>,
    Json(body): Json<MarkReadRequest>,
) -> Result<Json<MarkReadResponse>, MinistryServiceError> {
    let usecase = MarkMessagesReadUseCase {
        repo: state.storage.as_ref(),
    };
    let success = usecase
        .execute(ministry_id, identity.user_id, body.sender_id)
        .await?;
    Ok(Json(MarkReadResponse { success }))
}
