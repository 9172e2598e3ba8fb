use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use worship_domain::id::{MinistryId, SongId};
use worship_identity::identity::IdentityHeaders;

use crate::domain::types::{NewSong, Song, SongPatch};
use crate::error::MinistryServiceError;
use crate::state::AppState;
use crate::usecase::song::{
    CreateSongUseCase, DeleteSongUseCase, GetSongUseCase, ListSongsUseCase, UpdateSongUseCase,
};

#[derive(Serialize)]
pub struct SongResponse {
    pub id: SongId,
    pub ministry_id: MinistryId,
    pub title: String,
    pub artist: Option<String>,
    pub key: Option<String>,
    pub bpm: Option<i32>,
    pub duration: Option<String>,
    pub category: Option<String>,
    pub chord_link: Option<String>,
    pub lyrics_link: Option<String>,
    pub audio_link: Option<String>,
    pub video_link: Option<String>,
}

impl From<Song> for SongResponse {
    fn from(s: Song) -> Self {
        Self {
            id: s.id,
            ministry_id: s.ministry_id,
            title: s.title,
            artist: s.artist,
            key: s.key,
            bpm: s.bpm,
            duration: s.duration,
            category: s.category,
            chord_link: s.chord_link,
            lyrics_link: s.lyrics_link,
            audio_link: s.audio_link,
            video_link: s.video_link,
        }
    }
}

// ── GET /ministries/{id}/songs ───────────────────────────────────────────────

pub async fn list_songs(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(ministry_id): Path<MinistryId>,
) -> Result<Json<Vec<SongResponse>>, MinistryServiceError> {
    let usecase = ListSongsUseCase {
        repo: state.storage.as_ref(),
    };
    let songs = usecase.execute(ministry_id, identity.user_id).await?;
    Ok(Json(songs.into_iter().map(Into::into).collect()))
}

// ── POST /ministries/{id}/songs ──────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateSongRequest {
    pub title: String,
    pub artist: Option<String>,
    pub key: Option<String>,
    pub bpm: Option<i32>,
    pub duration: Option<String>,
    pub category: Option<String>,
    pub chord_link: Option<String>,
    pub lyrics_link: Option<String>,
    pub audio_link: Option<String>,
    pub video_link: Option<String>,
}

pub async fn create_song(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(ministry_id): Path<MinistryId>,
    Json(body): Json<CreateSongRequest>,
) -> Result<(StatusCode, Json<SongResponse>), MinistryServiceError> {
    let usecase = CreateSongUseCase {
        repo: state.storage.as_ref(),
    };
    let song = usecase
        .execute(
            identity.user_id,
            NewSong {
                ministry_id,
                title: body.title,
                artist: body.artist,
                key: body.key,
                bpm: body.bpm,
                duration: body.duration,
                category: body.category,
                chord_link: body.chord_link,
                lyrics_link: body.lyrics_link,
                audio_link: body.audio_link,
                video_link: body.video_link,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(song.into())))
}

// ── GET /songs/{id} ──────────────────────────────────────────────────────────

pub async fn get_song(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(song_id): Path<SongId>,
) -> Result<Json<SongResponse>, MinistryServiceError> {
    let usecase = GetSongUseCase {
        repo: state.storage.as_ref(),
    };
    let song = usecase.execute(song_id, identity.user_id).await?;
    Ok(Json(song.into()))
}

// ── PATCH /songs/{id} ────────────────────────────────────────────────────────

/// Absent keys are left alone; `null` clears a nullable field.
#[derive(Deserialize)]
pub struct UpdateSongRequest {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "worship_core::serde::double_option")]
    pub artist: Option<Option<String>>,
    #[serde(default, deserialize_with = "worship_core::serde::double_option")]
    pub key: Option<Option<String>>,
    #[serde(default, deserialize_with = "worship_core::serde::double_option")]
    pub bpm: Option<Option<i32>>,
    #[serde(default, deserialize_with = "worship_core::serde::double_option")]
    pub duration: Option<Option<String>>,
    #[serde(default, deserialize_with = "worship_core::serde::double_option")]
    pub category: Option<Option<String>>,
    #[serde(default, deserialize_with = "worship_core::serde::double_option")]
    pub chord_link: Option<Option<String>>,
    #[serde(default, deserialize_with = "worship_core::serde::double_option")]
    pub lyrics_link: Option<Option<String>>,
    #[serde(default, deserialize_with = "worship_core::serde::double_option")]
    pub audio_link: Option<Option<String>>,
    #[serde(default, deserialize_with = "worship_core::serde::double_option")]
    pub video_link: Option<Option<String>>,
}

pub async fn update_song(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(song_id): Path<SongId>,
    Json(body): Json<UpdateSongRequest>,
) -> Result<Json<SongResponse>, MinistryServiceError> {
    let usecase = UpdateSongUseCase {
        repo: state.storage.as_ref(),
    };
    let song = usecase
        .execute(
            song_id,
            identity.user_id,
            SongPatch {
                title: body.title,
                artist: body.artist,
                key: body.key,
                bpm: body.bpm,
                duration: body.duration,
                category: body.category,
                chord_link: body.chord_link,
                lyrics_link: body.lyrics_link,
                audio_link: body.audio_link,
                video_link: body.video_link,
            },
        )
        .await?;
    Ok(Json(song.into()))
}

// ── DELETE /songs/{id} ───────────────────────────────────────────────────────

pub async fn delete_song(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(song_id): Path<SongId>,
) -> Result<StatusCode, MinistryServiceError> {
    let usecase = DeleteSongUseCase {
        repo: state.storage.as_ref(),
    };
    usecase.execute(song_id, identity.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
