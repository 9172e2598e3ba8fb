use std::collections::HashMap;

use anyhow::Context as _;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{Set, Unchanged},
    ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel as _, QueryFilter, QueryOrder, SqlErr, TransactionTrait,
    sea_query::{Expr, OnConflict},
};

use worship_domain::id::{
    AvailabilityId, MessageId, MinistryId, MinistryMemberId, ServiceId, ServiceMemberId,
    ServiceSongId, SongId, UserId,
};
use worship_domain::role::{MemberRole, UserRole};
use worship_domain::service::DEFAULT_POSITION;
use worship_ministry_schema::{
    availabilities, messages, ministries, ministry_members, service_members, service_songs,
    services, songs, users,
};

use crate::domain::repository::{
    AvailabilityRepository, MessageRepository, MinistryMemberRepository, MinistryRepository,
    ServiceMemberRepository, ServiceRepository, ServiceSongRepository, SongRepository,
    UserRepository,
};
use crate::domain::types::{
    Availability, Message, Ministry, MinistryMember, MinistryMemberPatch, NewAvailability,
    NewMessage, NewMinistry, NewMinistryMember, NewService, NewServiceMember, NewServiceSong,
    NewSong, NewUser, Service, ServiceLineup, ServiceMember, ServicePatch, ServicePlan,
    ServiceSong, Song, SongPatch, UpsertUser, User,
};
use crate::error::MinistryServiceError;
use crate::infra::password::hash_password_blocking;

/// PostgreSQL-backed store.
pub struct DbStorage {
    pub db: DatabaseConnection,
}

/// Translate constraint violations raised by a write; anything else is internal.
fn write_error(
    err: DbErr,
    on_unique: MinistryServiceError,
    context: &'static str,
) -> MinistryServiceError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => on_unique,
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => MinistryServiceError::InvalidReference,
        _ => anyhow::Error::new(err).context(context).into(),
    }
}

// ── Users ────────────────────────────────────────────────────────────────────

#[async_trait]
impl UserRepository for DbStorage {
    async fn find_user(&self, id: UserId) -> Result<Option<User>, MinistryServiceError> {
        let model = users::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find user by id")?;
        model.map(user_from_model).transpose()
    }

    async fn find_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, MinistryServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await
            .context("find user by username")?;
        model.map(user_from_model).transpose()
    }

    async fn create_user(&self, user: NewUser) -> Result<User, MinistryServiceError> {
        let password_hash = hash_password_blocking(user.password).await?;
        let now = Utc::now();
        let model = users::ActiveModel {
            external_id: Set(None),
            username: Set(user.username),
            password_hash: Set(Some(password_hash)),
            email: Set(user.email),
            first_name: Set(user.first_name),
            last_name: Set(user.last_name),
            phone: Set(user.phone),
            profile_image_url: Set(user.profile_image_url),
            role: Set(user.role.as_str().to_owned()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| write_error(e, MinistryServiceError::UsernameTaken, "create user"))?;
        user_from_model(model)
    }

    async fn upsert_user(&self, user: UpsertUser) -> Result<User, MinistryServiceError> {
        let now = Utc::now();
        let am = users::ActiveModel {
            external_id: Set(Some(user.external_id)),
            username: Set(user.username),
            password_hash: Set(None),
            email: Set(user.email),
            first_name: Set(user.first_name),
            last_name: Set(user.last_name),
            phone: Set(None),
            profile_image_url: Set(user.profile_image_url),
            role: Set(UserRole::Member.as_str().to_owned()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let model = users::Entity::insert(am)
            .on_conflict(
                OnConflict::column(users::Column::ExternalId)
                    .update_columns([
                        users::Column::Email,
                        users::Column::FirstName,
                        users::Column::LastName,
                        users::Column::ProfileImageUrl,
                        users::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_with_returning(&self.db)
            .await
            .map_err(|e| write_error(e, MinistryServiceError::UsernameTaken, "upsert user"))?;
        user_from_model(model)
    }
}

fn user_from_model(model: users::Model) -> Result<User, MinistryServiceError> {
    Ok(User {
        id: UserId(model.id),
        external_id: model.external_id,
        username: model.username,
        password_hash: model.password_hash,
        email: model.email,
        first_name: model.first_name,
        last_name: model.last_name,
        phone: model.phone,
        profile_image_url: model.profile_image_url,
        role: model.role.parse().context("decode user role")?,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Ministries ───────────────────────────────────────────────────────────────

#[async_trait]
impl MinistryRepository for DbStorage {
    async fn find_ministry(
        &self,
        id: MinistryId,
    ) -> Result<Option<Ministry>, MinistryServiceError> {
        let model = ministries::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find ministry by id")?;
        Ok(model.map(ministry_from_model))
    }

    async fn find_ministry_by_code(
        &self,
        code: &str,
    ) -> Result<Option<Ministry>, MinistryServiceError> {
        let model = ministries::Entity::find()
            .filter(ministries::Column::Code.eq(code))
            .one(&self.db)
            .await
            .context("find ministry by code")?;
        Ok(model.map(ministry_from_model))
    }

    async fn list_ministries(&self) -> Result<Vec<Ministry>, MinistryServiceError> {
        let models = ministries::Entity::find()
            .order_by_asc(ministries::Column::Id)
            .all(&self.db)
            .await
            .context("list ministries")?;
        Ok(models.into_iter().map(ministry_from_model).collect())
    }

    async fn list_ministries_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<Ministry>, MinistryServiceError> {
        let models = ministries::Entity::find()
            .inner_join(ministry_members::Entity)
            .filter(ministry_members::Column::UserId.eq(user_id.0))
            .order_by_asc(ministry_members::Column::Id)
            .all(&self.db)
            .await
            .context("list ministries for user")?;
        Ok(models.into_iter().map(ministry_from_model).collect())
    }

    async fn create_ministry(
        &self,
        ministry: NewMinistry,
    ) -> Result<Ministry, MinistryServiceError> {
        insert_ministry(&self.db, ministry).await
    }

    async fn create_ministry_with_leader(
        &self,
        ministry: NewMinistry,
        position: Option<String>,
    ) -> Result<(Ministry, MinistryMember), MinistryServiceError> {
        let txn = self.db.begin().await.context("begin create ministry")?;
        let ministry = insert_ministry(&txn, ministry).await?;
        let leader = insert_ministry_member(
            &txn,
            NewMinistryMember {
                ministry_id: ministry.id,
                user_id: ministry.created_by,
                role: MemberRole::Leader,
                position,
            },
        )
        .await?;
        txn.commit().await.context("commit create ministry")?;
        Ok((ministry, leader))
    }
}

async fn insert_ministry<C>(
    db: &C,
    ministry: NewMinistry,
) -> Result<Ministry, MinistryServiceError>
where
    C: ConnectionTrait,
{
    let now = Utc::now();
    let model = ministries::ActiveModel {
        name: Set(ministry.name),
        code: Set(ministry.code),
        created_by: Set(ministry.created_by.0),
        logo: Set(ministry.logo),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(|e| {
        write_error(
            e,
            MinistryServiceError::MinistryCodeTaken,
            "create ministry",
        )
    })?;
    Ok(ministry_from_model(model))
}

fn ministry_from_model(model: ministries::Model) -> Ministry {
    Ministry {
        id: MinistryId(model.id),
        name: model.name,
        code: model.code,
        created_by: UserId(model.created_by),
        logo: model.logo,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Ministry members ─────────────────────────────────────────────────────────

#[async_trait]
impl MinistryMemberRepository for DbStorage {
    async fn find_ministry_member(
        &self,
        id: MinistryMemberId,
    ) -> Result<Option<MinistryMember>, MinistryServiceError> {
        let model = ministry_members::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find ministry member by id")?;
        model.map(member_from_model).transpose()
    }

    async fn list_ministry_members(
        &self,
        ministry_id: MinistryId,
    ) -> Result<Vec<MinistryMember>, MinistryServiceError> {
        let models = ministry_members::Entity::find()
            .filter(ministry_members::Column::MinistryId.eq(ministry_id.0))
            .order_by_asc(ministry_members::Column::Id)
            .all(&self.db)
            .await
            .context("list ministry members")?;
        models.into_iter().map(member_from_model).collect()
    }

    async fn list_memberships_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<MinistryMember>, MinistryServiceError> {
        let models = ministry_members::Entity::find()
            .filter(ministry_members::Column::UserId.eq(user_id.0))
            .order_by_asc(ministry_members::Column::Id)
            .all(&self.db)
            .await
            .context("list memberships for user")?;
        models.into_iter().map(member_from_model).collect()
    }

    async fn create_ministry_member(
        &self,
        member: NewMinistryMember,
    ) -> Result<MinistryMember, MinistryServiceError> {
        insert_ministry_member(&self.db, member).await
    }

    async fn update_ministry_member(
        &self,
        id: MinistryMemberId,
        patch: MinistryMemberPatch,
    ) -> Result<Option<MinistryMember>, MinistryServiceError> {
        let Some(model) = ministry_members::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find ministry member for update")?
        else {
            return Ok(None);
        };
        let mut am = model.into_active_model();
        if let Some(role) = patch.role {
            am.role = Set(role.as_str().to_owned());
        }
        if let Some(position) = patch.position {
            am.position = Set(position);
        }
        am.updated_at = Set(Utc::now());
        let model = am
            .update(&self.db)
            .await
            .context("update ministry member")?;
        member_from_model(model).map(Some)
    }

    async fn delete_ministry_member(
        &self,
        id: MinistryMemberId,
    ) -> Result<bool, MinistryServiceError> {
        let result = ministry_members::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .context("delete ministry member")?;
        Ok(result.rows_affected > 0)
    }
}

async fn insert_ministry_member<C>(
    db: &C,
    member: NewMinistryMember,
) -> Result<MinistryMember, MinistryServiceError>
where
    C: ConnectionTrait,
{
    let now = Utc::now();
    let model = ministry_members::ActiveModel {
        ministry_id: Set(member.ministry_id.0),
        user_id: Set(member.user_id.0),
        role: Set(member.role.as_str().to_owned()),
        position: Set(member.position),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(|e| {
        write_error(
            e,
            MinistryServiceError::AlreadyMember,
            "create ministry member",
        )
    })?;
    member_from_model(model)
}

fn member_from_model(
    model: ministry_members::Model,
) -> Result<MinistryMember, MinistryServiceError> {
    Ok(MinistryMember {
        id: MinistryMemberId(model.id),
        ministry_id: MinistryId(model.ministry_id),
        user_id: UserId(model.user_id),
        role: model.role.parse().context("decode member role")?,
        position: model.position,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Songs ────────────────────────────────────────────────────────────────────

#[async_trait]
impl SongRepository for DbStorage {
    async fn find_song(&self, id: SongId) -> Result<Option<Song>, MinistryServiceError> {
        let model = songs::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find song by id")?;
        Ok(model.map(song_from_model))
    }

    async fn list_songs(&self, ministry_id: MinistryId) -> Result<Vec<Song>, MinistryServiceError> {
        let models = songs::Entity::find()
            .filter(songs::Column::MinistryId.eq(ministry_id.0))
            .order_by_asc(songs::Column::Id)
            .all(&self.db)
            .await
            .context("list songs")?;
        Ok(models.into_iter().map(song_from_model).collect())
    }

    async fn create_song(&self, song: NewSong) -> Result<Song, MinistryServiceError> {
        let model = songs::ActiveModel {
            ministry_id: Set(song.ministry_id.0),
            title: Set(song.title),
            artist: Set(song.artist),
            key: Set(song.key),
            bpm: Set(song.bpm),
            duration: Set(song.duration),
            category: Set(song.category),
            chord_link: Set(song.chord_link),
            lyrics_link: Set(song.lyrics_link),
            audio_link: Set(song.audio_link),
            video_link: Set(song.video_link),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| write_error(e, MinistryServiceError::InvalidInput, "create song"))?;
        Ok(song_from_model(model))
    }

    async fn update_song(
        &self,
        id: SongId,
        patch: SongPatch,
    ) -> Result<Option<Song>, MinistryServiceError> {
        let Some(model) = songs::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find song for update")?
        else {
            return Ok(None);
        };
        if patch.is_empty() {
            return Ok(Some(song_from_model(model)));
        }
        let mut song = song_from_model(model);
        patch.apply(&mut song);
        let model = songs::ActiveModel {
            id: Unchanged(song.id.0),
            ministry_id: Unchanged(song.ministry_id.0),
            title: Set(song.title),
            artist: Set(song.artist),
            key: Set(song.key),
            bpm: Set(song.bpm),
            duration: Set(song.duration),
            category: Set(song.category),
            chord_link: Set(song.chord_link),
            lyrics_link: Set(song.lyrics_link),
            audio_link: Set(song.audio_link),
            video_link: Set(song.video_link),
        }
        .update(&self.db)
        .await
        .context("update song")?;
        Ok(Some(song_from_model(model)))
    }

    async fn delete_song(&self, id: SongId) -> Result<bool, MinistryServiceError> {
        let txn = self.db.begin().await.context("begin delete song")?;
        service_songs::Entity::delete_many()
            .filter(service_songs::Column::SongId.eq(id.0))
            .exec(&txn)
            .await
            .context("delete setlist entries of song")?;
        let result = songs::Entity::delete_by_id(id.0)
            .exec(&txn)
            .await
            .context("delete song")?;
        txn.commit().await.context("commit delete song")?;
        Ok(result.rows_affected > 0)
    }
}

fn song_from_model(model: songs::Model) -> Song {
    Song {
        id: SongId(model.id),
        ministry_id: MinistryId(model.ministry_id),
        title: model.title,
        artist: model.artist,
        key: model.key,
        bpm: model.bpm,
        duration: model.duration,
        category: model.category,
        chord_link: model.chord_link,
        lyrics_link: model.lyrics_link,
        audio_link: model.audio_link,
        video_link: model.video_link,
    }
}

// ── Services ─────────────────────────────────────────────────────────────────

#[async_trait]
impl ServiceRepository for DbStorage {
    async fn find_service(&self, id: ServiceId) -> Result<Option<Service>, MinistryServiceError> {
        let model = services::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find service by id")?;
        model.map(service_from_model).transpose()
    }

    async fn list_services(
        &self,
        ministry_id: MinistryId,
    ) -> Result<Vec<Service>, MinistryServiceError> {
        let models = services::Entity::find()
            .filter(services::Column::MinistryId.eq(ministry_id.0))
            .order_by_asc(services::Column::Date)
            .order_by_asc(services::Column::Time)
            .order_by_asc(services::Column::Id)
            .all(&self.db)
            .await
            .context("list services")?;
        models.into_iter().map(service_from_model).collect()
    }

    async fn list_upcoming_services(
        &self,
        ministry_id: MinistryId,
    ) -> Result<Vec<Service>, MinistryServiceError> {
        let today = Utc::now().date_naive();
        let models = services::Entity::find()
            .filter(services::Column::MinistryId.eq(ministry_id.0))
            .filter(services::Column::Date.gte(today))
            .order_by_asc(services::Column::Date)
            .order_by_asc(services::Column::Time)
            .order_by_asc(services::Column::Id)
            .all(&self.db)
            .await
            .context("list upcoming services")?;
        models.into_iter().map(service_from_model).collect()
    }

    async fn create_service(&self, service: NewService) -> Result<Service, MinistryServiceError> {
        insert_service(&self.db, service).await
    }

    async fn create_service_plan(
        &self,
        plan: ServicePlan,
    ) -> Result<ServiceLineup, MinistryServiceError> {
        let ministry_id = plan.service.ministry_id;
        let txn = self.db.begin().await.context("begin service plan")?;

        let roster = if plan.member_ids.is_empty() {
            HashMap::new()
        } else {
            ministry_members::Entity::find()
                .filter(
                    ministry_members::Column::Id
                        .is_in(plan.member_ids.iter().map(|id| id.0)),
                )
                .filter(ministry_members::Column::MinistryId.eq(ministry_id.0))
                .all(&txn)
                .await
                .context("load plan members")?
                .into_iter()
                .map(|m| (m.id, m))
                .collect::<HashMap<_, _>>()
        };
        if plan.member_ids.iter().any(|id| !roster.contains_key(&id.0)) {
            return Err(MinistryServiceError::InvalidReference);
        }

        if !plan.song_ids.is_empty() {
            let known = songs::Entity::find()
                .filter(songs::Column::Id.is_in(plan.song_ids.iter().map(|id| id.0)))
                .filter(songs::Column::MinistryId.eq(ministry_id.0))
                .all(&txn)
                .await
                .context("load plan songs")?;
            if plan
                .song_ids
                .iter()
                .any(|id| !known.iter().any(|s| s.id == id.0))
            {
                return Err(MinistryServiceError::InvalidReference);
            }
        }

        let service = insert_service(&txn, plan.service).await?;

        let mut members = Vec::with_capacity(plan.member_ids.len());
        for id in &plan.member_ids {
            let Some(member) = roster.get(&id.0) else {
                return Err(MinistryServiceError::InvalidReference);
            };
            let entry = insert_service_member(
                &txn,
                NewServiceMember {
                    service_id: service.id,
                    user_id: UserId(member.user_id),
                    position: member
                        .position
                        .clone()
                        .unwrap_or_else(|| DEFAULT_POSITION.to_owned()),
                },
            )
            .await?;
            members.push(entry);
        }

        let mut setlist = Vec::with_capacity(plan.song_ids.len());
        for (song_id, order) in plan.song_ids.into_iter().zip(1..) {
            let entry = insert_service_song(
                &txn,
                NewServiceSong {
                    service_id: service.id,
                    song_id,
                    order,
                    key: None,
                },
            )
            .await?;
            setlist.push(entry);
        }

        txn.commit().await.context("commit service plan")?;
        Ok(ServiceLineup {
            service,
            members,
            songs: setlist,
        })
    }

    async fn update_service(
        &self,
        id: ServiceId,
        patch: ServicePatch,
    ) -> Result<Option<Service>, MinistryServiceError> {
        let Some(model) = services::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find service for update")?
        else {
            return Ok(None);
        };
        let mut service = service_from_model(model)?;
        if patch.is_empty() {
            return Ok(Some(service));
        }
        patch.apply(&mut service);
        let model = services::ActiveModel {
            id: Unchanged(service.id.0),
            ministry_id: Unchanged(service.ministry_id.0),
            name: Set(service.name),
            date: Set(service.date),
            time: Set(service.time),
            service_type: Set(service.service_type),
            notes: Set(service.notes),
            status: Set(service.status.as_str().to_owned()),
        }
        .update(&self.db)
        .await
        .context("update service")?;
        service_from_model(model).map(Some)
    }

    async fn delete_service(&self, id: ServiceId) -> Result<bool, MinistryServiceError> {
        let txn = self.db.begin().await.context("begin delete service")?;
        service_members::Entity::delete_many()
            .filter(service_members::Column::ServiceId.eq(id.0))
            .exec(&txn)
            .await
            .context("delete roster of service")?;
        service_songs::Entity::delete_many()
            .filter(service_songs::Column::ServiceId.eq(id.0))
            .exec(&txn)
            .await
            .context("delete setlist of service")?;
        let result = services::Entity::delete_by_id(id.0)
            .exec(&txn)
            .await
            .context("delete service")?;
        txn.commit().await.context("commit delete service")?;
        Ok(result.rows_affected > 0)
    }
}

async fn insert_service<C>(db: &C, service: NewService) -> Result<Service, MinistryServiceError>
where
    C: ConnectionTrait,
{
    let model = services::ActiveModel {
        ministry_id: Set(service.ministry_id.0),
        name: Set(service.name),
        date: Set(service.date),
        time: Set(service.time),
        service_type: Set(service.service_type),
        notes: Set(service.notes),
        status: Set(service.status.as_str().to_owned()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(|e| write_error(e, MinistryServiceError::InvalidInput, "create service"))?;
    service_from_model(model)
}

fn service_from_model(model: services::Model) -> Result<Service, MinistryServiceError> {
    Ok(Service {
        id: ServiceId(model.id),
        ministry_id: MinistryId(model.ministry_id),
        name: model.name,
        date: model.date,
        time: model.time,
        service_type: model.service_type,
        notes: model.notes,
        status: model.status.parse().context("decode service status")?,
    })
}

// ── Service members ──────────────────────────────────────────────────────────

#[async_trait]
impl ServiceMemberRepository for DbStorage {
    async fn find_service_member(
        &self,
        id: ServiceMemberId,
    ) -> Result<Option<ServiceMember>, MinistryServiceError> {
        let model = service_members::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find service member by id")?;
        Ok(model.map(service_member_from_model))
    }

    async fn list_service_members(
        &self,
        service_id: ServiceId,
    ) -> Result<Vec<ServiceMember>, MinistryServiceError> {
        let models = service_members::Entity::find()
            .filter(service_members::Column::ServiceId.eq(service_id.0))
            .order_by_asc(service_members::Column::Id)
            .all(&self.db)
            .await
            .context("list service members")?;
        Ok(models.into_iter().map(service_member_from_model).collect())
    }

    async fn create_service_member(
        &self,
        member: NewServiceMember,
    ) -> Result<ServiceMember, MinistryServiceError> {
        insert_service_member(&self.db, member).await
    }

    async fn delete_service_member(
        &self,
        id: ServiceMemberId,
    ) -> Result<bool, MinistryServiceError> {
        let result = service_members::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .context("delete service member")?;
        Ok(result.rows_affected > 0)
    }
}

async fn insert_service_member<C>(
    db: &C,
    member: NewServiceMember,
) -> Result<ServiceMember, MinistryServiceError>
where
    C: ConnectionTrait,
{
    let model = service_members::ActiveModel {
        service_id: Set(member.service_id.0),
        user_id: Set(member.user_id.0),
        position: Set(member.position),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(|e| {
        write_error(
            e,
            MinistryServiceError::InvalidInput,
            "create service member",
        )
    })?;
    Ok(service_member_from_model(model))
}

fn service_member_from_model(model: service_members::Model) -> ServiceMember {
    ServiceMember {
        id: ServiceMemberId(model.id),
        service_id: ServiceId(model.service_id),
        user_id: UserId(model.user_id),
        position: model.position,
        created_at: model.created_at,
    }
}

// ── Service songs ────────────────────────────────────────────────────────────

#[async_trait]
impl ServiceSongRepository for DbStorage {
    async fn find_service_song(
        &self,
        id: ServiceSongId,
    ) -> Result<Option<ServiceSong>, MinistryServiceError> {
        let model = service_songs::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find service song by id")?;
        Ok(model.map(service_song_from_model))
    }

    async fn list_service_songs(
        &self,
        service_id: ServiceId,
    ) -> Result<Vec<ServiceSong>, MinistryServiceError> {
        let models = service_songs::Entity::find()
            .filter(service_songs::Column::ServiceId.eq(service_id.0))
            .order_by_asc(service_songs::Column::Order)
            .order_by_asc(service_songs::Column::Id)
            .all(&self.db)
            .await
            .context("list service songs")?;
        Ok(models.into_iter().map(service_song_from_model).collect())
    }

    async fn create_service_song(
        &self,
        song: NewServiceSong,
    ) -> Result<ServiceSong, MinistryServiceError> {
        insert_service_song(&self.db, song).await
    }

    async fn update_service_song_order(
        &self,
        id: ServiceSongId,
        order: i32,
    ) -> Result<Option<ServiceSong>, MinistryServiceError> {
        let Some(model) = service_songs::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find service song for update")?
        else {
            return Ok(None);
        };
        let mut am = model.into_active_model();
        am.order = Set(order);
        let model = am
            .update(&self.db)
            .await
            .context("update service song order")?;
        Ok(Some(service_song_from_model(model)))
    }

    async fn delete_service_song(&self, id: ServiceSongId) -> Result<bool, MinistryServiceError> {
        let result = service_songs::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .context("delete service song")?;
        Ok(result.rows_affected > 0)
    }
}

async fn insert_service_song<C>(
    db: &C,
    song: NewServiceSong,
) -> Result<ServiceSong, MinistryServiceError>
where
    C: ConnectionTrait,
{
    let model = service_songs::ActiveModel {
        service_id: Set(song.service_id.0),
        song_id: Set(song.song_id.0),
        order: Set(song.order),
        key: Set(song.key),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(|e| write_error(e, MinistryServiceError::InvalidInput, "create service song"))?;
    Ok(service_song_from_model(model))
}

fn service_song_from_model(model: service_songs::Model) -> ServiceSong {
    ServiceSong {
        id: ServiceSongId(model.id),
        service_id: ServiceId(model.service_id),
        song_id: SongId(model.song_id),
        order: model.order,
        key: model.key,
    }
}

// ── Availability ─────────────────────────────────────────────────────────────

#[async_trait]
impl AvailabilityRepository for DbStorage {
    async fn find_availability(
        &self,
        id: AvailabilityId,
    ) -> Result<Option<Availability>, MinistryServiceError> {
        let model = availabilities::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find availability by id")?;
        Ok(model.map(availability_from_model))
    }

    async fn list_user_availability(
        &self,
        user_id: UserId,
        ministry_id: MinistryId,
    ) -> Result<Vec<Availability>, MinistryServiceError> {
        let models = availabilities::Entity::find()
            .filter(availabilities::Column::UserId.eq(user_id.0))
            .filter(availabilities::Column::MinistryId.eq(ministry_id.0))
            .order_by_asc(availabilities::Column::Id)
            .all(&self.db)
            .await
            .context("list user availability")?;
        Ok(models.into_iter().map(availability_from_model).collect())
    }

    async fn create_availability(
        &self,
        availability: NewAvailability,
    ) -> Result<Availability, MinistryServiceError> {
        let model = availabilities::ActiveModel {
            user_id: Set(availability.user_id.0),
            ministry_id: Set(availability.ministry_id.0),
            start_date: Set(availability.start_date),
            end_date: Set(availability.end_date),
            notes: Set(availability.notes),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| write_error(e, MinistryServiceError::InvalidInput, "create availability"))?;
        Ok(availability_from_model(model))
    }

    async fn delete_availability(
        &self,
        id: AvailabilityId,
    ) -> Result<bool, MinistryServiceError> {
        let result = availabilities::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .context("delete availability")?;
        Ok(result.rows_affected > 0)
    }
}

fn availability_from_model(model: availabilities::Model) -> Availability {
    Availability {
        id: AvailabilityId(model.id),
        user_id: UserId(model.user_id),
        ministry_id: MinistryId(model.ministry_id),
        start_date: model.start_date,
        end_date: model.end_date,
        notes: model.notes,
    }
}

// ── Messages ─────────────────────────────────────────────────────────────────

#[async_trait]
impl MessageRepository for DbStorage {
    async fn find_message(&self, id: MessageId) -> Result<Option<Message>, MinistryServiceError> {
        let model = messages::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find message by id")?;
        Ok(model.map(message_from_model))
    }

    async fn list_messages(
        &self,
        ministry_id: MinistryId,
        participant: Option<UserId>,
    ) -> Result<Vec<Message>, MinistryServiceError> {
        let mut query =
            messages::Entity::find().filter(messages::Column::MinistryId.eq(ministry_id.0));
        if let Some(user) = participant {
            query = query.filter(
                Condition::any()
                    .add(messages::Column::RecipientId.eq(user.0))
                    .add(messages::Column::SenderId.eq(user.0)),
            );
        }
        let models = query
            .order_by_asc(messages::Column::CreatedAt)
            .order_by_asc(messages::Column::Id)
            .all(&self.db)
            .await
            .context("list messages")?;
        Ok(models.into_iter().map(message_from_model).collect())
    }

    async fn create_message(&self, message: NewMessage) -> Result<Message, MinistryServiceError> {
        let model = messages::ActiveModel {
            ministry_id: Set(message.ministry_id.0),
            sender_id: Set(message.sender_id.0),
            recipient_id: Set(message.recipient_id.map(|id| id.0)),
            content: Set(message.content),
            created_at: Set(Utc::now()),
            read: Set(false),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| write_error(e, MinistryServiceError::InvalidInput, "create message"))?;
        Ok(message_from_model(model))
    }

    async fn mark_messages_read(
        &self,
        recipient_id: UserId,
        sender_id: UserId,
    ) -> Result<bool, MinistryServiceError> {
        messages::Entity::update_many()
            .col_expr(messages::Column::Read, Expr::value(true))
            .filter(messages::Column::RecipientId.eq(recipient_id.0))
            .filter(messages::Column::SenderId.eq(sender_id.0))
            .exec(&self.db)
            .await
            .context("mark messages read")?;
        Ok(true)
    }
}

fn message_from_model(model: messages::Model) -> Message {
    Message {
        id: MessageId(model.id),
        ministry_id: MinistryId(model.ministry_id),
        sender_id: UserId(model.sender_id),
        recipient_id: model.recipient_id.map(UserId),
        content: model.content,
        created_at: model.created_at,
        read: model.read,
    }
}
