//! In-memory store: one ordered map per entity behind a single lock.
//!
//! Reads take the read lock; every write, including the composite service
//! plan and cascading deletes, runs inside one write-lock section. No lock
//! guard is ever held across an `.await`.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use tracing::debug;

use worship_domain::id::{
    AvailabilityId, MessageId, MinistryId, MinistryMemberId, ServiceId, ServiceMemberId,
    ServiceSongId, SongId, UserId,
};
use worship_domain::role::{MemberRole, UserRole};
use worship_domain::service::DEFAULT_POSITION;

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
use crate::infra::seed::seed_demo_data;

// ── Tables ───────────────────────────────────────────────────────────────────

struct Table<T> {
    rows: BTreeMap<i64, T>,
    next_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<T: Clone> Table<T> {
    /// Ids start at 1 and are never reused, even after deletes.
    fn allocate(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn get(&self, id: i64) -> Option<T> {
        self.rows.get(&id).cloned()
    }

    fn contains(&self, id: i64) -> bool {
        self.rows.contains_key(&id)
    }

    fn insert(&mut self, id: i64, row: T) -> T {
        self.rows.insert(id, row.clone());
        row
    }

    fn remove(&mut self, id: i64) -> bool {
        self.rows.remove(&id).is_some()
    }

    fn filter(&self, pred: impl Fn(&T) -> bool) -> Vec<T> {
        self.rows.values().filter(|row| pred(row)).cloned().collect()
    }

    fn find(&self, pred: impl Fn(&T) -> bool) -> Option<T> {
        self.rows.values().find(|row| pred(row)).cloned()
    }
}

#[derive(Default)]
struct Tables {
    users: Table<User>,
    ministries: Table<Ministry>,
    ministry_members: Table<MinistryMember>,
    songs: Table<Song>,
    services: Table<Service>,
    service_members: Table<ServiceMember>,
    service_songs: Table<ServiceSong>,
    availability: Table<Availability>,
    messages: Table<Message>,
}

impl Tables {
    fn require_user(&self, id: UserId) -> Result<(), MinistryServiceError> {
        require(self.users.contains(id.0))
    }

    fn require_ministry(&self, id: MinistryId) -> Result<(), MinistryServiceError> {
        require(self.ministries.contains(id.0))
    }

    fn insert_ministry(&mut self, ministry: NewMinistry) -> Result<Ministry, MinistryServiceError> {
        self.require_user(ministry.created_by)?;
        if self.ministries.find(|m| m.code == ministry.code).is_some() {
            return Err(MinistryServiceError::MinistryCodeTaken);
        }
        let now = Utc::now();
        let id = self.ministries.allocate();
        Ok(self.ministries.insert(
            id,
            Ministry {
                id: MinistryId(id),
                name: ministry.name,
                code: ministry.code,
                created_by: ministry.created_by,
                logo: ministry.logo,
                created_at: now,
                updated_at: now,
            },
        ))
    }

    fn insert_ministry_member(
        &mut self,
        member: NewMinistryMember,
    ) -> Result<MinistryMember, MinistryServiceError> {
        self.require_ministry(member.ministry_id)?;
        self.require_user(member.user_id)?;
        let exists = self
            .ministry_members
            .find(|m| m.ministry_id == member.ministry_id && m.user_id == member.user_id)
            .is_some();
        if exists {
            return Err(MinistryServiceError::AlreadyMember);
        }
        let now = Utc::now();
        let id = self.ministry_members.allocate();
        Ok(self.ministry_members.insert(
            id,
            MinistryMember {
                id: MinistryMemberId(id),
                ministry_id: member.ministry_id,
                user_id: member.user_id,
                role: member.role,
                position: member.position,
                created_at: now,
                updated_at: now,
            },
        ))
    }

    fn insert_service(&mut self, service: NewService) -> Service {
        let id = self.services.allocate();
        self.services.insert(
            id,
            Service {
                id: ServiceId(id),
                ministry_id: service.ministry_id,
                name: service.name,
                date: service.date,
                time: service.time,
                service_type: service.service_type,
                notes: service.notes,
                status: service.status,
            },
        )
    }

    fn insert_service_member(&mut self, member: NewServiceMember) -> ServiceMember {
        let id = self.service_members.allocate();
        self.service_members.insert(
            id,
            ServiceMember {
                id: ServiceMemberId(id),
                service_id: member.service_id,
                user_id: member.user_id,
                position: member.position,
                created_at: Utc::now(),
            },
        )
    }

    fn insert_service_song(&mut self, song: NewServiceSong) -> ServiceSong {
        let id = self.service_songs.allocate();
        self.service_songs.insert(
            id,
            ServiceSong {
                id: ServiceSongId(id),
                service_id: song.service_id,
                song_id: song.song_id,
                order: song.order,
                key: song.key,
            },
        )
    }
}

fn require(exists: bool) -> Result<(), MinistryServiceError> {
    if exists {
        Ok(())
    } else {
        Err(MinistryServiceError::InvalidReference)
    }
}

fn sort_services(services: &mut [Service]) {
    services.sort_by_key(|s| (s.date, s.time, s.id));
}

// ── Store ────────────────────────────────────────────────────────────────────

/// Process-local store. Cloning yields another handle to the same tables.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<RwLock<Tables>>,
}

impl MemoryStorage {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with the demo ministry, songs and service.
    pub async fn with_demo_data() -> Result<Self, MinistryServiceError> {
        let storage = Self::new();
        seed_demo_data(&storage).await?;
        Ok(storage)
    }
}

// ── Users ────────────────────────────────────────────────────────────────────

#[async_trait]
impl UserRepository for MemoryStorage {
    async fn find_user(&self, id: UserId) -> Result<Option<User>, MinistryServiceError> {
        Ok(self.inner.read().users.get(id.0))
    }

    async fn find_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, MinistryServiceError> {
        Ok(self.inner.read().users.find(|u| u.username == username))
    }

    async fn create_user(&self, user: NewUser) -> Result<User, MinistryServiceError> {
        let password_hash = hash_password_blocking(user.password).await?;

        let mut tables = self.inner.write();
        if tables.users.find(|u| u.username == user.username).is_some() {
            return Err(MinistryServiceError::UsernameTaken);
        }
        let now = Utc::now();
        let id = tables.users.allocate();
        let created = tables.users.insert(
            id,
            User {
                id: UserId(id),
                external_id: None,
                username: user.username,
                password_hash: Some(password_hash),
                email: user.email,
                first_name: user.first_name,
                last_name: user.last_name,
                phone: user.phone,
                profile_image_url: user.profile_image_url,
                role: user.role,
                created_at: now,
                updated_at: now,
            },
        );
        debug!(user_id = %created.id, "created user");
        Ok(created)
    }

    async fn upsert_user(&self, user: UpsertUser) -> Result<User, MinistryServiceError> {
        let mut tables = self.inner.write();
        let now = Utc::now();
        let existing = tables
            .users
            .find(|u| u.external_id.as_deref() == Some(user.external_id.as_str()));

        if let Some(mut current) = existing {
            current.email = user.email;
            current.first_name = user.first_name;
            current.last_name = user.last_name;
            current.profile_image_url = user.profile_image_url;
            current.updated_at = now;
            return Ok(tables.users.insert(current.id.0, current));
        }

        if tables.users.find(|u| u.username == user.username).is_some() {
            return Err(MinistryServiceError::UsernameTaken);
        }
        let id = tables.users.allocate();
        Ok(tables.users.insert(
            id,
            User {
                id: UserId(id),
                external_id: Some(user.external_id),
                username: user.username,
                password_hash: None,
                email: user.email,
                first_name: user.first_name,
                last_name: user.last_name,
                phone: None,
                profile_image_url: user.profile_image_url,
                role: UserRole::Member,
                created_at: now,
                updated_at: now,
            },
        ))
    }
}

// ── Ministries ───────────────────────────────────────────────────────────────

#[async_trait]
impl MinistryRepository for MemoryStorage {
    async fn find_ministry(
        &self,
        id: MinistryId,
    ) -> Result<Option<Ministry>, MinistryServiceError> {
        Ok(self.inner.read().ministries.get(id.0))
    }

    async fn find_ministry_by_code(
        &self,
        code: &str,
    ) -> Result<Option<Ministry>, MinistryServiceError> {
        Ok(self.inner.read().ministries.find(|m| m.code == code))
    }

    async fn list_ministries(&self) -> Result<Vec<Ministry>, MinistryServiceError> {
        Ok(self.inner.read().ministries.filter(|_| true))
    }

    async fn list_ministries_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<Ministry>, MinistryServiceError> {
        let tables = self.inner.read();
        Ok(tables
            .ministry_members
            .filter(|m| m.user_id == user_id)
            .into_iter()
            .filter_map(|m| tables.ministries.get(m.ministry_id.0))
            .collect())
    }

    async fn create_ministry(
        &self,
        ministry: NewMinistry,
    ) -> Result<Ministry, MinistryServiceError> {
        self.inner.write().insert_ministry(ministry)
    }

    async fn create_ministry_with_leader(
        &self,
        ministry: NewMinistry,
        position: Option<String>,
    ) -> Result<(Ministry, MinistryMember), MinistryServiceError> {
        let mut tables = self.inner.write();
        let ministry = tables.insert_ministry(ministry)?;
        let leader = tables.insert_ministry_member(NewMinistryMember {
            ministry_id: ministry.id,
            user_id: ministry.created_by,
            role: MemberRole::Leader,
            position,
        })?;
        Ok((ministry, leader))
    }
}

// ── Ministry members ─────────────────────────────────────────────────────────

#[async_trait]
impl MinistryMemberRepository for MemoryStorage {
    async fn find_ministry_member(
        &self,
        id: MinistryMemberId,
    ) -> Result<Option<MinistryMember>, MinistryServiceError> {
        Ok(self.inner.read().ministry_members.get(id.0))
    }

    async fn list_ministry_members(
        &self,
        ministry_id: MinistryId,
    ) -> Result<Vec<MinistryMember>, MinistryServiceError> {
        Ok(self
            .inner
            .read()
            .ministry_members
            .filter(|m| m.ministry_id == ministry_id))
    }

    async fn list_memberships_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<MinistryMember>, MinistryServiceError> {
        Ok(self
            .inner
            .read()
            .ministry_members
            .filter(|m| m.user_id == user_id))
    }

    async fn create_ministry_member(
        &self,
        member: NewMinistryMember,
    ) -> Result<MinistryMember, MinistryServiceError> {
        self.inner.write().insert_ministry_member(member)
    }

    async fn update_ministry_member(
        &self,
        id: MinistryMemberId,
        patch: MinistryMemberPatch,
    ) -> Result<Option<MinistryMember>, MinistryServiceError> {
        let mut tables = self.inner.write();
        let Some(mut member) = tables.ministry_members.get(id.0) else {
            return Ok(None);
        };
        if let Some(role) = patch.role {
            member.role = role;
        }
        if let Some(position) = patch.position {
            member.position = position;
        }
        member.updated_at = Utc::now();
        Ok(Some(tables.ministry_members.insert(id.0, member)))
    }

    async fn delete_ministry_member(
        &self,
        id: MinistryMemberId,
    ) -> Result<bool, MinistryServiceError> {
        Ok(self.inner.write().ministry_members.remove(id.0))
    }
}

// ── Songs ────────────────────────────────────────────────────────────────────

#[async_trait]
impl SongRepository for MemoryStorage {
    async fn find_song(&self, id: SongId) -> Result<Option<Song>, MinistryServiceError> {
        Ok(self.inner.read().songs.get(id.0))
    }

    async fn list_songs(&self, ministry_id: MinistryId) -> Result<Vec<Song>, MinistryServiceError> {
        Ok(self
            .inner
            .read()
            .songs
            .filter(|s| s.ministry_id == ministry_id))
    }

    async fn create_song(&self, song: NewSong) -> Result<Song, MinistryServiceError> {
        let mut tables = self.inner.write();
        tables.require_ministry(song.ministry_id)?;
        let id = tables.songs.allocate();
        Ok(tables.songs.insert(
            id,
            Song {
                id: SongId(id),
                ministry_id: song.ministry_id,
                title: song.title,
                artist: song.artist,
                key: song.key,
                bpm: song.bpm,
                duration: song.duration,
                category: song.category,
                chord_link: song.chord_link,
                lyrics_link: song.lyrics_link,
                audio_link: song.audio_link,
                video_link: song.video_link,
            },
        ))
    }

    async fn update_song(
        &self,
        id: SongId,
        patch: SongPatch,
    ) -> Result<Option<Song>, MinistryServiceError> {
        let mut tables = self.inner.write();
        let Some(mut song) = tables.songs.get(id.0) else {
            return Ok(None);
        };
        patch.apply(&mut song);
        Ok(Some(tables.songs.insert(id.0, song)))
    }

    async fn delete_song(&self, id: SongId) -> Result<bool, MinistryServiceError> {
        let mut tables = self.inner.write();
        if !tables.songs.remove(id.0) {
            return Ok(false);
        }
        tables.service_songs.rows.retain(|_, entry| entry.song_id != id);
        Ok(true)
    }
}

// ── Services ─────────────────────────────────────────────────────────────────

#[async_trait]
impl ServiceRepository for MemoryStorage {
    async fn find_service(&self, id: ServiceId) -> Result<Option<Service>, MinistryServiceError> {
        Ok(self.inner.read().services.get(id.0))
    }

    async fn list_services(
        &self,
        ministry_id: MinistryId,
    ) -> Result<Vec<Service>, MinistryServiceError> {
        let mut services = self
            .inner
            .read()
            .services
            .filter(|s| s.ministry_id == ministry_id);
        sort_services(&mut services);
        Ok(services)
    }

    async fn list_upcoming_services(
        &self,
        ministry_id: MinistryId,
    ) -> Result<Vec<Service>, MinistryServiceError> {
        let today = Utc::now().date_naive();
        let mut services = self
            .inner
            .read()
            .services
            .filter(|s| s.ministry_id == ministry_id && s.date >= today);
        sort_services(&mut services);
        Ok(services)
    }

    async fn create_service(&self, service: NewService) -> Result<Service, MinistryServiceError> {
        let mut tables = self.inner.write();
        tables.require_ministry(service.ministry_id)?;
        Ok(tables.insert_service(service))
    }

    async fn create_service_plan(
        &self,
        plan: ServicePlan,
    ) -> Result<ServiceLineup, MinistryServiceError> {
        let mut tables = self.inner.write();
        let ministry_id = plan.service.ministry_id;
        tables.require_ministry(ministry_id)?;

        // Validate every reference before the first insert.
        let roster = plan
            .member_ids
            .iter()
            .map(|id| {
                tables
                    .ministry_members
                    .get(id.0)
                    .filter(|m| m.ministry_id == ministry_id)
                    .ok_or(MinistryServiceError::InvalidReference)
            })
            .collect::<Result<Vec<_>, _>>()?;
        for song_id in &plan.song_ids {
            let in_ministry = tables
                .songs
                .rows
                .get(&song_id.0)
                .is_some_and(|s| s.ministry_id == ministry_id);
            require(in_ministry)?;
        }

        let service = tables.insert_service(plan.service);
        let members = roster
            .into_iter()
            .map(|member| {
                tables.insert_service_member(NewServiceMember {
                    service_id: service.id,
                    user_id: member.user_id,
                    position: member
                        .position
                        .unwrap_or_else(|| DEFAULT_POSITION.to_owned()),
                })
            })
            .collect();
        let songs = plan
            .song_ids
            .into_iter()
            .zip(1..)
            .map(|(song_id, order)| {
                tables.insert_service_song(NewServiceSong {
                    service_id: service.id,
                    song_id,
                    order,
                    key: None,
                })
            })
            .collect();

        debug!(service_id = %service.id, "created service plan");
        Ok(ServiceLineup {
            service,
            members,
            songs,
        })
    }

    async fn update_service(
        &self,
        id: ServiceId,
        patch: ServicePatch,
    ) -> Result<Option<Service>, MinistryServiceError> {
        let mut tables = self.inner.write();
        let Some(mut service) = tables.services.get(id.0) else {
            return Ok(None);
        };
        patch.apply(&mut service);
        Ok(Some(tables.services.insert(id.0, service)))
    }

    async fn delete_service(&self, id: ServiceId) -> Result<bool, MinistryServiceError> {
        let mut tables = self.inner.write();
        if !tables.services.remove(id.0) {
            return Ok(false);
        }
        tables.service_members.rows.retain(|_, m| m.service_id != id);
        tables.service_songs.rows.retain(|_, s| s.service_id != id);
        Ok(true)
    }
}

// ── Service members ──────────────────────────────────────────────────────────

#[async_trait]
impl ServiceMemberRepository for MemoryStorage {
    async fn find_service_member(
        &self,
        id: ServiceMemberId,
    ) -> Result<Option<ServiceMember>, MinistryServiceError> {
        Ok(self.inner.read().service_members.get(id.0))
    }

    async fn list_service_members(
        &self,
        service_id: ServiceId,
    ) -> Result<Vec<ServiceMember>, MinistryServiceError> {
        Ok(self
            .inner
            .read()
            .service_members
            .filter(|m| m.service_id == service_id))
    }

    async fn create_service_member(
        &self,
        member: NewServiceMember,
    ) -> Result<ServiceMember, MinistryServiceError> {
        let mut tables = self.inner.write();
        require(tables.services.contains(member.service_id.0))?;
        tables.require_user(member.user_id)?;
        Ok(tables.insert_service_member(member))
    }

    async fn delete_service_member(
        &self,
        id: ServiceMemberId,
    ) -> Result<bool, MinistryServiceError> {
        Ok(self.inner.write().service_members.remove(id.0))
    }
}

// ── Service songs ────────────────────────────────────────────────────────────

#[async_trait]
impl ServiceSongRepository for MemoryStorage {
    async fn find_service_song(
        &self,
        id: ServiceSongId,
    ) -> Result<Option<ServiceSong>, MinistryServiceError> {
        Ok(self.inner.read().service_songs.get(id.0))
    }

    async fn list_service_songs(
        &self,
        service_id: ServiceId,
    ) -> Result<Vec<ServiceSong>, MinistryServiceError> {
        let mut songs = self
            .inner
            .read()
            .service_songs
            .filter(|s| s.service_id == service_id);
        songs.sort_by_key(|s| (s.order, s.id));
        Ok(songs)
    }

    async fn create_service_song(
        &self,
        song: NewServiceSong,
    ) -> Result<ServiceSong, MinistryServiceError> {
        let mut tables = self.inner.write();
        require(tables.services.contains(song.service_id.0))?;
        require(tables.songs.contains(song.song_id.0))?;
        Ok(tables.insert_service_song(song))
    }

    async fn update_service_song_order(
        &self,
        id: ServiceSongId,
        order: i32,
    ) -> Result<Option<ServiceSong>, MinistryServiceError> {
        let mut tables = self.inner.write();
        let Some(mut entry) = tables.service_songs.get(id.0) else {
            return Ok(None);
        };
        entry.order = order;
        Ok(Some(tables.service_songs.insert(id.0, entry)))
    }

    async fn delete_service_song(&self, id: ServiceSongId) -> Result<bool, MinistryServiceError> {
        Ok(self.inner.write().service_songs.remove(id.0))
    }
}

// ── Availability ─────────────────────────────────────────────────────────────

#[async_trait]
impl AvailabilityRepository for MemoryStorage {
    async fn find_availability(
        &self,
        id: AvailabilityId,
    ) -> Result<Option<Availability>, MinistryServiceError> {
        Ok(self.inner.read().availability.get(id.0))
    }

    async fn list_user_availability(
        &self,
        user_id: UserId,
        ministry_id: MinistryId,
    ) -> Result<Vec<Availability>, MinistryServiceError> {
        Ok(self
            .inner
            .read()
            .availability
            .filter(|a| a.user_id == user_id && a.ministry_id == ministry_id))
    }

    async fn create_availability(
        &self,
        availability: NewAvailability,
    ) -> Result<Availability, MinistryServiceError> {
        let mut tables = self.inner.write();
        tables.require_user(availability.user_id)?;
        tables.require_ministry(availability.ministry_id)?;
        let id = tables.availability.allocate();
        Ok(tables.availability.insert(
            id,
            Availability {
                id: AvailabilityId(id),
                user_id: availability.user_id,
                ministry_id: availability.ministry_id,
                start_date: availability.start_date,
                end_date: availability.end_date,
                notes: availability.notes,
            },
        ))
    }

    async fn delete_availability(
        &self,
        id: AvailabilityId,
    ) -> Result<bool, MinistryServiceError> {
        Ok(self.inner.write().availability.remove(id.0))
    }
}

// ── Messages ─────────────────────────────────────────────────────────────────

#[async_trait]
impl MessageRepository for MemoryStorage {
    async fn find_message(&self, id: MessageId) -> Result<Option<Message>, MinistryServiceError> {
        Ok(self.inner.read().messages.get(id.0))
    }

    async fn list_messages(
        &self,
        ministry_id: MinistryId,
        participant: Option<UserId>,
    ) -> Result<Vec<Message>, MinistryServiceError> {
        let mut messages = self.inner.read().messages.filter(|m| {
            m.ministry_id == ministry_id && participant.is_none_or(|user| m.involves(user))
        });
        messages.sort_by_key(|m| (m.created_at, m.id));
        Ok(messages)
    }

    async fn create_message(&self, message: NewMessage) -> Result<Message, MinistryServiceError> {
        let mut tables = self.inner.write();
        tables.require_ministry(message.ministry_id)?;
        tables.require_user(message.sender_id)?;
        if let Some(recipient_id) = message.recipient_id {
            tables.require_user(recipient_id)?;
        }
        let id = tables.messages.allocate();
        Ok(tables.messages.insert(
            id,
            Message {
                id: MessageId(id),
                ministry_id: message.ministry_id,
                sender_id: message.sender_id,
                recipient_id: message.recipient_id,
                content: message.content,
                created_at: Utc::now(),
                read: false,
            },
        ))
    }

    async fn mark_messages_read(
        &self,
        recipient_id: UserId,
        sender_id: UserId,
    ) -> Result<bool, MinistryServiceError> {
        let mut tables = self.inner.write();
        for message in tables.messages.rows.values_mut() {
            if message.recipient_id == Some(recipient_id) && message.sender_id == sender_id {
                message.read = true;
            }
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveTime};
    use worship_domain::service::ServiceStatus;

    async fn ministry_with_leader(storage: &MemoryStorage) -> (User, Ministry, MinistryMember) {
        let user = storage
            .create_user(NewUser {
                username: "alice".into(),
                password: "secret".into(),
                ..Default::default()
            })
            .await
            .unwrap();
        let ministry = storage
            .create_ministry(NewMinistry {
                name: "Sample Choir".into(),
                code: "ABCD".into(),
                created_by: user.id,
                logo: None,
            })
            .await
            .unwrap();
        let member = storage
            .create_ministry_member(NewMinistryMember {
                ministry_id: ministry.id,
                user_id: user.id,
                role: MemberRole::Leader,
                position: None,
            })
            .await
            .unwrap();
        (user, ministry, member)
    }

    fn new_service(ministry_id: MinistryId, days_from_today: i64) -> NewService {
        NewService {
            ministry_id,
            name: "Evening Worship".into(),
            date: Utc::now().date_naive() + Duration::days(days_from_today),
            time: NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
            service_type: None,
            notes: None,
            status: ServiceStatus::Pending,
        }
    }

    #[tokio::test]
    async fn should_never_reuse_deleted_ids() {
        let storage = MemoryStorage::new();
        let (_, ministry, _) = ministry_with_leader(&storage).await;
        let first = storage
            .create_service(new_service(ministry.id, 1))
            .await
            .unwrap();
        assert!(storage.delete_service(first.id).await.unwrap());
        let second = storage
            .create_service(new_service(ministry.id, 1))
            .await
            .unwrap();
        assert_eq!(second.id, ServiceId(first.id.0 + 1));
    }

    #[tokio::test]
    async fn should_share_tables_between_clones() {
        let storage = MemoryStorage::new();
        let (user, _, _) = ministry_with_leader(&storage).await;
        let handle = storage.clone();
        assert!(handle.find_user(user.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn should_default_plan_position_to_member() {
        let storage = MemoryStorage::new();
        let (_, ministry, member) = ministry_with_leader(&storage).await;
        let lineup = storage
            .create_service_plan(ServicePlan {
                service: new_service(ministry.id, 3),
                member_ids: vec![member.id],
                song_ids: vec![],
            })
            .await
            .unwrap();
        assert_eq!(lineup.members.len(), 1);
        assert_eq!(lineup.members[0].position, DEFAULT_POSITION);
    }

    #[tokio::test]
    async fn should_reject_plan_with_member_of_other_ministry() {
        let storage = MemoryStorage::new();
        let (user, ministry, _) = ministry_with_leader(&storage).await;
        let other = storage
            .create_ministry(NewMinistry {
                name: "Youth Band".into(),
                code: "YTHB".into(),
                created_by: user.id,
                logo: None,
            })
            .await
            .unwrap();
        let outsider = storage
            .create_ministry_member(NewMinistryMember {
                ministry_id: other.id,
                user_id: user.id,
                role: MemberRole::Member,
                position: None,
            })
            .await
            .unwrap();

        let result = storage
            .create_service_plan(ServicePlan {
                service: new_service(ministry.id, 3),
                member_ids: vec![outsider.id],
                song_ids: vec![],
            })
            .await;
        assert!(matches!(
            result,
            Err(MinistryServiceError::InvalidReference)
        ));
        assert!(storage.list_services(ministry.id).await.unwrap().is_empty());
    }
}
