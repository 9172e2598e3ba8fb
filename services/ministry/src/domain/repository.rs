//! Storage contract consumed by the use cases.
//!
//! Both stores implement every trait here and agree on the ordering and
//! filtering rules documented per method. Absence is `Ok(None)`, `Ok(false)`
//! or an empty list, never an error.
//!
//! The traits use `async_trait` so the active store can be chosen at startup
//! and held as `Arc<dyn Storage>`.

use async_trait::async_trait;

use worship_domain::id::{
    AvailabilityId, MessageId, MinistryId, MinistryMemberId, ServiceId, ServiceMemberId,
    ServiceSongId, SongId, UserId,
};

use crate::domain::types::{
    Availability, Message, Ministry, MinistryMember, MinistryMemberPatch, NewAvailability,
    NewMessage, NewMinistry, NewMinistryMember, NewService, NewServiceMember, NewServiceSong,
    NewSong, NewUser, Service, ServiceLineup, ServiceMember, ServicePatch, ServicePlan,
    ServiceSong, Song, SongPatch, UpsertUser, User,
};
use crate::error::MinistryServiceError;

/// Repository for user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_user(&self, id: UserId) -> Result<Option<User>, MinistryServiceError>;

    async fn find_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, MinistryServiceError>;

    /// Hashes `user.password` and stores the account.
    /// Fails with `UsernameTaken` if the username exists.
    async fn create_user(&self, user: NewUser) -> Result<User, MinistryServiceError>;

    /// Insert-or-update keyed by `external_id`. An update refreshes email,
    /// names and profile image; username and password are left as they are.
    async fn upsert_user(&self, user: UpsertUser) -> Result<User, MinistryServiceError>;
}

/// Repository for ministries.
#[async_trait]
pub trait MinistryRepository: Send + Sync {
    async fn find_ministry(&self, id: MinistryId)
    -> Result<Option<Ministry>, MinistryServiceError>;

    async fn find_ministry_by_code(
        &self,
        code: &str,
    ) -> Result<Option<Ministry>, MinistryServiceError>;

    /// All ministries, ascending by id.
    async fn list_ministries(&self) -> Result<Vec<Ministry>, MinistryServiceError>;

    /// Ministries the user belongs to, in membership order.
    async fn list_ministries_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<Ministry>, MinistryServiceError>;

    /// Fails with `MinistryCodeTaken` on a duplicate code.
    async fn create_ministry(&self, ministry: NewMinistry)
    -> Result<Ministry, MinistryServiceError>;

    /// Creates the ministry and makes `created_by` its Leader in one atomic
    /// step; on failure neither row is stored.
    async fn create_ministry_with_leader(
        &self,
        ministry: NewMinistry,
        position: Option<String>,
    ) -> Result<(Ministry, MinistryMember), MinistryServiceError>;
}

/// Repository for ministry memberships.
#[async_trait]
pub trait MinistryMemberRepository: Send + Sync {
    async fn find_ministry_member(
        &self,
        id: MinistryMemberId,
    ) -> Result<Option<MinistryMember>, MinistryServiceError>;

    async fn list_ministry_members(
        &self,
        ministry_id: MinistryId,
    ) -> Result<Vec<MinistryMember>, MinistryServiceError>;

    async fn list_memberships_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<MinistryMember>, MinistryServiceError>;

    /// Fails with `AlreadyMember` if the user already belongs to the ministry.
    async fn create_ministry_member(
        &self,
        member: NewMinistryMember,
    ) -> Result<MinistryMember, MinistryServiceError>;

    /// Applies the patch and bumps `updated_at`.
    async fn update_ministry_member(
        &self,
        id: MinistryMemberId,
        patch: MinistryMemberPatch,
    ) -> Result<Option<MinistryMember>, MinistryServiceError>;

    async fn delete_ministry_member(
        &self,
        id: MinistryMemberId,
    ) -> Result<bool, MinistryServiceError>;
}

/// Repository for the song library.
#[async_trait]
pub trait SongRepository: Send + Sync {
    async fn find_song(&self, id: SongId) -> Result<Option<Song>, MinistryServiceError>;

    async fn list_songs(&self, ministry_id: MinistryId) -> Result<Vec<Song>, MinistryServiceError>;

    async fn create_song(&self, song: NewSong) -> Result<Song, MinistryServiceError>;

    async fn update_song(
        &self,
        id: SongId,
        patch: SongPatch,
    ) -> Result<Option<Song>, MinistryServiceError>;

    /// Also removes every setlist entry that references the song.
    async fn delete_song(&self, id: SongId) -> Result<bool, MinistryServiceError>;
}

/// Repository for scheduled services.
#[async_trait]
pub trait ServiceRepository: Send + Sync {
    async fn find_service(&self, id: ServiceId) -> Result<Option<Service>, MinistryServiceError>;

    /// Ascending by (date, time, id).
    async fn list_services(
        &self,
        ministry_id: MinistryId,
    ) -> Result<Vec<Service>, MinistryServiceError>;

    /// Services dated today (UTC) or later, ascending by (date, time, id).
    async fn list_upcoming_services(
        &self,
        ministry_id: MinistryId,
    ) -> Result<Vec<Service>, MinistryServiceError>;

    async fn create_service(&self, service: NewService) -> Result<Service, MinistryServiceError>;

    /// Creates the service, its roster and its setlist atomically.
    ///
    /// Every member and song must belong to the service's ministry, otherwise
    /// nothing is stored and `InvalidReference` is returned.
    async fn create_service_plan(
        &self,
        plan: ServicePlan,
    ) -> Result<ServiceLineup, MinistryServiceError>;

    async fn update_service(
        &self,
        id: ServiceId,
        patch: ServicePatch,
    ) -> Result<Option<Service>, MinistryServiceError>;

    /// Also removes the service's roster and setlist.
    async fn delete_service(&self, id: ServiceId) -> Result<bool, MinistryServiceError>;
}

/// Repository for service rosters.
#[async_trait]
pub trait ServiceMemberRepository: Send + Sync {
    async fn find_service_member(
        &self,
        id: ServiceMemberId,
    ) -> Result<Option<ServiceMember>, MinistryServiceError>;

    async fn list_service_members(
        &self,
        service_id: ServiceId,
    ) -> Result<Vec<ServiceMember>, MinistryServiceError>;

    async fn create_service_member(
        &self,
        member: NewServiceMember,
    ) -> Result<ServiceMember, MinistryServiceError>;

    async fn delete_service_member(
        &self,
        id: ServiceMemberId,
    ) -> Result<bool, MinistryServiceError>;
}

/// Repository for service setlists.
#[async_trait]
pub trait ServiceSongRepository: Send + Sync {
    async fn find_service_song(
        &self,
        id: ServiceSongId,
    ) -> Result<Option<ServiceSong>, MinistryServiceError>;

    /// Ascending by (order, id).
    async fn list_service_songs(
        &self,
        service_id: ServiceId,
    ) -> Result<Vec<ServiceSong>, MinistryServiceError>;

    async fn create_service_song(
        &self,
        song: NewServiceSong,
    ) -> Result<ServiceSong, MinistryServiceError>;

    async fn update_service_song_order(
        &self,
        id: ServiceSongId,
        order: i32,
    ) -> Result<Option<ServiceSong>, MinistryServiceError>;

    async fn delete_service_song(&self, id: ServiceSongId) -> Result<bool, MinistryServiceError>;
}

/// Repository for member availability ranges.
#[async_trait]
pub trait AvailabilityRepository: Send + Sync {
    async fn find_availability(
        &self,
        id: AvailabilityId,
    ) -> Result<Option<Availability>, MinistryServiceError>;

    async fn list_user_availability(
        &self,
        user_id: UserId,
        ministry_id: MinistryId,
    ) -> Result<Vec<Availability>, MinistryServiceError>;

    async fn create_availability(
        &self,
        availability: NewAvailability,
    ) -> Result<Availability, MinistryServiceError>;

    async fn delete_availability(&self, id: AvailabilityId)
    -> Result<bool, MinistryServiceError>;
}

/// Repository for team messages.
#[async_trait]
pub trait MessageRepository: Send + Sync {
    async fn find_message(&self, id: MessageId) -> Result<Option<Message>, MinistryServiceError>;

    /// Messages of the ministry, oldest first (created_at, then id).
    /// With `participant`, only messages the user sent or directly received.
    async fn list_messages(
        &self,
        ministry_id: MinistryId,
        participant: Option<UserId>,
    ) -> Result<Vec<Message>, MinistryServiceError>;

    /// Stores the message unread and stamped with the current time.
    async fn create_message(&self, message: NewMessage) -> Result<Message, MinistryServiceError>;

    /// Marks every message from `sender_id` to `recipient_id` as read.
    /// Returns `true` once the operation completed, even if nothing matched.
    async fn mark_messages_read(
        &self,
        recipient_id: UserId,
        sender_id: UserId,
    ) -> Result<bool, MinistryServiceError>;
}

/// The full storage contract. Implemented automatically for any type that
/// implements every entity repository.
pub trait Storage:
    UserRepository
    + MinistryRepository
    + MinistryMemberRepository
    + SongRepository
    + ServiceRepository
    + ServiceMemberRepository
    + ServiceSongRepository
    + AvailabilityRepository
    + MessageRepository
{
}

impl<T> Storage for T where
    T: UserRepository
        + MinistryRepository
        + MinistryMemberRepository
        + SongRepository
        + ServiceRepository
        + ServiceMemberRepository
        + ServiceSongRepository
        + AvailabilityRepository
        + MessageRepository
{
}
