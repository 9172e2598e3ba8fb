use tracing::info;

use worship_domain::id::{MinistryId, ServiceId, ServiceMemberId, ServiceSongId, SongId, UserId};
use worship_domain::service::DEFAULT_POSITION;

use crate::domain::repository::Storage;
use crate::domain::types::{
    NewServiceMember, NewServiceSong, Service, ServiceMember, ServicePatch, ServicePlan,
    ServiceSong, Song, User,
};
use crate::error::MinistryServiceError;
use crate::usecase::access::require_membership;

// ── Views ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct RosterEntry {
    pub entry: ServiceMember,
    pub user: User,
}

#[derive(Debug, Clone)]
pub struct SetlistEntry {
    pub entry: ServiceSong,
    pub song: Song,
    /// Setlist override, else the song's own key.
    pub key: Option<String>,
}

impl SetlistEntry {
    fn new(entry: ServiceSong, song: Song) -> Self {
        let key = entry.effective_key(&song).map(str::to_owned);
        Self { entry, song, key }
    }
}

/// A service with its roster and setlist resolved to users and songs.
#[derive(Debug, Clone)]
pub struct ServiceView {
    pub service: Service,
    pub members: Vec<RosterEntry>,
    pub songs: Vec<SetlistEntry>,
}

/// Rows whose user or song no longer exists are left out.
async fn enrich<R>(repo: &R, service: Service) -> Result<ServiceView, MinistryServiceError>
where
    R: Storage + ?Sized,
{
    let mut members = Vec::new();
    for entry in repo.list_service_members(service.id).await? {
        if let Some(user) = repo.find_user(entry.user_id).await? {
            members.push(RosterEntry { entry, user });
        }
    }
    let mut songs = Vec::new();
    for entry in repo.list_service_songs(service.id).await? {
        if let Some(song) = repo.find_song(entry.song_id).await? {
            songs.push(SetlistEntry::new(entry, song));
        }
    }
    Ok(ServiceView {
        service,
        members,
        songs,
    })
}

/// The service, provided the caller is on its ministry's team.
async fn load_service<R>(
    repo: &R,
    service_id: ServiceId,
    caller: UserId,
) -> Result<Service, MinistryServiceError>
where
    R: Storage + ?Sized,
{
    let service = repo
        .find_service(service_id)
        .await?
        .ok_or(MinistryServiceError::ServiceNotFound)?;
    require_membership(repo, service.ministry_id, caller).await?;
    Ok(service)
}

// ── ListServices ─────────────────────────────────────────────────────────────

pub struct ListServicesUseCase<'a, R: Storage + ?Sized> {
    pub repo: &'a R,
}

impl<R: Storage + ?Sized> ListServicesUseCase<'_, R> {
    /// With `upcoming`, only services dated today or later.
    pub async fn execute(
        &self,
        ministry_id: MinistryId,
        caller: UserId,
        upcoming: bool,
    ) -> Result<Vec<ServiceView>, MinistryServiceError> {
        require_membership(self.repo, ministry_id, caller).await?;
        let services = if upcoming {
            self.repo.list_upcoming_services(ministry_id).await?
        } else {
            self.repo.list_services(ministry_id).await?
        };
        let mut views = Vec::with_capacity(services.len());
        for service in services {
            views.push(enrich(self.repo, service).await?);
        }
        Ok(views)
    }
}

// ── PlanService ──────────────────────────────────────────────────────────────

pub struct PlanServiceUseCase<'a, R: Storage + ?Sized> {
    pub repo: &'a R,
}

impl<R: Storage + ?Sized> PlanServiceUseCase<'_, R> {
    pub async fn execute(
        &self,
        caller: UserId,
        plan: ServicePlan,
    ) -> Result<ServiceView, MinistryServiceError> {
        require_membership(self.repo, plan.service.ministry_id, caller).await?;
        if plan.service.name.trim().is_empty() {
            return Err(MinistryServiceError::InvalidInput);
        }
        let lineup = self.repo.create_service_plan(plan).await?;
        info!(
            service_id = %lineup.service.id,
            members = lineup.members.len(),
            songs = lineup.songs.len(),
            "service planned"
        );
        enrich(self.repo, lineup.service).await
    }
}

// ── GetService ───────────────────────────────────────────────────────────────

pub struct GetServiceUseCase<'a, R: Storage + ?Sized> {
    pub repo: &'a R,
}

impl<R: Storage + ?Sized> GetServiceUseCase<'_, R> {
    pub async fn execute(
        &self,
        service_id: ServiceId,
        caller: UserId,
    ) -> Result<ServiceView, MinistryServiceError> {
        let service = load_service(self.repo, service_id, caller).await?;
        enrich(self.repo, service).await
    }
}

// ── UpdateService ────────────────────────────────────────────────────────────

pub struct UpdateServiceUseCase<'a, R: Storage + ?Sized> {
    pub repo: &'a R,
}

impl<R: Storage + ?Sized> UpdateServiceUseCase<'_, R> {
    pub async fn execute(
        &self,
        service_id: ServiceId,
        caller: UserId,
        patch: ServicePatch,
    ) -> Result<ServiceView, MinistryServiceError> {
        load_service(self.repo, service_id, caller).await?;
        if patch.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(MinistryServiceError::InvalidInput);
        }
        let service = self
            .repo
            .update_service(service_id, patch)
            .await?
            .ok_or(MinistryServiceError::ServiceNotFound)?;
        enrich(self.repo, service).await
    }
}

// ── DeleteService ────────────────────────────────────────────────────────────

pub struct DeleteServiceUseCase<'a, R: Storage + ?Sized> {
    pub repo: &'a R,
}

impl<R: Storage + ?Sized> DeleteServiceUseCase<'_, R> {
    pub async fn execute(
        &self,
        service_id: ServiceId,
        caller: UserId,
    ) -> Result<(), MinistryServiceError> {
        load_service(self.repo, service_id, caller).await?;
        if !self.repo.delete_service(service_id).await? {
            return Err(MinistryServiceError::ServiceNotFound);
        }
        Ok(())
    }
}

// ── AddServiceMember ─────────────────────────────────────────────────────────

pub struct AddServiceMemberInput {
    pub user_id: UserId,
    pub position: Option<String>,
}

/// Puts a team member on the roster. The user must belong to the ministry.
pub struct AddServiceMemberUseCase<'a, R: Storage + ?Sized> {
    pub repo: &'a R,
}

impl<R: Storage + ?Sized> AddServiceMemberUseCase<'_, R> {
    pub async fn execute(
        &self,
        service_id: ServiceId,
        caller: UserId,
        input: AddServiceMemberInput,
    ) -> Result<RosterEntry, MinistryServiceError> {
        let service = load_service(self.repo, service_id, caller).await?;
        let membership = self
            .repo
            .list_memberships_for_user(input.user_id)
            .await?
            .into_iter()
            .find(|m| m.ministry_id == service.ministry_id)
            .ok_or(MinistryServiceError::InvalidReference)?;
        let user = self
            .repo
            .find_user(input.user_id)
            .await?
            .ok_or(MinistryServiceError::InvalidReference)?;

        let position = input
            .position
            .filter(|p| !p.trim().is_empty())
            .or(membership.position)
            .unwrap_or_else(|| DEFAULT_POSITION.to_owned());
        let entry = self
            .repo
            .create_service_member(NewServiceMember {
                service_id,
                user_id: user.id,
                position,
            })
            .await?;
        Ok(RosterEntry { entry, user })
    }
}

// ── RemoveServiceMember ──────────────────────────────────────────────────────

pub struct RemoveServiceMemberUseCase<'a, R: Storage + ?Sized> {
    pub repo: &'a R,
}

impl<R: Storage + ?Sized> RemoveServiceMemberUseCase<'_, R> {
    pub async fn execute(
        &self,
        id: ServiceMemberId,
        caller: UserId,
    ) -> Result<(), MinistryServiceError> {
        let entry = self
            .repo
            .find_service_member(id)
            .await?
            .ok_or(MinistryServiceError::ServiceMemberNotFound)?;
        load_service(self.repo, entry.service_id, caller).await?;
        if !self.repo.delete_service_member(id).await? {
            return Err(MinistryServiceError::ServiceMemberNotFound);
        }
        Ok(())
    }
}

// ── AddServiceSong ───────────────────────────────────────────────────────────

pub struct AddServiceSongInput {
    pub song_id: SongId,
    /// Position in the setlist; appended after the last entry when absent.
    pub order: Option<i32>,
    pub key: Option<String>,
}

pub struct AddServiceSongUseCase<'a, R: Storage + ?Sized> {
    pub repo: &'a R,
}

impl<R: Storage + ?Sized> AddServiceSongUseCase<'_, R> {
    pub async fn execute(
        &self,
        service_id: ServiceId,
        caller: UserId,
        input: AddServiceSongInput,
    ) -> Result<SetlistEntry, MinistryServiceError> {
        let service = load_service(self.repo, service_id, caller).await?;
        let song = self
            .repo
            .find_song(input.song_id)
            .await?
            .filter(|s| s.ministry_id == service.ministry_id)
            .ok_or(MinistryServiceError::InvalidReference)?;

        let order = match input.order {
            Some(order) if order < 1 => return Err(MinistryServiceError::InvalidInput),
            Some(order) => order,
            None => {
                let last = self
                    .repo
                    .list_service_songs(service_id)
                    .await?
                    .iter()
                    .map(|s| s.order)
                    .max()
                    .unwrap_or(0);
                last.checked_add(1).ok_or(MinistryServiceError::InvalidInput)?
            }
        };
        let entry = self
            .repo
            .create_service_song(NewServiceSong {
                service_id,
                song_id: song.id,
                order,
                key: input.key.filter(|k| !k.trim().is_empty()),
            })
            .await?;
        Ok(SetlistEntry::new(entry, song))
    }
}

// ── ReorderServiceSong ───────────────────────────────────────────────────────

pub struct ReorderServiceSongUseCase<'a, R: Storage + ?Sized> {
    pub repo: &'a R,
}

impl<R: Storage + ?Sized> ReorderServiceSongUseCase<'_, R> {
    pub async fn execute(
        &self,
        id: ServiceSongId,
        caller: UserId,
        order: i32,
    ) -> Result<ServiceSong, MinistryServiceError> {
        if order < 1 {
            return Err(MinistryServiceError::InvalidInput);
        }
        let entry = self
            .repo
            .find_service_song(id)
            .await?
            .ok_or(MinistryServiceError::ServiceSongNotFound)?;
        load_service(self.repo, entry.service_id, caller).await?;
        self.repo
            .update_service_song_order(id, order)
            .await?
            .ok_or(MinistryServiceError::ServiceSongNotFound)
    }
}

// ── RemoveServiceSong ────────────────────────────────────────────────────────

pub struct RemoveServiceSongUseCase<'a, R: Storage + ?Sized> {
    pub repo: &'a R,
}

impl<R: Storage + ?Sized> RemoveServiceSongUseCase<'_, R> {
    pub async fn execute(
        &self,
        id: ServiceSongId,
        caller: UserId,
    ) -> Result<(), MinistryServiceError> {
        let entry = self
            .repo
            .find_service_song(id)
            .await?
            .ok_or(MinistryServiceError::ServiceSongNotFound)?;
        load_service(self.repo, entry.service_id, caller).await?;
        if !self.repo.delete_service_song(id).await? {
            return Err(MinistryServiceError::ServiceSongNotFound);
        }
        Ok(())
    }
}
