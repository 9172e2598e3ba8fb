use worship_domain::id::{AvailabilityId, MinistryId, UserId};

use crate::domain::repository::{
    AvailabilityRepository, MinistryMemberRepository, MinistryRepository,
};
use crate::domain::types::{Availability, NewAvailability};
use crate::error::MinistryServiceError;
use crate::usecase::access::require_membership;

// ── ListMyAvailability ───────────────────────────────────────────────────────

pub struct ListMyAvailabilityUseCase<'a, R>
where
    R: MinistryRepository + MinistryMemberRepository + AvailabilityRepository + ?Sized,
{
    pub repo: &'a R,
}

impl<R> ListMyAvailabilityUseCase<'_, R>
where
    R: MinistryRepository + MinistryMemberRepository + AvailabilityRepository + ?Sized,
{
    pub async fn execute(
        &self,
        ministry_id: MinistryId,
        caller: UserId,
    ) -> Result<Vec<Availability>, MinistryServiceError> {
        require_membership(self.repo, ministry_id, caller).await?;
        self.repo.list_user_availability(caller, ministry_id).await
    }
}

// ── CreateAvailability ───────────────────────────────────────────────────────

pub struct CreateAvailabilityUseCase<'a, R>
where
    R: MinistryRepository + MinistryMemberRepository + AvailabilityRepository + ?Sized,
{
    pub repo: &'a R,
}

impl<R> CreateAvailabilityUseCase<'_, R>
where
    R: MinistryRepository + MinistryMemberRepository + AvailabilityRepository + ?Sized,
{
    /// Ranges are inclusive; a single day has `end_date == start_date`.
    pub async fn execute(
        &self,
        availability: NewAvailability,
    ) -> Result<Availability, MinistryServiceError> {
        require_membership(self.repo, availability.ministry_id, availability.user_id).await?;
        if availability.end_date < availability.start_date {
            return Err(MinistryServiceError::InvalidDateRange);
        }
        self.repo.create_availability(availability).await
    }
}

// ── DeleteAvailability ───────────────────────────────────────────────────────

pub struct DeleteAvailabilityUseCase<'a, R>
where
    R: AvailabilityRepository + ?Sized,
{
    pub repo: &'a R,
}

impl<R> DeleteAvailabilityUseCase<'_, R>
where
    R: AvailabilityRepository + ?Sized,
{
    /// Only the owner may delete a range; anyone else sees it as missing.
    pub async fn execute(
        &self,
        id: AvailabilityId,
        caller: UserId,
    ) -> Result<(), MinistryServiceError> {
        let found = self
            .repo
            .find_availability(id)
            .await?
            .filter(|a| a.user_id == caller);
        if found.is_none() || !self.repo.delete_availability(id).await? {
            return Err(MinistryServiceError::AvailabilityNotFound);
        }
        Ok(())
    }
}
