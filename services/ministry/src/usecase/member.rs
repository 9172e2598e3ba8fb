use rand::RngExt;
use tracing::info;

use worship_domain::id::{MinistryId, MinistryMemberId, UserId};
use worship_domain::role::{MemberRole, UserRole};

use crate::domain::repository::{MinistryMemberRepository, MinistryRepository, UserRepository};
use crate::domain::types::{MinistryMember, MinistryMemberPatch, NewMinistryMember, NewUser, User};
use crate::error::MinistryServiceError;
use crate::usecase::access::{require_membership, require_team_manager};
use crate::usecase::user::username_from_email;

const PASSWORD_CHARSET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
const GENERATED_PASSWORD_LEN: usize = 24;

/// Throwaway password for accounts created on someone else's behalf.
fn generate_password() -> String {
    let mut rng = rand::rng();
    (0..GENERATED_PASSWORD_LEN)
        .map(|_| PASSWORD_CHARSET[rng.random_range(0..PASSWORD_CHARSET.len())] as char)
        .collect()
}

/// A membership joined with the member's profile.
#[derive(Debug, Clone)]
pub struct TeamMember {
    pub member: MinistryMember,
    pub user: User,
}

// ── ListTeam ─────────────────────────────────────────────────────────────────

pub struct ListTeamUseCase<'a, R>
where
    R: UserRepository + MinistryRepository + MinistryMemberRepository + ?Sized,
{
    pub repo: &'a R,
}

impl<R> ListTeamUseCase<'_, R>
where
    R: UserRepository + MinistryRepository + MinistryMemberRepository + ?Sized,
{
    pub async fn execute(
        &self,
        ministry_id: MinistryId,
        caller: UserId,
    ) -> Result<Vec<TeamMember>, MinistryServiceError> {
        require_membership(self.repo, ministry_id, caller).await?;
        let members = self.repo.list_ministry_members(ministry_id).await?;
        let mut team = Vec::with_capacity(members.len());
        for member in members {
            if let Some(user) = self.repo.find_user(member.user_id).await? {
                team.push(TeamMember { member, user });
            }
        }
        Ok(team)
    }
}

// ── AddTeamMember ────────────────────────────────────────────────────────────

pub struct AddTeamMemberInput {
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub role: MemberRole,
    pub position: Option<String>,
}

/// Onboards a person by e-mail. An existing account whose username matches
/// the address's local part is reused; otherwise one is created with a
/// random password.
pub struct AddTeamMemberUseCase<'a, R>
where
    R: UserRepository + MinistryRepository + MinistryMemberRepository + ?Sized,
{
    pub repo: &'a R,
}

impl<R> AddTeamMemberUseCase<'_, R>
where
    R: UserRepository + MinistryRepository + MinistryMemberRepository + ?Sized,
{
    pub async fn execute(
        &self,
        ministry_id: MinistryId,
        caller: UserId,
        input: AddTeamMemberInput,
    ) -> Result<TeamMember, MinistryServiceError> {
        require_team_manager(self.repo, ministry_id, caller).await?;
        let username =
            username_from_email(&input.email).ok_or(MinistryServiceError::InvalidInput)?;

        let user = match self.repo.find_user_by_username(&username).await? {
            Some(user) => user,
            None => {
                self.repo
                    .create_user(NewUser {
                        username,
                        password: generate_password(),
                        email: Some(input.email.trim().to_owned()),
                        first_name: input.first_name,
                        last_name: input.last_name,
                        phone: input.phone,
                        profile_image_url: None,
                        role: UserRole::Member,
                    })
                    .await?
            }
        };

        let already = self
            .repo
            .list_memberships_for_user(user.id)
            .await?
            .iter()
            .any(|m| m.ministry_id == ministry_id);
        if already {
            return Err(MinistryServiceError::AlreadyMember);
        }

        let member = self
            .repo
            .create_ministry_member(NewMinistryMember {
                ministry_id,
                user_id: user.id,
                role: input.role,
                position: input.position,
            })
            .await?;
        info!(ministry_id = %ministry_id, user_id = %user.id, "team member added");
        Ok(TeamMember { member, user })
    }
}

// ── GetTeamMember ────────────────────────────────────────────────────────────

pub struct GetTeamMemberUseCase<'a, R>
where
    R: UserRepository + MinistryRepository + MinistryMemberRepository + ?Sized,
{
    pub repo: &'a R,
}

impl<R> GetTeamMemberUseCase<'_, R>
where
    R: UserRepository + MinistryRepository + MinistryMemberRepository + ?Sized,
{
    pub async fn execute(
        &self,
        member_id: MinistryMemberId,
        caller: UserId,
    ) -> Result<TeamMember, MinistryServiceError> {
        let member = find_member(self.repo, member_id).await?;
        require_membership(self.repo, member.ministry_id, caller).await?;
        let user = self
            .repo
            .find_user(member.user_id)
            .await?
            .ok_or(MinistryServiceError::UserNotFound)?;
        Ok(TeamMember { member, user })
    }
}

// ── UpdateTeamMember ─────────────────────────────────────────────────────────

pub struct UpdateTeamMemberUseCase<'a, R>
where
    R: UserRepository + MinistryRepository + MinistryMemberRepository + ?Sized,
{
    pub repo: &'a R,
}

impl<R> UpdateTeamMemberUseCase<'_, R>
where
    R: UserRepository + MinistryRepository + MinistryMemberRepository + ?Sized,
{
    pub async fn execute(
        &self,
        member_id: MinistryMemberId,
        caller: UserId,
        patch: MinistryMemberPatch,
    ) -> Result<TeamMember, MinistryServiceError> {
        let member = find_member(self.repo, member_id).await?;
        require_team_manager(self.repo, member.ministry_id, caller).await?;
        let member = if patch.is_empty() {
            member
        } else {
            self.repo
                .update_ministry_member(member_id, patch)
                .await?
                .ok_or(MinistryServiceError::MemberNotFound)?
        };
        let user = self
            .repo
            .find_user(member.user_id)
            .await?
            .ok_or(MinistryServiceError::UserNotFound)?;
        Ok(TeamMember { member, user })
    }
}

// ── RemoveTeamMember ─────────────────────────────────────────────────────────

pub struct RemoveTeamMemberUseCase<'a, R>
where
    R: MinistryRepository + MinistryMemberRepository + ?Sized,
{
    pub repo: &'a R,
}

impl<R> RemoveTeamMemberUseCase<'_, R>
where
    R: MinistryRepository + MinistryMemberRepository + ?Sized,
{
    pub async fn execute(
        &self,
        member_id: MinistryMemberId,
        caller: UserId,
    ) -> Result<(), MinistryServiceError> {
        let member = find_member(self.repo, member_id).await?;
        require_team_manager(self.repo, member.ministry_id, caller).await?;
        if !self.repo.delete_ministry_member(member_id).await? {
            return Err(MinistryServiceError::MemberNotFound);
        }
        info!(ministry_id = %member.ministry_id, member_id = %member_id, "team member removed");
        Ok(())
    }
}

async fn find_member<R>(
    repo: &R,
    member_id: MinistryMemberId,
) -> Result<MinistryMember, MinistryServiceError>
where
    R: MinistryMemberRepository + ?Sized,
{
    repo.find_ministry_member(member_id)
        .await?
        .ok_or(MinistryServiceError::MemberNotFound)
}
