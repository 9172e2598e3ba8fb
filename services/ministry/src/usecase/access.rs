use worship_domain::id::{MinistryId, UserId};

use crate::domain::repository::{MinistryMemberRepository, MinistryRepository};
use crate::domain::types::MinistryMember;
use crate::error::MinistryServiceError;

/// The caller's membership in the ministry.
///
/// `MinistryNotFound` if the ministry does not exist, `Forbidden` if the
/// caller is not on its team.
pub async fn require_membership<R>(
    repo: &R,
    ministry_id: MinistryId,
    user_id: UserId,
) -> Result<MinistryMember, MinistryServiceError>
where
    R: MinistryRepository + MinistryMemberRepository + ?Sized,
{
    if repo.find_ministry(ministry_id).await?.is_none() {
        return Err(MinistryServiceError::MinistryNotFound);
    }
    repo.list_memberships_for_user(user_id)
        .await?
        .into_iter()
        .find(|m| m.ministry_id == ministry_id)
        .ok_or(MinistryServiceError::Forbidden)
}

/// Like [`require_membership`], but the caller must also be a Leader or Admin.
pub async fn require_team_manager<R>(
    repo: &R,
    ministry_id: MinistryId,
    user_id: UserId,
) -> Result<MinistryMember, MinistryServiceError>
where
    R: MinistryRepository + MinistryMemberRepository + ?Sized,
{
    let membership = require_membership(repo, ministry_id, user_id).await?;
    if !membership.role.can_manage_team() {
        return Err(MinistryServiceError::Forbidden);
    }
    Ok(membership)
}

#[cfg(test)]
mod tests {
    use worship_domain::role::MemberRole;

    use super::*;
    use crate::domain::repository::UserRepository;
    use crate::domain::types::{NewMinistryMember, NewUser};
    use crate::infra::memory::MemoryStorage;
    use crate::infra::seed::DEMO_USERNAME;

    #[tokio::test]
    async fn should_allow_seeded_leader_to_manage_team() {
        let storage = MemoryStorage::with_demo_data().await.unwrap();
        let admin = storage
            .find_user_by_username(DEMO_USERNAME)
            .await
            .unwrap()
            .unwrap();
        let ministry = &storage.list_ministries().await.unwrap()[0];

        let membership = require_team_manager(&storage, ministry.id, admin.id)
            .await
            .unwrap();
        assert_eq!(membership.role, MemberRole::Leader);
    }

    #[tokio::test]
    async fn should_forbid_outsiders_and_plain_members() {
        let storage = MemoryStorage::with_demo_data().await.unwrap();
        let ministry = storage.list_ministries().await.unwrap()[0].clone();
        let outsider = storage
            .create_user(NewUser {
                username: "outsider".into(),
                password: "secret".into(),
                ..Default::default()
            })
            .await
            .unwrap();

        let result = require_membership(&storage, ministry.id, outsider.id).await;
        assert!(matches!(result, Err(MinistryServiceError::Forbidden)));

        storage
            .create_ministry_member(NewMinistryMember {
                ministry_id: ministry.id,
                user_id: outsider.id,
                role: MemberRole::Member,
                position: None,
            })
            .await
            .unwrap();
        assert!(require_membership(&storage, ministry.id, outsider.id).await.is_ok());
        let result = require_team_manager(&storage, ministry.id, outsider.id).await;
        assert!(matches!(result, Err(MinistryServiceError::Forbidden)));
    }

    #[tokio::test]
    async fn should_report_unknown_ministry() {
        let storage = MemoryStorage::new();
        let result = require_membership(&storage, MinistryId(99), UserId(1)).await;
        assert!(matches!(result, Err(MinistryServiceError::MinistryNotFound)));
    }
}
