use rand::RngExt;
use tracing::{debug, info};

use worship_domain::id::{MinistryId, UserId};
use worship_domain::role::MemberRole;

use crate::domain::repository::{MinistryMemberRepository, MinistryRepository, UserRepository};
use crate::domain::types::{
    MINISTRY_CODE_LEN, Ministry, MinistryMember, NewMinistry, NewMinistryMember,
    is_valid_ministry_code,
};
use crate::error::MinistryServiceError;
use crate::usecase::access::require_membership;

/// Generated codes use letters only so they read unambiguously aloud.
const CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Attempts before giving up on finding a free generated code.
const MAX_CODE_ATTEMPTS: usize = 16;

fn generate_code() -> String {
    let mut rng = rand::rng();
    (0..MINISTRY_CODE_LEN)
        .map(|_| CODE_CHARSET[rng.random_range(0..CODE_CHARSET.len())] as char)
        .collect()
}

fn normalize_code(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}

// ── ListMyMinistries ─────────────────────────────────────────────────────────

pub struct ListMyMinistriesUseCase<'a, R: MinistryRepository + ?Sized> {
    pub repo: &'a R,
}

impl<R: MinistryRepository + ?Sized> ListMyMinistriesUseCase<'_, R> {
    pub async fn execute(&self, user_id: UserId) -> Result<Vec<Ministry>, MinistryServiceError> {
        self.repo.list_ministries_for_user(user_id).await
    }
}

// ── GetMinistry ──────────────────────────────────────────────────────────────

pub struct GetMinistryUseCase<'a, R>
where
    R: MinistryRepository + MinistryMemberRepository + ?Sized,
{
    pub repo: &'a R,
}

impl<R> GetMinistryUseCase<'_, R>
where
    R: MinistryRepository + MinistryMemberRepository + ?Sized,
{
    pub async fn execute(
        &self,
        ministry_id: MinistryId,
        user_id: UserId,
    ) -> Result<Ministry, MinistryServiceError> {
        require_membership(self.repo, ministry_id, user_id).await?;
        self.repo
            .find_ministry(ministry_id)
            .await?
            .ok_or(MinistryServiceError::MinistryNotFound)
    }
}

// ── CreateMinistry ───────────────────────────────────────────────────────────

pub struct CreateMinistryInput {
    pub name: String,
    /// Explicit join code; generated when absent.
    pub code: Option<String>,
    pub logo: Option<String>,
}

/// Creates a ministry and makes the caller its Leader.
pub struct CreateMinistryUseCase<'a, R>
where
    R: UserRepository + MinistryRepository + ?Sized,
{
    pub repo: &'a R,
}

impl<R> CreateMinistryUseCase<'_, R>
where
    R: UserRepository + MinistryRepository + ?Sized,
{
    pub async fn execute(
        &self,
        user_id: UserId,
        input: CreateMinistryInput,
    ) -> Result<Ministry, MinistryServiceError> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(MinistryServiceError::InvalidInput);
        }
        if self.repo.find_user(user_id).await?.is_none() {
            return Err(MinistryServiceError::UserNotFound);
        }

        let ministry = match input.code {
            Some(code) => {
                let code = normalize_code(&code);
                if !is_valid_ministry_code(&code) {
                    return Err(MinistryServiceError::InvalidMinistryCode);
                }
                self.insert(name, code, user_id, input.logo).await?
            }
            None => self.insert_with_generated_code(name, user_id, input.logo).await?,
        };

        info!(ministry_id = %ministry.id, code = %ministry.code, "ministry created");
        Ok(ministry)
    }

    async fn insert(
        &self,
        name: &str,
        code: String,
        created_by: UserId,
        logo: Option<String>,
    ) -> Result<Ministry, MinistryServiceError> {
        let (ministry, _leader) = self
            .repo
            .create_ministry_with_leader(
                NewMinistry {
                    name: name.to_owned(),
                    code,
                    created_by,
                    logo,
                },
                None,
            )
            .await?;
        Ok(ministry)
    }

    async fn insert_with_generated_code(
        &self,
        name: &str,
        created_by: UserId,
        logo: Option<String>,
    ) -> Result<Ministry, MinistryServiceError> {
        for attempt in 1..=MAX_CODE_ATTEMPTS {
            let code = generate_code();
            match self.insert(name, code.clone(), created_by, logo.clone()).await {
                Err(MinistryServiceError::MinistryCodeTaken) => {
                    debug!(attempt, code = %code, "generated ministry code collided");
                }
                other => return other,
            }
        }
        Err(MinistryServiceError::MinistryCodeTaken)
    }
}

// ── JoinMinistry ─────────────────────────────────────────────────────────────

pub struct JoinMinistryUseCase<'a, R>
where
    R: MinistryRepository + MinistryMemberRepository + ?Sized,
{
    pub repo: &'a R,
}

impl<R> JoinMinistryUseCase<'_, R>
where
    R: MinistryRepository + MinistryMemberRepository + ?Sized,
{
    /// Join by code as a plain Member.
    pub async fn execute(
        &self,
        user_id: UserId,
        code: &str,
    ) -> Result<(Ministry, MinistryMember), MinistryServiceError> {
        let code = normalize_code(code);
        if !is_valid_ministry_code(&code) {
            return Err(MinistryServiceError::InvalidMinistryCode);
        }
        let ministry = self
            .repo
            .find_ministry_by_code(&code)
            .await?
            .ok_or(MinistryServiceError::MinistryNotFound)?;

        let already = self
            .repo
            .list_memberships_for_user(user_id)
            .await?
            .iter()
            .any(|m| m.ministry_id == ministry.id);
        if already {
            return Err(MinistryServiceError::AlreadyMember);
        }

        let membership = self
            .repo
            .create_ministry_member(NewMinistryMember {
                ministry_id: ministry.id,
                user_id,
                role: MemberRole::Member,
                position: None,
            })
            .await?;
        info!(ministry_id = %ministry.id, user_id = %user_id, "joined ministry");
        Ok((ministry, membership))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::NewUser;
    use crate::infra::memory::MemoryStorage;

    async fn user(storage: &MemoryStorage, username: &str) -> UserId {
        storage
            .create_user(NewUser {
                username: username.into(),
                password: "secret".into(),
                ..Default::default()
            })
            .await
            .unwrap()
            .id
    }

    fn input(name: &str, code: Option<&str>) -> CreateMinistryInput {
        CreateMinistryInput {
            name: name.into(),
            code: code.map(str::to_owned),
            logo: None,
        }
    }

    #[test]
    fn should_generate_four_uppercase_letters() {
        for _ in 0..100 {
            let code = generate_code();
            assert_eq!(code.len(), MINISTRY_CODE_LEN);
            assert!(code.chars().all(|c| c.is_ascii_uppercase()));
            assert!(is_valid_ministry_code(&code));
        }
    }

    #[tokio::test]
    async fn should_make_creator_the_leader() {
        let storage = MemoryStorage::new();
        let alice = user(&storage, "alice").await;

        let ministry = CreateMinistryUseCase { repo: &storage }
            .execute(alice, input("Sample Choir", None))
            .await
            .unwrap();
        assert!(is_valid_ministry_code(&ministry.code));
        assert_eq!(ministry.created_by, alice);

        let memberships = storage.list_memberships_for_user(alice).await.unwrap();
        assert_eq!(memberships.len(), 1);
        assert_eq!(memberships[0].ministry_id, ministry.id);
        assert_eq!(memberships[0].role, MemberRole::Leader);
    }

    #[tokio::test]
    async fn should_normalize_explicit_code() {
        let storage = MemoryStorage::new();
        let alice = user(&storage, "alice").await;

        let ministry = CreateMinistryUseCase { repo: &storage }
            .execute(alice, input("Sample Choir", Some(" abcd ")))
            .await
            .unwrap();
        assert_eq!(ministry.code, "ABCD");
    }

    #[tokio::test]
    async fn should_reject_taken_and_malformed_codes() {
        let storage = MemoryStorage::new();
        let alice = user(&storage, "alice").await;
        let usecase = CreateMinistryUseCase { repo: &storage };
        usecase
            .execute(alice, input("Sample Choir", Some("ABCD")))
            .await
            .unwrap();

        let taken = usecase.execute(alice, input("Other", Some("ABCD"))).await;
        assert!(matches!(taken, Err(MinistryServiceError::MinistryCodeTaken)));

        let malformed = usecase.execute(alice, input("Other", Some("AB"))).await;
        assert!(matches!(
            malformed,
            Err(MinistryServiceError::InvalidMinistryCode)
        ));
    }

    #[tokio::test]
    async fn should_join_by_code_once() {
        let storage = MemoryStorage::new();
        let alice = user(&storage, "alice").await;
        let bob = user(&storage, "bob").await;
        CreateMinistryUseCase { repo: &storage }
            .execute(alice, input("Sample Choir", Some("ABCD")))
            .await
            .unwrap();

        let join = JoinMinistryUseCase { repo: &storage };
        let (ministry, membership) = join.execute(bob, "abcd").await.unwrap();
        assert_eq!(ministry.name, "Sample Choir");
        assert_eq!(membership.role, MemberRole::Member);

        let again = join.execute(bob, "ABCD").await;
        assert!(matches!(again, Err(MinistryServiceError::AlreadyMember)));

        let unknown = join.execute(bob, "ZZZZ").await;
        assert!(matches!(unknown, Err(MinistryServiceError::MinistryNotFound)));
    }

    #[tokio::test]
    async fn should_list_only_my_ministries() {
        let storage = MemoryStorage::new();
        let alice = user(&storage, "alice").await;
        let bob = user(&storage, "bob").await;
        let create = CreateMinistryUseCase { repo: &storage };
        create
            .execute(alice, input("Sample Choir", Some("ABCD")))
            .await
            .unwrap();
        create
            .execute(bob, input("Youth Band", Some("WXYZ")))
            .await
            .unwrap();

        let mine = ListMyMinistriesUseCase { repo: &storage }
            .execute(alice)
            .await
            .unwrap();
        let names: Vec<_> = mine.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["Sample Choir"]);

        let hidden = GetMinistryUseCase { repo: &storage }
            .execute(mine[0].id, bob)
            .await;
        assert!(matches!(hidden, Err(MinistryServiceError::Forbidden)));
    }
}
