use worship_domain::id::UserId;
use worship_domain::role::UserRole;

use crate::domain::repository::UserRepository;
use crate::domain::types::{NewUser, UpsertUser, User};
use crate::error::MinistryServiceError;

/// Local part of an e-mail address, lowercased. `None` if it is not an address.
pub fn username_from_email(email: &str) -> Option<String> {
    let (local, domain) = email.trim().split_once('@')?;
    if local.is_empty() || domain.is_empty() {
        return None;
    }
    Some(local.to_lowercase())
}

// ── RegisterUser ─────────────────────────────────────────────────────────────

pub struct RegisterUserInput {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
}

pub struct RegisterUserUseCase<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<R: UserRepository + ?Sized> RegisterUserUseCase<'_, R> {
    pub async fn execute(&self, input: RegisterUserInput) -> Result<User, MinistryServiceError> {
        let username = input.username.trim();
        if username.is_empty() || input.password.is_empty() {
            return Err(MinistryServiceError::InvalidInput);
        }
        self.repo
            .create_user(NewUser {
                username: username.to_owned(),
                password: input.password,
                email: input.email,
                first_name: input.first_name,
                last_name: input.last_name,
                phone: input.phone,
                profile_image_url: None,
                role: UserRole::Member,
            })
            .await
    }
}

// ── SyncUser ─────────────────────────────────────────────────────────────────

pub struct SyncUserInput {
    pub external_id: String,
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image_url: Option<String>,
}

/// Materialises an identity-provider account. The username, used only on
/// first sight, falls back to the e-mail local part and then the subject id.
pub struct SyncUserUseCase<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<R: UserRepository + ?Sized> SyncUserUseCase<'_, R> {
    pub async fn execute(&self, input: SyncUserInput) -> Result<User, MinistryServiceError> {
        let external_id = input.external_id.trim();
        if external_id.is_empty() {
            return Err(MinistryServiceError::InvalidInput);
        }
        let username = input
            .username
            .map(|u| u.trim().to_owned())
            .filter(|u| !u.is_empty())
            .or_else(|| input.email.as_deref().and_then(username_from_email))
            .unwrap_or_else(|| external_id.to_owned());
        self.repo
            .upsert_user(UpsertUser {
                external_id: external_id.to_owned(),
                username,
                email: input.email,
                first_name: input.first_name,
                last_name: input.last_name,
                profile_image_url: input.profile_image_url,
            })
            .await
    }
}

// ── GetUser ──────────────────────────────────────────────────────────────────

pub struct GetUserUseCase<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<R: UserRepository + ?Sized> GetUserUseCase<'_, R> {
    pub async fn execute(&self, user_id: UserId) -> Result<User, MinistryServiceError> {
        self.repo
            .find_user(user_id)
            .await?
            .ok_or(MinistryServiceError::UserNotFound)
    }
}
