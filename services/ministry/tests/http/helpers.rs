use axum::http::{HeaderName, HeaderValue};
use axum_test::TestServer;

use worship_domain::id::{MinistryId, UserId};
use worship_ministry::domain::repository::{MinistryRepository, UserRepository};
use worship_ministry::domain::types::NewUser;
use worship_ministry::infra::memory::MemoryStorage;
use worship_ministry::infra::seed::{DEMO_MINISTRY_CODE, DEMO_USERNAME};
use worship_ministry::router::build_router;
use worship_ministry::state::AppState;
use worship_testing::auth::MockAuth;

// ── TestApp ──────────────────────────────────────────────────────────────────

pub struct TestApp {
    pub server: TestServer,
    pub storage: MemoryStorage,
    pub admin: UserId,
    pub ministry: MinistryId,
}

impl TestApp {
    /// Router over a store holding the demo ministry.
    pub async fn demo() -> Self {
        let storage = MemoryStorage::with_demo_data().await.unwrap();
        let admin = storage
            .find_user_by_username(DEMO_USERNAME)
            .await
            .unwrap()
            .unwrap()
            .id;
        let ministry = storage
            .find_ministry_by_code(DEMO_MINISTRY_CODE)
            .await
            .unwrap()
            .unwrap()
            .id;
        let server = TestServer::new(build_router(AppState::new(storage.clone()))).unwrap();
        Self {
            server,
            storage,
            admin,
            ministry,
        }
    }

    /// Creates an account that belongs to no ministry.
    pub async fn outsider(&self, username: &str) -> UserId {
        self.storage
            .create_user(NewUser {
                username: username.into(),
                password: "password".into(),
                ..Default::default()
            })
            .await
            .unwrap()
            .id
    }
}

pub fn as_user(user_id: UserId) -> (HeaderName, HeaderValue) {
    MockAuth::new(user_id).header()
}
