//! Mock identity helpers for HTTP tests.
//!
//! Services behind the gateway receive an `x-worship-user-id` header injected
//! by the gateway. Tests attach the header directly, so no gateway is needed.

use axum::http::{HeaderMap, HeaderName, HeaderValue};

use worship_domain::id::UserId;
use worship_identity::USER_ID_HEADER;

/// Configurable identity injected into test requests.
pub struct MockAuth {
    pub user_id: UserId,
}

impl MockAuth {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }

    /// Header name and value as a tuple, convenient for `axum_test` request builders.
    pub fn header(&self) -> (HeaderName, HeaderValue) {
        (
            HeaderName::from_static(USER_ID_HEADER),
            HeaderValue::from(self.user_id.0),
        )
    }

    /// Return headers as if the gateway injected them.
    pub fn headers(&self) -> HeaderMap {
        let (name, value) = self.header();
        let mut map = HeaderMap::new();
        map.insert(name, value);
        map
    }
}
