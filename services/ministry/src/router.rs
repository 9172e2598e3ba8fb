use axum::{
    Router,
    http::HeaderName,
    routing::{delete, get, patch, post, put},
};
use tower::ServiceBuilder;
use tower_http::request_id::PropagateRequestIdLayer;
use tower_http::trace::TraceLayer;

use worship_core::health::{healthz, readyz};
use worship_core::middleware::{REQUEST_ID_HEADER, request_id_layer};

use crate::handlers::{
    availability::{create_availability, delete_availability, list_my_availability},
    member::{add_team_member, get_team_member, list_team, remove_team_member, update_team_member},
    message::{list_messages, mark_messages_read, send_message},
    ministry::{create_ministry, get_ministry, join_ministry, list_my_ministries},
    service::{
        add_service_member, add_service_song, create_service, delete_service, get_service,
        list_services, list_upcoming_services, remove_service_member, remove_service_song,
        reorder_service_song, update_service,
    },
    song::{create_song, delete_song, get_song, list_songs, update_song},
    user::{get_me, register, sync_user},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Users
        .route("/users", post(register))
        .route("/users/sync", put(sync_user))
        .route("/users/@me", get(get_me))
        // Ministries
        .route("/ministries", get(list_my_ministries).post(create_ministry))
        .route("/ministries/join", post(join_ministry))
        .route("/ministries/{id}", get(get_ministry))
        // Team
        .route(
            "/ministries/{id}/members",
            get(list_team).post(add_team_member),
        )
        .route(
            "/members/{id}",
            get(get_team_member)
                .patch(update_team_member)
                .delete(remove_team_member),
        )
        // Songs
        .route("/ministries/{id}/songs", get(list_songs).post(create_song))
        .route(
            "/songs/{id}",
            get(get_song).patch(update_song).delete(delete_song),
        )
        // Services
        .route(
            "/ministries/{id}/services",
            get(list_services).post(create_service),
        )
        .route(
            "/ministries/{id}/services/upcoming",
            get(list_upcoming_services),
        )
        .route(
            "/services/{id}",
            get(get_service).patch(update_service).delete(delete_service),
        )
        .route("/services/{id}/members", post(add_service_member))
        .route(
            "/service-members/{id}",
            delete(remove_service_member),
        )
        .route("/services/{id}/songs", post(add_service_song))
        .route(
            "/service-songs/{id}",
            patch(reorder_service_song).delete(remove_service_song),
        )
        // Availability
        .route(
            "/ministries/{id}/availability",
            get(list_my_availability).post(create_availability),
        )
        .route(
            "/availability/{id}",
            delete(delete_availability),
        )
        // Messages
        .route(
            "/ministries/{id}/messages",
            get(list_messages).post(send_message),
        )
        .route("/ministries/{id}/messages/read", post(mark_messages_read))
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    REQUEST_ID_HEADER,
                ))),
        )
        .with_state(state)
}
