pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::alerts::handlers as alerts;
use crate::matching::handlers as matching;
use crate::notify::handlers as events;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Matching
        .route("/api/v1/match", post(matching::handle_match_candidate))
        .route("/api/v1/match/job", post(matching::handle_match_job))
        .route("/api/v1/match/rank", post(matching::handle_rank_candidates))
        .route(
            "/api/v1/recommendations",
            post(matching::handle_recommendations),
        )
        // Alerts
        .route(
            "/api/v1/alerts",
            post(alerts::handle_create_alert).get(alerts::handle_list_alerts),
        )
        .route(
            "/api/v1/alerts/:id",
            get(alerts::handle_get_alert)
                .put(alerts::handle_update_alert)
                .delete(alerts::handle_delete_alert),
        )
        .route(
            "/api/v1/alerts/:id/matches",
            post(alerts::handle_alert_matches),
        )
        // Events
        .route(
            "/api/v1/events/candidate-saved",
            post(events::handle_candidate_saved),
        )
        .route(
            "/api/v1/events/job-published",
            post(events::handle_job_published),
        )
        .with_state(state)
}
