use std::future::Future;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::alerts::store::{list_instant_alerts, record_match};
use crate::errors::AppError;
use crate::models::candidate::CandidateSource;
use crate::models::job::JobPost;
use crate::notify::events::{publish, AlertEvent, AlertHit};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CandidateSavedRequest {
    pub candidate: CandidateSource,
}

#[derive(Deserialize)]
pub struct JobPublishedRequest {
    pub job: JobPost,
}

#[derive(Serialize)]
pub struct EventOutcome {
    pub alerts_evaluated: usize,
    pub hits: Vec<AlertHit>,
    /// Delivered hits whose statistics were written back.
    pub recorded: usize,
    pub dispatcher: &'static str,
}

/// POST /api/v1/events/candidate-saved
pub async fn handle_candidate_saved(
    State(state): State<AppState>,
    Json(req): Json<CandidateSavedRequest>,
) -> Result<Json<EventOutcome>, AppError> {
    let event = AlertEvent::CandidateSaved {
        candidate: req.candidate,
    };
    Ok(Json(process_event(&state, &event).await?))
}

/// POST /api/v1/events/job-published
pub async fn handle_job_published(
    State(state): State<AppState>,
    Json(req): Json<JobPublishedRequest>,
) -> Result<Json<EventOutcome>, AppError> {
    let event = AlertEvent::JobPublished { job: req.job };
    Ok(Json(process_event(&state, &event).await?))
}

/// Loads the instant alerts for the event's kind, publishes, then records
/// statistics for every delivered hit.
async fn process_event(state: &AppState, event: &AlertEvent) -> Result<EventOutcome, AppError> {
    let alerts = list_instant_alerts(&state.db, event.alert_kind()).await?;
    let hits = publish(event, &alerts, &state.policy, state.dispatcher.as_ref()).await;

    let recorded = record_delivered(&hits, |id| record_match(&state.db, id)).await;

    info!(
        kind = event.alert_kind().as_str(),
        evaluated = alerts.len(),
        hits = hits.len(),
        recorded,
        "alert event processed"
    );

    Ok(EventOutcome {
        alerts_evaluated: alerts.len(),
        hits,
        recorded,
        dispatcher: state.dispatcher.name(),
    })
}

/// Writes statistics for every delivered hit. Notifications are already
/// out at this point, so a failed write is logged and the rest proceed.
async fn record_delivered<F, Fut>(hits: &[AlertHit], mut record: F) -> usize
where
    F: FnMut(Uuid) -> Fut,
    Fut: Future<Output = Result<(), sqlx::Error>>,
{
    let mut recorded = 0;
    for hit in hits.iter().filter(|h| h.delivered) {
        match record(hit.alert_id).await {
            Ok(()) => recorded += 1,
            Err(e) => warn!(alert_id = %hit.alert_id, "failed to record alert match: {e}"),
        }
    }
    recorded
}
