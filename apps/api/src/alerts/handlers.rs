use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::alerts::store;
use crate::alerts::validation::{check_alert_quota, resolve_title, validate_criteria};
use crate::errors::AppError;
use crate::matching::criteria::MatchCriteria;
use crate::matching::ranking::{rank_matches, PageRequest, RankedPage};
use crate::models::alert::{AlertChanges, AlertFrequency, AlertKind, AlertRow, NewAlert};
use crate::models::candidate::CandidateSource;
use crate::models::job::JobPost;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct OwnerQuery {
    pub owner_id: Uuid,
    pub kind: Option<AlertKind>,
}

#[derive(Deserialize)]
pub struct AlertMatchesQuery {
    pub owner_id: Uuid,
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateAlertRequest {
    pub owner_id: Uuid,
    pub kind: AlertKind,
    #[serde(default)]
    pub title: String,
    pub criteria: MatchCriteria,
    #[serde(default)]
    pub frequency: AlertFrequency,
}

#[derive(Deserialize)]
pub struct UpdateAlertRequest {
    pub owner_id: Uuid,
    pub title: Option<String>,
    pub criteria: Option<MatchCriteria>,
    pub frequency: Option<AlertFrequency>,
    pub is_active: Option<bool>,
}

/// The pool to rank. Only the half matching the alert's kind is used.
#[derive(Deserialize, Default)]
#[serde(default)]
pub struct AlertMatchesRequest {
    pub candidates: Vec<CandidateSource>,
    pub jobs: Vec<JobPost>,
}

#[derive(Serialize)]
pub struct AlertListResponse {
    pub count: usize,
    pub alerts: Vec<AlertRow>,
}

#[derive(Serialize)]
#[serde(untagged)]
pub enum AlertMatches {
    Candidates(RankedPage<CandidateSource>),
    Jobs(RankedPage<JobPost>),
}

/// Fetches an alert and checks that `owner_id` holds it. Someone else's
/// alert is reported exactly like a missing one.
async fn owned_alert(state: &AppState, id: Uuid, owner_id: Uuid) -> Result<AlertRow, AppError> {
    store::find_alert(&state.db, id)
        .await?
        .filter(|alert| alert.owner_id == owner_id)
        .ok_or_else(|| AppError::NotFound(format!("Alert {id} not found or not yours")))
}

fn stored_kind(alert: &AlertRow) -> Result<AlertKind, AppError> {
    alert.kind().ok_or_else(|| {
        AppError::Internal(anyhow::anyhow!(
            "alert {} has unknown kind {}",
            alert.id,
            alert.kind
        ))
    })
}

/// POST /api/v1/alerts
pub async fn handle_create_alert(
    State(state): State<AppState>,
    Json(req): Json<CreateAlertRequest>,
) -> Result<(StatusCode, Json<AlertRow>), AppError> {
    let title = resolve_title(req.kind, &req.title)?;
    validate_criteria(req.kind, &req.criteria).into_result()?;

    let existing = store::count_alerts(&state.db, req.owner_id, req.kind).await?;
    check_alert_quota(req.kind, existing, state.config.max_resume_alerts)?;

    let alert = store::insert_alert(
        &state.db,
        &NewAlert {
            owner_id: req.owner_id,
            kind: req.kind,
            title,
            criteria: req.criteria,
            frequency: req.frequency,
        },
    )
    .await?;

    info!(alert_id = %alert.id, kind = req.kind.as_str(), "alert created");
    Ok((StatusCode::CREATED, Json(alert)))
}

/// GET /api/v1/alerts?owner_id=...&kind=...
pub async fn handle_list_alerts(
    State(state): State<AppState>,
    Query(params): Query<OwnerQuery>,
) -> Result<Json<AlertListResponse>, AppError> {
    let alerts = store::list_alerts(&state.db, params.owner_id, params.kind).await?;
    Ok(Json(AlertListResponse {
        count: alerts.len(),
        alerts,
    }))
}

/// GET /api/v1/alerts/:id?owner_id=...
pub async fn handle_get_alert(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<OwnerQuery>,
) -> Result<Json<AlertRow>, AppError> {
    Ok(Json(owned_alert(&state, id, params.owner_id).await?))
}

/// PUT /api/v1/alerts/:id
pub async fn handle_update_alert(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateAlertRequest>,
) -> Result<Json<AlertRow>, AppError> {
    let existing = owned_alert(&state, id, req.owner_id).await?;
    let kind = stored_kind(&existing)?;

    let title = req
        .title
        .as_deref()
        .map(|t| resolve_title(kind, t))
        .transpose()?;
    if let Some(criteria) = &req.criteria {
        validate_criteria(kind, criteria).into_result()?;
    }

    let changes = AlertChanges {
        title,
        criteria: req.criteria,
        frequency: req.frequency,
        is_active: req.is_active,
    };
    let updated = store::update_alert(&state.db, id, &changes).await?;
    info!(alert_id = %id, "alert updated");
    Ok(Json(updated))
}

/// DELETE /api/v1/alerts/:id?owner_id=...
pub async fn handle_delete_alert(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<OwnerQuery>,
) -> Result<StatusCode, AppError> {
    owned_alert(&state, id, params.owner_id).await?;
    if !store::delete_alert(&state.db, id).await? {
        return Err(AppError::NotFound(format!("Alert {id} not found or not yours")));
    }
    info!(alert_id = %id, "alert deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/alerts/:id/matches?owner_id=...&page=...&limit=...
///
/// Ranks the supplied pool against the alert, keeping only matches.
pub async fn handle_alert_matches(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<AlertMatchesQuery>,
    Json(req): Json<AlertMatchesRequest>,
) -> Result<Json<AlertMatches>, AppError> {
    let alert = owned_alert(&state, id, params.owner_id).await?;
    let page = PageRequest::from_raw(params.page.as_deref(), params.limit.as_deref());
    let criteria = &alert.criteria.0;

    let matches = match stored_kind(&alert)? {
        AlertKind::Resume => {
            AlertMatches::Candidates(rank_matches(req.candidates, criteria, &state.policy, page))
        }
        AlertKind::Job => {
            let open: Vec<JobPost> = req.jobs.into_iter().filter(JobPost::is_published).collect();
            AlertMatches::Jobs(rank_matches(open, criteria, &state.policy, page))
        }
    };
    Ok(Json(matches))
}
