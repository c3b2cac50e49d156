use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::matching::aggregate::{match_candidate, match_job, MatchResult};
use crate::matching::criteria::MatchCriteria;
use crate::matching::ranking::{rank_against_criteria, PageQuery, PageRequest, RankedPage};
use crate::matching::recommend::recommend_jobs;
use crate::models::candidate::CandidateSource;
use crate::models::job::JobPost;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct MatchCandidateRequest {
    #[serde(alias = "source")]
    pub candidate: CandidateSource,
    #[serde(default)]
    pub criteria: MatchCriteria,
}

#[derive(Deserialize)]
pub struct MatchJobRequest {
    pub job: JobPost,
    #[serde(default)]
    pub criteria: MatchCriteria,
}

#[derive(Deserialize)]
pub struct RankRequest {
    #[serde(default)]
    pub candidates: Vec<CandidateSource>,
    #[serde(default)]
    pub criteria: MatchCriteria,
}

#[derive(Deserialize)]
pub struct RecommendRequest {
    pub candidate: CandidateSource,
    #[serde(default)]
    pub jobs: Vec<JobPost>,
}

#[derive(Serialize)]
pub struct RecommendResponse {
    #[serde(flatten)]
    pub ranked: RankedPage<JobPost>,
    pub scorer_backend: &'static str,
}

/// POST /api/v1/match
pub async fn handle_match_candidate(
    State(state): State<AppState>,
    Json(req): Json<MatchCandidateRequest>,
) -> Result<Json<MatchResult>, AppError> {
    let attributes = req.candidate.attributes();
    Ok(Json(match_candidate(&attributes, &req.criteria, &state.policy)))
}

/// POST /api/v1/match/job
pub async fn handle_match_job(
    State(state): State<AppState>,
    Json(req): Json<MatchJobRequest>,
) -> Result<Json<MatchResult>, AppError> {
    Ok(Json(match_job(&req.job.attributes(), &req.criteria, &state.policy)))
}

/// POST /api/v1/match/rank?page=...&limit=...
pub async fn handle_rank_candidates(
    State(state): State<AppState>,
    Query(params): Query<PageQuery>,
    Json(req): Json<RankRequest>,
) -> Result<Json<RankedPage<CandidateSource>>, AppError> {
    let page = PageRequest::from(&params);
    Ok(Json(rank_against_criteria(
        req.candidates,
        &req.criteria,
        &state.policy,
        page,
    )))
}

/// POST /api/v1/recommendations?page=...&limit=...
pub async fn handle_recommendations(
    State(state): State<AppState>,
    Query(params): Query<PageQuery>,
    Json(req): Json<RecommendRequest>,
) -> Result<Json<RecommendResponse>, AppError> {
    let page = PageRequest::from(&params);
    let ranked = recommend_jobs(state.job_scorer.as_ref(), &req.candidate, req.jobs, page);
    Ok(Json(RecommendResponse {
        ranked,
        scorer_backend: state.job_scorer.backend(),
    }))
}
