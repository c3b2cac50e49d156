use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::matching::aggregate::MatchPolicy;
use crate::matching::recommend::JobScorer;
use crate::notify::dispatcher::NotificationDispatcher;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    /// Threshold policy derived from `MATCH_THRESHOLD`.
    pub policy: MatchPolicy,
    /// Delivery channel for alert hits. Log-only unless a webhook is configured.
    pub dispatcher: Arc<dyn NotificationDispatcher>,
    /// Pluggable recommendation scorer. Default: WeightedJobScorer.
    pub job_scorer: Arc<dyn JobScorer>,
}

impl AppState {
    pub fn new(
        db: PgPool,
        config: Config,
        dispatcher: Arc<dyn NotificationDispatcher>,
        job_scorer: Arc<dyn JobScorer>,
    ) -> Self {
        let policy = MatchPolicy::new(config.match_threshold);
        Self {
            db,
            config,
            policy,
            dispatcher,
            job_scorer,
        }
    }
}
