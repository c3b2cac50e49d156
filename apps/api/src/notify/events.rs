//! Save/publish events and their evaluation against instant alerts.
//!
//! A candidate save is checked against every instant resume alert; a job
//! publish against every instant job alert. Evaluation is pure; delivery
//! goes through a [`NotificationDispatcher`] and never aborts the batch.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::matching::aggregate::{match_candidate, match_job, MatchPolicy};
use crate::models::alert::{AlertKind, AlertRow};
use crate::models::candidate::CandidateSource;
use crate::models::job::JobPost;
use crate::notify::dispatcher::{AlertNotification, NotificationDispatcher, NotificationSubject};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AlertEvent {
    CandidateSaved { candidate: CandidateSource },
    JobPublished { job: JobPost },
}

impl AlertEvent {
    /// The alert kind this event is evaluated against.
    pub fn alert_kind(&self) -> AlertKind {
        match self {
            AlertEvent::CandidateSaved { .. } => AlertKind::Resume,
            AlertEvent::JobPublished { .. } => AlertKind::Job,
        }
    }

    fn subject(&self) -> NotificationSubject {
        match self {
            AlertEvent::CandidateSaved { candidate } => NotificationSubject::Candidate {
                id: candidate.id(),
                name: candidate.display_name().to_string(),
            },
            AlertEvent::JobPublished { job } => NotificationSubject::Job {
                id: job.id,
                title: job.title.clone(),
                company: job.company_name.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertHit {
    pub alert_id: Uuid,
    pub owner_id: Uuid,
    pub alert_title: String,
    pub score: f64,
    pub delivered: bool,
}

/// Alerts matched by `event`, in the order given.
///
/// Skips alerts of the other kind, paused alerts and non-instant alerts.
/// A job that is not published matches nothing.
pub fn evaluate_event(
    event: &AlertEvent,
    alerts: &[AlertRow],
    policy: &MatchPolicy,
) -> Vec<AlertHit> {
    let kind = event.alert_kind();
    let eligible = alerts
        .iter()
        .filter(|alert| alert.kind() == Some(kind) && alert.fires_instantly());

    let hits: Vec<AlertHit> = match event {
        AlertEvent::CandidateSaved { candidate } => {
            let attributes = candidate.attributes();
            eligible
                .filter_map(|alert| {
                    let result = match_candidate(&attributes, &alert.criteria.0, policy);
                    result.matched.then(|| hit(alert, result.score))
                })
                .collect()
        }
        AlertEvent::JobPublished { job } if job.is_published() => {
            let attributes = job.attributes();
            eligible
                .filter_map(|alert| {
                    let result = match_job(&attributes, &alert.criteria.0, policy);
                    result.matched.then(|| hit(alert, result.score))
                })
                .collect()
        }
        AlertEvent::JobPublished { .. } => Vec::new(),
    };

    debug!(
        kind = kind.as_str(),
        candidates = alerts.len(),
        hits = hits.len(),
        "event evaluated against alerts"
    );
    hits
}

fn hit(alert: &AlertRow, score: f64) -> AlertHit {
    AlertHit {
        alert_id: alert.id,
        owner_id: alert.owner_id,
        alert_title: alert.title.clone(),
        score,
        delivered: false,
    }
}

/// Evaluates `event` and dispatches a notification per hit. A failed
/// dispatch is logged and leaves that hit undelivered.
pub async fn publish(
    event: &AlertEvent,
    alerts: &[AlertRow],
    policy: &MatchPolicy,
    dispatcher: &dyn NotificationDispatcher,
) -> Vec<AlertHit> {
    let subject = event.subject();
    let kind = event.alert_kind();
    let mut hits = evaluate_event(event, alerts, policy);

    for hit in &mut hits {
        let notification = AlertNotification {
            alert_id: hit.alert_id,
            owner_id: hit.owner_id,
            alert_title: hit.alert_title.clone(),
            kind,
            score: hit.score,
            subject: subject.clone(),
        };
        match dispatcher.dispatch(&notification).await {
            Ok(()) => hit.delivered = true,
            Err(e) => warn!(
                alert_id = %hit.alert_id,
                dispatcher = dispatcher.name(),
                "alert notification failed: {e}"
            ),
        }
    }
    hits
}
