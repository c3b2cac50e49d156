use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::matching::criteria::MatchCriteria;

/// Which side of the board an alert watches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    /// Owned by an employer; fires when a candidate saves a profile or resume.
    Resume,
    /// Owned by a candidate; fires when a job is published.
    Job,
}

impl AlertKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AlertKind::Resume => "resume",
            AlertKind::Job => "job",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "resume" => Some(AlertKind::Resume),
            "job" => Some(AlertKind::Job),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AlertFrequency {
    #[default]
    Daily,
    Weekly,
    Instant,
}

impl AlertFrequency {
    pub fn as_str(self) -> &'static str {
        match self {
            AlertFrequency::Daily => "Daily",
            AlertFrequency::Weekly => "Weekly",
            AlertFrequency::Instant => "Instant",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "Daily" => Some(AlertFrequency::Daily),
            "Weekly" => Some(AlertFrequency::Weekly),
            "Instant" => Some(AlertFrequency::Instant),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct AlertRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub kind: String,
    pub title: String,
    pub criteria: Json<MatchCriteria>,
    pub frequency: String,
    pub is_active: bool,
    pub matching_count: i32,
    pub emails_sent: i32,
    pub last_match_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AlertRow {
    pub fn kind(&self) -> Option<AlertKind> {
        AlertKind::parse(&self.kind)
    }

    pub fn frequency(&self) -> Option<AlertFrequency> {
        AlertFrequency::parse(&self.frequency)
    }

    /// Active alerts with instant delivery react to save/publish events.
    pub fn fires_instantly(&self) -> bool {
        self.is_active && self.frequency() == Some(AlertFrequency::Instant)
    }
}

/// Insert payload for a validated alert.
#[derive(Debug, Clone)]
pub struct NewAlert {
    pub owner_id: Uuid,
    pub kind: AlertKind,
    pub title: String,
    pub criteria: MatchCriteria,
    pub frequency: AlertFrequency,
}

/// Partial update. `None` leaves the column unchanged.
#[derive(Debug, Clone, Default)]
pub struct AlertChanges {
    pub title: Option<String>,
    pub criteria: Option<MatchCriteria>,
    pub frequency: Option<AlertFrequency>,
    pub is_active: Option<bool>,
}
