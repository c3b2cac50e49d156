use serde::Serialize;

use crate::errors::AppError;
use crate::matching::criteria::MatchCriteria;
use crate::models::alert::AlertKind;

pub const MIN_ALERT_AGE: u32 = 18;
pub const MAX_ALERT_AGE: u32 = 65;
pub const DEFAULT_JOB_ALERT_TITLE: &str = "Untitled Alert";

#[derive(Debug, Clone, Serialize)]
pub struct CriteriaValidation {
    pub passed: bool,
    pub problems: Vec<String>,
}

impl CriteriaValidation {
    /// Collapses the problem list into a single 400 response.
    pub fn into_result(self) -> Result<(), AppError> {
        if self.passed {
            Ok(())
        } else {
            Err(AppError::Validation(self.problems.join("; ")))
        }
    }
}

/// Checks criteria before they are persisted on an alert.
///
/// Rejects:
/// - criteria that declare nothing
/// - negative or non-finite salary bounds, or min above max
/// - age bounds outside 18–65, or min above max
/// - person-only criteria (skills, diversity) on job alerts
pub fn validate_criteria(kind: AlertKind, criteria: &MatchCriteria) -> CriteriaValidation {
    let mut problems = Vec::new();

    if criteria.is_empty() {
        problems.push("at least one criterion must be declared".to_string());
    }

    if let Some(range) = criteria.salary_range {
        let bounds = [range.min, range.max];
        if bounds.iter().flatten().any(|v| !v.is_finite() || *v < 0.0) {
            problems.push("salary bounds must be non-negative numbers".to_string());
        }
        if let (Some(min), Some(max)) = (range.min, range.max) {
            if min > 0.0 && max > 0.0 && min > max {
                problems.push("salary_range.min must not exceed salary_range.max".to_string());
            }
        }
    }

    if let Some(age) = criteria.diversity.as_ref().and_then(|d| d.age_range) {
        let out_of_bounds = [age.min, age.max]
            .iter()
            .flatten()
            .any(|a| !(MIN_ALERT_AGE..=MAX_ALERT_AGE).contains(a));
        if out_of_bounds {
            problems.push(format!(
                "age_range must lie within {MIN_ALERT_AGE}-{MAX_ALERT_AGE}"
            ));
        }
        if let (Some(min), Some(max)) = (age.min, age.max) {
            if min > max {
                problems.push("age_range.min must not exceed age_range.max".to_string());
            }
        }
    }

    if kind == AlertKind::Job {
        if criteria.declared_skills().is_some() {
            problems.push("skills cannot be used on job alerts".to_string());
        }
        if criteria.declared_gender().is_some() || criteria.declared_age_range().is_some() {
            problems.push("diversity cannot be used on job alerts".to_string());
        }
    }

    CriteriaValidation {
        passed: problems.is_empty(),
        problems,
    }
}

/// Resume alerts must be named; job alerts fall back to a default title.
pub fn resolve_title(kind: AlertKind, title: &str) -> Result<String, AppError> {
    let title = title.trim();
    match (kind, title.is_empty()) {
        (_, false) => Ok(title.to_string()),
        (AlertKind::Job, true) => Ok(DEFAULT_JOB_ALERT_TITLE.to_string()),
        (AlertKind::Resume, true) => Err(AppError::Validation("title is required".to_string())),
    }
}

/// Caps the number of resume alerts one employer may hold.
pub fn check_alert_quota(
    kind: AlertKind,
    existing: i64,
    max_resume_alerts: u32,
) -> Result<(), AppError> {
    if kind == AlertKind::Resume && existing >= i64::from(max_resume_alerts) {
        return Err(AppError::Validation(format!(
            "maximum of {max_resume_alerts} resume alerts reached"
        )));
    }
    Ok(())
}
