//! Score aggregation: folds matcher outcomes into a percentage and verdict.
//!
//! score = matched / declared × 100, or 0 when nothing is declared.
//! matched = score ≥ threshold (60 unless configured otherwise).

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::matching::criteria::MatchCriteria;
use crate::matching::matchers::{
    age_within, any_shared, candidate_remote_fit, gender_is, job_remote_fit, mentions_any,
    one_of, salary_within, same_text,
};
use crate::matching::normalize::{CandidateAttributes, JobAttributes};
use crate::models::candidate::CandidateSource;
use crate::models::job::JobPost;

pub const DEFAULT_MATCH_THRESHOLD: f64 = 60.0;

/// Verdict for one candidate/job against one criteria set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub matched: bool,
    /// Percentage of declared criteria satisfied, 0–100.
    pub score: f64,
    pub matched_criteria: u32,
    pub total_criteria: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchPolicy {
    pub threshold: f64,
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_MATCH_THRESHOLD,
        }
    }
}

impl MatchPolicy {
    pub fn new(threshold: f64) -> Self {
        let threshold = if threshold.is_finite() {
            threshold.clamp(0.0, 100.0)
        } else {
            DEFAULT_MATCH_THRESHOLD
        };
        Self { threshold }
    }
}

/// Running count of declared and satisfied criteria.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScoreTally {
    matched: u32,
    total: u32,
}

impl ScoreTally {
    /// `None` is an undeclared criterion and leaves the tally untouched.
    pub fn record(&mut self, outcome: Option<bool>) -> &mut Self {
        if let Some(hit) = outcome {
            self.total += 1;
            if hit {
                self.matched += 1;
            }
        }
        self
    }

    pub fn score(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            f64::from(self.matched) * 100.0 / f64::from(self.total)
        }
    }

    /// An empty tally never matches, even under a zero threshold.
    pub fn finish(&self, policy: &MatchPolicy) -> MatchResult {
        let score = self.score();
        MatchResult {
            matched: self.total > 0 && score >= policy.threshold,
            score,
            matched_criteria: self.matched,
            total_criteria: self.total,
        }
    }
}

/// Scores a candidate against alert criteria.
pub fn match_candidate(
    candidate: &CandidateAttributes,
    criteria: &MatchCriteria,
    policy: &MatchPolicy,
) -> MatchResult {
    let keywords = criteria.declared_keywords();

    let mut tally = ScoreTally::default();
    tally
        .record(any_shared(criteria.declared_categories(), &candidate.categories))
        .record(same_text(criteria.declared_city(), candidate.city.as_deref()))
        .record(same_text(
            criteria.declared_experience(),
            candidate.experience.as_deref(),
        ))
        .record(any_shared(criteria.declared_skills(), &candidate.skills))
        .record(any_shared(
            criteria.declared_education(),
            &candidate.education_levels,
        ))
        .record(salary_within(
            criteria.declared_salary(),
            candidate.expected_salary,
        ))
        .record(gender_is(criteria.declared_gender(), candidate.gender))
        .record(age_within(criteria.declared_age_range(), candidate.age))
        .record(candidate_remote_fit(
            criteria.declared_remote_work(),
            candidate.remote_preference,
        ))
        .record(one_of(criteria.declared_job_type(), &candidate.job_types))
        .record(mentions_any(keywords.as_deref(), &candidate.free_text));

    let result = tally.finish(policy);
    debug!(
        matched = result.matched_criteria,
        total = result.total_criteria,
        score = result.score,
        "candidate scored against criteria"
    );
    result
}

/// Scores a job posting against alert criteria. Skills and diversity
/// describe people, not postings, and are not evaluated here.
pub fn match_job(
    job: &JobAttributes,
    criteria: &MatchCriteria,
    policy: &MatchPolicy,
) -> MatchResult {
    let keywords = criteria.declared_keywords();
    let qualification: Vec<String> = job.qualification.iter().cloned().collect();

    let mut tally = ScoreTally::default();
    tally
        .record(any_shared(criteria.declared_categories(), &job.categories))
        .record(same_text(criteria.declared_city(), job.city.as_deref()))
        .record(same_text(
            criteria.declared_experience(),
            job.experience.as_deref(),
        ))
        .record(any_shared(criteria.declared_education(), &qualification))
        .record(salary_within(criteria.declared_salary(), job.offered_salary))
        .record(job_remote_fit(criteria.declared_remote_work(), job.remote_mode))
        .record(same_text(criteria.declared_job_type(), job.job_type.as_deref()))
        .record(mentions_any(keywords.as_deref(), &job.free_text));

    let result = tally.finish(policy);
    debug!(
        matched = result.matched_criteria,
        total = result.total_criteria,
        score = result.score,
        "job scored against criteria"
    );
    result
}

/// Anything that can be scored against alert criteria.
pub trait MatchTarget {
    fn match_against(&self, criteria: &MatchCriteria, policy: &MatchPolicy) -> MatchResult;
}

impl MatchTarget for CandidateAttributes {
    fn match_against(&self, criteria: &MatchCriteria, policy: &MatchPolicy) -> MatchResult {
        match_candidate(self, criteria, policy)
    }
}

impl MatchTarget for CandidateSource {
    fn match_against(&self, criteria: &MatchCriteria, policy: &MatchPolicy) -> MatchResult {
        match_candidate(&self.attributes(), criteria, policy)
    }
}

impl MatchTarget for JobAttributes {
    fn match_against(&self, criteria: &MatchCriteria, policy: &MatchPolicy) -> MatchResult {
        match_job(self, criteria, policy)
    }
}

impl MatchTarget for JobPost {
    fn match_against(&self, criteria: &MatchCriteria, policy: &MatchPolicy) -> MatchResult {
        match_job(&self.attributes(), criteria, policy)
    }
}
