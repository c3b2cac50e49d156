//! Job recommendations: a pluggable scorer ranks postings for one candidate.
//!
//! Default: `WeightedJobScorer` (additive signals, deterministic).
//! `AppState` holds an `Arc<dyn JobScorer>` so another backend can be
//! swapped in at startup without touching handlers.

use serde::{Deserialize, Serialize};

use crate::matching::bands::SalaryBand;
use crate::matching::normalize::{CandidateAttributes, JobAttributes};
use crate::matching::ranking::{rank_by, PageRequest, RankedPage};
use crate::matching::similarity::text_similarity;
use crate::models::candidate::CandidateSource;
use crate::models::job::JobPost;

pub trait JobScorer: Send + Sync {
    /// Relevance of `job` for `candidate`, 0–100.
    fn score(&self, candidate: &CandidateAttributes, job: &JobAttributes) -> f64;

    /// Label reported alongside results, for transparency.
    fn backend(&self) -> &'static str;
}

/// Points per signal. Category overlap is paid per shared category and
/// text similarity is scaled from [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecommendationWeights {
    pub per_category: f64,
    pub city: f64,
    pub experience: f64,
    pub job_type: f64,
    pub salary: f64,
    pub text_similarity: f64,
}

impl Default for RecommendationWeights {
    fn default() -> Self {
        Self {
            per_category: 20.0,
            city: 25.0,
            experience: 15.0,
            job_type: 15.0,
            salary: 10.0,
            text_similarity: 15.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct WeightedJobScorer {
    pub weights: RecommendationWeights,
}

impl JobScorer for WeightedJobScorer {
    fn score(&self, candidate: &CandidateAttributes, job: &JobAttributes) -> f64 {
        let w = &self.weights;
        let mut score = 0.0;

        score += category_overlap(&candidate.categories, &job.categories) as f64 * w.per_category;
        if same_ignoring_case(candidate.city.as_deref(), job.city.as_deref()) {
            score += w.city;
        }
        if same_ignoring_case(candidate.experience.as_deref(), job.experience.as_deref()) {
            score += w.experience;
        }
        if let Some(job_type) = job.job_type.as_deref() {
            if candidate
                .job_types
                .iter()
                .any(|t| t.eq_ignore_ascii_case(job_type))
            {
                score += w.job_type;
            }
        }
        if salary_meets_expectation(candidate.expected_salary, job.offered_salary) {
            score += w.salary;
        }
        score += text_similarity(&candidate.free_text, &job.free_text) * w.text_similarity;

        score.clamp(0.0, 100.0)
    }

    fn backend(&self) -> &'static str {
        "weighted"
    }
}

/// Distinct job categories the candidate also lists.
fn category_overlap(candidate: &[String], job: &[String]) -> usize {
    let mut seen: Vec<String> = Vec::new();
    for category in job {
        let key = category.trim().to_lowercase();
        if seen.contains(&key) {
            continue;
        }
        if candidate.iter().any(|c| c.trim().to_lowercase() == key) {
            seen.push(key);
        }
    }
    seen.len()
}

fn same_ignoring_case(a: Option<&str>, b: Option<&str>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a.trim().to_lowercase() == b.trim().to_lowercase())
}

/// The offered band must start at or above the expected band. Negotiable
/// offers and missing bands never qualify.
fn salary_meets_expectation(expected: Option<SalaryBand>, offered: Option<SalaryBand>) -> bool {
    match (expected, offered) {
        (Some(_), Some(SalaryBand::Negotiable)) => false,
        (Some(expected), Some(offered)) => offered.range_lakhs().0 >= expected.range_lakhs().0,
        _ => false,
    }
}

/// Ranks `jobs` for `candidate`, skipping postings that are not published.
pub fn recommend_jobs(
    scorer: &dyn JobScorer,
    candidate: &CandidateSource,
    jobs: Vec<JobPost>,
    page: PageRequest,
) -> RankedPage<JobPost> {
    let attributes = candidate.attributes();
    let open: Vec<JobPost> = jobs.into_iter().filter(JobPost::is_published).collect();
    rank_by(open, page, |job| scorer.score(&attributes, &job.attributes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::candidate::{CandidateProfile, Location};
    use crate::models::job::JobStatus;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn candidate() -> CandidateAttributes {
        CandidateSource::Profile(CandidateProfile {
            categories: strings(&["Engineering", "Data"]),
            location: Location {
                city: Some("Chennai".to_string()),
                country: None,
                ..Default::default()
            },
            ..Default::default()
        })
        .attributes()
    }

    fn job(title: &str, specialisms: &[&str], city: &str) -> JobPost {
        JobPost {
            title: title.to_string(),
            specialisms: strings(specialisms),
            location: Location {
                city: Some(city.to_string()),
                country: None,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_two_categories_and_city_score_65() {
        let posting = job("Platform Lead", &["Engineering", "Data"], "chennai");
        let score = WeightedJobScorer::default().score(&candidate(), &posting.attributes());
        assert!((score - 65.0).abs() < 1e-9, "score was {score}");
    }

    #[test]
    fn test_score_clamped_to_100() {
        let scorer = WeightedJobScorer {
            weights: RecommendationWeights {
                per_category: 80.0,
                ..Default::default()
            },
        };
        let posting = job("Platform Lead", &["Engineering", "Data"], "Chennai");
        assert_eq!(scorer.score(&candidate(), &posting.attributes()), 100.0);
    }

    #[test]
    fn test_duplicate_job_categories_count_once() {
        assert_eq!(
            category_overlap(&strings(&["Engineering"]), &strings(&["Engineering", "engineering"])),
            1
        );
    }

    #[test]
    fn test_salary_expectation() {
        use SalaryBand::*;
        assert!(salary_meets_expectation(Some(From10To15), Some(From15To20)));
        assert!(salary_meets_expectation(Some(From10To15), Some(From10To15)));
        assert!(!salary_meets_expectation(Some(From15To20), Some(From10To15)));
        assert!(!salary_meets_expectation(Some(Below5), Some(Negotiable)));
        assert!(!salary_meets_expectation(None, Some(Above30)));
    }

    #[test]
    fn test_job_type_and_experience_signals() {
        let mut attrs = candidate();
        attrs.categories.clear();
        attrs.city = None;
        attrs.experience = Some("1-3 years".to_string());
        attrs.job_types = strings(&["Contract"]);
        attrs.expected_salary = Some(SalaryBand::From5To10);

        let posting = JobPost {
            job_type: Some("contract".to_string()),
            experience: Some("1-3 Years".to_string()),
            offered_salary: Some("₹10-15 LPA".to_string()),
            ..Default::default()
        };
        let score = WeightedJobScorer::default().score(&attrs, &posting.attributes());
        assert!((score - 40.0).abs() < 1e-9, "score was {score}");
    }

    #[test]
    fn test_recommendations_skip_unpublished_and_rank() {
        let mut draft = job("Draft role", &["Engineering", "Data"], "Chennai");
        draft.status = JobStatus::Draft;
        let jobs = vec![
            job("Sales role", &["Sales"], "Delhi"),
            draft,
            job("Data role", &["Data"], "Chennai"),
        ];
        let source = CandidateSource::Profile(CandidateProfile {
            categories: strings(&["Engineering", "Data"]),
            location: Location {
                city: Some("Chennai".to_string()),
                country: None,
                ..Default::default()
            },
            ..Default::default()
        });

        let ranked = recommend_jobs(
            &WeightedJobScorer::default(),
            &source,
            jobs,
            PageRequest::default(),
        );
        assert_eq!(ranked.total, 2);
        assert_eq!(ranked.results[0].item.title, "Data role");
    }
}
