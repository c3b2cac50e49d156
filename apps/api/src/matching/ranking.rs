//! Ranking and pagination of scored candidates or jobs.

use serde::{Deserialize, Serialize};

use crate::matching::aggregate::{MatchPolicy, MatchTarget};
use crate::matching::criteria::MatchCriteria;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 100;

/// Raw pagination parameters as they arrive on a query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Sanitized 1-based pagination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    /// Non-positive values fall back to the defaults; limit is capped.
    pub fn new(page: i64, limit: i64) -> Self {
        Self {
            page: positive_or(page as f64, DEFAULT_PAGE, u32::MAX),
            limit: positive_or(limit as f64, DEFAULT_LIMIT, MAX_LIMIT),
        }
    }

    /// Accepts anything a client may send: missing, non-numeric, fractional,
    /// negative. Nothing here can yield NaN downstream.
    pub fn from_raw(page: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            page: parse_or(page, DEFAULT_PAGE, u32::MAX),
            limit: parse_or(limit, DEFAULT_LIMIT, MAX_LIMIT),
        }
    }

    pub fn offset(&self) -> usize {
        (self.page as usize - 1).saturating_mul(self.limit as usize)
    }
}

impl From<&PageQuery> for PageRequest {
    fn from(query: &PageQuery) -> Self {
        PageRequest::from_raw(query.page.as_deref(), query.limit.as_deref())
    }
}

fn parse_or(raw: Option<&str>, default: u32, cap: u32) -> u32 {
    raw.and_then(|r| r.trim().parse::<f64>().ok())
        .map_or(default, |value| positive_or(value, default, cap))
}

fn positive_or(value: f64, default: u32, cap: u32) -> u32 {
    if value.is_finite() && value >= 1.0 {
        value.floor().min(f64::from(cap)) as u32
    } else {
        default
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredItem<T> {
    pub item: T,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedPage<T> {
    pub results: Vec<ScoredItem<T>>,
    pub page: u32,
    pub limit: u32,
    /// Number of ranked items before slicing.
    pub total: usize,
    pub total_pages: usize,
}

impl<T> RankedPage<T> {
    pub fn empty(page: PageRequest) -> Self {
        Self {
            results: Vec::new(),
            page: page.page,
            limit: page.limit,
            total: 0,
            total_pages: 0,
        }
    }
}

/// Sorts already-scored items descending (stable for ties) and slices out
/// the requested page.
pub fn paginate<T>(mut scored: Vec<ScoredItem<T>>, page: PageRequest) -> RankedPage<T> {
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));

    let total = scored.len();
    let results: Vec<ScoredItem<T>> = scored
        .into_iter()
        .skip(page.offset())
        .take(page.limit as usize)
        .collect();

    RankedPage {
        results,
        page: page.page,
        limit: page.limit,
        total,
        total_pages: total.div_ceil(page.limit as usize),
    }
}

/// Ranks items with an ad-hoc scoring function. NaN scores rank as 0.
pub fn rank_by<T, F>(items: Vec<T>, page: PageRequest, mut score: F) -> RankedPage<T>
where
    F: FnMut(&T) -> f64,
{
    let scored = items
        .into_iter()
        .map(|item| {
            let value = score(&item);
            ScoredItem {
                score: if value.is_nan() { 0.0 } else { value },
                item,
            }
        })
        .collect();
    paginate(scored, page)
}

/// Ranks every item by its criteria score, matched or not.
pub fn rank_against_criteria<T: MatchTarget>(
    items: Vec<T>,
    criteria: &MatchCriteria,
    policy: &MatchPolicy,
    page: PageRequest,
) -> RankedPage<T> {
    rank_by(items, page, |item| item.match_against(criteria, policy).score)
}

/// Like [`rank_against_criteria`] but drops items below the match threshold.
pub fn rank_matches<T: MatchTarget>(
    items: Vec<T>,
    criteria: &MatchCriteria,
    policy: &MatchPolicy,
    page: PageRequest,
) -> RankedPage<T> {
    let scored = items
        .into_iter()
        .filter_map(|item| {
            let result = item.match_against(criteria, policy);
            result.matched.then_some(ScoredItem {
                item,
                score: result.score,
            })
        })
        .collect();
    paginate(scored, page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::criteria::LocationCriterion;
    use crate::models::candidate::{CandidateProfile, CandidateSource, Location};

    fn profile(name: &str, categories: &[&str], city: &str) -> CandidateSource {
        CandidateSource::Profile(CandidateProfile {
            full_name: name.to_string(),
            categories: categories.iter().map(|c| c.to_string()).collect(),
            location: Location {
                city: Some(city.to_string()),
                country: None,
                ..Default::default()
            },
            ..Default::default()
        })
    }

    #[test]
    fn test_page_coercion_from_raw() {
        assert_eq!(PageRequest::from_raw(None, None), PageRequest::default());
        assert_eq!(
            PageRequest::from_raw(Some("abc"), Some("-4")),
            PageRequest::default()
        );
        assert_eq!(
            PageRequest::from_raw(Some("NaN"), Some("inf")),
            PageRequest::default()
        );
        assert_eq!(
            PageRequest::from_raw(Some("3"), Some("25")),
            PageRequest { page: 3, limit: 25 }
        );
        assert_eq!(PageRequest::from_raw(Some("2.9"), Some("1000")).limit, MAX_LIMIT);
        assert_eq!(PageRequest::from_raw(Some("2.9"), None).page, 2);
        assert_eq!(PageRequest::new(0, 0), PageRequest::default());
    }

    #[test]
    fn test_empty_collection_yields_empty_page() {
        let ranked = rank_by(Vec::<u32>::new(), PageRequest::default(), |_| 1.0);
        assert!(ranked.results.is_empty());
        assert_eq!(ranked.total, 0);
        assert_eq!(ranked.total_pages, 0);
    }

    #[test]
    fn test_ranking_is_stable_for_ties() {
        let items = vec![("a", 50.0), ("b", 80.0), ("c", 50.0), ("d", 80.0)];
        let ranked = rank_by(items, PageRequest::default(), |(_, s)| *s);
        let order: Vec<&str> = ranked.results.iter().map(|r| r.item.0).collect();
        assert_eq!(order, vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_second_page_of_five() {
        // Scores 12, 11, ... 1 in shuffled input order.
        let items: Vec<u32> = vec![5, 12, 1, 9, 3, 7, 11, 2, 8, 10, 4, 6];
        let ranked = rank_by(items, PageRequest::new(2, 5), |n| f64::from(*n));
        let page: Vec<u32> = ranked.results.iter().map(|r| r.item).collect();
        assert_eq!(page, vec![7, 6, 5, 4, 3]);
        assert_eq!(ranked.total, 12);
        assert_eq!(ranked.total_pages, 3);
    }

    #[test]
    fn test_page_past_end_is_empty() {
        let ranked = rank_by(vec![1, 2, 3], PageRequest::new(5, 10), |n| f64::from(*n));
        assert!(ranked.results.is_empty());
        assert_eq!(ranked.total, 3);
    }

    #[test]
    fn test_nan_scores_rank_as_zero() {
        let ranked = rank_by(vec![1.0, f64::NAN, 2.0], PageRequest::default(), |n| *n);
        assert_eq!(ranked.results[2].score, 0.0);
    }

    #[test]
    fn test_rank_against_criteria_keeps_non_matches() {
        let criteria = MatchCriteria {
            categories: vec!["Engineering".to_string()],
            location: Some(LocationCriterion {
                city: Some("Chennai".to_string()),
                country: None,
            }),
            ..Default::default()
        };
        let candidates = vec![
            profile("Asha", &["Sales"], "Delhi"),
            profile("Bala", &["Engineering"], "Chennai"),
            profile("Chitra", &["Engineering"], "Pune"),
        ];

        let all = rank_against_criteria(
            candidates.clone(),
            &criteria,
            &MatchPolicy::default(),
            PageRequest::default(),
        );
        let names: Vec<&str> = all.results.iter().map(|r| r.item.display_name()).collect();
        assert_eq!(names, vec!["Bala", "Chitra", "Asha"]);
        assert_eq!(all.results[1].score, 50.0);

        let matches = rank_matches(
            candidates,
            &criteria,
            &MatchPolicy::default(),
            PageRequest::default(),
        );
        assert_eq!(matches.total, 1);
        assert_eq!(matches.results[0].item.display_name(), "Bala");
    }
}
