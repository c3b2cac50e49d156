//! One comparison per criterion. Every matcher returns `None` when the
//! criterion is undeclared, so the aggregator can leave it out of the
//! denominator.

use crate::matching::bands::{salary_range_rupees, Gender, RemoteWork, SalaryBand};
use crate::matching::criteria::{AgeRange, SalaryRange};

/// Non-empty intersection, compared exactly.
pub fn any_shared(criterion: Option<&[String]>, actual: &[String]) -> Option<bool> {
    criterion.map(|wanted| wanted.iter().any(|w| actual.contains(w)))
}

/// Case-insensitive equality against an optional actual value.
pub fn same_text(criterion: Option<&str>, actual: Option<&str>) -> Option<bool> {
    criterion.map(|wanted| {
        actual.is_some_and(|actual| actual.trim().to_lowercase() == wanted.to_lowercase())
    })
}

/// Case-insensitive membership, e.g. a job type among preferred job types.
pub fn one_of(criterion: Option<&str>, actual: &[String]) -> Option<bool> {
    criterion.map(|wanted| {
        let wanted = wanted.to_lowercase();
        actual.iter().any(|a| a.trim().to_lowercase() == wanted)
    })
}

/// Band-to-range containment. Each declared bound is checked against the
/// matching edge of the band: the band floor must reach `min` and the band
/// ceiling must stay within `max`. Unknown bands span `[0, ∞)`.
pub fn salary_within(criterion: Option<SalaryRange>, band: Option<SalaryBand>) -> Option<bool> {
    criterion.map(|range| {
        let (floor, ceiling) = salary_range_rupees(band);
        let min_ok = range.min.map_or(true, |min| floor >= min);
        let max_ok = range.max.map_or(true, |max| ceiling <= max);
        min_ok && max_ok
    })
}

pub fn gender_is(criterion: Option<Gender>, actual: Gender) -> Option<bool> {
    criterion.map(|wanted| wanted == actual)
}

/// An unknown age never falls within a declared range.
pub fn age_within(criterion: Option<AgeRange>, actual: Option<u32>) -> Option<bool> {
    criterion.map(|range| actual.is_some_and(|age| range.contains(age)))
}

/// Candidate side. "Any" accepts everyone and "Remote" needs a remote-ready
/// candidate. On-site and hybrid criteria are declared but never satisfied.
pub fn candidate_remote_fit(
    criterion: Option<RemoteWork>,
    preference: RemoteWork,
) -> Option<bool> {
    criterion.map(|wanted| match wanted {
        RemoteWork::Any => true,
        RemoteWork::Remote => preference == RemoteWork::Remote,
        RemoteWork::OnSite | RemoteWork::Hybrid => false,
    })
}

/// Job side. "Any" accepts every posting, otherwise the modes must agree.
pub fn job_remote_fit(criterion: Option<RemoteWork>, mode: RemoteWork) -> Option<bool> {
    criterion.map(|wanted| wanted == RemoteWork::Any || wanted == mode)
}

/// Any keyword occurring as a case-insensitive substring of `text`.
pub fn mentions_any(criterion: Option<&[&str]>, text: &str) -> Option<bool> {
    criterion.map(|keywords| {
        let haystack = text.to_lowercase();
        keywords
            .iter()
            .any(|kw| haystack.contains(&kw.to_lowercase()))
    })
}
