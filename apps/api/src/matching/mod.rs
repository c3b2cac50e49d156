// Matching engine: candidate/job normalization, per-criterion matchers,
// score aggregation, text similarity, ranking and job recommendations.
// Everything but `handlers` is pure and synchronous.

pub mod aggregate;
pub mod bands;
pub mod criteria;
pub mod handlers;
pub mod matchers;
pub mod normalize;
pub mod ranking;
pub mod recommend;
pub mod similarity;

pub use aggregate::{match_candidate, match_job, MatchPolicy, MatchResult, MatchTarget};
pub use criteria::MatchCriteria;
pub use ranking::{rank_against_criteria, rank_by, PageRequest, RankedPage, ScoredItem};
