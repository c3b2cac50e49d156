//! Projects candidate and job documents into one comparable attribute set.
//!
//! Normalization never fails: missing fields become empty collections, the
//! "No Preference" / "Any" sentinels, or the lowest experience band.

use chrono::{NaiveDate, Utc};
use serde::Serialize;

use crate::matching::bands::{ExperienceBand, Gender, RemoteWork, SalaryBand};
use crate::models::candidate::{
    CandidateProfile, CandidateResume, CandidateSource, ExperienceEntry,
};
use crate::models::job::JobPost;

const DAYS_PER_YEAR: f64 = 365.25;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CandidateAttributes {
    pub categories: Vec<String>,
    pub city: Option<String>,
    pub experience: Option<String>,
    pub skills: Vec<String>,
    pub education_levels: Vec<String>,
    pub expected_salary: Option<SalaryBand>,
    pub age: Option<u32>,
    pub gender: Gender,
    pub remote_preference: RemoteWork,
    pub job_types: Vec<String>,
    /// Title, description, skills and categories joined by spaces.
    pub free_text: String,
}

impl CandidateAttributes {
    /// Only an explicit "Remote" preference counts as remote-ready.
    pub fn is_remote_ready(&self) -> bool {
        self.remote_preference == RemoteWork::Remote
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JobAttributes {
    pub categories: Vec<String>,
    pub city: Option<String>,
    pub experience: Option<String>,
    pub job_type: Option<String>,
    pub offered_salary: Option<SalaryBand>,
    pub qualification: Option<String>,
    pub remote_mode: RemoteWork,
    /// Title and description joined by a space.
    pub free_text: String,
}

impl CandidateSource {
    pub fn attributes(&self) -> CandidateAttributes {
        self.attributes_at(Utc::now().date_naive())
    }

    /// Normalizes against a fixed "today", used to close ongoing positions.
    pub fn attributes_at(&self, today: NaiveDate) -> CandidateAttributes {
        match self {
            CandidateSource::Profile(profile) => from_profile(profile),
            CandidateSource::Resume(resume) => from_resume(resume, today),
        }
    }
}

impl JobPost {
    pub fn attributes(&self) -> JobAttributes {
        JobAttributes {
            categories: self.specialisms.clone(),
            city: non_blank(self.location.city.as_deref()),
            experience: non_blank(self.experience.as_deref()),
            job_type: non_blank(self.job_type.as_deref()),
            offered_salary: self.offered_salary.as_deref().and_then(SalaryBand::from_label),
            qualification: non_blank(self.qualification.as_deref()),
            remote_mode: self
                .remote_work
                .as_deref()
                .and_then(RemoteWork::from_label)
                .unwrap_or(RemoteWork::OnSite),
            free_text: join_text(&[self.title.as_str(), self.description.as_str()], &[]),
        }
    }
}

fn from_profile(profile: &CandidateProfile) -> CandidateAttributes {
    let mut job_types = profile.preferences.job_types.clone();
    if let Some(job_type) = non_blank(profile.job_type.as_deref()) {
        if !job_types.contains(&job_type) {
            job_types.insert(0, job_type);
        }
    }

    CandidateAttributes {
        categories: profile.categories.clone(),
        city: non_blank(profile.location.city.as_deref()),
        experience: non_blank(profile.experience.as_deref()),
        skills: profile.skills.clone(),
        education_levels: profile.education_levels.clone(),
        expected_salary: profile
            .expected_salary
            .as_deref()
            .and_then(SalaryBand::from_label),
        age: profile.age,
        gender: parse_gender(profile.gender.as_deref()),
        remote_preference: parse_remote(
            non_blank(profile.preferences.remote_work.as_deref())
                .or_else(|| non_blank(profile.location.remote_work.as_deref()))
                .as_deref(),
        ),
        job_types,
        free_text: join_text(
            &[profile.job_title.as_str(), profile.description.as_str()],
            &[profile.skills.as_slice(), profile.categories.as_slice()],
        ),
    }
}

fn from_resume(resume: &CandidateResume, today: NaiveDate) -> CandidateAttributes {
    let info = &resume.personal_info;
    let summary = if info.summary.trim().is_empty() {
        &resume.description
    } else {
        &info.summary
    };

    let mut education_levels: Vec<String> = Vec::new();
    for degree in resume.education.iter().filter_map(|e| non_blank(e.degree.as_deref())) {
        if !education_levels.contains(&degree) {
            education_levels.push(degree);
        }
    }

    let years = total_experience_years(&resume.experience, today);

    CandidateAttributes {
        // Resumes carry no category list.
        categories: Vec::new(),
        city: non_blank(info.location.city.as_deref()),
        experience: Some(ExperienceBand::from_years(years).label().to_string()),
        skills: resume.skills.clone(),
        education_levels,
        expected_salary: info.expected_salary.as_deref().and_then(SalaryBand::from_label),
        age: info.age,
        gender: parse_gender(info.gender.as_deref()),
        remote_preference: parse_remote(resume.preferences.remote_work.as_deref()),
        job_types: resume.preferences.job_types.clone(),
        free_text: join_text(
            &[info.professional_title.as_str(), summary.as_str()],
            &[resume.skills.as_slice()],
        ),
    }
}

/// Sum of entry durations in years. Ongoing entries end `today`; entries
/// without usable dates contribute nothing.
pub fn total_experience_years(entries: &[ExperienceEntry], today: NaiveDate) -> f64 {
    entries
        .iter()
        .map(|entry| {
            let end = if entry.current {
                Some(today)
            } else {
                entry.end_date
            };
            match (entry.start_date, end) {
                (Some(start), Some(end)) => {
                    ((end - start).num_days() as f64 / DAYS_PER_YEAR).max(0.0)
                }
                _ => 0.0,
            }
        })
        .sum()
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn parse_gender(value: Option<&str>) -> Gender {
    value.and_then(Gender::from_label).unwrap_or_default()
}

fn parse_remote(value: Option<&str>) -> RemoteWork {
    value.and_then(RemoteWork::from_label).unwrap_or_default()
}

fn join_text(parts: &[&str], lists: &[&[String]]) -> String {
    parts
        .iter()
        .copied()
        .chain(lists.iter().flat_map(|list| list.iter().map(String::as_str)))
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
