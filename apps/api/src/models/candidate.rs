use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    pub city: Option<String>,
    pub country: Option<String>,
    /// Legacy profile documents keep the remote preference here.
    #[serde(alias = "remoteWork")]
    pub remote_work: Option<String>,
}

/// Flat candidate profile as maintained by the candidate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateProfile {
    pub id: Option<Uuid>,
    #[serde(alias = "fullName")]
    pub full_name: String,
    #[serde(alias = "jobTitle")]
    pub job_title: String,
    pub description: String,
    pub categories: Vec<String>,
    pub skills: Vec<String>,
    /// Experience band label, e.g. "3-5 years".
    pub experience: Option<String>,
    #[serde(alias = "educationLevels")]
    pub education_levels: Vec<String>,
    pub location: Location,
    /// Salary band label, e.g. "₹10-15 LPA".
    #[serde(alias = "expectedSalary")]
    pub expected_salary: Option<String>,
    pub age: Option<u32>,
    pub gender: Option<String>,
    #[serde(alias = "jobType")]
    pub job_type: Option<String>,
    pub preferences: CandidatePreferences,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidatePreferences {
    /// "On-site", "Hybrid", "Remote" or "Any".
    #[serde(alias = "remoteWork")]
    pub remote_work: Option<String>,
    #[serde(alias = "jobTypes")]
    pub job_types: Vec<String>,
    pub locations: Vec<String>,
}

/// Structured resume with education and experience sub-documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateResume {
    pub id: Option<Uuid>,
    pub title: String,
    pub description: String,
    #[serde(alias = "personalInfo")]
    pub personal_info: PersonalInfo,
    pub education: Vec<EducationEntry>,
    pub experience: Vec<ExperienceEntry>,
    pub skills: Vec<String>,
    pub preferences: CandidatePreferences,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalInfo {
    #[serde(alias = "fullName")]
    pub full_name: String,
    #[serde(alias = "professionalTitle")]
    pub professional_title: String,
    pub summary: String,
    pub location: Location,
    #[serde(alias = "expectedSalary")]
    pub expected_salary: Option<String>,
    pub age: Option<u32>,
    pub gender: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    pub institution: String,
    pub degree: Option<String>,
    #[serde(alias = "fieldOfStudy")]
    pub field_of_study: Option<String>,
    #[serde(alias = "startDate")]
    pub start_date: Option<NaiveDate>,
    #[serde(alias = "endDate")]
    pub end_date: Option<NaiveDate>,
    pub current: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceEntry {
    pub company: String,
    pub position: String,
    #[serde(alias = "startDate")]
    pub start_date: Option<NaiveDate>,
    #[serde(alias = "endDate")]
    pub end_date: Option<NaiveDate>,
    pub current: bool,
    pub skills: Vec<String>,
}

/// The two document shapes a candidate can be matched from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CandidateSource {
    Profile(CandidateProfile),
    Resume(CandidateResume),
}

impl CandidateSource {
    pub fn id(&self) -> Option<Uuid> {
        match self {
            CandidateSource::Profile(p) => p.id,
            CandidateSource::Resume(r) => r.id,
        }
    }

    pub fn display_name(&self) -> &str {
        let (name, title) = match self {
            CandidateSource::Profile(p) => (&p.full_name, &p.job_title),
            CandidateSource::Resume(r) => (
                &r.personal_info.full_name,
                &r.personal_info.professional_title,
            ),
        };
        if name.trim().is_empty() {
            title.as_str()
        } else {
            name.as_str()
        }
    }
}
