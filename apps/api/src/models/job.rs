use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::candidate::Location;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    Draft,
    #[default]
    Published,
    Closed,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobPost {
    pub id: Option<Uuid>,
    pub title: String,
    pub description: String,
    #[serde(alias = "companyName")]
    pub company_name: Option<String>,
    pub specialisms: Vec<String>,
    /// "Full-time", "Part-time", "Contract", ...
    #[serde(alias = "jobType")]
    pub job_type: Option<String>,
    /// Salary band label, e.g. "₹10-15 LPA" or "Negotiable".
    #[serde(alias = "offeredSalary")]
    pub offered_salary: Option<String>,
    pub experience: Option<String>,
    /// Minimum education level, e.g. "Bachelor".
    pub qualification: Option<String>,
    pub location: Location,
    #[serde(alias = "remoteWork")]
    pub remote_work: Option<String>,
    pub status: JobStatus,
}

impl JobPost {
    pub fn is_published(&self) -> bool {
        self.status == JobStatus::Published
    }
}
