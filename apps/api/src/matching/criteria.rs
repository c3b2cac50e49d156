use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::matching::bands::{Gender, RemoteWork};

/// Per-attribute filters of an alert. Every field is optional; a field that
/// is absent or empty is *undeclared* and never enters the score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchCriteria {
    pub categories: Vec<String>,
    pub location: Option<LocationCriterion>,
    #[serde(alias = "salaryRange")]
    pub salary_range: Option<SalaryRange>,
    pub experience: Option<String>,
    #[serde(alias = "educationLevels")]
    pub education_levels: Vec<String>,
    pub skills: Vec<String>,
    pub diversity: Option<Diversity>,
    #[serde(alias = "remoteWork", deserialize_with = "lenient_remote_work")]
    pub remote_work: Option<RemoteWork>,
    #[serde(alias = "jobType")]
    pub job_type: Option<String>,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationCriterion {
    pub city: Option<String>,
    pub country: Option<String>,
}

/// Salary bounds in currency units (rupees per annum).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SalaryRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Diversity {
    #[serde(deserialize_with = "lenient_gender")]
    pub gender: Option<Gender>,
    #[serde(alias = "ageRange")]
    pub age_range: Option<AgeRange>,
}

/// Inclusive age bounds. A missing bound leaves that side open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgeRange {
    pub min: Option<u32>,
    pub max: Option<u32>,
}

impl AgeRange {
    pub fn contains(&self, age: u32) -> bool {
        self.min.map_or(true, |min| age >= min) && self.max.map_or(true, |max| age <= max)
    }
}

/// Unrecognised labels leave the criterion undeclared instead of failing
/// the whole document.
fn lenient_label<'de, D, T>(
    deserializer: D,
    parse: fn(&str) -> Option<T>,
) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(Value::as_str).and_then(parse))
}

fn lenient_remote_work<'de, D: Deserializer<'de>>(d: D) -> Result<Option<RemoteWork>, D::Error> {
    lenient_label(d, RemoteWork::from_label)
}

fn lenient_gender<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Gender>, D::Error> {
    lenient_label(d, Gender::from_label)
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

impl MatchCriteria {
    pub fn declared_categories(&self) -> Option<&[String]> {
        (!self.categories.is_empty()).then_some(self.categories.as_slice())
    }

    pub fn declared_city(&self) -> Option<&str> {
        self.location.as_ref().and_then(|l| non_blank(&l.city))
    }

    pub fn declared_experience(&self) -> Option<&str> {
        non_blank(&self.experience)
    }

    pub fn declared_skills(&self) -> Option<&[String]> {
        (!self.skills.is_empty()).then_some(self.skills.as_slice())
    }

    pub fn declared_education(&self) -> Option<&[String]> {
        (!self.education_levels.is_empty()).then_some(self.education_levels.as_slice())
    }

    /// Declared when at least one bound is a positive amount. A zero bound
    /// carries no information and is ignored.
    pub fn declared_salary(&self) -> Option<SalaryRange> {
        let range = self.salary_range?;
        let declared = SalaryRange {
            min: positive(range.min),
            max: positive(range.max),
        };
        (declared.min.is_some() || declared.max.is_some()).then_some(declared)
    }

    /// "No Preference" is a sentinel, not a filter.
    pub fn declared_gender(&self) -> Option<Gender> {
        self.diversity
            .as_ref()
            .and_then(|d| d.gender)
            .filter(|g| *g != Gender::NoPreference)
    }

    pub fn declared_age_range(&self) -> Option<AgeRange> {
        self.diversity
            .as_ref()
            .and_then(|d| d.age_range)
            .filter(|r| r.min.is_some() || r.max.is_some())
    }

    pub fn declared_remote_work(&self) -> Option<RemoteWork> {
        self.remote_work
    }

    pub fn declared_job_type(&self) -> Option<&str> {
        non_blank(&self.job_type)
    }

    /// Blank keywords are dropped; they would otherwise match any text.
    pub fn declared_keywords(&self) -> Option<Vec<&str>> {
        let keywords: Vec<&str> = self
            .keywords
            .iter()
            .map(|k| k.trim())
            .filter(|k| !k.is_empty())
            .collect();
        (!keywords.is_empty()).then_some(keywords)
    }

    /// Number of declared criteria, whichever side they will be applied to.
    pub fn declared_count(&self) -> usize {
        [
            self.declared_categories().is_some(),
            self.declared_city().is_some(),
            self.declared_experience().is_some(),
            self.declared_skills().is_some(),
            self.declared_education().is_some(),
            self.declared_salary().is_some(),
            self.declared_gender().is_some(),
            self.declared_age_range().is_some(),
            self.declared_remote_work().is_some(),
            self.declared_job_type().is_some(),
            self.declared_keywords().is_some(),
        ]
        .into_iter()
        .filter(|declared| *declared)
        .count()
    }

    pub fn is_empty(&self) -> bool {
        self.declared_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_criteria_declares_nothing() {
        assert!(MatchCriteria::default().is_empty());
    }

    #[test]
    fn test_blank_values_are_undeclared() {
        let criteria = MatchCriteria {
            location: Some(LocationCriterion {
                city: Some("   ".to_string()),
                country: Some("India".to_string()),
            }),
            experience: Some(String::new()),
            keywords: vec!["".to_string(), "  ".to_string()],
            salary_range: Some(SalaryRange {
                min: Some(0.0),
                max: None,
            }),
            diversity: Some(Diversity {
                gender: Some(Gender::NoPreference),
                age_range: Some(AgeRange::default()),
            }),
            ..Default::default()
        };
        assert_eq!(criteria.declared_count(), 0);
    }

    #[test]
    fn test_declared_count_counts_each_dimension_once() {
        let criteria = MatchCriteria {
            categories: vec!["Engineering".to_string(), "Sales".to_string()],
            skills: vec!["Rust".to_string()],
            remote_work: Some(RemoteWork::Any),
            ..Default::default()
        };
        assert_eq!(criteria.declared_count(), 3);
    }

    #[test]
    fn test_unknown_labels_leave_criteria_undeclared() {
        let criteria: MatchCriteria = serde_json::from_value(json!({
            "categories": ["Engineering"],
            "remoteWork": "telepathic",
            "diversity": { "gender": "unknown", "ageRange": { "min": 25 } }
        }))
        .unwrap();
        assert_eq!(criteria.declared_remote_work(), None);
        assert_eq!(criteria.declared_gender(), None);
        assert_eq!(criteria.declared_count(), 2);

        let loose: MatchCriteria = serde_json::from_value(json!({
            "remote_work": "remote",
            "diversity": { "gender": " female " }
        }))
        .unwrap();
        assert_eq!(loose.declared_remote_work(), Some(RemoteWork::Remote));
        assert_eq!(loose.declared_gender(), Some(Gender::Female));
    }

    #[test]
    fn test_deserializes_stored_camel_case_document() {
        let criteria: MatchCriteria = serde_json::from_value(json!({
            "categories": ["Engineering"],
            "location": { "country": "India", "city": "Chennai" },
            "salaryRange": { "min": 900000 },
            "educationLevels": ["Bachelor"],
            "diversity": { "gender": "Female", "ageRange": { "min": 25, "max": 40 } },
            "remoteWork": "Remote Only"
        }))
        .unwrap();

        assert_eq!(criteria.declared_city(), Some("Chennai"));
        assert_eq!(criteria.declared_salary().unwrap().min, Some(900000.0));
        assert_eq!(criteria.declared_gender(), Some(Gender::Female));
        assert_eq!(criteria.declared_remote_work(), Some(RemoteWork::Remote));
        assert_eq!(criteria.declared_count(), 7);
    }

    #[test]
    fn test_age_range_open_ended() {
        let range = AgeRange {
            min: Some(25),
            max: None,
        };
        assert!(range.contains(25));
        assert!(range.contains(64));
        assert!(!range.contains(24));
    }
}
