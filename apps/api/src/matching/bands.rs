//! Ordinal vocabularies shared by profiles, resumes, job postings and alerts.
//!
//! Documents carry these as free strings (the stored labels). Parsing is
//! lenient: an unknown label is treated as absent instead of failing the
//! whole document.

use serde::{Deserialize, Serialize, Serializer};

/// One lakh rupees. Salary bands are expressed in lakhs per annum.
pub const LAKH: f64 = 100_000.0;

// ────────────────────────────────────────────────────────────────────────────
// Salary
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SalaryBand {
    Below5,
    From5To10,
    From10To15,
    From15To20,
    From20To30,
    Above30,
    Negotiable,
}

impl SalaryBand {
    pub const ALL: [SalaryBand; 7] = [
        SalaryBand::Below5,
        SalaryBand::From5To10,
        SalaryBand::From10To15,
        SalaryBand::From15To20,
        SalaryBand::From20To30,
        SalaryBand::Above30,
        SalaryBand::Negotiable,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SalaryBand::Below5 => "< ₹5 LPA",
            SalaryBand::From5To10 => "₹5-10 LPA",
            SalaryBand::From10To15 => "₹10-15 LPA",
            SalaryBand::From15To20 => "₹15-20 LPA",
            SalaryBand::From20To30 => "₹20-30 LPA",
            SalaryBand::Above30 => "₹30+ LPA",
            SalaryBand::Negotiable => "Negotiable",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|band| band.label().eq_ignore_ascii_case(label))
    }

    /// Half-open `[min, max)` range in lakhs. `Negotiable` spans everything.
    pub fn range_lakhs(self) -> (f64, f64) {
        match self {
            SalaryBand::Below5 => (0.0, 5.0),
            SalaryBand::From5To10 => (5.0, 10.0),
            SalaryBand::From10To15 => (10.0, 15.0),
            SalaryBand::From15To20 => (15.0, 20.0),
            SalaryBand::From20To30 => (20.0, 30.0),
            SalaryBand::Above30 => (30.0, f64::INFINITY),
            SalaryBand::Negotiable => (0.0, f64::INFINITY),
        }
    }

    /// Range in currency units (rupees).
    pub fn range_rupees(self) -> (f64, f64) {
        let (min, max) = self.range_lakhs();
        (min * LAKH, max * LAKH)
    }
}

impl Serialize for SalaryBand {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Range for an optional band; unknown or missing bands span everything.
pub fn salary_range_rupees(band: Option<SalaryBand>) -> (f64, f64) {
    band.map(SalaryBand::range_rupees)
        .unwrap_or((0.0, f64::INFINITY))
}

// ────────────────────────────────────────────────────────────────────────────
// Experience
// ────────────────────────────────────────────────────────────────────────────

/// Buckets used when experience is derived from resume entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperienceBand {
    LessThanOneYear,
    OneToThree,
    ThreeToFive,
    FiveToTen,
    TenPlus,
}

impl ExperienceBand {
    pub fn label(self) -> &'static str {
        match self {
            ExperienceBand::LessThanOneYear => "Less than 1 year",
            ExperienceBand::OneToThree => "1-3 years",
            ExperienceBand::ThreeToFive => "3-5 years",
            ExperienceBand::FiveToTen => "5-10 years",
            ExperienceBand::TenPlus => "10+ years",
        }
    }

    /// Upper bounds are inclusive: exactly 3.0 years is "1-3 years".
    pub fn from_years(years: f64) -> Self {
        if !years.is_finite() || years < 1.0 {
            ExperienceBand::LessThanOneYear
        } else if years <= 3.0 {
            ExperienceBand::OneToThree
        } else if years <= 5.0 {
            ExperienceBand::ThreeToFive
        } else if years <= 10.0 {
            ExperienceBand::FiveToTen
        } else {
            ExperienceBand::TenPlus
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Gender / remote work
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Gender {
    Male,
    Female,
    Other,
    #[default]
    #[serde(rename = "No Preference")]
    NoPreference,
}

impl Gender {
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            "other" => Some(Gender::Other),
            "no preference" => Some(Gender::NoPreference),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RemoteWork {
    #[serde(rename = "On-site")]
    OnSite,
    Hybrid,
    #[serde(alias = "Remote Only")]
    Remote,
    #[default]
    Any,
}

impl RemoteWork {
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "on-site" | "onsite" => Some(RemoteWork::OnSite),
            "hybrid" => Some(RemoteWork::Hybrid),
            "remote" | "remote only" => Some(RemoteWork::Remote),
            "any" => Some(RemoteWork::Any),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_salary_labels_parse_back() {
        for band in SalaryBand::ALL {
            assert_eq!(SalaryBand::from_label(band.label()), Some(band));
        }
        assert_eq!(SalaryBand::from_label(" ₹10-15 lpa "), Some(SalaryBand::From10To15));
        assert_eq!(SalaryBand::from_label("$100k"), None);
    }

    #[test]
    fn test_salary_band_ranges() {
        assert_eq!(SalaryBand::Below5.range_lakhs(), (0.0, 5.0));
        assert_eq!(
            SalaryBand::From10To15.range_rupees(),
            (1_000_000.0, 1_500_000.0)
        );
        assert!(SalaryBand::Above30.range_lakhs().1.is_infinite());
        assert_eq!(salary_range_rupees(None), (0.0, f64::INFINITY));
    }

    #[test]
    fn test_experience_bucketing() {
        assert_eq!(ExperienceBand::from_years(0.0), ExperienceBand::LessThanOneYear);
        assert_eq!(ExperienceBand::from_years(0.99), ExperienceBand::LessThanOneYear);
        assert_eq!(ExperienceBand::from_years(1.0), ExperienceBand::OneToThree);
        assert_eq!(ExperienceBand::from_years(3.0), ExperienceBand::OneToThree);
        assert_eq!(ExperienceBand::from_years(4.0), ExperienceBand::ThreeToFive);
        assert_eq!(ExperienceBand::from_years(10.0), ExperienceBand::FiveToTen);
        assert_eq!(ExperienceBand::from_years(12.5), ExperienceBand::TenPlus);
        assert_eq!(
            ExperienceBand::from_years(f64::NAN),
            ExperienceBand::LessThanOneYear
        );
    }

    #[test]
    fn test_remote_only_alias() {
        let parsed: RemoteWork = serde_json::from_str("\"Remote Only\"").unwrap();
        assert_eq!(parsed, RemoteWork::Remote);
        assert_eq!(RemoteWork::from_label("On-site"), Some(RemoteWork::OnSite));
    }

    #[test]
    fn test_gender_no_preference_label() {
        let parsed: Gender = serde_json::from_str("\"No Preference\"").unwrap();
        assert_eq!(parsed, Gender::NoPreference);
        assert_eq!(Gender::from_label("female"), Some(Gender::Female));
    }
}
