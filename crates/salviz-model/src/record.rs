//! Employment records and their categorical attributes

use crate::error::RecordError;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Anything a chart can group records by
///
/// The label is what the renderer shows and what the flow graph uses as
/// a node name.
pub trait Category {
    /// Display label for this category value
    fn label(&self) -> &str;
}

/// Seniority of the position
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ExperienceLevel {
    /// Senior level
    #[serde(rename = "SE")]
    Senior,
    /// Executive level
    #[serde(rename = "EX")]
    Executive,
    /// Mid level
    #[serde(rename = "MI")]
    Mid,
    /// Entry level
    #[serde(rename = "EN")]
    Entry,
}

impl ExperienceLevel {
    /// All levels in declaration order
    pub const ALL: [Self; 4] = [Self::Senior, Self::Executive, Self::Mid, Self::Entry];

    /// Two-letter dataset code
    #[inline]
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Senior => "SE",
            Self::Executive => "EX",
            Self::Mid => "MI",
            Self::Entry => "EN",
        }
    }

    /// Human description shown in tooltips
    #[inline]
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Senior => "Senior Level",
            Self::Executive => "Executive Level",
            Self::Mid => "Mid Level",
            Self::Entry => "Entry Level",
        }
    }
}

impl Category for ExperienceLevel {
    fn label(&self) -> &str {
        self.code()
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ExperienceLevel {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "SE" => Ok(Self::Senior),
            "EX" => Ok(Self::Executive),
            "MI" => Ok(Self::Mid),
            "EN" => Ok(Self::Entry),
            "" => Err(RecordError::EmptyField("experience_level")),
            other => Err(RecordError::UnknownExperienceLevel(other.to_string())),
        }
    }
}

/// Size of the employing company
///
/// The dataset uses S/M/L; any other non-empty code is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CompanySize {
    /// Fewer than 50 employees
    Small,
    /// 50 to 250 employees
    Medium,
    /// More than 250 employees
    Large,
    /// Dataset-defined size code
    Other(String),
}

impl CompanySize {
    /// Dataset code
    #[inline]
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::Small => "S",
            Self::Medium => "M",
            Self::Large => "L",
            Self::Other(code) => code,
        }
    }
}

impl Category for CompanySize {
    fn label(&self) -> &str {
        self.code()
    }
}

impl fmt::Display for CompanySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for CompanySize {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "S" => Ok(Self::Small),
            "M" => Ok(Self::Medium),
            "L" => Ok(Self::Large),
            "" => Err(RecordError::EmptyField("company_size")),
            other => Ok(Self::Other(other.to_string())),
        }
    }
}

impl Serialize for CompanySize {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

/// One employment observation
///
/// Immutable once constructed; salary is guaranteed finite and non-negative.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    experience_level: ExperienceLevel,
    company_size: CompanySize,
    job_title: String,
    salary_usd: f64,
}

impl Record {
    /// Create a validated record
    ///
    /// # Errors
    /// Returns [`RecordError::InvalidSalary`] for negative or non-finite
    /// salaries.
    pub fn new(
        experience_level: ExperienceLevel,
        company_size: CompanySize,
        job_title: impl Into<String>,
        salary_usd: f64,
    ) -> Result<Self, RecordError> {
        if !salary_usd.is_finite() || salary_usd < 0.0 {
            return Err(RecordError::InvalidSalary(salary_usd));
        }
        Ok(Self {
            experience_level,
            company_size,
            job_title: job_title.into(),
            salary_usd,
        })
    }

    /// Experience level
    #[inline]
    #[must_use]
    pub fn experience_level(&self) -> ExperienceLevel {
        self.experience_level
    }

    /// Company size
    #[inline]
    #[must_use]
    pub fn company_size(&self) -> &CompanySize {
        &self.company_size
    }

    /// Job title as it appeared in the source
    #[inline]
    #[must_use]
    pub fn job_title(&self) -> &str {
        &self.job_title
    }

    /// Salary in US dollars
    #[inline]
    #[must_use]
    pub fn salary_usd(&self) -> f64 {
        self.salary_usd
    }
}
