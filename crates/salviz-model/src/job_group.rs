//! Job-title grouping
//!
//! The dataset has far too many near-duplicate titles to chart directly,
//! so titles are folded into six groups by exact membership lookup.

use crate::record::Category;
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Broad job family used by the flow graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum JobGroup {
    /// Engineering roles
    Engineer,
    /// Analyst roles
    Analyst,
    /// Scientist roles
    Scientist,
    /// Management roles
    Manager,
    /// Consulting roles
    Consultant,
    /// Listed miscellany and every unrecognized title
    Other,
}

impl JobGroup {
    /// Group label as shown to users
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Engineer => "Engineer",
            Self::Analyst => "Analyst",
            Self::Scientist => "Scientist",
            Self::Manager => "Manager",
            Self::Consultant => "Consultant",
            Self::Other => "Other",
        }
    }
}

impl Category for JobGroup {
    fn label(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for JobGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Known titles per group
pub const JOB_GROUP_MAPPING: &[(JobGroup, &[&str])] = &[
    (
        JobGroup::Engineer,
        &[
            "Data Engineer",
            "Machine Learning Engineer",
            "Software Engineer",
            "ML Engineer",
            "Platform Engineer",
            "Backend Engineer",
            "Frontend Engineer",
        ],
    ),
    (
        JobGroup::Analyst,
        &[
            "Data Analyst",
            "Business Analyst",
            "Research Analyst",
            "Marketing Analyst",
        ],
    ),
    (
        JobGroup::Scientist,
        &[
            "Data Scientist",
            "ML Scientist",
            "Research Scientist",
            "AI Scientist",
        ],
    ),
    (
        JobGroup::Manager,
        &[
            "Engineering Manager",
            "Product Manager",
            "Project Manager",
            "Data Manager",
            "Analytics Manager",
        ],
    ),
    (
        JobGroup::Consultant,
        &[
            "Data Consultant",
            "Analytics Consultant",
            "Business Consultant",
        ],
    ),
    (
        JobGroup::Other,
        &[
            "Data Architect",
            "Statistician",
            "Quantitative Researcher",
            "BI Developer",
            "Data Specialist",
        ],
    ),
];

// First listing wins if a title were ever listed twice.
static TITLE_INDEX: Lazy<HashMap<&'static str, JobGroup>> = Lazy::new(|| {
    let mut index = HashMap::new();
    for (group, titles) in JOB_GROUP_MAPPING {
        for title in *titles {
            index.entry(*title).or_insert(*group);
        }
    }
    index
});

/// Map a job title onto its group
///
/// Exact, case-sensitive match against [`JOB_GROUP_MAPPING`]; anything
/// unlisted is [`JobGroup::Other`]. Never fails.
#[must_use]
pub fn classify(title: &str) -> JobGroup {
    TITLE_INDEX.get(title).copied().unwrap_or(JobGroup::Other)
}
