//! Testing utilities for salviz workspace
//!
//! Shared record fixtures and proptest strategies.

#![allow(missing_docs)]

use proptest::prelude::*;
use salviz_model::{CompanySize, ExperienceLevel, Record, JOB_GROUP_MAPPING};

pub fn record(level: &str, size: &str, title: &str, salary: f64) -> Record {
    Record::new(
        level.parse().unwrap(),
        size.parse().unwrap(),
        title,
        salary,
    )
    .unwrap()
}

/// The three-record walkthrough: two entry-level analysts at a small
/// company, one senior scientist at a medium one.
pub fn scenario_records() -> Vec<Record> {
    vec![
        record("EN", "S", "Data Analyst", 100.0),
        record("EN", "S", "Data Analyst", 200.0),
        record("SE", "M", "Data Scientist", 300.0),
    ]
}

/// A small mixed dataset touching every experience level and job group.
pub fn mixed_records() -> Vec<Record> {
    vec![
        record("SE", "L", "Data Engineer", 150_000.0),
        record("MI", "M", "Data Analyst", 90_000.0),
        record("EN", "S", "Data Scientist", 60_000.0),
        record("EX", "L", "Product Manager", 250_000.0),
        record("SE", "M", "Analytics Consultant", 120_000.0),
        record("MI", "L", "Head of Data", 130_000.0),
        record("SE", "L", "ML Engineer", 170_000.0),
        record("EN", "M", "Business Analyst", 55_000.0),
        record("MI", "S", "Research Scientist", 110_000.0),
        record("SE", "S", "Statistician", 95_000.0),
    ]
}

pub fn experience_level() -> impl Strategy<Value = ExperienceLevel> {
    prop::sample::select(ExperienceLevel::ALL.to_vec())
}

pub fn company_size() -> impl Strategy<Value = CompanySize> {
    prop_oneof![
        Just(CompanySize::Small),
        Just(CompanySize::Medium),
        Just(CompanySize::Large),
        Just(CompanySize::Other("XL".to_string())),
    ]
}

/// Mostly listed titles, with some that fall through to `Other`.
pub fn job_title() -> impl Strategy<Value = String> {
    let listed: Vec<String> = JOB_GROUP_MAPPING
        .iter()
        .flat_map(|(_, titles)| titles.iter().map(|t| (*t).to_string()))
        .collect();
    prop_oneof![
        4 => prop::sample::select(listed),
        1 => "[A-Za-z ]{0,12}",
    ]
}

pub fn any_record() -> impl Strategy<Value = Record> {
    (experience_level(), company_size(), job_title(), 0u32..500_000).prop_map(
        |(level, size, title, salary)| Record::new(level, size, title, f64::from(salary)).unwrap(),
    )
}

pub fn records(max: usize) -> impl Strategy<Value = Vec<Record>> {
    prop::collection::vec(any_record(), 0..max)
}
