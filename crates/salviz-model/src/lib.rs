//! salviz record model
//!
//! Typed employment records and the pieces that produce them.
//!
//! # Core Concepts
//!
//! - [`Record`]: one immutable employment observation
//! - [`ExperienceLevel`], [`CompanySize`], [`JobGroup`]: categorical attributes
//! - [`Category`]: common naming for anything a chart groups by
//! - [`classify`]: maps a free-text job title onto a [`JobGroup`]
//! - [`loader`]: reads delimited text into records, reporting rejected rows
//!
//! # Example
//!
//! ```rust,ignore
//! use salviz_model::{classify, loader, JobGroup};
//!
//! let report = loader::load_path("ds_salaries.csv")?;
//! println!("{} records, {} rejected", report.records.len(), report.rejected.len());
//!
//! assert_eq!(classify("Data Analyst"), JobGroup::Analyst);
//! ```

#![warn(unreachable_pub)]

mod error;
mod job_group;
pub mod loader;
mod record;

pub use error::{LoadError, RecordError, RowRejection};
pub use job_group::{classify, JobGroup, JOB_GROUP_MAPPING};
pub use loader::LoadReport;
pub use record::{Category, CompanySize, ExperienceLevel, Record};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
