//! salviz rollup engine
//!
//! Groups records by categorical keys and reduces each group to a single
//! value, then shapes the results into chart data.
//!
//! # Core Concepts
//!
//! - [`rollup`] / [`rollup2`]: one- and two-key grouping, first-seen key order
//! - [`Reducer`]: what a group collapses to ([`Count`], [`Mean`], [`MeanSalary`])
//! - [`AggregateBucket`]: flattened `(key, value)` pair for renderers
//! - [`bar_data`] / [`PieData`]: the two summary charts
//!
//! # Example
//!
//! ```rust,ignore
//! use salviz_rollup::{rollup, Count, MeanSalary};
//!
//! let counts = rollup(&records, |r| r.experience_level(), &Count);
//! let means = rollup(&records, |r| r.company_size().clone(), &MeanSalary);
//! ```

#![warn(unreachable_pub)]

mod charts;
mod engine;
mod reducer;

pub use charts::{bar_data, BarDatum, PieData, PieSlice};
pub use engine::{buckets, rollup, rollup2, AggregateBucket, CategoryOrder};
pub use reducer::{Count, Mean, MeanSalary, Reducer};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
