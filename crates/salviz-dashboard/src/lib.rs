//! salviz dashboard
//!
//! Wires the loader, rollups and flow layout into one [`Dashboard`] and
//! exposes it to renderers as a serializable [`DashboardView`].
//!
//! # Core Concepts
//!
//! - [`DashboardConfig`]: layout geometry and category ordering, from TOML
//! - [`Dashboard`]: bar, pie and Sankey data derived from one record set
//! - [`DashboardView`]: flat renderer contract with selection fading applied
//!
//! # Example
//!
//! ```rust,ignore
//! use salviz_dashboard::{Dashboard, DashboardConfig};
//!
//! let config = DashboardConfig::load("salviz.toml")?;
//! let dashboard = Dashboard::load("ds_salaries.csv", &config)?;
//! println!("{dashboard}");
//! let json = dashboard.to_json(true)?;
//! ```

#![warn(unreachable_pub)]

mod config;
mod contract;
mod error;
mod pipeline;
pub mod telemetry;

pub use config::DashboardConfig;
pub use contract::{BarView, DashboardView, EdgeView, NodeView, PieView, SankeyView};
pub use error::{ConfigError, DashboardError};
pub use pipeline::{BarSelection, Dashboard};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
