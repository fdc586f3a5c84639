//! Renderer contract
//!
//! Flat, serializable views of everything the dashboard draws. Each view
//! carries a `faded` flag resolved against the current selections so the
//! renderer does no lookups of its own.

use salviz_flow::{NodeIndex, Point, Tier};
use salviz_model::{CompanySize, ExperienceLevel};
use serde::Serialize;

/// Complete dashboard state for one render
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    /// Records that made it into the charts
    pub records: usize,
    /// Input rows excluded by the loader
    pub rejected: usize,
    /// Bars, ascending by mean salary
    pub bar: Vec<BarView>,
    /// Donut slices in rollup order
    pub pie: Vec<PieView>,
    /// Laid-out Sankey diagram
    pub sankey: SankeyView,
}

/// One bar
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarView {
    /// Experience level code
    pub category: ExperienceLevel,
    /// Tooltip text
    pub description: &'static str,
    /// Mean salary in USD
    pub mean_value: f64,
    /// Drawn highlighted
    pub selected: bool,
    /// Drawn dimmed
    pub faded: bool,
}

/// One donut slice
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieView {
    /// Company size code
    pub category: CompanySize,
    /// Mean salary in USD
    pub mean_value: f64,
    /// Start angle in radians
    pub start_angle: f64,
    /// End angle in radians
    pub end_angle: f64,
    /// Share of the summed means, in percent
    pub percentage: f64,
}

/// Sankey diagram
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SankeyView {
    /// Extent width
    pub width: f64,
    /// Extent height
    pub height: f64,
    /// Nodes by index
    pub nodes: Vec<NodeView>,
    /// Edges by index
    pub edges: Vec<EdgeView>,
    /// Labels used as nodes in more than one tier
    pub name_collisions: Vec<String>,
}

/// A laid-out node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeView {
    /// Node identity
    pub index: NodeIndex,
    /// Display label
    pub name: String,
    /// Column
    pub tier: Tier,
    /// Records passing through
    pub throughput: usize,
    /// Left edge
    pub x0: f64,
    /// Right edge
    pub x1: f64,
    /// Top edge
    pub y0: f64,
    /// Bottom edge
    pub y1: f64,
    /// Drawn dimmed
    pub faded: bool,
}

/// A laid-out edge
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeView {
    /// Position in the edge list
    pub index: usize,
    /// Source node
    pub source: NodeIndex,
    /// Target node
    pub target: NodeIndex,
    /// Records carried
    pub value: usize,
    /// Stroke width
    pub width: f64,
    /// Sub-band top at the source
    pub source_y0: f64,
    /// Sub-band bottom at the source
    pub source_y1: f64,
    /// Sub-band top at the target
    pub target_y0: f64,
    /// Sub-band bottom at the target
    pub target_y1: f64,
    /// Centre-line bezier: start, two controls, end
    pub path: [Point; 4],
    /// Drawn dimmed
    pub faded: bool,
}
