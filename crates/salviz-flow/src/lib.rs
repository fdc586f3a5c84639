//! salviz flow graph
//!
//! Turns records into a three-tier flow graph (experience level → job
//! group → company size), lays it out as a Sankey diagram and answers
//! selection queries against the layout.
//!
//! # Phases
//!
//! 1. **Build**: [`FlowGraph::from_records`] collects one node per distinct
//!    category per tier and one weighted edge per non-empty rollup cell.
//! 2. **Layout**: [`layout`] assigns tier bands, proportional node heights
//!    under one global scale, and stacked edge bands at both endpoints.
//! 3. **Query**: [`FlowLayout::node_at`], [`FlowLayout::edge_at`] and
//!    [`NodeSelection`] serve the renderer's hover and brush handlers.
//!
//! Nodes are identified by their position in the node arena
//! ([`NodeIndex`]); the layout is index-aligned with the graph.
//!
//! # Example
//!
//! ```rust,ignore
//! use salviz_flow::{layout, FlowGraph, LayoutConfig, NodeSelection, Rect};
//!
//! let graph = FlowGraph::from_records(&records, CategoryOrder::FirstSeen)?;
//! let laid_out = layout(&graph, &LayoutConfig::default())?;
//! let selection = NodeSelection::from_brush(&laid_out, Some(Rect::new(0.0, 0.0, 20.0, 50.0)));
//! ```

#![warn(unreachable_pub)]

mod error;
mod geometry;
mod graph;
mod layout;
mod selection;

pub use error::FlowError;
pub use geometry::{Point, Rect};
pub use graph::{FlowEdge, FlowGraph, FlowGraphBuilder, FlowNode, NodeIndex, Tier};
pub use layout::{layout, EdgeBand, FlowLayout, LayoutConfig, LinkOrder, NodeBand, Ribbon, VerticalAlign};
pub use selection::{NodeSelection, Selection};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
