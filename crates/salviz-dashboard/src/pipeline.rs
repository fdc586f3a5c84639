//! Pipeline assembly
//!
//! Records go in once; bar data, pie data, the flow graph and its layout
//! come out together and stay consistent with one another.

use crate::config::DashboardConfig;
use crate::contract::{BarView, DashboardView, EdgeView, NodeView, PieView, SankeyView};
use crate::error::DashboardError;
use salviz_flow::{layout, FlowGraph, FlowLayout, NodeIndex, NodeSelection, Rect, Selection};
use salviz_model::{loader, ExperienceLevel, Record, RowRejection};
use salviz_rollup::{bar_data, BarDatum, PieData};
use std::fmt;
use std::path::Path;

/// Bars picked by clicking
pub type BarSelection = Selection<ExperienceLevel>;

/// Everything the dashboard renders, derived from one record set
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    records: usize,
    rejected: Vec<RowRejection>,
    bar: Vec<BarDatum>,
    pie: PieData,
    graph: FlowGraph,
    layout: FlowLayout,
}

impl Dashboard {
    /// Derive all chart data from in-memory records
    ///
    /// # Errors
    /// Invalid configuration or a layout failure.
    pub fn build(records: &[Record], config: &DashboardConfig) -> Result<Self, DashboardError> {
        config.validate()?;
        let order = config.category_order;

        let bar = bar_data(records, order);
        let pie = PieData::from_records(records, order);
        let graph = FlowGraph::from_records(records, order)?;
        let layout = layout(&graph, &config.sankey)?;

        tracing::info!(
            "Built dashboard: {} records, {} bars, {} slices, {} nodes, {} edges",
            records.len(),
            bar.len(),
            pie.slices().len(),
            graph.node_count(),
            graph.edge_count()
        );

        Ok(Self {
            records: records.len(),
            rejected: Vec::new(),
            bar,
            pie,
            graph,
            layout,
        })
    }

    /// Load a CSV file and derive all chart data from it
    ///
    /// Rejected rows are kept for reporting; they never abort the load.
    ///
    /// # Errors
    /// Unreadable input, a missing required column, or any
    /// [`Dashboard::build`] error.
    pub fn load(path: impl AsRef<Path>, config: &DashboardConfig) -> Result<Self, DashboardError> {
        let report = loader::load_path(path)?;
        let mut dashboard = Self::build(&report.records, config)?;
        dashboard.rejected = report.rejected;
        Ok(dashboard)
    }

    /// Number of records charted
    #[inline]
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.records
    }

    /// Rows the loader excluded
    #[inline]
    #[must_use]
    pub fn rejected(&self) -> &[RowRejection] {
        &self.rejected
    }

    /// Bar chart data
    #[inline]
    #[must_use]
    pub fn bar(&self) -> &[BarDatum] {
        &self.bar
    }

    /// Donut chart data
    #[inline]
    #[must_use]
    pub fn pie(&self) -> &PieData {
        &self.pie
    }

    /// Flow graph
    #[inline]
    #[must_use]
    pub fn graph(&self) -> &FlowGraph {
        &self.graph
    }

    /// Sankey layout
    #[inline]
    #[must_use]
    pub fn layout(&self) -> &FlowLayout {
        &self.layout
    }

    /// Nodes selected by a brush rectangle
    #[must_use]
    pub fn brush(&self, rect: Option<Rect>) -> NodeSelection {
        NodeSelection::from_brush(&self.layout, rect)
    }

    /// Renderer view under the given selections
    #[must_use]
    pub fn view(&self, bars: &BarSelection, nodes: &NodeSelection) -> DashboardView {
        let bar = self
            .bar
            .iter()
            .map(|b| BarView {
                category: b.category,
                description: b.description,
                mean_value: b.mean_value,
                selected: bars.is_selected(&b.category),
                faded: bars.is_faded(&b.category),
            })
            .collect();

        let pie = self
            .pie
            .slices()
            .iter()
            .map(|s| PieView {
                category: s.category.clone(),
                mean_value: s.mean_value,
                start_angle: s.start_angle,
                end_angle: s.end_angle,
                percentage: self.pie.percentage(&s.category).unwrap_or(0.0),
            })
            .collect();

        let node_views = self
            .graph
            .nodes()
            .iter()
            .zip(self.layout.nodes())
            .enumerate()
            .map(|(i, (node, band))| {
                let index = NodeIndex(i);
                NodeView {
                    index,
                    name: node.name.clone(),
                    tier: node.tier,
                    throughput: node.throughput,
                    x0: band.x0,
                    x1: band.x1,
                    y0: band.y0,
                    y1: band.y1,
                    faded: nodes.is_faded(&index),
                }
            })
            .collect();

        let edge_views = self
            .graph
            .edges()
            .iter()
            .zip(self.layout.edges())
            .enumerate()
            .map(|(index, (edge, band))| EdgeView {
                index,
                source: edge.source,
                target: edge.target,
                value: edge.value,
                width: band.width,
                source_y0: band.source_y0,
                source_y1: band.source_y1,
                target_y0: band.target_y0,
                target_y1: band.target_y1,
                path: band.ribbon.control_points(),
                faded: nodes.is_edge_faded(edge),
            })
            .collect();

        let extent = self.layout.extent();
        DashboardView {
            records: self.records,
            rejected: self.rejected.len(),
            bar,
            pie,
            sankey: SankeyView {
                width: extent.width(),
                height: extent.height(),
                nodes: node_views,
                edges: edge_views,
                name_collisions: self
                    .graph
                    .name_collisions()
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
            },
        }
    }

    /// Renderer view with nothing selected, as JSON
    ///
    /// # Errors
    /// Serialization failure.
    pub fn to_json(&self, pretty: bool) -> Result<String, DashboardError> {
        let view = self.view(&BarSelection::new(), &NodeSelection::new());
        let json = if pretty {
            serde_json::to_string_pretty(&view)?
        } else {
            serde_json::to_string(&view)?
        };
        Ok(json)
    }
}

impl fmt::Display for Dashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Records: {} ({} rejected)", self.records, self.rejected.len())?;

        writeln!(f, "\nMean salary by experience level:")?;
        for bar in &self.bar {
            writeln!(
                f,
                "  {:<3}{:<28}{:>12.2}",
                bar.category.code(),
                bar.description,
                bar.mean_value
            )?;
        }

        writeln!(f, "\nMean salary by company size:")?;
        for slice in self.pie.slices() {
            let share = self.pie.percentage(&slice.category).unwrap_or(0.0);
            writeln!(
                f,
                "  {:<4}{:>12.2}  {:>5.1}%",
                slice.category.code(),
                slice.mean_value,
                share
            )?;
        }

        writeln!(
            f,
            "\nFlow: {} nodes, {} edges",
            self.graph.node_count(),
            self.graph.edge_count()
        )?;
        for edge in self.graph.edges() {
            let source = &self.graph.nodes()[edge.source.0];
            let target = &self.graph.nodes()[edge.target.0];
            writeln!(f, "  {} -> {}: {}", source.name, target.name, edge.value)?;
        }
        for name in self.graph.name_collisions() {
            writeln!(f, "  note: `{name}` appears in more than one tier")?;
        }
        Ok(())
    }
}
