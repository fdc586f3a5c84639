//! Sankey layout
//!
//! Two passes over the node arena:
//!
//! 1. **Proportional sizing**: every node gets a height relative to the
//!    busiest node in the graph.
//! 2. **Uniform rescale**: one factor is chosen so the tallest column,
//!    padding included, exactly fills the extent; every column uses it.
//!
//! Edges are then stacked inside their endpoint nodes. Because all heights
//! share one scale, an edge is equally thick at both ends.

use crate::error::FlowError;
use crate::geometry::{Point, Rect};
use crate::graph::{FlowGraph, NodeIndex, Tier};
use serde::{Deserialize, Serialize};

/// Vertical placement of a column's stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalAlign {
    /// Stack from the top with fixed padding
    #[default]
    Top,
    /// Spread a short column's spare height evenly around its nodes
    Justify,
}

/// Stacking order of edges inside a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkOrder {
    /// Order of the graph's edge list
    #[default]
    EdgeList,
    /// By vertical position of the node at the other end (fewer crossings)
    ByOppositeNode,
}

/// Layout geometry settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Extent width
    pub width: f64,
    /// Extent height
    pub height: f64,
    /// Width of every node band
    pub node_width: f64,
    /// Vertical gap between stacked nodes
    pub node_padding: f64,
    /// Height given to nodes with no throughput
    pub min_node_height: f64,
    /// Column alignment
    pub align: VerticalAlign,
    /// Edge stacking order
    pub link_order: LinkOrder,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: 620.0,
            height: 250.0,
            node_width: 15.0,
            node_padding: 10.0,
            min_node_height: 1.0,
            align: VerticalAlign::Top,
            link_order: LinkOrder::EdgeList,
        }
    }
}

impl LayoutConfig {
    /// With a different extent
    #[inline]
    #[must_use]
    pub fn with_extent(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// With a different node width
    #[inline]
    #[must_use]
    pub fn with_node_width(mut self, node_width: f64) -> Self {
        self.node_width = node_width;
        self
    }

    /// With a different node padding
    #[inline]
    #[must_use]
    pub fn with_node_padding(mut self, node_padding: f64) -> Self {
        self.node_padding = node_padding;
        self
    }

    /// With a different column alignment
    #[inline]
    #[must_use]
    pub fn with_align(mut self, align: VerticalAlign) -> Self {
        self.align = align;
        self
    }

    /// With a different edge stacking order
    #[inline]
    #[must_use]
    pub fn with_link_order(mut self, link_order: LinkOrder) -> Self {
        self.link_order = link_order;
        self
    }

    /// Check the geometry is usable
    ///
    /// # Errors
    /// [`FlowError::InvalidLayout`] for non-finite values, a non-positive
    /// extent or node width, negative padding or minimum height, or an
    /// extent too narrow for the columns to stay apart.
    pub fn validate(&self) -> Result<(), FlowError> {
        let values = [
            self.width,
            self.height,
            self.node_width,
            self.node_padding,
            self.min_node_height,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(FlowError::InvalidLayout("values must be finite".into()));
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(FlowError::InvalidLayout("extent must be positive".into()));
        }
        if self.node_width <= 0.0 {
            return Err(FlowError::InvalidLayout("node width must be positive".into()));
        }
        if self.node_padding < 0.0 || self.min_node_height < 0.0 {
            return Err(FlowError::InvalidLayout(
                "padding and minimum height must not be negative".into(),
            ));
        }
        if self.width < self.node_width * column_count() {
            return Err(FlowError::InvalidLayout(format!(
                "width {} cannot fit {} columns of width {}",
                self.width,
                Tier::COUNT,
                self.node_width
            )));
        }
        Ok(())
    }
}

#[allow(clippy::cast_precision_loss)]
fn column_count() -> f64 {
    Tier::COUNT as f64
}

/// A node's rectangle
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct NodeBand {
    /// Left edge
    pub x0: f64,
    /// Right edge
    pub x1: f64,
    /// Top edge
    pub y0: f64,
    /// Bottom edge
    pub y1: f64,
}

impl NodeBand {
    /// Band height
    #[inline]
    #[must_use]
    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    /// Band as a rectangle
    #[inline]
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x0, self.y0, self.x1, self.y1)
    }
}

/// Centre line of an edge ribbon
///
/// A horizontal cubic curve from the source band's right side to the
/// target band's left side, with both control points at the midpoint x.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Ribbon {
    /// Start x (source node's right edge)
    pub x0: f64,
    /// Start y (centre of the source sub-band)
    pub y0: f64,
    /// End x (target node's left edge)
    pub x1: f64,
    /// End y (centre of the target sub-band)
    pub y1: f64,
}

impl Ribbon {
    /// Bezier control polygon: start, two controls, end
    #[must_use]
    pub fn control_points(&self) -> [Point; 4] {
        let mid = (self.x0 + self.x1) / 2.0;
        [
            Point::new(self.x0, self.y0),
            Point::new(mid, self.y0),
            Point::new(mid, self.y1),
            Point::new(self.x1, self.y1),
        ]
    }

    /// Centre-line y at horizontal position `x`, if within the ribbon
    #[must_use]
    pub fn centre_y_at(&self, x: f64) -> Option<f64> {
        if x < self.x0 || x > self.x1 {
            return None;
        }
        let span = self.x1 - self.x0;
        if span <= 0.0 {
            return Some(self.y0);
        }
        // x(t) is monotonic: (x - x0) / span = 1.5t(1 - t) + t^3
        let target = (x - self.x0) / span;
        let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
        for _ in 0..48 {
            let t = (lo + hi) / 2.0;
            if 1.5 * t * (1.0 - t) + t * t * t < target {
                lo = t;
            } else {
                hi = t;
            }
        }
        let t = (lo + hi) / 2.0;
        Some(self.y0 + (self.y1 - self.y0) * (3.0 * t * t - 2.0 * t * t * t))
    }
}

/// An edge's sub-bands at both endpoints
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct EdgeBand {
    /// Top of the sub-band inside the source node
    pub source_y0: f64,
    /// Bottom of the sub-band inside the source node
    pub source_y1: f64,
    /// Top of the sub-band inside the target node
    pub target_y0: f64,
    /// Bottom of the sub-band inside the target node
    pub target_y1: f64,
    /// Ribbon thickness
    pub width: f64,
    /// Ribbon centre line
    pub ribbon: Ribbon,
}

/// Laid-out graph, index-aligned with its [`FlowGraph`]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FlowLayout {
    nodes: Vec<NodeBand>,
    edges: Vec<EdgeBand>,
    scale: f64,
    extent: Rect,
}

impl FlowLayout {
    /// Node bands, by node index
    #[inline]
    #[must_use]
    pub fn nodes(&self) -> &[NodeBand] {
        &self.nodes
    }

    /// Edge bands, by edge index
    #[inline]
    #[must_use]
    pub fn edges(&self) -> &[EdgeBand] {
        &self.edges
    }

    /// Band of one node
    #[inline]
    #[must_use]
    pub fn node(&self, index: NodeIndex) -> Option<&NodeBand> {
        self.nodes.get(index.0)
    }

    /// Layout units per record
    #[inline]
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// The area the layout was fitted to
    #[inline]
    #[must_use]
    pub fn extent(&self) -> Rect {
        self.extent
    }

    /// First node whose band contains `point`
    #[must_use]
    pub fn node_at(&self, point: Point) -> Option<NodeIndex> {
        self.nodes
            .iter()
            .position(|band| band.rect().contains(point))
            .map(NodeIndex)
    }

    /// First edge whose ribbon covers `point`
    ///
    /// Ribbons thinner than one unit are hit-tested as one unit thick.
    #[must_use]
    pub fn edge_at(&self, point: Point) -> Option<usize> {
        self.edges.iter().position(|edge| {
            edge.ribbon
                .centre_y_at(point.x)
                .is_some_and(|y| (point.y - y).abs() <= edge.width.max(1.0) / 2.0)
        })
    }
}

/// Lay out a flow graph inside `config`'s extent
///
/// # Errors
/// Invalid configuration or a structurally invalid graph.
pub fn layout(graph: &FlowGraph, config: &LayoutConfig) -> Result<FlowLayout, FlowError> {
    config.validate()?;
    graph.validate()?;

    let columns: Vec<Vec<NodeIndex>> = Tier::ALL
        .iter()
        .map(|tier| graph.tier_nodes(*tier).collect())
        .collect();

    let spacing = Spacing::fitted(&columns, config);
    let max_throughput = graph.nodes().iter().map(|n| n.throughput).max().unwrap_or(0);
    let relative = relative_heights(graph, max_throughput);
    let fit = fit_factor(graph, &columns, &relative, spacing, config.height);

    let mut nodes = vec![NodeBand::default(); graph.node_count()];
    for (tier, column) in Tier::ALL.iter().zip(&columns) {
        place_column(*tier, column, graph, &relative, fit, spacing, config, &mut nodes);
    }

    let scale = if max_throughput > 0 {
        fit / as_f64(max_throughput)
    } else {
        0.0
    };
    let edges = route_edges(graph, &nodes, scale, config.link_order);

    tracing::debug!(
        "Laid out {} nodes and {} edges at {:.4} units per record",
        nodes.len(),
        edges.len(),
        scale
    );

    Ok(FlowLayout {
        nodes,
        edges,
        scale,
        extent: Rect::new(0.0, 0.0, config.width, config.height),
    })
}

#[allow(clippy::cast_precision_loss)]
fn as_f64(n: usize) -> f64 {
    n as f64
}

/// Padding and minimum node height actually used for one layout
///
/// Gaps in the tallest column never take more than half the extent
/// height, and fixed-height nodes never take more than the other half.
/// Any column holding flow then always has height left to scale into.
#[derive(Debug, Clone, Copy)]
struct Spacing {
    padding: f64,
    min_height: f64,
}

impl Spacing {
    fn fitted(columns: &[Vec<NodeIndex>], config: &LayoutConfig) -> Self {
        let longest = columns.iter().map(Vec::len).max().unwrap_or(0);
        let half = config.height / 2.0;
        let padding = if longest > 1 {
            config.node_padding.min(half / as_f64(longest - 1))
        } else {
            config.node_padding
        };
        let min_height = if longest > 0 {
            config.min_node_height.min(half / as_f64(longest))
        } else {
            config.min_node_height
        };
        if padding < config.node_padding || min_height < config.min_node_height {
            tracing::debug!(
                "Extent height {} too small for configured spacing; using padding {:.3}, minimum height {:.3}",
                config.height,
                padding,
                min_height
            );
        }
        Self {
            padding,
            min_height,
        }
    }
}

/// Pass 1: height of each node relative to the busiest node
fn relative_heights(graph: &FlowGraph, max_throughput: usize) -> Vec<f64> {
    graph
        .nodes()
        .iter()
        .map(|n| {
            if max_throughput == 0 {
                0.0
            } else {
                as_f64(n.throughput) / as_f64(max_throughput)
            }
        })
        .collect()
}

/// Pass 2: the one factor that makes the tallest column fill the extent
///
/// Zero-throughput nodes take a fixed minimum height outside the scaled
/// part. Columns with nothing to scale do not constrain the factor.
fn fit_factor(
    graph: &FlowGraph,
    columns: &[Vec<NodeIndex>],
    relative: &[f64],
    spacing: Spacing,
    height: f64,
) -> f64 {
    let mut factor: Option<f64> = None;
    for column in columns {
        if column.is_empty() {
            continue;
        }
        let scaled: f64 = column.iter().map(|i| relative[i.0]).sum();
        if scaled <= 0.0 {
            continue;
        }
        let fixed_nodes = column
            .iter()
            .filter(|i| graph.nodes()[i.0].throughput == 0)
            .count();
        let available = height
            - as_f64(column.len() - 1) * spacing.padding
            - as_f64(fixed_nodes) * spacing.min_height;
        let candidate = available / scaled;
        factor = Some(factor.map_or(candidate, |f| f.min(candidate)));
    }
    factor.unwrap_or(0.0).max(0.0)
}

fn column_x(tier: Tier, config: &LayoutConfig) -> f64 {
    let step = (config.width - config.node_width) / (column_count() - 1.0);
    as_f64(tier.index()) * step
}

#[allow(clippy::too_many_arguments)]
fn place_column(
    tier: Tier,
    column: &[NodeIndex],
    graph: &FlowGraph,
    relative: &[f64],
    fit: f64,
    spacing: Spacing,
    config: &LayoutConfig,
    bands: &mut [NodeBand],
) {
    let x0 = column_x(tier, config);
    let mut y = 0.0;
    for index in column {
        let height = if graph.nodes()[index.0].throughput == 0 {
            spacing.min_height
        } else {
            relative[index.0] * fit
        };
        bands[index.0] = NodeBand {
            x0,
            x1: x0 + config.node_width,
            y0: y,
            y1: y + height,
        };
        y += height + spacing.padding;
    }

    if config.align == VerticalAlign::Justify && !column.is_empty() {
        let used = y - spacing.padding;
        let gap = (config.height - used) / as_f64(column.len() + 1);
        if gap > 0.0 {
            for (i, index) in column.iter().enumerate() {
                let shift = gap * as_f64(i + 1);
                let band = &mut bands[index.0];
                band.y0 += shift;
                band.y1 += shift;
            }
        }
    }
}

/// Stack each node's edges inside its band, at both ends
fn route_edges(
    graph: &FlowGraph,
    nodes: &[NodeBand],
    scale: f64,
    order: LinkOrder,
) -> Vec<EdgeBand> {
    let edges = graph.edges();
    let widths: Vec<f64> = edges.iter().map(|e| as_f64(e.value) * scale).collect();
    let mut bands = vec![EdgeBand::default(); edges.len()];

    for (i, node) in nodes.iter().enumerate() {
        let index = NodeIndex(i);

        let mut outgoing: Vec<usize> = graph.outgoing(index).collect();
        if order == LinkOrder::ByOppositeNode {
            outgoing.sort_by(|a, b| {
                nodes[edges[*a].target.0]
                    .y0
                    .total_cmp(&nodes[edges[*b].target.0].y0)
            });
        }
        let mut y = node.y0;
        for e in outgoing {
            bands[e].source_y0 = y;
            y += widths[e];
            bands[e].source_y1 = y;
        }

        let mut incoming: Vec<usize> = graph.incoming(index).collect();
        if order == LinkOrder::ByOppositeNode {
            incoming.sort_by(|a, b| {
                nodes[edges[*a].source.0]
                    .y0
                    .total_cmp(&nodes[edges[*b].source.0].y0)
            });
        }
        let mut y = node.y0;
        for e in incoming {
            bands[e].target_y0 = y;
            y += widths[e];
            bands[e].target_y1 = y;
        }
    }

    for ((band, edge), width) in bands.iter_mut().zip(edges).zip(widths) {
        band.width = width;
        band.ribbon = Ribbon {
            x0: nodes[edge.source.0].x1,
            y0: (band.source_y0 + band.source_y1) / 2.0,
            x1: nodes[edge.target.0].x0,
            y1: (band.target_y0 + band.target_y1) / 2.0,
        };
    }
    bands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::FlowGraphBuilder;
    use salviz_rollup::CategoryOrder;
    use salviz_test_utils::scenario_records;

    const EPS: f64 = 1e-9;

    fn scenario_layout(config: &LayoutConfig) -> (FlowGraph, FlowLayout) {
        let graph = FlowGraph::from_records(&scenario_records(), CategoryOrder::FirstSeen).unwrap();
        let laid_out = layout(&graph, config).unwrap();
        (graph, laid_out)
    }

    #[test]
    fn columns_sit_at_left_middle_right() {
        let (graph, laid_out) = scenario_layout(&LayoutConfig::default());
        for (node, band) in graph.nodes().iter().zip(laid_out.nodes()) {
            let expected = match node.tier {
                Tier::Experience => 0.0,
                Tier::JobGroup => 302.5,
                Tier::CompanySize => 605.0,
            };
            assert!((band.x0 - expected).abs() < EPS, "{node:?} {band:?}");
            assert!((band.x1 - band.x0 - 15.0).abs() < EPS);
        }
    }

    #[test]
    fn scenario_heights_fill_extent() {
        let (_, laid_out) = scenario_layout(&LayoutConfig::default());
        // Every column holds 2 + 1 records over two nodes: 240 units for 3.
        let bands = laid_out.nodes();
        assert!((laid_out.scale() - 80.0).abs() < EPS);
        assert!((bands[0].y0 - 0.0).abs() < EPS);
        assert!((bands[0].y1 - 160.0).abs() < EPS);
        assert!((bands[1].y0 - 170.0).abs() < EPS);
        assert!((bands[1].y1 - 250.0).abs() < EPS);
    }

    #[test]
    fn edges_are_equally_thick_at_both_ends() {
        let (_, laid_out) = scenario_layout(&LayoutConfig::default());
        for band in laid_out.edges() {
            assert!((band.source_y1 - band.source_y0 - band.width).abs() < EPS);
            assert!((band.target_y1 - band.target_y0 - band.width).abs() < EPS);
        }
        assert!((laid_out.edges()[0].width - 160.0).abs() < EPS);
    }

    #[test]
    fn tallest_column_binds_the_scale() {
        let mut builder = FlowGraphBuilder::new();
        let a = builder.add_node(Tier::Experience, "a").unwrap();
        let b = builder.add_node(Tier::Experience, "b").unwrap();
        let c = builder.add_node(Tier::Experience, "c").unwrap();
        let g = builder.add_node(Tier::JobGroup, "g").unwrap();
        let s = builder.add_node(Tier::CompanySize, "s").unwrap();
        builder.add_edge(a, g, 2).unwrap();
        builder.add_edge(b, g, 1).unwrap();
        builder.add_edge(c, g, 1).unwrap();
        builder.add_edge(g, s, 4).unwrap();
        let graph = builder.build();

        let laid_out = layout(&graph, &LayoutConfig::default()).unwrap();
        let bands = laid_out.nodes();

        // Left column: 4 records and two gaps of 10 fill 250.
        assert!((laid_out.scale() - 57.5).abs() < EPS);
        assert!((bands[c.0].y1 - 250.0).abs() < EPS);
        // 2:1 ratio within the column.
        assert!((bands[a.0].height() / bands[b.0].height() - 2.0).abs() < EPS);
        // Single-node columns use the same scale and stop short.
        assert!((bands[g.0].height() - 230.0).abs() < EPS);
        assert!((bands[s.0].height() - 230.0).abs() < EPS);
    }

    #[test]
    fn padding_shrinks_to_fit_a_short_extent() {
        let mut builder = FlowGraphBuilder::new();
        let levels: Vec<_> = ["a", "b", "c", "d", "e", "f"]
            .into_iter()
            .map(|name| builder.add_node(Tier::Experience, name).unwrap())
            .collect();
        let g = builder.add_node(Tier::JobGroup, "g").unwrap();
        for level in &levels {
            builder.add_edge(*level, g, 1).unwrap();
        }
        let graph = builder.build();

        let config = LayoutConfig::default().with_extent(620.0, 40.0);
        let laid_out = layout(&graph, &config).unwrap();
        let bands = laid_out.nodes();

        // Five gaps capped at half of 40; the other 20 units go to flow.
        for level in &levels {
            assert!((bands[level.0].height() - 20.0 / 6.0).abs() < EPS);
        }
        assert!((bands[levels[5].0].y1 - 40.0).abs() < EPS);
        assert!((bands[g.0].height() - 20.0).abs() < EPS);
    }

    #[test]
    fn justify_spreads_short_columns() {
        let mut builder = FlowGraphBuilder::new();
        let a = builder.add_node(Tier::Experience, "a").unwrap();
        let b = builder.add_node(Tier::Experience, "b").unwrap();
        let g = builder.add_node(Tier::JobGroup, "g").unwrap();
        builder.add_edge(a, g, 1).unwrap();
        builder.add_edge(b, g, 1).unwrap();
        let graph = builder.build();

        let config = LayoutConfig::default().with_align(VerticalAlign::Justify);
        let laid_out = layout(&graph, &config).unwrap();
        let bands = laid_out.nodes();

        // Left column fills exactly, so it does not move.
        assert!((bands[a.0].y0 - 0.0).abs() < EPS);
        assert!((bands[b.0].y1 - 250.0).abs() < EPS);
        // Middle column has 10 spare units, split above and below.
        assert!((bands[g.0].y0 - 5.0).abs() < EPS);
        assert!((bands[g.0].y1 - 245.0).abs() < EPS);
    }

    #[test]
    fn isolated_node_gets_minimum_height() {
        let mut builder = FlowGraphBuilder::new();
        let a = builder.add_node(Tier::Experience, "a").unwrap();
        let lonely = builder.add_node(Tier::Experience, "lonely").unwrap();
        let g = builder.add_node(Tier::JobGroup, "g").unwrap();
        builder.add_edge(a, g, 3).unwrap();
        let graph = builder.build();

        let laid_out = layout(&graph, &LayoutConfig::default()).unwrap();
        let bands = laid_out.nodes();
        assert!((bands[lonely.0].height() - 1.0).abs() < EPS);
        // 250 - 10 padding - 1 minimum height left for `a`.
        assert!((bands[a.0].height() - 239.0).abs() < EPS);
        assert!((bands[lonely.0].y1 - 250.0).abs() < EPS);
    }

    #[test]
    fn empty_graph_lays_out_to_nothing() {
        let laid_out = layout(&FlowGraph::default(), &LayoutConfig::default()).unwrap();
        assert!(laid_out.nodes().is_empty());
        assert!(laid_out.edges().is_empty());
        assert_eq!(laid_out.scale(), 0.0);
    }

    #[test]
    fn nodes_without_any_flow_are_all_minimum_height() {
        let mut builder = FlowGraphBuilder::new();
        builder.add_node(Tier::Experience, "a").unwrap();
        builder.add_node(Tier::CompanySize, "s").unwrap();
        let laid_out = layout(&builder.build(), &LayoutConfig::default()).unwrap();
        for band in laid_out.nodes() {
            assert!((band.height() - 1.0).abs() < EPS);
        }
    }

    #[test]
    fn link_order_by_opposite_node_follows_target_position() {
        let mut builder = FlowGraphBuilder::new();
        let a = builder.add_node(Tier::Experience, "a").unwrap();
        let top = builder.add_node(Tier::JobGroup, "top").unwrap();
        let bottom = builder.add_node(Tier::JobGroup, "bottom").unwrap();
        // Edge list mentions the lower target first.
        builder.add_edge(a, bottom, 1).unwrap();
        builder.add_edge(a, top, 1).unwrap();
        let graph = builder.build();

        let edge_list = layout(&graph, &LayoutConfig::default()).unwrap();
        assert!(edge_list.edges()[0].source_y0 < edge_list.edges()[1].source_y0);

        let config = LayoutConfig::default().with_link_order(LinkOrder::ByOppositeNode);
        let by_target = layout(&graph, &config).unwrap();
        assert!(by_target.edges()[1].source_y0 < by_target.edges()[0].source_y0);
    }

    #[test]
    fn ribbon_centre_line_is_monotonic_between_endpoints() {
        let ribbon = Ribbon { x0: 0.0, y0: 10.0, x1: 100.0, y1: 50.0 };
        assert_eq!(ribbon.centre_y_at(-1.0), None);
        assert!((ribbon.centre_y_at(0.0).unwrap() - 10.0).abs() < 1e-6);
        assert!((ribbon.centre_y_at(50.0).unwrap() - 30.0).abs() < 1e-6);
        assert!((ribbon.centre_y_at(100.0).unwrap() - 50.0).abs() < 1e-6);
        let mut last = f64::NEG_INFINITY;
        for step in 0..=20 {
            let y = ribbon.centre_y_at(f64::from(step) * 5.0).unwrap();
            assert!(y >= last);
            last = y;
        }
        let points = ribbon.control_points();
        assert_eq!(points[1], Point::new(50.0, 10.0));
        assert_eq!(points[2], Point::new(50.0, 50.0));
    }

    #[test]
    fn hover_queries() {
        let (graph, laid_out) = scenario_layout(&LayoutConfig::default());
        let en = graph.find(Tier::Experience, "EN").unwrap();
        assert_eq!(laid_out.node_at(Point::new(5.0, 80.0)), Some(en));
        assert_eq!(laid_out.node_at(Point::new(5.0, 165.0)), None);

        // Between columns, on the EN → Analyst ribbon (centre y 80).
        assert_eq!(laid_out.edge_at(Point::new(100.0, 80.0)), Some(0));
        assert_eq!(laid_out.edge_at(Point::new(100.0, 249.0)), Some(1));
    }

    #[test]
    fn config_validation() {
        assert!(LayoutConfig::default().validate().is_ok());
        let bad = [
            LayoutConfig::default().with_extent(0.0, 10.0),
            LayoutConfig::default().with_extent(10.0, f64::NAN),
            LayoutConfig::default().with_node_width(0.0),
            LayoutConfig::default().with_node_padding(-1.0),
            LayoutConfig::default().with_extent(40.0, 100.0),
        ];
        for config in bad {
            assert!(matches!(
                layout(&FlowGraph::default(), &config),
                Err(FlowError::InvalidLayout(_))
            ));
        }
    }
}
