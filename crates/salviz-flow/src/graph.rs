//! Flow graph construction
//!
//! Nodes live in a single arena ordered tier by tier; an edge refers to its
//! endpoints by arena position. Lookups by name are always scoped to a
//! tier, so a company size and a job group sharing a label stay distinct.

use crate::error::FlowError;
use indexmap::IndexMap;
use salviz_model::{classify, Category, Record};
use salviz_rollup::{rollup, rollup2, CategoryOrder, Count};
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// One of the three fixed stages of the flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Tier {
    /// Experience level (left)
    Experience = 0,
    /// Job-title group (middle)
    JobGroup = 1,
    /// Company size (right)
    CompanySize = 2,
}

impl Tier {
    /// All tiers, left to right
    pub const ALL: [Self; 3] = [Self::Experience, Self::JobGroup, Self::CompanySize];

    /// Number of tiers
    pub const COUNT: usize = Self::ALL.len();

    /// Column position, 0 to 2
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The tier to the right, if any
    #[inline]
    #[must_use]
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Experience => Some(Self::JobGroup),
            Self::JobGroup => Some(Self::CompanySize),
            Self::CompanySize => None,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Experience => "experience",
            Self::JobGroup => "job group",
            Self::CompanySize => "company size",
        })
    }
}

impl Serialize for Tier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

/// Position of a node in the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct NodeIndex(pub usize);

impl fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A category value in one tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlowNode {
    /// Category label
    pub name: String,
    /// Tier the node belongs to
    pub tier: Tier,
    /// Records flowing through the node
    pub throughput: usize,
}

/// Weighted connection from a tier-N node to a tier-(N+1) node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FlowEdge {
    /// Left endpoint
    pub source: NodeIndex,
    /// Right endpoint
    pub target: NodeIndex,
    /// Number of records taking this path
    pub value: usize,
}

/// Nodes and edges of the Sankey diagram
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FlowGraph {
    nodes: Vec<FlowNode>,
    edges: Vec<FlowEdge>,
}

impl FlowGraph {
    /// Build the three-tier graph from records
    ///
    /// Distinct categories of each tier become nodes in `order`; each
    /// non-empty cell of the experience→group and group→size rollups
    /// becomes an edge.
    ///
    /// # Errors
    /// Only if the graph would violate its own structural invariants,
    /// which well-formed records never trigger.
    pub fn from_records(records: &[Record], order: CategoryOrder) -> Result<Self, FlowError> {
        let job_group = |r: &Record| classify(r.job_title());
        let company_size = |r: &Record| r.company_size().clone();

        let mut levels = rollup(records, Record::experience_level, &Count);
        let mut groups = rollup(records, job_group, &Count);
        let mut sizes = rollup(records, company_size, &Count);
        order.apply(&mut levels);
        order.apply(&mut groups);
        order.apply(&mut sizes);

        let mut builder = FlowGraphBuilder::new();
        builder.add_nodes(Tier::Experience, levels.keys())?;
        builder.add_nodes(Tier::JobGroup, groups.keys())?;
        builder.add_nodes(Tier::CompanySize, sizes.keys())?;

        let mut level_to_group = rollup2(records, Record::experience_level, job_group, &Count);
        let mut group_to_size = rollup2(records, job_group, company_size, &Count);
        order_cells(&mut level_to_group, order);
        order_cells(&mut group_to_size, order);

        builder.add_transition(Tier::Experience, Tier::JobGroup, &level_to_group)?;
        builder.add_transition(Tier::JobGroup, Tier::CompanySize, &group_to_size)?;

        let graph = builder.build();
        for name in graph.name_collisions() {
            tracing::warn!("Category `{}` appears in more than one tier", name);
        }
        tracing::info!(
            "Built flow graph: {} nodes, {} edges",
            graph.node_count(),
            graph.edge_count()
        );
        Ok(graph)
    }

    /// Node arena
    #[inline]
    #[must_use]
    pub fn nodes(&self) -> &[FlowNode] {
        &self.nodes
    }

    /// Edges in construction order
    #[inline]
    #[must_use]
    pub fn edges(&self) -> &[FlowEdge] {
        &self.edges
    }

    /// Node at an index
    #[inline]
    #[must_use]
    pub fn node(&self, index: NodeIndex) -> Option<&FlowNode> {
        self.nodes.get(index.0)
    }

    /// Number of nodes
    #[inline]
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges
    #[inline]
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// True if there are no nodes
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Find a node by tier and label
    #[must_use]
    pub fn find(&self, tier: Tier, name: &str) -> Option<NodeIndex> {
        self.nodes
            .iter()
            .position(|n| n.tier == tier && n.name == name)
            .map(NodeIndex)
    }

    /// Indices of a tier's nodes, in arena order
    pub fn tier_nodes(&self, tier: Tier) -> impl Iterator<Item = NodeIndex> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(move |(_, n)| n.tier == tier)
            .map(|(i, _)| NodeIndex(i))
    }

    /// Indices of edges leaving a node, in edge order
    pub fn outgoing(&self, node: NodeIndex) -> impl Iterator<Item = usize> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter(move |(_, e)| e.source == node)
            .map(|(i, _)| i)
    }

    /// Indices of edges entering a node, in edge order
    pub fn incoming(&self, node: NodeIndex) -> impl Iterator<Item = usize> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter(move |(_, e)| e.target == node)
            .map(|(i, _)| i)
    }

    /// Labels used by nodes in more than one tier, in arena order
    #[must_use]
    pub fn name_collisions(&self) -> Vec<&str> {
        let mut first_tier: HashMap<&str, Tier> = HashMap::new();
        let mut collisions = Vec::new();
        for node in &self.nodes {
            let tier = *first_tier.entry(node.name.as_str()).or_insert(node.tier);
            if tier != node.tier && !collisions.contains(&node.name.as_str()) {
                collisions.push(node.name.as_str());
            }
        }
        collisions
    }

    /// Check structural invariants
    ///
    /// # Errors
    /// Returns the first edge that references a missing node or does not
    /// connect a tier to the next one.
    pub fn validate(&self) -> Result<(), FlowError> {
        for edge in &self.edges {
            check_edge(&self.nodes, edge.source, edge.target)?;
        }
        Ok(())
    }
}

fn check_edge(nodes: &[FlowNode], source: NodeIndex, target: NodeIndex) -> Result<(), FlowError> {
    let from = nodes
        .get(source.0)
        .ok_or(FlowError::NodeOutOfRange(source.0))?;
    let to = nodes
        .get(target.0)
        .ok_or(FlowError::NodeOutOfRange(target.0))?;
    if from.tier.next() != Some(to.tier) {
        return Err(FlowError::NonAdjacentTiers {
            from: source.0,
            to: target.0,
        });
    }
    Ok(())
}

fn order_cells<K1: Category, K2: Category>(
    cells: &mut IndexMap<K1, IndexMap<K2, usize>>,
    order: CategoryOrder,
) {
    order.apply(cells);
    for inner in cells.values_mut() {
        order.apply(inner);
    }
}

/// Incremental construction of a [`FlowGraph`]
///
/// Usage:
/// ```rust,ignore
/// let mut builder = FlowGraphBuilder::new();
/// let se = builder.add_node(Tier::Experience, "SE")?;
/// let sci = builder.add_node(Tier::JobGroup, "Scientist")?;
/// builder.add_edge(se, sci, 3)?;
/// let graph = builder.build();
/// ```
#[derive(Debug, Default)]
pub struct FlowGraphBuilder {
    nodes: Vec<FlowNode>,
    edges: Vec<FlowEdge>,
    lookup: HashMap<(Tier, String), NodeIndex>,
}

impl FlowGraphBuilder {
    /// Create an empty builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node to the arena
    ///
    /// # Errors
    /// [`FlowError::DuplicateNode`] if the tier already has this label.
    pub fn add_node(&mut self, tier: Tier, name: &str) -> Result<NodeIndex, FlowError> {
        let key = (tier, name.to_string());
        if self.lookup.contains_key(&key) {
            return Err(FlowError::DuplicateNode {
                tier,
                name: name.to_string(),
            });
        }
        let index = NodeIndex(self.nodes.len());
        self.nodes.push(FlowNode {
            name: name.to_string(),
            tier,
            throughput: 0,
        });
        self.lookup.insert(key, index);
        Ok(index)
    }

    fn add_nodes<'a, K: Category + 'a>(
        &mut self,
        tier: Tier,
        categories: impl IntoIterator<Item = &'a K>,
    ) -> Result<(), FlowError> {
        for category in categories {
            self.add_node(tier, category.label())?;
        }
        Ok(())
    }

    /// Look up a node by tier and label
    ///
    /// # Errors
    /// [`FlowError::UnknownNode`] if no such node was added.
    pub fn node(&self, tier: Tier, name: &str) -> Result<NodeIndex, FlowError> {
        self.lookup
            .get(&(tier, name.to_string()))
            .copied()
            .ok_or_else(|| FlowError::UnknownNode {
                tier,
                name: name.to_string(),
            })
    }

    /// Append an edge
    ///
    /// # Errors
    /// Rejects unknown indices and edges that do not go from one tier to
    /// the next.
    pub fn add_edge(
        &mut self,
        source: NodeIndex,
        target: NodeIndex,
        value: usize,
    ) -> Result<(), FlowError> {
        check_edge(&self.nodes, source, target)?;
        self.edges.push(FlowEdge {
            source,
            target,
            value,
        });
        Ok(())
    }

    fn add_transition<K1: Category, K2: Category>(
        &mut self,
        from: Tier,
        to: Tier,
        cells: &IndexMap<K1, IndexMap<K2, usize>>,
    ) -> Result<(), FlowError> {
        for (source, row) in cells {
            let source = self.node(from, source.label())?;
            for (target, count) in row {
                let target = self.node(to, target.label())?;
                self.add_edge(source, target, *count)?;
            }
        }
        Ok(())
    }

    /// Finish construction and compute node throughput
    ///
    /// Throughput is the larger of a node's inflow and outflow, which is
    /// the outflow for the first tier, the inflow for the last, and
    /// either for the middle tier when the records partition cleanly.
    #[must_use]
    pub fn build(self) -> FlowGraph {
        let Self {
            mut nodes, edges, ..
        } = self;

        let mut inflow = vec![0usize; nodes.len()];
        let mut outflow = vec![0usize; nodes.len()];
        for edge in &edges {
            outflow[edge.source.0] += edge.value;
            inflow[edge.target.0] += edge.value;
        }
        for ((node, inn), out) in nodes.iter_mut().zip(inflow).zip(outflow) {
            node.throughput = inn.max(out);
        }

        FlowGraph { nodes, edges }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use salviz_test_utils::{mixed_records, record, scenario_records};

    fn edge_names(graph: &FlowGraph) -> Vec<(String, String, usize)> {
        graph
            .edges()
            .iter()
            .map(|e| {
                (
                    graph.nodes()[e.source.0].name.clone(),
                    graph.nodes()[e.target.0].name.clone(),
                    e.value,
                )
            })
            .collect()
    }

    #[test]
    fn scenario_graph() {
        let graph = FlowGraph::from_records(&scenario_records(), CategoryOrder::FirstSeen).unwrap();

        let names: Vec<_> = graph.nodes().iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["EN", "SE", "Analyst", "Scientist", "S", "M"]);
        assert_eq!(
            edge_names(&graph),
            vec![
                ("EN".into(), "Analyst".into(), 2),
                ("SE".into(), "Scientist".into(), 1),
                ("Analyst".into(), "S".into(), 2),
                ("Scientist".into(), "M".into(), 1),
            ]
        );
        let throughput: Vec<_> = graph.nodes().iter().map(|n| n.throughput).collect();
        assert_eq!(throughput, vec![2, 1, 2, 1, 2, 1]);
        assert!(graph.validate().is_ok());
    }

    #[test]
    fn tiers_are_contiguous_in_arena() {
        let graph = FlowGraph::from_records(&mixed_records(), CategoryOrder::FirstSeen).unwrap();
        let tiers: Vec<_> = graph.nodes().iter().map(|n| n.tier.index()).collect();
        let mut sorted = tiers.clone();
        sorted.sort_unstable();
        assert_eq!(tiers, sorted);
        assert_eq!(graph.tier_nodes(Tier::Experience).count(), 4);
        assert_eq!(graph.tier_nodes(Tier::JobGroup).count(), 6);
        assert_eq!(graph.tier_nodes(Tier::CompanySize).count(), 3);
    }

    #[test]
    fn sorted_order_sorts_each_tier() {
        let graph = FlowGraph::from_records(&mixed_records(), CategoryOrder::Sorted).unwrap();
        let groups: Vec<_> = graph
            .tier_nodes(Tier::JobGroup)
            .map(|i| graph.nodes()[i.0].name.as_str())
            .collect();
        assert_eq!(
            groups,
            vec!["Analyst", "Consultant", "Engineer", "Manager", "Other", "Scientist"]
        );
    }

    #[test]
    fn colliding_labels_stay_distinct() {
        // A dataset-defined company size spelled like a job group.
        let recs = vec![record("MI", "Analyst", "Data Analyst", 1.0)];
        let graph = FlowGraph::from_records(&recs, CategoryOrder::FirstSeen).unwrap();

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.name_collisions(), vec!["Analyst"]);
        let group = graph.find(Tier::JobGroup, "Analyst").unwrap();
        let size = graph.find(Tier::CompanySize, "Analyst").unwrap();
        assert_ne!(group, size);
        assert_eq!(graph.edges()[1].source, group);
        assert_eq!(graph.edges()[1].target, size);
    }

    #[test]
    fn empty_records_give_empty_graph() {
        let graph = FlowGraph::from_records(&[], CategoryOrder::FirstSeen).unwrap();
        assert!(graph.is_empty());
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn builder_rejects_bad_edges() {
        let mut builder = FlowGraphBuilder::new();
        let exp = builder.add_node(Tier::Experience, "SE").unwrap();
        let group = builder.add_node(Tier::JobGroup, "Engineer").unwrap();
        let size = builder.add_node(Tier::CompanySize, "L").unwrap();

        assert_eq!(
            builder.add_edge(exp, size, 1),
            Err(FlowError::NonAdjacentTiers { from: 0, to: 2 })
        );
        assert_eq!(
            builder.add_edge(group, exp, 1),
            Err(FlowError::NonAdjacentTiers { from: 1, to: 0 })
        );
        assert_eq!(
            builder.add_edge(exp, NodeIndex(9), 1),
            Err(FlowError::NodeOutOfRange(9))
        );
        assert!(matches!(
            builder.add_node(Tier::Experience, "SE"),
            Err(FlowError::DuplicateNode { .. })
        ));
        assert!(matches!(
            builder.node(Tier::JobGroup, "SE"),
            Err(FlowError::UnknownNode { .. })
        ));
    }

    #[test]
    fn builder_throughput_uses_larger_side() {
        let mut builder = FlowGraphBuilder::new();
        let a = builder.add_node(Tier::Experience, "a").unwrap();
        let b = builder.add_node(Tier::JobGroup, "b").unwrap();
        let c = builder.add_node(Tier::CompanySize, "c").unwrap();
        builder.add_edge(a, b, 5).unwrap();
        builder.add_edge(b, c, 3).unwrap();
        let graph = builder.build();

        assert_eq!(graph.node(b).unwrap().throughput, 5);
        assert_eq!(graph.node(c).unwrap().throughput, 3);
        assert_eq!(graph.outgoing(a).collect::<Vec<_>>(), vec![0]);
        assert_eq!(graph.incoming(c).collect::<Vec<_>>(), vec![1]);
    }
}
