//! Selection state shared by the bar chart and the Sankey brush
//!
//! A selection is a plain value. Every transition returns a new selection
//! so handlers can compare the old and new state before redrawing.

use crate::geometry::Rect;
use crate::graph::{FlowEdge, NodeIndex};
use crate::layout::FlowLayout;
use serde::Serialize;
use std::collections::BTreeSet;

/// A set of selected keys
///
/// While the selection is active every unselected element is faded. Key
/// toggling is active exactly when some key is selected; a drawn brush is
/// active even when it covers no node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection<K: Ord> {
    keys: BTreeSet<K>,
    active: bool,
}

impl<K: Ord> Default for Selection<K> {
    fn default() -> Self {
        Self {
            keys: BTreeSet::new(),
            active: false,
        }
    }
}

impl<K: Ord> Selection<K> {
    /// Empty selection
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `key` if absent, remove it if present
    #[must_use]
    pub fn toggled(mut self, key: K) -> Self {
        if !self.keys.remove(&key) {
            self.keys.insert(key);
        }
        self.active = !self.keys.is_empty();
        self
    }

    /// Drop every key
    #[must_use]
    pub fn cleared(mut self) -> Self {
        self.keys.clear();
        self.active = false;
        self
    }

    /// True if unselected elements should be faded
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// True if `key` is selected
    #[inline]
    #[must_use]
    pub fn is_selected(&self, key: &K) -> bool {
        self.keys.contains(key)
    }

    /// True if `key` should be drawn faded
    #[inline]
    #[must_use]
    pub fn is_faded(&self, key: &K) -> bool {
        self.is_active() && !self.is_selected(key)
    }

    /// Number of selected keys
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// True if nothing is selected
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Selected keys in order
    pub fn iter(&self) -> impl Iterator<Item = &K> + '_ {
        self.keys.iter()
    }
}

impl<K: Ord> FromIterator<K> for Selection<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let keys: BTreeSet<K> = iter.into_iter().collect();
        Self {
            active: !keys.is_empty(),
            keys,
        }
    }
}

/// Selected Sankey nodes
pub type NodeSelection = Selection<NodeIndex>;

impl Selection<NodeIndex> {
    /// Nodes whose band strictly overlaps the brush rectangle
    ///
    /// A cleared brush (`None`) is inactive and fades nothing. Any drawn
    /// brush is active, so a brush over empty space fades every node.
    /// Bands that merely touch the rectangle's border are not selected.
    #[must_use]
    pub fn from_brush(layout: &FlowLayout, brush: Option<Rect>) -> Self {
        let Some(brush) = brush else {
            return Self::new();
        };
        let keys: BTreeSet<NodeIndex> = layout
            .nodes()
            .iter()
            .enumerate()
            .filter(|(_, band)| band.rect().intersects(&brush))
            .map(|(i, _)| NodeIndex(i))
            .collect();
        tracing::debug!("Brush selected {} nodes", keys.len());
        Self { keys, active: true }
    }

    /// An edge fades when the selection is active and neither endpoint is selected
    #[must_use]
    pub fn is_edge_faded(&self, edge: &FlowEdge) -> bool {
        self.is_active() && !self.is_selected(&edge.source) && !self.is_selected(&edge.target)
    }
}
