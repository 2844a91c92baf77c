// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The graph contract consumed by the layout, and a small adjacency container.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::types::Epoch;

/// Read access to a host graph.
///
/// The layout never owns nodes. It only needs to know which nodes exist, how
/// they are connected, and how large each one is per [`Epoch`]. Tree structure
/// is derived by the layout itself from a breadth-first pass over
/// [`LayoutGraph::for_each_neighbor`], so implementations may expose an arbitrary
/// undirected graph; edges that do not belong to that breadth-first tree are
/// ignored.
pub trait LayoutGraph {
    /// Small, copyable node identifier.
    type NodeId: Copy + Eq + Hash + Debug;

    /// Whether `id` names a node of this graph.
    fn contains(&self, id: Self::NodeId) -> bool;

    /// Visit every node adjacent to `id`.
    ///
    /// The visiting order must be deterministic: sibling order, and therefore
    /// angle allocation, follows it.
    fn for_each_neighbor<F: FnMut(Self::NodeId)>(&self, id: Self::NodeId, f: F);

    /// The node's base dimension for `epoch`, if it has one.
    fn dimension(&self, id: Self::NodeId, epoch: Epoch) -> Option<f64>;

    /// The node's own angular footprint for `epoch`.
    ///
    /// Defaults to [`LayoutGraph::dimension`].
    fn angular_width(&self, id: Self::NodeId, epoch: Epoch) -> Option<f64> {
        self.dimension(id, epoch)
    }

    /// Refresh per-epoch dimensions before a layout pass.
    ///
    /// Called once at the start of every full pass. The default does nothing.
    fn compute_dimensions(&mut self, epochs: &[Epoch]) {
        let _ = epochs;
    }
}

#[derive(Clone, Debug)]
struct GraphNode<K> {
    neighbors: SmallVec<[K; 4]>,
    dimension: Option<f64>,
    epoch_dimensions: SmallVec<[(Epoch, f64); 3]>,
    angular_width: Option<f64>,
}

impl<K> Default for GraphNode<K> {
    fn default() -> Self {
        Self {
            neighbors: SmallVec::new(),
            dimension: None,
            epoch_dimensions: SmallVec::new(),
            angular_width: None,
        }
    }
}

/// An insertion-ordered, undirected graph implementing [`LayoutGraph`].
///
/// Neighbors are visited in the order the edges were added, which keeps layouts
/// reproducible. Dimensions can be set once for all epochs and overridden per
/// epoch.
///
/// ```rust
/// use understory_radial::{AdjacencyGraph, Epoch, LayoutGraph};
///
/// let mut graph = AdjacencyGraph::new();
/// graph.insert_with_dimension(1_u32, 10.0);
/// graph.connect(1, 2);
/// graph.set_epoch_dimension(2, Epoch::END, 4.0);
///
/// assert_eq!(graph.neighbors(1), &[2]);
/// assert_eq!(graph.dimension(1, Epoch::END), Some(10.0));
/// assert_eq!(graph.dimension(2, Epoch::CURRENT), None);
/// assert_eq!(graph.dimension(2, Epoch::END), Some(4.0));
/// ```
#[derive(Clone, Debug)]
pub struct AdjacencyGraph<K> {
    order: Vec<K>,
    nodes: HashMap<K, GraphNode<K>>,
}

impl<K> Default for AdjacencyGraph<K> {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            nodes: HashMap::new(),
        }
    }
}

impl<K: Copy + Eq + Hash + Debug> AdjacencyGraph<K> {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Node ids in insertion order.
    pub fn node_ids(&self) -> &[K] {
        &self.order
    }

    /// Insert a node without a dimension. Returns `false` if it already existed.
    pub fn insert(&mut self, id: K) -> bool {
        if self.nodes.contains_key(&id) {
            return false;
        }
        self.nodes.insert(id, GraphNode::default());
        self.order.push(id);
        true
    }

    /// Insert a node (if needed) and set its base dimension.
    pub fn insert_with_dimension(&mut self, id: K, dimension: f64) {
        self.insert(id);
        self.set_dimension(id, dimension);
    }

    /// Add an undirected edge, inserting missing endpoints.
    ///
    /// Self-loops and duplicate edges are ignored.
    pub fn connect(&mut self, a: K, b: K) {
        if a == b {
            return;
        }
        self.insert(a);
        self.insert(b);
        if let Some(node) = self.nodes.get_mut(&a) {
            if node.neighbors.contains(&b) {
                return;
            }
            node.neighbors.push(b);
        }
        if let Some(node) = self.nodes.get_mut(&b) {
            node.neighbors.push(a);
        }
    }

    /// Nodes adjacent to `id`, in edge insertion order.
    pub fn neighbors(&self, id: K) -> &[K] {
        self.nodes
            .get(&id)
            .map(|n| n.neighbors.as_slice())
            .unwrap_or(&[])
    }

    /// Set the base dimension used by every epoch without an override.
    pub fn set_dimension(&mut self, id: K, dimension: f64) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.dimension = Some(dimension);
        }
    }

    /// Override the dimension of one epoch.
    pub fn set_epoch_dimension(&mut self, id: K, epoch: Epoch, dimension: f64) {
        let Some(node) = self.nodes.get_mut(&id) else {
            return;
        };
        match node.epoch_dimensions.iter_mut().find(|(e, _)| *e == epoch) {
            Some((_, d)) => *d = dimension,
            None => node.epoch_dimensions.push((epoch, dimension)),
        }
    }

    /// Set an explicit angular footprint, or clear it with `None` to fall back to
    /// the dimension.
    pub fn set_angular_width(&mut self, id: K, angular_width: Option<f64>) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.angular_width = angular_width;
        }
    }
}

impl<K: Copy + Eq + Hash + Debug> LayoutGraph for AdjacencyGraph<K> {
    type NodeId = K;

    fn contains(&self, id: K) -> bool {
        self.nodes.contains_key(&id)
    }

    fn for_each_neighbor<F: FnMut(K)>(&self, id: K, f: F) {
        self.neighbors(id).iter().copied().for_each(f);
    }

    fn dimension(&self, id: K, epoch: Epoch) -> Option<f64> {
        let node = self.nodes.get(&id)?;
        node.epoch_dimensions
            .iter()
            .find(|(e, _)| *e == epoch)
            .map(|(_, d)| *d)
            .or(node.dimension)
    }

    fn angular_width(&self, id: K, epoch: Epoch) -> Option<f64> {
        let node = self.nodes.get(&id)?;
        node.angular_width.or_else(|| self.dimension(id, epoch))
    }
}
