// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Position assignment: splitting each sector among a node's children.

use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::HashMap;
use smallvec::SmallVec;
use tracing::trace;

use crate::graph::LayoutGraph;
use crate::node::{NodeLayout, Placement};
use crate::strategy::RadialStrategy;
use crate::traverse::TreeView;
use crate::types::{AngleSpan, Epoch, Polar};

/// Sibling order to keep under one parent.
///
/// Position assignment normally lays children out in tree order. When it
/// reaches [`OrderingHint::parent`], children carrying a `dist` are sorted by it
/// first, which keeps the left-to-right order a user saw before re-centering.
/// Children without a `dist` follow, in tree order.
#[derive(Clone, Debug)]
pub struct OrderingHint<K> {
    parent: K,
    dist: HashMap<K, usize>,
}

impl<K: Copy + Eq + Hash> OrderingHint<K> {
    /// An empty hint for the children of `parent`.
    pub fn new(parent: K) -> Self {
        Self {
            parent,
            dist: HashMap::new(),
        }
    }

    /// Builder form of [`OrderingHint::set_dist`].
    #[must_use]
    pub fn with_dist(mut self, child: K, dist: usize) -> Self {
        self.set_dist(child, dist);
        self
    }

    /// Set the ordering key of `child`.
    pub fn set_dist(&mut self, child: K, dist: usize) {
        self.dist.insert(child, dist);
    }

    /// The parent whose children are reordered.
    pub fn parent(&self) -> K {
        self.parent
    }

    /// Ordering key of `child`, if tagged.
    pub fn dist(&self, child: K) -> Option<usize> {
        self.dist.get(&child).copied()
    }

    /// Whether no child is tagged.
    pub fn is_empty(&self) -> bool {
        self.dist.is_empty()
    }

    fn reorder(&self, elem: K, children: &mut [K]) {
        if elem != self.parent || !children.iter().any(|c| self.dist.contains_key(c)) {
            return;
        }
        children.sort_by_key(|c| self.dist(*c).unwrap_or(usize::MAX));
    }
}

/// Tag the neighbors of `parent` for an [`OrderingHint`] before re-centering on `focus`.
///
/// Starting just after `focus` in neighbor order and wrapping around, neighbors
/// get `dist = 0, 1, 2, …` until `focus` is reached again. Once `focus` becomes
/// the root, `parent` hangs below it and these neighbors are its children, so
/// the walk keeps their circular order. The hint is empty if `focus` is not a
/// neighbor of `parent`.
pub fn tag_children<G: LayoutGraph>(
    graph: &G,
    parent: G::NodeId,
    focus: G::NodeId,
) -> OrderingHint<G::NodeId> {
    let mut neighbors: SmallVec<[G::NodeId; 8]> = SmallVec::new();
    graph.for_each_neighbor(parent, |n| neighbors.push(n));

    let mut hint = OrderingHint::new(parent);
    let Some(start) = neighbors.iter().position(|&n| n == focus) else {
        return hint;
    };
    let len = neighbors.len();
    for (dist, offset) in (1..len).enumerate() {
        hint.set_dist(neighbors[(start + offset) % len], dist);
    }
    hint
}

/// Assign positions and sectors top-down.
///
/// The root takes the full circle at the origin. Then, in breadth-first order,
/// each node's sector is divided among its children in proportion to their
/// subtree angular widths; each child sits at the middle of its share, at
/// `length(depth of the parent)`. Frozen children keep their share of the
/// total but are not moved, and the angle they would take is left empty.
///
/// Floating-point drift of the running start angle across many siblings is
/// not corrected.
pub(crate) fn compute_positions<G, S, L>(
    graph: &G,
    tree: &TreeView<G::NodeId>,
    nodes: &mut HashMap<G::NodeId, NodeLayout>,
    strategy: &S,
    hint: Option<&OrderingHint<G::NodeId>>,
    epochs: &[Epoch],
    length: L,
) where
    G: LayoutGraph,
    S: RadialStrategy,
    L: Fn(usize) -> f64,
{
    let Some(root) = tree.root() else {
        return;
    };
    strategy.place_node(
        None,
        nodes.entry(root).or_default(),
        &Placement {
            pos: Polar::ORIGIN,
            span: AngleSpan::FULL,
        },
        epochs,
    );

    let dimension_of = |node: &NodeLayout, id: G::NodeId, epoch: Epoch| {
        strategy.node_dimension(graph.dimension(id, epoch).unwrap_or(0.0), node, epoch)
    };

    let mut subnodes: SmallVec<[G::NodeId; 8]> = SmallVec::new();
    let mut max_dim: SmallVec<[Option<f64>; 3]> = SmallVec::new();
    for &elem in tree.breadth_first() {
        let children = tree.children(elem);
        if children.is_empty() {
            continue;
        }
        let Some(parent) = nodes.get(&elem).cloned() else {
            continue;
        };
        let sector = parent.angle_span;
        let angle_span = sector.width();
        let mut angle_init = sector.begin;
        let len = length(parent.depth);

        subnodes.clear();
        subnodes.extend_from_slice(children);
        max_dim.clear();
        max_dim.resize(epochs.len(), None);
        let mut total_angular_widths = 0.0;
        for &child in &subnodes {
            let Some(node) = nodes.get(&child) else {
                continue;
            };
            total_angular_widths += node.tree_angular_width;
            for (max, &epoch) in max_dim.iter_mut().zip(epochs) {
                let dim = dimension_of(node, child, epoch);
                *max = Some(max.map_or(dim, |m| m.max(dim)));
            }
        }

        if let Some(hint) = hint {
            hint.reorder(elem, &mut subnodes);
        }

        for &child in &subnodes {
            let Some(node) = nodes.get_mut(&child) else {
                continue;
            };
            if node.is_frozen() {
                continue;
            }
            let angle_proportion = node.tree_angular_width / total_angular_widths * angle_span;
            let theta = angle_init + angle_proportion / 2.0;
            let placement = Placement {
                pos: Polar::new(theta, len),
                span: AngleSpan::new(angle_init, angle_init + angle_proportion),
            };
            strategy.place_node(Some(&parent), node, &placement, epochs);

            for (max, &epoch) in max_dim.iter().zip(epochs) {
                let dim = dimension_of(&*node, child, epoch);
                let quotient = match max {
                    Some(m) if *m != 0.0 => dim / m,
                    _ => 1.0,
                };
                node.epoch_mut(epoch).dim_quotient = quotient;
            }
            trace!(node = ?child, theta, rho = len, "placed");

            angle_init += angle_proportion;
        }
    }
}
