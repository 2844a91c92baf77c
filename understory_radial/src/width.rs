// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Angular widths: each node's own footprint and the width of its subtree.

use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::HashMap;

use crate::config::RadialConfig;
use crate::graph::LayoutGraph;
use crate::node::NodeLayout;
use crate::strategy::RadialStrategy;
use crate::traverse::TreeView;
use crate::types::Epoch;

/// Set `angular_width` for every reachable node.
///
/// The footprint is `max(angular_width datum, floor)`, a missing datum counting
/// as zero, divided by the node's depth. The root keeps its undivided footprint;
/// its sector is always the full circle.
pub(crate) fn set_angular_width_for_nodes<G>(
    graph: &G,
    tree: &TreeView<G::NodeId>,
    nodes: &mut HashMap<G::NodeId, NodeLayout>,
    epoch: Epoch,
    floor: f64,
) where
    G: LayoutGraph,
{
    for &id in tree.breadth_first() {
        let raw = graph
            .angular_width(id, epoch)
            .filter(|w| !w.is_nan())
            .unwrap_or(0.0);
        let footprint = raw.max(floor);
        let node = nodes.entry(id).or_default();
        node.angular_width = match node.depth {
            0 => footprint,
            depth => footprint / depth as f64,
        };
    }
}

/// Set `tree_angular_width` for every reachable node, children first.
///
/// Walking the breadth-first order backwards finishes every child before its
/// parent. Children are summed in tree order.
pub(crate) fn set_subtrees_angular_width<K, S>(
    tree: &TreeView<K>,
    nodes: &mut HashMap<K, NodeLayout>,
    strategy: &S,
    config: &RadialConfig,
) where
    K: Copy + Eq + Hash + Debug,
    S: RadialStrategy,
{
    for &id in tree.breadth_first().iter().rev() {
        let children: f64 = tree
            .children(id)
            .iter()
            .map(|c| nodes.get(c).map_or(0.0, |n| n.tree_angular_width))
            .sum();
        let Some(node) = nodes.get_mut(&id) else {
            continue;
        };
        let width =
            strategy.subtree_angular_width(node.depth, node.angular_width, children, config);
        debug_assert!(
            width >= node.angular_width,
            "subtree width {width} of {id:?} is below its own width {}",
            node.angular_width
        );
        node.tree_angular_width = width;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::AdjacencyGraph;
    use crate::strategy::BasicRadial;

    fn widths(graph: &AdjacencyGraph<&'static str>) -> HashMap<&'static str, NodeLayout> {
        let tree = TreeView::build(graph, "r").unwrap();
        let mut nodes: HashMap<_, NodeLayout> = HashMap::new();
        for &id in tree.breadth_first() {
            nodes.entry(id).or_default().depth = tree.depth(id).unwrap();
        }
        set_angular_width_for_nodes(graph, &tree, &mut nodes, Epoch::CURRENT, 5.0);
        set_subtrees_angular_width(&tree, &mut nodes, &BasicRadial, &RadialConfig::default());
        nodes
    }

    #[test]
    fn footprint_is_divided_by_depth() {
        let mut g = AdjacencyGraph::new();
        g.insert_with_dimension("r", 10.0);
        g.insert_with_dimension("a", 10.0);
        g.insert_with_dimension("b", 10.0);
        g.insert_with_dimension("c", 10.0);
        g.connect("r", "a");
        g.connect("r", "b");
        g.connect("b", "c");

        let n = widths(&g);
        assert_eq!(n["a"].angular_width(), 10.0);
        assert_eq!(n["b"].angular_width(), 10.0);
        assert_eq!(n["c"].angular_width(), 5.0);
        assert_eq!(n["c"].tree_angular_width(), 5.0);
        assert_eq!(n["b"].tree_angular_width(), 10.0);
        assert_eq!(n["r"].tree_angular_width(), 20.0);
    }

    #[test]
    fn floor_applies_to_small_or_missing_footprints() {
        let mut g = AdjacencyGraph::new();
        g.insert_with_dimension("r", 1.0);
        g.insert_with_dimension("small", 2.0);
        g.insert("bare");
        g.connect("r", "small");
        g.connect("r", "bare");

        let n = widths(&g);
        assert_eq!(n["r"].angular_width(), 5.0);
        assert_eq!(n["small"].angular_width(), 5.0);
        assert_eq!(n["bare"].angular_width(), 5.0);
    }

    #[test]
    fn wide_children_widen_the_parent() {
        let mut g = AdjacencyGraph::new();
        g.insert_with_dimension("r", 10.0);
        g.insert_with_dimension("p", 6.0);
        for leaf in ["x", "y", "z"] {
            g.insert_with_dimension(leaf, 20.0);
            g.connect("p", leaf);
        }
        g.connect("r", "p");

        let n = widths(&g);
        assert_eq!(n["p"].angular_width(), 6.0);
        assert_eq!(n["x"].angular_width(), 10.0);
        assert_eq!(n["p"].tree_angular_width(), 30.0);
        for node in n.values() {
            assert!(
                node.tree_angular_width() >= node.angular_width(),
                "subtree narrower than node"
            );
        }
    }
}
