// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The layout orchestrator: sequencing passes and re-centering.

use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::HashMap;
use kurbo::Point;
use tracing::{debug, instrument};

use crate::config::RadialConfig;
use crate::error::LayoutError;
use crate::graph::LayoutGraph;
use crate::node::NodeLayout;
use crate::position::{self, OrderingHint, tag_children};
use crate::strategy::{BasicRadial, RadialStrategy};
use crate::traverse::TreeView;
use crate::types::{Epoch, NodeFlags, Polar, normalize_angle};
use crate::width;

/// A radial layout of the tree hanging from one root.
///
/// The layout keeps a side table of [`NodeLayout`] records keyed by the host's
/// node ids; the graph itself is only read. A full pass ([`RadialLayout::compute`])
/// runs, in order:
///
/// 1. [`LayoutGraph::compute_dimensions`],
/// 2. [`RadialLayout::compute_levels`],
/// 3. the level-distance function from [`RadialConfig::level_distance_fn`],
/// 4. [`RadialLayout::compute_angular_widths`],
/// 5. [`RadialLayout::compute_positions`].
///
/// Passes are synchronous and deterministic: repeating one on an unchanged graph
/// reproduces the same positions. Callers must not run two passes over the same
/// layout concurrently; `&mut self` enforces that within safe code.
///
/// The type parameter `S` selects the [`RadialStrategy`]. It defaults to
/// [`BasicRadial`].
#[derive(Clone, Debug)]
pub struct RadialLayout<K, S = BasicRadial> {
    root: K,
    config: RadialConfig,
    strategy: S,
    tree: TreeView<K>,
    nodes: HashMap<K, NodeLayout>,
    ordering: Option<OrderingHint<K>>,
    in_transition: bool,
}

impl<K: Copy + Eq + Hash + Debug> RadialLayout<K> {
    /// Create a plain radial layout rooted at `root`.
    pub fn new(root: K, config: RadialConfig) -> Self {
        Self::with_strategy(root, config, BasicRadial)
    }
}

impl<K: Copy + Eq + Hash + Debug, S: RadialStrategy> RadialLayout<K, S> {
    /// Create a layout rooted at `root` using `strategy`.
    pub fn with_strategy(root: K, config: RadialConfig, strategy: S) -> Self {
        Self {
            root,
            config,
            strategy,
            tree: TreeView::default(),
            nodes: HashMap::new(),
            ordering: None,
            in_transition: false,
        }
    }

    /// The active root.
    pub fn root(&self) -> K {
        self.root
    }

    /// Change the active root; takes effect on the next pass.
    pub fn set_root(&mut self, root: K) {
        self.root = root;
    }

    /// The configuration.
    pub fn config(&self) -> &RadialConfig {
        &self.config
    }

    /// Replace the configuration; takes effect on the next pass.
    pub fn set_config(&mut self, config: RadialConfig) {
        self.config = config;
    }

    /// The strategy.
    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// The tree view of the last [`RadialLayout::compute_levels`].
    pub fn tree(&self) -> &TreeView<K> {
        &self.tree
    }

    /// Side-table record of `id`.
    pub fn node(&self, id: K) -> Option<&NodeLayout> {
        self.nodes.get(&id)
    }

    /// All side-table records, in no particular order.
    pub fn nodes(&self) -> impl Iterator<Item = (K, &NodeLayout)> + '_ {
        self.nodes.iter().map(|(k, n)| (*k, n))
    }

    /// Position of `id` in `epoch`.
    pub fn position(&self, id: K, epoch: Epoch) -> Option<Polar> {
        self.nodes.get(&id).and_then(|n| n.pos(epoch))
    }

    /// Position of `id` in `epoch`, in cartesian coordinates around the origin.
    pub fn point(&self, id: K, epoch: Epoch) -> Option<Point> {
        self.position(id, epoch).map(Polar::to_point)
    }

    /// Flags of `id`; empty for nodes never seen.
    pub fn flags(&self, id: K) -> NodeFlags {
        self.nodes.get(&id).map(NodeLayout::flags).unwrap_or_default()
    }

    /// Set the flags of `id`, creating its record if needed.
    pub fn set_flags(&mut self, id: K, flags: NodeFlags) {
        self.nodes.entry(id).or_default().flags = flags;
    }

    /// The active sibling-ordering hint.
    pub fn ordering_hint(&self) -> Option<&OrderingHint<K>> {
        self.ordering.as_ref()
    }

    /// Set or clear the sibling-ordering hint used by position assignment.
    pub fn set_ordering_hint(&mut self, hint: Option<OrderingHint<K>>) {
        self.ordering = hint;
    }

    /// Remove and return the sibling-ordering hint.
    pub fn clear_ordering_hint(&mut self) -> Option<OrderingHint<K>> {
        self.ordering.take()
    }

    /// Whether a re-centering transition is open.
    pub fn is_in_transition(&self) -> bool {
        self.in_transition
    }

    /// Run a full pass for [`Epoch::DEFAULT_SET`].
    pub fn compute<G>(&mut self, graph: &mut G) -> Result<(), LayoutError<K>>
    where
        G: LayoutGraph<NodeId = K>,
    {
        self.compute_epochs(graph, &Epoch::DEFAULT_SET)
    }

    /// Run a full pass writing positions into `epochs`.
    ///
    /// An empty slice means [`Epoch::DEFAULT_SET`]. If the root is not in the
    /// graph, nothing is touched and [`LayoutError::NodeNotFound`] is returned.
    #[instrument(level = "debug", skip_all, fields(root = ?self.root))]
    pub fn compute_epochs<G>(
        &mut self,
        graph: &mut G,
        epochs: &[Epoch],
    ) -> Result<(), LayoutError<K>>
    where
        G: LayoutGraph<NodeId = K>,
    {
        let epochs = epochs_or_default(epochs);
        if !graph.contains(self.root) {
            return Err(LayoutError::NodeNotFound(self.root));
        }
        graph.compute_dimensions(epochs);
        self.compute_levels(&*graph)?;
        let level_distance = self.config.level_distance_fn();
        self.compute_angular_widths(&*graph, epochs);
        self.compute_positions(&*graph, epochs, |depth| level_distance.radius(depth));
        debug!(nodes = self.tree.len(), ?epochs, "radial layout computed");
        Ok(())
    }

    /// Rebuild the tree view from the root and record each reachable node's depth.
    ///
    /// Nodes the root cannot reach keep their records untouched.
    #[instrument(level = "debug", skip_all)]
    pub fn compute_levels<G>(&mut self, graph: &G) -> Result<(), LayoutError<K>>
    where
        G: LayoutGraph<NodeId = K>,
    {
        self.tree = TreeView::build(graph, self.root)?;
        for &id in self.tree.breadth_first() {
            let depth = self.tree.depth(id).unwrap_or(0);
            self.nodes.entry(id).or_default().depth = depth;
        }
        Ok(())
    }

    /// Compute own and subtree angular widths over the current tree view.
    ///
    /// Footprints are read from the first of `epochs`. Runs
    /// [`RadialStrategy::prepare`] on every reachable node first.
    #[instrument(level = "debug", skip_all)]
    pub fn compute_angular_widths<G>(&mut self, graph: &G, epochs: &[Epoch])
    where
        G: LayoutGraph<NodeId = K>,
    {
        let epochs = epochs_or_default(epochs);
        for &id in self.tree.breadth_first() {
            if let Some(node) = self.nodes.get_mut(&id) {
                self.strategy.prepare(node, epochs, &self.config);
            }
        }
        width::set_angular_width_for_nodes(
            graph,
            &self.tree,
            &mut self.nodes,
            epochs[0],
            self.config.min_angular_width,
        );
        width::set_subtrees_angular_width(
            &self.tree,
            &mut self.nodes,
            &self.strategy,
            &self.config,
        );
    }

    /// Assign positions and sectors over the current tree view.
    ///
    /// `length` maps a parent's depth to the radius of its children's ring; see
    /// [`LevelDistance::radius`][crate::LevelDistance::radius].
    #[instrument(level = "debug", skip_all)]
    pub fn compute_positions<G, L>(&mut self, graph: &G, epochs: &[Epoch], length: L)
    where
        G: LayoutGraph<NodeId = K>,
        L: Fn(usize) -> f64,
    {
        position::compute_positions(
            graph,
            &self.tree,
            &mut self.nodes,
            &self.strategy,
            self.ordering.as_ref(),
            epochs_or_default(epochs),
            length,
        );
    }

    /// Re-root the layout at `id` and compute the [`Epoch::END`] target of a
    /// transition.
    ///
    /// Compared with a plain pass, two things keep the picture stable:
    /// - the old parent of `id` keeps its bearing as seen from `id`: every
    ///   `END` angle is rotated so that it points the way it did in
    ///   [`Epoch::CURRENT`], and
    /// - the old parent's other neighbors keep their circular order through an
    ///   [`OrderingHint`] built by [`tag_children`].
    ///
    /// Returns [`LayoutError::TransitionInProgress`] until
    /// [`RadialLayout::finish_transition`] is called, and does nothing if `id`
    /// is already the root.
    #[instrument(level = "debug", skip_all, fields(from = ?self.root, to = ?id))]
    pub fn recenter<G>(&mut self, graph: &mut G, id: K) -> Result<(), LayoutError<K>>
    where
        G: LayoutGraph<NodeId = K>,
    {
        if self.in_transition {
            return Err(LayoutError::TransitionInProgress);
        }
        if id == self.root {
            return Ok(());
        }
        if !graph.contains(id) {
            return Err(LayoutError::NodeNotFound(id));
        }

        let anchor = self.tree.parent(id).map(|parent| {
            let parent_pt = self.point(parent, Epoch::CURRENT).unwrap_or(Point::ORIGIN);
            let child_pt = self.point(id, Epoch::CURRENT).unwrap_or(Point::ORIGIN);
            (parent, normalize_angle((parent_pt - child_pt).atan2()))
        });
        if let Some((parent, _)) = anchor {
            self.ordering = Some(tag_children(&*graph, parent, id));
        }

        self.root = id;
        self.compute_epochs(graph, &[Epoch::END])?;

        if let Some((parent, bearing)) = anchor {
            let end_theta = self.position(parent, Epoch::END).map_or(0.0, |p| p.theta);
            let delta = bearing - end_theta;
            for &node in self.tree.breadth_first() {
                if let Some(layout) = self.nodes.get_mut(&node) {
                    let end = layout.epoch_mut(Epoch::END);
                    end.pos = end.pos.rotated(delta);
                }
            }
            debug!(delta, "rotated transition target");
        }
        self.in_transition = true;
        Ok(())
    }

    /// Close a re-centering transition, making its [`Epoch::END`] records current.
    pub fn finish_transition(&mut self) {
        for &id in self.tree.breadth_first() {
            if let Some(node) = self.nodes.get_mut(&id)
                && let Some(end) = node.epoch(Epoch::END).copied()
            {
                *node.epoch_mut(Epoch::CURRENT) = end;
            }
        }
        self.in_transition = false;
    }
}

fn epochs_or_default(epochs: &[Epoch]) -> &[Epoch] {
    if epochs.is_empty() {
        &Epoch::DEFAULT_SET
    } else {
        epochs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::AdjacencyGraph;
    use core::f64::consts::PI;

    fn star() -> AdjacencyGraph<u32> {
        let mut g = AdjacencyGraph::new();
        g.insert_with_dimension(0, 10.0);
        for leaf in 1..=4 {
            g.insert_with_dimension(leaf, 10.0);
            g.connect(0, leaf);
        }
        g
    }

    #[test]
    fn missing_root_leaves_state_untouched() {
        let mut g = star();
        let mut layout = RadialLayout::new(99, RadialConfig::default());
        assert_eq!(layout.compute(&mut g), Err(LayoutError::NodeNotFound(99)));
        assert_eq!(layout.nodes().count(), 0);
        assert!(layout.tree().is_empty());
    }

    #[test]
    fn star_splits_circle_evenly() {
        let mut g = star();
        let mut layout = RadialLayout::new(0, RadialConfig::default());
        layout.compute(&mut g).unwrap();
        for leaf in 1..=4_u32 {
            let span = layout.node(leaf).unwrap().angle_span();
            assert!((span.width() - PI / 2.0).abs() < 1e-12, "leaf {leaf} span {span:?}");
            assert_eq!(layout.position(leaf, Epoch::START).unwrap().rho, 100.0);
        }
    }

    #[test]
    fn empty_epoch_list_means_default_set() {
        let mut g = star();
        let mut layout = RadialLayout::new(0, RadialConfig::default());
        layout.compute_epochs(&mut g, &[]).unwrap();
        for epoch in Epoch::DEFAULT_SET {
            assert!(layout.position(1, epoch).is_some(), "{epoch:?} not written");
        }
    }

    #[test]
    fn recenter_refuses_while_busy() {
        let mut g = star();
        let mut layout = RadialLayout::new(0, RadialConfig::default());
        layout.compute(&mut g).unwrap();
        layout.recenter(&mut g, 1).unwrap();
        assert!(layout.is_in_transition());
        assert_eq!(
            layout.recenter(&mut g, 2),
            Err(LayoutError::TransitionInProgress)
        );
        layout.finish_transition();
        assert!(!layout.is_in_transition());
        assert_eq!(layout.root(), 1);
        assert_eq!(
            layout.position(1, Epoch::CURRENT),
            layout.position(1, Epoch::END)
        );
    }
}
