// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Strategies: the host-specific seams of a layout pass.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::config::RadialConfig;
use crate::node::{NodeLayout, Placement};
use crate::types::Epoch;

/// Customization points of a radial layout pass.
///
/// Every method has a default matching the plain radial layout, so an
/// implementation only overrides what differs. A strategy is chosen when the
/// [`RadialLayout`][crate::RadialLayout] is built.
pub trait RadialStrategy {
    /// Prepare a reachable node before widths are computed.
    ///
    /// Called once per node per pass, after depths are known.
    fn prepare(&self, node: &mut NodeLayout, epochs: &[Epoch], config: &RadialConfig) {
        let _ = (node, epochs, config);
    }

    /// The dimension used for sibling comparison, given the graph's raw dimension.
    fn node_dimension(&self, dimension: f64, node: &NodeLayout, epoch: Epoch) -> f64 {
        let _ = (node, epoch);
        dimension
    }

    /// Angular width of a whole subtree from the node's own width and the sum of
    /// its children's subtree widths.
    ///
    /// Must not return less than `own`.
    fn subtree_angular_width(
        &self,
        depth: usize,
        own: f64,
        children: f64,
        config: &RadialConfig,
    ) -> f64 {
        let _ = (depth, config);
        own.max(children)
    }

    /// Commit a [`Placement`] to `node` for every epoch in `epochs`.
    ///
    /// `parent` is `None` only for the root.
    fn place_node(
        &self,
        parent: Option<&NodeLayout>,
        node: &mut NodeLayout,
        placement: &Placement,
        epochs: &[Epoch],
    ) {
        let _ = parent;
        node.apply(placement, epochs);
    }
}

/// The plain radial layout.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BasicRadial;

impl RadialStrategy for BasicRadial {}

/// Radial layout with per-depth scaling and an optional depth bound.
///
/// Each node gets `scale = radial_exponent ^ depth` in every epoch, and its
/// dimension is multiplied by that scale when compared with its siblings.
///
/// With `max_depth = Some(n)` the layout is *constrained*:
/// - nodes at depth `n` or deeper claim only their own width, so anything
///   further out stops widening the allocation, and
/// - nodes deeper than `n` are collapsed onto their parent, inheriting its
///   sector, position, and span.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ScaledRadial {
    /// Depth bound of constrained mode; `None` lays out every level.
    pub max_depth: Option<usize>,
}

impl Default for ScaledRadial {
    fn default() -> Self {
        Self::new()
    }
}

impl ScaledRadial {
    /// Number of visible levels commonly used for constrained layouts.
    pub const DEFAULT_CIRCLES: usize = 6;

    /// Scaling without a depth bound.
    pub const fn new() -> Self {
        Self { max_depth: None }
    }

    /// Scaling with the layout constrained to `max_depth` levels.
    pub const fn constrained(max_depth: usize) -> Self {
        Self {
            max_depth: Some(max_depth),
        }
    }

    fn collapses(&self, depth: usize) -> bool {
        self.max_depth.is_some_and(|n| depth > n)
    }
}

impl RadialStrategy for ScaledRadial {
    fn prepare(&self, node: &mut NodeLayout, epochs: &[Epoch], config: &RadialConfig) {
        let scale = config.radial_exponent.powf(node.depth() as f64);
        for &epoch in epochs {
            node.epoch_mut(epoch).scale = scale;
        }
    }

    fn node_dimension(&self, dimension: f64, node: &NodeLayout, epoch: Epoch) -> f64 {
        dimension * node.epoch(epoch).map_or(1.0, |e| e.scale)
    }

    fn subtree_angular_width(
        &self,
        depth: usize,
        own: f64,
        children: f64,
        _config: &RadialConfig,
    ) -> f64 {
        match self.max_depth {
            Some(n) if depth >= n => own,
            _ => own.max(children),
        }
    }

    fn place_node(
        &self,
        parent: Option<&NodeLayout>,
        node: &mut NodeLayout,
        placement: &Placement,
        epochs: &[Epoch],
    ) {
        let Some(parent) = parent.filter(|_| self.collapses(node.depth())) else {
            node.apply(placement, epochs);
            return;
        };
        node.angle_span = parent.angle_span();
        for &epoch in epochs {
            let inherited = parent.epoch(epoch).copied().unwrap_or_default();
            let slot = node.epoch_mut(epoch);
            slot.pos = inherited.pos;
            slot.span = inherited.span;
        }
    }
}
