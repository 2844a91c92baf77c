// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-node layout records kept in the side table.

use smallvec::SmallVec;

use crate::types::{AngleSpan, Epoch, NodeFlags, Polar};

/// Layout data tracked separately for each [`Epoch`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EpochLayout {
    /// Polar position.
    pub pos: Polar,
    /// Sector this node occupied when `pos` was written.
    pub span: AngleSpan,
    /// Size multiplier for rendering; `1.0` unless a strategy sets it.
    pub scale: f64,
    /// Dimension relative to the largest sibling dimension.
    pub dim_quotient: f64,
}

impl Default for EpochLayout {
    fn default() -> Self {
        Self {
            pos: Polar::ORIGIN,
            span: AngleSpan::default(),
            scale: 1.0,
            dim_quotient: 1.0,
        }
    }
}

/// Where position assignment proposes to put a node.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Placement {
    /// Proposed position, at the middle of `span`.
    pub pos: Polar,
    /// Proposed sector.
    pub span: AngleSpan,
}

/// Everything the layout knows about one node.
///
/// Widths and [`NodeLayout::angle_span`] are recomputed by every pass. Epoch
/// records persist between passes and are only overwritten for the epochs a
/// pass computes, and never for [frozen](NodeFlags::FROZEN) nodes.
#[derive(Clone, Debug, Default)]
pub struct NodeLayout {
    pub(crate) depth: usize,
    pub(crate) angular_width: f64,
    pub(crate) tree_angular_width: f64,
    pub(crate) angle_span: AngleSpan,
    pub(crate) flags: NodeFlags,
    pub(crate) epochs: SmallVec<[(Epoch, EpochLayout); 3]>,
}

impl NodeLayout {
    /// Depth from the root of the last pass.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The node's own angular footprint.
    pub fn angular_width(&self) -> f64 {
        self.angular_width
    }

    /// Angular width claimed by the node's whole subtree; never below
    /// [`NodeLayout::angular_width`].
    pub fn tree_angular_width(&self) -> f64 {
        self.tree_angular_width
    }

    /// Sector allocated by the most recent position assignment.
    pub fn angle_span(&self) -> AngleSpan {
        self.angle_span
    }

    /// Replace the allocated sector.
    pub fn set_angle_span(&mut self, span: AngleSpan) {
        self.angle_span = span;
    }

    /// Side-table flags.
    pub fn flags(&self) -> NodeFlags {
        self.flags
    }

    /// Whether position assignment skips this node.
    pub fn is_frozen(&self) -> bool {
        self.flags.contains(NodeFlags::FROZEN)
    }

    /// The record for `epoch`, if one was ever written.
    pub fn epoch(&self, epoch: Epoch) -> Option<&EpochLayout> {
        self.epochs.iter().find(|(e, _)| *e == epoch).map(|(_, l)| l)
    }

    /// The record for `epoch`, created with defaults if missing.
    pub fn epoch_mut(&mut self, epoch: Epoch) -> &mut EpochLayout {
        let idx = match self.epochs.iter().position(|(e, _)| *e == epoch) {
            Some(idx) => idx,
            None => {
                self.epochs.push((epoch, EpochLayout::default()));
                self.epochs.len() - 1
            }
        };
        &mut self.epochs[idx].1
    }

    /// All epoch records written so far.
    pub fn epochs(&self) -> impl Iterator<Item = (Epoch, &EpochLayout)> + '_ {
        self.epochs.iter().map(|(e, l)| (*e, l))
    }

    /// Position for `epoch`.
    pub fn pos(&self, epoch: Epoch) -> Option<Polar> {
        self.epoch(epoch).map(|l| l.pos)
    }

    /// Take `placement` as is: its span becomes the node's sector, and its
    /// position and span are written into every epoch in `epochs`.
    pub fn apply(&mut self, placement: &Placement, epochs: &[Epoch]) {
        self.angle_span = placement.span;
        for &epoch in epochs {
            let slot = self.epoch_mut(epoch);
            slot.pos = placement.pos;
            slot.span = placement.span;
        }
    }
}
