// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_radial --heading-base-level=0

//! Understory Radial: radial tree layout with tracked position epochs.
//!
//! This crate places the tree hanging from a root node onto concentric rings.
//! Every node gets a polar position and an angular sector; a parent's sector is
//! split among its children in proportion to how much angle each child's
//! subtree needs, so large subtrees get room and small ones stay compact.
//!
//! A pass has two halves:
//!
//! - **Widths, bottom-up.** Each node's own footprint is its angular-width datum
//!   (floored at [`RadialConfig::min_angular_width`]) divided by its depth. A
//!   subtree claims the larger of the node's footprint and the sum of its
//!   children's subtree widths.
//! - **Positions, top-down.** The root takes the full circle at the origin.
//!   Breadth-first, every node's sector is partitioned among its children, each
//!   placed at the middle of its share on the ring given by [`LevelDistance`].
//!
//! Positions are written per [`Epoch`]. Hosts usually keep [`Epoch::CURRENT`] for
//! what is displayed and compute [`Epoch::END`] as the target of an animated
//! transition, interpolating from [`Epoch::START`] themselves.
//!
//! ## Minimal example
//!
//! ```rust
//! use core::f64::consts::FRAC_PI_2;
//! use understory_radial::{AdjacencyGraph, Epoch, RadialConfig, RadialLayout};
//!
//! let mut graph = AdjacencyGraph::new();
//! for id in ["root", "a", "b"] {
//!     graph.insert_with_dimension(id, 10.0);
//! }
//! graph.connect("root", "a");
//! graph.connect("root", "b");
//!
//! let mut layout = RadialLayout::new("root", RadialConfig::default());
//! layout.compute(&mut graph).unwrap();
//!
//! // Two equally wide children split the circle in halves.
//! let a = layout.position("a", Epoch::CURRENT).unwrap();
//! assert!((a.theta - FRAC_PI_2).abs() < 1e-12);
//! assert_eq!(a.rho, 100.0);
//! ```
//!
//! ## Hosts and seams
//!
//! The crate does not own a graph. It reads one through [`LayoutGraph`] and keeps
//! its results in a side table of [`NodeLayout`] records keyed by the host's node
//! ids. [`AdjacencyGraph`] is a small ready-made implementation.
//!
//! Host-specific behavior goes through a [`RadialStrategy`] chosen when the
//! [`RadialLayout`] is built:
//!
//! - [`BasicRadial`]: the plain layout.
//! - [`ScaledRadial`]: per-depth scaling, optionally *constrained* to a number of
//!   rings beyond which subtrees stop widening the layout and collapse onto their
//!   parent.
//!
//! ## Re-centering
//!
//! [`RadialLayout::recenter`] moves the root to another node and computes the
//! [`Epoch::END`] target so the picture turns rather than jumps: the old parent
//! keeps its bearing, and its remaining children keep their circular order via an
//! [`OrderingHint`]. Until [`RadialLayout::finish_transition`] is called, further
//! re-centering is refused.
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for dependencies such as `kurbo`.
//! - `libm`: enables `no_std` + `alloc` builds that rely on `libm` for floating-point math.
//! - `serde`: derives `Serialize`/`Deserialize` for [`RadialConfig`] and [`Epoch`].
//!
//! Passes log through `tracing` at `debug` and `trace` level; no subscriber is
//! installed.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod error;
mod graph;
mod layout;
mod node;
mod position;
mod strategy;
mod traverse;
mod types;
mod width;

pub use config::{LevelDistance, RadialConfig};
pub use error::LayoutError;
pub use graph::{AdjacencyGraph, LayoutGraph};
pub use layout::RadialLayout;
pub use node::{EpochLayout, NodeLayout, Placement};
pub use position::{OrderingHint, tag_children};
pub use strategy::{BasicRadial, RadialStrategy, ScaledRadial};
pub use traverse::TreeView;
pub use types::{AngleSpan, Epoch, NodeFlags, Polar};
