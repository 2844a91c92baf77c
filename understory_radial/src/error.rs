// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by layout passes.

use core::fmt::Debug;

use thiserror::Error;

/// Failure of a layout operation.
///
/// Every variant is returned before the side table or the graph is touched.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum LayoutError<K: Debug> {
    /// The requested node (layout root or re-centering target) is not in the graph.
    #[error("node {0:?} is not present in the graph")]
    NodeNotFound(K),

    /// A re-centering transition was started and has not been finished yet.
    #[error("a re-centering transition is still in progress")]
    TransitionInProgress,
}
