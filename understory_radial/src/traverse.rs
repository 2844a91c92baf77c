// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Breadth-first tree view of a graph from a chosen root.

use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;
use smallvec::SmallVec;

use crate::error::LayoutError;
use crate::graph::LayoutGraph;

#[derive(Clone, Debug)]
struct TreeEntry<K> {
    depth: usize,
    parent: Option<K>,
    children: SmallVec<[K; 4]>,
}

/// The spanning tree reached by a breadth-first walk from a root.
///
/// Each reachable node is visited exactly once. A node's children are the
/// neighbors it discovered, in neighbor order, so any edge closing a cycle is
/// dropped. Nodes the walk cannot reach are simply absent.
#[derive(Clone, Debug)]
pub struct TreeView<K> {
    root: Option<K>,
    order: Vec<K>,
    entries: HashMap<K, TreeEntry<K>>,
}

impl<K> Default for TreeView<K> {
    fn default() -> Self {
        Self {
            root: None,
            order: Vec::new(),
            entries: HashMap::new(),
        }
    }
}

impl<K: Copy + Eq + Hash + Debug> TreeView<K> {
    /// Walk `graph` breadth-first from `root`.
    ///
    /// Fails with [`LayoutError::NodeNotFound`] if `root` is not in the graph.
    pub fn build<G>(graph: &G, root: K) -> Result<Self, LayoutError<K>>
    where
        G: LayoutGraph<NodeId = K>,
    {
        if !graph.contains(root) {
            return Err(LayoutError::NodeNotFound(root));
        }

        let mut order = Vec::new();
        let mut entries = HashMap::new();
        let mut queue = VecDeque::new();
        entries.insert(
            root,
            TreeEntry {
                depth: 0,
                parent: None,
                children: SmallVec::new(),
            },
        );
        queue.push_back(root);

        while let Some(id) = queue.pop_front() {
            order.push(id);
            let depth = entries.get(&id).map_or(0, |e: &TreeEntry<K>| e.depth);
            let mut children: SmallVec<[K; 4]> = SmallVec::new();
            graph.for_each_neighbor(id, |n| {
                if !graph.contains(n) {
                    return;
                }
                if let Entry::Vacant(slot) = entries.entry(n) {
                    slot.insert(TreeEntry {
                        depth: depth + 1,
                        parent: Some(id),
                        children: SmallVec::new(),
                    });
                    children.push(n);
                    queue.push_back(n);
                }
            });
            if let Some(entry) = entries.get_mut(&id) {
                entry.children = children;
            }
        }

        Ok(Self {
            root: Some(root),
            order,
            entries,
        })
    }

    /// The root this view was built from, or `None` for an empty view.
    pub fn root(&self) -> Option<K> {
        self.root
    }

    /// Number of reachable nodes.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the view holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Reachable nodes in breadth-first order; every parent precedes its children.
    pub fn breadth_first(&self) -> &[K] {
        &self.order
    }

    /// Whether `id` was reached.
    pub fn contains(&self, id: K) -> bool {
        self.entries.contains_key(&id)
    }

    /// Distance from the root in edges.
    pub fn depth(&self, id: K) -> Option<usize> {
        self.entries.get(&id).map(|e| e.depth)
    }

    /// Parent in the tree; `None` for the root and for unreached nodes.
    pub fn parent(&self, id: K) -> Option<K> {
        self.entries.get(&id).and_then(|e| e.parent)
    }

    /// Children in the tree, in neighbor order.
    pub fn children(&self, id: K) -> &[K] {
        self.entries
            .get(&id)
            .map(|e| e.children.as_slice())
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::AdjacencyGraph;

    #[test]
    fn records_depth_parent_and_children() {
        let mut g = AdjacencyGraph::new();
        g.connect("r", "a");
        g.connect("r", "b");
        g.connect("b", "c");
        g.insert("island");

        let t = TreeView::build(&g, "r").unwrap();
        assert_eq!(t.root(), Some("r"));
        assert_eq!(t.breadth_first(), &["r", "a", "b", "c"]);
        assert_eq!(t.depth("c"), Some(2));
        assert_eq!(t.parent("c"), Some("b"));
        assert_eq!(t.parent("r"), None);
        assert_eq!(t.children("r"), &["a", "b"]);
        assert!(!t.contains("island"));
        assert_eq!(t.depth("island"), None);
    }

    #[test]
    fn cycles_do_not_revisit_nodes() {
        let mut g = AdjacencyGraph::new();
        g.connect(0_u32, 1);
        g.connect(1, 2);
        g.connect(2, 0);
        g.connect(2, 3);

        let t = TreeView::build(&g, 0).unwrap();
        assert_eq!(t.len(), 4);
        assert_eq!(t.children(0), &[1, 2]);
        assert!(t.children(1).is_empty(), "edge 1-2 closes a cycle");
        assert_eq!(t.children(2), &[3]);
    }

    #[test]
    fn rerooting_changes_the_tree() {
        let mut g = AdjacencyGraph::new();
        g.connect('r', 'a');
        g.connect('a', 'x');
        let t = TreeView::build(&g, 'a').unwrap();
        assert_eq!(t.children('a'), &['r', 'x']);
        assert_eq!(t.depth('r'), Some(1));
    }

    #[test]
    fn missing_root_is_an_error() {
        let g: AdjacencyGraph<u32> = AdjacencyGraph::new();
        assert_eq!(
            TreeView::build(&g, 9).unwrap_err(),
            LayoutError::NodeNotFound(9)
        );
    }
}
