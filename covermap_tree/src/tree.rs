// Copyright 2025 the Covermap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, path ingestion, aggregation.

use alloc::{string::String, vec::Vec};
use kurbo::Rect;
use tracing::{debug, warn};

use crate::error::TreeError;
use crate::record::CoverageRecord;
use crate::types::{LeafStats, Mutations, NodeId, NodeKind};

/// Package/class hierarchy of a coverage report.
///
/// Nodes live in a flat arena and refer to each other by [`NodeId`]. Children
/// are owned by the arena and listed in insertion order on their parent; the
/// parent link is a plain id used for breadcrumbs and zooming out.
///
/// Structure only grows through [`Tree::insert_path`] and friends. Derived
/// statistics (`value`, [`Mutations`], coverage) are filled in by
/// [`Tree::aggregate`], and geometry by whoever lays the tree out (see
/// [`Tree::set_bounds`]).
///
/// ## Example
///
/// ```rust
/// use covermap_tree::{LeafStats, Tree};
///
/// let mut tree = Tree::new();
/// let stats = LeafStats { lines: 10, coverage: 0.0, mutations: 4, detected: 3 };
/// tree.insert_path(&["com", "example", "Parser"], stats).unwrap();
/// tree.insert_path(&["com", "example", "Lexer"], stats).unwrap();
/// let (_, errors) = tree.aggregate_all();
/// assert!(errors.is_empty());
///
/// let com = tree.find_child(tree.root(), "com").unwrap();
/// assert_eq!(tree.mutations(com).unwrap().total, 8);
/// assert_eq!(tree.coverage(com), Some(75.0));
/// ```
#[derive(Clone)]
pub struct Tree {
    /// Slot 0 is the root.
    nodes: Vec<Node>,
}

impl core::fmt::Debug for Tree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let leaves = self.nodes.iter().filter(|n| n.kind.is_leaf()).count();
        f.debug_struct("Tree")
            .field("root", &self.nodes[0].name)
            .field("nodes_total", &self.nodes.len())
            .field("leaves", &leaves)
            .finish_non_exhaustive()
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug)]
struct Node {
    name: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    depth: usize,
    kind: NodeKind,
    value: u64,
    mutations: Mutations,
    coverage: Option<f64>,
    bounds: Rect,
}

impl Node {
    fn new(name: &str, parent: Option<NodeId>, depth: usize, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            parent,
            children: Vec::new(),
            depth,
            kind,
            value: 0,
            mutations: Mutations::default(),
            coverage: None,
            bounds: Rect::ZERO,
        }
    }
}

impl Tree {
    /// Create a tree holding only a root named `root`.
    ///
    /// The `root` name is what [`Tree::breadcrumb`] strips, so breadcrumbs of
    /// such a tree start at the first package.
    pub fn new() -> Self {
        Self::with_root_name("root")
    }

    /// Create a tree whose root carries a custom name.
    pub fn with_root_name(name: &str) -> Self {
        Self {
            nodes: alloc::vec![Node::new(name, None, 0, NodeKind::Inner)],
        }
    }

    /// Build and aggregate a tree from a batch of report records.
    ///
    /// Records that fail to insert are logged and skipped; their errors are
    /// returned alongside the tree so the caller can report them. A partial
    /// dataset still yields a usable tree.
    pub fn from_records<'a, I>(records: I) -> (Self, Vec<TreeError>)
    where
        I: IntoIterator<Item = &'a CoverageRecord>,
    {
        let mut tree = Self::new();
        let mut rejected = Vec::new();
        for record in records {
            if let Err(error) = tree.insert_record(record) {
                warn!(%error, "skipping coverage record");
                rejected.push(error);
            }
        }
        let (_, inconsistent) = tree.aggregate_all();
        rejected.extend(inconsistent);
        debug!(
            nodes = tree.node_count(),
            rejected = rejected.len(),
            "built coverage tree"
        );
        (tree, rejected)
    }

    /// The root node.
    pub const fn root(&self) -> NodeId {
        NodeId::new(0)
    }

    /// Number of nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// All node ids in insertion order (parents before their children).
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(|i| NodeId::new(to_u32(i)))
    }

    /// Returns true if `id` was issued by this tree.
    pub fn contains(&self, id: NodeId) -> bool {
        id.idx() < self.nodes.len()
    }

    /// Insert one class under its package path.
    ///
    /// `segments` are the dotted path split on `.`: every segment but the last
    /// names a package, the last names the class. Packages that already exist
    /// at a level are reused, so records can arrive in any order. Returns the
    /// node where the path ended.
    ///
    /// If a class segment names a node that already exists the record is a
    /// duplicate and the first one wins. If a package segment names an
    /// existing class, that class turns into a package and loses its own
    /// statistics.
    pub fn insert_path(
        &mut self,
        segments: &[&str],
        stats: LeafStats,
    ) -> Result<NodeId, TreeError> {
        let Some((class, packages)) = segments.split_last() else {
            return Err(TreeError::MalformedPath {
                path: String::new(),
            });
        };
        if segments.iter().any(|s| s.is_empty()) {
            return Err(TreeError::MalformedPath {
                path: segments.join("."),
            });
        }

        let mut level = self.root();
        for package in packages {
            level = match self.find_child(level, package) {
                Some(existing) => {
                    self.make_inner(existing);
                    existing
                }
                None => self.push_child(level, package, NodeKind::Inner),
            };
        }

        if let Some(existing) = self.find_child(level, class) {
            debug!(path = %segments.join("."), "duplicate class; keeping first record");
            return Ok(existing);
        }
        Ok(self.push_child(level, class, NodeKind::Leaf(stats)))
    }

    /// Validate a report record and insert it with [`Tree::insert_path`].
    pub fn insert_record(&mut self, record: &CoverageRecord) -> Result<NodeId, TreeError> {
        if record.detected > record.mutations {
            return Err(TreeError::InconsistentLeaf {
                path: record.dotted_path.clone(),
                total: record.mutations,
                detected: record.detected,
            });
        }
        let segments: Vec<&str> = record.segments().collect();
        self.insert_path(&segments, record.stats())
            .map_err(|error| match error {
                TreeError::MalformedPath { .. } => TreeError::MalformedPath {
                    path: record.dotted_path.clone(),
                },
                other => other,
            })
    }

    /// Roll statistics up the subtree rooted at `id`.
    ///
    /// A single post-order pass sets, on every node of the subtree, the summed
    /// `value` and [`Mutations`] and the derived coverage percentage. Nodes
    /// without any mutations get unknown (`None`) coverage.
    ///
    /// A leaf that reports more detected mutations than it has keeps its line
    /// count but contributes no mutations, and its coverage is unknown. The
    /// pass carries on past it; every such leaf is returned as a
    /// [`TreeError::InconsistentLeaf`] next to the subtree totals.
    pub fn aggregate(&mut self, id: NodeId) -> (Mutations, Vec<TreeError>) {
        let mut errors = Vec::new();
        let counts = if self.contains(id) {
            self.aggregate_into(id, &mut errors)
        } else {
            Mutations::default()
        };
        (counts, errors)
    }

    /// [`Tree::aggregate`] from the root.
    pub fn aggregate_all(&mut self) -> (Mutations, Vec<TreeError>) {
        self.aggregate(self.root())
    }

    /// Returns the child of `parent` named `name`, if any.
    pub fn find_child(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.children_of(parent)
            .iter()
            .copied()
            .find(|&c| self.node(c).name == name)
    }

    /// Name (path segment) of a node.
    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.get(id).map(|n| n.name.as_str())
    }

    /// Kind of a node.
    pub fn kind(&self, id: NodeId) -> Option<NodeKind> {
        self.get(id).map(|n| n.kind)
    }

    /// Whether `id` is a class.
    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(|n| n.kind.is_leaf())
    }

    /// Whether `id` has children and can therefore be zoomed into.
    pub fn has_children(&self, id: NodeId) -> bool {
        !self.children_of(id).is_empty()
    }

    /// Returns the parent of a node, or `None` for the root and unknown ids.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get the children of a node, or an empty slice for unknown ids.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Distance from the root (the root is at depth 0).
    pub fn depth(&self, id: NodeId) -> Option<usize> {
        self.get(id).map(|n| n.depth)
    }

    /// Size metric as of the last aggregation: line count, summed for packages.
    pub fn value(&self, id: NodeId) -> Option<u64> {
        self.get(id).map(|n| n.value)
    }

    /// Mutation counts as of the last aggregation.
    pub fn mutations(&self, id: NodeId) -> Option<Mutations> {
        self.get(id).map(|n| n.mutations)
    }

    /// Coverage percentage as of the last aggregation.
    ///
    /// `None` means unknown: either the node has no mutations or `id` is not
    /// part of this tree.
    pub fn coverage(&self, id: NodeId) -> Option<f64> {
        self.get(id).and_then(|n| n.coverage)
    }

    /// Rectangle assigned by the most recent layout of this node.
    pub fn bounds(&self, id: NodeId) -> Option<Rect> {
        self.get(id).map(|n| n.bounds)
    }

    /// Record layout geometry for a node.
    pub fn set_bounds(&mut self, id: NodeId, bounds: Rect) {
        if let Some(n) = self.nodes.get_mut(id.idx()) {
            n.bounds = bounds;
        }
    }

    /// Ancestors of `id`, nearest first, ending at the root.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        core::iter::successors(self.parent_of(id), move |&n| self.parent_of(n))
    }

    /// Returns the child of `ancestor` on the path down to `id`.
    ///
    /// Returns `None` if `ancestor` is not a proper ancestor of `id`.
    pub fn child_toward(&self, ancestor: NodeId, id: NodeId) -> Option<NodeId> {
        let mut current = id;
        while let Some(parent) = self.parent_of(current) {
            if parent == ancestor {
                return Some(current);
            }
            current = parent;
        }
        None
    }

    /// Dotted ancestry label of a node.
    ///
    /// Names from the root down to `id` joined with `.`, with a leading
    /// `root` stripped from the root's name. For a tree built with
    /// [`Tree::new`] that yields `""` for the root and `a.b` for package `b`
    /// inside `a`.
    pub fn breadcrumb(&self, id: NodeId) -> String {
        if !self.contains(id) {
            return String::new();
        }
        let mut chain: Vec<NodeId> = self.ancestors(id).collect();
        chain.reverse();
        chain.push(id);

        let mut out = String::new();
        for (i, &n) in chain.iter().enumerate() {
            let name = self.node(n).name.as_str();
            if i == 0 {
                out.push_str(name.strip_prefix("root").unwrap_or(name));
            } else {
                out.push('.');
                out.push_str(name);
            }
        }
        if out.starts_with('.') {
            out.remove(0);
        }
        out
    }

    // --- internals ---

    fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.idx())
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.idx()]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.idx()]
    }

    fn push_child(&mut self, parent: NodeId, name: &str, kind: NodeKind) -> NodeId {
        let id = NodeId::new(to_u32(self.nodes.len()));
        let depth = self.node(parent).depth + 1;
        self.nodes.push(Node::new(name, Some(parent), depth, kind));
        self.node_mut(parent).children.push(id);
        id
    }

    fn make_inner(&mut self, id: NodeId) {
        let node = self.node_mut(id);
        if node.kind.is_leaf() {
            warn!(class = %node.name, "class also used as a package; dropping its statistics");
            node.kind = NodeKind::Inner;
        }
    }

    fn aggregate_into(&mut self, id: NodeId, errors: &mut Vec<TreeError>) -> Mutations {
        let (counts, value) = match self.node(id).kind {
            NodeKind::Leaf(stats) => {
                let counts = stats.counts();
                if counts.is_consistent() {
                    (counts, stats.lines)
                } else {
                    let error = TreeError::InconsistentLeaf {
                        path: self.dotted_path(id),
                        total: counts.total,
                        detected: counts.detected,
                    };
                    warn!(%error, "leaf left out of mutation totals");
                    errors.push(error);
                    (Mutations::default(), stats.lines)
                }
            }
            NodeKind::Inner => {
                let mut counts = Mutations::default();
                let mut value = 0_u64;
                for i in 0..self.node(id).children.len() {
                    let child = self.node(id).children[i];
                    counts = counts + self.aggregate_into(child, errors);
                    value = value.saturating_add(self.node(child).value);
                }
                (counts, value)
            }
        };
        let node = self.node_mut(id);
        node.mutations = counts;
        node.value = value;
        node.coverage = counts.percent();
        counts
    }

    /// Names below the root joined with `.`.
    fn dotted_path(&self, id: NodeId) -> String {
        let mut chain: Vec<NodeId> = self.ancestors(id).collect();
        chain.reverse();
        chain.push(id);
        let names: Vec<&str> = chain
            .iter()
            .skip(1)
            .map(|&n| self.node(n).name.as_str())
            .collect();
        names.join(".")
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "NodeId indices are 32-bit; trees never hold that many nodes."
)]
fn to_u32(idx: usize) -> u32 {
    idx as u32
}
