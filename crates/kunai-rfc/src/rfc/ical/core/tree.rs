//! Read-only navigation over a borrowed component tree.

use super::{Component, ComponentKind};

/// Identifier of a node inside one [`ComponentTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in pre-order.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug)]
struct Node<'a> {
    component: &'a Component,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// An index over a component and its descendants answering parent lookups.
///
/// Components only own their children; this view borrows the tree and records
/// the parent of every node, so there are no back references to keep in sync.
/// Node ids are assigned in pre-order starting with the root at `0`, and
/// children are listed in render order.
#[derive(Debug)]
pub struct ComponentTree<'a> {
    nodes: Vec<Node<'a>>,
}

impl<'a> ComponentTree<'a> {
    /// Indexes `root` and everything below it.
    #[must_use]
    pub fn new(root: &'a Component) -> Self {
        let mut tree = Self { nodes: Vec::new() };
        tree.insert(root, None);
        tree
    }

    fn insert(&mut self, component: &'a Component, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            component,
            parent,
            children: Vec::new(),
        });
        for child in component.children() {
            let child_id = self.insert(child, Some(id));
            self.nodes[id.0].children.push(child_id);
        }
        id
    }

    /// The root node.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of indexed components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a tree holds at least its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The component at `id`.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&'a Component> {
        self.nodes.get(id.0).map(|n| n.component)
    }

    /// The parent of `id`; `None` for the root.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0)?.parent
    }

    /// Direct children of `id`.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id.0)
            .map(|n| n.children.as_slice())
            .unwrap_or_default()
    }

    /// Ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), |current| self.parent(*current))
    }

    /// Every node in pre-order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &'a Component)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId(i), n.component))
    }

    /// Nodes whose component is of `kind`, in pre-order.
    pub fn find(&self, kind: ComponentKind) -> impl Iterator<Item = NodeId> + '_ {
        self.iter()
            .filter(move |(_, c)| c.kind() == kind)
            .map(|(id, _)| id)
    }
}
