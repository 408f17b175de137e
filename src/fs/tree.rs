use std::collections::HashMap;

/// Index of a node in a [`DirTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug)]
pub struct DirNode {
    pub id: String,
    pub name: String,
    /// Upward link for `..`; `None` only for the root.
    pub parent: Option<NodeId>,
    pub children: HashMap<String, NodeId>,
    /// Set once the children were listed from the remote.
    pub children_cached: bool,
}

/// Append-only mirror of the remote directory skeleton.
///
/// Nodes live in an arena for the whole session; a child's `parent` is a
/// plain index and never owns anything.
#[derive(Debug)]
pub struct DirTree {
    nodes: Vec<DirNode>,
}

impl DirTree {
    pub fn new(root_id: impl Into<String>) -> Self {
        Self {
            nodes: vec![DirNode {
                id: root_id.into(),
                name: String::new(),
                parent: None,
                children: HashMap::new(),
                children_cached: false,
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> &DirNode {
        &self.nodes[id.0]
    }

    pub(super) fn node_mut(&mut self, id: NodeId) -> &mut DirNode {
        &mut self.nodes[id.0]
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn child(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.node(id).children.get(name).copied()
    }

    /// Add a child directory. An existing child with the same name is
    /// returned untouched.
    pub fn append(&mut self, parent: NodeId, id: &str, name: &str) -> NodeId {
        if let Some(existing) = self.child(parent, name) {
            return existing;
        }
        let child = NodeId(self.nodes.len());
        self.nodes.push(DirNode {
            id: id.to_string(),
            name: name.to_string(),
            parent: Some(parent),
            children: HashMap::new(),
            children_cached: false,
        });
        self.node_mut(parent).children.insert(name.to_string(), child);
        child
    }
}
