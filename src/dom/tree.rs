//! Node arena and tree operations

use super::range::TextRange;

/// Arena index of a node; never reused within one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Payload of a node
#[derive(Debug, Clone)]
pub enum NodeData {
    Element {
        tag: String,
        attributes: Vec<(String, String)>,
        children: Vec<NodeId>,
    },
    Text {
        text: String,
    },
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    data: NodeData,
}

/// An owned DOM-like tree with a single `body` root.
///
/// Detached nodes keep their arena slot, so a stale [`NodeId`] held by a
/// caller resolves to a node with no parent rather than to a different node.
#[derive(Debug)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
    /// The live user text selection, if any.
    selection: Option<TextRange>,
}

impl Document {
    /// Create an empty document with a `body` root element.
    pub fn new() -> Self {
        let root_node = Node {
            parent: None,
            data: NodeData::Element {
                tag: "body".to_string(),
                attributes: Vec::new(),
                children: Vec::new(),
            },
        };
        Self {
            nodes: vec![root_node],
            root: NodeId(0),
            selection: None,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Create a detached element node.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeData::Element {
            tag: tag.to_string(),
            attributes: Vec::new(),
            children: Vec::new(),
        })
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeData::Text {
            text: text.to_string(),
        })
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node { parent: None, data });
        id
    }

    /// Append a detached node as the last child of `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        let index = self.children(parent).len();
        self.insert_child(parent, index, child);
    }

    /// Insert a detached node among `parent`'s children at `index`.
    pub fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) {
        debug_assert!(self.nodes[child.0].parent.is_none());
        if let NodeData::Element { children, .. } = &mut self.nodes[parent.0].data {
            children.insert(index, child);
        }
        self.nodes[child.0].parent = Some(parent);
    }

    /// Detach a node from its parent. No-op for the root or detached nodes.
    pub fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.nodes[node.0].parent.take() else {
            return;
        };
        if let NodeData::Element { children, .. } = &mut self.nodes[parent.0].data {
            children.retain(|&c| c != node);
        }
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        match &self.nodes[node.0].data {
            NodeData::Element { children, .. } => children,
            NodeData::Text { .. } => &[],
        }
    }

    /// Position of a node within its parent's child list.
    pub fn child_index(&self, node: NodeId) -> Option<usize> {
        let parent = self.parent(node)?;
        self.children(parent).iter().position(|&c| c == node)
    }

    pub fn data(&self, node: NodeId) -> &NodeData {
        &self.nodes[node.0].data
    }

    pub fn is_text(&self, node: NodeId) -> bool {
        matches!(self.nodes[node.0].data, NodeData::Text { .. })
    }

    pub fn tag(&self, node: NodeId) -> Option<&str> {
        match &self.nodes[node.0].data {
            NodeData::Element { tag, .. } => Some(tag),
            NodeData::Text { .. } => None,
        }
    }

    pub fn text(&self, node: NodeId) -> Option<&str> {
        match &self.nodes[node.0].data {
            NodeData::Text { text } => Some(text),
            NodeData::Element { .. } => None,
        }
    }

    pub fn set_text(&mut self, node: NodeId, value: &str) {
        if let NodeData::Text { text } = &mut self.nodes[node.0].data {
            *text = value.to_string();
        }
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        match &self.nodes[node.0].data {
            NodeData::Element { attributes, .. } => attributes
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.as_str()),
            NodeData::Text { .. } => None,
        }
    }

    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let NodeData::Element { attributes, .. } = &mut self.nodes[node.0].data {
            match attributes.iter_mut().find(|(n, _)| n == name) {
                Some((_, v)) => *v = value.to_string(),
                None => attributes.push((name.to_string(), value.to_string())),
            }
        }
    }

    pub fn remove_attribute(&mut self, node: NodeId, name: &str) {
        if let NodeData::Element { attributes, .. } = &mut self.nodes[node.0].data {
            attributes.retain(|(n, _)| n != name);
        }
    }

    /// Text leaves under `root` in document order.
    pub fn text_nodes_under(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_text_nodes(root, &mut out);
        out
    }

    fn collect_text_nodes(&self, node: NodeId, out: &mut Vec<NodeId>) {
        if self.is_text(node) {
            out.push(node);
            return;
        }
        for &child in self.children(node) {
            self.collect_text_nodes(child, out);
        }
    }

    /// Concatenated text of a subtree.
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        for leaf in self.text_nodes_under(node) {
            if let Some(text) = self.text(leaf) {
                out.push_str(text);
            }
        }
        out
    }

    /// Merge adjacent text children of `parent` and drop emptied ones.
    ///
    /// The first text node of each run keeps its id and absorbs the rest,
    /// mirroring `Node.normalize()`. Text content of `parent` is unchanged.
    pub fn normalize(&mut self, parent: NodeId) {
        let children: Vec<NodeId> = self.children(parent).to_vec();
        let mut run_head: Option<NodeId> = None;
        let mut to_detach = Vec::new();

        for child in children {
            if !self.is_text(child) {
                run_head = None;
                continue;
            }
            let text = self.text(child).unwrap_or_default().to_string();
            if text.is_empty() {
                to_detach.push(child);
                continue;
            }
            match run_head {
                Some(head) => {
                    let mut merged = self.text(head).unwrap_or_default().to_string();
                    merged.push_str(&text);
                    self.set_text(head, &merged);
                    to_detach.push(child);
                }
                None => run_head = Some(child),
            }
        }

        for node in to_detach {
            self.detach(node);
        }
    }

    pub fn selection(&self) -> Option<&TextRange> {
        self.selection.as_ref()
    }

    pub fn set_selection(&mut self, range: TextRange) {
        self.selection = Some(range);
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
