use termdown_core::Node;

/// A document tree together with its title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Root wrapper node with a single child
    pub root: Node,
    pub title: Option<String>,
}

impl Document {
    /// Wrap `content` in a root node
    pub fn new(content: Node, title: Option<String>) -> Self {
        Self {
            root: Node::root(content),
            title,
        }
    }
}
