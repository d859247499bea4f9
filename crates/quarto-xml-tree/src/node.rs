//! The element tree: reference-counted nodes with weak parent links.

use indexmap::IndexMap;
use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

/// Attribute name to value, in insertion order.
pub type Attributes = IndexMap<String, String>;

#[derive(Default)]
pub(crate) struct NodeData {
    pub(crate) tag: String,
    /// Never owning; only `append_child`, `detach` and
    /// `remove_children_with_tag` write it.
    parent: Weak<RefCell<NodeData>>,
    pub(crate) children: Vec<Node>,
    pub(crate) inner_text: String,
    /// Created on the first `set_attribute`. `None` and an empty map mean the same.
    pub(crate) attributes: Option<Attributes>,
}

/// A handle to one XML element.
///
/// Cloning a `Node` clones the handle, not the element: both handles see the
/// same tag, attributes, text and children. Use [`Node::deep_clone`] for an
/// independent copy of a subtree.
///
/// Children are owned by their parent. The parent link is weak, so dropping
/// the last handle to a root frees the whole tree.
///
/// `PartialEq` compares structure (tag, text, attribute set and children in
/// order) and ignores parents. Use [`Node::ptr_eq`] to test identity.
#[derive(Clone, Default)]
pub struct Node(Rc<RefCell<NodeData>>);

impl Node {
    /// Create a detached element with the given tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self(Rc::new(RefCell::new(NodeData {
            tag: tag.into(),
            ..NodeData::default()
        })))
    }

    /// Builder form of [`Node::set_attribute`].
    pub fn with_attribute(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Builder form of [`Node::set_inner_text`].
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.set_inner_text(text);
        self
    }

    pub(crate) fn borrow(&self) -> Ref<'_, NodeData> {
        self.0.borrow()
    }

    /// The element's tag name, including any prefix.
    pub fn tag(&self) -> String {
        self.0.borrow().tag.clone()
    }

    /// Check the tag without cloning it.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.0.borrow().tag == tag
    }

    /// Rename the element. Children and attributes are untouched.
    pub fn set_tag(&self, tag: impl Into<String>) {
        self.0.borrow_mut().tag = tag.into();
    }

    /// The element's text, or an empty string if it has none.
    pub fn inner_text(&self) -> String {
        self.0.borrow().inner_text.clone()
    }

    /// Replace the text content. The value is stored as given; only the
    /// parser trims whitespace.
    pub fn set_inner_text(&self, text: impl Into<String>) {
        self.0.borrow_mut().inner_text = text.into();
    }

    /// Replace the text content, returning the previous value.
    pub(crate) fn replace_inner_text(&self, text: &str) -> String {
        std::mem::replace(&mut self.0.borrow_mut().inner_text, text.to_string())
    }

    /// The enclosing element, or `None` for a root or detached node.
    pub fn parent(&self) -> Option<Node> {
        self.0.borrow().parent.upgrade().map(Node)
    }

    /// Handles to the direct children, in document order.
    pub fn children(&self) -> Vec<Node> {
        self.0.borrow().children.clone()
    }

    /// Number of direct child elements.
    pub fn child_count(&self) -> usize {
        self.0.borrow().children.len()
    }

    /// The first direct child with the given tag.
    pub fn first_child_with_tag(&self, tag: &str) -> Option<Node> {
        let data = self.0.borrow();
        data.children.iter().find(|child| child.has_tag(tag)).cloned()
    }

    /// A snapshot of the attributes in insertion order.
    pub fn attributes(&self) -> Attributes {
        self.0.borrow().attributes.clone().unwrap_or_default()
    }

    /// Whether two handles refer to the same element.
    pub fn ptr_eq(a: &Node, b: &Node) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }

    /// Attach `node` as the last child and return it.
    ///
    /// A node that already has a parent is moved: it is first removed from
    /// its old parent's children. No cycle check is made; appending an
    /// ancestor under its own descendant leaks the cycle.
    pub fn append_child(&self, node: Node) -> Node {
        node.detach();
        node.0.borrow_mut().parent = Rc::downgrade(&self.0);
        self.0.borrow_mut().children.push(node.clone());
        node
    }

    /// Attach `node` as the last child and return the receiver.
    pub fn chain_append_child(&self, node: Node) -> &Self {
        self.append_child(node);
        self
    }

    /// Attach every node in order and return the receiver.
    pub fn chain_append_children<I>(&self, nodes: I) -> &Self
    where
        I: IntoIterator<Item = Node>,
    {
        for node in nodes {
            self.append_child(node);
        }
        self
    }

    /// Remove this node from its parent's children. No-op for a root.
    pub fn detach(&self) {
        let parent = std::mem::take(&mut self.0.borrow_mut().parent);
        if let Some(parent) = parent.upgrade() {
            parent
                .borrow_mut()
                .children
                .retain(|child| !Rc::ptr_eq(&child.0, &self.0));
        }
    }

    pub(crate) fn clear_parent(&self) {
        self.0.borrow_mut().parent = Weak::new();
    }

    pub(crate) fn retain_children<F>(&self, keep: F) -> Vec<Node>
    where
        F: Fn(&Node) -> bool,
    {
        let mut data = self.0.borrow_mut();
        let (kept, removed): (Vec<Node>, Vec<Node>) =
            std::mem::take(&mut data.children).into_iter().partition(keep);
        data.children = kept;
        removed
    }

    /// Set an attribute, creating the map if needed. Empty names are ignored.
    pub fn set_attribute(&self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        if name.is_empty() {
            tracing::debug!(tag = %self.0.borrow().tag, "ignoring attribute with an empty name");
            return;
        }
        self.0
            .borrow_mut()
            .attributes
            .get_or_insert_with(Attributes::new)
            .insert(name, value.into());
    }

    /// The attribute value, or an empty string when it is not set.
    pub fn get_attribute(&self, name: &str) -> String {
        self.0
            .borrow()
            .attributes
            .as_ref()
            .and_then(|attributes| attributes.get(name))
            .cloned()
            .unwrap_or_default()
    }

    /// Whether an attribute named `name` is set, even to an empty value.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.0
            .borrow()
            .attributes
            .as_ref()
            .is_some_and(|attributes| attributes.contains_key(name))
    }

    /// Remove the attribute named `name`. The order of the remaining
    /// attributes is kept. Does nothing if it is not set.
    pub fn remove_attribute(&self, name: &str) {
        if let Some(attributes) = self.0.borrow_mut().attributes.as_mut() {
            attributes.shift_remove(name);
        }
    }

    /// Copy this subtree into fresh nodes. The copy has no parent.
    pub fn deep_clone(&self) -> Node {
        let data = self.0.borrow();
        let copy = Node(Rc::new(RefCell::new(NodeData {
            tag: data.tag.clone(),
            parent: Weak::new(),
            children: Vec::with_capacity(data.children.len()),
            inner_text: data.inner_text.clone(),
            attributes: data.attributes.clone(),
        })));
        for child in &data.children {
            copy.append_child(child.deep_clone());
        }
        copy
    }
}

fn attributes_eq(a: Option<&Attributes>, b: Option<&Attributes>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a == b,
        (Some(only), None) | (None, Some(only)) => only.is_empty(),
        (None, None) => true,
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        if Node::ptr_eq(self, other) {
            return true;
        }
        let (a, b) = (self.0.borrow(), other.0.borrow());
        a.tag == b.tag
            && a.inner_text == b.inner_text
            && attributes_eq(a.attributes.as_ref(), b.attributes.as_ref())
            && a.children == b.children
    }
}

impl Eq for Node {}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.0.borrow();
        let mut s = f.debug_struct("Node");
        s.field("tag", &data.tag);
        if let Some(attributes) = data.attributes.as_ref().filter(|a| !a.is_empty()) {
            s.field("attributes", attributes);
        }
        if !data.inner_text.is_empty() {
            s.field("inner_text", &data.inner_text);
        }
        if !data.children.is_empty() {
            s.field("children", &data.children);
        }
        s.finish()
    }
}
