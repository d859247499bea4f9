//! Search and path operations on element trees.
//!
//! A path is a sequence of tags naming a chain of direct children, starting
//! below the receiver: `["info", "title"]` names a `<title>` child of an
//! `<info>` child.

use crate::Node;

impl Node {
    /// Depth-first, pre-order search for the first element with `tag`.
    ///
    /// The receiver itself is checked first, so `node.find_child(&node.tag())`
    /// returns `node`.
    pub fn find_child(&self, tag: &str) -> Option<Node> {
        if self.has_tag(tag) {
            return Some(self.clone());
        }
        let data = self.borrow();
        data.children.iter().find_map(|child| child.find_child(tag))
    }

    /// Remove every direct child with `tag`, keeping the others in order.
    ///
    /// Removed children are detached: their parent link is cleared.
    pub fn remove_children_with_tag(&self, tag: &str) {
        let removed = self.retain_children(|child| !child.has_tag(tag));
        for node in &removed {
            node.clear_parent();
        }
        if !removed.is_empty() {
            tracing::trace!(tag, count = removed.len(), "removed children");
        }
    }

    /// Whether a chain of direct children matching `path` exists.
    ///
    /// Every same-tag sibling at each level is tried, so
    /// `<a><b/><b><c/></b></a>` contains the path `["b", "c"]`. An empty path
    /// always exists.
    pub fn check_path<S: AsRef<str>>(&self, path: &[S]) -> bool {
        let Some((first, rest)) = path.split_first() else {
            return true;
        };
        let data = self.borrow();
        data.children
            .iter()
            .any(|child| child.has_tag(first.as_ref()) && child.check_path(rest))
    }

    /// Append a new chain of elements, one per tag, and return the deepest.
    ///
    /// Existing children are never reused, so this can create siblings with
    /// the same tag. An empty path returns the receiver.
    pub fn create_path<S: AsRef<str>>(&self, path: &[S]) -> Node {
        path.iter().fold(self.clone(), |current, tag| {
            current.append_child(Node::new(tag.as_ref()))
        })
    }

    /// Replace every direct child named `path[0]` with a freshly created path.
    ///
    /// Afterwards the receiver has exactly one child named `path[0]`. An empty
    /// path returns the receiver unchanged.
    pub fn create_unique_path<S: AsRef<str>>(&self, path: &[S]) -> Node {
        let Some(first) = path.first() else {
            return self.clone();
        };
        self.remove_children_with_tag(first.as_ref());
        self.create_path(path)
    }

    /// Walk `path`, reusing the first matching child at each step and
    /// creating the rest of the path on the first miss.
    ///
    /// Calling this twice with the same path returns the same node.
    pub fn ensure_path<S: AsRef<str>>(&self, path: &[S]) -> Node {
        let mut current = self.clone();
        for (i, tag) in path.iter().enumerate() {
            match current.first_child_with_tag(tag.as_ref()) {
                Some(child) => current = child,
                None => return current.create_path(&path[i..]),
            }
        }
        current
    }
}
