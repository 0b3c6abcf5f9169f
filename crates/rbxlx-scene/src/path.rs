//! Identifier paths from the tree root to a node.

use std::fmt;

use crate::tree::{SceneTree, TreeNode};

/// Synthetic first segment of every path.
pub const ROOT_MARKER: &str = "root";

/// Node ids from a top-level node down to a target, behind the root marker.
///
/// A path holding only the root marker means "not found".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodePath {
    ids: Vec<String>,
}

impl NodePath {
    /// The root-only path.
    pub fn root() -> Self {
        Self::default()
    }

    /// Build a path from node ids, top-level node first.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Node ids after the root marker.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// All segments, starting with [`ROOT_MARKER`].
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        std::iter::once(ROOT_MARKER).chain(self.ids.iter().map(String::as_str))
    }

    /// Number of segments, counting the root marker.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.ids.len() + 1
    }

    /// True if the path leads to a node.
    pub fn is_found(&self) -> bool {
        !self.ids.is_empty()
    }

    /// Id of the node the path leads to.
    pub fn target(&self) -> Option<&str> {
        self.ids.last().map(String::as_str)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(ROOT_MARKER)?;
        for id in &self.ids {
            write!(f, "/{}", id)?;
        }
        Ok(())
    }
}

/// Compute the path to the first node with `id`, searching depth-first in
/// document order. Returns the root-only path if no node matches.
pub fn resolve_path(tree: &SceneTree, id: &str) -> NodePath {
    let mut stack = Vec::new();
    if search(tree.roots(), id, &mut stack) {
        NodePath { ids: stack }
    } else {
        NodePath::root()
    }
}

fn search(nodes: &[TreeNode], id: &str, stack: &mut Vec<String>) -> bool {
    for node in nodes {
        stack.push(node.id.clone());
        if node.id == id || search(&node.children, id, stack) {
            return true;
        }
        stack.pop();
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use rbxlx_dom::RawDocument;

    fn tree() -> SceneTree {
        let document = RawDocument::parse(
            r#"<roblox>
                <Item class="Workspace" referent="W">
                    <Item class="Model" referent="M"><Item class="Part" referent="P"/></Item>
                    <Item class="Part" referent="Q"/>
                </Item>
                <Item class="Lighting" referent="L"/>
            </roblox>"#,
        )
        .unwrap();
        SceneTree::build(&document).unwrap()
    }

    #[test]
    fn test_resolve_nested() {
        let path = resolve_path(&tree(), "P");
        assert_eq!(path.ids(), ["W", "M", "P"]);
        assert_eq!(path.segments().collect::<Vec<_>>(), vec!["root", "W", "M", "P"]);
        assert_eq!(path.target(), Some("P"));
        assert_eq!(path.to_string(), "root/W/M/P");
    }

    #[test]
    fn test_resolve_top_level() {
        let path = resolve_path(&tree(), "L");
        assert_eq!(path.ids(), ["L"]);
        assert_eq!(path.len(), 2);
    }

    #[test]
    fn test_ancestor_path_is_prefix() {
        let tree = tree();
        let full = resolve_path(&tree, "P");
        let ancestor = resolve_path(&tree, "M");

        assert!(ancestor.len() < full.len());
        assert!(full.ids().starts_with(ancestor.ids()));
    }

    #[test]
    fn test_resolve_missing_is_root_only() {
        let path = resolve_path(&tree(), "nope");
        assert_eq!(path, NodePath::root());
        assert_eq!(path.len(), 1);
        assert!(!path.is_found());
        assert_eq!(path.target(), None);
    }
}
