//! Navigable scene tree derived from the raw document.

use rbxlx_dom::{RawDocument, RawNode};

use crate::codec;
use crate::ids::{ItemIds, CLASS_ATTR, ITEM_TAG, PROPERTIES_TAG};
use crate::property::{Property, SCRIPT_SOURCE_LOCATOR};
use crate::Result;

/// One scene object.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct TreeNode {
    /// Referent of the item, or a synthesized id if it has none.
    pub id: String,
    /// Value of the `Name` string property, falling back to the class name.
    pub name: String,
    /// The item's `class` attribute.
    pub class: String,
    /// Nested items, in document order.
    pub children: Vec<TreeNode>,
    /// All properties except a script's `Source`.
    pub properties: Vec<Property>,
    /// Script body, for script nodes.
    #[cfg_attr(feature = "json", serde(skip_serializing_if = "Option::is_none"))]
    pub content: Option<String>,
    /// Whether the item has a `ProtectedString` named `Source`.
    pub is_script: bool,
    /// Locator of the property the script body came from.
    #[cfg_attr(feature = "json", serde(skip_serializing_if = "Option::is_none"))]
    pub source_property_path: Option<String>,
}

impl TreeNode {
    /// Find a property by its `<type>.<name>` locator.
    pub fn property(&self, locator: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.path == locator)
    }
}

/// The top-level items of a document and everything below them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(transparent))]
pub struct SceneTree {
    roots: Vec<TreeNode>,
}

impl SceneTree {
    /// Build the tree from a document's item hierarchy.
    ///
    /// Fails if two items declare the same referent.
    pub fn build(document: &RawDocument) -> Result<Self> {
        let ids = ItemIds::collect(document.root())?;
        let roots = build_items(document.root(), &mut Vec::new(), &ids);

        let tree = Self { roots };
        tracing::debug!(nodes = tree.iter().count(), "built scene tree");
        Ok(tree)
    }

    /// Create a tree from already-built top-level nodes.
    pub fn from_roots(roots: Vec<TreeNode>) -> Self {
        Self { roots }
    }

    /// Top-level nodes.
    pub fn roots(&self) -> &[TreeNode] {
        &self.roots
    }

    pub(crate) fn roots_mut(&mut self) -> &mut Vec<TreeNode> {
        &mut self.roots
    }

    /// Find a node anywhere in the tree by id.
    pub fn find(&self, id: &str) -> Option<&TreeNode> {
        self.iter().find(|node| node.id == id)
    }

    /// Depth-first iterator over all nodes, in document order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            stack: self.roots.iter().rev().collect(),
        }
    }
}

/// Depth-first iterator over a [`SceneTree`].
pub struct Iter<'a> {
    stack: Vec<&'a TreeNode>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a TreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

fn build_items(parent: &RawNode, position: &mut Vec<usize>, ids: &ItemIds) -> Vec<TreeNode> {
    parent
        .children_named(ITEM_TAG)
        .enumerate()
        .map(|(index, item)| {
            let id = ids.id_for(item, position, index);
            position.push(index);
            let node = build_node(item, id, position, ids);
            position.pop();
            node
        })
        .collect()
}

fn build_node(item: &RawNode, id: String, position: &mut Vec<usize>, ids: &ItemIds) -> TreeNode {
    let class = item.attribute(CLASS_ATTR).unwrap_or_default().to_string();
    let container = item.child_named(PROPERTIES_TAG);
    let mut properties = container.map(flatten_properties).unwrap_or_default();

    let mut node = TreeNode {
        name: item_name(container, &class),
        id,
        class,
        children: Vec::new(),
        properties: Vec::new(),
        content: None,
        is_script: false,
        source_property_path: None,
    };

    if let Some(index) = properties.iter().position(Property::is_script_source) {
        let source = properties.remove(index);
        node.content = Some(source.value.as_str().unwrap_or_default().to_string());
        node.is_script = true;
        node.source_property_path = Some(SCRIPT_SOURCE_LOCATOR.to_string());
    }

    tracing::trace!(id = %node.id, class = %node.class, properties = properties.len(), "built node");

    node.properties = properties;
    node.children = build_items(item, position, ids);
    node
}

/// Flatten type groups in encounter order, fragments in document order.
fn flatten_properties(container: &RawNode) -> Vec<Property> {
    container
        .tag_groups()
        .into_iter()
        .flat_map(move |group| {
            container
                .children_named(group)
                .map(move |fragment| Property::from_fragment(group, fragment))
        })
        .collect()
}

fn item_name(container: Option<&RawNode>, class: &str) -> String {
    let name = container.and_then(|props| {
        props
            .children_named("string")
            .find(|p| p.attribute("name") == Some("Name"))
            .and_then(codec::scalar_text)
    });

    display_name(name, class)
}

/// Display name from a `Name` value, falling back to the class, then
/// `Unknown`. An empty name counts as missing.
pub(crate) fn display_name(name: Option<&str>, class: &str) -> String {
    match name {
        Some(name) if !name.is_empty() => name.to_string(),
        _ if !class.is_empty() => class.to_string(),
        _ => "Unknown".to_string(),
    }
}
