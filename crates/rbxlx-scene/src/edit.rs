//! Pure edits of the raw document and the scene tree.
//!
//! Every function here takes its inputs by reference and returns new values.
//! Callers keep the document and tree edits paired, which [`edit_property`]
//! does for them.

use rbxlx_dom::{RawDocument, RawNode};

use crate::codec::{self, EditOutcome};
use crate::ids::{ItemIds, ITEM_TAG, PROPERTIES_TAG};
use crate::path::{NodePath, ROOT_MARKER};
use crate::property::{Property, PropertyLocator, NAME_LOCATOR};
use crate::tree::{display_name, SceneTree, TreeNode};
use crate::{Error, Result};

/// A document and tree after one property edit.
#[derive(Debug, Clone)]
pub struct Edit {
    /// The updated document.
    pub document: RawDocument,
    /// The updated tree, mirroring the document edit.
    pub tree: SceneTree,
    /// Whether the codec changed the field.
    pub outcome: EditOutcome,
}

/// Write `value` into one property of the item at `path`.
///
/// Returns a new document; `document` is not modified. Fails if a path
/// segment, the property-type group, or the named property cannot be found.
/// An input the codec cannot parse is not an error: the document comes back
/// unchanged with [`EditOutcome::Unchanged`].
pub fn apply_property_edit(
    document: &RawDocument,
    path: &NodePath,
    locator: &PropertyLocator,
    value: &str,
) -> Result<(RawDocument, EditOutcome)> {
    let (document, _, outcome) = encode_at(document, path, locator, value)?;
    Ok((document, outcome))
}

/// Replace the node at `path` with `update(node)`.
///
/// Returns an unchanged copy if the path does not resolve.
pub fn apply_tree_edit<F>(tree: &SceneTree, path: &NodePath, update: F) -> SceneTree
where
    F: FnOnce(&TreeNode) -> TreeNode,
{
    let mut updated = tree.clone();
    if let Some(node) = find_node_mut(updated.roots_mut(), path.ids()) {
        let replacement = update(node);
        *node = replacement;
    }
    updated
}

/// Edit a property in the document and mirror the new value into the tree.
///
/// `locator` is `<type>.<name>`, e.g. `Vector3.Size`. Editing the locator a
/// script node took its body from updates the node's `content`.
pub fn edit_property(
    document: &RawDocument,
    tree: &SceneTree,
    path: &NodePath,
    locator: &str,
    value: &str,
) -> Result<Edit> {
    let parsed: PropertyLocator = locator.parse()?;
    let (document, fragment, outcome) = encode_at(document, path, &parsed, value)?;

    tracing::debug!(%path, %locator, ?outcome, "applied property edit");

    let tree = match outcome {
        EditOutcome::Unchanged => tree.clone(),
        EditOutcome::Applied => apply_tree_edit(tree, path, |node| {
            mirror_property(node, &parsed, &fragment)
        }),
    };

    Ok(Edit {
        document,
        tree,
        outcome,
    })
}

/// Replace a script node's body. Shorthand for [`edit_property`] with
/// `ProtectedString.Source`.
pub fn edit_script_body(
    document: &RawDocument,
    tree: &SceneTree,
    path: &NodePath,
    content: &str,
) -> Result<Edit> {
    edit_property(
        document,
        tree,
        path,
        &PropertyLocator::script_source().to_string(),
        content,
    )
}

/// Clone the document, encode into the located fragment, and return the
/// updated fragment alongside.
fn encode_at(
    document: &RawDocument,
    path: &NodePath,
    locator: &PropertyLocator,
    value: &str,
) -> Result<(RawDocument, RawNode, EditOutcome)> {
    if !path.is_found() {
        return Err(Error::PathNotFound {
            segment: ROOT_MARKER.to_string(),
        });
    }

    let ids = ItemIds::collect(document.root())?;
    let mut updated = document.clone();

    let item = find_item_mut(updated.root_mut(), path.ids(), &mut Vec::new(), &ids)?;
    let container = item
        .child_named_mut(PROPERTIES_TAG)
        .ok_or_else(|| Error::PropertyGroupNotFound {
            group: locator.type_name.clone(),
        })?;

    if container.child_named(&locator.type_name).is_none() {
        return Err(Error::PropertyGroupNotFound {
            group: locator.type_name.clone(),
        });
    }

    let fragment = container
        .children_named_mut(&locator.type_name)
        .find(|p| p.attribute("name") == Some(locator.name.as_str()))
        .ok_or_else(|| Error::PropertyNotFound {
            group: locator.type_name.clone(),
            name: locator.name.clone(),
        })?;

    let outcome = codec::encode(fragment, value);
    let fragment = fragment.clone();

    Ok((updated, fragment, outcome))
}

/// Follow item ids down from `parent`.
fn find_item_mut<'a>(
    parent: &'a mut RawNode,
    ids: &[String],
    position: &mut Vec<usize>,
    item_ids: &ItemIds,
) -> Result<&'a mut RawNode> {
    let Some((first, rest)) = ids.split_first() else {
        return Ok(parent);
    };

    let index = parent
        .children_named(ITEM_TAG)
        .enumerate()
        .find(|(index, item)| item_ids.id_for(item, position, *index) == *first)
        .map(|(index, _)| index)
        .ok_or_else(|| Error::PathNotFound {
            segment: first.clone(),
        })?;

    position.push(index);
    let item = parent
        .children_named_mut(ITEM_TAG)
        .nth(index)
        .ok_or_else(|| Error::PathNotFound {
            segment: first.clone(),
        })?;

    find_item_mut(item, rest, position, item_ids)
}

fn find_node_mut<'a>(nodes: &'a mut [TreeNode], ids: &[String]) -> Option<&'a mut TreeNode> {
    let (first, rest) = ids.split_first()?;
    let node = nodes.iter_mut().find(|node| node.id == *first)?;

    if rest.is_empty() {
        Some(node)
    } else {
        find_node_mut(&mut node.children, rest)
    }
}

/// Copy a node with one property (or its script body) re-decoded from the
/// edited fragment. Editing `string.Name` also renames the node.
fn mirror_property(node: &TreeNode, locator: &PropertyLocator, fragment: &RawNode) -> TreeNode {
    let mut node = node.clone();
    let path = locator.to_string();

    if path == NAME_LOCATOR {
        node.name = display_name(codec::scalar_text(fragment), &node.class);
    }

    if node.source_property_path.as_deref() == Some(path.as_str()) {
        node.content = Some(codec::decode(fragment).as_str().unwrap_or_default().to_string());
    } else if let Some(property) = node.properties.iter_mut().find(|p| p.path == path) {
        *property = Property::from_fragment(&locator.type_name, fragment);
    }

    node
}
