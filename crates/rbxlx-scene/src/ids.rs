//! Node identifiers for document items.
//!
//! An item's id is its `referent` attribute. Items without one get an id
//! derived from their index path among sibling items (`item-0.2.1`), with a
//! `~n` suffix if that collides with a declared referent. The result depends
//! only on the document, so the tree builder and the document mutators agree
//! on every id without storing anything back into the document.

use rustc_hash::FxHashSet;

use rbxlx_dom::RawNode;

use crate::{Error, Result};

pub(crate) const ITEM_TAG: &str = "Item";
pub(crate) const PROPERTIES_TAG: &str = "Properties";
pub(crate) const REFERENT_ATTR: &str = "referent";
pub(crate) const CLASS_ATTR: &str = "class";

/// Referents declared anywhere in a document.
#[derive(Debug, Default)]
pub(crate) struct ItemIds {
    declared: FxHashSet<String>,
}

impl ItemIds {
    /// Collect every declared referent below `root`, rejecting duplicates.
    pub fn collect(root: &RawNode) -> Result<Self> {
        let mut ids = Self::default();
        ids.collect_items(root)?;
        Ok(ids)
    }

    fn collect_items(&mut self, parent: &RawNode) -> Result<()> {
        for item in parent.children_named(ITEM_TAG) {
            if let Some(referent) = declared_referent(item) {
                if !self.declared.insert(referent.to_string()) {
                    return Err(Error::DuplicateReferent(referent.to_string()));
                }
            }
            self.collect_items(item)?;
        }
        Ok(())
    }

    /// Id of the `index`-th item under the item at `parent_position`.
    pub fn id_for(&self, item: &RawNode, parent_position: &[usize], index: usize) -> String {
        if let Some(referent) = declared_referent(item) {
            return referent.to_string();
        }

        let mut base = String::from("item-");
        for position in parent_position {
            base.push_str(&position.to_string());
            base.push('.');
        }
        base.push_str(&index.to_string());

        let mut candidate = base.clone();
        let mut suffix = 1;
        while self.declared.contains(&candidate) {
            candidate = format!("{}~{}", base, suffix);
            suffix += 1;
        }
        candidate
    }
}

fn declared_referent(item: &RawNode) -> Option<&str> {
    item.attribute(REFERENT_ATTR).filter(|referent| !referent.is_empty())
}
