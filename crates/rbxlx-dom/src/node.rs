//! Generic element node of the raw document.

/// An element in the raw document tree.
///
/// Attributes, element text and CDATA are kept in separate slots, so a value
/// carried as `value="..."` never collides with one carried as a nested element
/// or as text. Children are kept in document order; grouping them by tag is a
/// view over that order (see [`RawNode::tag_groups`]).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct RawNode {
    /// Tag name of the element.
    pub tag: String,
    /// Attributes as key-value pairs, in document order.
    pub attributes: Vec<(String, String)>,
    /// Unescaped element text, if any non-whitespace text was present.
    #[cfg_attr(feature = "json", serde(skip_serializing_if = "Option::is_none"))]
    pub text: Option<String>,
    /// CDATA body, if the element carried one or more CDATA sections.
    #[cfg_attr(feature = "json", serde(skip_serializing_if = "Option::is_none"))]
    pub cdata: Option<String>,
    /// Child elements.
    #[cfg_attr(feature = "json", serde(skip_serializing_if = "Vec::is_empty"))]
    pub children: Vec<RawNode>,
}

impl RawNode {
    /// Create a new empty node with the given tag name.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            text: None,
            cdata: None,
            children: Vec::new(),
        }
    }

    /// Add an attribute to this node.
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    /// Set the text content of this node.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set the CDATA content of this node.
    pub fn with_cdata(mut self, cdata: impl Into<String>) -> Self {
        self.cdata = Some(cdata.into());
        self
    }

    /// Add a child node.
    pub fn child(mut self, child: RawNode) -> Self {
        self.children.push(child);
        self
    }

    /// Add multiple children.
    pub fn children(mut self, children: impl IntoIterator<Item = RawNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Get an attribute value by key.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Replace an attribute value in place, or append it if absent.
    pub fn set_attribute(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value,
            None => self.attributes.push((key.to_string(), value)),
        }
    }

    /// Iterate over the children with the given tag, in document order.
    pub fn children_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a RawNode> + 'a {
        self.children.iter().filter(move |c| c.tag == tag)
    }

    /// Mutable variant of [`RawNode::children_named`].
    pub fn children_named_mut<'a>(
        &'a mut self,
        tag: &'a str,
    ) -> impl Iterator<Item = &'a mut RawNode> + 'a {
        self.children.iter_mut().filter(move |c| c.tag == tag)
    }

    /// The first child with the given tag.
    pub fn child_named(&self, tag: &str) -> Option<&RawNode> {
        self.children.iter().find(|c| c.tag == tag)
    }

    /// Mutable variant of [`RawNode::child_named`].
    pub fn child_named_mut(&mut self, tag: &str) -> Option<&mut RawNode> {
        self.children.iter_mut().find(|c| c.tag == tag)
    }

    /// Distinct child tags in the order they are first encountered.
    pub fn tag_groups(&self) -> Vec<&str> {
        let mut groups: Vec<&str> = Vec::new();
        for child in &self.children {
            if !groups.contains(&child.tag.as_str()) {
                groups.push(&child.tag);
            }
        }
        groups
    }

    /// True if the node has no attributes, text, CDATA or children.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
            && self.text.is_none()
            && self.cdata.is_none()
            && self.children.is_empty()
    }

    /// True if the element can be written as `<tag .../>`.
    pub(crate) fn is_self_closing(&self) -> bool {
        self.text.is_none() && self.cdata.is_none() && self.children.is_empty()
    }
}
