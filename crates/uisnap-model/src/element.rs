use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Flat attribute map of a single element, sorted by attribute name.
pub type AttributeMap = BTreeMap<String, String>;

/// A single node in a UI hierarchy.
///
/// Scalar XML attributes (`type`, `name`, `label`, geometry, ...) live in
/// [`Element::attributes`]. Nested elements live in [`Element::children`],
/// grouped by their tag name in document order. The two are kept in separate
/// fields so that "the element's own data" never has to be told apart from
/// "the element's subtree" by inspecting key names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    /// Scalar attributes of this element.
    #[serde(default)]
    pub attributes: AttributeMap,
    /// Child elements grouped by tag name, each group in document order.
    #[serde(default)]
    pub children: BTreeMap<String, Vec<Element>>,
}

impl Element {
    /// Creates an element with no attributes and no children.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value of a scalar attribute, or `None` if the element
    /// does not carry it.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Returns a copy of the scalar attributes with no child data attached.
    pub fn own_attributes(&self) -> AttributeMap {
        self.attributes.clone()
    }

    /// Iterates over all direct children across every tag group.
    ///
    /// Groups are visited in tag order; within a group, children keep
    /// document order.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.values().flatten()
    }

    /// True if the element has no child elements.
    pub fn is_leaf(&self) -> bool {
        self.children.values().all(Vec::is_empty)
    }

    /// Number of elements in this subtree, including the element itself.
    pub fn subtree_len(&self) -> usize {
        1 + self
            .child_elements()
            .map(Element::subtree_len)
            .sum::<usize>()
    }
}
