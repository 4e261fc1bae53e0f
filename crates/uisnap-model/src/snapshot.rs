use serde::{Deserialize, Serialize};

use crate::element::Element;

/// A parsed UI hierarchy snapshot.
///
/// The roots are the window elements of the captured application, in
/// document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Top-level window elements in document order.
    pub roots: Vec<Element>,
}

impl Snapshot {
    /// Total number of elements across all roots.
    pub fn element_count(&self) -> usize {
        self.roots.iter().map(Element::subtree_len).sum()
    }

    /// True if the snapshot holds no windows at all.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}
