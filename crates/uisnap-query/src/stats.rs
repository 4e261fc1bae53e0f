//! Aggregate figures over a snapshot, used by summary output.

use std::collections::BTreeMap;

use uisnap_model::{ConditionSet, Element, Snapshot};

use crate::engine::find_elements;

/// Attribute holding the element class in XCUITest dumps.
pub const TYPE_ATTRIBUTE: &str = "type";

/// Count label for elements without a `type` attribute.
pub const UNTYPED_LABEL: &str = "(untyped)";

/// Number of elements per `type` attribute value, sorted by type name.
pub fn type_counts(snapshot: &Snapshot) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for attributes in find_elements(snapshot, &ConditionSet::new()) {
        let type_name = attributes
            .get(TYPE_ATTRIBUTE)
            .map_or(UNTYPED_LABEL, String::as_str);
        *counts.entry(type_name.to_string()).or_insert(0) += 1;
    }
    counts
}

/// Deepest nesting level in the snapshot. Roots sit at depth 1; an empty
/// snapshot has depth 0.
pub fn max_depth(snapshot: &Snapshot) -> usize {
    snapshot
        .roots
        .iter()
        .map(element_depth)
        .max()
        .unwrap_or(0)
}

fn element_depth(element: &Element) -> usize {
    1 + element
        .child_elements()
        .map(element_depth)
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(type_name: &str) -> Element {
        let mut element = Element::new();
        element
            .attributes
            .insert("type".to_string(), type_name.to_string());
        element
    }

    #[test]
    fn counts_types_across_roots() {
        let mut window = typed("XCUIElementTypeWindow");
        window.children.insert(
            "XCUIElementTypeButton".to_string(),
            vec![typed("XCUIElementTypeButton"), typed("XCUIElementTypeButton")],
        );
        let snapshot = Snapshot {
            roots: vec![window, typed("XCUIElementTypeWindow")],
        };

        let counts = type_counts(&snapshot);
        assert_eq!(counts["XCUIElementTypeWindow"], 2);
        assert_eq!(counts["XCUIElementTypeButton"], 2);
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn untyped_elements_get_a_placeholder_bucket() {
        let snapshot = Snapshot {
            roots: vec![Element::new()],
        };
        assert_eq!(type_counts(&snapshot)[UNTYPED_LABEL], 1);
    }

    #[test]
    fn max_depth_follows_the_deepest_chain() {
        assert_eq!(max_depth(&Snapshot::default()), 0);

        let mut cell = typed("XCUIElementTypeCell");
        cell.children.insert(
            "XCUIElementTypeStaticText".to_string(),
            vec![typed("XCUIElementTypeStaticText")],
        );
        let mut window = typed("XCUIElementTypeWindow");
        window
            .children
            .insert("XCUIElementTypeCell".to_string(), vec![cell]);
        let snapshot = Snapshot {
            roots: vec![window, typed("XCUIElementTypeWindow")],
        };
        assert_eq!(max_depth(&snapshot), 3);
    }
}
