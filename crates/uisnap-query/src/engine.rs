//! Snapshot traversal and condition matching.
//!
//! The walk is a level expansion per root: the current level is checked
//! against the conditions, then replaced by the concatenation of every
//! element's children. Each element is therefore visited exactly once,
//! every ancestor is visited before its own descendants, and roots are
//! worked through in document order.

use tracing::debug;

use uisnap_model::{AttributeMap, ConditionSet, Element, Snapshot};

/// Returns the scalar attributes of every element in the snapshot that
/// satisfies `conditions`, at any depth.
///
/// Matches are flat attribute maps; child elements of a match are never
/// part of the returned map, though they are still visited and can match
/// on their own. An empty condition set selects every element.
pub fn find_elements(snapshot: &Snapshot, conditions: &ConditionSet) -> Vec<AttributeMap> {
    let mut matches = Vec::new();
    let mut visited = 0usize;
    for root in &snapshot.roots {
        let mut level: Vec<&Element> = vec![root];
        while !level.is_empty() {
            visited += level.len();
            matches.extend(
                level
                    .iter()
                    .filter(|element| conditions.matches(element))
                    .map(|element| element.own_attributes()),
            );
            level = next_level(&level);
        }
    }
    debug!(
        condition_count = conditions.len(),
        visited,
        match_count = matches.len(),
        "query evaluated"
    );
    matches
}

/// All children of the given elements, keeping element order.
fn next_level<'a>(level: &[&'a Element]) -> Vec<&'a Element> {
    level
        .iter()
        .flat_map(|element| element.child_elements())
        .collect()
}
