pub mod condition;
pub mod element;
pub mod snapshot;

pub use condition::{Condition, ConditionSet, Expected};
pub use element::{AttributeMap, Element};
pub use snapshot::Snapshot;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_serializes() {
        let mut text = Element::new();
        text.attributes
            .insert("type".to_string(), "XCUIElementTypeStaticText".to_string());
        text.attributes
            .insert("value".to_string(), "iBooks".to_string());
        let mut window = Element::new();
        window
            .attributes
            .insert("type".to_string(), "XCUIElementTypeWindow".to_string());
        window
            .children
            .insert("XCUIElementTypeStaticText".to_string(), vec![text]);
        let snapshot = Snapshot {
            roots: vec![window],
        };

        let json = serde_json::to_string(&snapshot).expect("serialize snapshot");
        let round: Snapshot = serde_json::from_str(&json).expect("deserialize snapshot");
        assert_eq!(round, snapshot);
        assert_eq!(round.element_count(), 2);
    }

    #[test]
    fn element_deserializes_with_missing_fields() {
        let element: Element =
            serde_json::from_str(r#"{"attributes":{"label":"Done"}}"#).expect("deserialize");
        assert_eq!(element.attr("label"), Some("Done"));
        assert!(element.is_leaf());
    }
}
