use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;
use std::str::FromStr;

use crate::element::Element;

/// Expected value(s) for one attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expected {
    /// The attribute must equal this value exactly.
    Value(String),
    /// The attribute must equal one of these values.
    ///
    /// An empty list matches nothing.
    OneOf(Vec<String>),
}

impl Expected {
    /// Expectation for a single exact value.
    pub fn value(value: impl Into<String>) -> Self {
        Self::Value(value.into())
    }

    /// Expectation satisfied by any of the given values.
    pub fn one_of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::OneOf(values.into_iter().map(Into::into).collect())
    }

    /// True if `actual` satisfies this expectation.
    pub fn matches_value(&self, actual: &str) -> bool {
        match self {
            Self::Value(expected) => actual == expected,
            Self::OneOf(values) => values.iter().any(|value| value == actual),
        }
    }

    /// Merges another expectation into this one, keeping every alternative.
    fn widen(&mut self, other: Expected) {
        let mut values = match std::mem::replace(self, Self::OneOf(Vec::new())) {
            Self::Value(value) => vec![value],
            Self::OneOf(values) => values,
        };
        match other {
            Self::Value(value) => push_unique(&mut values, value),
            Self::OneOf(more) => {
                for value in more {
                    push_unique(&mut values, value);
                }
            }
        }
        *self = Self::OneOf(values);
    }
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.write_str(value),
            Self::OneOf(values) => f.write_str(&values.join(",")),
        }
    }
}

fn push_unique(values: &mut Vec<String>, value: String) {
    if !values.contains(&value) {
        values.push(value);
    }
}

/// One attribute condition, as written on the command line: `key=value`.
///
/// A comma in the value part turns the condition into an alternative set,
/// so `type=A,B` accepts either value. The key and every value are
/// whitespace-trimmed, which keeps `type=A, B` natural to write; a value
/// whose leading or trailing spaces are significant has to be built with
/// [`ConditionSet::with_value`] instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    /// Attribute name to test.
    pub key: String,
    /// Expected value(s) for that attribute.
    pub expected: Expected,
}

impl FromStr for Condition {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let Some((key, value)) = raw.split_once('=') else {
            return Err(format!("expected KEY=VALUE, got `{raw}`"));
        };
        let key = key.trim();
        if key.is_empty() {
            return Err(format!("condition `{raw}` has an empty attribute name"));
        }
        let alternatives: Vec<&str> = value.split(',').map(str::trim).collect();
        let expected = if alternatives.len() == 1 {
            Expected::value(alternatives[0])
        } else {
            Expected::one_of(alternatives)
        };
        Ok(Self {
            key: key.to_string(),
            expected,
        })
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.expected)
    }
}

/// A conjunction of attribute conditions.
///
/// Every condition must hold for an element to match. An empty set matches
/// every element. An element that lacks a conditioned attribute simply does
/// not match; a missing attribute is never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConditionSet {
    conditions: BTreeMap<String, Expected>,
}

impl ConditionSet {
    /// Creates an empty set, which matches every element.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct attribute names under condition.
    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    /// True if no condition has been added.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Adds a condition for `key`.
    ///
    /// If the key already has an expectation, the two are merged into an
    /// alternative set, so repeated conditions on one attribute read as OR.
    pub fn insert(&mut self, key: impl Into<String>, expected: Expected) {
        match self.conditions.entry(key.into()) {
            Entry::Vacant(slot) => {
                slot.insert(expected);
            }
            Entry::Occupied(mut slot) => slot.get_mut().widen(expected),
        }
    }

    /// Builder form of [`ConditionSet::insert`] for a single exact value.
    #[must_use]
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, Expected::value(value));
        self
    }

    /// Builder form of [`ConditionSet::insert`] for an alternative set.
    #[must_use]
    pub fn with_one_of<I, S>(mut self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(key, Expected::one_of(values));
        self
    }

    /// True if the element satisfies every condition in the set.
    pub fn matches(&self, element: &Element) -> bool {
        self.conditions.iter().all(|(key, expected)| {
            element
                .attr(key)
                .is_some_and(|actual| expected.matches_value(actual))
        })
    }

    /// Iterates over the conditions in attribute-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Expected)> {
        self.conditions
            .iter()
            .map(|(key, expected)| (key.as_str(), expected))
    }
}

impl FromIterator<Condition> for ConditionSet {
    fn from_iter<I: IntoIterator<Item = Condition>>(iter: I) -> Self {
        let mut set = Self::new();
        for condition in iter {
            set.insert(condition.key, condition.expected);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn static_text(label: &str) -> Element {
        let mut element = Element::new();
        element
            .attributes
            .insert("type".to_string(), "XCUIElementTypeStaticText".to_string());
        element
            .attributes
            .insert("label".to_string(), label.to_string());
        element
    }

    #[test]
    fn empty_set_matches_everything() {
        let set = ConditionSet::new();
        assert!(set.is_empty());
        assert!(set.matches(&static_text("anything")));
        assert!(set.matches(&Element::new()));
    }

    #[test]
    fn conjunction_requires_every_key() {
        let set = ConditionSet::new()
            .with_value("label", "iBooks")
            .with_value("type", "XCUIElementTypeStaticText");

        assert!(set.matches(&static_text("iBooks")));
        assert!(!set.matches(&static_text("Settings")));
    }

    #[test]
    fn missing_attribute_is_a_non_match() {
        let set = ConditionSet::new().with_value("name", "Sathees Vidyo");
        assert!(!set.matches(&static_text("Sathees Vidyo")));
    }

    #[test]
    fn one_of_accepts_any_listed_value() {
        let expected = Expected::one_of(["XCUIElementTypeTable", "XCUIElementTypeStaticText"]);
        assert!(expected.matches_value("XCUIElementTypeTable"));
        assert!(expected.matches_value("XCUIElementTypeStaticText"));
        assert!(!expected.matches_value("XCUIElementTypeCell"));
    }

    #[test]
    fn empty_one_of_matches_nothing() {
        let expected = Expected::one_of(Vec::<String>::new());
        assert!(!expected.matches_value(""));
        assert!(!expected.matches_value("anything"));
    }

    #[test]
    fn repeated_insert_widens_to_alternatives() {
        let mut set = ConditionSet::new();
        set.insert("type", Expected::value("XCUIElementTypeTable"));
        set.insert("type", Expected::value("XCUIElementTypeStaticText"));
        assert_eq!(set.len(), 1);

        let mut table = Element::new();
        table
            .attributes
            .insert("type".to_string(), "XCUIElementTypeTable".to_string());
        assert!(set.matches(&table));
        assert!(set.matches(&static_text("x")));
    }

    #[test]
    fn widen_drops_duplicate_alternatives() {
        let mut expected = Expected::value("A");
        expected.widen(Expected::one_of(["A", "B"]));
        assert_eq!(expected, Expected::one_of(["A", "B"]));
    }

    #[test]
    fn condition_parses_single_value() {
        let condition: Condition = "label=Sathees Vidyo".parse().unwrap();
        assert_eq!(condition.key, "label");
        assert_eq!(condition.expected, Expected::value("Sathees Vidyo"));
    }

    #[test]
    fn condition_parses_comma_as_alternatives() {
        let condition: Condition = "type=XCUIElementTypeTable, XCUIElementTypeStaticText"
            .parse()
            .unwrap();
        assert_eq!(
            condition.expected,
            Expected::one_of(["XCUIElementTypeTable", "XCUIElementTypeStaticText"])
        );
    }

    #[test]
    fn condition_keeps_equals_signs_in_value() {
        let condition: Condition = "value=a=b".parse().unwrap();
        assert_eq!(condition.expected, Expected::value("a=b"));
    }

    #[test]
    fn condition_trims_keys_and_values() {
        let condition: Condition = " label = Sathees Vidyo ".parse().unwrap();
        assert_eq!(condition.key, "label");
        assert_eq!(condition.expected, Expected::value("Sathees Vidyo"));
    }

    #[test]
    fn condition_rejects_missing_separator_and_empty_key() {
        assert!("label".parse::<Condition>().is_err());
        assert!("=iBooks".parse::<Condition>().is_err());
    }

    #[test]
    fn condition_set_collects_repeated_keys() {
        let conditions = ["type=A", "type=B", "label=iBooks"]
            .iter()
            .map(|raw| raw.parse::<Condition>().unwrap());
        let set: ConditionSet = conditions.collect();

        assert_eq!(set.len(), 2);
        let expected: Vec<_> = set.iter().collect();
        assert_eq!(expected[0].0, "label");
        assert_eq!(expected[1].1, &Expected::one_of(["A", "B"]));
    }

    #[test]
    fn display_round_trips_readably() {
        let condition: Condition = "type=A,B".parse().unwrap();
        assert_eq!(condition.to_string(), "type=A,B");
    }
}
