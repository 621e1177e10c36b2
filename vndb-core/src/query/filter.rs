//! Filter expressions in the Kana query language.
//!
//! On the wire a filter is a JSON array: a predicate is
//! `[field, operator, value]`, a reduction is `[reductor, operand, ...]`, and
//! the empty filter `[]` matches everything. Predicate values may themselves
//! be filters, which is how relations are joined (`["vn", "=", ["id", "=", "v17"]]`).

use std::fmt;

use serde::{Serialize, Serializer, ser::SerializeSeq};

/// Comparison operators accepted by the query language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Eq,
    NotEq,
    Gt,
    GtEq,
    Lt,
    LtEq,
}

impl Operator {
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::NotEq => "!=",
            Operator::Gt => ">",
            Operator::GtEq => ">=",
            Operator::Lt => "<",
            Operator::LtEq => "<=",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Boolean combinator joining sibling operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reductor {
    And,
    Or,
}

impl Reductor {
    pub fn as_str(self) -> &'static str {
        match self {
            Reductor::And => "and",
            Reductor::Or => "or",
        }
    }
}

impl fmt::Display for Reductor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Right-hand side of a predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Null,
    Bool(bool),
    Integer(i64),
    Text(String),
    /// Nested filter applied to a related entity.
    Nested(Box<Condition>),
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(value)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Bool(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Integer(value)
    }
}

impl From<u32> for FilterValue {
    fn from(value: u32) -> Self {
        FilterValue::Integer(value.into())
    }
}

impl From<Condition> for FilterValue {
    fn from(value: Condition) -> Self {
        FilterValue::Nested(Box::new(value))
    }
}

/// A non-empty filter in normal form.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Predicate {
        field: String,
        operator: Operator,
        value: FilterValue,
    },
    Reduction(Reduction),
}

impl Condition {
    pub fn predicate(
        field: impl Into<String>,
        operator: Operator,
        value: impl Into<FilterValue>,
    ) -> Self {
        Condition::Predicate {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }

    /// Depth-first search for `needle` anywhere in this tree, including
    /// inside nested relation values.
    pub fn contains(&self, needle: &Condition) -> bool {
        if self == needle {
            return true;
        }
        match self {
            Condition::Predicate {
                value: FilterValue::Nested(inner),
                ..
            } => inner.contains(needle),
            Condition::Predicate { .. } => false,
            Condition::Reduction(reduction) => {
                reduction.operands.iter().any(|op| op.contains(needle))
            }
        }
    }
}

/// Two or more operands joined by a reductor.
///
/// Only [`FilterBuilder`](super::builder::FilterBuilder) constructs these, so
/// a reduction never wraps a single operand.
#[derive(Debug, Clone, PartialEq)]
pub struct Reduction {
    reductor: Reductor,
    operands: Vec<Condition>,
}

impl Reduction {
    pub(crate) fn new(reductor: Reductor, operands: Vec<Condition>) -> Self {
        debug_assert!(operands.len() > 1);
        Self { reductor, operands }
    }

    pub fn reductor(&self) -> Reductor {
        self.reductor
    }

    pub fn operands(&self) -> &[Condition] {
        &self.operands
    }
}

/// Either the empty filter or a [`Condition`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Filter(Option<Condition>);

impl Filter {
    pub fn empty() -> Self {
        Filter(None)
    }

    pub fn predicate(
        field: impl Into<String>,
        operator: Operator,
        value: impl Into<FilterValue>,
    ) -> Self {
        Filter(Some(Condition::predicate(field, operator, value)))
    }

    /// Shorthand for the common `(field, =, value)` predicate.
    pub fn eq(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::predicate(field, Operator::Eq, value)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    pub fn condition(&self) -> Option<&Condition> {
        self.0.as_ref()
    }

    pub fn into_condition(self) -> Option<Condition> {
        self.0
    }

    pub fn contains(&self, needle: &Condition) -> bool {
        self.0.as_ref().is_some_and(|cond| cond.contains(needle))
    }
}

impl From<Condition> for Filter {
    fn from(condition: Condition) -> Self {
        Filter(Some(condition))
    }
}

impl Serialize for FilterValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FilterValue::Null => serializer.serialize_none(),
            FilterValue::Bool(value) => serializer.serialize_bool(*value),
            FilterValue::Integer(value) => serializer.serialize_i64(*value),
            FilterValue::Text(value) => serializer.serialize_str(value),
            FilterValue::Nested(inner) => inner.serialize(serializer),
        }
    }
}

impl Serialize for Condition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Condition::Predicate {
                field,
                operator,
                value,
            } => {
                let mut seq = serializer.serialize_seq(Some(3))?;
                seq.serialize_element(field)?;
                seq.serialize_element(operator.as_str())?;
                seq.serialize_element(value)?;
                seq.end()
            }
            Condition::Reduction(reduction) => {
                let mut seq = serializer
                    .serialize_seq(Some(reduction.operands.len() + 1))?;
                seq.serialize_element(reduction.reductor.as_str())?;
                for operand in &reduction.operands {
                    seq.serialize_element(operand)?;
                }
                seq.end()
            }
        }
    }
}

impl Serialize for Filter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.0 {
            Some(condition) => condition.serialize(serializer),
            None => serializer.serialize_seq(Some(0))?.end(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_filter_serializes_as_empty_array() {
        assert_eq!(serde_json::to_value(Filter::empty()).unwrap(), json!([]));
    }

    #[test]
    fn predicate_serializes_as_triple() {
        let filter = Filter::predicate("rating", Operator::GtEq, 70u32);
        assert_eq!(
            serde_json::to_value(&filter).unwrap(),
            json!(["rating", ">=", 70])
        );
    }

    #[test]
    fn nested_relation_and_scalars() {
        let join = Condition::predicate("id", Operator::Eq, "v17");
        let filter = Filter::eq("vn", join);
        assert_eq!(
            serde_json::to_value(&filter).unwrap(),
            json!(["vn", "=", ["id", "=", "v17"]])
        );

        let null = Filter::predicate("released", Operator::NotEq, FilterValue::Null);
        assert_eq!(
            serde_json::to_value(&null).unwrap(),
            json!(["released", "!=", null])
        );
        assert_eq!(
            serde_json::to_value(Filter::eq("official", true)).unwrap(),
            json!(["official", "=", true])
        );
    }

    #[test]
    fn reduction_serializes_reductor_first() {
        let reduction = Condition::Reduction(Reduction::new(
            Reductor::Or,
            vec![
                Condition::predicate("lang", Operator::Eq, "en"),
                Condition::predicate("lang", Operator::Eq, "ja"),
            ],
        ));
        assert_eq!(
            serde_json::to_value(Filter::from(reduction)).unwrap(),
            json!(["or", ["lang", "=", "en"], ["lang", "=", "ja"]])
        );
    }

    #[test]
    fn contains_walks_nested_values() {
        let inner = Condition::predicate("id", Operator::Eq, "v17");
        let filter = Filter::eq("vn", inner.clone());
        assert!(filter.contains(&inner));
        assert!(!Filter::empty().contains(&inner));
    }
}
