//! Caller-facing query criteria.
//!
//! A [`QuerySpec`] is an ordered set of [`Criterion`]s, one per attribute.
//! Each criterion constrains its attribute either by plain equality or by an
//! ordered list of operator/value pairs that must all hold.

use crate::error::{FinderError, Result};
use crate::op::Op;
use crate::value::Value;

/// How a single attribute is constrained.
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    /// Attribute value equals this scalar.
    Scalar(Value),
    /// Every operator/value pair must hold. Operators are unique and keep
    /// their insertion order.
    Operators(Vec<(Op, Value)>),
}

impl Constraint {
    /// The operator/value pairs this constraint expands to.
    ///
    /// A scalar expands to a single `EqualTo` pair.
    pub fn pairs(&self) -> Vec<(Op, &Value)> {
        match self {
            Constraint::Scalar(value) => vec![(Op::EqualTo, value)],
            Constraint::Operators(ops) => ops.iter().map(|(op, value)| (*op, value)).collect(),
        }
    }

    fn set(&mut self, op: Op, value: Value) {
        match self {
            Constraint::Operators(ops) => match ops.iter_mut().find(|(existing, _)| *existing == op) {
                Some((_, slot)) => *slot = value,
                None => ops.push((op, value)),
            },
            Constraint::Scalar(_) => *self = Constraint::Operators(vec![(op, value)]),
        }
    }

    /// Builds a constraint from a loose JSON value.
    ///
    /// Objects become operator maps with their keys parsed as [`Op`]; any
    /// other JSON value is a scalar equality constraint.
    pub fn from_json(json: &serde_json::Value) -> Result<Self> {
        match json {
            serde_json::Value::Object(map) => {
                let mut constraint = Constraint::Operators(Vec::with_capacity(map.len()));
                for (op, value) in map {
                    constraint.set(op.parse()?, Value::from_json(value)?);
                }
                Ok(constraint)
            }
            scalar => Ok(Constraint::Scalar(Value::from_json(scalar)?)),
        }
    }
}

/// One attribute and its constraint.
#[derive(Debug, Clone, PartialEq)]
pub struct Criterion {
    /// The attribute name.
    pub attribute: String,
    /// The constraint on the attribute's value.
    pub constraint: Constraint,
}

impl Criterion {
    /// Attribute equals `value`.
    pub fn equal_to(attribute: impl Into<String>, value: impl Into<Value>) -> Self {
        Criterion {
            attribute: attribute.into(),
            constraint: Constraint::Scalar(value.into()),
        }
    }

    /// Attribute matches `value` under `op`.
    pub fn op(attribute: impl Into<String>, op: Op, value: impl Into<Value>) -> Self {
        Criterion {
            attribute: attribute.into(),
            constraint: Constraint::Operators(vec![(op, value.into())]),
        }
    }
}

/// Ordered collection of criteria, at most one per attribute.
///
/// Builders follow mapping semantics: [`QuerySpec::equal_to`] replaces whatever
/// constraint the attribute had, while [`QuerySpec::and`] adds an operator to
/// the attribute's operator map (replacing the same operator if present).
///
/// ```
/// use nanostore_finder::{Op, QuerySpec};
///
/// let query = QuerySpec::new()
///     .equal_to("name", "Bob")
///     .and("age", Op::GreaterThan, 18i64)
///     .and("age", Op::LessThan, 65i64);
///
/// assert_eq!(query.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuerySpec {
    criteria: Vec<Criterion>,
}

impl QuerySpec {
    /// Creates an empty query spec.
    ///
    /// An empty spec is rejected when a find is executed.
    pub fn new() -> Self {
        QuerySpec::default()
    }

    /// Attribute equals `value`.
    pub fn equal_to(mut self, attribute: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(Criterion::equal_to(attribute, value));
        self
    }

    /// Adds `op value` to the attribute's operator map.
    pub fn and(mut self, attribute: impl Into<String>, op: Op, value: impl Into<Value>) -> Self {
        let attribute = attribute.into();
        match self.find_mut(&attribute) {
            Some(criterion) => criterion.constraint.set(op, value.into()),
            None => self.criteria.push(Criterion::op(attribute, op, value)),
        }
        self
    }

    /// Adds a criterion, replacing any existing one for the same attribute.
    pub fn push(&mut self, criterion: Criterion) {
        match self.find_mut(&criterion.attribute) {
            Some(existing) => *existing = criterion,
            None => self.criteria.push(criterion),
        }
    }

    fn find_mut(&mut self, attribute: &str) -> Option<&mut Criterion> {
        self.criteria.iter_mut().find(|c| c.attribute == attribute)
    }

    /// The criteria in insertion order.
    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    /// Fails with `InvalidArguments` if there are no criteria, or if an
    /// attribute has an empty operator map.
    pub fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Err(FinderError::InvalidArguments(
                "query criteria must not be empty".to_string(),
            ));
        }
        for criterion in &self.criteria {
            if matches!(&criterion.constraint, Constraint::Operators(ops) if ops.is_empty()) {
                return Err(FinderError::InvalidArguments(format!(
                    "no operators given for attribute '{}'",
                    criterion.attribute
                )));
            }
        }
        Ok(())
    }

    /// Builds a query spec from a JSON object, keeping key order.
    pub fn from_json(json: &serde_json::Value) -> Result<Self> {
        let serde_json::Value::Object(map) = json else {
            return Err(FinderError::InvalidArguments(format!(
                "query criteria must be a mapping, got {json}"
            )));
        };
        let mut spec = QuerySpec::new();
        for (attribute, value) in map {
            spec.push(Criterion {
                attribute: attribute.clone(),
                constraint: Constraint::from_json(value)?,
            });
        }
        Ok(spec)
    }
}

impl From<Criterion> for QuerySpec {
    fn from(criterion: Criterion) -> Self {
        QuerySpec {
            criteria: vec![criterion],
        }
    }
}

impl FromIterator<Criterion> for QuerySpec {
    fn from_iter<I: IntoIterator<Item = Criterion>>(iter: I) -> Self {
        let mut spec = QuerySpec::new();
        for criterion in iter {
            spec.push(criterion);
        }
        spec
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalar_expands_to_equality() {
        let c = Criterion::equal_to("name", "Bob");
        assert_eq!(c.constraint.pairs(), vec![(Op::EqualTo, &Value::from("Bob"))]);
    }

    #[test]
    fn and_merges_operators_for_same_attribute() {
        let spec = QuerySpec::new()
            .and("age", Op::GreaterThan, 18i64)
            .and("age", Op::LessThan, 65i64)
            .and("age", Op::GreaterThan, 21i64);

        assert_eq!(spec.len(), 1);
        assert_eq!(
            spec.criteria()[0].constraint,
            Constraint::Operators(vec![
                (Op::GreaterThan, Value::from(21i64)),
                (Op::LessThan, Value::from(65i64)),
            ])
        );
    }

    #[test]
    fn eq_replaces_previous_constraint_in_place() {
        let spec = QuerySpec::new()
            .and("age", Op::GreaterThan, 18i64)
            .equal_to("name", "Bob")
            .equal_to("age", 30i64);

        let names: Vec<&str> = spec.criteria().iter().map(|c| c.attribute.as_str()).collect();
        assert_eq!(names, vec!["age", "name"]);
        assert_eq!(
            spec.criteria()[0].constraint,
            Constraint::Scalar(Value::from(30i64))
        );
    }

    #[test]
    fn and_after_eq_switches_to_operator_map() {
        let spec = QuerySpec::new()
            .equal_to("age", 30i64)
            .and("age", Op::LessThan, 65i64);
        assert_eq!(
            spec.criteria()[0].constraint,
            Constraint::Operators(vec![(Op::LessThan, Value::from(65i64))])
        );
    }

    #[test]
    fn empty_spec_is_rejected() {
        assert!(matches!(
            QuerySpec::new().validate(),
            Err(FinderError::InvalidArguments(_))
        ));
        assert!(QuerySpec::new().equal_to("a", 1i64).validate().is_ok());
    }

    #[test]
    fn empty_operator_map_is_rejected() {
        let spec = QuerySpec::from_json(&json!({"age": {}})).unwrap();
        assert_eq!(
            spec.validate(),
            Err(FinderError::InvalidArguments(
                "no operators given for attribute 'age'".to_string()
            ))
        );
    }

    #[test]
    fn from_json_nested_operators_keep_order() {
        let spec = QuerySpec::from_json(&json!({
            "name": "Bob",
            "age": {"NSFLessThan": 65, "GreaterThan": 18},
        }))
        .unwrap();

        assert_eq!(
            spec,
            QuerySpec::new()
                .equal_to("name", "Bob")
                .and("age", Op::LessThan, 65i64)
                .and("age", Op::GreaterThan, 18i64)
        );
    }

    #[test]
    fn from_json_unknown_operator() {
        assert_eq!(
            QuerySpec::from_json(&json!({"name": {"Like": "B%"}})),
            Err(FinderError::UnknownOperator("Like".to_string()))
        );
    }

    #[test]
    fn from_json_rejects_nested_containers() {
        assert!(matches!(
            QuerySpec::from_json(&json!({"tags": ["a", "b"]})),
            Err(FinderError::InvalidArguments(_))
        ));
        assert!(matches!(
            QuerySpec::from_json(&json!({"age": {"GreaterThan": {"x": 1}}})),
            Err(FinderError::InvalidArguments(_))
        ));
    }
}
