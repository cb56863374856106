//! Engine-facing predicate and expression types.
//!
//! A [`Predicate`] is the smallest unit the search engine evaluates: a column
//! kind, a match operator and a comparison value. An [`Expression`] starts
//! from one predicate and combines further predicates onto it.

use crate::op::Op;
use crate::value::Value;

/// Which column of the engine's attribute table a predicate tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    /// The attribute name column.
    Attribute,
    /// The stored value column.
    Value,
}

impl Column {
    /// Returns the engine constant for this column.
    pub fn as_str(self) -> &'static str {
        match self {
            Column::Attribute => "NSFAttributeColumn",
            Column::Value => "NSFValueColumn",
        }
    }
}

/// Boolean operator joining a predicate onto an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BoolOp {
    #[default]
    And,
}

impl BoolOp {
    /// Returns the engine constant for this operator.
    pub fn as_str(self) -> &'static str {
        match self {
            BoolOp::And => "NSFAnd",
        }
    }
}

/// A single comparison.
///
/// ```
/// use nanostore_finder::{Column, Op, Predicate};
///
/// let p = Predicate::new(Column::Value, Op::GreaterThan, 30i64);
/// assert_eq!(p.to_string(), "NSFValueColumn NSFGreaterThan 30");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    /// The column being tested.
    pub column: Column,
    /// The match operator.
    pub op: Op,
    /// The value to compare against.
    pub value: Value,
}

impl Predicate {
    /// Creates a new predicate.
    pub fn new(column: Column, op: Op, value: impl Into<Value>) -> Self {
        Predicate {
            column,
            op,
            value: value.into(),
        }
    }

    /// Predicate matching rows whose attribute name equals `name`.
    pub fn attribute(name: &str) -> Self {
        Predicate::new(Column::Attribute, Op::EqualTo, name)
    }

    /// Predicate testing the stored value.
    pub fn value(op: Op, value: impl Into<Value>) -> Self {
        Predicate::new(Column::Value, op, value)
    }
}

impl std::fmt::Display for Predicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.column.as_str(), self.op, self.value)
    }
}

/// An initial predicate with further predicates joined onto it.
///
/// Evaluation is left to right: `first OP1 p1 OP2 p2 ...`.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    first: Predicate,
    rest: Vec<(BoolOp, Predicate)>,
}

impl Expression {
    /// Creates an expression from its initial predicate.
    pub fn with_predicate(predicate: Predicate) -> Self {
        Expression {
            first: predicate,
            rest: Vec::new(),
        }
    }

    /// Joins another predicate onto this expression.
    pub fn add_predicate(&mut self, predicate: Predicate, op: BoolOp) {
        self.rest.push((op, predicate));
    }

    /// The initial predicate.
    pub fn first(&self) -> &Predicate {
        &self.first
    }

    /// The joined predicates, in the order they were added.
    pub fn joined(&self) -> &[(BoolOp, Predicate)] {
        &self.rest
    }

    /// Number of predicates, including the initial one.
    pub fn len(&self) -> usize {
        1 + self.rest.len()
    }

    /// Always `false`: an expression holds at least its initial predicate.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The attribute name this expression is scoped to, when it starts with
    /// an attribute-column equality predicate.
    pub fn attribute(&self) -> Option<&str> {
        match (&self.first.column, self.first.op) {
            (Column::Attribute, Op::EqualTo) => self.first.value.as_str(),
            _ => None,
        }
    }
}

impl std::fmt::Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({})", self.first)?;
        for (op, predicate) in &self.rest {
            write!(f, " {} ({})", op.as_str(), predicate)?;
        }
        Ok(())
    }
}
