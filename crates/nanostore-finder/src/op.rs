//! Match operators understood by the search engine.
//!
//! The [`Op`] enum mirrors the engine's match types. Operators can be parsed
//! either from the engine constant (`NSFGreaterThan`) or from the bare name
//! (`GreaterThan`), which is how callers usually spell them in hash criteria.

use std::str::FromStr;

use crate::error::FinderError;

/// Match operator for a predicate.
///
/// Operators are grouped by the kind of comparison they perform:
/// - **Equality**: `EqualTo`, `NotEqualTo`
/// - **String**: `BeginsWith`, `Contains`, `EndsWith`
/// - **Case-insensitive string**: the `Insensitive*` variants
/// - **Ordering**: `GreaterThan`, `LessThan`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Op {
    // Equality
    /// Exact match. The operator used for scalar criteria.
    #[default]
    EqualTo,
    /// Not equal.
    NotEqualTo,

    // String operators
    /// String starts with prefix.
    BeginsWith,
    /// String contains substring.
    Contains,
    /// String ends with suffix.
    EndsWith,

    // Case-insensitive string operators
    /// Equal, ignoring case.
    InsensitiveEqualTo,
    /// Starts with prefix, ignoring case.
    InsensitiveBeginsWith,
    /// Contains substring, ignoring case.
    InsensitiveContains,
    /// Ends with suffix, ignoring case.
    InsensitiveEndsWith,

    // Ordering
    /// Greater than.
    GreaterThan,
    /// Less than.
    LessThan,
}

impl Op {
    /// Every operator, in declaration order.
    pub const ALL: [Op; 11] = [
        Op::EqualTo,
        Op::NotEqualTo,
        Op::BeginsWith,
        Op::Contains,
        Op::EndsWith,
        Op::InsensitiveEqualTo,
        Op::InsensitiveBeginsWith,
        Op::InsensitiveContains,
        Op::InsensitiveEndsWith,
        Op::GreaterThan,
        Op::LessThan,
    ];

    /// Returns the engine constant for this operator.
    pub fn as_str(self) -> &'static str {
        match self {
            Op::EqualTo => "NSFEqualTo",
            Op::NotEqualTo => "NSFNotEqualTo",
            Op::BeginsWith => "NSFBeginsWith",
            Op::Contains => "NSFContains",
            Op::EndsWith => "NSFEndsWith",
            Op::InsensitiveEqualTo => "NSFInsensitiveEqualTo",
            Op::InsensitiveBeginsWith => "NSFInsensitiveBeginsWith",
            Op::InsensitiveContains => "NSFInsensitiveContains",
            Op::InsensitiveEndsWith => "NSFInsensitiveEndsWith",
            Op::GreaterThan => "NSFGreaterThan",
            Op::LessThan => "NSFLessThan",
        }
    }

    /// Returns the operator name without the engine prefix.
    pub fn name(self) -> &'static str {
        &self.as_str()[3..]
    }
}

impl FromStr for Op {
    type Err = FinderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bare = s.strip_prefix("NSF").unwrap_or(s);
        Op::ALL
            .into_iter()
            .find(|op| op.name() == bare)
            .ok_or_else(|| FinderError::UnknownOperator(s.to_string()))
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_engine_constant_and_bare_name() {
        assert_eq!("NSFGreaterThan".parse::<Op>(), Ok(Op::GreaterThan));
        assert_eq!("GreaterThan".parse::<Op>(), Ok(Op::GreaterThan));
        assert_eq!("NSFEqualTo".parse::<Op>(), Ok(Op::EqualTo));
        assert_eq!(
            "InsensitiveEndsWith".parse::<Op>(),
            Ok(Op::InsensitiveEndsWith)
        );
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert_eq!(
            "greaterthan".parse::<Op>(),
            Err(FinderError::UnknownOperator("greaterthan".to_string()))
        );
        assert!("NSF".parse::<Op>().is_err());
        assert!("".parse::<Op>().is_err());
    }

    #[test]
    fn every_op_round_trips_through_its_name() {
        for op in Op::ALL {
            assert_eq!(op.as_str().parse::<Op>(), Ok(op));
            assert_eq!(op.name().parse::<Op>(), Ok(op));
        }
    }

    #[test]
    fn op_display() {
        assert_eq!(Op::EqualTo.to_string(), "NSFEqualTo");
        assert_eq!(Op::BeginsWith.to_string(), "NSFBeginsWith");
        assert_eq!(Op::LessThan.name(), "LessThan");
    }
}
