//! Find call arguments.
//!
//! A find accepts two calling conventions, modelled by [`FindArgs`]:
//!
//! - **Criteria**: a mapping of attribute to value or to an operator map.
//! - **Triple**: a single `(attribute, operator, value)`.
//!
//! Both take optional [`FindOptions`]. [`FindArgs::from_json`] resolves a loose
//! argument list into one of the two shapes, rejecting everything else.

use serde::Deserialize;

use crate::criteria::{Criterion, QuerySpec};
use crate::error::{FinderError, Result};
use crate::op::Op;
use crate::ordering::SortSpec;
use crate::value::Value;

/// Per-call options.
///
/// Unknown keys are rejected when deserializing.
///
/// ```
/// use nanostore_finder::FindOptions;
///
/// let options: FindOptions = serde_json::from_str(r#"{"sort": {"age": "DESC"}}"#).unwrap();
/// assert_eq!(options.sort.len(), 1);
///
/// assert!(serde_json::from_str::<FindOptions>(r#"{"limit": 5}"#).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FindOptions {
    /// Result ordering. Empty means engine default order.
    #[serde(default)]
    pub sort: SortSpec,
}

impl FindOptions {
    /// Options that sort by `sort`.
    pub fn sorted(sort: SortSpec) -> Self {
        FindOptions { sort }
    }

    /// Parses a trailing options argument.
    ///
    /// The argument must be a mapping whose only permitted key is `sort`.
    pub fn from_json(json: &serde_json::Value) -> Result<Self> {
        let serde_json::Value::Object(map) = json else {
            return Err(FinderError::InvalidArguments(format!(
                "options must be a mapping, got {json}"
            )));
        };
        if let Some(key) = map.keys().find(|key| *key != "sort") {
            return Err(FinderError::InvalidArguments(format!(
                "unknown option '{key}'"
            )));
        }
        match map.get("sort") {
            Some(sort) => Ok(FindOptions::sorted(SortSpec::from_json(sort)?)),
            None => Ok(FindOptions::default()),
        }
    }
}

/// The two accepted find call shapes.
///
/// # Example
///
/// ```
/// use nanostore_finder::{Dir, FindArgs, Op, QuerySpec, SortSpec};
///
/// // Hash form with sort options
/// let by_hash = FindArgs::criteria(QuerySpec::new().and("age", Op::GreaterThan, 30i64))
///     .sort(SortSpec::new().by("age", Dir::Desc));
///
/// // Triple form
/// let by_triple = FindArgs::triple("age", Op::GreaterThan, 30i64);
///
/// assert_eq!(by_hash.query_spec(), by_triple.query_spec());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum FindArgs {
    /// `{attribute: value}` or `{attribute: {operator: value, ...}}`.
    Criteria {
        query: QuerySpec,
        options: FindOptions,
    },
    /// `(attribute, operator, value)`.
    Triple {
        attribute: String,
        op: Op,
        value: Value,
        options: FindOptions,
    },
}

impl FindArgs {
    /// Hash-form arguments without options.
    pub fn criteria(query: QuerySpec) -> Self {
        FindArgs::Criteria {
            query,
            options: FindOptions::default(),
        }
    }

    /// Triple-form arguments without options.
    pub fn triple(attribute: impl Into<String>, op: Op, value: impl Into<Value>) -> Self {
        FindArgs::Triple {
            attribute: attribute.into(),
            op,
            value: value.into(),
            options: FindOptions::default(),
        }
    }

    /// Replaces the options.
    pub fn options(mut self, new_options: FindOptions) -> Self {
        match &mut self {
            FindArgs::Criteria { options, .. } | FindArgs::Triple { options, .. } => {
                *options = new_options
            }
        }
        self
    }

    /// Replaces the sort options.
    pub fn sort(self, sort: SortSpec) -> Self {
        self.options(FindOptions::sorted(sort))
    }

    /// The query spec these arguments describe.
    ///
    /// The triple form yields the same spec as `{attribute: {op: value}}`.
    pub fn query_spec(&self) -> QuerySpec {
        match self {
            FindArgs::Criteria { query, .. } => query.clone(),
            FindArgs::Triple {
                attribute,
                op,
                value,
                ..
            } => QuerySpec::from(Criterion::op(attribute.clone(), *op, value.clone())),
        }
    }

    /// Splits the arguments into their query and sort specs.
    ///
    /// Fails if the query spec is empty or has an empty operator map.
    pub fn normalize(self) -> Result<(QuerySpec, SortSpec)> {
        let (query, options) = match self {
            FindArgs::Criteria { query, options } => (query, options),
            FindArgs::Triple {
                attribute,
                op,
                value,
                options,
            } => (QuerySpec::from(Criterion::op(attribute, op, value)), options),
        };
        query.validate()?;
        Ok((query, options.sort))
    }

    /// Resolves a loose argument list.
    ///
    /// Accepted shapes:
    /// - `[{criteria}]` or `[{criteria}, {options}]`
    /// - `[attribute, operator, value]` or `[attribute, operator, value, {options}]`
    ///
    /// Any other shape, including trailing arguments that are not a valid
    /// options mapping, fails with `InvalidArguments`.
    pub fn from_json(args: &[serde_json::Value]) -> Result<Self> {
        use serde_json::Value as Json;

        match args {
            [criteria @ Json::Object(_), rest @ ..] => {
                let options = trailing_options(rest, args)?;
                Ok(FindArgs::criteria(QuerySpec::from_json(criteria)?).options(options))
            }
            [Json::String(attribute), Json::String(op), value, rest @ ..] => {
                let options = trailing_options(rest, args)?;
                Ok(FindArgs::triple(attribute.as_str(), op.parse()?, Value::from_json(value)?)
                    .options(options))
            }
            _ => Err(invalid(args)),
        }
    }
}

impl From<QuerySpec> for FindArgs {
    fn from(query: QuerySpec) -> Self {
        FindArgs::criteria(query)
    }
}

impl From<Criterion> for FindArgs {
    fn from(criterion: Criterion) -> Self {
        FindArgs::criteria(QuerySpec::from(criterion))
    }
}

impl<A, V> From<(A, Op, V)> for FindArgs
where
    A: Into<String>,
    V: Into<Value>,
{
    fn from((attribute, op, value): (A, Op, V)) -> Self {
        FindArgs::triple(attribute, op, value)
    }
}

fn trailing_options(rest: &[serde_json::Value], args: &[serde_json::Value]) -> Result<FindOptions> {
    match rest {
        [] => Ok(FindOptions::default()),
        [options] => FindOptions::from_json(options),
        _ => Err(invalid(args)),
    }
}

fn invalid(args: &[serde_json::Value]) -> FinderError {
    FinderError::InvalidArguments(serde_json::Value::Array(args.to_vec()).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ordering::{Dir, SortValue};
    use serde_json::json;

    #[test]
    fn hash_form() {
        let args = FindArgs::from_json(&[json!({"name": "Bob"})]).unwrap();
        assert_eq!(
            args,
            FindArgs::criteria(QuerySpec::new().equal_to("name", "Bob"))
        );
    }

    #[test]
    fn hash_form_with_sort() {
        let args = FindArgs::from_json(&[
            json!({"age": {"GreaterThan": 30}}),
            json!({"sort": {"age": "DESC"}}),
        ])
        .unwrap();
        let (query, sort) = args.normalize().unwrap();
        assert_eq!(query, QuerySpec::new().and("age", Op::GreaterThan, 30i64));
        assert_eq!(sort, SortSpec::new().by("age", SortValue::from("DESC")));
    }

    #[test]
    fn triple_form_matches_hash_form() {
        let triple = FindArgs::from_json(&[json!("name"), json!("NSFEqualTo"), json!("Bob")]).unwrap();
        let hash = FindArgs::from_json(&[json!({"name": {"NSFEqualTo": "Bob"}})]).unwrap();
        assert_eq!(triple.normalize(), hash.normalize());
    }

    #[test]
    fn triple_form_with_trailing_options() {
        let args = FindArgs::from_json(&[
            json!("age"),
            json!("LessThan"),
            json!(65),
            json!({"sort": {"name": true}}),
        ])
        .unwrap();
        let (_, sort) = args.normalize().unwrap();
        assert_eq!(sort, SortSpec::new().by("name", true));
    }

    #[test]
    fn options_without_sort_key() {
        let args = FindArgs::from_json(&[json!({"name": "Bob"}), json!({})]).unwrap();
        let (_, sort) = args.normalize().unwrap();
        assert!(sort.is_empty());
    }

    #[test]
    fn rejects_zero_arguments() {
        assert!(matches!(
            FindArgs::from_json(&[]),
            Err(FinderError::InvalidArguments(_))
        ));
    }

    #[test]
    fn rejects_short_positional_arguments() {
        for args in [
            vec![json!("name")],
            vec![json!("name"), json!("EqualTo")],
            vec![json!(42), json!("EqualTo"), json!("Bob")],
            vec![json!("name"), json!(1), json!("Bob")],
        ] {
            assert!(
                matches!(FindArgs::from_json(&args), Err(FinderError::InvalidArguments(_))),
                "{args:?}"
            );
        }
    }

    #[test]
    fn rejects_malformed_trailing_arguments() {
        for args in [
            vec![json!({"name": "Bob"}), json!("sort")],
            vec![json!({"name": "Bob"}), json!({"limit": 1})],
            vec![json!({"name": "Bob"}), json!({"sort": "age"})],
            vec![json!({"name": "Bob"}), json!({}), json!({})],
            vec![json!("a"), json!("EqualTo"), json!(1), json!(null)],
            vec![json!("a"), json!("EqualTo"), json!(1), json!({}), json!({})],
        ] {
            assert!(
                matches!(FindArgs::from_json(&args), Err(FinderError::InvalidArguments(_))),
                "{args:?}"
            );
        }
    }

    #[test]
    fn null_sort_option_is_rejected() {
        assert_eq!(
            FindArgs::from_json(&[json!({"name": "Bob"}), json!({"sort": null})]),
            Err(FinderError::InvalidArguments(
                "sort options must be a mapping, got null".to_string()
            ))
        );
    }

    #[test]
    fn triple_accepts_false_and_null_values() {
        let (query, _) = FindArgs::from_json(&[json!("archived"), json!("EqualTo"), json!(false)])
            .unwrap()
            .normalize()
            .unwrap();
        assert_eq!(query, QuerySpec::new().and("archived", Op::EqualTo, false));

        let (query, _) = FindArgs::from_json(&[json!("deleted_at"), json!("EqualTo"), json!(null)])
            .unwrap()
            .normalize()
            .unwrap();
        assert_eq!(query, QuerySpec::new().and("deleted_at", Op::EqualTo, Value::Null));
    }

    #[test]
    fn triple_with_unknown_operator() {
        assert_eq!(
            FindArgs::from_json(&[json!("a"), json!("Like"), json!(1)]),
            Err(FinderError::UnknownOperator("Like".to_string()))
        );
    }

    #[test]
    fn empty_hash_is_rejected_at_normalize() {
        let args = FindArgs::from_json(&[json!({})]).unwrap();
        assert!(matches!(
            args.normalize(),
            Err(FinderError::InvalidArguments(_))
        ));
    }

    #[test]
    fn typed_conversions() {
        let args: FindArgs = ("age", Op::GreaterThan, 30i64).into();
        assert_eq!(args, FindArgs::triple("age", Op::GreaterThan, 30i64));

        let args: FindArgs = Criterion::equal_to("name", "Bob").into();
        assert_eq!(
            args.sort(SortSpec::new().by("name", Dir::Asc)).normalize().unwrap().1,
            SortSpec::new().by("name", Dir::Asc)
        );
    }
}
