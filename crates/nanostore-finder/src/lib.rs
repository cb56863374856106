//! NanoStore finder - translate loose find criteria into search expressions.
//!
//! This crate sits between application code and a document store's search
//! engine. It accepts find criteria in two calling conventions, converts them
//! into the engine's predicate/expression and sort descriptor structures,
//! runs the search and hands back either full records or record keys.
//!
//! It does not store, index or evaluate anything. The engine is reached
//! through the [`SearchEngine`] trait, implemented by the store handle the
//! caller already owns.
//!
//! # Quick Start
//!
//! ```rust
//! use nanostore_finder::{
//!     build_expressions, build_sort_descriptors, Dir, FindArgs, Op, QuerySpec, SortSpec,
//! };
//!
//! // {age: {GreaterThan: 30}}, {sort: {age: DESC}}
//! let args = FindArgs::criteria(QuerySpec::new().and("age", Op::GreaterThan, 30i64))
//!     .sort(SortSpec::new().by("age", Dir::Desc));
//!
//! let (query, sort) = args.normalize().unwrap();
//! let expressions = build_expressions(&query);
//! let sort = build_sort_descriptors(&sort).unwrap();
//!
//! assert_eq!(expressions.len(), 1);
//! assert_eq!(expressions[0].attribute(), Some("age"));
//! assert!(!sort[0].ascending);
//! ```
//!
//! # Calling Conventions
//!
//! | Form | Typed | Loose (JSON) |
//! |------|-------|--------------|
//! | Hash | `FindArgs::criteria(QuerySpec::new().equal_to("name", "Bob"))` | `[{"name": "Bob"}]` |
//! | Operator map | `QuerySpec::new().and("age", Op::GreaterThan, 30i64)` | `[{"age": {"GreaterThan": 30}}]` |
//! | Triple | `FindArgs::triple("name", Op::EqualTo, "Bob")` | `["name", "NSFEqualTo", "Bob"]` |
//!
//! Either form takes trailing options `{"sort": {attribute: direction}}`.
//! Directions are `true`/`false` (ascending/descending) or exactly one of
//! `ASC`, `DESC`, `:ASC`, `:DESC`.
//!
//! # Expression Shape
//!
//! Each criterion becomes exactly one expression:
//!
//! ```text
//! (attribute == name) AND (value OP1 v1) AND (value OP2 v2) ...
//! ```
//!
//! A scalar criterion `{name: v}` is `(attribute == name) AND (value == v)`.

mod args;
mod criteria;
mod error;
mod expression;
mod finder;
mod op;
mod ordering;
mod store;
mod value;

// Re-export public API
pub use args::{FindArgs, FindOptions};
pub use criteria::{Constraint, Criterion, QuerySpec};
pub use error::{FinderError, Result};
pub use expression::{BoolOp, Column, Expression, Predicate};
pub use finder::{build_expressions, build_sort_descriptors, Finder, FinderMethods};
pub use op::Op;
pub use ordering::{Dir, SortDescriptor, SortSpec, SortValue};
pub use store::{ReturnMode, Search, SearchEngine, SearchResults};
pub use value::{Number, Timestamp, Value};
