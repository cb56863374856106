//! Finder entry points.
//!
//! [`Finder`] turns [`FindArgs`] into expressions and sort descriptors, runs
//! them through the store's [`SearchEngine`] and returns records or keys.
//! [`FinderMethods`] provides the same calls on any type that can hand out a
//! store handle.

use tracing::{debug, warn};

use crate::args::FindArgs;
use crate::criteria::QuerySpec;
use crate::error::Result;
use crate::expression::{BoolOp, Expression, Predicate};
use crate::ordering::{SortDescriptor, SortSpec};
use crate::store::{ReturnMode, Search, SearchEngine, SearchResults};

/// Builds one expression per criterion, in order.
///
/// Each expression is `attribute == name` ANDed with one value predicate per
/// operator. A scalar constraint contributes a single `EqualTo` predicate.
pub fn build_expressions(query: &QuerySpec) -> Vec<Expression> {
    query
        .criteria()
        .iter()
        .map(|criterion| {
            let mut expression =
                Expression::with_predicate(Predicate::attribute(&criterion.attribute));
            for (op, value) in criterion.constraint.pairs() {
                expression.add_predicate(Predicate::value(op, value.clone()), BoolOp::And);
            }
            expression
        })
        .collect()
}

/// Resolves every sort entry to a descriptor, in order.
///
/// Fails with `UnsupportedSortValue` on the first direction that is neither a
/// boolean nor a recognized token.
pub fn build_sort_descriptors(sort: &SortSpec) -> Result<Vec<SortDescriptor>> {
    sort.iter()
        .map(|(attribute, value)| {
            value
                .ascending()
                .map(|ascending| SortDescriptor::new(attribute, ascending))
        })
        .collect()
}

/// Runs finds against a borrowed store handle.
///
/// # Example
///
/// ```
/// use nanostore_finder::{
///     Expression, FindArgs, Finder, Op, ReturnMode, SearchEngine, SearchResults, SortDescriptor,
/// };
///
/// struct Users(Vec<(u64, String)>);
///
/// impl SearchEngine for Users {
///     type Object = String;
///     type Key = u64;
///     type Error = String;
///
///     fn search(
///         &self,
///         _expressions: &[Expression],
///         _sort: &[SortDescriptor],
///         mode: ReturnMode,
///     ) -> Result<SearchResults<String, u64>, String> {
///         Ok(match mode {
///             ReturnMode::Objects => {
///                 SearchResults::Objects(self.0.iter().map(|(_, n)| n.clone()).collect())
///             }
///             ReturnMode::Keys => SearchResults::Keys(self.0.iter().map(|(k, _)| *k).collect()),
///         })
///     }
/// }
///
/// let store = Users(vec![(1, "Bob".to_string())]);
/// let finder = Finder::new(&store);
///
/// let users = finder.find(FindArgs::triple("name", Op::EqualTo, "Bob")).unwrap();
/// assert_eq!(users, vec!["Bob".to_string()]);
///
/// let keys = finder.find_keys(("name", Op::EqualTo, "Bob")).unwrap();
/// assert_eq!(keys, vec![1]);
/// ```
pub struct Finder<'s, S: ?Sized> {
    store: &'s S,
}

impl<'s, S: SearchEngine + ?Sized> Finder<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Finder { store }
    }

    /// Finds full records matching `args`.
    pub fn find(&self, args: impl Into<FindArgs>) -> Result<Vec<S::Object>> {
        self.run(args.into(), ReturnMode::Objects)?.into_objects()
    }

    /// Finds the keys of records matching `args`.
    pub fn find_keys(&self, args: impl Into<FindArgs>) -> Result<Vec<S::Key>> {
        self.run(args.into(), ReturnMode::Keys)?.into_keys()
    }

    /// Like [`Finder::find`], taking a loose JSON argument list.
    pub fn find_json(&self, args: &[serde_json::Value]) -> Result<Vec<S::Object>> {
        self.find(FindArgs::from_json(args)?)
    }

    /// Like [`Finder::find_keys`], taking a loose JSON argument list.
    pub fn find_keys_json(&self, args: &[serde_json::Value]) -> Result<Vec<S::Key>> {
        self.find_keys(FindArgs::from_json(args)?)
    }

    /// Prepares the search for `args` without executing it.
    ///
    /// All argument errors surface here, before the store is touched.
    pub fn prepare(&self, args: FindArgs) -> Result<Search<'s, S>> {
        let (query, sort) = args.normalize()?;
        let expressions = build_expressions(&query);
        let sort_descriptors = build_sort_descriptors(&sort)?;

        let mut search = Search::with_store(self.store);
        search.set_expressions(expressions);
        search.set_sort(sort_descriptors);
        Ok(search)
    }

    fn run(&self, args: FindArgs, mode: ReturnMode) -> Result<SearchResults<S::Object, S::Key>> {
        let search = self.prepare(args)?;
        debug!(
            expressions = search.expressions().len(),
            sort = search.sort().len(),
            %mode,
            "submitting search"
        );

        let results = search.execute(mode).inspect_err(|e| {
            warn!(error = %e, %mode, "search engine reported a failure");
        })?;

        debug!(results = results.len(), %mode, "search complete");
        Ok(results)
    }
}

/// Finder calls for anything that owns or borrows a store.
///
/// Implement [`FinderMethods::store`] and `find` / `find_keys` come for free.
///
/// ```ignore
/// impl FinderMethods for UserModel {
///     type Store = NanoStoreHandle;
///
///     fn store(&self) -> &NanoStoreHandle {
///         &self.store
///     }
/// }
///
/// let bobs = users.find(QuerySpec::new().equal_to("name", "Bob"))?;
/// ```
pub trait FinderMethods {
    type Store: SearchEngine + ?Sized;

    /// The store handle searches run against.
    fn store(&self) -> &Self::Store;

    /// Finds full records matching `args`.
    fn find(
        &self,
        args: impl Into<FindArgs>,
    ) -> Result<Vec<<Self::Store as SearchEngine>::Object>> {
        Finder::new(self.store()).find(args)
    }

    /// Finds the keys of records matching `args`.
    fn find_keys(
        &self,
        args: impl Into<FindArgs>,
    ) -> Result<Vec<<Self::Store as SearchEngine>::Key>> {
        Finder::new(self.store()).find_keys(args)
    }
}
