//! The search engine seam.
//!
//! The finder never stores, indexes or evaluates anything itself. It hands a
//! [`Search`] to a [`SearchEngine`], which is implemented by the document
//! store handle the caller already owns.

use crate::error::{FinderError, Result};
use crate::expression::Expression;
use crate::ordering::SortDescriptor;

/// What a search returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReturnMode {
    /// Full records.
    Objects,
    /// Record keys only.
    Keys,
}

impl ReturnMode {
    /// Returns the engine constant for this mode.
    pub fn as_str(self) -> &'static str {
        match self {
            ReturnMode::Objects => "NSFReturnObjects",
            ReturnMode::Keys => "NSFReturnKeys",
        }
    }
}

impl std::fmt::Display for ReturnMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Search output, shaped by the requested [`ReturnMode`].
#[derive(Debug, Clone, PartialEq)]
pub enum SearchResults<O, K> {
    Objects(Vec<O>),
    Keys(Vec<K>),
}

impl<O, K> SearchResults<O, K> {
    pub fn len(&self) -> usize {
        match self {
            SearchResults::Objects(objects) => objects.len(),
            SearchResults::Keys(keys) => keys.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Extracts records, failing if the engine returned keys.
    pub fn into_objects(self) -> Result<Vec<O>> {
        match self {
            SearchResults::Objects(objects) => Ok(objects),
            SearchResults::Keys(_) => Err(mode_mismatch(ReturnMode::Objects)),
        }
    }

    /// Extracts keys, failing if the engine returned records.
    pub fn into_keys(self) -> Result<Vec<K>> {
        match self {
            SearchResults::Keys(keys) => Ok(keys),
            SearchResults::Objects(_) => Err(mode_mismatch(ReturnMode::Keys)),
        }
    }
}

fn mode_mismatch(requested: ReturnMode) -> FinderError {
    FinderError::SearchEngine(format!(
        "search engine ignored return mode {requested}"
    ))
}

/// A document store that can execute searches.
///
/// # Example
///
/// ```
/// use nanostore_finder::{Expression, ReturnMode, SearchEngine, SearchResults, SortDescriptor};
///
/// struct Empty;
///
/// impl SearchEngine for Empty {
///     type Object = String;
///     type Key = String;
///     type Error = std::convert::Infallible;
///
///     fn search(
///         &self,
///         _expressions: &[Expression],
///         _sort: &[SortDescriptor],
///         mode: ReturnMode,
///     ) -> Result<SearchResults<String, String>, Self::Error> {
///         Ok(match mode {
///             ReturnMode::Objects => SearchResults::Objects(Vec::new()),
///             ReturnMode::Keys => SearchResults::Keys(Vec::new()),
///         })
///     }
/// }
/// ```
pub trait SearchEngine {
    /// A full record.
    type Object;
    /// A record identifier.
    type Key;
    /// The engine's failure report. Only its message is carried forward.
    type Error: std::fmt::Display;

    /// Runs a search.
    ///
    /// Expressions are combined by the engine; sort descriptors apply in
    /// order, first one primary. An empty sort list means engine default order.
    fn search(
        &self,
        expressions: &[Expression],
        sort: &[SortDescriptor],
        mode: ReturnMode,
    ) -> std::result::Result<SearchResults<Self::Object, Self::Key>, Self::Error>;
}

/// A search scoped to one store handle.
///
/// The store is borrowed for the lifetime of the search only.
pub struct Search<'s, S: ?Sized> {
    store: &'s S,
    expressions: Vec<Expression>,
    sort: Vec<SortDescriptor>,
}

impl<'s, S: SearchEngine + ?Sized> Search<'s, S> {
    /// Creates an empty search against `store`.
    pub fn with_store(store: &'s S) -> Self {
        Search {
            store,
            expressions: Vec::new(),
            sort: Vec::new(),
        }
    }

    pub fn set_expressions(&mut self, expressions: Vec<Expression>) {
        self.expressions = expressions;
    }

    pub fn set_sort(&mut self, sort: Vec<SortDescriptor>) {
        self.sort = sort;
    }

    pub fn expressions(&self) -> &[Expression] {
        &self.expressions
    }

    pub fn sort(&self) -> &[SortDescriptor] {
        &self.sort
    }

    /// Executes the search. Engine failures become
    /// [`FinderError::SearchEngine`] carrying the engine's message.
    pub fn execute(&self, mode: ReturnMode) -> Result<SearchResults<S::Object, S::Key>> {
        self.store
            .search(&self.expressions, &self.sort, mode)
            .map_err(|e| FinderError::SearchEngine(e.to_string()))
    }
}
