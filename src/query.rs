//! Search statement composition.
//!
//! For every column the composer emits a predicate pair, linguistic OR literal:
//!
//! ```sql
//! (to_tsvector('english', "Title") @@ plainto_tsquery('english', $1) OR "Title" ~* $2)
//! ```
//!
//! and joins the pairs with `OR`. Exactly two values are bound regardless of the number
//! of columns: `$1` is the compiled `tsquery` expression and `$2` the literal pattern.
//!
//! # Preconditions
//!
//! The table name, column names and language are interpolated into the statement text.
//! They are accepted only as [`TableName`], [`ColumnIdentifier`] and [`TextSearchConfig`],
//! which are validated when constructed from schema metadata. They are not re-checked
//! here, and must never be built from end-user input.

use may_postgres::types::ToSql;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use crate::error::SearchError;
use crate::identifier::{ColumnIdentifier, TableName, TextSearchConfig};
use crate::keyword::CompiledSearch;

/// PostgreSQL function that parses `$1` into a `tsquery`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum TsQueryFunction {
    /// `plainto_tsquery`: treats `$1` as plain text
    #[default]
    #[serde(rename = "plainto_tsquery")]
    PlainToTsQuery,
    /// `to_tsquery`: honours the `:*` prefix markers and `&` operators of `$1`
    #[serde(rename = "to_tsquery")]
    ToTsQuery,
}

impl TsQueryFunction {
    pub fn as_sql(&self) -> &'static str {
        match self {
            TsQueryFunction::PlainToTsQuery => "plainto_tsquery",
            TsQueryFunction::ToTsQuery => "to_tsquery",
        }
    }
}

impl fmt::Display for TsQueryFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl FromStr for TsQueryFunction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plainto_tsquery" => Ok(TsQueryFunction::PlainToTsQuery),
            "to_tsquery" => Ok(TsQueryFunction::ToTsQuery),
            other => Err(format!(
                "unknown tsquery function '{}', expected 'plainto_tsquery' or 'to_tsquery'",
                other
            )),
        }
    }
}

/// A composed search statement and its two positional parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    sql: String,
    params: [String; 2],
    columns: usize,
}

impl SearchQuery {
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// `[ts_query, literal_pattern]`, bound as `$1` and `$2`
    ///
    /// `$2` is [`CompiledSearch::literal_pattern`], not the normalized keyword itself: it
    /// is the normalized keyword with regex metacharacters backslash-escaped, so `~*`
    /// matches it literally. The two are equal only when the keyword contains no
    /// metacharacters (`c++` is normalized to `c++` but bound as `c\+\+`).
    pub fn params(&self) -> &[String; 2] {
        &self.params
    }

    /// Number of predicate pairs in the WHERE clause
    pub fn predicate_count(&self) -> usize {
        self.columns
    }

    /// Parameters in the form `LifeExecutor` takes them
    pub fn bind(&self) -> [&dyn ToSql; 2] {
        [&self.params[0], &self.params[1]]
    }
}

/// Builds search statements
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryComposer {
    ts_query_function: TsQueryFunction,
}

impl QueryComposer {
    pub fn new(ts_query_function: TsQueryFunction) -> Self {
        Self { ts_query_function }
    }

    pub fn ts_query_function(&self) -> TsQueryFunction {
        self.ts_query_function
    }

    /// Compose the statement for `columns` of `table`
    ///
    /// # Errors
    ///
    /// Returns `SearchError::NoAttributes` if `columns` is empty.
    pub fn compose(
        &self,
        table: &TableName,
        language: &TextSearchConfig,
        columns: &[ColumnIdentifier],
        compiled: &CompiledSearch,
    ) -> Result<SearchQuery, SearchError> {
        if columns.is_empty() {
            return Err(SearchError::NoAttributes);
        }

        let lang = language.literal();
        let ts_fn = self.ts_query_function.as_sql();
        let predicates: Vec<String> = columns
            .iter()
            .map(|column| {
                let col = column.quoted();
                format!(
                    "(to_tsvector({lang}, {col}) @@ {ts_fn}({lang}, $1) OR {col} ~* $2)"
                )
            })
            .collect();

        let sql = format!(
            "SELECT * FROM {} WHERE {};",
            table.quoted(),
            predicates.join(" OR ")
        );
        log::debug!("Composed search statement: {}", sql);

        Ok(SearchQuery {
            sql,
            params: [compiled.ts_query().to_string(), compiled.literal_pattern()],
            columns: columns.len(),
        })
    }
}

/// Compose with the default (`plainto_tsquery`) composer
pub fn compose(
    table: &TableName,
    language: &TextSearchConfig,
    columns: &[ColumnIdentifier],
    compiled: &CompiledSearch,
) -> Result<SearchQuery, SearchError> {
    QueryComposer::default().compose(table, language, columns, compiled)
}
