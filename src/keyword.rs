//! Keyword compilation.
//!
//! A raw keyword becomes two values bound to the search statement:
//!
//! - a prefix `tsquery` expression (`quick fox` → `quick:* & fox:*`) for the linguistic branch
//! - a normalized, locale-folded, lower-cased keyword for the literal regex branch

use crate::error::SearchError;
use crate::identifier::TextSearchConfig;
use crate::locale::LocaleRegistry;

/// Characters with meaning in `tsquery` syntax
const TSQUERY_OPERATORS: &[char] = &['&', '|', '!', '(', ')', ':', '*', '<', '>', '\'', '\\'];

fn lexeme(token: &str) -> String {
    if token.contains(TSQUERY_OPERATORS) {
        let escaped = token.replace('\\', "\\\\").replace('\'', "''");
        format!("'{}':*", escaped)
    } else {
        format!("{}:*", token)
    }
}

/// Compile a keyword into a conjunctive prefix `tsquery` expression
///
/// Each whitespace-delimited token becomes a prefix lexeme; tokens are joined with ` & `.
/// Tokens containing `tsquery` operator characters are emitted as quoted lexemes so they
/// match literally instead of altering the query structure. Blank input yields `""`.
///
/// ```
/// use lifeguard_search::compile_ts_query;
///
/// assert_eq!(compile_ts_query("quick fox"), "quick:* & fox:*");
/// assert_eq!(compile_ts_query("   "), "");
/// ```
pub fn compile_ts_query(keyword: &str) -> String {
    keyword
        .split_whitespace()
        .map(lexeme)
        .collect::<Vec<_>>()
        .join(" & ")
}

/// Derived search values for one request; immutable once built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledSearch {
    ts_query: String,
    normalized_keyword: String,
}

impl CompiledSearch {
    /// Compile `keyword` for `language`, folding with the built-in locale registry
    pub fn compile(keyword: &str, language: &TextSearchConfig) -> Result<Self, SearchError> {
        Self::compile_with(keyword, language, crate::locale::default_registry())
    }

    /// Compile `keyword` for `language`, folding with `locales`
    ///
    /// # Errors
    ///
    /// Returns `SearchError::EmptyKeyword` if the keyword is blank after trimming.
    pub fn compile_with(
        keyword: &str,
        language: &TextSearchConfig,
        locales: &LocaleRegistry,
    ) -> Result<Self, SearchError> {
        let trimmed = keyword.trim();
        if trimmed.is_empty() {
            return Err(SearchError::EmptyKeyword);
        }

        // Fold before lower-casing: `İ`.to_lowercase() yields a combining dot
        let normalized_keyword = locales.fold(trimmed, language.locale()).to_lowercase();

        Ok(Self {
            ts_query: compile_ts_query(trimmed),
            normalized_keyword,
        })
    }

    /// Prefix `tsquery` expression, bound as `$1`
    pub fn ts_query(&self) -> &str {
        &self.ts_query
    }

    /// Lower-cased, locale-folded keyword
    pub fn normalized_keyword(&self) -> &str {
        &self.normalized_keyword
    }

    /// Normalized keyword with regex metacharacters escaped, bound as `$2`
    pub fn literal_pattern(&self) -> String {
        regex::escape(&self.normalized_keyword)
    }
}
