//! Validated SQL identifiers and text search configuration names.
//!
//! Table and column names cannot be bound as parameters, so they are interpolated into
//! the statement text. Every value that reaches the SQL through interpolation is one of
//! the types in this module, and each can only be constructed from a string that passes
//! validation. Keyword text never flows into these types; it is always bound.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

use crate::error::SearchError;

/// PostgreSQL truncates identifiers at NAMEDATALEN - 1 bytes
pub const MAX_IDENTIFIER_LEN: usize = 63;

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_$]*$").expect("identifier pattern is valid"));

/// Lower-case subset that means the same thing quoted or bare
static BARE_IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z_][a-z0-9_]*$").expect("bare identifier pattern is valid"));

fn check_part(part: &str, what: &str) -> Result<(), SearchError> {
    if part.is_empty() {
        return Err(SearchError::InvalidIdentifier(format!("{} name is empty", what)));
    }
    if part.len() > MAX_IDENTIFIER_LEN {
        return Err(SearchError::InvalidIdentifier(format!(
            "{} name '{}' exceeds {} bytes",
            what, part, MAX_IDENTIFIER_LEN
        )));
    }
    if !IDENTIFIER.is_match(part) {
        return Err(SearchError::InvalidIdentifier(format!(
            "{} name '{}' must start with a letter or underscore and contain only letters, digits, '_' or '$'",
            what, part
        )));
    }
    Ok(())
}

/// Double-quote an identifier, doubling embedded quotes
pub fn quote_ident(input: &str) -> String {
    let escaped = input.replace('"', "\"\"");
    format!("\"{}\"", escaped)
}

/// A single validated column name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnIdentifier(String);

impl ColumnIdentifier {
    pub fn new(name: impl Into<String>) -> Result<Self, SearchError> {
        let name = name.into();
        check_part(&name, "Column")?;
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn quoted(&self) -> String {
        quote_ident(&self.0)
    }
}

impl fmt::Display for ColumnIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated table name, optionally schema-qualified (`schema.table`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableName {
    schema: Option<String>,
    table: String,
}

impl TableName {
    pub fn new(name: &str) -> Result<Self, SearchError> {
        match name.split_once('.') {
            Some((schema, table)) => Self::qualified(schema, table),
            None => {
                check_part(name, "Table")?;
                Ok(Self {
                    schema: None,
                    table: name.to_string(),
                })
            }
        }
    }

    pub fn qualified(schema: &str, table: &str) -> Result<Self, SearchError> {
        check_part(schema, "Schema")?;
        check_part(table, "Table")?;
        Ok(Self {
            schema: Some(schema.to_string()),
            table: table.to_string(),
        })
    }

    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// `"table"` or `"schema"."table"`
    pub fn quoted(&self) -> String {
        match &self.schema {
            Some(schema) => format!("{}.{}", quote_ident(schema), quote_ident(&self.table)),
            None => quote_ident(&self.table),
        }
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.schema {
            Some(schema) => write!(f, "{}.{}", schema, self.table),
            None => f.write_str(&self.table),
        }
    }
}

/// A text search configuration name such as `english` or `pg_catalog.turkish`
///
/// Rendered as a single-quoted literal (`'english'`) which PostgreSQL casts to `regconfig`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextSearchConfig(String);

impl TextSearchConfig {
    pub fn new(language: &str) -> Result<Self, SearchError> {
        let valid = !language.is_empty()
            && language.split('.').count() <= 2
            && language
                .split('.')
                .all(|part| part.len() <= MAX_IDENTIFIER_LEN && IDENTIFIER.is_match(part) && !part.contains('$'));
        if !valid {
            return Err(SearchError::InvalidLanguage(language.to_string()));
        }
        Ok(Self(language.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Unqualified configuration name, used to pick the folding locale
    pub fn locale(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }

    pub fn literal(&self) -> String {
        format!("'{}'", self.0)
    }
}

impl Default for TextSearchConfig {
    fn default() -> Self {
        Self("english".to_string())
    }
}

impl fmt::Display for TextSearchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Check a name that is emitted unquoted in DDL (trigger, function, index names)
pub(crate) fn bare_identifier(name: &str, what: &str) -> Result<String, SearchError> {
    check_part(name, what)?;
    if !BARE_IDENTIFIER.is_match(name) {
        return Err(SearchError::InvalidIdentifier(format!(
            "{} name '{}' must be lower-case (letters, digits, '_')",
            what, name
        )));
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_identifier_accepts_plain_names() {
        for name in ["title", "Title", "_body", "body_2", "price$"] {
            assert!(ColumnIdentifier::new(name).is_ok(), "should accept {}", name);
        }
    }

    #[test]
    fn test_column_identifier_rejects_hazards() {
        for name in [
            "",
            "2fast",
            "title\"; DROP TABLE users; --",
            "a b",
            "a.b",
            "ti'tle",
            "çiçek",
        ] {
            let err = ColumnIdentifier::new(name).unwrap_err();
            assert!(err.is_invalid_input(), "should reject {:?}", name);
        }
    }

    #[test]
    fn test_identifier_length_limit() {
        let ok = "a".repeat(MAX_IDENTIFIER_LEN);
        let too_long = "a".repeat(MAX_IDENTIFIER_LEN + 1);
        assert!(ColumnIdentifier::new(ok).is_ok());
        assert!(ColumnIdentifier::new(too_long).is_err());
    }

    #[test]
    fn test_quoting() {
        assert_eq!(ColumnIdentifier::new("Title").unwrap().quoted(), "\"Title\"");
        assert_eq!(TableName::new("Articles").unwrap().quoted(), "\"Articles\"");
        assert_eq!(
            TableName::new("content.articles").unwrap().quoted(),
            "\"content\".\"articles\""
        );
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
    }

    #[test]
    fn test_table_name_rejects_extra_dots() {
        assert!(TableName::new("a.b.c").is_err());
        assert!(TableName::new(".articles").is_err());
    }

    #[test]
    fn test_text_search_config() {
        assert_eq!(TextSearchConfig::new("english").unwrap().literal(), "'english'");
        let qualified = TextSearchConfig::new("pg_catalog.turkish").unwrap();
        assert_eq!(qualified.locale(), "turkish");
        for bad in ["", "english'); DROP TABLE x; --", "en glish", "a.b.c"] {
            assert!(matches!(
                TextSearchConfig::new(bad),
                Err(SearchError::InvalidLanguage(_))
            ));
        }
    }

    #[test]
    fn test_bare_identifier() {
        assert!(bare_identifier("idx_search_vector", "Index").is_ok());
        assert!(bare_identifier("IdxSearch", "Index").is_err());
    }
}
