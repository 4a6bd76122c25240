//! Attribute selectors and their resolution to column identifiers.
//!
//! A selector describes how an attribute is read from an entity. Only a direct member
//! access, optionally behind a single representation conversion (`title as text`), can
//! be searched; anything else (nested paths, method calls, computed expressions) is
//! rejected with `SearchError::InvalidSelector`.
//!
//! Typed selectors come from the column enum generated by `#[derive(Searchable)]`:
//!
//! ```ignore
//! let column = resolve_column::<Article>(&ArticleColumn::Title.into())?;
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

use crate::error::SearchError;
use crate::identifier::ColumnIdentifier;
use crate::metadata::SearchEntity;

static MEMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("member pattern is valid"));
static CONVERT_AS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?i)(?P<inner>.+?)\s+as\s+[A-Za-z_][A-Za-z0-9_ ]*$").expect("as pattern is valid")
});
static CONVERT_CAST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<inner>.+?)::[A-Za-z_][A-Za-z0-9_ ]*$").expect("cast pattern is valid")
});
static CALL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<name>[A-Za-z_][A-Za-z0-9_.]*)\((?P<args>.*)\)$").expect("call pattern is valid")
});

/// Shape of an attribute reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Direct field access: `title`
    Member(String),
    /// A selector behind a representation conversion: `title as text`, `title::text`
    Convert(Box<Selector>),
    /// Nested access: `author.name`
    Path(Vec<String>),
    /// Method or function call: `lower(title)`, `title.trim()`
    Call { name: String, args: Vec<String> },
    /// Any other expression
    Computed(String),
}

impl Selector {
    pub fn member(name: impl Into<String>) -> Self {
        Selector::Member(name.into())
    }

    /// Wrap this selector in a representation conversion
    pub fn converted(self) -> Self {
        Selector::Convert(Box::new(self))
    }

    /// Parse a textual selector
    ///
    /// Parsing never fails; shapes that cannot be searched are returned as such and
    /// rejected later by [`resolve_column`].
    ///
    /// ```
    /// use lifeguard_search::Selector;
    ///
    /// assert_eq!(Selector::parse("title"), Selector::member("title"));
    /// assert_eq!(Selector::parse("title as text"), Selector::member("title").converted());
    /// assert!(matches!(Selector::parse("author.name"), Selector::Path(_)));
    /// assert!(matches!(Selector::parse("lower(title)"), Selector::Call { .. }));
    /// ```
    pub fn parse(input: &str) -> Self {
        let input = input.trim();

        if MEMBER.is_match(input) {
            return Selector::Member(input.to_string());
        }
        if let Some(caps) = CONVERT_CAST.captures(input).or_else(|| CONVERT_AS.captures(input)) {
            return Selector::parse(&caps["inner"]).converted();
        }
        if let Some(caps) = CALL.captures(input) {
            let args = caps["args"]
                .split(',')
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .map(str::to_string)
                .collect();
            return Selector::Call {
                name: caps["name"].to_string(),
                args,
            };
        }
        let parts: Vec<&str> = input.split('.').collect();
        if parts.len() > 1 && parts.iter().all(|p| MEMBER.is_match(p)) {
            return Selector::Path(parts.into_iter().map(str::to_string).collect());
        }
        Selector::Computed(input.to_string())
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Member(name) => f.write_str(name),
            Selector::Convert(inner) => write!(f, "{} as text", inner),
            Selector::Path(parts) => f.write_str(&parts.join(".")),
            Selector::Call { name, args } => write!(f, "{}({})", name, args.join(", ")),
            Selector::Computed(expr) => f.write_str(expr),
        }
    }
}

impl From<&str> for Selector {
    fn from(input: &str) -> Self {
        Selector::parse(input)
    }
}

impl From<String> for Selector {
    fn from(input: String) -> Self {
        Selector::parse(&input)
    }
}

/// Resolve a selector to the column of `E` it reads
///
/// # Errors
///
/// Returns `SearchError::InvalidSelector` if the selector is not a direct member access
/// (or one behind a single conversion), or names a field `E` does not declare, and
/// `SearchError::InvalidIdentifier` if the mapped column is not a safe identifier.
pub fn resolve_column<E: SearchEntity>(selector: &Selector) -> Result<ColumnIdentifier, SearchError> {
    let member = match selector {
        Selector::Member(name) => name,
        Selector::Convert(inner) => match inner.as_ref() {
            Selector::Member(name) => name,
            other => {
                return Err(SearchError::InvalidSelector(format!(
                    "'{}' converts '{}', which is not a direct member access",
                    selector, other
                )))
            }
        },
        Selector::Path(_) => {
            return Err(SearchError::InvalidSelector(format!(
                "'{}' is a nested path; only one level of member access is supported",
                selector
            )))
        }
        Selector::Call { .. } => {
            return Err(SearchError::InvalidSelector(format!(
                "'{}' is a call, not a member access",
                selector
            )))
        }
        Selector::Computed(_) => {
            return Err(SearchError::InvalidSelector(format!(
                "'{}' is a computed expression, not a member access",
                selector
            )))
        }
    };

    let mapping = E::field(member).ok_or_else(|| {
        SearchError::InvalidSelector(format!(
            "'{}' is not a searchable field of {}",
            member,
            E::entity_name()
        ))
    })?;

    ColumnIdentifier::new(mapping.column)
}

/// Resolve every selector, preserving order
pub fn resolve_columns<E: SearchEntity>(
    selectors: &[Selector],
) -> Result<Vec<ColumnIdentifier>, SearchError> {
    selectors.iter().map(resolve_column::<E>).collect()
}
