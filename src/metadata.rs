//! Entity metadata: searchable fields, row mapping, and table-name resolution.
//!
//! `#[derive(Searchable)]` implements [`SearchEntity`] and [`FromRow`]; the table-name
//! side is pluggable through [`TableResolver`] so that deployment configuration can
//! override what the entity declares.

use std::collections::HashMap;

use crate::error::SearchError;
use crate::identifier::TableName;

/// Trait for converting a `may_postgres::Row` into a model
pub trait FromRow: Sized {
    fn from_row(row: &may_postgres::Row) -> Result<Self, may_postgres::Error>;
}

/// One searchable field and the column it is stored in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMapping {
    pub field: &'static str,
    pub column: &'static str,
}

impl FieldMapping {
    pub const fn new(field: &'static str, column: &'static str) -> Self {
        Self { field, column }
    }
}

/// An entity whose text attributes can be searched
///
/// # Example
///
/// ```
/// use lifeguard_search::{FieldMapping, FromRow, SearchEntity};
///
/// struct Article {
///     title: String,
/// }
///
/// impl FromRow for Article {
///     fn from_row(row: &may_postgres::Row) -> Result<Self, may_postgres::Error> {
///         Ok(Self { title: row.try_get("title")? })
///     }
/// }
///
/// impl SearchEntity for Article {
///     fn entity_name() -> &'static str {
///         "Article"
///     }
///
///     fn table_name() -> Option<&'static str> {
///         Some("articles")
///     }
///
///     fn fields() -> &'static [FieldMapping] {
///         const FIELDS: &[FieldMapping] = &[FieldMapping::new("title", "title")];
///         FIELDS
///     }
/// }
///
/// assert_eq!(Article::field("title").map(|f| f.column), Some("title"));
/// ```
pub trait SearchEntity: FromRow {
    /// Name used to look the entity up in table mappings
    fn entity_name() -> &'static str;

    /// Table declared on the entity itself (`#[table_name = "..."]`)
    fn table_name() -> Option<&'static str> {
        None
    }

    /// Known searchable fields in declaration order
    fn fields() -> &'static [FieldMapping];

    fn field(name: &str) -> Option<&'static FieldMapping> {
        Self::fields().iter().find(|f| f.field == name)
    }
}

/// Maps an entity type to the table that stores it
pub trait TableResolver {
    /// # Errors
    ///
    /// Returns `SearchError::UnresolvedTable` if the entity is unmapped, or
    /// `SearchError::InvalidIdentifier` if the mapped name is not a safe identifier.
    fn resolve_table_name<E: SearchEntity>(&self) -> Result<TableName, SearchError>;
}

/// Uses the table each entity declares
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclaredTables;

impl TableResolver for DeclaredTables {
    fn resolve_table_name<E: SearchEntity>(&self) -> Result<TableName, SearchError> {
        match E::table_name() {
            Some(name) => TableName::new(name),
            None => Err(SearchError::UnresolvedTable(E::entity_name().to_string())),
        }
    }
}

/// Explicit entity → table mapping, falling back to the declared table
///
/// Entity names are matched case-insensitively: environment-sourced configuration
/// arrives lower-cased.
#[derive(Debug, Clone, Default)]
pub struct TableMap {
    tables: HashMap<String, String>,
}

impl TableMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entity: impl Into<String>, table: impl Into<String>) -> &mut Self {
        self.tables.insert(entity.into().to_lowercase(), table.into());
        self
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl From<HashMap<String, String>> for TableMap {
    fn from(tables: HashMap<String, String>) -> Self {
        let mut map = Self::new();
        for (entity, table) in tables {
            map.insert(entity, table);
        }
        map
    }
}

impl TableResolver for TableMap {
    fn resolve_table_name<E: SearchEntity>(&self) -> Result<TableName, SearchError> {
        match self.tables.get(&E::entity_name().to_lowercase()) {
            Some(name) => TableName::new(name),
            None => DeclaredTables.resolve_table_name::<E>(),
        }
    }
}
