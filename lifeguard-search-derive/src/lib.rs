//! Procedural macros for Lifeguard Search
//!
//! This crate provides the `Searchable` derive.

mod attributes;
mod macros;
mod utils;

use proc_macro::TokenStream;

/// Derive macro for `Searchable` - typed column selectors, entity metadata and row mapping
///
/// For a struct `Article` this generates:
/// - `ArticleColumn` enum, one variant per searchable field, implementing `sea_query::Iden`
/// - `From<ArticleColumn> for lifeguard_search::Selector`
/// - `SearchEntity` implementation (entity name, `#[table_name]`, field → column mapping)
/// - `FromRow` implementation reading every field by its column name
///
/// Field attributes:
/// - `#[column_name = "..."]` - column the field is stored in (defaults to the field name)
/// - `#[search_skip]` - loaded from rows but not searchable (no column variant)
///
/// # Example
///
/// ```ignore
/// use lifeguard_search::Searchable;
///
/// #[derive(Searchable)]
/// #[table_name = "articles"]
/// pub struct Article {
///     #[search_skip]
///     pub id: i32,
///     pub title: String,
///     #[column_name = "body_text"]
///     pub body: String,
/// }
///
/// assert_eq!(ArticleColumn::ALL.len(), 2);
/// ```
#[proc_macro_derive(Searchable, attributes(table_name, column_name, search_skip))]
pub fn derive_searchable(input: TokenStream) -> TokenStream {
    macros::derive_searchable(input)
}
