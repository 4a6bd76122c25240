//! Tests for `#[derive(Searchable)]`
//!
//! The generated code references `lifeguard_search`, which is a dev-dependency.

use lifeguard_search::{
    resolve_column, FullTextSearch, SearchEntity, SearchError, SearchRequest, Searchable, Selector,
};
use sea_query::Iden;

#[derive(Searchable)]
#[table_name = "articles"]
pub struct Article {
    #[search_skip]
    pub id: i32,
    pub title: String,
    #[column_name = "body_text"]
    pub body: String,
}

#[derive(Searchable)]
pub struct Note {
    pub text: String,
}

#[test]
fn test_column_enum() {
    assert_eq!(ArticleColumn::ALL, [ArticleColumn::Title, ArticleColumn::Body]);
    assert_eq!(ArticleColumn::Body.as_str(), "body_text");
    assert_eq!(ArticleColumn::Body.field_name(), "body");
    assert_eq!(ArticleColumn::Title.unquoted(), "title");
}

#[test]
fn test_entity_metadata() {
    assert_eq!(Article::entity_name(), "Article");
    assert_eq!(Article::table_name(), Some("articles"));
    assert_eq!(Note::table_name(), None);

    let fields: Vec<(&str, &str)> = Article::fields().iter().map(|f| (f.field, f.column)).collect();
    assert_eq!(fields, vec![("title", "title"), ("body", "body_text")]);
}

#[test]
fn test_typed_selector_resolves_to_column() {
    let selector: Selector = ArticleColumn::Body.into();
    assert_eq!(selector, Selector::member("body"));
    assert_eq!(resolve_column::<Article>(&selector).unwrap().as_str(), "body_text");
}

#[test]
fn test_skipped_field_is_not_searchable() {
    let err = resolve_column::<Article>(&Selector::member("id")).unwrap_err();
    assert!(matches!(err, SearchError::InvalidSelector(_)));
}

#[test]
fn test_compose_with_generated_columns() {
    let request = SearchRequest::<Article>::new("quick fox").attributes(ArticleColumn::ALL);
    let query = FullTextSearch::new().prepare(&request).unwrap();
    assert_eq!(
        query.sql(),
        "SELECT * FROM \"articles\" WHERE \
         (to_tsvector('english', \"title\") @@ plainto_tsquery('english', $1) OR \"title\" ~* $2) OR \
         (to_tsvector('english', \"body_text\") @@ plainto_tsquery('english', $1) OR \"body_text\" ~* $2);"
    );
}

#[test]
fn test_from_row_is_generated() {
    // compile-time check
    let _from_row: fn(&may_postgres::Row) -> Result<Article, may_postgres::Error> =
        <Article as lifeguard_search::FromRow>::from_row;
}
