//! Attribute parsing utilities

use syn::{Attribute, ExprLit, Field, Lit};

/// Value of a `#[name = "..."]` attribute
///
/// `Ok(None)` when absent; an error when present in any other form or empty.
fn extract_str(attrs: &[Attribute], name: &str) -> syn::Result<Option<String>> {
    for attr in attrs {
        if attr.path().is_ident(name) {
            let meta = attr.meta.require_name_value()?;
            if let syn::Expr::Lit(ExprLit {
                lit: Lit::Str(s), ..
            }) = &meta.value
            {
                let value = s.value();
                if value.trim().is_empty() {
                    return Err(syn::Error::new_spanned(
                        s,
                        format!("#[{}] must not be empty", name),
                    ));
                }
                return Ok(Some(value));
            }
            return Err(syn::Error::new_spanned(
                &meta.value,
                format!("expected #[{} = \"...\"]", name),
            ));
        }
    }
    Ok(None)
}

/// Extract table name from struct attributes
pub fn extract_table_name(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    extract_str(attrs, "table_name")
}

/// Extract column name from field attributes
pub fn extract_column_name(field: &Field) -> syn::Result<Option<String>> {
    extract_str(&field.attrs, "column_name")
}

/// Check for the `#[search_skip]` attribute
pub fn has_search_skip(field: &Field) -> bool {
    field
        .attrs
        .iter()
        .any(|attr| attr.path().is_ident("search_skip"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_extract_table_name() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[table_name = "articles"])];
        assert_eq!(extract_table_name(&attrs).unwrap(), Some("articles".to_string()));
        assert_eq!(extract_table_name(&[]).unwrap(), None);
    }

    #[test]
    fn test_empty_table_name_rejected() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[table_name = " "])];
        assert!(extract_table_name(&attrs).is_err());
    }

    #[test]
    fn test_table_name_must_be_string() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[table_name = 42])];
        assert!(extract_table_name(&attrs).is_err());

        let attrs: Vec<Attribute> = vec![parse_quote!(#[table_name(articles)])];
        assert!(extract_table_name(&attrs).is_err());
    }

    #[test]
    fn test_field_attributes() {
        let field: Field = parse_quote! {
            #[search_skip]
            #[column_name = "body_text"]
            pub body: String
        };
        assert!(has_search_skip(&field));
        assert_eq!(extract_column_name(&field).unwrap(), Some("body_text".to_string()));

        let plain: Field = parse_quote!(pub title: String);
        assert!(!has_search_skip(&plain));
        assert_eq!(extract_column_name(&plain).unwrap(), None);
    }
}
