//! Derive macro for `Searchable`

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use std::collections::HashMap;
use syn::{parse_macro_input, Data, DeriveInput, Fields};

use crate::attributes;
use crate::utils;

struct FieldInfo {
    ident: syn::Ident,
    field: String,
    column: String,
    skip: bool,
}

pub fn derive_searchable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;
    let vis = &input.vis;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Searchable cannot be derived for generic structs",
        ));
    }

    let fields = match &input.data {
        Data::Struct(syn::DataStruct {
            fields: Fields::Named(fields),
            ..
        }) => &fields.named,
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Searchable can only be derived for structs with named fields",
            ));
        }
    };

    let table_name = attributes::extract_table_name(&input.attrs)?;

    let mut infos = Vec::with_capacity(fields.len());
    for field in fields {
        // Named fields always carry an ident
        let Some(ident) = field.ident.clone() else {
            continue;
        };
        let name = utils::unraw(&ident);
        let column = attributes::extract_column_name(field)?.unwrap_or_else(|| name.clone());
        infos.push(FieldInfo {
            ident,
            field: name,
            column,
            skip: attributes::has_search_skip(field),
        });
    }

    let searchable: Vec<&FieldInfo> = infos.iter().filter(|f| !f.skip).collect();
    if searchable.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "Searchable requires at least one field without #[search_skip]",
        ));
    }

    let column_enum = format_ident!("{}Column", struct_name);
    let entity_name = struct_name.to_string();
    let variants = variant_idents(&searchable)?;
    let columns: Vec<&str> = searchable.iter().map(|f| f.column.as_str()).collect();
    let members: Vec<&str> = searchable.iter().map(|f| f.field.as_str()).collect();
    let variant_count = variants.len();

    let table_name_impl = match &table_name {
        Some(table) => quote! {
            fn table_name() -> ::core::option::Option<&'static str> {
                ::core::option::Option::Some(#table)
            }
        },
        None => quote! {},
    };

    let from_row_fields: Vec<TokenStream2> = infos
        .iter()
        .map(|f| {
            let ident = &f.ident;
            let column = &f.column;
            quote! { #ident: row.try_get(#column)?, }
        })
        .collect();

    let column_doc = format!("Searchable columns of [`{}`]", struct_name);

    Ok(quote! {
        #[doc = #column_doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #vis enum #column_enum {
            #(#variants,)*
        }

        impl #column_enum {
            pub const ALL: [#column_enum; #variant_count] = [#(#column_enum::#variants,)*];

            /// Database column name
            pub fn as_str(&self) -> &'static str {
                match self {
                    #(#column_enum::#variants => #columns,)*
                }
            }

            /// Field name, as used in selectors
            pub fn field_name(&self) -> &'static str {
                match self {
                    #(#column_enum::#variants => #members,)*
                }
            }
        }

        impl ::lifeguard_search::__private::sea_query::Iden for #column_enum {
            fn unquoted(&self) -> &str {
                self.as_str()
            }
        }

        impl ::core::convert::From<#column_enum> for ::lifeguard_search::Selector {
            fn from(column: #column_enum) -> Self {
                ::lifeguard_search::Selector::member(column.field_name())
            }
        }

        impl ::lifeguard_search::SearchEntity for #struct_name {
            fn entity_name() -> &'static str {
                #entity_name
            }

            #table_name_impl

            fn fields() -> &'static [::lifeguard_search::FieldMapping] {
                const FIELDS: &[::lifeguard_search::FieldMapping] = &[
                    #(::lifeguard_search::FieldMapping::new(#members, #columns),)*
                ];
                FIELDS
            }
        }

        impl ::lifeguard_search::FromRow for #struct_name {
            fn from_row(
                row: &::lifeguard_search::__private::may_postgres::Row,
            ) -> ::core::result::Result<Self, ::lifeguard_search::__private::may_postgres::Error> {
                ::core::result::Result::Ok(Self {
                    #(#from_row_fields)*
                })
            }
        }
    })
}

/// One `PascalCase` variant per searchable field; two fields may not share a variant
fn variant_idents(fields: &[&FieldInfo]) -> syn::Result<Vec<syn::Ident>> {
    let mut taken: HashMap<String, &syn::Ident> = HashMap::new();
    let mut variants = Vec::with_capacity(fields.len());
    for f in fields {
        let variant = utils::pascal_case(&f.field);
        if !variant.starts_with(|c: char| c.is_alphabetic()) {
            return Err(syn::Error::new_spanned(
                &f.ident,
                format!(
                    "Searchable cannot derive a column variant from field `{}`; mark it #[search_skip] or rename it",
                    f.field
                ),
            ));
        }
        if let Some(previous) = taken.get(&variant) {
            return Err(syn::Error::new_spanned(
                &f.ident,
                format!(
                    "field `{}` maps to column variant `{}`, already used by field `{}`",
                    f.field, variant, previous
                ),
            ));
        }
        taken.insert(variant.clone(), &f.ident);
        variants.push(format_ident!("{}", variant));
    }
    Ok(variants)
}
