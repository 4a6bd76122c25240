//! Utility functions for code generation

/// Convert string to PascalCase
pub fn pascal_case(s: &str) -> String {
    let mut result = String::new();
    let mut capitalize = true;
    for c in s.chars() {
        if c == '_' {
            capitalize = true;
        } else if capitalize {
            result.extend(c.to_uppercase());
            capitalize = false;
        } else {
            result.push(c);
        }
    }
    result
}

/// Field name without a raw-identifier prefix (`r#type` → `type`)
pub fn unraw(ident: &syn::Ident) -> String {
    let name = ident.to_string();
    match name.strip_prefix("r#") {
        Some(stripped) => stripped.to_string(),
        None => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pascal_case() {
        assert_eq!(pascal_case("user_id"), "UserId");
        assert_eq!(pascal_case("title"), "Title");
        assert_eq!(pascal_case("_body"), "Body");
        assert_eq!(pascal_case("Title"), "Title");
    }

    #[test]
    fn test_unraw() {
        let ident: syn::Ident = syn::parse_str("r#type").unwrap();
        assert_eq!(unraw(&ident), "type");
        let ident: syn::Ident = syn::parse_str("title").unwrap();
        assert_eq!(unraw(&ident), "title");
    }
}
