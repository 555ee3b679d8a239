//! Naming heuristics: exported-ness, API classification, camelCase.

use std::path::Path;

/// Path fragments that mark a file as holding wire-facing types.
const API_PATH_TOKENS: &[&str] = &["controller", "handler", "api", "form"];

/// Type-name fragments that mark a type as wire-facing.
const API_NAME_TOKENS: &[&str] = &["Request", "Response", "Params", "Param", "Form"];

/// Go exports identifiers that start with an upper-case letter.
pub fn is_exported(ident: &str) -> bool {
    ident.chars().next().is_some_and(char::is_uppercase)
}

/// Whether a declaration is API-facing and must keep its wire field names.
pub fn is_api_type(type_name: &str, path: &Path) -> bool {
    let path = path.to_string_lossy();
    API_PATH_TOKENS.iter().any(|t| path.contains(t))
        || API_NAME_TOKENS.iter().any(|t| type_name.contains(t))
}

/// Convert a snake_case or PascalCase name to camelCase.
///
/// A leading acronym is lowered as a unit (`ID` → `id`, `URLPath` → `urlPath`).
pub fn to_camel_case(name: &str) -> String {
    if name.contains('_') {
        let mut words = name.split('_').filter(|w| !w.is_empty());
        let mut out = match words.next() {
            Some(first) => first.to_lowercase(),
            None => return name.to_string(),
        };
        for word in words {
            let mut chars = word.chars();
            if let Some(head) = chars.next() {
                out.extend(head.to_uppercase());
                out.push_str(&chars.as_str().to_lowercase());
            }
        }
        return out;
    }

    let chars: Vec<char> = name.chars().collect();
    if !chars.first().is_some_and(|c| c.is_uppercase()) {
        return name.to_string();
    }

    let upper_run = chars.iter().take_while(|c| c.is_uppercase()).count();
    // In `URLPath` the `P` starts the next word.
    let lower_len = if upper_run > 1 && upper_run < chars.len() && chars[upper_run].is_lowercase()
    {
        upper_run - 1
    } else {
        upper_run
    };

    let mut out = String::with_capacity(name.len());
    for c in &chars[..lower_len] {
        out.extend(c.to_lowercase());
    }
    out.extend(&chars[lower_len..]);
    out
}
