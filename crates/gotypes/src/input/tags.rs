//! Struct tag parsing and field-name resolution.
//!
//! Tags follow the conventional `key:"value" key2:"value2"` layout. Naming
//! keys are consulted in priority order; validation keys are collected
//! independently of which naming key wins.

/// Naming keys, highest priority first: wire name, form name, route param, query param.
pub const NAME_KEYS: &[&str] = &["json", "form", "param", "query"];

/// Keys whose values are carried into the emitted docs as validation rules.
pub const VALIDATION_KEYS: &[&str] = &["binding", "validate"];

const IGNORE_MARKER: &str = "-";
const OMIT_EMPTY: &str = "omitempty";

/// A parsed struct tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructTag {
    entries: Vec<(String, String)>,
}

impl StructTag {
    /// Parse a tag body (without the surrounding backticks or quotes).
    ///
    /// Scanning stops at the first malformed entry; earlier entries are kept.
    pub fn parse(tag: &str) -> Self {
        let mut entries = Vec::new();
        let mut rest = tag;
        loop {
            rest = rest.trim_start_matches(' ');
            if rest.is_empty() {
                break;
            }
            let key_len = rest
                .bytes()
                .take_while(|&b| b > b' ' && b != b':' && b != b'"' && b != 0x7f)
                .count();
            let after_key = &rest[key_len..];
            if key_len == 0 || !after_key.starts_with(":\"") {
                break;
            }
            let key = &rest[..key_len];
            let quoted = &after_key[1..];
            let Some(end) = closing_quote(quoted) else {
                break;
            };
            let Some(value) = unquote(&quoted[..=end]) else {
                break;
            };
            entries.push((key.to_string(), value));
            rest = &quoted[end + 1..];
        }
        Self { entries }
    }

    /// Value of the first entry for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Entries in source order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Index of the closing quote of a string starting with `"`.
fn closing_quote(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut i = 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return Some(i),
            _ => i += 1,
        }
    }
    None
}

/// Decode a Go interpreted string literal, quotes included.
pub fn unquote(literal: &str) -> Option<String> {
    let inner = literal.strip_prefix('"')?.strip_suffix('"')?;
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next()? {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            '0' => out.push('\0'),
            other => out.push(other),
        }
    }
    Some(out)
}

/// Body of a tag literal as written in source (raw or interpreted).
pub fn tag_body(literal: &str) -> Option<String> {
    if let Some(raw) = literal
        .strip_prefix('`')
        .and_then(|s| s.strip_suffix('`'))
    {
        return Some(raw.to_string());
    }
    unquote(literal)
}

/// Name, optionality and validation rules derived from a field's tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTag {
    pub name: String,
    pub optional: bool,
    pub validation: Vec<String>,
}

/// Resolve a field's external name and optionality.
///
/// `ident` is the Go field name, used when no naming key supplies one.
/// `pointer` is the mapper's pointer flag; pointer fields are always optional.
pub fn resolve_tag(tag: Option<&StructTag>, ident: &str, pointer: bool) -> ResolvedTag {
    let Some(tag) = tag else {
        return ResolvedTag {
            name: ident.to_string(),
            optional: pointer,
            validation: Vec::new(),
        };
    };

    let present: Vec<&str> = NAME_KEYS.iter().filter_map(|key| tag.get(key)).collect();
    let winner = present.iter().copied().find(|value| {
        let name = value.split(',').next().unwrap_or("");
        !name.is_empty() && name != IGNORE_MARKER
    });

    let (name, modifiers_from) = match winner {
        Some(value) => (value.split(',').next().unwrap_or(ident), Some(value)),
        // A bare `json:",omitempty"` still marks the field optional.
        None => (ident, present.first().copied()),
    };
    let omit_empty = modifiers_from
        .is_some_and(|value| value.split(',').skip(1).any(|m| m.trim() == OMIT_EMPTY));

    let validation = tag
        .entries()
        .filter(|(key, _)| VALIDATION_KEYS.contains(key))
        .map(|(key, value)| format!("{}: {}", key, value))
        .collect();

    ResolvedTag {
        name: name.to_string(),
        optional: pointer || omit_empty,
        validation,
    }
}
