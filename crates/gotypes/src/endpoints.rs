//! Swagger-style endpoint annotations.
//!
//! Recognized inside a single comment block:
//!
//! ```text
//! @Router <path> [<method>]
//! @Success <code> {<kind>} <TypeName>
//! @Param <name> body <TypeName>
//! ```
//!
//! Blocks without a `@Router` line are ignored.

use crate::ir::{Direction, EndpointUsage};
use crate::registry::TypeRegistry;
use regex::Regex;
use std::sync::LazyLock;

static ROUTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@Router\s+(\S+)\s+\[([^\]]+)\]").expect("valid regex"));
static SUCCESS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@Success\s+\d+\s+\{([^}]+)\}\s+(\S+)").expect("valid regex"));
static PARAM_BODY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@Param\s+\S+\s+body\s+(\S+)").expect("valid regex"));

/// Endpoint facts found in one comment block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointFacts {
    pub method: String,
    pub path: String,
    /// `(type name, direction)` in annotation order.
    pub types: Vec<(String, Direction)>,
}

impl EndpointFacts {
    fn usage(&self, direction: Direction) -> EndpointUsage {
        EndpointUsage {
            method: self.method.clone(),
            path: self.path.clone(),
            direction,
        }
    }
}

/// Extract the route and referenced types from a comment block.
pub fn extract_endpoint_facts(block: &str) -> Option<EndpointFacts> {
    let router = ROUTER.captures(block)?;
    let path = router[1].to_string();
    let method = router[2].trim().to_string();

    let mut types = Vec::new();
    for caps in SUCCESS.captures_iter(block) {
        types.push((type_name(&caps[2]), Direction::Response));
    }
    for caps in PARAM_BODY.captures_iter(block) {
        types.push((type_name(&caps[1]), Direction::Request));
    }

    Some(EndpointFacts {
        method,
        path,
        types,
    })
}

/// `[]model.User` → `User`.
fn type_name(raw: &str) -> String {
    let name = raw.trim_start_matches("[]");
    match name.rsplit_once('.') {
        Some((_, unqualified)) if !unqualified.is_empty() => unqualified.to_string(),
        _ => name.to_string(),
    }
}

/// Attach endpoint usages from `blocks` to matching registry entries.
///
/// Names missing from the registry are ignored. Returns the number of
/// usages attached.
pub fn correlate<'a>(
    blocks: impl IntoIterator<Item = &'a str>,
    registry: &mut TypeRegistry,
) -> usize {
    let mut attached = 0;
    for block in blocks {
        let Some(facts) = extract_endpoint_facts(block) else {
            continue;
        };
        for (name, direction) in &facts.types {
            match registry.get_mut(name) {
                Some(decl) => {
                    decl.add_endpoint(facts.usage(*direction));
                    attached += 1;
                }
                None => {
                    tracing::trace!(name = %name, route = %facts.path, "endpoint type not in registry");
                }
            }
        }
    }
    attached
}
