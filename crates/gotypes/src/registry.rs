//! Registry of extracted type declarations.
//!
//! Keyed by declaration name and iterated in insertion order, so the emitted
//! file does not depend on hash ordering.

use crate::ir::TypeDeclaration;
use indexmap::IndexMap;
use indexmap::map::Entry;

/// Name-keyed, insertion-ordered store of declarations.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    declarations: IndexMap<String, TypeDeclaration>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a declaration unless one with the same name is already present.
    ///
    /// Returns `false` (and drops `decl`) when the name was taken.
    pub fn insert(&mut self, decl: TypeDeclaration) -> bool {
        match self.declarations.entry(decl.name.clone()) {
            Entry::Occupied(existing) => {
                tracing::debug!(
                    name = %decl.name,
                    kept = %existing.get().path.display(),
                    dropped = %decl.path.display(),
                    "duplicate declaration ignored"
                );
                false
            }
            Entry::Vacant(slot) => {
                slot.insert(decl);
                true
            }
        }
    }

    /// Insert every declaration in order, first seen wins.
    pub fn extend(&mut self, decls: impl IntoIterator<Item = TypeDeclaration>) -> usize {
        let mut added = 0;
        for decl in decls {
            if self.insert(decl) {
                added += 1;
            }
        }
        added
    }

    pub fn get(&self, name: &str) -> Option<&TypeDeclaration> {
        self.declarations.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut TypeDeclaration> {
        self.declarations.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.declarations.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Declarations in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &TypeDeclaration> {
        self.declarations.values()
    }

    /// Declaration names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.declarations.keys().map(String::as_str)
    }
}

impl FromIterator<TypeDeclaration> for TypeRegistry {
    fn from_iter<I: IntoIterator<Item = TypeDeclaration>>(iter: I) -> Self {
        let mut registry = TypeRegistry::new();
        registry.extend(iter);
        registry
    }
}
