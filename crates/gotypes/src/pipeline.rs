//! Multi-root aggregation and file generation.
//!
//! All roots are loaded before anything is extracted, so a traversal failure
//! on any root aborts the run without output. Declarations from earlier
//! roots win over same-named ones from later roots. Endpoint annotations
//! from every root are correlated against the merged registry.

use crate::config::Config;
use crate::endpoints::correlate;
use crate::error::Error;
use crate::input::{ExtractOptions, extract_declarations};
use crate::ir::TypeDeclaration;
use crate::output::{TypeScriptEmitter, placeholder_names};
use crate::registry::TypeRegistry;
use crate::source::SourceRoot;
use std::path::{Path, PathBuf};

/// Summary of a generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateReport {
    pub target: PathBuf,
    /// Declarations written.
    pub declarations: usize,
    /// `type X = any;` lines written.
    pub placeholders: usize,
    /// Endpoint usages attached to declarations.
    pub endpoint_usages: usize,
    /// Files skipped because they failed to parse.
    pub skipped_files: Vec<PathBuf>,
}

/// Extract every type declaration found under `root`, in traversal order.
pub fn collect_type_definitions(
    root: &Path,
    options: &ExtractOptions,
) -> Result<Vec<TypeDeclaration>, Error> {
    let loaded = SourceRoot::load(root)?;
    Ok(declarations_of(&loaded, options))
}

/// Attach endpoint usages documented under `root` to `registry` entries.
///
/// Returns the number of usages attached.
pub fn collect_endpoint_info(root: &Path, registry: &mut TypeRegistry) -> Result<usize, Error> {
    let loaded = SourceRoot::load(root)?;
    Ok(endpoints_of(&loaded, registry))
}

/// Build the merged registry for `roots`.
pub fn collect_registry(roots: &[PathBuf], config: &Config) -> Result<TypeRegistry, Error> {
    let loaded = load_roots(roots)?;
    let (registry, _) = build_registry(&loaded, &config.extract);
    Ok(registry)
}

/// Generate the TypeScript file for `roots` and write it to `target`.
pub fn generate_from_dirs(
    roots: &[PathBuf],
    target: &Path,
    config: &Config,
) -> Result<GenerateReport, Error> {
    let loaded = load_roots(roots)?;
    let (registry, endpoint_usages) = build_registry(&loaded, &config.extract);

    let generated_at = chrono::Local::now().naive_local();
    let text = TypeScriptEmitter::new(config.typescript.clone()).emit(&registry, generated_at);
    std::fs::write(target, text).map_err(|source| Error::Write {
        path: target.to_path_buf(),
        source,
    })?;

    let report = GenerateReport {
        target: target.to_path_buf(),
        declarations: registry.len(),
        placeholders: placeholder_names(&registry).len(),
        endpoint_usages,
        skipped_files: loaded.into_iter().flat_map(|root| root.skipped).collect(),
    };
    tracing::info!(
        target = %target.display(),
        declarations = report.declarations,
        placeholders = report.placeholders,
        endpoint_usages = report.endpoint_usages,
        "wrote type definitions"
    );
    Ok(report)
}

/// Single-root convenience for [`generate_from_dirs`].
pub fn generate(root: &Path, target: &Path, config: &Config) -> Result<GenerateReport, Error> {
    generate_from_dirs(&[root.to_path_buf()], target, config)
}

fn load_roots(roots: &[PathBuf]) -> Result<Vec<SourceRoot>, Error> {
    roots.iter().map(|root| SourceRoot::load(root)).collect()
}

/// Merged registry plus the number of endpoint usages attached to it.
fn build_registry(loaded: &[SourceRoot], options: &ExtractOptions) -> (TypeRegistry, usize) {
    let mut registry = TypeRegistry::new();
    for root in loaded {
        registry.extend(declarations_of(root, options));
    }
    let mut attached = 0;
    for root in loaded {
        attached += endpoints_of(root, &mut registry);
    }
    (registry, attached)
}

fn declarations_of(root: &SourceRoot, options: &ExtractOptions) -> Vec<TypeDeclaration> {
    let mut decls = Vec::new();
    for file in &root.files {
        let classify_as = root.classification_path(file);
        for mut decl in extract_declarations(&file.tree, &file.source, classify_as, options) {
            decl.path = file.path.clone();
            decls.push(decl);
        }
    }
    decls
}

fn endpoints_of(root: &SourceRoot, registry: &mut TypeRegistry) -> usize {
    let mut attached = 0;
    for file in &root.files {
        let blocks = file.comment_blocks();
        attached += correlate(blocks.iter().map(String::as_str), registry);
    }
    attached
}
