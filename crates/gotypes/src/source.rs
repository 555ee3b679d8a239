//! Discovery and parsing of Go files under a source root.

use crate::error::{Error, ParseError};
use crate::input::{comment_blocks, parse_tree};
use std::path::{Path, PathBuf};
use tree_sitter::Tree;
use walkdir::WalkDir;

/// A parsed Go file.
pub struct SourceFile {
    pub path: PathBuf,
    pub source: String,
    pub tree: Tree,
}

impl SourceFile {
    /// Comment groups of this file, markers stripped.
    pub fn comment_blocks(&self) -> Vec<String> {
        comment_blocks(&self.tree, &self.source)
    }
}

/// All parseable Go files under one directory.
pub struct SourceRoot {
    pub root: PathBuf,
    pub files: Vec<SourceFile>,
    /// Files that failed to parse and were skipped.
    pub skipped: Vec<PathBuf>,
}

/// List every `.go` file under `root`, in file-name order.
pub fn list_go_files(root: &Path) -> Result<Vec<PathBuf>, Error> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|source| Error::Walk {
            root: root.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if entry.file_type().is_file() && path.extension().is_some_and(|ext| ext == "go") {
            files.push(path.to_path_buf());
        }
    }
    Ok(files)
}

impl SourceRoot {
    /// Path used for API classification of declarations in `file`.
    ///
    /// For a relative root this is the path as walked (`./api/user.go`). For
    /// an absolute root it is the part below the root, so directories above
    /// the source tree never affect classification.
    pub fn classification_path<'a>(&self, file: &'a SourceFile) -> &'a Path {
        if self.root.is_relative() {
            return &file.path;
        }
        file.path.strip_prefix(&self.root).unwrap_or(&file.path)
    }

    /// Read and parse every Go file under `root`.
    ///
    /// Files with syntax errors are logged and skipped; traversal and read
    /// failures abort.
    pub fn load(root: &Path) -> Result<Self, Error> {
        let mut files = Vec::new();
        let mut skipped = Vec::new();

        for path in list_go_files(root)? {
            let bytes = std::fs::read(&path).map_err(|source| Error::Read {
                path: path.clone(),
                source,
            })?;
            match parse_bytes(bytes) {
                Ok((source, tree)) => {
                    tracing::debug!(path = %path.display(), "parsed");
                    files.push(SourceFile { path, source, tree });
                }
                Err(ParseError::Grammar(message)) => return Err(Error::Grammar(message)),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "skipping file");
                    skipped.push(path);
                }
            }
        }

        tracing::info!(
            root = %root.display(),
            parsed = files.len(),
            skipped = skipped.len(),
            "scanned source root"
        );
        Ok(Self {
            root: root.to_path_buf(),
            files,
            skipped,
        })
    }
}

fn parse_bytes(bytes: Vec<u8>) -> Result<(String, Tree), ParseError> {
    let source = String::from_utf8(bytes).map_err(|_| ParseError::Encoding)?;
    let tree = parse_tree(&source)?;
    Ok((source, tree))
}
