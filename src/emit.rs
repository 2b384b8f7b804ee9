//! Static declaration rendering and atomic file output.
//!
//! A catalog is serialized as a file-scope constant declaration in a
//! target language. The target syntax is carried by a [`Declaration`]
//! value rather than hard-coded, so the same canonical catalog can be
//! rendered for any consumer; the provided constructors cover the two
//! C++ headers the instrumentation passes include.
//!
//! Output is written to a temporary file next to the destination and
//! renamed into place, so a failed run never replaces a previous valid
//! artifact with a truncated one.

use crate::catalog::{IndexCatalog, SetCatalog};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum EmitError {
    #[error("cannot create temporary file in {dir}: {source}")]
    Create {
        dir: String,
        source: std::io::Error,
    },
    #[error("cannot write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
    #[error("cannot replace {path}: {source}")]
    Replace {
        path: String,
        source: std::io::Error,
    },
}

/// Target syntax for one emitted declaration: the lines preceding the
/// declaration, the declared type, and the variable name.
pub struct Declaration {
    pub preamble: Vec<String>,
    pub decl_type: String,
    pub var_name: String,
}

impl Declaration {
    /// C++ header declaring a `std::unordered_map<std::string, int>`,
    /// the shape the instrumentation passes include for index lookup.
    pub fn cxx_index_map(var_name: &str) -> Self {
        Self {
            preamble: vec![
                "#pragma once".to_string(),
                "#include <string>".to_string(),
                "#include <unordered_map>".to_string(),
            ],
            decl_type: "std::unordered_map<std::string, int>".to_string(),
            var_name: var_name.to_string(),
        }
    }

    /// C++ header declaring a `std::unordered_set<std::string>` for
    /// membership classification of call names.
    pub fn cxx_name_set(var_name: &str) -> Self {
        Self {
            preamble: vec![
                "#pragma once".to_string(),
                "#include <unordered_set>".to_string(),
                "#include <string>".to_string(),
            ],
            decl_type: "std::unordered_set<std::string>".to_string(),
            var_name: var_name.to_string(),
        }
    }

    fn render(&self, entries: impl Iterator<Item = String>) -> String {
        let mut lines = self.preamble.clone();
        lines.push(String::new());
        lines.push(format!(
            "static const {} {} = {{",
            self.decl_type, self.var_name
        ));
        lines.extend(entries);
        lines.push("};".to_string());
        lines.push(String::new());
        lines.join("\n")
    }
}

/// Render an index catalog as two-field records `{"name", index}`, one
/// per line, in catalog (ascending name) order.
pub fn render_index(catalog: &IndexCatalog, decl: &Declaration) -> String {
    decl.render(
        catalog
            .entries()
            .iter()
            .map(|(name, index)| format!("    {{\"{name}\", {index}}},")),
    )
}

/// Render a set catalog as quoted-name records, one per line, in
/// catalog (ascending name) order.
pub fn render_set(catalog: &SetCatalog, decl: &Declaration) -> String {
    decl.render(
        catalog
            .names()
            .iter()
            .map(|name| format!("    \"{name}\",")),
    )
}

/// Write `contents` to `path`, replacing any existing file atomically:
/// the text lands in a temporary file in the destination directory and
/// is renamed over the target only once fully written.
pub fn write_atomic(path: &str, contents: &str) -> Result<(), EmitError> {
    let target = Path::new(path);
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(|source| EmitError::Create {
        dir: dir.display().to_string(),
        source,
    })?;
    tmp.write_all(contents.as_bytes())
        .map_err(|source| EmitError::Write {
            path: path.to_string(),
            source,
        })?;
    tmp.persist(target).map_err(|source| EmitError::Replace {
        path: path.to_string(),
        source: source.error,
    })?;
    debug!("wrote {} ({} bytes)", path, contents.len());
    Ok(())
}
