//! Dynamic symbol table extraction.
//!
//! This module walks the dynamic symbol table of an ELF shared object
//! and collects the names of all exported, defined function symbols:
//! the set of entry points a program linked against the library can
//! actually call. Undefined references, data objects, and local or
//! ifunc-resolved symbols are excluded, matching the classification
//! `nm -D` reports as `T` (global text) and `W` (weak).

use crate::mmap::MappedFile;
use goblin::elf::Elf;
use goblin::elf::header::ET_DYN;
use goblin::elf::sym::{STB_GLOBAL, STB_WEAK, STT_FUNC, Sym};
use thiserror::Error;
use tracing::debug;

// Section index marking an undefined (imported) symbol.
const SHN_UNDEF: usize = 0;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("cannot open {path}: {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },
    #[error("goblin parse error: {0}")]
    GoblinError(#[from] goblin::error::Error),
    #[error("{path} is not a shared object (ELF type {e_type:#x})")]
    NotSharedObject { path: String, e_type: u16 },
    #[error("{path} has no dynamic symbol table")]
    NoDynamicSymbols { path: String },
}

/// Extract the names of all exported function symbols from a shared object.
///
/// The returned sequence is raw: names appear in symbol-table order, may
/// carry `@version` suffixes, and may contain duplicates when several
/// versioned entries alias one exported name. Callers normalize it with
/// [`crate::catalog::normalize`].
///
/// An empty result from a valid shared object is not an error; a missing
/// file, a non-ELF or non-`ET_DYN` input, or the absence of a dynamic
/// section all are.
pub fn extract_exported_functions(path: &str) -> Result<Vec<String>, ExtractionError> {
    let file = MappedFile::open(path).map_err(|source| ExtractionError::Open {
        path: path.to_string(),
        source,
    })?;
    let elf = Elf::parse(file.data)?;

    if elf.header.e_type != ET_DYN {
        return Err(ExtractionError::NotSharedObject {
            path: path.to_string(),
            e_type: elf.header.e_type,
        });
    }
    if elf.dynamic.is_none() {
        return Err(ExtractionError::NoDynamicSymbols {
            path: path.to_string(),
        });
    }

    let mut names = Vec::new();
    for sym in elf.dynsyms.iter() {
        if !is_exported_function(&sym) {
            continue;
        }
        if let Some(name) = elf.dynstrtab.get_at(sym.st_name) {
            if !name.is_empty() {
                names.push(name.to_string());
            }
        }
    }

    debug!(
        "{}: {} exported function symbols of {} dynamic entries",
        path,
        names.len(),
        elf.dynsyms.len()
    );

    Ok(names)
}

/// Whether a dynamic symbol table entry is a callable export: defined in
/// this object, function-typed, with global or weak binding.
///
/// `STT_GNU_IFUNC` entries resolve to an implementation at load time and
/// are not plain text exports; they are excluded.
fn is_exported_function(sym: &Sym) -> bool {
    if sym.st_shndx == SHN_UNDEF {
        return false;
    }
    if sym.st_type() != STT_FUNC {
        return false;
    }
    matches!(sym.st_bind(), STB_GLOBAL | STB_WEAK)
}
