//! Symcat - a symbol catalog generator.
//!
//! Symcat inspects the dynamic symbol table of a shared object (in the
//! reference deployment, the system C library) and derives two lookup
//! artifacts for a compiler-instrumentation toolchain: an indexed catalog
//! mapping each exported function name to its sorted rank, and a set
//! catalog holding the same names for membership tests. Both are emitted
//! as static data declarations in a target representation.
//!
//! # Modules
//!
//! - [`extract`] - Dynamic symbol table extraction (ELF, via goblin)
//! - [`catalog`] - Normalization and the two derived catalogs
//! - [`emit`] - Static declaration rendering and atomic file output
//! - [`mmap`] - Memory-mapped read access to the input binary
//!
//! # Error Handling
//!
//! All operations use the consolidated [`Error`] type; extraction and
//! emission each have their own variant enum with specific failure modes.

pub mod catalog;
pub mod emit;
pub mod extract;
pub mod mmap;

/// Consolidated error type for all Symcat operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("extraction error: {0}")]
    Extraction(#[from] extract::ExtractionError),

    #[error("emit error: {0}")]
    Emit(#[from] emit::EmitError),
}

pub type Result<T> = core::result::Result<T, Error>;

pub use catalog::{IndexCatalog, SetCatalog};
pub use mmap::MappedFile;
