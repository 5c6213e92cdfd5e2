//! Host runtime for the `libclang.wasm` artifact.
//!
//! This crate loads the compiled artifact into a `wasmi` sandbox and
//! re-exposes the wrapped API as typed passthrough methods on
//! [`LibClang`]. Nothing here parses or analyzes source code; every
//! operation marshals its arguments into guest memory, calls the guest
//! export of the same upstream name and decodes the result. The guest
//! sees the outside world only through [`VirtualFs`], the host-side
//! filesystem tree its file imports are routed to.
//!
//! ```no_run
//! use clang_wasm_host::LibClang;
//!
//! # fn main() -> Result<(), clang_wasm_host::HostError> {
//! let mut lc = LibClang::load("libclang.wasm")?;
//! lc.fs_mut().mount("/home/web_user", "./testSrc")?;
//! let index = lc.create_index(true, true)?;
//! # Ok(())
//! # }
//! ```

// ---------------------------------------------------------------------
// Errors and the guest-visible filesystem
// ---------------------------------------------------------------------

pub mod error;
pub mod vfs;

// ---------------------------------------------------------------------
// Artifact loading and wire marshalling
// ---------------------------------------------------------------------

pub mod runtime;

// ---------------------------------------------------------------------
// Passthrough surface, grouped the way the upstream header is
// ---------------------------------------------------------------------

pub mod cursor;
pub mod cxtype;
pub mod diagnostics;
pub mod file;
pub mod index;
pub mod misc;
pub mod module_map;
pub mod printing;
pub mod source_location;
pub mod token;
pub mod translation_unit;

#[cfg(test)]
pub(crate) mod testutil;

// ---------------------------------------------------------------------
// Public API re-exports
// ---------------------------------------------------------------------

pub use clang_wasm_api as api;
pub use cursor::Cursor;
pub use cxtype::CxType;
pub use diagnostics::{Diagnostic, DiagnosticSet, FixIt};
pub use error::HostError;
pub use file::File;
pub use index::Index;
pub use module_map::ModuleDesc;
pub use printing::PrintingPolicy;
pub use runtime::LibClang;
pub use source_location::{PhysicalLocation, PresumedLocation, SourceLocation, SourceRange};
pub use token::Token;
pub use translation_unit::TranslationUnit;
pub use vfs::VirtualFs;
