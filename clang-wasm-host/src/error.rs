use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the host runtime.
///
/// Guest behavior is never trusted: traps, bad handles, unknown enum
/// discriminants and out-of-bounds memory access all come back as
/// variants here instead of panicking the host.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("wasm engine error: {0}")]
    Wasm(#[from] wasmi::Error),
    #[error("failed to define host imports: {0}")]
    Linker(#[from] wasmi::errors::LinkerError),
    #[error("artifact does not export `{name}`")]
    MissingExport { name: &'static str },
    #[error("export `{name}` has signature {found}, expected {expected}")]
    ExportSignature {
        name: &'static str,
        expected: String,
        found: String,
    },
    #[error("artifact does not export a linear memory named `memory`")]
    MissingMemory,
    #[error("guest memory access out of bounds at offset {offset} (len {len})")]
    MemoryAccess { offset: u32, len: u32 },
    #[error("guest returned invalid UTF-8 in a string result")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
    #[error("guest returned unknown {what} value {value}")]
    InvalidEnumValue { what: &'static str, value: i64 },
    #[error("guest returned a null {what} handle")]
    NullHandle { what: &'static str },
    #[error("guest invoked the child visitor with none registered")]
    VisitorUnderflow,
    #[error("translation unit could not be parsed")]
    ParseFailed,
    #[error("type layout query failed: {0:?}")]
    Layout(clang_wasm_api::TypeLayoutError),
    #[error("saving the translation unit failed: {0:?}")]
    SaveFailed(clang_wasm_api::SaveError),
    #[error("reparsing the translation unit failed (code {0})")]
    ReparseFailed(i32),
    #[error("loading serialized diagnostics failed: {error:?}: {message}")]
    LoadDiagnostics {
        error: clang_wasm_api::LoadDiagError,
        message: String,
    },
    #[error("no filesystem entry at {0}")]
    FsNotFound(PathBuf),
    #[error("{0} is not a directory")]
    FsNotADirectory(PathBuf),
    #[error("{0} is a directory")]
    FsIsADirectory(PathBuf),
    #[error("{0} is already a mount point")]
    FsAlreadyMounted(PathBuf),
    #[error("invalid guest path {0:?}")]
    FsInvalidPath(String),
    #[error("unknown file descriptor {0}")]
    FsBadFd(i32),
}
