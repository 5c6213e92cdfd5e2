//! Typed declarations of the wrapped `libclang` API surface.
//!
//! This crate is the Rust counterpart of the original header: it
//! transcribes the enumerations, flag words, wire structs and function
//! signatures that the compiled `libclang.wasm` artifact exposes. There
//! is no logic here beyond raw-value conversions; the host runtime
//! (`clang-wasm-host`) consumes these declarations to resolve and
//! type-check the artifact's exports.

// ---------------------------------------------------------------------
// Declaration helpers
// ---------------------------------------------------------------------

mod wire;

// ---------------------------------------------------------------------
// Enumerations transcribed from the wrapped header
// ---------------------------------------------------------------------

pub mod cursor_kind;
pub mod enums;
pub mod type_kind;

// ---------------------------------------------------------------------
// Flag words, wire handles and the export surface
// ---------------------------------------------------------------------

pub mod flags;
pub mod functions;
pub mod handles;

// ---------------------------------------------------------------------
// Public API re-exports
// ---------------------------------------------------------------------

pub use cursor_kind::CursorKind;
pub use enums::{
    AccessSpecifier, AvailabilityKind, CallingConv, ChildVisitResult, DiagnosticSeverity,
    LanguageKind, LinkageKind, LoadDiagError, NullabilityKind, PrintingPolicyProperty,
    RefQualifierKind, SaveError, StorageClass, TemplateArgumentKind, TlsKind, TokenKind,
    TuResourceUsageKind, TypeLayoutError, VisibilityKind,
};
pub use flags::{
    DiagnosticDisplayOptions, GlobalOptFlags, NameRefFlags, ObjCDeclQualifier,
    ObjCPropertyAttrKind, ReparseFlags, SaveTranslationUnitFlags, TranslationUnitFlags,
};
pub use functions::{FunctionDecl, WasmType, FUNCTIONS, find_function};
pub use handles::{
    CursorHandle, DiagnosticHandle, DiagnosticSetHandle, FileHandle, IndexHandle, LocationHandle,
    ModuleHandle, PrintingPolicyHandle, RangeHandle, RawHandle, TokenHandle,
    TranslationUnitHandle, UnsavedFile,
};
pub use type_kind::TypeKind;
