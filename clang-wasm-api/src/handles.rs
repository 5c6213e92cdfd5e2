//! Wire handles for the wrapped library's opaque objects.
//!
//! The binding shim inside the artifact keeps every live object
//! (indices, translation units, cursors, ...) in an object table and
//! hands out `u32` slot numbers. Slot 0 is reserved for the null
//! handle. The host runtime wraps these in richer types; the newtypes
//! here only prevent one kind of handle from being passed where
//! another is expected.

use crate::wire::wire_handle;

/// A raw slot number in the shim's object table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawHandle(pub u32);

impl RawHandle {
    /// The reserved null slot.
    pub const NULL: RawHandle = RawHandle(0);

    pub fn is_null(self) -> bool {
        self.0 == 0
    }
}

wire_handle! {
    /// An "index" that consists of a set of translation units that
    /// would typically be linked together into an executable or
    /// library.
    pub struct IndexHandle
}

wire_handle! {
    /// A single translation unit, which resides in an index.
    pub struct TranslationUnitHandle
}

wire_handle! {
    /// A particular source file that is part of a translation unit.
    pub struct FileHandle
}

wire_handle! {
    /// A single diagnostic, containing the diagnostic's severity,
    /// location, text, source ranges, and fix-it hints.
    pub struct DiagnosticHandle
}

wire_handle! {
    /// A group of diagnostics.
    pub struct DiagnosticSetHandle
}

wire_handle! {
    /// A cursor representing some element in the abstract syntax tree
    /// of a translation unit.
    pub struct CursorHandle
}

wire_handle! {
    /// Identifies a specific source location within a translation
    /// unit.
    pub struct LocationHandle
}

wire_handle! {
    /// Identifies a half-open character range in the source code.
    pub struct RangeHandle
}

wire_handle! {
    /// A single preprocessing token.
    pub struct TokenHandle
}

wire_handle! {
    /// A module referenced by a module import declaration.
    pub struct ModuleHandle
}

wire_handle! {
    /// An opaque policy that controls pretty printing for
    /// `cursor_pretty_printed`.
    pub struct PrintingPolicyHandle
}

/// Provides the contents of a file that has not yet been saved to
/// disk.
///
/// Each instance provides the name of a file on the system along with
/// the current contents of that file that have not yet been saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsavedFile {
    /// The file whose contents have not yet been saved.
    ///
    /// This file must already exist in the file system.
    pub filename: String,
    /// A buffer containing the unsaved contents of this file.
    pub contents: String,
}

impl UnsavedFile {
    pub fn new(filename: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            contents: contents.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_the_null_handle() {
        assert!(RawHandle::NULL.is_null());
        assert!(IndexHandle::NULL.is_null());
        assert!(!CursorHandle::from_raw(7).is_null());
        assert_eq!(TranslationUnitHandle::from_raw(3).as_raw(), 3);
    }
}
