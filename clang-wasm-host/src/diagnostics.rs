//! Diagnostic reporting.

use wasmi::Val;

use clang_wasm_api::functions::SHIM_STR_FREE;
use clang_wasm_api::{
    DiagnosticDisplayOptions, DiagnosticHandle, DiagnosticSetHandle, DiagnosticSeverity,
    LoadDiagError,
};

use crate::error::HostError;
use crate::runtime::{LibClang, TempAllocs};
use crate::source_location::{SourceLocation, SourceRange};
use crate::translation_unit::TranslationUnit;

/// A single diagnostic: severity, location, text, source ranges and
/// fix-it hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Diagnostic {
    handle: DiagnosticHandle,
}

impl Diagnostic {
    fn from_wire(handle: u32) -> Self {
        Self {
            handle: DiagnosticHandle::from_raw(handle),
        }
    }

    pub fn handle(&self) -> DiagnosticHandle {
        self.handle
    }

    pub(crate) fn arg(&self) -> Val {
        Val::I32(self.handle.as_raw() as i32)
    }
}

/// A group of diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosticSet {
    handle: DiagnosticSetHandle,
}

impl DiagnosticSet {
    fn from_wire(handle: u32) -> Self {
        Self {
            handle: DiagnosticSetHandle::from_raw(handle),
        }
    }

    pub fn handle(&self) -> DiagnosticSetHandle {
        self.handle
    }

    pub(crate) fn arg(&self) -> Val {
        Val::I32(self.handle.as_raw() as i32)
    }
}

/// A replacement suggested as part of a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixIt {
    pub replacement: String,
    pub range: SourceRange,
}

impl LibClang {
    /// `clang_getNumDiagnosticsInSet`.
    pub fn num_diagnostics_in_set(&mut self, set: &DiagnosticSet) -> Result<u32, HostError> {
        self.call_u32("clang_getNumDiagnosticsInSet", &[set.arg()])
    }

    /// `clang_getDiagnosticInSet`.
    pub fn diagnostic_in_set(
        &mut self,
        set: &DiagnosticSet,
        index: u32,
    ) -> Result<Diagnostic, HostError> {
        let handle = self.call_u32(
            "clang_getDiagnosticInSet",
            &[set.arg(), Val::I32(index as i32)],
        )?;
        if handle == 0 {
            return Err(HostError::NullHandle { what: "diagnostic" });
        }
        Ok(Diagnostic::from_wire(handle))
    }

    /// Deserializes diagnostics from a guest file written with the
    /// serialization option (`clang_loadDiagnostics`).
    pub fn load_diagnostics(&mut self, filename: &str) -> Result<DiagnosticSet, HostError> {
        let mut allocs = TempAllocs::new();
        let (ptr, len) = self.write_string(filename, &mut allocs)?;
        // Out words: load error code, message string pointer.
        let out = self.alloc(8)?;
        self.write_bytes(out, &[0; 8])?;
        let handle = self.call_u32(
            "clang_loadDiagnostics",
            &[
                Val::I32(ptr as i32),
                Val::I32(len as i32),
                Val::I32(out as i32),
                Val::I32((out + 4) as i32),
            ],
        )?;
        let code = self.read_u32(out)?;
        let message_ptr = self.read_u32(out + 4)?;
        let message = if message_ptr == 0 {
            String::new()
        } else {
            let text = self.read_cstring(message_ptr)?;
            self.call_unit(SHIM_STR_FREE, &[Val::I32(message_ptr as i32)])?;
            text
        };
        self.free(out, 8)?;
        self.release(allocs)?;
        if handle != 0 {
            return Ok(DiagnosticSet::from_wire(handle));
        }
        let error = LoadDiagError::from_raw(code).ok_or(HostError::InvalidEnumValue {
            what: "load diagnostics error",
            value: code as i64,
        })?;
        Err(HostError::LoadDiagnostics { error, message })
    }

    /// `clang_disposeDiagnosticSet`.
    pub fn dispose_diagnostic_set(&mut self, set: DiagnosticSet) -> Result<(), HostError> {
        self.call_unit("clang_disposeDiagnosticSet", &[set.arg()])
    }

    /// Child diagnostics of a diagnostic, typically its notes
    /// (`clang_getChildDiagnostics`). The returned set does not need
    /// to be disposed.
    pub fn child_diagnostics(
        &mut self,
        diagnostic: &Diagnostic,
    ) -> Result<DiagnosticSet, HostError> {
        let handle = self.call_u32("clang_getChildDiagnostics", &[diagnostic.arg()])?;
        Ok(DiagnosticSet::from_wire(handle))
    }

    /// `clang_getNumDiagnostics`.
    pub fn num_diagnostics(&mut self, tu: &TranslationUnit) -> Result<u32, HostError> {
        self.call_u32("clang_getNumDiagnostics", &[tu.arg()])
    }

    /// `clang_getDiagnostic`.
    pub fn diagnostic(
        &mut self,
        tu: &TranslationUnit,
        index: u32,
    ) -> Result<Diagnostic, HostError> {
        let handle = self.call_u32("clang_getDiagnostic", &[tu.arg(), Val::I32(index as i32)])?;
        if handle == 0 {
            return Err(HostError::NullHandle { what: "diagnostic" });
        }
        Ok(Diagnostic::from_wire(handle))
    }

    /// The complete diagnostic set of a translation unit
    /// (`clang_getDiagnosticSetFromTU`).
    pub fn diagnostic_set_from_tu(
        &mut self,
        tu: &TranslationUnit,
    ) -> Result<DiagnosticSet, HostError> {
        let handle = self.call_u32("clang_getDiagnosticSetFromTU", &[tu.arg()])?;
        Ok(DiagnosticSet::from_wire(handle))
    }

    /// `clang_disposeDiagnostic`.
    pub fn dispose_diagnostic(&mut self, diagnostic: Diagnostic) -> Result<(), HostError> {
        self.call_unit("clang_disposeDiagnostic", &[diagnostic.arg()])
    }

    /// Formats a diagnostic the way the wrapped compiler driver would
    /// (`clang_formatDiagnostic`).
    pub fn format_diagnostic(
        &mut self,
        diagnostic: &Diagnostic,
        options: DiagnosticDisplayOptions,
    ) -> Result<String, HostError> {
        self.call_str(
            "clang_formatDiagnostic",
            &[diagnostic.arg(), Val::I32(options.bits() as i32)],
        )
    }

    /// `clang_defaultDiagnosticDisplayOptions`.
    pub fn default_diagnostic_display_options(
        &mut self,
    ) -> Result<DiagnosticDisplayOptions, HostError> {
        let bits = self.call_u32("clang_defaultDiagnosticDisplayOptions", &[])?;
        Ok(DiagnosticDisplayOptions::from_bits_retain(bits))
    }

    /// `clang_getDiagnosticSeverity`.
    pub fn diagnostic_severity(
        &mut self,
        diagnostic: &Diagnostic,
    ) -> Result<DiagnosticSeverity, HostError> {
        let raw = self.call_u32("clang_getDiagnosticSeverity", &[diagnostic.arg()])?;
        DiagnosticSeverity::from_raw(raw).ok_or(HostError::InvalidEnumValue {
            what: "diagnostic severity",
            value: raw as i64,
        })
    }

    /// `clang_getDiagnosticLocation`.
    pub fn diagnostic_location(
        &mut self,
        diagnostic: &Diagnostic,
    ) -> Result<SourceLocation, HostError> {
        let handle = self.call_u32("clang_getDiagnosticLocation", &[diagnostic.arg()])?;
        Ok(SourceLocation::from_wire(handle))
    }

    /// `clang_getDiagnosticSpelling`.
    pub fn diagnostic_spelling(&mut self, diagnostic: &Diagnostic) -> Result<String, HostError> {
        self.call_str("clang_getDiagnosticSpelling", &[diagnostic.arg()])
    }

    /// The command-line option that enabled this diagnostic and the
    /// one that would disable it (`clang_getDiagnosticOption`).
    pub fn diagnostic_option(
        &mut self,
        diagnostic: &Diagnostic,
    ) -> Result<(String, String), HostError> {
        let out = self.alloc(4)?;
        self.write_bytes(out, &[0; 4])?;
        let enable = self.call_str(
            "clang_getDiagnosticOption",
            &[diagnostic.arg(), Val::I32(out as i32)],
        );
        let enable = match enable {
            Ok(text) => text,
            Err(err) => {
                self.free(out, 4)?;
                return Err(err);
            }
        };
        let disable_ptr = self.read_u32(out)?;
        let disable = if disable_ptr == 0 {
            String::new()
        } else {
            let text = self.read_cstring(disable_ptr)?;
            self.call_unit(SHIM_STR_FREE, &[Val::I32(disable_ptr as i32)])?;
            text
        };
        self.free(out, 4)?;
        Ok((enable, disable))
    }

    /// `clang_getDiagnosticCategory`.
    pub fn diagnostic_category(&mut self, diagnostic: &Diagnostic) -> Result<u32, HostError> {
        self.call_u32("clang_getDiagnosticCategory", &[diagnostic.arg()])
    }

    /// `clang_getDiagnosticCategoryText`.
    pub fn diagnostic_category_text(
        &mut self,
        diagnostic: &Diagnostic,
    ) -> Result<String, HostError> {
        self.call_str("clang_getDiagnosticCategoryText", &[diagnostic.arg()])
    }

    /// `clang_getDiagnosticNumRanges`.
    pub fn diagnostic_num_ranges(&mut self, diagnostic: &Diagnostic) -> Result<u32, HostError> {
        self.call_u32("clang_getDiagnosticNumRanges", &[diagnostic.arg()])
    }

    /// `clang_getDiagnosticRange`.
    pub fn diagnostic_range(
        &mut self,
        diagnostic: &Diagnostic,
        index: u32,
    ) -> Result<SourceRange, HostError> {
        let handle = self.call_u32(
            "clang_getDiagnosticRange",
            &[diagnostic.arg(), Val::I32(index as i32)],
        )?;
        Ok(SourceRange::from_wire(handle))
    }

    /// `clang_getDiagnosticNumFixIts`.
    pub fn diagnostic_num_fix_its(&mut self, diagnostic: &Diagnostic) -> Result<u32, HostError> {
        self.call_u32("clang_getDiagnosticNumFixIts", &[diagnostic.arg()])
    }

    /// One fix-it hint: the replacement text and the range it replaces
    /// (`clang_getDiagnosticFixIt`).
    pub fn diagnostic_fix_it(
        &mut self,
        diagnostic: &Diagnostic,
        index: u32,
    ) -> Result<FixIt, HostError> {
        let out = self.alloc(4)?;
        self.write_bytes(out, &[0; 4])?;
        let replacement = self.call_str(
            "clang_getDiagnosticFixIt",
            &[diagnostic.arg(), Val::I32(index as i32), Val::I32(out as i32)],
        );
        let replacement = match replacement {
            Ok(text) => text,
            Err(err) => {
                self.free(out, 4)?;
                return Err(err);
            }
        };
        let range = SourceRange::from_wire(self.read_u32(out)?);
        self.free(out, 4)?;
        Ok(FixIt { replacement, range })
    }
}
