//! Translation unit manipulation.

use wasmi::Val;

use clang_wasm_api::{
    ReparseFlags, SaveError, SaveTranslationUnitFlags, TranslationUnitFlags,
    TranslationUnitHandle, TuResourceUsageKind, UnsavedFile,
};

use crate::error::HostError;
use crate::index::Index;
use crate::runtime::{LibClang, TempAllocs};

/// A single translation unit, which resides in an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranslationUnit {
    handle: TranslationUnitHandle,
}

impl TranslationUnit {
    pub(crate) fn from_wire(handle: u32) -> Self {
        Self {
            handle: TranslationUnitHandle::from_raw(handle),
        }
    }

    pub fn handle(&self) -> TranslationUnitHandle {
        self.handle
    }

    pub(crate) fn arg(&self) -> Val {
        Val::I32(self.handle.as_raw() as i32)
    }
}

impl LibClang {
    /// Parses a source file into a translation unit
    /// (`clang_parseTranslationUnit`).
    ///
    /// `source` is the guest path of the main file (it may also be
    /// empty when the path is given via `args`, as with the upstream
    /// API). Unsaved files shadow their on-filesystem counterparts for
    /// this parse only. A null result from the wrapped library maps to
    /// [`HostError::ParseFailed`].
    pub fn parse_translation_unit(
        &mut self,
        index: &Index,
        source: &str,
        args: &[String],
        unsaved: &[UnsavedFile],
        flags: TranslationUnitFlags,
    ) -> Result<TranslationUnit, HostError> {
        let mut allocs = TempAllocs::new();
        let (src_ptr, src_len) = self.write_string(source, &mut allocs)?;
        let (args_ptr, args_count) = self.write_string_array(args, &mut allocs)?;
        let (unsaved_ptr, unsaved_count) = self.write_unsaved_files(unsaved, &mut allocs)?;
        let handle = self.call_u32(
            "clang_parseTranslationUnit",
            &[
                index.arg(),
                Val::I32(src_ptr as i32),
                Val::I32(src_len as i32),
                Val::I32(args_ptr as i32),
                Val::I32(args_count as i32),
                Val::I32(unsaved_ptr as i32),
                Val::I32(unsaved_count as i32),
                Val::I32(flags.bits() as i32),
            ],
        )?;
        self.release(allocs)?;
        if handle == 0 {
            return Err(HostError::ParseFailed);
        }
        Ok(TranslationUnit::from_wire(handle))
    }

    /// The original entry point, retained for command-line driven
    /// clients (`clang_createTranslationUnitFromSourceFile`).
    pub fn translation_unit_from_source_file(
        &mut self,
        index: &Index,
        source: &str,
        args: &[String],
        unsaved: &[UnsavedFile],
    ) -> Result<TranslationUnit, HostError> {
        let mut allocs = TempAllocs::new();
        let (src_ptr, src_len) = self.write_string(source, &mut allocs)?;
        let (args_ptr, args_count) = self.write_string_array(args, &mut allocs)?;
        let (unsaved_ptr, unsaved_count) = self.write_unsaved_files(unsaved, &mut allocs)?;
        let handle = self.call_u32(
            "clang_createTranslationUnitFromSourceFile",
            &[
                index.arg(),
                Val::I32(src_ptr as i32),
                Val::I32(src_len as i32),
                Val::I32(args_ptr as i32),
                Val::I32(args_count as i32),
                Val::I32(unsaved_ptr as i32),
                Val::I32(unsaved_count as i32),
            ],
        )?;
        self.release(allocs)?;
        if handle == 0 {
            return Err(HostError::ParseFailed);
        }
        Ok(TranslationUnit::from_wire(handle))
    }

    /// Loads a previously serialized translation unit
    /// (`clang_createTranslationUnit`).
    pub fn create_translation_unit(
        &mut self,
        index: &Index,
        ast_filename: &str,
    ) -> Result<TranslationUnit, HostError> {
        let mut allocs = TempAllocs::new();
        let (ptr, len) = self.write_string(ast_filename, &mut allocs)?;
        let handle = self.call_u32(
            "clang_createTranslationUnit",
            &[index.arg(), Val::I32(ptr as i32), Val::I32(len as i32)],
        )?;
        self.release(allocs)?;
        if handle == 0 {
            return Err(HostError::ParseFailed);
        }
        Ok(TranslationUnit::from_wire(handle))
    }

    /// `clang_getTranslationUnitSpelling`: the original source file
    /// name.
    pub fn translation_unit_spelling(
        &mut self,
        tu: &TranslationUnit,
    ) -> Result<String, HostError> {
        self.call_str("clang_getTranslationUnitSpelling", &[tu.arg()])
    }

    /// `clang_defaultEditingTranslationUnitOptions`.
    pub fn default_editing_options(&mut self) -> Result<TranslationUnitFlags, HostError> {
        let bits = self.call_u32("clang_defaultEditingTranslationUnitOptions", &[])?;
        Ok(TranslationUnitFlags::from_bits_retain(bits))
    }

    /// `clang_defaultSaveOptions`.
    pub fn default_save_options(
        &mut self,
        tu: &TranslationUnit,
    ) -> Result<SaveTranslationUnitFlags, HostError> {
        let bits = self.call_u32("clang_defaultSaveOptions", &[tu.arg()])?;
        Ok(SaveTranslationUnitFlags::from_bits_retain(bits))
    }

    /// Serializes a translation unit to a guest file
    /// (`clang_saveTranslationUnit`). A non-`None` save error maps to
    /// [`HostError::SaveFailed`].
    pub fn save_translation_unit(
        &mut self,
        tu: &TranslationUnit,
        filename: &str,
        options: SaveTranslationUnitFlags,
    ) -> Result<(), HostError> {
        let mut allocs = TempAllocs::new();
        let (ptr, len) = self.write_string(filename, &mut allocs)?;
        let code = self.call_u32(
            "clang_saveTranslationUnit",
            &[
                tu.arg(),
                Val::I32(ptr as i32),
                Val::I32(len as i32),
                Val::I32(options.bits() as i32),
            ],
        )?;
        self.release(allocs)?;
        let error = SaveError::from_raw(code).ok_or(HostError::InvalidEnumValue {
            what: "save error",
            value: code as i64,
        })?;
        match error {
            SaveError::None => Ok(()),
            other => Err(HostError::SaveFailed(other)),
        }
    }

    /// Suspends the translation unit, freeing its parser state while
    /// keeping it reparseable (`clang_suspendTranslationUnit`).
    pub fn suspend_translation_unit(&mut self, tu: &TranslationUnit) -> Result<bool, HostError> {
        self.call_bool("clang_suspendTranslationUnit", &[tu.arg()])
    }

    /// Destroys the translation unit (`clang_disposeTranslationUnit`).
    pub fn dispose_translation_unit(&mut self, tu: TranslationUnit) -> Result<(), HostError> {
        self.call_unit("clang_disposeTranslationUnit", &[tu.arg()])
    }

    /// `clang_defaultReparseOptions`.
    pub fn default_reparse_options(
        &mut self,
        tu: &TranslationUnit,
    ) -> Result<ReparseFlags, HostError> {
        let bits = self.call_u32("clang_defaultReparseOptions", &[tu.arg()])?;
        Ok(ReparseFlags::from_bits_retain(bits))
    }

    /// Reparses the translation unit in place
    /// (`clang_reparseTranslationUnit`). On failure the unit must be
    /// disposed; the non-zero code is carried in
    /// [`HostError::ReparseFailed`].
    pub fn reparse_translation_unit(
        &mut self,
        tu: &TranslationUnit,
        unsaved: &[UnsavedFile],
        options: ReparseFlags,
    ) -> Result<(), HostError> {
        let mut allocs = TempAllocs::new();
        let (unsaved_ptr, unsaved_count) = self.write_unsaved_files(unsaved, &mut allocs)?;
        let code = self.call_i32(
            "clang_reparseTranslationUnit",
            &[
                tu.arg(),
                Val::I32(unsaved_ptr as i32),
                Val::I32(unsaved_count as i32),
                Val::I32(options.bits() as i32),
            ],
        )?;
        self.release(allocs)?;
        if code != 0 {
            return Err(HostError::ReparseFailed(code));
        }
        Ok(())
    }

    /// `clang_getTUResourceUsageName`.
    pub fn resource_usage_name(
        &mut self,
        kind: TuResourceUsageKind,
    ) -> Result<String, HostError> {
        self.call_str(
            "clang_getTUResourceUsageName",
            &[Val::I32(kind.as_raw() as i32)],
        )
    }
}
