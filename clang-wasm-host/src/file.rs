//! Files tracked by a translation unit.

use wasmi::Val;

use clang_wasm_api::FileHandle;

use crate::cursor::Cursor;
use crate::error::HostError;
use crate::runtime::{LibClang, TempAllocs};
use crate::translation_unit::TranslationUnit;

/// A particular source file that is part of a translation unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct File {
    handle: FileHandle,
}

impl File {
    pub(crate) fn from_wire(handle: u32) -> Self {
        Self {
            handle: FileHandle::from_raw(handle),
        }
    }

    pub fn handle(&self) -> FileHandle {
        self.handle
    }

    pub fn is_null(&self) -> bool {
        self.handle.is_null()
    }

    pub(crate) fn arg(&self) -> Val {
        Val::I32(self.handle.as_raw() as i32)
    }
}

impl LibClang {
    /// Looks up a file within a translation unit (`clang_getFile`).
    /// Returns `None` when the file is not part of the unit.
    pub fn file(
        &mut self,
        tu: &TranslationUnit,
        filename: &str,
    ) -> Result<Option<File>, HostError> {
        let mut allocs = TempAllocs::new();
        let (ptr, len) = self.write_string(filename, &mut allocs)?;
        let handle = self.call_u32(
            "clang_getFile",
            &[tu.arg(), Val::I32(ptr as i32), Val::I32(len as i32)],
        )?;
        self.release(allocs)?;
        Ok((handle != 0).then(|| File::from_wire(handle)))
    }

    /// `clang_getFileName`.
    pub fn file_name(&mut self, file: &File) -> Result<String, HostError> {
        self.call_str("clang_getFileName", &[file.arg()])
    }

    /// Last modification time (`clang_getFileTime`), in seconds since
    /// the epoch.
    pub fn file_time(&mut self, file: &File) -> Result<i64, HostError> {
        self.call_i64("clang_getFileTime", &[file.arg()])
    }

    /// The buffered contents of a file (`clang_getFileContents`).
    pub fn file_contents(
        &mut self,
        tu: &TranslationUnit,
        file: &File,
    ) -> Result<Option<Vec<u8>>, HostError> {
        let size_out = self.alloc(4)?;
        self.write_bytes(size_out, &[0; 4])?;
        let called = self.call_u32(
            "clang_getFileContents",
            &[tu.arg(), file.arg(), Val::I32(size_out as i32)],
        );
        let ptr = match called {
            Ok(ptr) => ptr,
            Err(err) => {
                self.free(size_out, 4)?;
                return Err(err);
            }
        };
        let size = self.read_u32(size_out)?;
        self.free(size_out, 4)?;
        if ptr == 0 {
            return Ok(None);
        }
        // The buffer belongs to the translation unit; copy, don't free.
        Ok(Some(self.read_bytes(ptr, size)?))
    }

    /// `clang_isFileMultipleIncludeGuarded`.
    pub fn is_file_multiple_include_guarded(
        &mut self,
        tu: &TranslationUnit,
        file: &File,
    ) -> Result<bool, HostError> {
        self.call_bool("clang_isFileMultipleIncludeGuarded", &[tu.arg(), file.arg()])
    }

    /// `clang_File_isEqual`.
    pub fn file_is_equal(&mut self, a: &File, b: &File) -> Result<bool, HostError> {
        self.call_bool("clang_File_isEqual", &[a.arg(), b.arg()])
    }

    /// The real path of a file, resolving symlinks
    /// (`clang_File_tryGetRealPathName`). Empty when unavailable.
    pub fn file_real_path_name(&mut self, file: &File) -> Result<String, HostError> {
        self.call_str("clang_File_tryGetRealPathName", &[file.arg()])
    }

    /// The file an inclusion-directive cursor includes
    /// (`clang_getIncludedFile`).
    pub fn included_file(&mut self, cursor: &Cursor) -> Result<Option<File>, HostError> {
        let handle = self.call_u32("clang_getIncludedFile", &[cursor.arg()])?;
        Ok((handle != 0).then(|| File::from_wire(handle)))
    }
}
