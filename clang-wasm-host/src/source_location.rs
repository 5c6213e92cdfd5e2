//! Physical source locations and ranges.

use wasmi::Val;

use clang_wasm_api::functions::SHIM_STR_FREE;
use clang_wasm_api::{LocationHandle, RangeHandle};

use crate::error::HostError;
use crate::file::File;
use crate::runtime::LibClang;
use crate::translation_unit::TranslationUnit;

/// Identifies a specific source location within a translation unit.
///
/// Use [`LibClang::expansion_location`] or
/// [`LibClang::spelling_location`] to map a source location to a
/// particular file, line, and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    handle: LocationHandle,
}

impl SourceLocation {
    pub(crate) fn from_wire(handle: u32) -> Self {
        Self {
            handle: LocationHandle::from_raw(handle),
        }
    }

    pub fn handle(&self) -> LocationHandle {
        self.handle
    }

    pub(crate) fn arg(&self) -> Val {
        Val::I32(self.handle.as_raw() as i32)
    }
}

/// Identifies a half-open character range in the source code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceRange {
    handle: RangeHandle,
}

impl SourceRange {
    pub(crate) fn from_wire(handle: u32) -> Self {
        Self {
            handle: RangeHandle::from_raw(handle),
        }
    }

    pub fn handle(&self) -> RangeHandle {
        self.handle
    }

    pub(crate) fn arg(&self) -> Val {
        Val::I32(self.handle.as_raw() as i32)
    }
}

/// A location decomposed into file, line, column and character offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhysicalLocation {
    pub file: File,
    pub line: u32,
    pub column: u32,
    pub offset: u32,
}

/// A location as overridden by `#line` directives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresumedLocation {
    pub filename: String,
    pub line: u32,
    pub column: u32,
}

impl LibClang {
    /// `clang_getNullLocation`.
    pub fn null_location(&mut self) -> Result<SourceLocation, HostError> {
        let handle = self.call_u32("clang_getNullLocation", &[])?;
        Ok(SourceLocation::from_wire(handle))
    }

    /// `clang_equalLocations`.
    pub fn equal_locations(
        &mut self,
        a: &SourceLocation,
        b: &SourceLocation,
    ) -> Result<bool, HostError> {
        self.call_bool("clang_equalLocations", &[a.arg(), b.arg()])
    }

    /// Retrieves the location for a line/column pair in a file
    /// (`clang_getLocation`).
    pub fn location(
        &mut self,
        tu: &TranslationUnit,
        file: &File,
        line: u32,
        column: u32,
    ) -> Result<SourceLocation, HostError> {
        let handle = self.call_u32(
            "clang_getLocation",
            &[
                tu.arg(),
                file.arg(),
                Val::I32(line as i32),
                Val::I32(column as i32),
            ],
        )?;
        Ok(SourceLocation::from_wire(handle))
    }

    /// Retrieves the location for a character offset in a file
    /// (`clang_getLocationForOffset`).
    pub fn location_for_offset(
        &mut self,
        tu: &TranslationUnit,
        file: &File,
        offset: u32,
    ) -> Result<SourceLocation, HostError> {
        let handle = self.call_u32(
            "clang_getLocationForOffset",
            &[tu.arg(), file.arg(), Val::I32(offset as i32)],
        )?;
        Ok(SourceLocation::from_wire(handle))
    }

    /// `clang_Location_isInSystemHeader`.
    pub fn location_is_in_system_header(
        &mut self,
        location: &SourceLocation,
    ) -> Result<bool, HostError> {
        self.call_bool("clang_Location_isInSystemHeader", &[location.arg()])
    }

    /// `clang_Location_isFromMainFile`.
    pub fn location_is_from_main_file(
        &mut self,
        location: &SourceLocation,
    ) -> Result<bool, HostError> {
        self.call_bool("clang_Location_isFromMainFile", &[location.arg()])
    }

    /// `clang_getNullRange`.
    pub fn null_range(&mut self) -> Result<SourceRange, HostError> {
        let handle = self.call_u32("clang_getNullRange", &[])?;
        Ok(SourceRange::from_wire(handle))
    }

    /// Builds a range from its endpoints (`clang_getRange`).
    pub fn range(
        &mut self,
        begin: &SourceLocation,
        end: &SourceLocation,
    ) -> Result<SourceRange, HostError> {
        let handle = self.call_u32("clang_getRange", &[begin.arg(), end.arg()])?;
        Ok(SourceRange::from_wire(handle))
    }

    /// `clang_equalRanges`.
    pub fn equal_ranges(&mut self, a: &SourceRange, b: &SourceRange) -> Result<bool, HostError> {
        self.call_bool("clang_equalRanges", &[a.arg(), b.arg()])
    }

    /// `clang_Range_isNull`.
    pub fn range_is_null(&mut self, range: &SourceRange) -> Result<bool, HostError> {
        self.call_bool("clang_Range_isNull", &[range.arg()])
    }

    /// `clang_getRangeStart`.
    pub fn range_start(&mut self, range: &SourceRange) -> Result<SourceLocation, HostError> {
        let handle = self.call_u32("clang_getRangeStart", &[range.arg()])?;
        Ok(SourceLocation::from_wire(handle))
    }

    /// `clang_getRangeEnd`.
    pub fn range_end(&mut self, range: &SourceRange) -> Result<SourceLocation, HostError> {
        let handle = self.call_u32("clang_getRangeEnd", &[range.arg()])?;
        Ok(SourceLocation::from_wire(handle))
    }

    /// Decomposes a location following macro expansions
    /// (`clang_getExpansionLocation`).
    pub fn expansion_location(
        &mut self,
        location: &SourceLocation,
    ) -> Result<PhysicalLocation, HostError> {
        self.physical_location("clang_getExpansionLocation", location)
    }

    /// Legacy alias of the expansion decomposition
    /// (`clang_getInstantiationLocation`).
    pub fn instantiation_location(
        &mut self,
        location: &SourceLocation,
    ) -> Result<PhysicalLocation, HostError> {
        self.physical_location("clang_getInstantiationLocation", location)
    }

    /// Decomposes a location into the spelling site of the token
    /// (`clang_getSpellingLocation`).
    pub fn spelling_location(
        &mut self,
        location: &SourceLocation,
    ) -> Result<PhysicalLocation, HostError> {
        self.physical_location("clang_getSpellingLocation", location)
    }

    /// Decomposes a location into its file site
    /// (`clang_getFileLocation`).
    pub fn file_location(
        &mut self,
        location: &SourceLocation,
    ) -> Result<PhysicalLocation, HostError> {
        self.physical_location("clang_getFileLocation", location)
    }

    /// Decomposes a location as presumed by `#line` directives
    /// (`clang_getPresumedLocation`).
    pub fn presumed_location(
        &mut self,
        location: &SourceLocation,
    ) -> Result<PresumedLocation, HostError> {
        // Out buffer: filename ptr, line, column.
        let out = self.alloc(12)?;
        self.write_bytes(out, &[0; 12])?;
        let called = self.call_unit(
            "clang_getPresumedLocation",
            &[location.arg(), Val::I32(out as i32)],
        );
        if let Err(err) = called {
            self.free(out, 12)?;
            return Err(err);
        }
        let str_ptr = self.read_u32(out)?;
        let line = self.read_u32(out + 4)?;
        let column = self.read_u32(out + 8)?;
        let filename = if str_ptr == 0 {
            String::new()
        } else {
            let text = self.read_cstring(str_ptr)?;
            self.call_unit(SHIM_STR_FREE, &[Val::I32(str_ptr as i32)])?;
            text
        };
        self.free(out, 12)?;
        Ok(PresumedLocation {
            filename,
            line,
            column,
        })
    }

    /// Skipped preprocessor ranges in a particular file
    /// (`clang_getSkippedRanges`).
    pub fn skipped_ranges(
        &mut self,
        tu: &TranslationUnit,
        file: &File,
    ) -> Result<Vec<SourceRange>, HostError> {
        let handles = self.call_list("clang_getSkippedRanges", &[tu.arg(), file.arg()])?;
        Ok(handles.into_iter().map(SourceRange::from_wire).collect())
    }

    /// Skipped preprocessor ranges across the whole translation unit
    /// (`clang_getAllSkippedRanges`).
    pub fn all_skipped_ranges(
        &mut self,
        tu: &TranslationUnit,
    ) -> Result<Vec<SourceRange>, HostError> {
        let handles = self.call_list("clang_getAllSkippedRanges", &[tu.arg()])?;
        Ok(handles.into_iter().map(SourceRange::from_wire).collect())
    }

    /// Shared decomposition for the expansion/spelling/file variants:
    /// the guest writes `(file, line, column, offset)` words into a
    /// scratch buffer.
    fn physical_location(
        &mut self,
        name: &'static str,
        location: &SourceLocation,
    ) -> Result<PhysicalLocation, HostError> {
        let out = self.alloc(16)?;
        self.write_bytes(out, &[0; 16])?;
        let called = self.call_unit(name, &[location.arg(), Val::I32(out as i32)]);
        if let Err(err) = called {
            self.free(out, 16)?;
            return Err(err);
        }
        let file = File::from_wire(self.read_u32(out)?);
        let line = self.read_u32(out + 4)?;
        let column = self.read_u32(out + 8)?;
        let offset = self.read_u32(out + 12)?;
        self.free(out, 16)?;
        Ok(PhysicalLocation {
            file,
            line,
            column,
            offset,
        })
    }
}
