//! Modules referenced from module import declarations.

use wasmi::Val;

use clang_wasm_api::ModuleHandle;

use crate::cursor::Cursor;
use crate::error::HostError;
use crate::file::File;
use crate::runtime::LibClang;
use crate::translation_unit::TranslationUnit;

/// A module referenced by a module import declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleDesc {
    handle: ModuleHandle,
}

impl ModuleDesc {
    fn from_wire(handle: u32) -> Self {
        Self {
            handle: ModuleHandle::from_raw(handle),
        }
    }

    pub fn handle(&self) -> ModuleHandle {
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
    /// The module a module-import cursor refers to
    /// (`clang_Cursor_getModule`).
    pub fn cursor_module(&mut self, cursor: &Cursor) -> Result<ModuleDesc, HostError> {
        let handle = self.call_u32("clang_Cursor_getModule", &[cursor.arg()])?;
        Ok(ModuleDesc::from_wire(handle))
    }

    /// The module a file belongs to (`clang_getModuleForFile`), `None`
    /// when the file is not part of any module.
    pub fn module_for_file(
        &mut self,
        tu: &TranslationUnit,
        file: &File,
    ) -> Result<Option<ModuleDesc>, HostError> {
        let handle = self.call_u32("clang_getModuleForFile", &[tu.arg(), file.arg()])?;
        Ok((handle != 0).then(|| ModuleDesc::from_wire(handle)))
    }

    /// `clang_Module_getASTFile`.
    pub fn module_ast_file(&mut self, module: &ModuleDesc) -> Result<Option<File>, HostError> {
        let handle = self.call_u32("clang_Module_getASTFile", &[module.arg()])?;
        Ok((handle != 0).then(|| File::from_wire(handle)))
    }

    /// Parent of a submodule (`clang_Module_getParent`), `None` for
    /// top-level modules.
    pub fn module_parent(&mut self, module: &ModuleDesc) -> Result<Option<ModuleDesc>, HostError> {
        let handle = self.call_u32("clang_Module_getParent", &[module.arg()])?;
        Ok((handle != 0).then(|| ModuleDesc::from_wire(handle)))
    }

    /// Name of the module, e.g. `Private` for `std.vector.Private`
    /// (`clang_Module_getName`).
    pub fn module_name(&mut self, module: &ModuleDesc) -> Result<String, HostError> {
        self.call_str("clang_Module_getName", &[module.arg()])
    }

    /// Full name of the module, e.g. `std.vector.Private`
    /// (`clang_Module_getFullName`).
    pub fn module_full_name(&mut self, module: &ModuleDesc) -> Result<String, HostError> {
        self.call_str("clang_Module_getFullName", &[module.arg()])
    }

    /// `clang_Module_isSystem`.
    pub fn module_is_system(&mut self, module: &ModuleDesc) -> Result<bool, HostError> {
        self.call_bool("clang_Module_isSystem", &[module.arg()])
    }

    /// `clang_Module_getNumTopLevelHeaders`.
    pub fn module_num_top_level_headers(
        &mut self,
        tu: &TranslationUnit,
        module: &ModuleDesc,
    ) -> Result<u32, HostError> {
        self.call_u32(
            "clang_Module_getNumTopLevelHeaders",
            &[tu.arg(), module.arg()],
        )
    }

    /// `clang_Module_getTopLevelHeader`.
    pub fn module_top_level_header(
        &mut self,
        tu: &TranslationUnit,
        module: &ModuleDesc,
        index: u32,
    ) -> Result<Option<File>, HostError> {
        let handle = self.call_u32(
            "clang_Module_getTopLevelHeader",
            &[tu.arg(), module.arg(), Val::I32(index as i32)],
        )?;
        Ok((handle != 0).then(|| File::from_wire(handle)))
    }
}
