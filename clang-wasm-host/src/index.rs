//! Index lifetime and options.

use wasmi::Val;

use clang_wasm_api::{GlobalOptFlags, IndexHandle};

use crate::error::HostError;
use crate::runtime::{LibClang, TempAllocs};

/// An "index" that consists of a set of translation units that would
/// typically be linked together into an executable or library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Index {
    handle: IndexHandle,
}

impl Index {
    pub fn handle(&self) -> IndexHandle {
        self.handle
    }

    pub(crate) fn arg(&self) -> Val {
        Val::I32(self.handle.as_raw() as i32)
    }
}

impl LibClang {
    /// Creates an index (`clang_createIndex`).
    ///
    /// `exclude_declarations_from_pch` excludes declarations that come
    /// from precompiled headers when indexing; `display_diagnostics`
    /// makes the wrapped library print diagnostics as they occur.
    pub fn create_index(
        &mut self,
        exclude_declarations_from_pch: bool,
        display_diagnostics: bool,
    ) -> Result<Index, HostError> {
        let handle = self.call_u32(
            "clang_createIndex",
            &[
                Val::I32(exclude_declarations_from_pch as i32),
                Val::I32(display_diagnostics as i32),
            ],
        )?;
        if handle == 0 {
            return Err(HostError::NullHandle { what: "index" });
        }
        Ok(Index {
            handle: IndexHandle::from_raw(handle),
        })
    }

    /// Destroys the index (`clang_disposeIndex`). The caller is
    /// responsible for destroying its translation units first.
    pub fn dispose_index(&mut self, index: Index) -> Result<(), HostError> {
        self.call_unit("clang_disposeIndex", &[index.arg()])
    }

    /// `clang_CXIndex_setGlobalOptions`.
    pub fn set_global_options(
        &mut self,
        index: &Index,
        options: GlobalOptFlags,
    ) -> Result<(), HostError> {
        self.call_unit(
            "clang_CXIndex_setGlobalOptions",
            &[index.arg(), Val::I32(options.bits() as i32)],
        )
    }

    /// `clang_CXIndex_getGlobalOptions`.
    pub fn global_options(&mut self, index: &Index) -> Result<GlobalOptFlags, HostError> {
        let bits = self.call_u32("clang_CXIndex_getGlobalOptions", &[index.arg()])?;
        Ok(GlobalOptFlags::from_bits_retain(bits))
    }

    /// Sets the invocation emission path
    /// (`clang_CXIndex_setInvocationEmissionPathOption`): the guest
    /// directory where the wrapped library logs libclang invocations.
    pub fn set_invocation_emission_path(
        &mut self,
        index: &Index,
        path: &str,
    ) -> Result<(), HostError> {
        let mut allocs = TempAllocs::new();
        let (ptr, len) = self.write_string(path, &mut allocs)?;
        let result = self.call_unit(
            "clang_CXIndex_setInvocationEmissionPathOption",
            &[index.arg(), Val::I32(ptr as i32), Val::I32(len as i32)],
        );
        self.release(allocs)?;
        result
    }
}
