//! Miscellaneous utility passthroughs.

use wasmi::Val;

use crate::error::HostError;
use crate::runtime::LibClang;

impl LibClang {
    /// The version string of the wrapped library
    /// (`clang_getClangVersion`).
    pub fn clang_version(&mut self) -> Result<String, HostError> {
        self.call_str("clang_getClangVersion", &[])
    }

    /// `clang_toggleCrashRecovery`.
    pub fn toggle_crash_recovery(&mut self, enabled: bool) -> Result<(), HostError> {
        self.call_unit("clang_toggleCrashRecovery", &[Val::I32(enabled as i32)])
    }

    /// `clang_enableStackTraces`.
    pub fn enable_stack_traces(&mut self) -> Result<(), HostError> {
        self.call_unit("clang_enableStackTraces", &[])
    }
}
