//! Pretty printing of cursors.

use wasmi::Val;

use clang_wasm_api::{PrintingPolicyHandle, PrintingPolicyProperty};

use crate::cursor::Cursor;
use crate::error::HostError;
use crate::runtime::LibClang;

/// A policy that controls pretty printing for
/// [`LibClang::cursor_pretty_printed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrintingPolicy {
    handle: PrintingPolicyHandle,
}

impl PrintingPolicy {
    fn from_wire(handle: u32) -> Self {
        Self {
            handle: PrintingPolicyHandle::from_raw(handle),
        }
    }

    pub fn handle(&self) -> PrintingPolicyHandle {
        self.handle
    }

    pub(crate) fn arg(&self) -> Val {
        Val::I32(self.handle.as_raw() as i32)
    }
}

impl LibClang {
    /// The default policy for a cursor's language options
    /// (`clang_getCursorPrintingPolicy`).
    pub fn cursor_printing_policy(&mut self, cursor: &Cursor) -> Result<PrintingPolicy, HostError> {
        let handle = self.call_u32("clang_getCursorPrintingPolicy", &[cursor.arg()])?;
        if handle == 0 {
            return Err(HostError::NullHandle {
                what: "printing policy",
            });
        }
        Ok(PrintingPolicy::from_wire(handle))
    }

    /// `clang_PrintingPolicy_dispose`.
    pub fn dispose_printing_policy(&mut self, policy: PrintingPolicy) -> Result<(), HostError> {
        self.call_unit("clang_PrintingPolicy_dispose", &[policy.arg()])
    }

    /// `clang_PrintingPolicy_getProperty`.
    pub fn printing_policy_property(
        &mut self,
        policy: &PrintingPolicy,
        property: PrintingPolicyProperty,
    ) -> Result<u32, HostError> {
        self.call_u32(
            "clang_PrintingPolicy_getProperty",
            &[policy.arg(), Val::I32(property.as_raw() as i32)],
        )
    }

    /// `clang_PrintingPolicy_setProperty`.
    pub fn set_printing_policy_property(
        &mut self,
        policy: &PrintingPolicy,
        property: PrintingPolicyProperty,
        value: u32,
    ) -> Result<(), HostError> {
        self.call_unit(
            "clang_PrintingPolicy_setProperty",
            &[
                policy.arg(),
                Val::I32(property.as_raw() as i32),
                Val::I32(value as i32),
            ],
        )
    }

    /// Pretty-prints the declaration at a cursor under a policy
    /// (`clang_getCursorPrettyPrinted`).
    pub fn cursor_pretty_printed(
        &mut self,
        cursor: &Cursor,
        policy: &PrintingPolicy,
    ) -> Result<String, HostError> {
        self.call_str(
            "clang_getCursorPrettyPrinted",
            &[cursor.arg(), policy.arg()],
        )
    }
}
