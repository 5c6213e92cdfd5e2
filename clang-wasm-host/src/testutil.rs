//! Stub artifacts for exercising the runtime without a real build.
//!
//! The real `libclang.wasm` takes an LLVM build to produce, so the
//! tests synthesize minimal guest modules instead: every declared
//! export exists with the declared signature and a body that returns
//! zeros, and individual tests override the bodies they care about.
//! The shim allocator is a simple bump pointer so marshalling paths
//! run for real.

use std::collections::HashMap;

use wasm_encoder::{
    CodeSection, ConstExpr, DataSection, EntityType, ExportKind, ExportSection, Function,
    FunctionSection, GlobalSection, GlobalType, ImportSection, Instruction, MemorySection,
    MemoryType, Module, TypeSection, ValType,
};

use clang_wasm_api::functions::{
    HOST_FS_CLOSE, HOST_FS_EXISTS, HOST_FS_OPEN, HOST_FS_READ, HOST_FS_SIZE, HOST_MODULE,
    HOST_VISIT, SHIM_ALLOC,
};
use clang_wasm_api::{WasmType, FUNCTIONS};

/// Function indices of the host imports inside stub modules.
pub const IMPORT_VISIT: u32 = 0;
pub const IMPORT_FS_OPEN: u32 = 1;
pub const IMPORT_FS_SIZE: u32 = 2;
pub const IMPORT_FS_READ: u32 = 3;
pub const IMPORT_FS_CLOSE: u32 = 4;
pub const IMPORT_FS_EXISTS: u32 = 5;
const IMPORT_COUNT: u32 = 6;

/// Where the bump allocator starts handing out guest memory.
const HEAP_BASE: i32 = 0x1_0000;

fn val_type(ty: WasmType) -> ValType {
    match ty {
        WasmType::I32 => ValType::I32,
        WasmType::I64 => ValType::I64,
        WasmType::F64 => ValType::F64,
    }
}

/// Builder for stub guest modules covering the declared surface.
pub struct StubArtifact {
    bodies: HashMap<&'static str, Function>,
    omitted: Vec<&'static str>,
    bad_signature: Vec<&'static str>,
    data: Vec<(u32, Vec<u8>)>,
}

impl StubArtifact {
    pub fn new() -> Self {
        Self {
            bodies: HashMap::new(),
            omitted: Vec::new(),
            bad_signature: Vec::new(),
            data: Vec::new(),
        }
    }

    /// Replaces the body of one export. The instructions must leave
    /// the declared results on the stack; `End` is appended here.
    pub fn with_body(mut self, name: &'static str, instructions: &[Instruction]) -> Self {
        let mut function = Function::new(Vec::new());
        for instruction in instructions {
            function.instruction(instruction);
        }
        function.instruction(&Instruction::End);
        self.bodies.insert(name, function);
        self
    }

    /// Leaves one export out entirely.
    pub fn without(mut self, name: &'static str) -> Self {
        self.omitted.push(name);
        self
    }

    /// Declares one export with an extra trailing i32 parameter so the
    /// load-time signature check has something to reject.
    pub fn with_bad_signature(mut self, name: &'static str) -> Self {
        self.bad_signature.push(name);
        self
    }

    /// Places bytes into guest memory via an active data segment.
    pub fn with_data(mut self, offset: u32, bytes: &[u8]) -> Self {
        self.data.push((offset, bytes.to_vec()));
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut module = Module::new();
        let mut types = TypeSection::new();
        let mut imports = ImportSection::new();
        let mut functions = FunctionSection::new();
        let mut exports = ExportSection::new();
        let mut code = CodeSection::new();

        // Import types first so their indices are stable.
        let import_sigs: [(&str, Vec<ValType>, Vec<ValType>); 6] = [
            (
                HOST_VISIT,
                vec![ValType::I32, ValType::I32, ValType::I32, ValType::I32],
                vec![ValType::I32],
            ),
            (HOST_FS_OPEN, vec![ValType::I32, ValType::I32], vec![ValType::I32]),
            (HOST_FS_SIZE, vec![ValType::I32], vec![ValType::I64]),
            (
                HOST_FS_READ,
                vec![ValType::I32, ValType::I64, ValType::I32, ValType::I32],
                vec![ValType::I32],
            ),
            (HOST_FS_CLOSE, vec![ValType::I32], vec![ValType::I32]),
            (HOST_FS_EXISTS, vec![ValType::I32, ValType::I32], vec![ValType::I32]),
        ];
        for (i, (name, params, results)) in import_sigs.iter().enumerate() {
            types.ty().function(params.iter().copied(), results.iter().copied());
            imports.import(HOST_MODULE, name, EntityType::Function(i as u32));
        }

        let mut next_index = IMPORT_COUNT;
        let mut bodies = self.bodies;
        for decl in FUNCTIONS {
            if self.omitted.contains(&decl.name) {
                continue;
            }
            let mut params: Vec<ValType> = decl.params.iter().map(|&t| val_type(t)).collect();
            if self.bad_signature.contains(&decl.name) {
                params.push(ValType::I32);
            }
            let results: Vec<ValType> = decl.results.iter().map(|&t| val_type(t)).collect();
            let type_index = types.len();
            types.ty().function(params, results.iter().copied());
            functions.function(type_index);
            exports.export(decl.name, ExportKind::Func, next_index);
            next_index += 1;

            let body = bodies.remove(decl.name).unwrap_or_else(|| {
                if decl.name == SHIM_ALLOC {
                    bump_alloc_body()
                } else {
                    default_body(&results)
                }
            });
            code.function(&body);
        }

        module.section(&types);
        module.section(&imports);
        module.section(&functions);

        let mut memories = MemorySection::new();
        memories.memory(MemoryType {
            minimum: 4,
            maximum: None,
            memory64: false,
            shared: false,
            page_size_log2: None,
        });
        module.section(&memories);

        let mut globals = GlobalSection::new();
        // Global 0: the bump allocator's next-free pointer.
        globals.global(
            GlobalType {
                val_type: ValType::I32,
                mutable: true,
                shared: false,
            },
            &ConstExpr::i32_const(HEAP_BASE),
        );
        module.section(&globals);

        exports.export("memory", ExportKind::Memory, 0);
        module.section(&exports);
        module.section(&code);

        if !self.data.is_empty() {
            let mut data = DataSection::new();
            for (offset, bytes) in &self.data {
                data.active(0, &ConstExpr::i32_const(*offset as i32), bytes.iter().copied());
            }
            module.section(&data);
        }

        module.finish()
    }
}

/// Body returning zero for every declared result.
fn default_body(results: &[ValType]) -> Function {
    let mut function = Function::new(Vec::new());
    for result in results {
        match result {
            ValType::I32 => function.instruction(&Instruction::I32Const(0)),
            ValType::I64 => function.instruction(&Instruction::I64Const(0)),
            ValType::F64 => function.instruction(&Instruction::F64Const(0.0.into())),
            other => panic!("unexpected stub result type {other:?}"),
        };
    }
    function.instruction(&Instruction::End);
    function
}

/// `cw_alloc` as a bump allocator: returns the current heap pointer
/// and advances it by the requested size.
fn bump_alloc_body() -> Function {
    let mut function = Function::new(Vec::new());
    function.instruction(&Instruction::GlobalGet(0));
    function.instruction(&Instruction::GlobalGet(0));
    function.instruction(&Instruction::LocalGet(0));
    function.instruction(&Instruction::I32Add);
    function.instruction(&Instruction::GlobalSet(0));
    function.instruction(&Instruction::End);
    function
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stub_artifacts_are_valid_wasm() {
        let bytes = StubArtifact::new().build();
        wasmparser::validate(&bytes).expect("stub module should validate");
    }

    #[test]
    fn overrides_and_data_segments_still_validate() {
        let bytes = StubArtifact::new()
            .with_data(1024, b"int main() {}\0")
            .with_body("clang_createIndex", &[Instruction::I32Const(1)])
            .without("clang_enableStackTraces")
            .build();
        wasmparser::validate(&bytes).expect("modified stub should validate");
    }
}
