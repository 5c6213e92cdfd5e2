//! Loading and driving the `libclang.wasm` artifact.
//!
//! [`LibClang`] owns the wasmi engine, store and instance. At load
//! time every entry in the declared export surface is resolved and
//! type-checked, so version skew between the artifact and the
//! declarations fails immediately with the offending symbol instead of
//! trapping in the middle of a parse.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::debug;
use wasmi::core::ValType;
use wasmi::{Caller, Engine, Extern, Func, Linker, Memory, Module, Store, Val};

use clang_wasm_api::functions::{
    HOST_FS_CLOSE, HOST_FS_EXISTS, HOST_FS_OPEN, HOST_FS_READ, HOST_FS_SIZE, HOST_MODULE,
    HOST_VISIT, SHIM_ALLOC, SHIM_FREE, SHIM_STR_FREE,
};
use clang_wasm_api::{ChildVisitResult, CursorKind, FunctionDecl, UnsavedFile, WasmType, FUNCTIONS};

use crate::cursor::Cursor;
use crate::error::HostError;
use crate::vfs::VirtualFs;

type Visitor = Box<dyn FnMut(Cursor, Cursor) -> ChildVisitResult + 'static>;

/// Store data shared with the host imports.
///
/// The visitor stack backs the child-visitor trampoline: the guest's
/// `cw_visit` import always dispatches to the top entry, which is the
/// closure passed to the innermost active `visit_children` call.
#[derive(Default)]
pub struct HostState {
    pub(crate) vfs: VirtualFs,
    pub(crate) visitors: Vec<Visitor>,
    pub(crate) visit_error: Option<HostError>,
}

/// The loaded artifact.
pub struct LibClang {
    store: Store<HostState>,
    memory: Memory,
    funcs: HashMap<&'static str, Func>,
}

impl std::fmt::Debug for LibClang {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LibClang")
            .field("funcs", &self.funcs.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl LibClang {
    /// Loads and validates an artifact from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, HostError> {
        let bytes = fs::read(path.as_ref())?;
        Self::from_bytes(&bytes)
    }

    /// Loads and validates an artifact from raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, HostError> {
        let engine = Engine::default();
        let module = Module::new(&engine, bytes)?;
        let mut linker = Linker::<HostState>::new(&engine);
        add_host_imports(&mut linker)?;
        let mut store = Store::new(&engine, HostState::default());
        let instance = linker.instantiate(&mut store, &module)?.start(&mut store)?;
        let memory = instance
            .get_memory(&store, "memory")
            .ok_or(HostError::MissingMemory)?;

        let mut funcs = HashMap::with_capacity(FUNCTIONS.len());
        for decl in FUNCTIONS {
            let func = instance
                .get_func(&store, decl.name)
                .ok_or(HostError::MissingExport { name: decl.name })?;
            check_signature(&store, decl, &func)?;
            funcs.insert(decl.name, func);
        }
        debug!("resolved {} artifact exports", funcs.len());

        Ok(Self {
            store,
            memory,
            funcs,
        })
    }

    /// The guest-visible filesystem.
    pub fn fs(&self) -> &VirtualFs {
        self.store.data().vfs_ref()
    }

    /// The guest-visible filesystem, mutably (mount, write, mkdir).
    pub fn fs_mut(&mut self) -> &mut VirtualFs {
        self.store.data_mut().vfs_mut()
    }

    // -----------------------------------------------------------------
    // Raw calls
    // -----------------------------------------------------------------

    pub(crate) fn call_raw(
        &mut self,
        name: &'static str,
        args: &[Val],
    ) -> Result<Vec<Val>, HostError> {
        let func = *self
            .funcs
            .get(name)
            .ok_or(HostError::MissingExport { name })?;
        let ty = func.ty(&self.store);
        let mut results: Vec<Val> = ty.results().iter().map(default_val).collect();
        func.call(&mut self.store, args, &mut results)?;
        if let Some(err) = self.store.data_mut().visit_error.take() {
            return Err(err);
        }
        Ok(results)
    }

    pub(crate) fn call_unit(&mut self, name: &'static str, args: &[Val]) -> Result<(), HostError> {
        self.call_raw(name, args).map(|_| ())
    }

    pub(crate) fn call_i32(&mut self, name: &'static str, args: &[Val]) -> Result<i32, HostError> {
        match self.call_raw(name, args)?.first() {
            Some(Val::I32(v)) => Ok(*v),
            _ => Err(HostError::ExportSignature {
                name,
                expected: "(..) -> i32".to_string(),
                found: "no i32 result".to_string(),
            }),
        }
    }

    pub(crate) fn call_u32(&mut self, name: &'static str, args: &[Val]) -> Result<u32, HostError> {
        self.call_i32(name, args).map(|v| v as u32)
    }

    pub(crate) fn call_bool(&mut self, name: &'static str, args: &[Val]) -> Result<bool, HostError> {
        self.call_i32(name, args).map(|v| v != 0)
    }

    pub(crate) fn call_i64(&mut self, name: &'static str, args: &[Val]) -> Result<i64, HostError> {
        match self.call_raw(name, args)?.first() {
            Some(Val::I64(v)) => Ok(*v),
            _ => Err(HostError::ExportSignature {
                name,
                expected: "(..) -> i64".to_string(),
                found: "no i64 result".to_string(),
            }),
        }
    }

    /// Calls an export returning a NUL-terminated guest string, copies
    /// it out and releases the guest buffer.
    pub(crate) fn call_str(&mut self, name: &'static str, args: &[Val]) -> Result<String, HostError> {
        let ptr = self.call_u32(name, args)?;
        if ptr == 0 {
            return Ok(String::new());
        }
        let text = self.read_cstring(ptr);
        self.call_unit(SHIM_STR_FREE, &[Val::I32(ptr as i32)])?;
        text
    }

    /// Calls an export returning a `[count][elem * count]` list buffer,
    /// copies the elements out and releases the buffer.
    pub(crate) fn call_list(&mut self, name: &'static str, args: &[Val]) -> Result<Vec<u32>, HostError> {
        let ptr = self.call_u32(name, args)?;
        if ptr == 0 {
            return Ok(Vec::new());
        }
        let count = self.read_u32(ptr)?;
        let mut items = Vec::with_capacity(count as usize);
        for i in 0..count {
            items.push(self.read_u32(ptr + 4 + 4 * i)?);
        }
        self.free(ptr, 4 + 4 * count)?;
        Ok(items)
    }

    // -----------------------------------------------------------------
    // Guest memory access
    // -----------------------------------------------------------------

    pub(crate) fn read_bytes(&self, ptr: u32, len: u32) -> Result<Vec<u8>, HostError> {
        let data = self.memory.data(&self.store);
        let start = ptr as usize;
        let end = start
            .checked_add(len as usize)
            .filter(|&end| end <= data.len())
            .ok_or(HostError::MemoryAccess { offset: ptr, len })?;
        Ok(data[start..end].to_vec())
    }

    pub(crate) fn write_bytes(&mut self, ptr: u32, bytes: &[u8]) -> Result<(), HostError> {
        let data = self.memory.data_mut(&mut self.store);
        let start = ptr as usize;
        let end = start
            .checked_add(bytes.len())
            .filter(|&end| end <= data.len())
            .ok_or(HostError::MemoryAccess {
                offset: ptr,
                len: bytes.len() as u32,
            })?;
        data[start..end].copy_from_slice(bytes);
        Ok(())
    }

    pub(crate) fn read_u32(&self, ptr: u32) -> Result<u32, HostError> {
        let bytes = self.read_bytes(ptr, 4)?;
        Ok(u32::from_le_bytes(bytes.try_into().expect("four bytes")))
    }

    pub(crate) fn read_cstring(&self, ptr: u32) -> Result<String, HostError> {
        let data = self.memory.data(&self.store);
        let start = ptr as usize;
        if start >= data.len() {
            return Err(HostError::MemoryAccess { offset: ptr, len: 1 });
        }
        let end = data[start..]
            .iter()
            .position(|&b| b == 0)
            .map(|i| start + i)
            .ok_or(HostError::MemoryAccess { offset: ptr, len: 0 })?;
        Ok(String::from_utf8(data[start..end].to_vec())?)
    }

    // -----------------------------------------------------------------
    // Guest allocation
    // -----------------------------------------------------------------

    pub(crate) fn alloc(&mut self, size: u32) -> Result<u32, HostError> {
        let ptr = self.call_u32(SHIM_ALLOC, &[Val::I32(size as i32)])?;
        if ptr == 0 && size > 0 {
            return Err(HostError::MemoryAccess {
                offset: 0,
                len: size,
            });
        }
        Ok(ptr)
    }

    pub(crate) fn free(&mut self, ptr: u32, size: u32) -> Result<(), HostError> {
        if ptr == 0 {
            return Ok(());
        }
        self.call_unit(SHIM_FREE, &[Val::I32(ptr as i32), Val::I32(size as i32)])
    }

    /// Copies a string into guest memory, returning `(ptr, len)`.
    pub(crate) fn write_string(&mut self, text: &str, allocs: &mut TempAllocs) -> Result<(u32, u32), HostError> {
        let bytes = text.as_bytes();
        if bytes.is_empty() {
            return Ok((0, 0));
        }
        let ptr = self.alloc(bytes.len() as u32)?;
        self.write_bytes(ptr, bytes)?;
        allocs.push(ptr, bytes.len() as u32);
        Ok((ptr, bytes.len() as u32))
    }

    /// Serializes a string array as a `(ptr, len)` pair table,
    /// returning `(table_ptr, count)`.
    pub(crate) fn write_string_array(
        &mut self,
        items: &[String],
        allocs: &mut TempAllocs,
    ) -> Result<(u32, u32), HostError> {
        if items.is_empty() {
            return Ok((0, 0));
        }
        let mut table = Vec::with_capacity(items.len() * 8);
        for item in items {
            let (ptr, len) = self.write_string(item, allocs)?;
            table.extend_from_slice(&ptr.to_le_bytes());
            table.extend_from_slice(&len.to_le_bytes());
        }
        let table_ptr = self.alloc(table.len() as u32)?;
        self.write_bytes(table_ptr, &table)?;
        allocs.push(table_ptr, table.len() as u32);
        Ok((table_ptr, items.len() as u32))
    }

    /// Serializes unsaved files as a four-word-per-entry table,
    /// returning `(table_ptr, count)`.
    pub(crate) fn write_unsaved_files(
        &mut self,
        files: &[UnsavedFile],
        allocs: &mut TempAllocs,
    ) -> Result<(u32, u32), HostError> {
        if files.is_empty() {
            return Ok((0, 0));
        }
        let mut table = Vec::with_capacity(files.len() * 16);
        for file in files {
            let (name_ptr, name_len) = self.write_string(&file.filename, allocs)?;
            let (data_ptr, data_len) = self.write_string(&file.contents, allocs)?;
            for word in [name_ptr, name_len, data_ptr, data_len] {
                table.extend_from_slice(&word.to_le_bytes());
            }
        }
        let table_ptr = self.alloc(table.len() as u32)?;
        self.write_bytes(table_ptr, &table)?;
        allocs.push(table_ptr, table.len() as u32);
        Ok((table_ptr, files.len() as u32))
    }

    /// Releases every temporary guest allocation made for one call.
    pub(crate) fn release(&mut self, allocs: TempAllocs) -> Result<(), HostError> {
        for (ptr, size) in allocs.list {
            self.free(ptr, size)?;
        }
        Ok(())
    }

    // -----------------------------------------------------------------
    // Visitor stack plumbing (used by `visit_children`)
    // -----------------------------------------------------------------

    pub(crate) fn push_visitor(&mut self, visitor: Visitor) {
        self.store.data_mut().visitors.push(visitor);
    }

    pub(crate) fn pop_visitor(&mut self) {
        self.store.data_mut().visitors.pop();
    }
}

impl HostState {
    fn vfs_ref(&self) -> &VirtualFs {
        &self.vfs
    }

    fn vfs_mut(&mut self) -> &mut VirtualFs {
        &mut self.vfs
    }
}

/// Scratch allocations for a single guest call, released afterwards.
#[derive(Default)]
pub(crate) struct TempAllocs {
    list: Vec<(u32, u32)>,
}

impl TempAllocs {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, ptr: u32, size: u32) {
        self.list.push((ptr, size));
    }
}

fn default_val(ty: &ValType) -> Val {
    match ty {
        ValType::I32 => Val::I32(0),
        ValType::I64 => Val::I64(0),
        ValType::F32 => Val::F32(0.0.into()),
        ValType::F64 => Val::F64(0.0.into()),
        other => Val::default(*other),
    }
}

fn wire_type(ty: WasmType) -> ValType {
    match ty {
        WasmType::I32 => ValType::I32,
        WasmType::I64 => ValType::I64,
        WasmType::F64 => ValType::F64,
    }
}

fn sig_string(params: &[ValType], results: &[ValType]) -> String {
    let fmt = |tys: &[ValType]| {
        tys.iter()
            .map(|t| format!("{t:?}").to_lowercase())
            .collect::<Vec<_>>()
            .join(", ")
    };
    format!("({}) -> ({})", fmt(params), fmt(results))
}

fn check_signature(
    store: &Store<HostState>,
    decl: &FunctionDecl,
    func: &Func,
) -> Result<(), HostError> {
    let ty = func.ty(store);
    let expected_params: Vec<ValType> = decl.params.iter().map(|&t| wire_type(t)).collect();
    let expected_results: Vec<ValType> = decl.results.iter().map(|&t| wire_type(t)).collect();
    if ty.params() != expected_params.as_slice() || ty.results() != expected_results.as_slice() {
        return Err(HostError::ExportSignature {
            name: decl.name,
            expected: sig_string(&expected_params, &expected_results),
            found: sig_string(ty.params(), ty.results()),
        });
    }
    Ok(())
}

/// Reads a `(ptr, len)` string out of the caller's exported memory.
fn caller_string(caller: &mut Caller<'_, HostState>, ptr: i32, len: i32) -> Option<String> {
    let memory = match caller.get_export("memory") {
        Some(Extern::Memory(memory)) => memory,
        _ => return None,
    };
    let mut buf = vec![0u8; len as usize];
    memory.read(&*caller, ptr as usize, &mut buf).ok()?;
    String::from_utf8(buf).ok()
}

fn caller_memory(caller: &mut Caller<'_, HostState>) -> Option<Memory> {
    match caller.get_export("memory") {
        Some(Extern::Memory(memory)) => Some(memory),
        _ => None,
    }
}

/// Registers the host imports the artifact links against: the
/// child-visitor trampoline and the filesystem syscalls.
fn add_host_imports(linker: &mut Linker<HostState>) -> Result<(), HostError> {
    linker.func_wrap(
        HOST_MODULE,
        HOST_VISIT,
        |mut caller: Caller<'_, HostState>,
         cursor: i32,
         cursor_kind: i32,
         parent: i32,
         parent_kind: i32|
         -> i32 {
            let decoded = CursorKind::from_raw(cursor_kind as u32)
                .zip(CursorKind::from_raw(parent_kind as u32));
            let Some((kind, parent_kind)) = decoded else {
                caller.data_mut().visit_error = Some(HostError::InvalidEnumValue {
                    what: "cursor kind",
                    value: cursor_kind as i64,
                });
                return ChildVisitResult::Break.as_raw() as i32;
            };
            let cursor = Cursor::from_wire(cursor as u32, kind);
            let parent = Cursor::from_wire(parent as u32, parent_kind);
            let state = caller.data_mut();
            match state.visitors.last_mut() {
                Some(visitor) => visitor(cursor, parent).as_raw() as i32,
                None => {
                    state.visit_error = Some(HostError::VisitorUnderflow);
                    ChildVisitResult::Break.as_raw() as i32
                }
            }
        },
    )?;

    linker.func_wrap(
        HOST_MODULE,
        HOST_FS_OPEN,
        |mut caller: Caller<'_, HostState>, ptr: i32, len: i32| -> i32 {
            let Some(path) = caller_string(&mut caller, ptr, len) else {
                return -1;
            };
            caller.data_mut().vfs.open(&path).unwrap_or(-1)
        },
    )?;

    linker.func_wrap(
        HOST_MODULE,
        HOST_FS_SIZE,
        |caller: Caller<'_, HostState>, fd: i32| -> i64 {
            caller
                .data()
                .vfs
                .size(fd)
                .map(|size| size as i64)
                .unwrap_or(-1)
        },
    )?;

    linker.func_wrap(
        HOST_MODULE,
        HOST_FS_READ,
        |mut caller: Caller<'_, HostState>, fd: i32, offset: i64, buf: i32, len: i32| -> i32 {
            if offset < 0 || len < 0 {
                return -1;
            }
            let chunk = match caller.data().vfs.read_at(fd, offset as u64, len as usize) {
                Ok(chunk) => chunk.to_vec(),
                Err(_) => return -1,
            };
            let Some(memory) = caller_memory(&mut caller) else {
                return -1;
            };
            if memory.write(&mut caller, buf as usize, &chunk).is_err() {
                return -1;
            }
            chunk.len() as i32
        },
    )?;

    linker.func_wrap(
        HOST_MODULE,
        HOST_FS_CLOSE,
        |mut caller: Caller<'_, HostState>, fd: i32| -> i32 {
            match caller.data_mut().vfs.close(fd) {
                Ok(()) => 0,
                Err(_) => -1,
            }
        },
    )?;

    linker.func_wrap(
        HOST_MODULE,
        HOST_FS_EXISTS,
        |mut caller: Caller<'_, HostState>, ptr: i32, len: i32| -> i32 {
            let Some(path) = caller_string(&mut caller, ptr, len) else {
                return 0;
            };
            caller.data().vfs.exists(&path) as i32
        },
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_encoder::{Instruction, MemArg};

    use clang_wasm_api::TranslationUnitFlags;

    use super::*;
    use crate::testutil::{StubArtifact, IMPORT_FS_EXISTS, IMPORT_VISIT};
    use crate::translation_unit::TranslationUnit;

    fn store(offset: u64) -> Instruction<'static> {
        Instruction::I32Store(MemArg {
            offset,
            align: 2,
            memory_index: 0,
        })
    }

    #[test]
    fn loads_a_complete_artifact() {
        let artifact = StubArtifact::new().build();
        LibClang::from_bytes(&artifact).expect("load should succeed");
    }

    #[test]
    fn rejects_artifacts_missing_an_export() {
        let artifact = StubArtifact::new().without("clang_visitChildren").build();
        let err = LibClang::from_bytes(&artifact).unwrap_err();
        match err {
            HostError::MissingExport { name } => assert_eq!(name, "clang_visitChildren"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_artifacts_with_a_mistyped_export() {
        let artifact = StubArtifact::new()
            .with_bad_signature("clang_createIndex")
            .build();
        let err = LibClang::from_bytes(&artifact).unwrap_err();
        match err {
            HostError::ExportSignature { name, .. } => assert_eq!(name, "clang_createIndex"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn creates_and_disposes_an_index() {
        let artifact = StubArtifact::new()
            .with_body("clang_createIndex", &[Instruction::I32Const(1)])
            .build();
        let mut lc = LibClang::from_bytes(&artifact).expect("load");
        let index = lc.create_index(true, true).expect("create index");
        assert_eq!(index.handle().as_raw(), 1);
        lc.dispose_index(index).expect("dispose");
    }

    #[test]
    fn null_index_is_an_error() {
        let artifact = StubArtifact::new().build();
        let mut lc = LibClang::from_bytes(&artifact).expect("load");
        assert!(matches!(
            lc.create_index(false, false),
            Err(HostError::NullHandle { what: "index" })
        ));
    }

    #[test]
    fn parses_a_translation_unit_with_marshalled_arguments() {
        let artifact = StubArtifact::new()
            .with_body("clang_createIndex", &[Instruction::I32Const(1)])
            .with_body("clang_parseTranslationUnit", &[Instruction::I32Const(7)])
            .build();
        let mut lc = LibClang::from_bytes(&artifact).expect("load");
        let index = lc.create_index(true, true).expect("index");
        let tu = lc
            .parse_translation_unit(
                &index,
                "/home/web_user/main.c",
                &["-I/usr/include".to_string(), "-std=c11".to_string()],
                &[clang_wasm_api::UnsavedFile::new(
                    "/home/web_user/main.c",
                    "int main() { return 0; }",
                )],
                TranslationUnitFlags::NONE,
            )
            .expect("parse");
        assert_eq!(tu.handle().as_raw(), 7);
    }

    #[test]
    fn a_null_parse_result_is_parse_failed() {
        let artifact = StubArtifact::new()
            .with_body("clang_createIndex", &[Instruction::I32Const(1)])
            .build();
        let mut lc = LibClang::from_bytes(&artifact).expect("load");
        let index = lc.create_index(true, true).expect("index");
        let err = lc
            .parse_translation_unit(&index, "/x.c", &[], &[], TranslationUnitFlags::NONE)
            .unwrap_err();
        assert!(matches!(err, HostError::ParseFailed));
    }

    #[test]
    fn copies_out_and_releases_guest_strings() {
        let artifact = StubArtifact::new()
            .with_data(1024, b"hello.c\0")
            .with_body(
                "clang_getTranslationUnitSpelling",
                &[Instruction::I32Const(1024)],
            )
            .build();
        let mut lc = LibClang::from_bytes(&artifact).expect("load");
        let tu = TranslationUnit::from_wire(7);
        let spelling = lc.translation_unit_spelling(&tu).expect("spelling");
        assert_eq!(spelling, "hello.c");
    }

    #[test]
    fn decodes_cursor_kinds_from_the_guest() {
        let artifact = StubArtifact::new()
            .with_body("clang_getCursorKind", &[Instruction::I32Const(8)])
            .build();
        let mut lc = LibClang::from_bytes(&artifact).expect("load");
        let cursor = lc.decode_cursor(11).expect("decode");
        assert_eq!(cursor.kind(), CursorKind::FunctionDecl);
    }

    #[test]
    fn rejects_unknown_cursor_kinds_from_the_guest() {
        let artifact = StubArtifact::new()
            .with_body("clang_getCursorKind", &[Instruction::I32Const(999)])
            .build();
        let mut lc = LibClang::from_bytes(&artifact).expect("load");
        assert!(matches!(
            lc.decode_cursor(11),
            Err(HostError::InvalidEnumValue {
                what: "cursor kind",
                value: 999
            })
        ));
    }

    #[test]
    fn visits_children_through_the_trampoline() {
        // The stub reports two children of the translation unit: a
        // function declaration and a variable declaration.
        let body = [
            Instruction::I32Const(11),
            Instruction::I32Const(8),
            Instruction::I32Const(1),
            Instruction::I32Const(350),
            Instruction::Call(IMPORT_VISIT),
            Instruction::Drop,
            Instruction::I32Const(12),
            Instruction::I32Const(9),
            Instruction::I32Const(1),
            Instruction::I32Const(350),
            Instruction::Call(IMPORT_VISIT),
            Instruction::Drop,
            Instruction::I32Const(0),
        ];
        let artifact = StubArtifact::new()
            .with_body("clang_visitChildren", &body)
            .with_body("clang_getCursorKind", &[Instruction::I32Const(350)])
            .build();
        let mut lc = LibClang::from_bytes(&artifact).expect("load");
        let root = lc.decode_cursor(1).expect("root");

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let broke = lc
            .visit_children(&root, move |cursor, parent| {
                sink.borrow_mut().push((cursor.kind(), parent.kind()));
                clang_wasm_api::ChildVisitResult::Continue
            })
            .expect("visit");
        assert!(!broke);
        assert_eq!(
            *seen.borrow(),
            vec![
                (CursorKind::FunctionDecl, CursorKind::TranslationUnit),
                (CursorKind::VarDecl, CursorKind::TranslationUnit),
            ]
        );
    }

    #[test]
    fn break_from_a_visitor_stops_the_traversal() {
        let body = [
            Instruction::I32Const(11),
            Instruction::I32Const(8),
            Instruction::I32Const(1),
            Instruction::I32Const(350),
            Instruction::Call(IMPORT_VISIT),
            Instruction::I32Eqz,
        ];
        let artifact = StubArtifact::new()
            .with_body("clang_visitChildren", &body)
            .with_body("clang_getCursorKind", &[Instruction::I32Const(350)])
            .build();
        let mut lc = LibClang::from_bytes(&artifact).expect("load");
        let root = lc.decode_cursor(1).expect("root");
        let broke = lc
            .visit_children(&root, |_, _| clang_wasm_api::ChildVisitResult::Break)
            .expect("visit");
        assert!(broke);
    }

    #[test]
    fn a_trapping_traversal_leaves_the_runtime_usable() {
        let artifact = StubArtifact::new()
            .with_body("clang_visitChildren", &[Instruction::Unreachable])
            .with_body("clang_getCursorKind", &[Instruction::I32Const(350)])
            .build();
        let mut lc = LibClang::from_bytes(&artifact).expect("load");
        let root = lc.decode_cursor(1).expect("root");
        assert!(lc.visit_children(&root, |_, _| unreachable!()).is_err());
        // The visitor stack was popped on the error path; other calls
        // keep working.
        let again = lc.decode_cursor(1).expect("still usable");
        assert_eq!(again.kind(), CursorKind::TranslationUnit);
    }

    #[test]
    fn reads_decomposed_locations_from_the_out_buffer() {
        let body = [
            Instruction::LocalGet(1),
            Instruction::I32Const(3),
            store(0),
            Instruction::LocalGet(1),
            Instruction::I32Const(10),
            store(4),
            Instruction::LocalGet(1),
            Instruction::I32Const(2),
            store(8),
            Instruction::LocalGet(1),
            Instruction::I32Const(55),
            store(12),
        ];
        let artifact = StubArtifact::new()
            .with_body("clang_getExpansionLocation", &body)
            .build();
        let mut lc = LibClang::from_bytes(&artifact).expect("load");
        let location = crate::source_location::SourceLocation::from_wire(5);
        let physical = lc.expansion_location(&location).expect("decompose");
        assert_eq!(physical.file.handle().as_raw(), 3);
        assert_eq!(physical.line, 10);
        assert_eq!(physical.column, 2);
        assert_eq!(physical.offset, 55);
    }

    #[test]
    fn guest_code_sees_the_virtual_filesystem() {
        // The stub asks the host whether "/src/x.h" exists.
        let path = b"/src/x.h";
        let body = [
            Instruction::I32Const(2048),
            Instruction::I32Const(path.len() as i32),
            Instruction::Call(IMPORT_FS_EXISTS),
        ];
        let artifact = StubArtifact::new()
            .with_data(2048, path)
            .with_body("clang_suspendTranslationUnit", &body)
            .build();
        let mut lc = LibClang::from_bytes(&artifact).expect("load");
        let tu = TranslationUnit::from_wire(7);

        assert!(!lc.suspend_translation_unit(&tu).expect("absent"));
        lc.fs_mut().write_file("/src/x.h", "int y;").expect("write");
        assert!(lc.suspend_translation_unit(&tu).expect("present"));
    }

    #[test]
    fn lists_are_copied_out_of_guest_memory() {
        // [count = 2][handles 41, 42] at offset 4096.
        let mut list = Vec::new();
        for word in [2u32, 41, 42] {
            list.extend_from_slice(&word.to_le_bytes());
        }
        let artifact = StubArtifact::new()
            .with_data(4096, &list)
            .with_body("clang_getAllSkippedRanges", &[Instruction::I32Const(4096)])
            .build();
        let mut lc = LibClang::from_bytes(&artifact).expect("load");
        let tu = TranslationUnit::from_wire(7);
        let ranges = lc.all_skipped_ranges(&tu).expect("list");
        let handles: Vec<u32> = ranges.iter().map(|r| r.handle().as_raw()).collect();
        assert_eq!(handles, vec![41, 42]);
    }
}
