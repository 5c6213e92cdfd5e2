//! The export surface of the `libclang.wasm` artifact.
//!
//! Every wrapped entry point keeps its upstream name; the table below
//! records the wire signature each export must have. The host runtime
//! resolves and type-checks the whole table at load time, so a stale
//! artifact fails fast instead of trapping mid-call.
//!
//! Wire conventions (pinned here because the upstream C signatures do
//! not survive the bytecode boundary unchanged):
//!
//! - object handles, enum values, flag words and booleans are `i32`
//! - 64-bit integers (`long long`, file times) are `i64`
//! - a string argument is an `(ptr, len)` pair of `i32`s pointing at
//!   UTF-8 written through `cw_alloc`
//! - a string result is a NUL-terminated buffer the caller releases
//!   with `cw_str_free`
//! - a string-array or unsaved-file argument is an `(table_ptr, count)`
//!   pair; the table holds `(ptr, len)` words per element
//! - a returned list is a buffer `[count: u32][element: u32 * count]`
//!   the caller releases with `cw_free`
//! - decomposed locations are written to a caller-provided out buffer
//!   of consecutive `u32` fields

use self::WasmType::{F64, I32, I64};

/// Core wasm value types used by the wire signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WasmType {
    I32,
    I64,
    F64,
}

/// Declares one export of the artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionDecl {
    /// Export name, identical to the upstream symbol.
    pub name: &'static str,
    pub params: &'static [WasmType],
    pub results: &'static [WasmType],
}

const fn decl(
    name: &'static str,
    params: &'static [WasmType],
    results: &'static [WasmType],
) -> FunctionDecl {
    FunctionDecl {
        name,
        params,
        results,
    }
}

/// Exports the binding shim adds on top of the wrapped library.
pub const SHIM_ALLOC: &str = "cw_alloc";
pub const SHIM_FREE: &str = "cw_free";
pub const SHIM_STR_FREE: &str = "cw_str_free";
/// Reads the `kind` field of a type value, which the upstream C API
/// exposes as a struct member rather than a function.
pub const SHIM_TYPE_KIND: &str = "cw_type_kind";

/// Import module the artifact expects host functions under.
pub const HOST_MODULE: &str = "env";
/// Host import dispatching child-visitor callbacks.
pub const HOST_VISIT: &str = "cw_visit";
/// Host imports backing the guest-visible filesystem.
pub const HOST_FS_OPEN: &str = "cw_fs_open";
pub const HOST_FS_SIZE: &str = "cw_fs_size";
pub const HOST_FS_READ: &str = "cw_fs_read";
pub const HOST_FS_CLOSE: &str = "cw_fs_close";
pub const HOST_FS_EXISTS: &str = "cw_fs_exists";

/// The complete export surface, grouped the way the upstream header
/// groups its sections.
pub const FUNCTIONS: &[FunctionDecl] = &[
    // Shim memory management.
    decl(SHIM_ALLOC, &[I32], &[I32]),
    decl(SHIM_FREE, &[I32, I32], &[]),
    decl(SHIM_STR_FREE, &[I32], &[]),
    decl(SHIM_TYPE_KIND, &[I32], &[I32]),
    // Index lifetime and options.
    decl("clang_createIndex", &[I32, I32], &[I32]),
    decl("clang_disposeIndex", &[I32], &[]),
    decl("clang_CXIndex_setGlobalOptions", &[I32, I32], &[]),
    decl("clang_CXIndex_getGlobalOptions", &[I32], &[I32]),
    decl(
        "clang_CXIndex_setInvocationEmissionPathOption",
        &[I32, I32, I32],
        &[],
    ),
    // Files.
    decl("clang_getFileName", &[I32], &[I32]),
    decl("clang_getFileTime", &[I32], &[I64]),
    decl("clang_isFileMultipleIncludeGuarded", &[I32, I32], &[I32]),
    decl("clang_getFile", &[I32, I32, I32], &[I32]),
    decl("clang_getFileContents", &[I32, I32, I32], &[I32]),
    decl("clang_File_isEqual", &[I32, I32], &[I32]),
    decl("clang_File_tryGetRealPathName", &[I32], &[I32]),
    decl("clang_getIncludedFile", &[I32], &[I32]),
    // Source locations and ranges.
    decl("clang_getNullLocation", &[], &[I32]),
    decl("clang_equalLocations", &[I32, I32], &[I32]),
    decl("clang_getLocation", &[I32, I32, I32, I32], &[I32]),
    decl("clang_getLocationForOffset", &[I32, I32, I32], &[I32]),
    decl("clang_Location_isInSystemHeader", &[I32], &[I32]),
    decl("clang_Location_isFromMainFile", &[I32], &[I32]),
    decl("clang_getNullRange", &[], &[I32]),
    decl("clang_getRange", &[I32, I32], &[I32]),
    decl("clang_equalRanges", &[I32, I32], &[I32]),
    decl("clang_Range_isNull", &[I32], &[I32]),
    decl("clang_getRangeStart", &[I32], &[I32]),
    decl("clang_getRangeEnd", &[I32], &[I32]),
    decl("clang_getExpansionLocation", &[I32, I32], &[]),
    decl("clang_getPresumedLocation", &[I32, I32], &[]),
    decl("clang_getInstantiationLocation", &[I32, I32], &[]),
    decl("clang_getSpellingLocation", &[I32, I32], &[]),
    decl("clang_getFileLocation", &[I32, I32], &[]),
    decl("clang_getSkippedRanges", &[I32, I32], &[I32]),
    decl("clang_getAllSkippedRanges", &[I32], &[I32]),
    // Diagnostics.
    decl("clang_getNumDiagnosticsInSet", &[I32], &[I32]),
    decl("clang_getDiagnosticInSet", &[I32, I32], &[I32]),
    decl("clang_loadDiagnostics", &[I32, I32, I32, I32], &[I32]),
    decl("clang_disposeDiagnosticSet", &[I32], &[]),
    decl("clang_getChildDiagnostics", &[I32], &[I32]),
    decl("clang_getNumDiagnostics", &[I32], &[I32]),
    decl("clang_getDiagnostic", &[I32, I32], &[I32]),
    decl("clang_getDiagnosticSetFromTU", &[I32], &[I32]),
    decl("clang_disposeDiagnostic", &[I32], &[]),
    decl("clang_formatDiagnostic", &[I32, I32], &[I32]),
    decl("clang_defaultDiagnosticDisplayOptions", &[], &[I32]),
    decl("clang_getDiagnosticSeverity", &[I32], &[I32]),
    decl("clang_getDiagnosticLocation", &[I32], &[I32]),
    decl("clang_getDiagnosticSpelling", &[I32], &[I32]),
    decl("clang_getDiagnosticOption", &[I32, I32], &[I32]),
    decl("clang_getDiagnosticCategory", &[I32], &[I32]),
    decl("clang_getDiagnosticCategoryText", &[I32], &[I32]),
    decl("clang_getDiagnosticNumRanges", &[I32], &[I32]),
    decl("clang_getDiagnosticRange", &[I32, I32], &[I32]),
    decl("clang_getDiagnosticNumFixIts", &[I32], &[I32]),
    decl("clang_getDiagnosticFixIt", &[I32, I32, I32], &[I32]),
    // Translation unit manipulation.
    decl("clang_getTranslationUnitSpelling", &[I32], &[I32]),
    decl(
        "clang_createTranslationUnitFromSourceFile",
        &[I32, I32, I32, I32, I32, I32, I32],
        &[I32],
    ),
    decl("clang_createTranslationUnit", &[I32, I32, I32], &[I32]),
    decl(
        "clang_parseTranslationUnit",
        &[I32, I32, I32, I32, I32, I32, I32, I32],
        &[I32],
    ),
    decl("clang_defaultEditingTranslationUnitOptions", &[], &[I32]),
    decl("clang_defaultSaveOptions", &[I32], &[I32]),
    decl("clang_saveTranslationUnit", &[I32, I32, I32, I32], &[I32]),
    decl("clang_suspendTranslationUnit", &[I32], &[I32]),
    decl("clang_disposeTranslationUnit", &[I32], &[]),
    decl("clang_defaultReparseOptions", &[I32], &[I32]),
    decl("clang_reparseTranslationUnit", &[I32, I32, I32, I32], &[I32]),
    decl("clang_getTUResourceUsageName", &[I32], &[I32]),
    // Cursor manipulation.
    decl("clang_getNullCursor", &[], &[I32]),
    decl("clang_getTranslationUnitCursor", &[I32], &[I32]),
    decl("clang_equalCursors", &[I32, I32], &[I32]),
    decl("clang_Cursor_isNull", &[I32], &[I32]),
    decl("clang_hashCursor", &[I32], &[I32]),
    decl("clang_getCursorKind", &[I32], &[I32]),
    decl("clang_isDeclaration", &[I32], &[I32]),
    decl("clang_isInvalidDeclaration", &[I32], &[I32]),
    decl("clang_isReference", &[I32], &[I32]),
    decl("clang_isExpression", &[I32], &[I32]),
    decl("clang_isStatement", &[I32], &[I32]),
    decl("clang_isAttribute", &[I32], &[I32]),
    decl("clang_Cursor_hasAttrs", &[I32], &[I32]),
    decl("clang_isInvalid", &[I32], &[I32]),
    decl("clang_isTranslationUnit", &[I32], &[I32]),
    decl("clang_isPreprocessing", &[I32], &[I32]),
    decl("clang_isUnexposed", &[I32], &[I32]),
    decl("clang_getCursorAvailability", &[I32], &[I32]),
    decl("clang_getCursorLinkage", &[I32], &[I32]),
    decl("clang_getCursorVisibility", &[I32], &[I32]),
    decl("clang_getCursorLanguage", &[I32], &[I32]),
    decl("clang_getCursorTLSKind", &[I32], &[I32]),
    decl("clang_Cursor_getTranslationUnit", &[I32], &[I32]),
    decl("clang_getCursorSemanticParent", &[I32], &[I32]),
    decl("clang_getCursorLexicalParent", &[I32], &[I32]),
    decl("clang_getNumOverloadedDecls", &[I32], &[I32]),
    decl("clang_getOverloadedDecl", &[I32, I32], &[I32]),
    decl("clang_getIBOutletCollectionType", &[I32], &[I32]),
    decl("clang_getCursorLocation", &[I32], &[I32]),
    decl("clang_getCursorExtent", &[I32], &[I32]),
    decl("clang_getCursor", &[I32, I32], &[I32]),
    // Traversing the AST with cursors.
    decl("clang_visitChildren", &[I32], &[I32]),
    // Cross-referencing in the AST.
    decl("clang_getCursorUSR", &[I32], &[I32]),
    decl("clang_constructUSR_ObjCClass", &[I32, I32], &[I32]),
    decl(
        "clang_constructUSR_ObjCCategory",
        &[I32, I32, I32, I32],
        &[I32],
    ),
    decl("clang_constructUSR_ObjCProtocol", &[I32, I32], &[I32]),
    decl("clang_getCursorSpelling", &[I32], &[I32]),
    decl(
        "clang_Cursor_getSpellingNameRange",
        &[I32, I32, I32],
        &[I32],
    ),
    decl("clang_getCursorDisplayName", &[I32], &[I32]),
    decl("clang_getCursorReferenced", &[I32], &[I32]),
    decl("clang_getCursorDefinition", &[I32], &[I32]),
    decl("clang_isCursorDefinition", &[I32], &[I32]),
    decl("clang_getCanonicalCursor", &[I32], &[I32]),
    decl("clang_getCursorReferenceNameRange", &[I32, I32, I32], &[I32]),
    // Information for attributes and Objective-C entities.
    decl("clang_Cursor_getObjCSelectorIndex", &[I32], &[I32]),
    decl("clang_Cursor_isDynamicCall", &[I32], &[I32]),
    decl("clang_Cursor_getReceiverType", &[I32], &[I32]),
    decl("clang_Cursor_getObjCPropertyAttributes", &[I32, I32], &[I32]),
    decl("clang_Cursor_getObjCPropertyGetterName", &[I32], &[I32]),
    decl("clang_Cursor_getObjCPropertySetterName", &[I32], &[I32]),
    decl("clang_Cursor_getObjCDeclQualifiers", &[I32], &[I32]),
    decl("clang_Cursor_isObjCOptional", &[I32], &[I32]),
    decl("clang_Cursor_isVariadic", &[I32], &[I32]),
    decl("clang_Cursor_getCommentRange", &[I32], &[I32]),
    decl("clang_Cursor_getRawCommentText", &[I32], &[I32]),
    decl("clang_Cursor_getBriefCommentText", &[I32], &[I32]),
    decl("clang_Cursor_getMangling", &[I32], &[I32]),
    // Module introspection.
    decl("clang_Cursor_getModule", &[I32], &[I32]),
    decl("clang_getModuleForFile", &[I32, I32], &[I32]),
    decl("clang_Module_getASTFile", &[I32], &[I32]),
    decl("clang_Module_getParent", &[I32], &[I32]),
    decl("clang_Module_getName", &[I32], &[I32]),
    decl("clang_Module_getFullName", &[I32], &[I32]),
    decl("clang_Module_isSystem", &[I32], &[I32]),
    decl("clang_Module_getNumTopLevelHeaders", &[I32, I32], &[I32]),
    decl(
        "clang_Module_getTopLevelHeader",
        &[I32, I32, I32],
        &[I32],
    ),
    // C++ AST introspection.
    decl("clang_CXXConstructor_isConvertingConstructor", &[I32], &[I32]),
    decl("clang_CXXConstructor_isCopyConstructor", &[I32], &[I32]),
    decl("clang_CXXConstructor_isDefaultConstructor", &[I32], &[I32]),
    decl("clang_CXXConstructor_isMoveConstructor", &[I32], &[I32]),
    decl("clang_CXXField_isMutable", &[I32], &[I32]),
    decl("clang_CXXMethod_isDefaulted", &[I32], &[I32]),
    decl("clang_CXXMethod_isPureVirtual", &[I32], &[I32]),
    decl("clang_CXXMethod_isStatic", &[I32], &[I32]),
    decl("clang_CXXMethod_isVirtual", &[I32], &[I32]),
    decl("clang_CXXMethod_isConst", &[I32], &[I32]),
    decl("clang_CXXRecord_isAbstract", &[I32], &[I32]),
    decl("clang_EnumDecl_isScoped", &[I32], &[I32]),
    decl("clang_getTemplateCursorKind", &[I32], &[I32]),
    decl("clang_getSpecializedCursorTemplate", &[I32], &[I32]),
    // Type information for cursors.
    decl("clang_getCursorType", &[I32], &[I32]),
    decl("clang_getTypeSpelling", &[I32], &[I32]),
    decl("clang_getTypedefDeclUnderlyingType", &[I32], &[I32]),
    decl("clang_getEnumDeclIntegerType", &[I32], &[I32]),
    decl("clang_getEnumConstantDeclValue", &[I32], &[I64]),
    decl("clang_getEnumConstantDeclUnsignedValue", &[I32], &[I64]),
    decl("clang_getFieldDeclBitWidth", &[I32], &[I32]),
    decl("clang_Cursor_getNumArguments", &[I32], &[I32]),
    decl("clang_Cursor_getArgument", &[I32, I32], &[I32]),
    decl("clang_Cursor_getNumTemplateArguments", &[I32], &[I32]),
    decl("clang_Cursor_getTemplateArgumentKind", &[I32, I32], &[I32]),
    decl("clang_Cursor_getTemplateArgumentType", &[I32, I32], &[I32]),
    decl("clang_Cursor_getTemplateArgumentValue", &[I32, I32], &[I64]),
    decl(
        "clang_Cursor_getTemplateArgumentUnsignedValue",
        &[I32, I32],
        &[I64],
    ),
    decl("clang_equalTypes", &[I32, I32], &[I32]),
    decl("clang_getCanonicalType", &[I32], &[I32]),
    decl("clang_isConstQualifiedType", &[I32], &[I32]),
    decl("clang_Cursor_isMacroFunctionLike", &[I32], &[I32]),
    decl("clang_Cursor_isMacroBuiltin", &[I32], &[I32]),
    decl("clang_Cursor_isFunctionInlined", &[I32], &[I32]),
    decl("clang_isVolatileQualifiedType", &[I32], &[I32]),
    decl("clang_isRestrictQualifiedType", &[I32], &[I32]),
    decl("clang_getAddressSpace", &[I32], &[I32]),
    decl("clang_getTypedefName", &[I32], &[I32]),
    decl("clang_getPointeeType", &[I32], &[I32]),
    decl("clang_getTypeDeclaration", &[I32], &[I32]),
    decl("clang_getDeclObjCTypeEncoding", &[I32], &[I32]),
    decl("clang_Type_getObjCEncoding", &[I32], &[I32]),
    decl("clang_getTypeKindSpelling", &[I32], &[I32]),
    decl("clang_getFunctionTypeCallingConv", &[I32], &[I32]),
    decl("clang_getResultType", &[I32], &[I32]),
    decl("clang_getExceptionSpecificationType", &[I32], &[I32]),
    decl("clang_getNumArgTypes", &[I32], &[I32]),
    decl("clang_getArgType", &[I32, I32], &[I32]),
    decl("clang_Type_getObjCObjectBaseType", &[I32], &[I32]),
    decl("clang_Type_getNumObjCProtocolRefs", &[I32], &[I32]),
    decl("clang_Type_getObjCProtocolDecl", &[I32, I32], &[I32]),
    decl("clang_Type_getNumObjCTypeArgs", &[I32], &[I32]),
    decl("clang_Type_getObjCTypeArg", &[I32, I32], &[I32]),
    decl("clang_isFunctionTypeVariadic", &[I32], &[I32]),
    decl("clang_getCursorResultType", &[I32], &[I32]),
    decl("clang_getCursorExceptionSpecificationType", &[I32], &[I32]),
    decl("clang_isPODType", &[I32], &[I32]),
    decl("clang_getElementType", &[I32], &[I32]),
    decl("clang_getNumElements", &[I32], &[I64]),
    decl("clang_getArrayElementType", &[I32], &[I32]),
    decl("clang_getArraySize", &[I32], &[I64]),
    decl("clang_Type_getNamedType", &[I32], &[I32]),
    decl("clang_Type_isTransparentTagTypedef", &[I32], &[I32]),
    decl("clang_Type_getNullability", &[I32], &[I32]),
    decl("clang_Type_getAlignOf", &[I32], &[I64]),
    decl("clang_Type_getClassType", &[I32], &[I32]),
    decl("clang_Type_getSizeOf", &[I32], &[I64]),
    decl("clang_Type_getOffsetOf", &[I32, I32, I32], &[I64]),
    decl("clang_Type_getModifiedType", &[I32], &[I32]),
    decl("clang_Type_getValueType", &[I32], &[I32]),
    decl("clang_Cursor_getOffsetOfField", &[I32], &[I64]),
    decl("clang_Cursor_isAnonymous", &[I32], &[I32]),
    decl("clang_Cursor_isAnonymousRecordDecl", &[I32], &[I32]),
    decl("clang_Cursor_isInlineNamespace", &[I32], &[I32]),
    decl("clang_Type_getNumTemplateArguments", &[I32], &[I32]),
    decl("clang_Type_getTemplateArgumentAsType", &[I32, I32], &[I32]),
    decl("clang_Type_getCXXRefQualifier", &[I32], &[I32]),
    decl("clang_Cursor_isBitField", &[I32], &[I32]),
    decl("clang_isVirtualBase", &[I32], &[I32]),
    decl("clang_getCXXAccessSpecifier", &[I32], &[I32]),
    decl("clang_Cursor_getStorageClass", &[I32], &[I32]),
    // Variable declarations.
    decl("clang_Cursor_getVarDeclInitializer", &[I32], &[I32]),
    decl("clang_Cursor_hasVarDeclGlobalStorage", &[I32], &[I32]),
    decl("clang_Cursor_hasVarDeclExternalStorage", &[I32], &[I32]),
    // Mapping between cursors and source code.
    decl("clang_getCursorKindSpelling", &[I32], &[I32]),
    // Pretty printing.
    decl("clang_getCursorPrintingPolicy", &[I32], &[I32]),
    decl("clang_PrintingPolicy_dispose", &[I32], &[]),
    decl("clang_PrintingPolicy_getProperty", &[I32, I32], &[I32]),
    decl("clang_PrintingPolicy_setProperty", &[I32, I32, I32], &[]),
    decl("clang_getCursorPrettyPrinted", &[I32, I32], &[I32]),
    // Token extraction and manipulation.
    decl("clang_getToken", &[I32, I32], &[I32]),
    decl("clang_getTokenKind", &[I32], &[I32]),
    decl("clang_getTokenSpelling", &[I32, I32], &[I32]),
    decl("clang_getTokenLocation", &[I32, I32], &[I32]),
    decl("clang_getTokenExtent", &[I32, I32], &[I32]),
    decl("clang_tokenize", &[I32, I32], &[I32]),
    decl("clang_annotateTokens", &[I32, I32, I32], &[I32]),
    // Miscellaneous utility functions.
    decl("clang_getClangVersion", &[], &[I32]),
    decl("clang_toggleCrashRecovery", &[I32], &[]),
    decl("clang_enableStackTraces", &[], &[]),
];

/// Looks up a declaration by export name.
///
/// The search is linear over `FUNCTIONS`; the table is consulted once
/// per export at load time, so this does not need to be clever.
pub fn find_function(name: &str) -> Option<&'static FunctionDecl> {
    FUNCTIONS.iter().find(|f| f.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_no_duplicate_names() {
        for (i, a) in FUNCTIONS.iter().enumerate() {
            for b in &FUNCTIONS[i + 1..] {
                assert_ne!(a.name, b.name, "duplicate surface entry");
            }
        }
    }

    #[test]
    fn lookup_finds_core_entry_points() {
        let parse = find_function("clang_parseTranslationUnit").expect("declared");
        assert_eq!(parse.params.len(), 8);
        assert_eq!(parse.results, &[I32]);

        let visit = find_function("clang_visitChildren").expect("declared");
        assert_eq!(visit.params, &[I32]);

        assert!(find_function("clang_createIndex").is_some());
        assert!(find_function("clang_codeCompleteAt").is_none());
    }

    #[test]
    fn sixty_four_bit_results_are_declared_as_i64() {
        for name in [
            "clang_getFileTime",
            "clang_getEnumConstantDeclValue",
            "clang_Type_getSizeOf",
            "clang_Cursor_getOffsetOfField",
        ] {
            let f = find_function(name).expect("declared");
            assert_eq!(f.results, &[I64], "{name}");
        }
    }

    #[test]
    fn shim_exports_are_part_of_the_surface() {
        assert!(find_function(SHIM_ALLOC).is_some());
        assert!(find_function(SHIM_FREE).is_some());
        assert!(find_function(SHIM_STR_FREE).is_some());
    }

    #[test]
    fn floating_point_is_currently_unused_on_the_wire() {
        // The transcribed surface happens to carry no f64 today; this
        // pins the fact so a future entry is added consciously.
        for f in FUNCTIONS {
            assert!(!f.params.contains(&F64), "{}", f.name);
            assert!(!f.results.contains(&F64), "{}", f.name);
        }
    }
}
