//! Cursors: handles into the wrapped library's AST.
//!
//! A cursor unifies declarations, statements, expressions and
//! references under one abstraction with a common set of operations.
//! Cursors are produced by `translation_unit_cursor` (the root of a
//! translation unit) or `cursor_at` (mapping a physical source
//! location into the AST), and traversed with `visit_children`. Every
//! method here is a passthrough to the guest export of the same
//! upstream name.

use wasmi::Val;

use clang_wasm_api::{
    AccessSpecifier, AvailabilityKind, ChildVisitResult, CursorHandle, CursorKind, LanguageKind,
    LinkageKind, NameRefFlags, ObjCDeclQualifier, ObjCPropertyAttrKind, StorageClass, TlsKind,
    VisibilityKind,
};

use crate::error::HostError;
use crate::runtime::{LibClang, TempAllocs};
use crate::source_location::{SourceLocation, SourceRange};
use crate::translation_unit::TranslationUnit;

/// A cursor representing some element in the abstract syntax tree of
/// a translation unit.
///
/// The kind is captured when the cursor crosses the wire, so cheap
/// dispatch on it does not need another guest call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    handle: CursorHandle,
    kind: CursorKind,
}

impl Cursor {
    pub(crate) fn from_wire(handle: u32, kind: CursorKind) -> Self {
        Self {
            handle: CursorHandle::from_raw(handle),
            kind,
        }
    }

    pub fn handle(&self) -> CursorHandle {
        self.handle
    }

    /// The kind captured when this cursor was produced.
    pub fn kind(&self) -> CursorKind {
        self.kind
    }

    pub fn is_null(&self) -> bool {
        self.handle.is_null() || self.kind.is_invalid()
    }

    pub(crate) fn arg(&self) -> Val {
        Val::I32(self.handle.as_raw() as i32)
    }
}

impl LibClang {
    /// Builds a [`Cursor`] from a guest-returned handle, fetching its
    /// kind (`clang_getCursorKind`).
    pub(crate) fn decode_cursor(&mut self, handle: u32) -> Result<Cursor, HostError> {
        let raw = self.call_u32("clang_getCursorKind", &[Val::I32(handle as i32)])?;
        let kind = CursorKind::from_raw(raw).ok_or(HostError::InvalidEnumValue {
            what: "cursor kind",
            value: raw as i64,
        })?;
        Ok(Cursor::from_wire(handle, kind))
    }

    fn cursor_call(&mut self, name: &'static str, args: &[Val]) -> Result<Cursor, HostError> {
        let handle = self.call_u32(name, args)?;
        self.decode_cursor(handle)
    }

    /// The null cursor (`clang_getNullCursor`).
    pub fn null_cursor(&mut self) -> Result<Cursor, HostError> {
        self.cursor_call("clang_getNullCursor", &[])
    }

    /// The cursor that represents the given translation unit
    /// (`clang_getTranslationUnitCursor`), from which the rest of the
    /// translation unit can be explored.
    pub fn translation_unit_cursor(&mut self, tu: &TranslationUnit) -> Result<Cursor, HostError> {
        self.cursor_call("clang_getTranslationUnitCursor", &[tu.arg()])
    }

    /// Maps a source location to the cursor that resides there
    /// (`clang_getCursor`).
    pub fn cursor_at(
        &mut self,
        tu: &TranslationUnit,
        location: &SourceLocation,
    ) -> Result<Cursor, HostError> {
        self.cursor_call("clang_getCursor", &[tu.arg(), location.arg()])
    }

    /// `clang_equalCursors`.
    pub fn equal_cursors(&mut self, a: &Cursor, b: &Cursor) -> Result<bool, HostError> {
        self.call_bool("clang_equalCursors", &[a.arg(), b.arg()])
    }

    /// `clang_Cursor_isNull`.
    pub fn cursor_is_null(&mut self, cursor: &Cursor) -> Result<bool, HostError> {
        self.call_bool("clang_Cursor_isNull", &[cursor.arg()])
    }

    /// Computes a hash value for the given cursor (`clang_hashCursor`).
    pub fn hash_cursor(&mut self, cursor: &Cursor) -> Result<u32, HostError> {
        self.call_u32("clang_hashCursor", &[cursor.arg()])
    }

    /// Re-queries the kind of a cursor (`clang_getCursorKind`).
    pub fn cursor_kind(&mut self, cursor: &Cursor) -> Result<CursorKind, HostError> {
        Ok(self.decode_cursor(cursor.handle().as_raw())?.kind())
    }

    // -----------------------------------------------------------------
    // Kind category predicates
    // -----------------------------------------------------------------

    fn kind_predicate(
        &mut self,
        name: &'static str,
        kind: CursorKind,
    ) -> Result<bool, HostError> {
        self.call_bool(name, &[Val::I32(kind.as_raw() as i32)])
    }

    /// `clang_isDeclaration`.
    pub fn kind_is_declaration(&mut self, kind: CursorKind) -> Result<bool, HostError> {
        self.kind_predicate("clang_isDeclaration", kind)
    }

    /// `clang_isReference`.
    pub fn kind_is_reference(&mut self, kind: CursorKind) -> Result<bool, HostError> {
        self.kind_predicate("clang_isReference", kind)
    }

    /// `clang_isExpression`.
    pub fn kind_is_expression(&mut self, kind: CursorKind) -> Result<bool, HostError> {
        self.kind_predicate("clang_isExpression", kind)
    }

    /// `clang_isStatement`.
    pub fn kind_is_statement(&mut self, kind: CursorKind) -> Result<bool, HostError> {
        self.kind_predicate("clang_isStatement", kind)
    }

    /// `clang_isAttribute`.
    pub fn kind_is_attribute(&mut self, kind: CursorKind) -> Result<bool, HostError> {
        self.kind_predicate("clang_isAttribute", kind)
    }

    /// `clang_isInvalid`.
    pub fn kind_is_invalid(&mut self, kind: CursorKind) -> Result<bool, HostError> {
        self.kind_predicate("clang_isInvalid", kind)
    }

    /// `clang_isTranslationUnit`.
    pub fn kind_is_translation_unit(&mut self, kind: CursorKind) -> Result<bool, HostError> {
        self.kind_predicate("clang_isTranslationUnit", kind)
    }

    /// `clang_isPreprocessing`.
    pub fn kind_is_preprocessing(&mut self, kind: CursorKind) -> Result<bool, HostError> {
        self.kind_predicate("clang_isPreprocessing", kind)
    }

    /// `clang_isUnexposed`.
    pub fn kind_is_unexposed(&mut self, kind: CursorKind) -> Result<bool, HostError> {
        self.kind_predicate("clang_isUnexposed", kind)
    }

    /// Whether the declaration is invalid as written
    /// (`clang_isInvalidDeclaration`).
    pub fn is_invalid_declaration(&mut self, cursor: &Cursor) -> Result<bool, HostError> {
        self.call_bool("clang_isInvalidDeclaration", &[cursor.arg()])
    }

    /// `clang_Cursor_hasAttrs`.
    pub fn cursor_has_attrs(&mut self, cursor: &Cursor) -> Result<bool, HostError> {
        self.call_bool("clang_Cursor_hasAttrs", &[cursor.arg()])
    }

    // -----------------------------------------------------------------
    // Linkage, visibility, availability, language
    // -----------------------------------------------------------------

    /// `clang_getCursorAvailability`.
    pub fn cursor_availability(&mut self, cursor: &Cursor) -> Result<AvailabilityKind, HostError> {
        let raw = self.call_u32("clang_getCursorAvailability", &[cursor.arg()])?;
        AvailabilityKind::from_raw(raw).ok_or(HostError::InvalidEnumValue {
            what: "availability kind",
            value: raw as i64,
        })
    }

    /// `clang_getCursorLinkage`.
    pub fn cursor_linkage(&mut self, cursor: &Cursor) -> Result<LinkageKind, HostError> {
        let raw = self.call_u32("clang_getCursorLinkage", &[cursor.arg()])?;
        LinkageKind::from_raw(raw).ok_or(HostError::InvalidEnumValue {
            what: "linkage kind",
            value: raw as i64,
        })
    }

    /// `clang_getCursorVisibility`.
    pub fn cursor_visibility(&mut self, cursor: &Cursor) -> Result<VisibilityKind, HostError> {
        let raw = self.call_u32("clang_getCursorVisibility", &[cursor.arg()])?;
        VisibilityKind::from_raw(raw).ok_or(HostError::InvalidEnumValue {
            what: "visibility kind",
            value: raw as i64,
        })
    }

    /// `clang_getCursorLanguage`.
    pub fn cursor_language(&mut self, cursor: &Cursor) -> Result<LanguageKind, HostError> {
        let raw = self.call_u32("clang_getCursorLanguage", &[cursor.arg()])?;
        LanguageKind::from_raw(raw).ok_or(HostError::InvalidEnumValue {
            what: "language kind",
            value: raw as i64,
        })
    }

    /// `clang_getCursorTLSKind`.
    pub fn cursor_tls_kind(&mut self, cursor: &Cursor) -> Result<TlsKind, HostError> {
        let raw = self.call_u32("clang_getCursorTLSKind", &[cursor.arg()])?;
        TlsKind::from_raw(raw).ok_or(HostError::InvalidEnumValue {
            what: "TLS kind",
            value: raw as i64,
        })
    }

    /// The translation unit a cursor originated from
    /// (`clang_Cursor_getTranslationUnit`).
    pub fn cursor_translation_unit(
        &mut self,
        cursor: &Cursor,
    ) -> Result<TranslationUnit, HostError> {
        let handle = self.call_u32("clang_Cursor_getTranslationUnit", &[cursor.arg()])?;
        if handle == 0 {
            return Err(HostError::NullHandle {
                what: "translation unit",
            });
        }
        Ok(TranslationUnit::from_wire(handle))
    }

    // -----------------------------------------------------------------
    // Parents and overloads
    // -----------------------------------------------------------------

    /// `clang_getCursorSemanticParent`.
    pub fn cursor_semantic_parent(&mut self, cursor: &Cursor) -> Result<Cursor, HostError> {
        self.cursor_call("clang_getCursorSemanticParent", &[cursor.arg()])
    }

    /// `clang_getCursorLexicalParent`.
    pub fn cursor_lexical_parent(&mut self, cursor: &Cursor) -> Result<Cursor, HostError> {
        self.cursor_call("clang_getCursorLexicalParent", &[cursor.arg()])
    }

    /// Number of overloaded declarations an overloaded-decl-ref cursor
    /// refers to (`clang_getNumOverloadedDecls`).
    pub fn num_overloaded_decls(&mut self, cursor: &Cursor) -> Result<u32, HostError> {
        self.call_u32("clang_getNumOverloadedDecls", &[cursor.arg()])
    }

    /// `clang_getOverloadedDecl`.
    pub fn overloaded_decl(&mut self, cursor: &Cursor, index: u32) -> Result<Cursor, HostError> {
        self.cursor_call(
            "clang_getOverloadedDecl",
            &[cursor.arg(), Val::I32(index as i32)],
        )
    }

    // -----------------------------------------------------------------
    // Physical extent
    // -----------------------------------------------------------------

    /// `clang_getCursorLocation`.
    pub fn cursor_location(&mut self, cursor: &Cursor) -> Result<SourceLocation, HostError> {
        let handle = self.call_u32("clang_getCursorLocation", &[cursor.arg()])?;
        Ok(SourceLocation::from_wire(handle))
    }

    /// `clang_getCursorExtent`.
    pub fn cursor_extent(&mut self, cursor: &Cursor) -> Result<SourceRange, HostError> {
        let handle = self.call_u32("clang_getCursorExtent", &[cursor.arg()])?;
        Ok(SourceRange::from_wire(handle))
    }

    // -----------------------------------------------------------------
    // Traversal
    // -----------------------------------------------------------------

    /// Visits the children of `parent` (`clang_visitChildren`).
    ///
    /// The visitor receives each child and its parent and returns a
    /// [`ChildVisitResult`]; returning `Recurse` makes the wrapped
    /// library descend into the child with the same visitor. Returns
    /// `true` if the traversal was terminated by `Break`.
    ///
    /// The visitor stack is popped on every exit path, including guest
    /// traps, so a failed traversal leaves the runtime reusable.
    pub fn visit_children<F>(&mut self, parent: &Cursor, visitor: F) -> Result<bool, HostError>
    where
        F: FnMut(Cursor, Cursor) -> ChildVisitResult + 'static,
    {
        self.push_visitor(Box::new(visitor));
        let result = self.call_i32("clang_visitChildren", &[parent.arg()]);
        self.pop_visitor();
        result.map(|broke| broke != 0)
    }

    // -----------------------------------------------------------------
    // Names and cross-referencing
    // -----------------------------------------------------------------

    /// A Unified Symbol Resolution for the entity referenced by the
    /// cursor (`clang_getCursorUSR`).
    pub fn cursor_usr(&mut self, cursor: &Cursor) -> Result<String, HostError> {
        self.call_str("clang_getCursorUSR", &[cursor.arg()])
    }

    /// `clang_constructUSR_ObjCClass`.
    pub fn construct_usr_objc_class(&mut self, class_name: &str) -> Result<String, HostError> {
        let mut allocs = TempAllocs::new();
        let (ptr, len) = self.write_string(class_name, &mut allocs)?;
        let usr = self.call_str(
            "clang_constructUSR_ObjCClass",
            &[Val::I32(ptr as i32), Val::I32(len as i32)],
        );
        self.release(allocs)?;
        usr
    }

    /// `clang_constructUSR_ObjCCategory`.
    pub fn construct_usr_objc_category(
        &mut self,
        class_name: &str,
        category_name: &str,
    ) -> Result<String, HostError> {
        let mut allocs = TempAllocs::new();
        let (class_ptr, class_len) = self.write_string(class_name, &mut allocs)?;
        let (cat_ptr, cat_len) = self.write_string(category_name, &mut allocs)?;
        let usr = self.call_str(
            "clang_constructUSR_ObjCCategory",
            &[
                Val::I32(class_ptr as i32),
                Val::I32(class_len as i32),
                Val::I32(cat_ptr as i32),
                Val::I32(cat_len as i32),
            ],
        );
        self.release(allocs)?;
        usr
    }

    /// `clang_constructUSR_ObjCProtocol`.
    pub fn construct_usr_objc_protocol(
        &mut self,
        protocol_name: &str,
    ) -> Result<String, HostError> {
        let mut allocs = TempAllocs::new();
        let (ptr, len) = self.write_string(protocol_name, &mut allocs)?;
        let usr = self.call_str(
            "clang_constructUSR_ObjCProtocol",
            &[Val::I32(ptr as i32), Val::I32(len as i32)],
        );
        self.release(allocs)?;
        usr
    }

    /// Name of the entity referenced by this cursor
    /// (`clang_getCursorSpelling`).
    pub fn cursor_spelling(&mut self, cursor: &Cursor) -> Result<String, HostError> {
        self.call_str("clang_getCursorSpelling", &[cursor.arg()])
    }

    /// `clang_Cursor_getSpellingNameRange`.
    pub fn cursor_spelling_name_range(
        &mut self,
        cursor: &Cursor,
        piece_index: u32,
    ) -> Result<SourceRange, HostError> {
        let handle = self.call_u32(
            "clang_Cursor_getSpellingNameRange",
            &[cursor.arg(), Val::I32(piece_index as i32), Val::I32(0)],
        )?;
        Ok(SourceRange::from_wire(handle))
    }

    /// Display name for the entity: the spelling plus additional
    /// disambiguating information such as function parameters
    /// (`clang_getCursorDisplayName`).
    pub fn cursor_display_name(&mut self, cursor: &Cursor) -> Result<String, HostError> {
        self.call_str("clang_getCursorDisplayName", &[cursor.arg()])
    }

    /// The cursor this cursor references, e.g. the declaration a
    /// decl-ref-expr points at (`clang_getCursorReferenced`).
    pub fn cursor_referenced(&mut self, cursor: &Cursor) -> Result<Cursor, HostError> {
        self.cursor_call("clang_getCursorReferenced", &[cursor.arg()])
    }

    /// `clang_getCursorDefinition`.
    pub fn cursor_definition(&mut self, cursor: &Cursor) -> Result<Cursor, HostError> {
        self.cursor_call("clang_getCursorDefinition", &[cursor.arg()])
    }

    /// `clang_isCursorDefinition`.
    pub fn is_cursor_definition(&mut self, cursor: &Cursor) -> Result<bool, HostError> {
        self.call_bool("clang_isCursorDefinition", &[cursor.arg()])
    }

    /// `clang_getCanonicalCursor`.
    pub fn canonical_cursor(&mut self, cursor: &Cursor) -> Result<Cursor, HostError> {
        self.cursor_call("clang_getCanonicalCursor", &[cursor.arg()])
    }

    /// `clang_getCursorReferenceNameRange`.
    pub fn cursor_reference_name_range(
        &mut self,
        cursor: &Cursor,
        flags: NameRefFlags,
        piece_index: u32,
    ) -> Result<SourceRange, HostError> {
        let handle = self.call_u32(
            "clang_getCursorReferenceNameRange",
            &[
                cursor.arg(),
                Val::I32(flags.bits() as i32),
                Val::I32(piece_index as i32),
            ],
        )?;
        Ok(SourceRange::from_wire(handle))
    }

    /// `clang_getCursorKindSpelling`.
    pub fn cursor_kind_spelling(&mut self, kind: CursorKind) -> Result<String, HostError> {
        self.call_str(
            "clang_getCursorKindSpelling",
            &[Val::I32(kind.as_raw() as i32)],
        )
    }

    // -----------------------------------------------------------------
    // Objective-C details
    // -----------------------------------------------------------------

    /// `clang_Cursor_getObjCSelectorIndex`.
    pub fn cursor_objc_selector_index(&mut self, cursor: &Cursor) -> Result<i32, HostError> {
        self.call_i32("clang_Cursor_getObjCSelectorIndex", &[cursor.arg()])
    }

    /// `clang_Cursor_isDynamicCall`.
    pub fn cursor_is_dynamic_call(&mut self, cursor: &Cursor) -> Result<bool, HostError> {
        self.call_bool("clang_Cursor_isDynamicCall", &[cursor.arg()])
    }

    /// `clang_Cursor_getObjCPropertyAttributes`.
    pub fn cursor_objc_property_attributes(
        &mut self,
        cursor: &Cursor,
    ) -> Result<ObjCPropertyAttrKind, HostError> {
        let bits = self.call_u32(
            "clang_Cursor_getObjCPropertyAttributes",
            &[cursor.arg(), Val::I32(0)],
        )?;
        Ok(ObjCPropertyAttrKind::from_bits_retain(bits))
    }

    /// `clang_Cursor_getObjCPropertyGetterName`.
    pub fn cursor_objc_property_getter_name(
        &mut self,
        cursor: &Cursor,
    ) -> Result<String, HostError> {
        self.call_str("clang_Cursor_getObjCPropertyGetterName", &[cursor.arg()])
    }

    /// `clang_Cursor_getObjCPropertySetterName`.
    pub fn cursor_objc_property_setter_name(
        &mut self,
        cursor: &Cursor,
    ) -> Result<String, HostError> {
        self.call_str("clang_Cursor_getObjCPropertySetterName", &[cursor.arg()])
    }

    /// `clang_Cursor_getObjCDeclQualifiers`.
    pub fn cursor_objc_decl_qualifiers(
        &mut self,
        cursor: &Cursor,
    ) -> Result<ObjCDeclQualifier, HostError> {
        let bits = self.call_u32("clang_Cursor_getObjCDeclQualifiers", &[cursor.arg()])?;
        Ok(ObjCDeclQualifier::from_bits_retain(bits))
    }

    /// `clang_Cursor_isObjCOptional`.
    pub fn cursor_is_objc_optional(&mut self, cursor: &Cursor) -> Result<bool, HostError> {
        self.call_bool("clang_Cursor_isObjCOptional", &[cursor.arg()])
    }

    /// `clang_Cursor_isVariadic`.
    pub fn cursor_is_variadic(&mut self, cursor: &Cursor) -> Result<bool, HostError> {
        self.call_bool("clang_Cursor_isVariadic", &[cursor.arg()])
    }

    // -----------------------------------------------------------------
    // Comments and mangling
    // -----------------------------------------------------------------

    /// `clang_Cursor_getCommentRange`.
    pub fn cursor_comment_range(&mut self, cursor: &Cursor) -> Result<SourceRange, HostError> {
        let handle = self.call_u32("clang_Cursor_getCommentRange", &[cursor.arg()])?;
        Ok(SourceRange::from_wire(handle))
    }

    /// `clang_Cursor_getRawCommentText`.
    pub fn cursor_raw_comment_text(&mut self, cursor: &Cursor) -> Result<String, HostError> {
        self.call_str("clang_Cursor_getRawCommentText", &[cursor.arg()])
    }

    /// `clang_Cursor_getBriefCommentText`.
    pub fn cursor_brief_comment_text(&mut self, cursor: &Cursor) -> Result<String, HostError> {
        self.call_str("clang_Cursor_getBriefCommentText", &[cursor.arg()])
    }

    /// `clang_Cursor_getMangling`.
    pub fn cursor_mangling(&mut self, cursor: &Cursor) -> Result<String, HostError> {
        self.call_str("clang_Cursor_getMangling", &[cursor.arg()])
    }

    // -----------------------------------------------------------------
    // C++ introspection
    // -----------------------------------------------------------------

    /// `clang_CXXConstructor_isConvertingConstructor`.
    pub fn cxx_constructor_is_converting(&mut self, cursor: &Cursor) -> Result<bool, HostError> {
        self.call_bool(
            "clang_CXXConstructor_isConvertingConstructor",
            &[cursor.arg()],
        )
    }

    /// `clang_CXXConstructor_isCopyConstructor`.
    pub fn cxx_constructor_is_copy(&mut self, cursor: &Cursor) -> Result<bool, HostError> {
        self.call_bool("clang_CXXConstructor_isCopyConstructor", &[cursor.arg()])
    }

    /// `clang_CXXConstructor_isDefaultConstructor`.
    pub fn cxx_constructor_is_default(&mut self, cursor: &Cursor) -> Result<bool, HostError> {
        self.call_bool("clang_CXXConstructor_isDefaultConstructor", &[cursor.arg()])
    }

    /// `clang_CXXConstructor_isMoveConstructor`.
    pub fn cxx_constructor_is_move(&mut self, cursor: &Cursor) -> Result<bool, HostError> {
        self.call_bool("clang_CXXConstructor_isMoveConstructor", &[cursor.arg()])
    }

    /// `clang_CXXField_isMutable`.
    pub fn cxx_field_is_mutable(&mut self, cursor: &Cursor) -> Result<bool, HostError> {
        self.call_bool("clang_CXXField_isMutable", &[cursor.arg()])
    }

    /// `clang_CXXMethod_isDefaulted`.
    pub fn cxx_method_is_defaulted(&mut self, cursor: &Cursor) -> Result<bool, HostError> {
        self.call_bool("clang_CXXMethod_isDefaulted", &[cursor.arg()])
    }

    /// `clang_CXXMethod_isPureVirtual`.
    pub fn cxx_method_is_pure_virtual(&mut self, cursor: &Cursor) -> Result<bool, HostError> {
        self.call_bool("clang_CXXMethod_isPureVirtual", &[cursor.arg()])
    }

    /// `clang_CXXMethod_isStatic`.
    pub fn cxx_method_is_static(&mut self, cursor: &Cursor) -> Result<bool, HostError> {
        self.call_bool("clang_CXXMethod_isStatic", &[cursor.arg()])
    }

    /// `clang_CXXMethod_isVirtual`.
    pub fn cxx_method_is_virtual(&mut self, cursor: &Cursor) -> Result<bool, HostError> {
        self.call_bool("clang_CXXMethod_isVirtual", &[cursor.arg()])
    }

    /// `clang_CXXMethod_isConst`.
    pub fn cxx_method_is_const(&mut self, cursor: &Cursor) -> Result<bool, HostError> {
        self.call_bool("clang_CXXMethod_isConst", &[cursor.arg()])
    }

    /// `clang_CXXRecord_isAbstract`.
    pub fn cxx_record_is_abstract(&mut self, cursor: &Cursor) -> Result<bool, HostError> {
        self.call_bool("clang_CXXRecord_isAbstract", &[cursor.arg()])
    }

    /// `clang_EnumDecl_isScoped`.
    pub fn enum_decl_is_scoped(&mut self, cursor: &Cursor) -> Result<bool, HostError> {
        self.call_bool("clang_EnumDecl_isScoped", &[cursor.arg()])
    }

    /// Kind of cursor a template specializes to
    /// (`clang_getTemplateCursorKind`).
    pub fn template_cursor_kind(&mut self, cursor: &Cursor) -> Result<CursorKind, HostError> {
        let raw = self.call_u32("clang_getTemplateCursorKind", &[cursor.arg()])?;
        CursorKind::from_raw(raw).ok_or(HostError::InvalidEnumValue {
            what: "cursor kind",
            value: raw as i64,
        })
    }

    /// `clang_getSpecializedCursorTemplate`.
    pub fn specialized_cursor_template(&mut self, cursor: &Cursor) -> Result<Cursor, HostError> {
        self.cursor_call("clang_getSpecializedCursorTemplate", &[cursor.arg()])
    }

    /// `clang_isVirtualBase`.
    pub fn is_virtual_base(&mut self, cursor: &Cursor) -> Result<bool, HostError> {
        self.call_bool("clang_isVirtualBase", &[cursor.arg()])
    }

    /// `clang_getCXXAccessSpecifier`.
    pub fn cxx_access_specifier(&mut self, cursor: &Cursor) -> Result<AccessSpecifier, HostError> {
        let raw = self.call_u32("clang_getCXXAccessSpecifier", &[cursor.arg()])?;
        AccessSpecifier::from_raw(raw).ok_or(HostError::InvalidEnumValue {
            what: "access specifier",
            value: raw as i64,
        })
    }

    /// `clang_Cursor_getStorageClass`.
    pub fn cursor_storage_class(&mut self, cursor: &Cursor) -> Result<StorageClass, HostError> {
        let raw = self.call_u32("clang_Cursor_getStorageClass", &[cursor.arg()])?;
        StorageClass::from_raw(raw).ok_or(HostError::InvalidEnumValue {
            what: "storage class",
            value: raw as i64,
        })
    }

    // -----------------------------------------------------------------
    // Macros, functions, records
    // -----------------------------------------------------------------

    /// `clang_Cursor_isMacroFunctionLike`.
    pub fn cursor_is_macro_function_like(&mut self, cursor: &Cursor) -> Result<bool, HostError> {
        self.call_bool("clang_Cursor_isMacroFunctionLike", &[cursor.arg()])
    }

    /// `clang_Cursor_isMacroBuiltin`.
    pub fn cursor_is_macro_builtin(&mut self, cursor: &Cursor) -> Result<bool, HostError> {
        self.call_bool("clang_Cursor_isMacroBuiltin", &[cursor.arg()])
    }

    /// `clang_Cursor_isFunctionInlined`.
    pub fn cursor_is_function_inlined(&mut self, cursor: &Cursor) -> Result<bool, HostError> {
        self.call_bool("clang_Cursor_isFunctionInlined", &[cursor.arg()])
    }

    /// `clang_Cursor_isAnonymous`.
    pub fn cursor_is_anonymous(&mut self, cursor: &Cursor) -> Result<bool, HostError> {
        self.call_bool("clang_Cursor_isAnonymous", &[cursor.arg()])
    }

    /// `clang_Cursor_isAnonymousRecordDecl`.
    pub fn cursor_is_anonymous_record_decl(&mut self, cursor: &Cursor) -> Result<bool, HostError> {
        self.call_bool("clang_Cursor_isAnonymousRecordDecl", &[cursor.arg()])
    }

    /// `clang_Cursor_isInlineNamespace`.
    pub fn cursor_is_inline_namespace(&mut self, cursor: &Cursor) -> Result<bool, HostError> {
        self.call_bool("clang_Cursor_isInlineNamespace", &[cursor.arg()])
    }

    /// `clang_Cursor_isBitField`.
    pub fn cursor_is_bit_field(&mut self, cursor: &Cursor) -> Result<bool, HostError> {
        self.call_bool("clang_Cursor_isBitField", &[cursor.arg()])
    }

    // -----------------------------------------------------------------
    // Variable declarations
    // -----------------------------------------------------------------

    /// `clang_Cursor_getVarDeclInitializer`.
    pub fn cursor_var_decl_initializer(&mut self, cursor: &Cursor) -> Result<Cursor, HostError> {
        self.cursor_call("clang_Cursor_getVarDeclInitializer", &[cursor.arg()])
    }

    /// `clang_Cursor_hasVarDeclGlobalStorage`.
    pub fn cursor_has_var_decl_global_storage(
        &mut self,
        cursor: &Cursor,
    ) -> Result<bool, HostError> {
        self.call_bool("clang_Cursor_hasVarDeclGlobalStorage", &[cursor.arg()])
    }

    /// `clang_Cursor_hasVarDeclExternalStorage`.
    pub fn cursor_has_var_decl_external_storage(
        &mut self,
        cursor: &Cursor,
    ) -> Result<bool, HostError> {
        self.call_bool("clang_Cursor_hasVarDeclExternalStorage", &[cursor.arg()])
    }
}
