//! Type information for cursors.
//!
//! The upstream API exposes the kind of a type as a struct field; on
//! this wire it is fetched through the shim's `cw_type_kind` export
//! when the type value first crosses to the host.

use wasmi::Val;

use clang_wasm_api::functions::SHIM_TYPE_KIND;
use clang_wasm_api::{
    CallingConv, NullabilityKind, RawHandle, RefQualifierKind, TemplateArgumentKind,
    TypeKind, TypeLayoutError,
};

use crate::cursor::Cursor;
use crate::error::HostError;
use crate::runtime::{LibClang, TempAllocs};

/// The type of an element in the abstract syntax tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CxType {
    handle: RawHandle,
    kind: TypeKind,
}

impl CxType {
    pub fn handle(&self) -> RawHandle {
        self.handle
    }

    /// The kind captured when this type value crossed the wire.
    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    /// Whether this is the invalid type the wrapped library uses where
    /// no type is available.
    pub fn is_invalid(&self) -> bool {
        self.kind == TypeKind::Invalid
    }

    pub(crate) fn arg(&self) -> Val {
        Val::I32(self.handle.0 as i32)
    }
}

impl LibClang {
    pub(crate) fn decode_type(&mut self, handle: u32) -> Result<CxType, HostError> {
        let raw = self.call_u32(SHIM_TYPE_KIND, &[Val::I32(handle as i32)])?;
        let kind = TypeKind::from_raw(raw).ok_or(HostError::InvalidEnumValue {
            what: "type kind",
            value: raw as i64,
        })?;
        Ok(CxType {
            handle: RawHandle(handle),
            kind,
        })
    }

    fn type_call(&mut self, name: &'static str, args: &[Val]) -> Result<CxType, HostError> {
        let handle = self.call_u32(name, args)?;
        self.decode_type(handle)
    }

    /// Maps a layout query result, where negative values encode
    /// [`TypeLayoutError`]s.
    fn layout(&mut self, name: &'static str, args: &[Val]) -> Result<u64, HostError> {
        let value = self.call_i64(name, args)?;
        if value < 0 {
            let error =
                TypeLayoutError::from_raw(value as i32).ok_or(HostError::InvalidEnumValue {
                    what: "type layout error",
                    value,
                })?;
            return Err(HostError::Layout(error));
        }
        Ok(value as u64)
    }

    /// The type of the entity at a cursor (`clang_getCursorType`).
    pub fn cursor_type(&mut self, cursor: &Cursor) -> Result<CxType, HostError> {
        self.type_call("clang_getCursorType", &[cursor.arg()])
    }

    /// `clang_getTypeSpelling`.
    pub fn type_spelling(&mut self, ty: &CxType) -> Result<String, HostError> {
        self.call_str("clang_getTypeSpelling", &[ty.arg()])
    }

    /// `clang_getTypeKindSpelling`.
    pub fn type_kind_spelling(&mut self, kind: TypeKind) -> Result<String, HostError> {
        self.call_str("clang_getTypeKindSpelling", &[Val::I32(kind.as_raw() as i32)])
    }

    /// `clang_getTypedefDeclUnderlyingType`.
    pub fn typedef_decl_underlying_type(&mut self, cursor: &Cursor) -> Result<CxType, HostError> {
        self.type_call("clang_getTypedefDeclUnderlyingType", &[cursor.arg()])
    }

    /// `clang_getEnumDeclIntegerType`.
    pub fn enum_decl_integer_type(&mut self, cursor: &Cursor) -> Result<CxType, HostError> {
        self.type_call("clang_getEnumDeclIntegerType", &[cursor.arg()])
    }

    /// `clang_getEnumConstantDeclValue`.
    pub fn enum_constant_decl_value(&mut self, cursor: &Cursor) -> Result<i64, HostError> {
        self.call_i64("clang_getEnumConstantDeclValue", &[cursor.arg()])
    }

    /// `clang_getEnumConstantDeclUnsignedValue`.
    pub fn enum_constant_decl_unsigned_value(
        &mut self,
        cursor: &Cursor,
    ) -> Result<u64, HostError> {
        self.call_i64("clang_getEnumConstantDeclUnsignedValue", &[cursor.arg()])
            .map(|v| v as u64)
    }

    /// Bit width of a bit-field declaration (`clang_getFieldDeclBitWidth`),
    /// `None` when the cursor is not a bit-field or the width is
    /// value-dependent.
    pub fn field_decl_bit_width(&mut self, cursor: &Cursor) -> Result<Option<u32>, HostError> {
        let width = self.call_i32("clang_getFieldDeclBitWidth", &[cursor.arg()])?;
        Ok((width >= 0).then_some(width as u32))
    }

    /// Number of non-variadic arguments of a function/method cursor
    /// (`clang_Cursor_getNumArguments`), `None` for other cursors.
    pub fn cursor_num_arguments(&mut self, cursor: &Cursor) -> Result<Option<u32>, HostError> {
        let count = self.call_i32("clang_Cursor_getNumArguments", &[cursor.arg()])?;
        Ok((count >= 0).then_some(count as u32))
    }

    /// `clang_Cursor_getArgument`.
    pub fn cursor_argument(&mut self, cursor: &Cursor, index: u32) -> Result<Cursor, HostError> {
        let handle = self.call_u32(
            "clang_Cursor_getArgument",
            &[cursor.arg(), Val::I32(index as i32)],
        )?;
        self.decode_cursor(handle)
    }

    /// `clang_Cursor_getNumTemplateArguments`.
    pub fn cursor_num_template_arguments(
        &mut self,
        cursor: &Cursor,
    ) -> Result<Option<u32>, HostError> {
        let count = self.call_i32("clang_Cursor_getNumTemplateArguments", &[cursor.arg()])?;
        Ok((count >= 0).then_some(count as u32))
    }

    /// `clang_Cursor_getTemplateArgumentKind`.
    pub fn cursor_template_argument_kind(
        &mut self,
        cursor: &Cursor,
        index: u32,
    ) -> Result<TemplateArgumentKind, HostError> {
        let raw = self.call_u32(
            "clang_Cursor_getTemplateArgumentKind",
            &[cursor.arg(), Val::I32(index as i32)],
        )?;
        TemplateArgumentKind::from_raw(raw).ok_or(HostError::InvalidEnumValue {
            what: "template argument kind",
            value: raw as i64,
        })
    }

    /// `clang_Cursor_getTemplateArgumentType`.
    pub fn cursor_template_argument_type(
        &mut self,
        cursor: &Cursor,
        index: u32,
    ) -> Result<CxType, HostError> {
        self.type_call(
            "clang_Cursor_getTemplateArgumentType",
            &[cursor.arg(), Val::I32(index as i32)],
        )
    }

    /// `clang_Cursor_getTemplateArgumentValue`.
    pub fn cursor_template_argument_value(
        &mut self,
        cursor: &Cursor,
        index: u32,
    ) -> Result<i64, HostError> {
        self.call_i64(
            "clang_Cursor_getTemplateArgumentValue",
            &[cursor.arg(), Val::I32(index as i32)],
        )
    }

    /// `clang_Cursor_getTemplateArgumentUnsignedValue`.
    pub fn cursor_template_argument_unsigned_value(
        &mut self,
        cursor: &Cursor,
        index: u32,
    ) -> Result<u64, HostError> {
        self.call_i64(
            "clang_Cursor_getTemplateArgumentUnsignedValue",
            &[cursor.arg(), Val::I32(index as i32)],
        )
        .map(|v| v as u64)
    }

    /// `clang_equalTypes`.
    pub fn equal_types(&mut self, a: &CxType, b: &CxType) -> Result<bool, HostError> {
        self.call_bool("clang_equalTypes", &[a.arg(), b.arg()])
    }

    /// `clang_getCanonicalType`.
    pub fn canonical_type(&mut self, ty: &CxType) -> Result<CxType, HostError> {
        self.type_call("clang_getCanonicalType", &[ty.arg()])
    }

    /// `clang_isConstQualifiedType`.
    pub fn is_const_qualified_type(&mut self, ty: &CxType) -> Result<bool, HostError> {
        self.call_bool("clang_isConstQualifiedType", &[ty.arg()])
    }

    /// `clang_isVolatileQualifiedType`.
    pub fn is_volatile_qualified_type(&mut self, ty: &CxType) -> Result<bool, HostError> {
        self.call_bool("clang_isVolatileQualifiedType", &[ty.arg()])
    }

    /// `clang_isRestrictQualifiedType`.
    pub fn is_restrict_qualified_type(&mut self, ty: &CxType) -> Result<bool, HostError> {
        self.call_bool("clang_isRestrictQualifiedType", &[ty.arg()])
    }

    /// `clang_getAddressSpace`.
    pub fn address_space(&mut self, ty: &CxType) -> Result<u32, HostError> {
        self.call_u32("clang_getAddressSpace", &[ty.arg()])
    }

    /// `clang_getTypedefName`.
    pub fn typedef_name(&mut self, ty: &CxType) -> Result<String, HostError> {
        self.call_str("clang_getTypedefName", &[ty.arg()])
    }

    /// `clang_getPointeeType`.
    pub fn pointee_type(&mut self, ty: &CxType) -> Result<CxType, HostError> {
        self.type_call("clang_getPointeeType", &[ty.arg()])
    }

    /// The cursor for a type's declaration
    /// (`clang_getTypeDeclaration`).
    pub fn type_declaration(&mut self, ty: &CxType) -> Result<Cursor, HostError> {
        let handle = self.call_u32("clang_getTypeDeclaration", &[ty.arg()])?;
        self.decode_cursor(handle)
    }

    /// `clang_getDeclObjCTypeEncoding`.
    pub fn decl_objc_type_encoding(&mut self, cursor: &Cursor) -> Result<String, HostError> {
        self.call_str("clang_getDeclObjCTypeEncoding", &[cursor.arg()])
    }

    /// `clang_Type_getObjCEncoding`.
    pub fn type_objc_encoding(&mut self, ty: &CxType) -> Result<String, HostError> {
        self.call_str("clang_Type_getObjCEncoding", &[ty.arg()])
    }

    /// `clang_getFunctionTypeCallingConv`.
    pub fn function_type_calling_conv(&mut self, ty: &CxType) -> Result<CallingConv, HostError> {
        let raw = self.call_u32("clang_getFunctionTypeCallingConv", &[ty.arg()])?;
        CallingConv::from_raw(raw).ok_or(HostError::InvalidEnumValue {
            what: "calling convention",
            value: raw as i64,
        })
    }

    /// `clang_getResultType`.
    pub fn result_type(&mut self, ty: &CxType) -> Result<CxType, HostError> {
        self.type_call("clang_getResultType", &[ty.arg()])
    }

    /// `clang_getExceptionSpecificationType`. Negative values mean the
    /// type is not a function type.
    pub fn exception_specification_type(&mut self, ty: &CxType) -> Result<i32, HostError> {
        self.call_i32("clang_getExceptionSpecificationType", &[ty.arg()])
    }

    /// `clang_getNumArgTypes`, `None` for non-function types.
    pub fn num_arg_types(&mut self, ty: &CxType) -> Result<Option<u32>, HostError> {
        let count = self.call_i32("clang_getNumArgTypes", &[ty.arg()])?;
        Ok((count >= 0).then_some(count as u32))
    }

    /// `clang_getArgType`.
    pub fn arg_type(&mut self, ty: &CxType, index: u32) -> Result<CxType, HostError> {
        self.type_call("clang_getArgType", &[ty.arg(), Val::I32(index as i32)])
    }

    /// `clang_Type_getObjCObjectBaseType`.
    pub fn type_objc_object_base_type(&mut self, ty: &CxType) -> Result<CxType, HostError> {
        self.type_call("clang_Type_getObjCObjectBaseType", &[ty.arg()])
    }

    /// `clang_Type_getNumObjCProtocolRefs`.
    pub fn type_num_objc_protocol_refs(&mut self, ty: &CxType) -> Result<u32, HostError> {
        self.call_u32("clang_Type_getNumObjCProtocolRefs", &[ty.arg()])
    }

    /// `clang_Type_getObjCProtocolDecl`.
    pub fn type_objc_protocol_decl(
        &mut self,
        ty: &CxType,
        index: u32,
    ) -> Result<Cursor, HostError> {
        let handle = self.call_u32(
            "clang_Type_getObjCProtocolDecl",
            &[ty.arg(), Val::I32(index as i32)],
        )?;
        self.decode_cursor(handle)
    }

    /// `clang_Type_getNumObjCTypeArgs`.
    pub fn type_num_objc_type_args(&mut self, ty: &CxType) -> Result<u32, HostError> {
        self.call_u32("clang_Type_getNumObjCTypeArgs", &[ty.arg()])
    }

    /// `clang_Type_getObjCTypeArg`.
    pub fn type_objc_type_arg(&mut self, ty: &CxType, index: u32) -> Result<CxType, HostError> {
        self.type_call("clang_Type_getObjCTypeArg", &[ty.arg(), Val::I32(index as i32)])
    }

    /// `clang_isFunctionTypeVariadic`.
    pub fn is_function_type_variadic(&mut self, ty: &CxType) -> Result<bool, HostError> {
        self.call_bool("clang_isFunctionTypeVariadic", &[ty.arg()])
    }

    /// `clang_getCursorResultType`.
    pub fn cursor_result_type(&mut self, cursor: &Cursor) -> Result<CxType, HostError> {
        self.type_call("clang_getCursorResultType", &[cursor.arg()])
    }

    /// `clang_getCursorExceptionSpecificationType`.
    pub fn cursor_exception_specification_type(
        &mut self,
        cursor: &Cursor,
    ) -> Result<i32, HostError> {
        self.call_i32("clang_getCursorExceptionSpecificationType", &[cursor.arg()])
    }

    /// `clang_isPODType`.
    pub fn is_pod_type(&mut self, ty: &CxType) -> Result<bool, HostError> {
        self.call_bool("clang_isPODType", &[ty.arg()])
    }

    /// `clang_getElementType`.
    pub fn element_type(&mut self, ty: &CxType) -> Result<CxType, HostError> {
        self.type_call("clang_getElementType", &[ty.arg()])
    }

    /// `clang_getNumElements`, `None` when the type has no element
    /// count.
    pub fn num_elements(&mut self, ty: &CxType) -> Result<Option<u64>, HostError> {
        let count = self.call_i64("clang_getNumElements", &[ty.arg()])?;
        Ok((count >= 0).then_some(count as u64))
    }

    /// `clang_getArrayElementType`.
    pub fn array_element_type(&mut self, ty: &CxType) -> Result<CxType, HostError> {
        self.type_call("clang_getArrayElementType", &[ty.arg()])
    }

    /// `clang_getArraySize`, `None` for non-array types.
    pub fn array_size(&mut self, ty: &CxType) -> Result<Option<u64>, HostError> {
        let size = self.call_i64("clang_getArraySize", &[ty.arg()])?;
        Ok((size >= 0).then_some(size as u64))
    }

    /// The type named by an elaborated type (`clang_Type_getNamedType`).
    pub fn type_named_type(&mut self, ty: &CxType) -> Result<CxType, HostError> {
        self.type_call("clang_Type_getNamedType", &[ty.arg()])
    }

    /// `clang_Type_isTransparentTagTypedef`.
    pub fn type_is_transparent_tag_typedef(&mut self, ty: &CxType) -> Result<bool, HostError> {
        self.call_bool("clang_Type_isTransparentTagTypedef", &[ty.arg()])
    }

    /// `clang_Type_getNullability`.
    pub fn type_nullability(&mut self, ty: &CxType) -> Result<NullabilityKind, HostError> {
        let raw = self.call_u32("clang_Type_getNullability", &[ty.arg()])?;
        NullabilityKind::from_raw(raw).ok_or(HostError::InvalidEnumValue {
            what: "nullability kind",
            value: raw as i64,
        })
    }

    /// Alignment in bytes (`clang_Type_getAlignOf`); layout failures
    /// surface as [`HostError::Layout`].
    pub fn type_align_of(&mut self, ty: &CxType) -> Result<u64, HostError> {
        self.layout("clang_Type_getAlignOf", &[ty.arg()])
    }

    /// Class of a member-pointer type (`clang_Type_getClassType`).
    pub fn type_class_type(&mut self, ty: &CxType) -> Result<CxType, HostError> {
        self.type_call("clang_Type_getClassType", &[ty.arg()])
    }

    /// Size in bytes (`clang_Type_getSizeOf`); layout failures surface
    /// as [`HostError::Layout`].
    pub fn type_size_of(&mut self, ty: &CxType) -> Result<u64, HostError> {
        self.layout("clang_Type_getSizeOf", &[ty.arg()])
    }

    /// Offset of a named field in bits (`clang_Type_getOffsetOf`);
    /// layout failures surface as [`HostError::Layout`].
    pub fn type_offset_of(&mut self, ty: &CxType, field: &str) -> Result<u64, HostError> {
        let mut allocs = TempAllocs::new();
        let (ptr, len) = self.write_string(field, &mut allocs)?;
        let result = self.layout(
            "clang_Type_getOffsetOf",
            &[ty.arg(), Val::I32(ptr as i32), Val::I32(len as i32)],
        );
        self.release(allocs)?;
        result
    }

    /// `clang_Type_getModifiedType`.
    pub fn type_modified_type(&mut self, ty: &CxType) -> Result<CxType, HostError> {
        self.type_call("clang_Type_getModifiedType", &[ty.arg()])
    }

    /// Underlying type of an atomic type (`clang_Type_getValueType`).
    pub fn type_value_type(&mut self, ty: &CxType) -> Result<CxType, HostError> {
        self.type_call("clang_Type_getValueType", &[ty.arg()])
    }

    /// Offset of a field cursor in bits
    /// (`clang_Cursor_getOffsetOfField`); layout failures surface as
    /// [`HostError::Layout`].
    pub fn cursor_offset_of_field(&mut self, cursor: &Cursor) -> Result<u64, HostError> {
        self.layout("clang_Cursor_getOffsetOfField", &[cursor.arg()])
    }

    /// `clang_Type_getNumTemplateArguments`, `None` for non-specialized
    /// types.
    pub fn type_num_template_arguments(&mut self, ty: &CxType) -> Result<Option<u32>, HostError> {
        let count = self.call_i32("clang_Type_getNumTemplateArguments", &[ty.arg()])?;
        Ok((count >= 0).then_some(count as u32))
    }

    /// `clang_Type_getTemplateArgumentAsType`.
    pub fn type_template_argument_as_type(
        &mut self,
        ty: &CxType,
        index: u32,
    ) -> Result<CxType, HostError> {
        self.type_call(
            "clang_Type_getTemplateArgumentAsType",
            &[ty.arg(), Val::I32(index as i32)],
        )
    }

    /// `clang_Type_getCXXRefQualifier`.
    pub fn type_cxx_ref_qualifier(&mut self, ty: &CxType) -> Result<RefQualifierKind, HostError> {
        let raw = self.call_u32("clang_Type_getCXXRefQualifier", &[ty.arg()])?;
        RefQualifierKind::from_raw(raw).ok_or(HostError::InvalidEnumValue {
            what: "ref qualifier",
            value: raw as i64,
        })
    }

    /// Receiver type of an Objective-C message expression
    /// (`clang_Cursor_getReceiverType`).
    pub fn cursor_receiver_type(&mut self, cursor: &Cursor) -> Result<CxType, HostError> {
        self.type_call("clang_Cursor_getReceiverType", &[cursor.arg()])
    }

    /// Collection element type of an IBOutletCollection attribute
    /// (`clang_getIBOutletCollectionType`).
    pub fn ib_outlet_collection_type(&mut self, cursor: &Cursor) -> Result<CxType, HostError> {
        self.type_call("clang_getIBOutletCollectionType", &[cursor.arg()])
    }
}
