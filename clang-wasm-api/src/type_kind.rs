//! Kinds of types exposed by the wrapped library.
//!
//! Builtin types occupy the 0..=40 block; derived and compound types
//! start at 100 and run consecutively through the OpenCL image kinds.

use crate::wire::wire_enum;

wire_enum! {
    /// The kind of an element in the abstract syntax tree.
    pub enum TypeKind : u32 {
        /// Represents an invalid type (e.g., where no type is
        /// available).
        Invalid = 0,
        /// A type whose specific kind is not exposed via this
        /// interface.
        Unexposed,
        Void,
        Bool,
        CharU,
        UChar,
        Char16,
        Char32,
        UShort,
        UInt,
        ULong,
        ULongLong,
        UInt128,
        CharS,
        SChar,
        WChar,
        Short,
        Int,
        Long,
        LongLong,
        Int128,
        Float,
        Double,
        LongDouble,
        NullPtr,
        Overload,
        Dependent,
        ObjCId,
        ObjCClass,
        ObjCSel,
        Float128,
        Half,
        Float16,
        ShortAccum,
        Accum,
        LongAccum,
        UShortAccum,
        UAccum,
        ULongAccum,
        BFloat16,
        Ibm128,

        Complex = 100,
        Pointer,
        BlockPointer,
        LValueReference,
        RValueReference,
        Record,
        Enum,
        Typedef,
        ObjCInterface,
        ObjCObjectPointer,
        FunctionNoProto,
        FunctionProto,
        ConstantArray,
        Vector,
        IncompleteArray,
        VariableArray,
        DependentSizedArray,
        MemberPointer,
        Auto,
        /// Represents a type that was referred to using an elaborated
        /// type keyword, e.g. struct S, or via a qualified name.
        Elaborated,
        Pipe,
        OclImage1dRO,
        OclImage1dArrayRO,
        OclImage1dBufferRO,
        OclImage2dRO,
        OclImage2dArrayRO,
        OclImage2dDepthRO,
        OclImage2dArrayDepthRO,
        OclImage2dMsaaRO,
        OclImage2dArrayMsaaRO,
        OclImage2dMsaaDepthRO,
        OclImage2dArrayMsaaDepthRO,
        OclImage3dRO,
        OclImage1dWO,
        OclImage1dArrayWO,
        OclImage1dBufferWO,
        OclImage2dWO,
        OclImage2dArrayWO,
        OclImage2dDepthWO,
        OclImage2dArrayDepthWO,
        OclImage2dMsaaWO,
        OclImage2dArrayMsaaWO,
        OclImage2dMsaaDepthWO,
        OclImage2dArrayMsaaDepthWO,
        OclImage3dWO,
        OclImage1dRW,
        OclImage1dArrayRW,
        OclImage1dBufferRW,
        OclImage2dRW,
        OclImage2dArrayRW,
        OclImage2dDepthRW,
        OclImage2dArrayDepthRW,
        OclImage2dMsaaRW,
        OclImage2dArrayMsaaRW,
        OclImage2dMsaaDepthRW,
        OclImage2dArrayMsaaDepthRW,
        OclImage3dRW,
        OclSampler,
        OclEvent,
        OclQueue,
        OclReserveId,
        ObjCObject,
        ObjCTypeParam,
        Attributed,
        OclIntelSubgroupAvcMcePayload,
        OclIntelSubgroupAvcImePayload,
        OclIntelSubgroupAvcRefPayload,
        OclIntelSubgroupAvcSicPayload,
        OclIntelSubgroupAvcMceResult,
        OclIntelSubgroupAvcImeResult,
        OclIntelSubgroupAvcRefResult,
        OclIntelSubgroupAvcSicResult,
        OclIntelSubgroupAvcImeResultSingleRefStreamout,
        OclIntelSubgroupAvcImeResultDualRefStreamout,
        OclIntelSubgroupAvcImeSingleRefStreamin,
        OclIntelSubgroupAvcImeDualRefStreamin,
        ExtVector,
        Atomic,
    }
}

impl TypeKind {
    pub const FIRST_BUILTIN: TypeKind = TypeKind::Void;
    pub const LAST_BUILTIN: TypeKind = TypeKind::Ibm128;

    /// Whether this kind is one of the builtin types.
    pub fn is_builtin(self) -> bool {
        (Self::FIRST_BUILTIN.as_raw()..=Self::LAST_BUILTIN.as_raw()).contains(&self.as_raw())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_block_matches_upstream_numbering() {
        assert_eq!(TypeKind::Invalid.as_raw(), 0);
        assert_eq!(TypeKind::Void.as_raw(), 2);
        assert_eq!(TypeKind::Ibm128.as_raw(), 40);
        assert_eq!(TypeKind::Complex.as_raw(), 100);
        assert_eq!(TypeKind::Elaborated.as_raw(), 119);
        assert_eq!(TypeKind::OclImage1dRO.as_raw(), 121);
        assert_eq!(TypeKind::ExtVector.as_raw(), 176);
        assert_eq!(TypeKind::Atomic.as_raw(), 177);
    }

    #[test]
    fn builtin_predicate_covers_only_the_builtin_block() {
        assert!(TypeKind::Int.is_builtin());
        assert!(TypeKind::BFloat16.is_builtin());
        assert!(!TypeKind::Invalid.is_builtin());
        assert!(!TypeKind::Pointer.is_builtin());
    }

    #[test]
    fn unknown_values_decode_to_none() {
        assert_eq!(TypeKind::from_raw(41), None);
        assert_eq!(TypeKind::from_raw(99), None);
        assert_eq!(TypeKind::from_raw(500), None);
        assert_eq!(TypeKind::from_raw(TypeKind::Record.as_raw()), Some(TypeKind::Record));
    }
}
