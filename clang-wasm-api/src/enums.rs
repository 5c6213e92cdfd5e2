//! The smaller enumerations of the wrapped API surface.

use crate::wire::wire_enum;

wire_enum! {
    /// Return value of a child-visitor callback, directing how the
    /// traversal of the children of a particular cursor proceeds.
    pub enum ChildVisitResult : u32 {
        /// Terminates the cursor traversal.
        Break = 0,
        /// Continues the cursor traversal with the next sibling of the
        /// cursor just visited, without visiting its children.
        Continue,
        /// Recursively traverse the children of this cursor, using the
        /// same visitor and client data.
        Recurse,
    }
}

wire_enum! {
    /// Describes the severity of a particular diagnostic.
    pub enum DiagnosticSeverity : u32 {
        /// A diagnostic that has been suppressed, e.g., by a
        /// command-line option.
        Ignored = 0,
        /// This diagnostic is a note that should be attached to the
        /// previous (non-note) diagnostic.
        Note,
        /// This diagnostic indicates suspicious code that may not be
        /// wrong.
        Warning,
        /// This diagnostic indicates that the code is ill-formed.
        Error,
        /// This diagnostic indicates that the code is ill-formed such
        /// that future parser recovery is unlikely to produce useful
        /// results.
        Fatal,
    }
}

wire_enum! {
    /// Describes the kind of error that occurred (if any) in a call to
    /// load a serialized diagnostics bitcode file.
    pub enum LoadDiagError : u32 {
        /// Indicates that no error occurred.
        None = 0,
        /// Indicates that an unknown error occurred while attempting to
        /// deserialize diagnostics.
        Unknown,
        /// Indicates that the file containing the serialized
        /// diagnostics could not be opened.
        CannotLoad,
        /// Indicates that the serialized diagnostics file is invalid or
        /// corrupt.
        InvalidFile,
    }
}

wire_enum! {
    /// Describes the kind of error that occurred (if any) in a call to
    /// save a translation unit.
    pub enum SaveError : u32 {
        /// Indicates that no error occurred while saving a translation
        /// unit.
        None = 0,
        /// Indicates that an unknown error occurred while attempting to
        /// save the file.
        Unknown,
        /// Indicates that errors during translation prevented this
        /// attempt to save the translation unit.
        TranslationErrors,
        /// Indicates that the translation unit to be saved was somehow
        /// invalid.
        InvalidTu,
    }
}

wire_enum! {
    /// Describes a kind of token.
    pub enum TokenKind : u32 {
        /// A token that contains some kind of punctuation.
        Punctuation = 0,
        /// A language keyword.
        Keyword,
        /// An identifier (that is not a keyword).
        Identifier,
        /// A numeric, string, or character literal.
        Literal,
        /// A comment.
        Comment,
    }
}

wire_enum! {
    /// Describes the linkage of the entity referred to by a cursor.
    pub enum LinkageKind : u32 {
        /// This value indicates that no linkage information is
        /// available for a provided cursor.
        Invalid = 0,
        /// This is the linkage for variables, parameters, and so on
        /// that have automatic storage.
        NoLinkage,
        /// This is the linkage for static variables and static
        /// functions.
        Internal,
        /// This is the linkage for entities with external linkage that
        /// live in C++ anonymous namespaces.
        UniqueExternal,
        /// This is the linkage for entities with true external linkage.
        External,
    }
}

wire_enum! {
    /// Describes the visibility of the entity referred to by a cursor.
    pub enum VisibilityKind : u32 {
        /// This value indicates that no visibility information is
        /// available for a provided cursor.
        Invalid = 0,
        /// Symbol not seen by the linker.
        Hidden,
        /// Symbol seen by the linker but resolves to a symbol inside
        /// this object.
        Protected,
        /// Symbol seen by the linker and acts like a normal symbol.
        Default,
    }
}

wire_enum! {
    /// Describes the availability of a particular entity, which
    /// indicates whether the use of this entity will result in a
    /// warning or error due to it being deprecated or unavailable.
    pub enum AvailabilityKind : u32 {
        /// The entity is available.
        Available = 0,
        /// The entity is available, but has been deprecated (and its
        /// use is not recommended).
        Deprecated,
        /// The entity is not available; any use of it will be an error.
        NotAvailable,
        /// The entity is available, but not accessible; any use of it
        /// will be an error.
        NotAccessible,
    }
}

wire_enum! {
    /// Describes the "language" of the entity referred to by a cursor.
    pub enum LanguageKind : u32 {
        Invalid = 0,
        C,
        ObjC,
        CPlusPlus,
    }
}

wire_enum! {
    /// Describes the "thread-local storage (TLS) kind" of the
    /// declaration referred to by a cursor.
    pub enum TlsKind : u32 {
        None = 0,
        Dynamic,
        Static,
    }
}

wire_enum! {
    /// Describes the calling convention of a function type.
    pub enum CallingConv : u32 {
        Default = 0,
        C,
        X86StdCall,
        X86FastCall,
        X86ThisCall,
        X86Pascal,
        Aapcs,
        AapcsVfp,
        X86RegCall,
        IntelOclBicc,
        Win64,
        X86_64SysV,
        X86VectorCall,
        Swift,
        PreserveMost,
        PreserveAll,
        AArch64VectorCall,
        SwiftAsync,
        AArch64SvePcs,

        Invalid = 100,
        Unexposed = 200,
    }
}

impl CallingConv {
    /// Upstream spelling alias for [`CallingConv::Win64`].
    pub const X86_64_WIN64: CallingConv = CallingConv::Win64;
}

wire_enum! {
    /// Describes the kind of a template argument.
    pub enum TemplateArgumentKind : u32 {
        Null = 0,
        Type,
        Declaration,
        NullPtr,
        Integral,
        Template,
        TemplateExpansion,
        Expression,
        Pack,
        /// Indicates an error case, preventing the kind from being
        /// deduced.
        Invalid,
    }
}

wire_enum! {
    /// Represents the C++ access control level to a base class for a
    /// cursor.
    pub enum AccessSpecifier : u32 {
        Invalid = 0,
        Public,
        Protected,
        Private,
    }
}

wire_enum! {
    /// Represents the storage classes as declared in the source.
    pub enum StorageClass : u32 {
        /// This value indicates that the cursor is not a declaration.
        Invalid = 0,
        None,
        Extern,
        Static,
        PrivateExtern,
        OpenClWorkGroupLocal,
        Auto,
        Register,
    }
}

wire_enum! {
    /// The ref-qualifier of a function or method type.
    pub enum RefQualifierKind : u32 {
        /// No ref-qualifier was provided.
        None = 0,
        /// An lvalue ref-qualifier was provided (`&`).
        LValue,
        /// An rvalue ref-qualifier was provided (`&&`).
        RValue,
    }
}

wire_enum! {
    /// The nullability kind of a pointer type.
    pub enum NullabilityKind : u32 {
        /// Values of this type can never be null.
        NonNull = 0,
        /// Values of this type can be null.
        Nullable,
        /// Whether values of this type can be null is (explicitly)
        /// unspecified.
        Unspecified,
        /// Nullability is not applicable to this type.
        Invalid,
        /// Generally behaves like Nullable, except when used in a block
        /// parameter that was imported into a swift async method.
        NullableResult,
    }
}

wire_enum! {
    /// Error codes for the type layout queries.
    ///
    /// A value of this enum type can be returned if the target type is
    /// not a valid argument to sizeof, alignof or offsetof.
    pub enum TypeLayoutError : i32 {
        /// Type is of kind [`crate::TypeKind::Invalid`].
        Invalid = -1,
        /// The type is an incomplete type.
        Incomplete = -2,
        /// The type is a dependent type.
        Dependent = -3,
        /// The type is not a constant size type.
        NotConstantSize = -4,
        /// The field name is not valid for this record.
        InvalidFieldName = -5,
        /// The type is undeduced.
        Undeduced = -6,
    }
}

wire_enum! {
    /// Categorizes how memory is being used by a translation unit.
    pub enum TuResourceUsageKind : u32 {
        Ast = 1,
        Identifiers,
        Selectors,
        GlobalCompletionResults,
        SourceManagerContentCache,
        AstSideTables,
        SourceManagerMembufferMalloc,
        SourceManagerMembufferMmap,
        ExternalAstSourceMembufferMalloc,
        ExternalAstSourceMembufferMmap,
        Preprocessor,
        PreprocessingRecord,
        SourceManagerDataStructures,
        PreprocessorHeaderSearch,
    }
}

impl TuResourceUsageKind {
    pub const MEMORY_IN_BYTES_BEGIN: TuResourceUsageKind = TuResourceUsageKind::Ast;
    pub const MEMORY_IN_BYTES_END: TuResourceUsageKind =
        TuResourceUsageKind::PreprocessorHeaderSearch;
    pub const FIRST: TuResourceUsageKind = TuResourceUsageKind::Ast;
    pub const LAST: TuResourceUsageKind = TuResourceUsageKind::PreprocessorHeaderSearch;
}

wire_enum! {
    /// Properties for the printing policy.
    ///
    /// See the upstream documentation of `clang::PrintingPolicy` for
    /// more information.
    pub enum PrintingPolicyProperty : u32 {
        Indentation = 0,
        SuppressSpecifiers,
        SuppressTagKeyword,
        IncludeTagDefinition,
        SuppressScope,
        SuppressUnwrittenScope,
        SuppressInitializers,
        ConstantArraySizeAsWritten,
        AnonymousTagLocations,
        SuppressStrongLifetime,
        SuppressLifetimeQualifiers,
        SuppressTemplateArgsInCxxConstructors,
        Bool,
        Restrict,
        Alignof,
        UnderscoreAlignof,
        UseVoidForZeroParams,
        TerseOutput,
        PolishForDeclaration,
        Half,
        MsWChar,
        IncludeNewlines,
        MsvcFormatting,
        ConstantsAsWritten,
        SuppressImplicitBase,
        FullyQualifiedName,
    }
}

impl PrintingPolicyProperty {
    pub const LAST_PROPERTY: PrintingPolicyProperty = PrintingPolicyProperty::FullyQualifiedName;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_round_trips() {
        assert_eq!(
            DiagnosticSeverity::from_raw(3),
            Some(DiagnosticSeverity::Error)
        );
        assert_eq!(DiagnosticSeverity::from_raw(5), None);
    }

    #[test]
    fn calling_convention_sentinels() {
        assert_eq!(CallingConv::AArch64SvePcs.as_raw(), 18);
        assert_eq!(CallingConv::from_raw(100), Some(CallingConv::Invalid));
        assert_eq!(CallingConv::from_raw(200), Some(CallingConv::Unexposed));
        assert_eq!(CallingConv::from_raw(19), None);
        assert_eq!(CallingConv::X86_64_WIN64, CallingConv::Win64);
    }

    #[test]
    fn layout_errors_are_negative() {
        assert_eq!(TypeLayoutError::from_raw(-2), Some(TypeLayoutError::Incomplete));
        assert_eq!(TypeLayoutError::from_raw(0), None);
        assert_eq!(TypeLayoutError::Undeduced.as_raw(), -6);
    }

    #[test]
    fn resource_usage_kinds_start_at_one() {
        assert_eq!(TuResourceUsageKind::Ast.as_raw(), 1);
        assert_eq!(TuResourceUsageKind::from_raw(0), None);
        assert_eq!(TuResourceUsageKind::LAST.as_raw(), 14);
    }

    #[test]
    fn printing_policy_properties_are_consecutive() {
        assert_eq!(PrintingPolicyProperty::Indentation.as_raw(), 0);
        assert_eq!(PrintingPolicyProperty::LAST_PROPERTY.as_raw(), 25);
    }
}
