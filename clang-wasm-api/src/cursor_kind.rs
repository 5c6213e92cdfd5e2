//! Kinds of AST cursors exposed by the wrapped library.
//!
//! The discriminants follow the upstream header's blocked numbering:
//! declarations start at 1, references at 40, invalids at 70,
//! expressions at 100, statements at 200, the translation unit marker
//! sits at 350, attributes at 400, preprocessing entities at 500,
//! extra declarations at 600 and the overload candidate at 700.
//! Within a block the values are consecutive, so only the block
//! anchors carry explicit discriminants below.

use crate::wire::wire_enum;

wire_enum! {
    /// Describes the kind of entity that a cursor refers to.
    pub enum CursorKind : u32 {
        /// A declaration whose specific kind is not exposed via this
        /// interface.
        UnexposedDecl = 1,
        /// A C or C++ struct.
        StructDecl,
        /// A C or C++ union.
        UnionDecl,
        /// A C++ class.
        ClassDecl,
        /// An enumeration.
        EnumDecl,
        /// A field (in C) or non-static data member (in C++) in a
        /// struct, union, or C++ class.
        FieldDecl,
        /// An enumerator constant.
        EnumConstantDecl,
        /// A function.
        FunctionDecl,
        /// A variable.
        VarDecl,
        /// A function or method parameter.
        ParmDecl,
        /// An Objective-C interface.
        ObjCInterfaceDecl,
        /// An Objective-C interface for a category.
        ObjCCategoryDecl,
        /// An Objective-C protocol declaration.
        ObjCProtocolDecl,
        /// An Objective-C property declaration.
        ObjCPropertyDecl,
        /// An Objective-C instance variable.
        ObjCIvarDecl,
        /// An Objective-C instance method.
        ObjCInstanceMethodDecl,
        /// An Objective-C class method.
        ObjCClassMethodDecl,
        /// An Objective-C implementation.
        ObjCImplementationDecl,
        /// An Objective-C implementation for a category.
        ObjCCategoryImplDecl,
        /// A typedef.
        TypedefDecl,
        /// A C++ class method.
        CxxMethod,
        /// A C++ namespace.
        Namespace,
        /// A linkage specification, e.g. `extern "C"`.
        LinkageSpec,
        /// A C++ constructor.
        Constructor,
        /// A C++ destructor.
        Destructor,
        /// A C++ conversion function.
        ConversionFunction,
        /// A C++ template type parameter.
        TemplateTypeParameter,
        /// A C++ non-type template parameter.
        NonTypeTemplateParameter,
        /// A C++ template template parameter.
        TemplateTemplateParameter,
        /// A C++ function template.
        FunctionTemplate,
        /// A C++ class template.
        ClassTemplate,
        /// A C++ class template partial specialization.
        ClassTemplatePartialSpecialization,
        /// A C++ namespace alias declaration.
        NamespaceAlias,
        /// A C++ using directive.
        UsingDirective,
        /// A C++ using declaration.
        UsingDeclaration,
        /// A C++ alias declaration.
        TypeAliasDecl,
        /// An Objective-C synthesize definition.
        ObjCSynthesizeDecl,
        /// An Objective-C dynamic definition.
        ObjCDynamicDecl,
        /// An access specifier.
        CxxAccessSpecifier,

        ObjCSuperClassRef = 40,
        ObjCProtocolRef,
        ObjCClassRef,
        /// A reference to a type declaration.
        TypeRef,
        CxxBaseSpecifier,
        /// A reference to a class template, function template, template
        /// template parameter, or class template partial specialization.
        TemplateRef,
        /// A reference to a namespace or namespace alias.
        NamespaceRef,
        /// A reference to a member of a struct, union, or class that
        /// occurs in some non-expression context.
        MemberRef,
        /// A reference to a labeled statement.
        LabelRef,
        /// A reference to a set of overloaded functions or function
        /// templates that has not yet been resolved to a specific
        /// function or function template.
        OverloadedDeclRef,
        /// A reference to a variable that occurs in some non-expression
        /// context.
        VariableRef,

        InvalidFile = 70,
        NoDeclFound,
        NotImplemented,
        InvalidCode,

        /// An expression whose specific kind is not exposed via this
        /// interface.
        UnexposedExpr = 100,
        /// An expression that refers to some value declaration, such as
        /// a function, variable, or enumerator.
        DeclRefExpr,
        /// An expression that refers to a member of a struct, union,
        /// class, Objective-C class, etc.
        MemberRefExpr,
        /// An expression that calls a function.
        CallExpr,
        /// An expression that sends a message to an Objective-C object
        /// or class.
        ObjCMessageExpr,
        /// An expression that represents a block literal.
        BlockExpr,
        /// An integer literal.
        IntegerLiteral,
        /// A floating point number literal.
        FloatingLiteral,
        /// An imaginary number literal.
        ImaginaryLiteral,
        /// A string literal.
        StringLiteral,
        /// A character literal.
        CharacterLiteral,
        /// A parenthesized expression, e.g. `(1)`.
        ParenExpr,
        /// This represents the unary-expression's (except sizeof and
        /// alignof).
        UnaryOperator,
        /// [C99 6.5.2.1] Array Subscripting.
        ArraySubscriptExpr,
        /// A builtin binary operation expression such as `x + y` or
        /// `x <= y`.
        BinaryOperator,
        /// Compound assignment such as `+=`.
        CompoundAssignOperator,
        /// The `?:` ternary operator.
        ConditionalOperator,
        /// An explicit cast in C (C99 6.5.4) or a C-style cast in C++
        /// (C++ [expr.cast]).
        CStyleCastExpr,
        /// [C99 6.5.2.5].
        CompoundLiteralExpr,
        /// Describes an C or C++ initializer list.
        InitListExpr,
        /// The GNU address of label extension, representing `&&label`.
        AddrLabelExpr,
        /// This is the GNU Statement Expression extension: `({int X=4; X;})`.
        StmtExpr,
        /// Represents a C11 generic selection.
        GenericSelectionExpr,
        /// Implements the GNU `__null` extension.
        GnuNullExpr,
        /// C++'s static_cast<> expression.
        CxxStaticCastExpr,
        /// C++'s dynamic_cast<> expression.
        CxxDynamicCastExpr,
        /// C++'s reinterpret_cast<> expression.
        CxxReinterpretCastExpr,
        /// C++'s const_cast<> expression.
        CxxConstCastExpr,
        /// Represents an explicit C++ type conversion that uses
        /// "functional" notion (C++ [expr.type.conv]).
        CxxFunctionalCastExpr,
        /// A C++ typeid expression (C++ [expr.typeid]).
        CxxTypeidExpr,
        /// [C++ 2.13.5] C++ Boolean Literal.
        CxxBoolLiteralExpr,
        /// [C++0x 2.14.7] C++ Pointer Literal.
        CxxNullPtrLiteralExpr,
        /// Represents the "this" expression in C++.
        CxxThisExpr,
        /// [C++ 15] C++ Throw Expression.
        CxxThrowExpr,
        /// A new expression for memory allocation and constructor calls.
        CxxNewExpr,
        /// A delete expression for memory deallocation and destructor
        /// calls.
        CxxDeleteExpr,
        /// A unary expression (noexcept, sizeof, or other traits).
        UnaryExpr,
        /// An Objective-C string literal i.e. @"foo".
        ObjCStringLiteral,
        /// An Objective-C `@encode` expression.
        ObjCEncodeExpr,
        /// An Objective-C `@selector` expression.
        ObjCSelectorExpr,
        /// An Objective-C `@protocol` expression.
        ObjCProtocolExpr,
        /// An Objective-C "bridged" cast expression, which casts between
        /// Objective-C pointers and C pointers, transferring ownership
        /// in the process.
        ObjCBridgedCastExpr,
        /// Represents a C++0x pack expansion that produces a sequence of
        /// expressions.
        PackExpansionExpr,
        /// Represents an expression that computes the length of a
        /// parameter pack.
        SizeOfPackExpr,
        /// Represents a C++ lambda expression that produces a local
        /// function object.
        LambdaExpr,
        /// Objective-c Boolean Literal.
        ObjCBoolLiteralExpr,
        /// Represents the "self" expression in an Objective-C method.
        ObjCSelfExpr,
        /// OpenMP 5.0 [2.1.5, Array Section].
        OmpArraySectionExpr,
        /// Represents an @available(...) check.
        ObjCAvailabilityCheckExpr,
        /// Fixed point literal.
        FixedPointLiteral,
        /// OpenMP 5.0 [2.1.4, Array Shaping].
        OmpArrayShapingExpr,
        /// OpenMP 5.0 [2.1.6 Iterators].
        OmpIteratorExpr,
        /// OpenCL's addrspace_cast<> expression.
        CxxAddrspaceCastExpr,

        /// A statement whose specific kind is not exposed via this
        /// interface.
        UnexposedStmt = 200,
        /// A labelled statement in a function.
        LabelStmt,
        /// A group of statements like `{ stmt stmt }`.
        CompoundStmt,
        /// A case statement.
        CaseStmt,
        /// A default statement.
        DefaultStmt,
        /// An if statement.
        IfStmt,
        /// A switch statement.
        SwitchStmt,
        /// A while statement.
        WhileStmt,
        /// A do statement.
        DoStmt,
        /// A for statement.
        ForStmt,
        /// A goto statement.
        GotoStmt,
        /// An indirect goto statement.
        IndirectGotoStmt,
        /// A continue statement.
        ContinueStmt,
        /// A break statement.
        BreakStmt,
        /// A return statement.
        ReturnStmt,
        /// A GCC inline assembly statement extension.
        GccAsmStmt,
        /// Objective-C's overall `@try-@catch-@finally` statement.
        ObjCAtTryStmt,
        /// Objective-C's `@catch` statement.
        ObjCAtCatchStmt,
        /// Objective-C's `@finally` statement.
        ObjCAtFinallyStmt,
        /// Objective-C's `@throw` statement.
        ObjCAtThrowStmt,
        /// Objective-C's `@synchronized` statement.
        ObjCAtSynchronizedStmt,
        /// Objective-C's autorelease pool statement.
        ObjCAutoreleasePoolStmt,
        /// Objective-C's collection statement.
        ObjCForCollectionStmt,
        /// C++'s catch statement.
        CxxCatchStmt,
        /// C++'s try statement.
        CxxTryStmt,
        /// C++'s for (* : *) statement.
        CxxForRangeStmt,
        /// Windows Structured Exception Handling's try statement.
        SehTryStmt,
        /// Windows Structured Exception Handling's except statement.
        SehExceptStmt,
        /// Windows Structured Exception Handling's finally statement.
        SehFinallyStmt,
        /// A MS inline assembly statement extension.
        MsAsmStmt,
        /// The null statement `;`.
        NullStmt,
        /// Adaptor class for mixing declarations with statements and
        /// expressions.
        DeclStmt,
        OmpParallelDirective,
        OmpSimdDirective,
        OmpForDirective,
        OmpSectionsDirective,
        OmpSectionDirective,
        OmpSingleDirective,
        OmpParallelForDirective,
        OmpParallelSectionsDirective,
        OmpTaskDirective,
        OmpMasterDirective,
        OmpCriticalDirective,
        OmpTaskyieldDirective,
        OmpBarrierDirective,
        OmpTaskwaitDirective,
        OmpFlushDirective,
        /// Windows Structured Exception Handling's leave statement.
        SehLeaveStmt,
        OmpOrderedDirective,
        OmpAtomicDirective,
        OmpForSimdDirective,
        OmpParallelForSimdDirective,
        OmpTargetDirective,
        OmpTeamsDirective,
        OmpTaskgroupDirective,
        OmpCancellationPointDirective,
        OmpCancelDirective,
        OmpTargetDataDirective,
        OmpTaskLoopDirective,
        OmpTaskLoopSimdDirective,
        OmpDistributeDirective,
        OmpTargetEnterDataDirective,
        OmpTargetExitDataDirective,
        OmpTargetParallelDirective,
        OmpTargetParallelForDirective,
        OmpTargetUpdateDirective,
        OmpDistributeParallelForDirective,
        OmpDistributeParallelForSimdDirective,
        OmpDistributeSimdDirective,
        OmpTargetParallelForSimdDirective,
        OmpTargetSimdDirective,
        OmpTeamsDistributeDirective,
        OmpTeamsDistributeSimdDirective,
        OmpTeamsDistributeParallelForSimdDirective,
        OmpTeamsDistributeParallelForDirective,
        OmpTargetTeamsDirective,
        OmpTargetTeamsDistributeDirective,
        OmpTargetTeamsDistributeParallelForDirective,
        OmpTargetTeamsDistributeParallelForSimdDirective,
        OmpTargetTeamsDistributeSimdDirective,
        /// C++2a std::bit_cast expression.
        BuiltinBitCastExpr,
        OmpMasterTaskLoopDirective,
        OmpParallelMasterTaskLoopDirective,
        OmpMasterTaskLoopSimdDirective,
        OmpParallelMasterTaskLoopSimdDirective,
        OmpParallelMasterDirective,
        OmpDepobjDirective,
        OmpScanDirective,
        OmpTileDirective,
        OmpCanonicalLoop,
        OmpInteropDirective,
        OmpDispatchDirective,
        OmpMaskedDirective,
        OmpUnrollDirective,
        OmpMetaDirective,
        OmpGenericLoopDirective,

        /// Cursor that represents the translation unit itself.
        ///
        /// The translation unit cursor exists primarily to act as the
        /// root cursor for traversing the contents of a translation
        /// unit.
        TranslationUnit = 350,

        /// An attribute whose specific kind is not exposed via this
        /// interface.
        UnexposedAttr = 400,
        IbActionAttr,
        IbOutletAttr,
        IbOutletCollectionAttr,
        CxxFinalAttr,
        CxxOverrideAttr,
        AnnotateAttr,
        AsmLabelAttr,
        PackedAttr,
        PureAttr,
        ConstAttr,
        NoDuplicateAttr,
        CudaConstantAttr,
        CudaDeviceAttr,
        CudaGlobalAttr,
        CudaHostAttr,
        CudaSharedAttr,
        VisibilityAttr,
        DllExport,
        DllImport,
        NsReturnsRetained,
        NsReturnsNotRetained,
        NsReturnsAutoreleased,
        NsConsumesSelf,
        NsConsumed,
        ObjCException,
        ObjCNsObject,
        ObjCIndependentClass,
        ObjCPreciseLifetime,
        ObjCReturnsInnerPointer,
        ObjCRequiresSuper,
        ObjCRootClass,
        ObjCSubclassingRestricted,
        ObjCExplicitProtocolImpl,
        ObjCDesignatedInitializer,
        ObjCRuntimeVisible,
        ObjCBoxable,
        FlagEnum,
        ConvergentAttr,
        WarnUnusedAttr,
        WarnUnusedResultAttr,
        AlignedAttr,

        /// A preprocessing directive.
        PreprocessingDirective = 500,
        /// A macro definition.
        MacroDefinition,
        /// A macro expansion.
        MacroExpansion,
        /// An inclusion directive.
        InclusionDirective,

        /// A module import declaration.
        ModuleImportDecl = 600,
        /// A C++ alias template declaration.
        TypeAliasTemplateDecl,
        /// A static_assert or _Static_assert node.
        StaticAssert,
        /// A friend declaration.
        FriendDecl,

        /// A code completion overload candidate.
        OverloadCandidate = 700,
    }
}

impl CursorKind {
    pub const FIRST_DECL: CursorKind = CursorKind::UnexposedDecl;
    pub const LAST_DECL: CursorKind = CursorKind::CxxAccessSpecifier;
    pub const FIRST_REF: CursorKind = CursorKind::ObjCSuperClassRef;
    pub const LAST_REF: CursorKind = CursorKind::VariableRef;
    pub const FIRST_INVALID: CursorKind = CursorKind::InvalidFile;
    pub const LAST_INVALID: CursorKind = CursorKind::InvalidCode;
    pub const FIRST_EXPR: CursorKind = CursorKind::UnexposedExpr;
    pub const LAST_EXPR: CursorKind = CursorKind::CxxAddrspaceCastExpr;
    pub const FIRST_STMT: CursorKind = CursorKind::UnexposedStmt;
    pub const LAST_STMT: CursorKind = CursorKind::OmpGenericLoopDirective;
    pub const FIRST_ATTR: CursorKind = CursorKind::UnexposedAttr;
    pub const LAST_ATTR: CursorKind = CursorKind::AlignedAttr;
    pub const FIRST_PREPROCESSING: CursorKind = CursorKind::PreprocessingDirective;
    pub const LAST_PREPROCESSING: CursorKind = CursorKind::InclusionDirective;
    pub const FIRST_EXTRA_DECL: CursorKind = CursorKind::ModuleImportDecl;
    pub const LAST_EXTRA_DECL: CursorKind = CursorKind::FriendDecl;

    /// Upstream spelling alias for [`CursorKind::GccAsmStmt`].
    pub const ASM_STMT: CursorKind = CursorKind::GccAsmStmt;
    /// Upstream spelling alias for [`CursorKind::MacroExpansion`].
    pub const MACRO_INSTANTIATION: CursorKind = CursorKind::MacroExpansion;

    /// Whether this kind represents a declaration.
    pub fn is_declaration(self) -> bool {
        Self::in_block(self, Self::FIRST_DECL, Self::LAST_DECL)
            || Self::in_block(self, Self::FIRST_EXTRA_DECL, Self::LAST_EXTRA_DECL)
    }

    /// Whether this kind represents a simple reference.
    ///
    /// Note that other kinds of cursors (such as expressions) can also
    /// refer to other cursors; use the host runtime's
    /// `cursor_referenced` to determine whether a particular cursor
    /// refers to another entity.
    pub fn is_reference(self) -> bool {
        Self::in_block(self, Self::FIRST_REF, Self::LAST_REF)
    }

    /// Whether this kind represents an expression.
    pub fn is_expression(self) -> bool {
        Self::in_block(self, Self::FIRST_EXPR, Self::LAST_EXPR)
    }

    /// Whether this kind represents a statement.
    pub fn is_statement(self) -> bool {
        Self::in_block(self, Self::FIRST_STMT, Self::LAST_STMT)
    }

    /// Whether this kind represents an attribute.
    pub fn is_attribute(self) -> bool {
        Self::in_block(self, Self::FIRST_ATTR, Self::LAST_ATTR)
    }

    /// Whether this kind represents an invalid cursor.
    pub fn is_invalid(self) -> bool {
        Self::in_block(self, Self::FIRST_INVALID, Self::LAST_INVALID)
    }

    /// Whether this kind represents a translation unit.
    pub fn is_translation_unit(self) -> bool {
        self == CursorKind::TranslationUnit
    }

    /// Whether this kind represents a preprocessing entity.
    pub fn is_preprocessing(self) -> bool {
        Self::in_block(self, Self::FIRST_PREPROCESSING, Self::LAST_PREPROCESSING)
    }

    /// Whether this kind represents a currently unexposed piece of the
    /// AST.
    pub fn is_unexposed(self) -> bool {
        matches!(
            self,
            CursorKind::UnexposedDecl
                | CursorKind::UnexposedExpr
                | CursorKind::UnexposedStmt
                | CursorKind::UnexposedAttr
        )
    }

    fn in_block(kind: CursorKind, first: CursorKind, last: CursorKind) -> bool {
        (first.as_raw()..=last.as_raw()).contains(&kind.as_raw())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_anchors_match_upstream_numbering() {
        assert_eq!(CursorKind::UnexposedDecl.as_raw(), 1);
        assert_eq!(CursorKind::CxxAccessSpecifier.as_raw(), 39);
        assert_eq!(CursorKind::ObjCSuperClassRef.as_raw(), 40);
        assert_eq!(CursorKind::VariableRef.as_raw(), 50);
        assert_eq!(CursorKind::InvalidFile.as_raw(), 70);
        assert_eq!(CursorKind::UnexposedExpr.as_raw(), 100);
        assert_eq!(CursorKind::CxxAddrspaceCastExpr.as_raw(), 152);
        assert_eq!(CursorKind::UnexposedStmt.as_raw(), 200);
        assert_eq!(CursorKind::GccAsmStmt.as_raw(), 215);
        assert_eq!(CursorKind::OmpGenericLoopDirective.as_raw(), 295);
        assert_eq!(CursorKind::TranslationUnit.as_raw(), 350);
        assert_eq!(CursorKind::AlignedAttr.as_raw(), 441);
        assert_eq!(CursorKind::InclusionDirective.as_raw(), 503);
        assert_eq!(CursorKind::FriendDecl.as_raw(), 603);
        assert_eq!(CursorKind::OverloadCandidate.as_raw(), 700);
    }

    #[test]
    fn raw_round_trips() {
        for kind in [
            CursorKind::StructDecl,
            CursorKind::TypeRef,
            CursorKind::CallExpr,
            CursorKind::CompoundStmt,
            CursorKind::TranslationUnit,
            CursorKind::AnnotateAttr,
            CursorKind::MacroDefinition,
            CursorKind::FriendDecl,
            CursorKind::OverloadCandidate,
        ] {
            assert_eq!(CursorKind::from_raw(kind.as_raw()), Some(kind));
        }
    }

    #[test]
    fn gaps_between_blocks_decode_to_none() {
        assert_eq!(CursorKind::from_raw(0), None);
        assert_eq!(CursorKind::from_raw(55), None);
        assert_eq!(CursorKind::from_raw(80), None);
        assert_eq!(CursorKind::from_raw(160), None);
        assert_eq!(CursorKind::from_raw(300), None);
        assert_eq!(CursorKind::from_raw(9999), None);
    }

    #[test]
    fn category_predicates_follow_blocks() {
        assert!(CursorKind::FunctionDecl.is_declaration());
        assert!(CursorKind::FriendDecl.is_declaration());
        assert!(CursorKind::TemplateRef.is_reference());
        assert!(CursorKind::LambdaExpr.is_expression());
        assert!(CursorKind::ForStmt.is_statement());
        assert!(CursorKind::PackedAttr.is_attribute());
        assert!(CursorKind::NoDeclFound.is_invalid());
        assert!(CursorKind::TranslationUnit.is_translation_unit());
        assert!(CursorKind::MacroExpansion.is_preprocessing());
        assert!(CursorKind::UnexposedStmt.is_unexposed());
        assert!(!CursorKind::CallExpr.is_statement());
        assert!(!CursorKind::StructDecl.is_reference());
    }

    #[test]
    fn spelling_aliases_share_discriminants() {
        assert_eq!(CursorKind::ASM_STMT, CursorKind::GccAsmStmt);
        assert_eq!(
            CursorKind::MACRO_INSTANTIATION.as_raw(),
            CursorKind::MacroExpansion.as_raw()
        );
    }
}
