//! Flag words of the wrapped API surface.
//!
//! These cross the wire as plain `u32` bitmasks. Unknown bits are
//! retained rather than rejected, since the upstream header may grow
//! new options ahead of this transcription.

use bitflags::bitflags;

bitflags! {
    /// General options that apply to an index.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct GlobalOptFlags: u32 {
        /// Used to indicate that no special index options are needed.
        const NONE = 0x0;
        /// Used to indicate that threads that the wrapped library
        /// creates for indexing purposes should use background
        /// priority.
        const THREAD_BACKGROUND_PRIORITY_FOR_INDEXING = 0x1;
        /// Used to indicate that threads that the wrapped library
        /// creates for editing purposes should use background
        /// priority.
        const THREAD_BACKGROUND_PRIORITY_FOR_EDITING = 0x2;
        /// Used to indicate that all threads that the wrapped library
        /// creates should use background priority.
        const THREAD_BACKGROUND_PRIORITY_FOR_ALL = 0x3;
    }
}

bitflags! {
    /// Flags that control the creation of translation units.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct TranslationUnitFlags: u32 {
        /// Used to indicate that no special translation-unit options
        /// are needed.
        const NONE = 0x0;
        /// Used to indicate that the parser should construct a
        /// "detailed" preprocessing record, including all macro
        /// definitions and instantiations.
        const DETAILED_PREPROCESSING_RECORD = 0x01;
        /// Used to indicate that the translation unit is incomplete.
        const INCOMPLETE = 0x02;
        /// Used to indicate that the translation unit should be built
        /// with an implicit precompiled header for the preamble.
        const PRECOMPILED_PREAMBLE = 0x04;
        /// Used to indicate that the translation unit should cache some
        /// code-completion results with each reparse of the source
        /// file.
        const CACHE_COMPLETION_RESULTS = 0x08;
        /// Used to indicate that the translation unit will be
        /// serialized with a save call.
        const FOR_SERIALIZATION = 0x10;
        /// DEPRECATED: enabled chained precompiled preambles in C++.
        const CXX_CHAINED_PCH = 0x20;
        /// Used to indicate that function/method bodies should be
        /// skipped while parsing.
        const SKIP_FUNCTION_BODIES = 0x40;
        /// Used to indicate that brief documentation comments should be
        /// included into the set of code completions returned from this
        /// translation unit.
        const INCLUDE_BRIEF_COMMENTS_IN_CODE_COMPLETION = 0x80;
        /// Used to indicate that the precompiled preamble should be
        /// created on the first parse.
        const CREATE_PREAMBLE_ON_FIRST_PARSE = 0x100;
        /// Do not stop processing when fatal errors are encountered.
        const KEEP_GOING = 0x200;
        /// Sets the preprocessor in a mode for parsing a single file
        /// only.
        const SINGLE_FILE_PARSE = 0x400;
        /// Used in combination with SKIP_FUNCTION_BODIES to constrain
        /// the skipping of function bodies to the preamble.
        const LIMIT_SKIP_FUNCTION_BODIES_TO_PREAMBLE = 0x800;
        /// Used to indicate that attributed types should be included in
        /// the AST.
        const INCLUDE_ATTRIBUTED_TYPES = 0x1000;
        /// Used to indicate that implicit attributes should be visited.
        const VISIT_IMPLICIT_ATTRIBUTES = 0x2000;
        /// Used to indicate that non-errors from included files should
        /// be ignored.
        const IGNORE_NON_ERRORS_FROM_INCLUDED_FILES = 0x4000;
        /// Tells the preprocessor not to skip excluded conditional
        /// blocks.
        const RETAIN_EXCLUDED_CONDITIONAL_BLOCKS = 0x8000;
    }
}

bitflags! {
    /// Flags that control how translation units are saved.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct SaveTranslationUnitFlags: u32 {
        /// Used to indicate that no special saving options are needed.
        const NONE = 0x0;
    }
}

bitflags! {
    /// Flags that control the reparsing of translation units.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ReparseFlags: u32 {
        /// Used to indicate that no special reparsing options are
        /// needed.
        const NONE = 0x0;
    }
}

bitflags! {
    /// Options to control the display of diagnostics.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct DiagnosticDisplayOptions: u32 {
        /// Display the source-location information where the diagnostic
        /// was located.
        const DISPLAY_SOURCE_LOCATION = 0x01;
        /// If displaying the source-location information of the
        /// diagnostic, also include the column number.
        const DISPLAY_COLUMN = 0x02;
        /// If displaying the source-location information of the
        /// diagnostic, also include information about source ranges in
        /// a machine-parsable format.
        const DISPLAY_SOURCE_RANGES = 0x04;
        /// Display the option name associated with this diagnostic, if
        /// any.
        const DISPLAY_OPTION = 0x08;
        /// Display the category number associated with this diagnostic,
        /// if any.
        const DISPLAY_CATEGORY_ID = 0x10;
        /// Display the category name associated with this diagnostic,
        /// if any.
        const DISPLAY_CATEGORY_NAME = 0x20;
    }
}

bitflags! {
    /// Attributes of an Objective-C property declaration.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ObjCPropertyAttrKind: u32 {
        const READONLY = 0x01;
        const GETTER = 0x02;
        const ASSIGN = 0x04;
        const READWRITE = 0x08;
        const RETAIN = 0x10;
        const COPY = 0x20;
        const NONATOMIC = 0x40;
        const SETTER = 0x80;
        const ATOMIC = 0x100;
        const WEAK = 0x200;
        const STRONG = 0x400;
        const UNSAFE_UNRETAINED = 0x800;
        const CLASS = 0x1000;
    }
}

bitflags! {
    /// Objective-C method/parameter declaration qualifiers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ObjCDeclQualifier: u32 {
        const IN = 0x01;
        const INOUT = 0x02;
        const OUT = 0x04;
        const BYCOPY = 0x08;
        const BYREF = 0x10;
        const ONEWAY = 0x20;
    }
}

bitflags! {
    /// Controls which pieces of a reference name are extracted.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct NameRefFlags: u32 {
        /// Include the nested-name-specifier, e.g. Foo:: in
        /// x.Foo::y, in the range.
        const WANT_QUALIFIER = 0x1;
        /// Include the explicit template arguments, e.g. <int> in
        /// x.f<int>, in the range.
        const WANT_TEMPLATE_ARGS = 0x2;
        /// If the name is non-contiguous, return the full spanning
        /// range.
        const WANT_SINGLE_PIECE = 0x4;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_bits_are_retained() {
        let flags = TranslationUnitFlags::from_bits_retain(0x4_0001);
        assert!(flags.contains(TranslationUnitFlags::DETAILED_PREPROCESSING_RECORD));
        assert_eq!(flags.bits(), 0x4_0001);
    }

    #[test]
    fn background_priority_for_all_is_the_union() {
        assert_eq!(
            GlobalOptFlags::THREAD_BACKGROUND_PRIORITY_FOR_ALL,
            GlobalOptFlags::THREAD_BACKGROUND_PRIORITY_FOR_INDEXING
                | GlobalOptFlags::THREAD_BACKGROUND_PRIORITY_FOR_EDITING
        );
    }
}
