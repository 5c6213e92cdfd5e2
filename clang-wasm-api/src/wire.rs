//! Helper macros for declaring wire-level enumerations and handles.
//!
//! The wrapped library communicates enum values and object handles as
//! plain integers. Every enum declared with `wire_enum!` gets a fixed
//! `repr`, a fallible `from_raw` decoder and an `as_raw` encoder, so
//! the host runtime never has to trust a guest-provided discriminant.

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $repr:ty {
            $(
                $(#[$vmeta:meta])*
                $variant:ident $(= $value:expr)?
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr($repr)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant $(= $value)?,
            )+
        }

        impl $name {
            /// Decodes a wire value from the wrapped library.
            ///
            /// Returns `None` for values that fall outside the
            /// transcribed surface (e.g. gaps between discriminant
            /// blocks, or entries added by a newer upstream release).
            pub fn from_raw(raw: $repr) -> Option<Self> {
                match raw {
                    $(v if v == Self::$variant as $repr => Some(Self::$variant),)+
                    _ => None,
                }
            }

            /// Encodes this value for the wire.
            pub fn as_raw(self) -> $repr {
                self as $repr
            }
        }
    };
}

macro_rules! wire_handle {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis struct $name(pub $crate::handles::RawHandle);

        impl $name {
            /// The null handle.
            pub const NULL: Self = Self($crate::handles::RawHandle::NULL);

            pub fn from_raw(raw: u32) -> Self {
                Self($crate::handles::RawHandle(raw))
            }

            pub fn as_raw(self) -> u32 {
                self.0 .0
            }

            pub fn is_null(self) -> bool {
                self.0.is_null()
            }
        }
    };
}

pub(crate) use wire_enum;
pub(crate) use wire_handle;
