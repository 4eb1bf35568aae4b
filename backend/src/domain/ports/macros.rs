//! Macro generating port error enums with `impl Into` constructors.
//!
//! Each variant carries named fields and a display message. For a variant
//! `Query { message: String }` the macro emits `Self::query(impl Into<String>)`.

macro_rules! define_port_error {
    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            #[doc = "Construct the `" $variant "` variant."]
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $($field:ident : $ty:ty),* $(,)? } => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $($field : $ty),* },
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant { $($field : $ty),* });
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    define_port_error! {
        pub enum SamplePortError {
            Unreachable { message: String } => "unreachable: {message}",
            Rejected { attempts: u32 } => "rejected after {attempts} attempts",
            Mixed { message: String, attempts: u32 } => "{message} ({attempts})",
        }
    }

    #[test]
    fn string_fields_accept_str() {
        let err = SamplePortError::unreachable("db down");
        assert_eq!(err.to_string(), "unreachable: db down");
    }

    #[test]
    fn other_fields_keep_their_type() {
        let err = SamplePortError::rejected(3_u32);
        assert_eq!(err, SamplePortError::Rejected { attempts: 3 });
    }

    #[test]
    fn mixed_fields_build_in_declaration_order() {
        let err = SamplePortError::mixed("retry", 2_u32);
        assert_eq!(err.to_string(), "retry (2)");
    }
}
