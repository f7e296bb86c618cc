//! Generator for store-assigned integer identifiers.

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize,
        )]
        #[serde(try_from = "i32", into = "i32")]
        pub struct $name(i32);

        impl $name {
            /// Wrap a raw identifier, rejecting zero and negative values.
            pub fn new(raw: i32) -> Result<Self, $crate::domain::IdValidationError> {
                if raw > 0 {
                    Ok(Self(raw))
                } else {
                    Err($crate::domain::IdValidationError::NotPositive(raw))
                }
            }

            /// Raw value as stored.
            #[must_use]
            pub fn get(self) -> i32 {
                self.0
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<i32> for $name {
            type Error = $crate::domain::IdValidationError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

pub(crate) use record_id;
