//! Validated text fields shared by groups and users.
//!
//! Every text column in the store is `varchar(255)`, so all field types are
//! capped at [`MAX_FIELD_LENGTH`] characters. Group names must also be
//! non-empty; whitespace is ordinary content. Length is counted in Unicode
//! scalar values to match PostgreSQL's character semantics.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum number of characters accepted in any text field.
pub const MAX_FIELD_LENGTH: usize = 255;

/// Validation failure for a single text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// A required value was the empty string.
    #[error("{field} must not be empty")]
    Empty { field: &'static str },
    /// The value exceeded [`MAX_FIELD_LENGTH`].
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
}

impl FieldError {
    /// Wire name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Empty { field } | Self::TooLong { field, .. } => field,
        }
    }

    /// Stable machine-readable reason.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Empty { .. } => "empty_field",
            Self::TooLong { .. } => "field_too_long",
        }
    }
}

fn validate(field: &'static str, required: bool, value: String) -> Result<String, FieldError> {
    if required && value.is_empty() {
        return Err(FieldError::Empty { field });
    }
    if value.chars().count() > MAX_FIELD_LENGTH {
        return Err(FieldError::TooLong {
            field,
            max: MAX_FIELD_LENGTH,
        });
    }
    Ok(value)
}

macro_rules! bounded_text {
    (@debug transparent $name:ident) => {
        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.0).finish()
            }
        }
    };

    (@debug redacted $name:ident) => {
        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(concat!(stringify!($name), "(\"***\")"))
            }
        }
    };

    (
        $(#[$meta:meta])*
        $name:ident, field = $field:literal, required = $required:literal, debug = $debug:ident
    ) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Validate and wrap `value`.
            pub fn new(value: impl Into<String>) -> Result<Self, FieldError> {
                validate($field, $required, value.into()).map(Self)
            }

            /// Borrow the validated text.
            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        bounded_text!(@debug $debug $name);

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = FieldError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

bounded_text! {
    /// Group name; unique across live groups.
    GroupName, field = "name", required = true, debug = transparent
}

bounded_text! {
    /// User name; unique across live users.
    UserName, field = "name", required = false, debug = transparent
}

bounded_text! {
    /// User email address; unique across live users. Stored as given.
    Email, field = "email", required = false, debug = transparent
}

bounded_text! {
    /// User password, stored and returned as given. Never printed by `Debug`.
    Password, field = "password", required = false, debug = redacted
}

impl fmt::Display for GroupName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
