//! UUID-backed record identifiers.
//!
//! Students, courses, and user accounts each get their own identifier type so
//! a course id can never be handed to a student lookup by mistake. The
//! identifiers travel as canonical UUID strings over GraphQL and JSON.

use std::fmt;

use uuid::Uuid;

use super::Error;

/// Validation errors returned when parsing an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    /// The input was empty.
    Empty { kind: &'static str },
    /// The input was not a UUID.
    Malformed { kind: &'static str },
}

impl fmt::Display for IdentifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { kind } => write!(f, "{kind} id must not be empty"),
            Self::Malformed { kind } => write!(f, "{kind} id must be a valid UUID"),
        }
    }
}

impl std::error::Error for IdentifierError {}

impl From<IdentifierError> for Error {
    fn from(value: IdentifierError) -> Self {
        let code = match value {
            IdentifierError::Empty { .. } => "empty_id",
            IdentifierError::Malformed { .. } => "malformed_id",
        };
        Error::invalid_request(value.to_string())
            .with_details(serde_json::json!({ "field": "id", "code": code }))
    }
}

macro_rules! uuid_identifier {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[derive(serde::Serialize, serde::Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(Uuid);

        impl $name {
            /// Parse an identifier from its string form.
            pub fn new(id: impl AsRef<str>) -> Result<Self, IdentifierError> {
                let raw = id.as_ref();
                if raw.trim().is_empty() {
                    return Err(IdentifierError::Empty { kind: $kind });
                }
                Uuid::parse_str(raw)
                    .map(Self)
                    .map_err(|_| IdentifierError::Malformed { kind: $kind })
            }

            /// Allocate a fresh random identifier.
            pub fn random() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wrap an existing UUID, e.g. one read back from storage.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Access the underlying UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl std::str::FromStr for $name {
            type Err = IdentifierError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0.to_string()
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdentifierError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

uuid_identifier!(
    /// Identifier of a student record.
    StudentId,
    "student"
);
uuid_identifier!(
    /// Identifier of a course record.
    CourseId,
    "course"
);
uuid_identifier!(
    /// Identifier of a user account.
    UserId,
    "user"
);
