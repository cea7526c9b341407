use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Defines a newtype identifier around a `String` and generates
/// `Display`, `From<&str>`, `From<String>` and a few accessors.
///
/// Directory records (rooms, teachers, students) are keyed by opaque
/// document ids, so these stay strings rather than UUIDs.
macro_rules! define_string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                $name(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// True when the id is empty or only whitespace, which is how
            /// an unselected form field arrives.
            pub fn is_blank(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                $name(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                $name(value)
            }
        }
    };
}

define_string_id!(
    /// Identifier of a physical or virtual room
    RoomId
);
define_string_id!(
    /// Identifier of a teacher in the directory
    TeacherId
);
define_string_id!(
    /// Identifier of a student in the directory
    StudentId
);

/// Identifier of a schedule slot, assigned by the store on creation
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotId(Uuid);

impl SlotId {
    pub fn new(value: Uuid) -> Self {
        SlotId(value)
    }

    pub fn random() -> Self {
        SlotId(Uuid::new_v4())
    }

    /// Builds an id from a fixed integer, handy for deterministic fixtures.
    pub const fn from_u128(value: u128) -> Self {
        SlotId(Uuid::from_u128(value))
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SlotId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(SlotId)
    }
}

impl From<Uuid> for SlotId {
    fn from(value: Uuid) -> Self {
        SlotId(value)
    }
}
