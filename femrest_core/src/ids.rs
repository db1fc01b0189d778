//! Typed entity identifiers.
//!
//! The external application names every entity with an opaque token. Each
//! entity family gets its own newtype so a node token can't be handed to a
//! call expecting an element. Tokens sent back as JSON numbers are kept in
//! their decimal string form.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                $name(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                $name(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                $name(id)
            }
        }

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                $name(id.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

entity_id!(
    /// Node identifier
    NodeId
);
entity_id!(
    /// Element identifier (beam, truss, quad, spring)
    ElementId
);
entity_id!(
    /// Material identifier
    MaterialId
);
entity_id!(
    /// Section identifier
    SectionId
);
entity_id!(
    /// Spring property identifier (the property name)
    SpringPropertyId
);
entity_id!(
    /// Load case or combination identifier (usually its name)
    LoadCaseId
);
