//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types. The backend assigns
//! identifiers as opaque strings (`_id` on the wire), so the wrappers hold a
//! `String` rather than an integer.

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_str()`
/// - `From<String>`, `From<&str>`, and `Display` implementations
///
/// # Example
///
/// ```rust
/// # use bizniz_core::define_id;
/// define_id!(CompanyId);
/// define_id!(EmployeeId);
///
/// let company_id = CompanyId::new("64a1f0");
/// let employee_id = EmployeeId::new("64a1f0");
///
/// // These are different types, so this won't compile:
/// // let _: CompanyId = employee_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from anything string-like.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// Define standard entity IDs
define_id!(CompanyId);
define_id!(EmployeeId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display_matches_inner() {
        let id = CompanyId::new("64a1f0b2c3");
        assert_eq!(id.to_string(), "64a1f0b2c3");
        assert_eq!(id.as_str(), "64a1f0b2c3");
    }

    #[test]
    fn test_id_serde_transparent() {
        let id = EmployeeId::new("abc123");
        let json = serde_json::to_string(&id).expect("serialize id");
        assert_eq!(json, "\"abc123\"");

        let back: EmployeeId = serde_json::from_str(&json).expect("deserialize id");
        assert_eq!(back, id);
    }
}
