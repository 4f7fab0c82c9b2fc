//! Newtype IDs for type-safe entity references.
//!
//! CMS document IDs arrive as strings or as integers depending on the
//! database adapter behind the CMS. The `define_id!` macro creates wrappers
//! that accept either on the wire and always hold the textual form, so a
//! product ID can never be passed where a customer ID is expected.

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize` as a plain string
/// - `Deserialize` from either a JSON string or a JSON integer
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<&str>` and `From<String>` implementations
///
/// # Example
///
/// ```rust
/// # use borzfuel_core::define_id;
/// define_id!(CustomerId);
/// define_id!(OrderId);
///
/// let customer_id = CustomerId::new("42");
/// let order_id = OrderId::new("42");
///
/// // These are different types, so this won't compile:
/// // let _: CustomerId = order_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, ::serde::Serialize)]
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

            /// Consume the ID and return its inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::core::result::Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                #[derive(::serde::Deserialize)]
                #[serde(untagged)]
                enum Raw {
                    Text(String),
                    Signed(i64),
                    Unsigned(u64),
                }

                Ok(match Raw::deserialize(deserializer)? {
                    Raw::Text(s) => Self(s),
                    Raw::Signed(n) => Self(n.to_string()),
                    Raw::Unsigned(n) => Self(n.to_string()),
                })
            }
        }
    };
}

// Define standard entity IDs
define_id!(ProductId);
define_id!(CustomerId);
define_id!(BenefitId);
define_id!(IngredientId);
define_id!(MediaId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_from_string() {
        let id: ProductId = serde_json::from_str("\"64f1c0ffee\"").unwrap();
        assert_eq!(id.as_str(), "64f1c0ffee");
    }

    #[test]
    fn test_deserialize_from_integer() {
        let id: CustomerId = serde_json::from_str("17").unwrap();
        assert_eq!(id, CustomerId::new("17"));
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let json = serde_json::to_string(&ProductId::new("p1")).unwrap();
        assert_eq!(json, "\"p1\"");
    }

    #[test]
    fn test_display() {
        assert_eq!(CustomerId::from("abc").to_string(), "abc");
    }

    #[test]
    fn test_rejects_non_scalar() {
        assert!(serde_json::from_str::<ProductId>("{\"id\": 1}").is_err());
    }
}
