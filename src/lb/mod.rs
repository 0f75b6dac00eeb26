//! Cloud Load Balancers resources
//!
//! This module holds the resource shapes returned by the load balancer API and
//! the glue that turns raw response bodies into them.
//!
//! # Module Structure
//!
//! - [`types`] - The `LoadBalancer` record and its nested sub-records
//! - [`nodes`] - Back-end node records
//! - [`vips`] - Virtual IP records
//! - [`results`] - Result and page wrappers with their extraction functions
//! - [`requests`] - Request bodies for create, update and list calls
//!
//! # Example
//!
//! ```
//! use rslb::lb::{GetResult, Protocol};
//! use serde_json::json;
//!
//! let result = GetResult::from_body(json!({
//!     "loadBalancer": {"id": 12345, "name": "lb-test", "protocol": "TCP"}
//! }));
//! let lb = result.extract().unwrap();
//! assert_eq!(lb.id, 12345);
//! assert_eq!(lb.protocol, Protocol::TCP);
//! ```

/// Declares a string vocabulary: a newtype over a string with associated
/// constants for the values the API documents. Values outside the documented
/// set are kept verbatim.
macro_rules! string_vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $konst:ident = $value:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(std::borrow::Cow<'static, str>);

        impl $name {
            $(
                $(#[$vmeta])*
                pub const $konst: $name = $name(std::borrow::Cow::Borrowed($value));
            )+

            /// Every value documented by the API
            pub const KNOWN: &'static [&'static str] = &[$($value),+];

            /// Wrap an arbitrary string, documented or not
            pub fn new(value: impl Into<String>) -> Self {
                $name(std::borrow::Cow::Owned(value.into()))
            }

            /// The raw string, exactly as received
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Whether the value is one the API documents
            pub fn is_known(&self) -> bool {
                Self::KNOWN.contains(&self.as_str())
            }

            /// Whether no value was reported
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                $name::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                $name::new(value)
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.as_str() == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.as_str() == *other
            }
        }
    };
}

pub(crate) fn is_zero(value: &i64) -> bool {
    *value == 0
}

/// Decode a JSON `null` the same way as an absent key
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + serde::Deserialize<'de>,
{
    use serde::Deserialize;
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

pub mod nodes;
pub mod requests;
pub mod results;
pub mod types;
pub mod vips;

pub use nodes::Node;
pub use requests::{CreateOpts, ListOpts, UpdateOpts};
pub use results::{extract_lbs, CreateResult, DeleteResult, GetResult, LbPage, UpdateResult};
pub use types::{
    Algorithm, Cluster, ConnectionLogging, ConnectionThrottle, Datetime, LoadBalancer, Protocol,
    SessionPersistence, SourceAddrs, Status,
};
pub use vips::Vip;
