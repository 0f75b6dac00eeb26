//! Error types for the load balancer client
//!
//! Errors fall into two families. Transport errors ([`LbError::Http`],
//! [`LbError::Api`]) are produced before any decoding happens and are carried
//! through result objects unchanged. Decode errors ([`LbError::Decode`],
//! [`LbError::Link`]) are produced when a response body does not have the
//! expected shape.

use thiserror::Error;

/// Errors returned by the load balancer client
#[derive(Error, Debug)]
pub enum LbError {
    /// The request could not be sent or its body could not be read
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("API request failed: {status}")]
    Api { status: u16, body: String },

    /// The response body did not match the expected resource shape
    #[error("failed to decode {context}: {source}")]
    Decode {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A pagination link was present but unusable
    #[error("invalid pagination link: {0}")]
    Link(String),

    /// Request options failed local checks before sending
    #[error("invalid options: {0}")]
    InvalidOptions(String),
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, LbError>;

impl LbError {
    pub(crate) fn decode(context: &'static str, source: serde_json::Error) -> Self {
        LbError::Decode { context, source }
    }

    /// Returns true if the error was raised by the transport layer
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, LbError::Http(_) | LbError::Api { .. })
    }

    /// Returns true if the error was raised while decoding a response body
    #[must_use]
    pub fn is_decode(&self) -> bool {
        matches!(self, LbError::Decode { .. } | LbError::Link(_))
    }

    /// Returns true if the API reported the resource as missing (404)
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, LbError::Api { status: 404, .. })
    }

    /// HTTP status code, when the API returned one
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            LbError::Api { status, .. } => Some(*status),
            LbError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_is_transport() {
        let err = LbError::Api {
            status: 404,
            body: String::new(),
        };
        assert!(err.is_transport());
        assert!(!err.is_decode());
        assert!(err.is_not_found());
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_decode_error_is_not_transport() {
        let source = serde_json::from_str::<u32>("\"x\"").unwrap_err();
        let err = LbError::decode("load balancer", source);
        assert!(err.is_decode());
        assert!(!err.is_transport());
        assert!(err.to_string().starts_with("failed to decode load balancer"));
    }
}
