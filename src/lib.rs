//! Typed client for the Rackspace Cloud Load Balancers API
//!
//! - [`lb`] - Resource shapes and the extraction of typed records from
//!   response bodies
//! - [`pagination`] - Following next-page links through an injected fetch
//!   function
//! - [`rackspace`] - HTTP transport producing the result and page objects
//! - [`config`] - Persistent user configuration for the command line tool
//!
//! Decoding never touches shared state; independent responses can be decoded
//! from any number of tasks at once.

pub mod config;
pub mod error;
pub mod lb;
pub mod pagination;
pub mod rackspace;

pub use error::{LbError, Result};
