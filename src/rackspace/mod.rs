//! Rackspace API transport
//!
//! This module sends requests to the Cloud Load Balancers API and wraps the
//! responses in the result objects defined in [`crate::lb`].
//!
//! # Module Structure
//!
//! - [`client`] - Endpoint-aware client returning result objects and pagers
//! - [`http`] - HTTP utilities for REST API calls
//!
//! # Example
//!
//! ```no_run
//! use rslb::lb::ListOpts;
//! use rslb::rackspace::client::{regional_endpoint, LbClient};
//!
//! async fn example() -> rslb::Result<()> {
//!     let client = LbClient::new(regional_endpoint("dfw", "123456")?, "token")?;
//!     let lb = client.get(42).await.extract()?;
//!     let all = client.list_all(&ListOpts::default()).await?;
//!     println!("{} of {}", lb.name, all.len());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod http;
