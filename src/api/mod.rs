//! API client module
//!
//! The seam between this crate and whatever actually talks to the
//! social-media API.
//!
//! # Overview
//!
//! - [`ApiClient`] - injected capability: single-shot and paged fetches per
//!   [`Endpoint`], with pass-through [`Params`]
//! - [`EndpointPages`] - binds a client, an endpoint and its parameters into
//!   a [`PageSource`](crate::pagination::PageSource)
//! - [`ReplayClient`] - serves recorded responses from memory or disk

mod client;
mod replay;
mod types;

pub use client::{ApiClient, EndpointPages};
pub use replay::{Call, ReplayClient, ReplayError};
pub use types::{Endpoint, Params};
