//! The injected API client capability

use super::types::{Endpoint, Params};
use crate::error::Result;
use crate::pagination::{Cursor, Page, PageSource};
use crate::types::JsonValue;
use async_trait::async_trait;
use std::sync::Arc;

/// An already-authenticated API client.
///
/// Implementations own transport, authentication, cursoring and
/// rate-limit waiting. This crate only consumes the JSON they return and
/// never validates the parameters it forwards. Errors should be wrapped
/// with [`Error::client`](crate::Error::client) so callers can recover the
/// original type.
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Single-shot call: one object, or a small fixed list as a JSON array
    async fn fetch_one(&self, endpoint: Endpoint, params: &Params) -> Result<JsonValue>;

    /// One page of a paged resource; `cursor` is `None` for the first page
    async fn fetch_page(
        &self,
        endpoint: Endpoint,
        params: &Params,
        cursor: Option<&Cursor>,
    ) -> Result<Page>;
}

#[async_trait]
impl<C: ApiClient + ?Sized> ApiClient for Arc<C> {
    async fn fetch_one(&self, endpoint: Endpoint, params: &Params) -> Result<JsonValue> {
        (**self).fetch_one(endpoint, params).await
    }

    async fn fetch_page(
        &self,
        endpoint: Endpoint,
        params: &Params,
        cursor: Option<&Cursor>,
    ) -> Result<Page> {
        (**self).fetch_page(endpoint, params, cursor).await
    }
}

/// A paged endpoint bound to its client and parameters
#[derive(Debug)]
pub struct EndpointPages<'a, C: ?Sized> {
    client: &'a C,
    endpoint: Endpoint,
    params: Params,
}

impl<'a, C: ApiClient + ?Sized> EndpointPages<'a, C> {
    /// Bind `endpoint` with `params` on `client`
    pub fn new(client: &'a C, endpoint: Endpoint, params: Params) -> Self {
        Self {
            client,
            endpoint,
            params,
        }
    }

    /// The bound endpoint
    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }
}

#[async_trait]
impl<'a, C: ApiClient + ?Sized> PageSource for EndpointPages<'a, C> {
    async fn fetch_page(&self, cursor: Option<&Cursor>) -> Result<Page> {
        self.client
            .fetch_page(self.endpoint, &self.params, cursor)
            .await
    }
}
