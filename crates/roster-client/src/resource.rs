//! Generic CRUD client for one REST collection.

use std::marker::PhantomData;

use reqwest::header::AUTHORIZATION;
use roster_core::{EntityId, Page, Resource};

use crate::ApiClient;
use crate::error::ClientError;
use crate::http::{bearer, check_response};

/// Issues `list`/`create`/`update`/`delete` against `/api/<R>`.
///
/// Every call reads the token fresh from the session store, and every call is
/// a network round trip; nothing is cached.
pub struct ResourceClient<R: Resource> {
    api: ApiClient,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> Clone for ResourceClient<R> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> ResourceClient<R> {
    pub(crate) const fn new(api: ApiClient) -> Self {
        Self {
            api,
            _resource: PhantomData,
        }
    }

    /// `{base}/api/<R>`
    #[must_use]
    pub fn collection_url(&self) -> String {
        format!("{}/api/{}", self.api.base_url(), R::KIND.path())
    }

    fn item_url(&self, id: EntityId) -> String {
        format!("{}/{id}", self.collection_url())
    }

    /// `GET /api/<R>?page={page}&size={size}`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidRequest`] for `size == 0` (no request is
    /// sent), otherwise whatever [`check_response`] or decoding reports.
    pub async fn list(&self, page: u32, size: u32) -> Result<Page<R::Entity>, ClientError> {
        if size == 0 {
            return Err(ClientError::InvalidRequest(
                "page size must be positive".into(),
            ));
        }
        let url = format!("{}?page={page}&size={size}", self.collection_url());
        let resp = self.send("GET", &url, self.api.http().get(&url)).await?;
        Ok(resp.json().await?)
    }

    /// `POST /api/<R>` with `draft`; returns the entity with its new id.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure, error status or an
    /// undecodable body.
    pub async fn create(&self, draft: &R::Draft) -> Result<R::Entity, ClientError> {
        let url = self.collection_url();
        let resp = self
            .send("POST", &url, self.api.http().post(&url).json(draft))
            .await?;
        Ok(resp.json().await?)
    }

    /// `PUT /api/<R>/{id}` with the full replacement `draft`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure, error status or an
    /// undecodable body.
    pub async fn update(&self, id: EntityId, draft: &R::Draft) -> Result<R::Entity, ClientError> {
        let url = self.item_url(id);
        let resp = self
            .send("PUT", &url, self.api.http().put(&url).json(draft))
            .await?;
        Ok(resp.json().await?)
    }

    /// `DELETE /api/<R>/{id}`. The response body is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure or error status.
    pub async fn delete(&self, id: EntityId) -> Result<(), ClientError> {
        let url = self.item_url(id);
        self.send("DELETE", &url, self.api.http().delete(&url))
            .await?;
        Ok(())
    }

    async fn send(
        &self,
        method: &'static str,
        url: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, ClientError> {
        tracing::debug!(resource = %R::KIND, method, url, "sending request");
        let resp = request
            .header(AUTHORIZATION, bearer(self.api.tokens().as_ref()))
            .send()
            .await?;
        check_response(resp, self.api.navigator().as_ref()).await
    }
}
