//! REST collaborator for one resource collection.
//!
//! Speaks the `ballie-api` contract under `/api/v1/{R::PATH}` using
//! [`reqwest`].

use std::marker::PhantomData;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use ballie_core::collaborator::Collaborator;
use ballie_core::error::CoreError;
use ballie_core::query::{ListQuery, ResultPage};
use ballie_core::resource::Resource;

use crate::error::ClientError;

/// Body of `GET /{path}`. `page` and `limit` echo the request and are
/// ignored.
#[derive(Debug, Deserialize)]
struct ListBody<T> {
    items: Vec<T>,
    total: u64,
}

pub struct HttpCollaborator<R> {
    client: Client,
    base_url: Url,
    _resource: PhantomData<fn() -> R>,
}

impl<R> std::fmt::Debug for HttpCollaborator<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpCollaborator")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

impl<R: Resource> Clone for HttpCollaborator<R> {
    fn clone(&self) -> Self {
        Self::with_client(self.client.clone(), self.base_url.clone())
    }
}

impl<R: Resource> HttpCollaborator<R> {
    /// A collaborator with its own connection pool.
    ///
    /// * `api_url` - API root, e.g. `http://localhost:3000`.
    pub fn new(api_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, parse_base_url(api_url)?))
    }

    /// Reuse an existing [`Client`] (sharing its connection pool).
    pub fn with_client(client: Client, base_url: Url) -> Self {
        Self {
            client,
            base_url,
            _resource: PhantomData,
        }
    }

    /// `{base}/api/v1/{R::PATH}[/{id}]`, with `id` percent-encoded.
    pub fn url(&self, id: Option<&str>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["api", "v1"])
                .extend(R::PATH.split('/'));
            if let Some(id) = id {
                segments.push(id);
            }
        }
        url
    }

    fn fail(error: ClientError, op: &str, id: &str) -> CoreError {
        tracing::warn!(entity = R::ENTITY, op, id, error = %error, "Remote call failed");
        error.into_core(R::ENTITY, id)
    }
}

pub(crate) async fn ensure_success(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        return Err(ClientError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response)
}

pub(crate) async fn parse_response<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let response = ensure_success(response).await?;
    let text = response.text().await?;
    serde_json::from_str(&text).map_err(|e| ClientError::Decode(e.to_string()))
}

/// Parse an API root URL. Only `http` and `https` are accepted.
pub fn parse_base_url(api_url: &str) -> Result<Url, ClientError> {
    let url = Url::parse(api_url.trim()).map_err(|_| ClientError::InvalidUrl(api_url.into()))?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(ClientError::InvalidUrl(api_url.into()));
    }
    Ok(url)
}

#[async_trait]
impl<R: Resource> Collaborator<R> for HttpCollaborator<R> {
    async fn list(&self, query: &ListQuery) -> Result<ResultPage<R::Row>, CoreError> {
        let result: Result<ListBody<R::Row>, ClientError> = async {
            let response = self
                .client
                .get(self.url(None))
                .query(&query.to_params())
                .send()
                .await?;
            parse_response(response).await
        }
        .await;

        let body = result.map_err(|e| Self::fail(e, "list", ""))?;
        tracing::debug!(entity = R::ENTITY, page = query.page, total = body.total, "Fetched page");
        Ok(ResultPage {
            items: body.items,
            total: body.total,
        })
    }

    async fn get(&self, id: &str) -> Result<R::Row, CoreError> {
        let result: Result<R::Row, ClientError> = async {
            let response = self.client.get(self.url(Some(id))).send().await?;
            parse_response(response).await
        }
        .await;
        result.map_err(|e| Self::fail(e, "get", id))
    }

    async fn create(&self, draft: &R::Draft) -> Result<R::Row, CoreError> {
        let result: Result<R::Row, ClientError> = async {
            let response = self.client.post(self.url(None)).json(draft).send().await?;
            parse_response(response).await
        }
        .await;
        result.map_err(|e| Self::fail(e, "create", ""))
    }

    async fn update(&self, id: &str, draft: &R::Draft) -> Result<R::Row, CoreError> {
        let result: Result<R::Row, ClientError> = async {
            let response = self
                .client
                .put(self.url(Some(id)))
                .json(draft)
                .send()
                .await?;
            parse_response(response).await
        }
        .await;
        result.map_err(|e| Self::fail(e, "update", id))
    }

    async fn delete(&self, id: &str) -> Result<(), CoreError> {
        let result: Result<(), ClientError> = async {
            let response = self.client.delete(self.url(Some(id))).send().await?;
            ensure_success(response).await.map(|_| ())
        }
        .await;
        result.map_err(|e| Self::fail(e, "delete", id))
    }
}
