use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::{ItemId, ListQuery},
    error::ErrorBody,
    protocol::{
        CategoryList, DeleteConfirmation, HealthStatus, Item, ItemPayload, RootMessage,
        SearchQuery, Statistics,
    },
};
use tracing::debug;
use url::Url;

use crate::error::{ClientError, ClientResult};

/// REST surface of the remote catalog service.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn root(&self) -> ClientResult<RootMessage>;
    async fn health(&self) -> ClientResult<HealthStatus>;
    async fn list_items(&self, query: &ListQuery) -> ClientResult<Vec<Item>>;
    async fn search_items(&self, term: &str) -> ClientResult<Vec<Item>>;
    async fn get_item(&self, id: ItemId) -> ClientResult<Item>;
    async fn create_item(&self, payload: &ItemPayload) -> ClientResult<Item>;
    async fn update_item(&self, id: ItemId, payload: &ItemPayload) -> ClientResult<Item>;
    async fn delete_item(&self, id: ItemId) -> ClientResult<DeleteConfirmation>;
    async fn statistics(&self) -> ClientResult<Statistics>;
    async fn categories(&self) -> ClientResult<Vec<String>>;
}

/// No retries; every call is a single request.
pub struct HttpCatalogApi {
    http: Client,
    base_url: Option<String>,
}

impl HttpCatalogApi {
    // a missing base URL surfaces as MissingBaseUrl on each request
    pub fn new(base_url: Option<&str>, timeout: Option<Duration>) -> ClientResult<Self> {
        let base_url = base_url.map(normalize_base_url).transpose()?;
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(ClientError::HttpClient)?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    fn endpoint(&self, path: &str) -> ClientResult<String> {
        let base = self.base_url.as_deref().ok_or(ClientError::MissingBaseUrl)?;
        Ok(format!("{base}{path}"))
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let response = request.send().await.map_err(ClientError::Connection)?;
        let response = ensure_success(response).await?;
        response.json::<T>().await.map_err(ClientError::Decode)
    }
}

fn normalize_base_url(raw: &str) -> ClientResult<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    Url::parse(trimmed).map_err(|source| ClientError::InvalidBaseUrl {
        url: raw.to_string(),
        source,
    })?;
    Ok(trimmed.to_string())
}

async fn ensure_success(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let detail = match response.bytes().await {
        Ok(body) => serde_json::from_slice::<ErrorBody>(&body)
            .ok()
            .and_then(|body| body.detail_text()),
        Err(_) => None,
    };
    Err(ClientError::Status {
        status: status.as_u16(),
        detail,
    })
}

#[async_trait]
impl CatalogApi for HttpCatalogApi {
    async fn root(&self) -> ClientResult<RootMessage> {
        let url = self.endpoint("/")?;
        self.fetch(self.http.get(url)).await
    }

    async fn health(&self) -> ClientResult<HealthStatus> {
        let url = self.endpoint("/health")?;
        self.fetch(self.http.get(url)).await
    }

    async fn list_items(&self, query: &ListQuery) -> ClientResult<Vec<Item>> {
        let url = self.endpoint("/items")?;
        debug!(?query, "listing items");
        self.fetch(self.http.get(url).query(query)).await
    }

    async fn search_items(&self, term: &str) -> ClientResult<Vec<Item>> {
        let url = self.endpoint("/search")?;
        debug!(term, "searching items");
        self.fetch(self.http.get(url).query(&SearchQuery { q: term }))
            .await
    }

    async fn get_item(&self, id: ItemId) -> ClientResult<Item> {
        let url = self.endpoint(&format!("/items/{id}"))?;
        self.fetch(self.http.get(url)).await
    }

    async fn create_item(&self, payload: &ItemPayload) -> ClientResult<Item> {
        let url = self.endpoint("/items")?;
        debug!(name = %payload.name, "creating item");
        self.fetch(self.http.post(url).json(payload)).await
    }

    async fn update_item(&self, id: ItemId, payload: &ItemPayload) -> ClientResult<Item> {
        let url = self.endpoint(&format!("/items/{id}"))?;
        debug!(%id, "updating item");
        self.fetch(self.http.put(url).json(payload)).await
    }

    async fn delete_item(&self, id: ItemId) -> ClientResult<DeleteConfirmation> {
        let url = self.endpoint(&format!("/items/{id}"))?;
        debug!(%id, "deleting item");
        self.fetch(self.http.delete(url)).await
    }

    async fn statistics(&self) -> ClientResult<Statistics> {
        let url = self.endpoint("/statistics")?;
        self.fetch(self.http.get(url)).await
    }

    async fn categories(&self) -> ClientResult<Vec<String>> {
        let url = self.endpoint("/categories")?;
        let labels: CategoryList = self.fetch(self.http.get(url)).await?;
        Ok(labels.into_labels())
    }
}
