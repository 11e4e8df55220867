//! Remote collaborators of a file session and their HTTP implementations.

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use shared::{
    domain::{ConnectionName, ContainerId, FileRecord, RecordContext},
    error::ApiErrorBody,
    protocol::{IdentifierRequest, ListFilesRequest, PresignUploadRequest},
};
use url::Url;

use crate::error::ServiceError;

pub const UPLOAD_CONTENT_TYPE: &str = "application/octet-stream";

#[async_trait]
pub trait IdentifierResolver: Send + Sync {
    async fn resolve(&self, context: &RecordContext) -> Result<ContainerId, ServiceError>;
}

#[async_trait]
pub trait ListingService: Send + Sync {
    async fn list_files(
        &self,
        connection: &ConnectionName,
        container: &ContainerId,
    ) -> Result<Vec<FileRecord>, ServiceError>;
}

#[async_trait]
pub trait PresignService: Send + Sync {
    /// One-time write URL for `file_name` inside `container`.
    async fn presign_upload(
        &self,
        connection: &ConnectionName,
        container: &ContainerId,
        file_name: &str,
    ) -> Result<String, ServiceError>;
}

#[async_trait]
pub trait StorageEndpoint: Send + Sync {
    /// Sends `payload` with a PUT and returns the response status.
    async fn put(
        &self,
        url: &str,
        payload: Vec<u8>,
        headers: &TransferHeaders,
    ) -> Result<u16, ServiceError>;
}

/// Headers attached to the direct-to-storage PUT.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferHeaders {
    pub content_type: String,
    pub allow_origin: String,
}

impl TransferHeaders {
    pub fn for_origin(page: &Url) -> Self {
        Self {
            content_type: UPLOAD_CONTENT_TYPE.to_string(),
            allow_origin: page_origin(page),
        }
    }

    pub fn pairs(&self) -> [(&'static str, String); 4] {
        [
            ("Content-Type", self.content_type.clone()),
            ("Access-Control-Allow-Origin", self.allow_origin.clone()),
            ("Access-Control-Allow-Methods", "PUT".to_string()),
            ("Access-Control-Allow-Headers", "Content-Type".to_string()),
        ]
    }
}

/// `scheme://host` of the hosting page, without port or path.
pub fn page_origin(page: &Url) -> String {
    format!("{}://{}", page.scheme(), page.host_str().unwrap_or_default())
}

/// JSON-over-HTTP client for the record file controller.
pub struct HttpFileExplorerApi {
    http: Client,
    base_url: Url,
}

impl HttpFileExplorerApi {
    pub fn new(base_url: Url) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url.as_str().trim_end_matches('/'))
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ServiceError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let response = self.http.post(self.endpoint(path)).json(body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            tracing::warn!(path, status = status.as_u16(), "controller: request rejected");
            return Err(ServiceError::Api(ApiErrorBody::message_from_bytes(&body)));
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl IdentifierResolver for HttpFileExplorerApi {
    async fn resolve(&self, context: &RecordContext) -> Result<ContainerId, ServiceError> {
        let value: String = self
            .post_json("identifier", &IdentifierRequest::from(context))
            .await?;
        Ok(ContainerId(value))
    }
}

#[async_trait]
impl ListingService for HttpFileExplorerApi {
    async fn list_files(
        &self,
        connection: &ConnectionName,
        container: &ContainerId,
    ) -> Result<Vec<FileRecord>, ServiceError> {
        self.post_json(
            "files",
            &ListFilesRequest {
                connection: connection.clone(),
                identifier: container.clone(),
            },
        )
        .await
    }
}

#[async_trait]
impl PresignService for HttpFileExplorerApi {
    async fn presign_upload(
        &self,
        connection: &ConnectionName,
        container: &ContainerId,
        file_name: &str,
    ) -> Result<String, ServiceError> {
        self.post_json(
            "presign",
            &PresignUploadRequest {
                connection: connection.clone(),
                identifier: container.clone(),
                name: file_name.to_string(),
            },
        )
        .await
    }
}

pub struct HttpStorageEndpoint {
    http: Client,
}

impl HttpStorageEndpoint {
    pub fn new() -> Self {
        Self::with_client(Client::new())
    }

    pub fn with_client(http: Client) -> Self {
        Self { http }
    }
}

impl Default for HttpStorageEndpoint {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StorageEndpoint for HttpStorageEndpoint {
    async fn put(
        &self,
        url: &str,
        payload: Vec<u8>,
        headers: &TransferHeaders,
    ) -> Result<u16, ServiceError> {
        let mut request = self.http.put(url);
        for (name, value) in headers.pairs() {
            request = request.header(name, value);
        }
        let response = request.body(payload).send().await?;
        Ok(response.status().as_u16())
    }
}

#[cfg(test)]
#[path = "tests/services_tests.rs"]
mod tests;
