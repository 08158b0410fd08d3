use async_trait::async_trait;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

use super::{CreateBlockRequest, CreateNoteRequest, NotesBackend, OkResponse, UpdateBlockRequest};
use crate::config::BlocknoteConfig;
use crate::error::{BlocknoteError, Result};
use crate::model::{Block, BlockData, BlockType, Note};

/// REST client for the notes service.
///
/// Every request carries `Content-Type: application/json`, including bodiless
/// ones, and every non-2xx response becomes [`BlocknoteError::Status`].
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(BlocknoteError::Transport)?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &BlocknoteConfig) -> Result<Self> {
        Self::new(&config.api_base, config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T, B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let mut request = self
            .client
            .request(method.clone(), self.url(path))
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(body) = body {
            request = request.body(serde_json::to_vec(body)?);
        }

        let response = request.send().await?;
        let status = response.status();
        debug!(%method, path, status = status.as_u16(), "notes api response");

        if !status.is_success() {
            return Err(BlocknoteError::Status {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send::<T, ()>(Method::GET, path, None).await
    }

    async fn delete(&self, path: &str) -> Result<bool> {
        let ack: OkResponse = self.send::<_, ()>(Method::DELETE, path, None).await?;
        Ok(ack.ok)
    }
}

#[async_trait]
impl NotesBackend for HttpBackend {
    async fn list_notes(&self) -> Result<Vec<Note>> {
        self.get("/notes").await
    }

    async fn create_note(&self, title: &str) -> Result<Note> {
        let body = CreateNoteRequest {
            title: title.to_string(),
        };
        self.send(Method::POST, "/notes", Some(&body)).await
    }

    async fn get_note(&self, id: Uuid) -> Result<Note> {
        self.get(&format!("/notes/{}", id)).await
    }

    async fn delete_note(&self, id: Uuid) -> Result<bool> {
        self.delete(&format!("/notes/{}", id)).await
    }

    async fn create_block(
        &self,
        note_id: Uuid,
        kind: BlockType,
        position: i64,
        data: &BlockData,
    ) -> Result<Block> {
        let body = CreateBlockRequest {
            kind,
            position,
            data: data.to_wire(),
        };
        self.send(Method::POST, &format!("/notes/{}/blocks", note_id), Some(&body))
            .await
    }

    async fn update_block(&self, block_id: Uuid, data: &BlockData) -> Result<Block> {
        let body = UpdateBlockRequest {
            data: data.to_wire(),
        };
        self.send(Method::PATCH, &format!("/blocks/{}", block_id), Some(&body))
            .await
    }

    async fn delete_block(&self, block_id: Uuid) -> Result<bool> {
        self.delete(&format!("/blocks/{}", block_id)).await
    }
}
