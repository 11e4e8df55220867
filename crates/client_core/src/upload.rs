//! Direct-to-storage upload: local read into a data URL, chunked decode, presign, PUT.

use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use shared::domain::{ConnectionName, ContainerId};
use tracing::info;
use url::Url;

use crate::{
    error::FileSessionError,
    services::{PresignService, StorageEndpoint, TransferHeaders},
};

pub const DECODE_CHUNK_SIZE: usize = 512;
pub const ACCEPTED_EXTENSIONS: [&str; 6] = ["pdf", "doc", "docx", "jpg", "jpeg", "png"];

pub fn is_accepted_format(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            ACCEPTED_EXTENSIONS
                .iter()
                .any(|accepted| accepted.eq_ignore_ascii_case(ext))
        })
}

pub fn encode_data_url(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{mime_type};base64,{}", STANDARD.encode(bytes))
}

/// Everything after the first `,`; the whole input when there is no metadata prefix.
pub fn data_url_payload(data_url: &str) -> &str {
    data_url
        .split_once(',')
        .map_or(data_url, |(_, payload)| payload)
}

/// Decodes base64 text a bounded chunk at a time.
///
/// Each step consumes a whole number of 4-character groups so no chunk ever
/// splits a group, and yields at most `chunk_size` bytes (at least one group).
pub struct ChunkedBase64Decoder<'a> {
    remaining: &'a [u8],
    chunk_chars: usize,
}

impl<'a> ChunkedBase64Decoder<'a> {
    pub fn new(encoded: &'a str, chunk_size: usize) -> Self {
        let groups = (chunk_size / 3).max(1);
        Self {
            remaining: encoded.as_bytes(),
            chunk_chars: groups * 4,
        }
    }
}

impl Iterator for ChunkedBase64Decoder<'_> {
    type Item = Result<Vec<u8>, base64::DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining.is_empty() {
            return None;
        }
        let take = self.chunk_chars.min(self.remaining.len());
        let (chunk, rest) = self.remaining.split_at(take);
        self.remaining = rest;
        Some(STANDARD.decode(chunk))
    }
}

pub fn decode_data_url(data_url: &str, chunk_size: usize) -> Result<Vec<u8>, FileSessionError> {
    let payload = data_url_payload(data_url);
    let mut bytes = Vec::with_capacity(payload.len() / 4 * 3);
    for chunk in ChunkedBase64Decoder::new(payload, chunk_size) {
        let chunk = chunk.map_err(|e| FileSessionError::Decode(e.to_string()))?;
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

pub async fn read_data_url(path: &Path) -> std::io::Result<String> {
    let bytes = tokio::fs::read(path).await?;
    let mime_type = mime_guess::from_path(path).first_or_octet_stream();
    Ok(encode_data_url(mime_type.essence_str(), &bytes))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub name: String,
}

impl SelectedFile {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { path, name }
    }
}

/// Local file picked in the upload modal. Lives only while that modal is open.
#[derive(Debug, Clone, Default)]
pub struct UploadDraft {
    file: Option<SelectedFile>,
    data_url: Option<String>,
    ready: bool,
}

impl UploadDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    pub fn data_url(&self) -> Option<&str> {
        self.data_url.as_deref()
    }

    /// Replaces the selection and reads it fully; `ready` is set only once the read completes.
    /// Any earlier selection is dropped first, even when the new one is rejected.
    pub async fn load(&mut self, path: impl Into<PathBuf>) -> Result<(), FileSessionError> {
        self.ready = false;
        self.data_url = None;
        self.file = None;

        let file = SelectedFile::from_path(path);
        if !is_accepted_format(&file.name) {
            return Err(FileSessionError::UnsupportedFormat { name: file.name });
        }
        self.file = Some(file.clone());

        let data_url = read_data_url(&file.path)
            .await
            .map_err(|e| FileSessionError::Read {
                name: file.name.clone(),
                reason: e.to_string(),
            })?;
        info!(file_name = %file.name, encoded_len = data_url.len(), "upload: file loaded");
        self.data_url = Some(data_url);
        self.ready = true;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOutcome {
    pub file_name: String,
    pub bytes_sent: usize,
}

pub struct UploadPipeline<'a> {
    presign: &'a dyn PresignService,
    storage: &'a dyn StorageEndpoint,
    connection: &'a ConnectionName,
    headers: TransferHeaders,
    chunk_size: usize,
}

impl<'a> UploadPipeline<'a> {
    pub fn new(
        presign: &'a dyn PresignService,
        storage: &'a dyn StorageEndpoint,
        connection: &'a ConnectionName,
        page: &Url,
    ) -> Self {
        Self {
            presign,
            storage,
            connection,
            headers: TransferHeaders::for_origin(page),
            chunk_size: DECODE_CHUNK_SIZE,
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Consumes the draft. Only a 200 from storage counts as stored.
    pub async fn upload(
        &self,
        draft: UploadDraft,
        container: &ContainerId,
    ) -> Result<UploadOutcome, FileSessionError> {
        let (file, data_url) = match (draft.file, draft.data_url) {
            (Some(file), Some(data_url)) if draft.ready => (file, data_url),
            (file, _) => {
                return Err(FileSessionError::Read {
                    name: file.map(|f| f.name).unwrap_or_default(),
                    reason: "file has not finished loading".to_string(),
                })
            }
        };

        let payload = decode_data_url(&data_url, self.chunk_size)?;
        drop(data_url);

        info!(container = %container, file_name = %file.name, "upload: requesting write url");
        let url = self
            .presign
            .presign_upload(self.connection, container, &file.name)
            .await
            .map_err(FileSessionError::Presign)?;

        let bytes_sent = payload.len();
        info!(file_name = %file.name, bytes = bytes_sent, "upload: sending to storage");
        let status = self
            .storage
            .put(&url, payload, &self.headers)
            .await
            .map_err(FileSessionError::Transfer)?;
        if status != 200 {
            return Err(FileSessionError::TransferStatus { status });
        }

        Ok(UploadOutcome {
            file_name: file.name,
            bytes_sent,
        })
    }
}

#[cfg(test)]
#[path = "tests/upload_tests.rs"]
mod tests;
