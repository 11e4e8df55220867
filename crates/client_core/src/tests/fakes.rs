//! In-memory collaborators for session and pipeline tests.

use std::{
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::{SystemTime, UNIX_EPOCH},
};

use async_trait::async_trait;
use shared::domain::{ConnectionName, ContainerId, FileRecord, FileType, RecordContext};

use crate::{
    error::ServiceError,
    services::{
        IdentifierResolver, ListingService, PresignService, StorageEndpoint, TransferHeaders,
    },
    session::SessionServices,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecordedPut {
    pub url: String,
    pub payload: Vec<u8>,
    pub headers: TransferHeaders,
}

#[derive(Debug, Default)]
pub(crate) struct Calls {
    pub resolve: usize,
    pub list: Vec<ContainerId>,
    pub presign: Vec<(ContainerId, String)>,
    pub puts: Vec<RecordedPut>,
}

pub(crate) struct FakeServices {
    pub container: Mutex<Result<ContainerId, ServiceError>>,
    pub listing: Mutex<Result<Vec<FileRecord>, ServiceError>>,
    pub write_url: Mutex<Result<String, ServiceError>>,
    pub put_status: Mutex<Result<u16, ServiceError>>,
    pub calls: Mutex<Calls>,
}

impl FakeServices {
    pub fn healthy() -> Arc<Self> {
        Arc::new(Self {
            container: Mutex::new(Ok(ContainerId::new("CASE-0042"))),
            listing: Mutex::new(Ok(sample_listing())),
            write_url: Mutex::new(Ok("https://bucket.example/CASE-0042/upload".to_string())),
            put_status: Mutex::new(Ok(200)),
            calls: Mutex::new(Calls::default()),
        })
    }

    pub fn session_services(self: &Arc<Self>) -> SessionServices {
        SessionServices {
            resolver: self.clone(),
            listing: self.clone(),
            presign: self.clone(),
            storage: self.clone(),
        }
    }

    pub fn set_container(&self, value: Result<ContainerId, ServiceError>) {
        *self.container.lock().expect("lock") = value;
    }

    pub fn set_listing(&self, value: Result<Vec<FileRecord>, ServiceError>) {
        *self.listing.lock().expect("lock") = value;
    }

    pub fn set_write_url(&self, value: Result<String, ServiceError>) {
        *self.write_url.lock().expect("lock") = value;
    }

    pub fn set_put_status(&self, value: Result<u16, ServiceError>) {
        *self.put_status.lock().expect("lock") = value;
    }

    pub fn resolve_calls(&self) -> usize {
        self.calls.lock().expect("lock").resolve
    }

    pub fn list_calls(&self) -> usize {
        self.calls.lock().expect("lock").list.len()
    }

    pub fn presign_calls(&self) -> Vec<(ContainerId, String)> {
        self.calls.lock().expect("lock").presign.clone()
    }

    pub fn puts(&self) -> Vec<RecordedPut> {
        self.calls.lock().expect("lock").puts.clone()
    }
}

#[async_trait]
impl IdentifierResolver for FakeServices {
    async fn resolve(&self, _context: &RecordContext) -> Result<ContainerId, ServiceError> {
        self.calls.lock().expect("lock").resolve += 1;
        self.container.lock().expect("lock").clone()
    }
}

#[async_trait]
impl ListingService for FakeServices {
    async fn list_files(
        &self,
        _connection: &ConnectionName,
        container: &ContainerId,
    ) -> Result<Vec<FileRecord>, ServiceError> {
        self.calls.lock().expect("lock").list.push(container.clone());
        self.listing.lock().expect("lock").clone()
    }
}

#[async_trait]
impl PresignService for FakeServices {
    async fn presign_upload(
        &self,
        _connection: &ConnectionName,
        container: &ContainerId,
        file_name: &str,
    ) -> Result<String, ServiceError> {
        self.calls
            .lock()
            .expect("lock")
            .presign
            .push((container.clone(), file_name.to_string()));
        self.write_url.lock().expect("lock").clone()
    }
}

#[async_trait]
impl StorageEndpoint for FakeServices {
    async fn put(
        &self,
        url: &str,
        payload: Vec<u8>,
        headers: &TransferHeaders,
    ) -> Result<u16, ServiceError> {
        self.calls.lock().expect("lock").puts.push(RecordedPut {
            url: url.to_string(),
            payload,
            headers: headers.clone(),
        });
        self.put_status.lock().expect("lock").clone()
    }
}

pub(crate) fn sample_listing() -> Vec<FileRecord> {
    vec![
        FileRecord::new("photos", FileType::Folder, "https://files.example/photos/"),
        FileRecord::new("front.png", FileType::Image, "https://files.example/front.png"),
        FileRecord::new("rear.jpg", FileType::Image, "https://files.example/rear.jpg"),
        FileRecord::new(
            "Claim+Form.pdf",
            FileType::Document,
            "https://files.example/Claim+Form.pdf",
        ),
    ]
}

static TEMP_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Writes `contents` to a unique file under the temp dir. Callers remove it.
pub(crate) fn temp_file(name: &str, contents: &[u8]) -> PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let n = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let dir = std::env::temp_dir().join(format!("file_session_test_{suffix}_{n}"));
    std::fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write temp file");
    path
}

pub(crate) fn remove_temp_file(path: &Path) {
    if let Some(dir) = path.parent() {
        let _ = std::fs::remove_dir_all(dir);
    }
}
