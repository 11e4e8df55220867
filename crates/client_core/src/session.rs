//! Root coordinator: record context -> container -> listing, plus filter, modal and upload events.

use std::{collections::VecDeque, path::PathBuf, sync::Arc};

use shared::domain::{ConnectionName, ContainerId, FileRecord, RecordContext};
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};
use url::Url;

use crate::{
    catalog::{categorize, filter_by_type, CategoryCount, CategoryLabels, FilterState, TypeSelector},
    commands::{DownloadRequest, ExplorerCommand, Notification, SessionEvent},
    error::{FileSessionError, ServiceError},
    modal::{KeyListeners, ModalController, ModalState},
    services::{
        HttpFileExplorerApi, HttpStorageEndpoint, IdentifierResolver, ListingService,
        PresignService, StorageEndpoint,
    },
    upload::{UploadDraft, UploadOutcome, UploadPipeline, DECODE_CHUNK_SIZE},
};

/// Coarse lifecycle of a session.
///
/// `Errored` is left through a new `resolve_identifier` or the refetch after a stored upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    Unresolved,
    Resolving,
    Ready,
    Refreshing,
    Errored,
}

#[derive(Clone)]
pub struct SessionServices {
    pub resolver: Arc<dyn IdentifierResolver>,
    pub listing: Arc<dyn ListingService>,
    pub presign: Arc<dyn PresignService>,
    pub storage: Arc<dyn StorageEndpoint>,
}

impl SessionServices {
    pub fn http(api_base: Url) -> Self {
        let api = Arc::new(HttpFileExplorerApi::new(api_base));
        Self {
            resolver: api.clone(),
            listing: api.clone(),
            presign: api,
            storage: Arc::new(HttpStorageEndpoint::new()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub connection: ConnectionName,
    /// Page hosting the explorer; its origin goes into the upload headers.
    pub page_origin: Url,
    pub labels: CategoryLabels,
    pub decode_chunk_size: usize,
}

impl SessionOptions {
    pub fn new(connection: ConnectionName, page_origin: Url) -> Self {
        Self {
            connection,
            page_origin,
            labels: CategoryLabels::default(),
            decode_chunk_size: DECODE_CHUNK_SIZE,
        }
    }

    pub fn with_labels(mut self, labels: CategoryLabels) -> Self {
        self.labels = labels;
        self
    }
}

/// Everything a shell needs to draw the explorer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplorerView {
    pub phase: SessionPhase,
    pub categories: Vec<CategoryCount>,
    /// `None` until a listing has loaded.
    pub files: Option<Vec<FileRecord>>,
    pub modal: ModalState,
    pub upload_ready: bool,
    pub type_filter: TypeSelector,
    pub query: Option<String>,
    pub error: Option<String>,
}

pub struct FileSession {
    services: SessionServices,
    options: SessionOptions,
    listeners: KeyListeners,
    phase: SessionPhase,
    container: Option<ContainerId>,
    files: Option<Vec<FileRecord>>,
    filter: FilterState,
    modal: ModalController,
    draft: Option<UploadDraft>,
    error: Option<String>,
    events: broadcast::Sender<SessionEvent>,
}

impl FileSession {
    pub fn new(services: SessionServices, options: SessionOptions) -> Self {
        Self::with_listeners(services, options, KeyListeners::new())
    }

    pub fn with_listeners(
        services: SessionServices,
        options: SessionOptions,
        listeners: KeyListeners,
    ) -> Self {
        let (events, _) = broadcast::channel(256);
        Self {
            services,
            options,
            modal: ModalController::new(listeners.clone()),
            listeners,
            phase: SessionPhase::Unresolved,
            container: None,
            files: None,
            filter: FilterState::default(),
            draft: None,
            error: None,
            events,
        }
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub fn key_listeners(&self) -> &KeyListeners {
        &self.listeners
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn container(&self) -> Option<&ContainerId> {
        self.container.as_ref()
    }

    pub fn files(&self) -> Option<&[FileRecord]> {
        self.files.as_deref()
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn modal_state(&self) -> &ModalState {
        self.modal.state()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn upload_ready(&self) -> bool {
        self.draft.as_ref().is_some_and(UploadDraft::is_ready)
    }

    pub fn categories(&self) -> Vec<CategoryCount> {
        categorize(self.files.as_deref().unwrap_or_default(), &self.options.labels)
    }

    /// Files shown in the explorer. The query filter is stored but not applied here.
    pub fn visible_files(&self) -> Option<Vec<FileRecord>> {
        self.files
            .as_deref()
            .map(|files| filter_by_type(files, self.filter.selector))
    }

    pub fn view(&self) -> ExplorerView {
        ExplorerView {
            phase: self.phase,
            categories: self.categories(),
            files: self.visible_files(),
            modal: self.modal.state().clone(),
            upload_ready: self.upload_ready(),
            type_filter: self.filter.selector,
            query: self.filter.query.clone(),
            error: self.error.clone(),
        }
    }

    /// Resolves the record's container and, on success, loads its listing.
    pub async fn resolve_identifier(
        &mut self,
        context: &RecordContext,
    ) -> Result<ContainerId, FileSessionError> {
        info!(
            object_type = %context.object_type,
            record_id = %context.record_id,
            "session: resolving container"
        );
        self.phase = SessionPhase::Resolving;
        self.container = None;
        self.files = None;

        let resolved = self
            .services
            .resolver
            .resolve(context)
            .await
            .and_then(|container| {
                if container.as_str().trim().is_empty() {
                    Err(ServiceError::Api(format!(
                        "no file container for {} {}",
                        context.object_type, context.record_id
                    )))
                } else {
                    Ok(container)
                }
            });

        let container = match resolved {
            Ok(container) => container,
            Err(err) => {
                let err = FileSessionError::Lookup(err);
                self.phase = SessionPhase::Errored;
                self.surface(&err);
                self.emit(SessionEvent::ListingChanged);
                return Err(err);
            }
        };

        self.fetch_listing(container.clone()).await?;
        Ok(container)
    }

    /// Replaces the listing wholesale. A failure clears it.
    pub async fn fetch_listing(&mut self, container: ContainerId) -> Result<(), FileSessionError> {
        if self.phase == SessionPhase::Ready {
            self.phase = SessionPhase::Refreshing;
        }
        self.container = Some(container.clone());

        let result = self
            .services
            .listing
            .list_files(&self.options.connection, &container)
            .await;
        match result {
            Ok(files) => {
                info!(container = %container, count = files.len(), "session: listing loaded");
                self.files = Some(files);
                self.phase = SessionPhase::Ready;
                self.error = None;
                self.emit(SessionEvent::ListingChanged);
                Ok(())
            }
            Err(err) => {
                let err = FileSessionError::Fetch(err);
                self.files = None;
                self.phase = SessionPhase::Errored;
                self.surface(&err);
                self.emit(SessionEvent::ListingChanged);
                Err(err)
            }
        }
    }

    pub async fn refresh(&mut self) -> Result<(), FileSessionError> {
        let Some(container) = self.container.clone() else {
            debug!("session: refresh skipped, no container resolved");
            return Ok(());
        };
        if self.phase == SessionPhase::Errored {
            warn!(container = %container, "session: refresh ignored while errored");
            return Ok(());
        }
        self.fetch_listing(container).await
    }

    /// Applies a type selector. Returns false when the name was ignored.
    pub fn set_type_filter(&mut self, name: &str) -> bool {
        match TypeSelector::parse(name) {
            Some(selector) => {
                self.filter.selector = selector;
                true
            }
            None => {
                warn!(selector = name, "session: type selector ignored");
                false
            }
        }
    }

    pub fn set_query_filter(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.filter.query = if text.is_empty() { None } else { Some(text) };
    }

    pub fn select_file(&mut self, file: FileRecord) {
        self.draft = None;
        self.modal.open_preview(file);
        self.emit(SessionEvent::ModalChanged);
    }

    pub fn open_upload(&mut self) {
        self.modal.open_upload();
        self.draft = Some(UploadDraft::new());
        self.emit(SessionEvent::ModalChanged);
    }

    pub fn close_modal(&mut self) {
        self.modal.close();
        self.draft = None;
        self.emit(SessionEvent::ModalChanged);
    }

    pub fn download(&self, file: &FileRecord) -> DownloadRequest {
        let request = DownloadRequest {
            href: file.url.clone(),
            file_name: file.display_name(),
        };
        self.emit(SessionEvent::Download(request.clone()));
        request
    }

    /// Reads the chosen file into the open upload draft.
    pub async fn choose_file(&mut self, path: PathBuf) -> Result<(), FileSessionError> {
        let Some(draft) = self.draft.as_mut() else {
            warn!(path = %path.display(), "session: file chosen without an upload modal");
            return Ok(());
        };
        let result = draft.load(path).await;
        match &result {
            Ok(()) => self.error = None,
            Err(err) => self.surface(err),
        }
        self.emit(SessionEvent::ModalChanged);
        result
    }

    /// Runs the pipeline for the ready draft. The modal closes whatever the outcome;
    /// only a stored upload refreshes the listing, and it does so even from `Errored`.
    pub async fn upload(&mut self) -> Result<Option<UploadOutcome>, FileSessionError> {
        if !self.modal.state().is_upload() {
            warn!("session: upload requested without an upload modal");
            return Ok(None);
        }
        let Some(draft) = self.draft.take_if(|draft| draft.is_ready()) else {
            warn!("session: upload requested before the file finished loading");
            return Ok(None);
        };

        let result = match self.container.clone() {
            Some(container) => {
                let pipeline = UploadPipeline::new(
                    &*self.services.presign,
                    &*self.services.storage,
                    &self.options.connection,
                    &self.options.page_origin,
                )
                .with_chunk_size(self.options.decode_chunk_size);
                pipeline.upload(draft, &container).await
            }
            None => Err(FileSessionError::Presign(ServiceError::Api(
                "no file container resolved for this record".to_string(),
            ))),
        };

        self.close_modal();

        match result {
            Ok(outcome) => {
                info!(
                    file_name = %outcome.file_name,
                    bytes = outcome.bytes_sent,
                    "session: upload stored"
                );
                if let Some(container) = self.container.clone() {
                    if let Err(err) = self.fetch_listing(container).await {
                        warn!("session: upload stored but refresh failed: {err}");
                    }
                }
                Ok(Some(outcome))
            }
            Err(err) => {
                self.surface(&err);
                Err(err)
            }
        }
    }

    /// Consumes one inward command plus anything it triggers. Failures are surfaced, not returned.
    pub async fn handle(&mut self, command: ExplorerCommand) {
        let mut queue = VecDeque::from([command]);
        while let Some(command) = queue.pop_front() {
            debug!(command = command.name(), "session: handling command");
            match command {
                ExplorerCommand::Resolve(context) => {
                    let _ = self.resolve_identifier(&context).await;
                }
                ExplorerCommand::Refresh => {
                    let _ = self.refresh().await;
                }
                ExplorerCommand::TypeSelect(name) => {
                    self.set_type_filter(&name);
                }
                ExplorerCommand::Search(text) => self.set_query_filter(text),
                ExplorerCommand::Select(file) => self.select_file(file),
                ExplorerCommand::Download(file) => {
                    self.download(&file);
                }
                ExplorerCommand::OpenUpload => self.open_upload(),
                ExplorerCommand::ChooseFile(path) => {
                    let _ = self.choose_file(path).await;
                }
                ExplorerCommand::Upload => {
                    let _ = self.upload().await;
                }
                ExplorerCommand::CloseModal => self.close_modal(),
                ExplorerCommand::KeyPressed(key) => queue.extend(self.listeners.dispatch(&key)),
            }
        }
    }

    fn surface(&mut self, err: &FileSessionError) {
        let message = err.to_string();
        error!(kind = ?err.kind(), "session: {message}");
        self.error = Some(message.clone());
        self.emit(SessionEvent::Notification(Notification::error(message)));
    }

    fn emit(&self, event: SessionEvent) {
        let _ = self.events.send(event);
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
