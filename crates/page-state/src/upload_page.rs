//! Upload page store: CSRF token and a single selected file

use plotboard_data::{HttpTransport, UploadClient};
use plotboard_shared::{Notification, NotificationQueue, PlotboardResult, SelectedFile};

pub const TOKEN_FETCHED: &str = "CSRF token fetched successfully";
pub const UPLOAD_SUCCEEDED: &str = "File uploaded successfully";
pub const UPLOAD_REJECTED: &str = "File upload failed";
pub const UPLOAD_ERRORED: &str = "Error uploading file";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
    /// Nothing selected, no request sent
    NoFile,
    Uploaded,
    /// Server answered with a non-success status
    Rejected,
    /// The request never got an answer
    Failed,
}

/// What `submit` sends; produced by [`UploadPage::begin_submit`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub file: SelectedFile,
    pub csrf_token: String,
}

pub struct UploadPage<T> {
    client: UploadClient<T>,
    csrf_token: String,
    selected: Option<SelectedFile>,
    notifications: NotificationQueue,
}

impl<T: HttpTransport> UploadPage<T> {
    pub fn new(client: UploadClient<T>) -> Self {
        Self {
            client,
            csrf_token: String::new(),
            selected: None,
            notifications: NotificationQueue::new(),
        }
    }

    /// Fetch the CSRF token; failures are logged and leave the token empty
    pub async fn mount(&mut self) -> bool {
        let result = self.client.fetch_csrf_token().await;
        self.complete_mount(result)
    }

    pub fn complete_mount(&mut self, result: PlotboardResult<String>) -> bool {
        match result {
            Ok(token) => {
                self.csrf_token = token;
                self.notifications.success(TOKEN_FETCHED);
                log::info!("CSRF token fetched");
                true
            }
            Err(e) => {
                log::error!("Error fetching CSRF token: {e}");
                false
            }
        }
    }

    /// Replace the selected file
    pub fn select_file(&mut self, file: SelectedFile) {
        log::debug!("Selected {} ({} bytes)", file.name, file.len());
        self.selected = Some(file);
    }

    /// Snapshot of what a submit would send, or `None` without a file
    pub fn begin_submit(&self) -> Option<UploadRequest> {
        let file = self.selected.clone()?;
        if self.csrf_token.is_empty() {
            log::warn!("Submitting {} without a CSRF token", file.name);
        }
        Some(UploadRequest {
            file,
            csrf_token: self.csrf_token.clone(),
        })
    }

    pub fn complete_submit(&mut self, result: PlotboardResult<()>) -> UploadOutcome {
        match result {
            Ok(()) => {
                log::info!("File uploaded successfully");
                self.notifications.success(UPLOAD_SUCCEEDED);
                UploadOutcome::Uploaded
            }
            Err(e) if e.is_status() => {
                log::error!("File upload failed: {e}");
                self.notifications.error(UPLOAD_REJECTED);
                UploadOutcome::Rejected
            }
            Err(e) => {
                log::error!("Error uploading file: {e}");
                self.notifications.error(UPLOAD_ERRORED);
                UploadOutcome::Failed
            }
        }
    }

    pub async fn submit(&mut self) -> UploadOutcome {
        let Some(request) = self.begin_submit() else {
            return UploadOutcome::NoFile;
        };
        let result = self.client.upload(request.file, &request.csrf_token).await;
        self.complete_submit(result)
    }

    pub fn csrf_token(&self) -> &str {
        &self.csrf_token
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    pub fn client(&self) -> &UploadClient<T> {
        &self.client
    }

    pub fn notifications(&self) -> &NotificationQueue {
        &self.notifications
    }

    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain()
    }
}
