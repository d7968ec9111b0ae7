//! CSRF token retrieval and multipart file upload

use plotboard_config::BackendConfig;
use plotboard_shared::{CsrfTokenResponse, PlotboardError, PlotboardResult, SelectedFile};

use crate::transport::{HttpRequest, HttpTransport};

#[derive(Debug, Clone)]
pub struct UploadClient<T> {
    transport: T,
    backend: BackendConfig,
}

impl<T: HttpTransport> UploadClient<T> {
    pub fn new(transport: T, backend: BackendConfig) -> Self {
        Self { transport, backend }
    }

    pub fn backend(&self) -> &BackendConfig {
        &self.backend
    }

    /// Credentialed GET of the token endpoint
    pub async fn fetch_csrf_token(&self) -> PlotboardResult<String> {
        let url = self.backend.csrf_token_url().map_err(config_error)?;
        let response = self
            .transport
            .send(HttpRequest::get(url).with_credentials())
            .await?
            .error_for_status()?;

        let body: CsrfTokenResponse = response.json()?;
        Ok(body.csrf_token)
    }

    /// Credentialed multipart POST of `file`
    ///
    /// Success is decided by status alone; the response body is ignored.
    pub async fn upload(&self, file: SelectedFile, csrf_token: &str) -> PlotboardResult<()> {
        let url = self.backend.upload_url().map_err(config_error)?;
        let request = HttpRequest::post_multipart(url, &self.backend.upload_field, file)
            .with_header(&self.backend.csrf_header, csrf_token)
            .with_credentials();

        self.transport.send(request).await?.error_for_status()?;
        Ok(())
    }
}

pub(crate) fn config_error(err: plotboard_config::ConfigError) -> PlotboardError {
    PlotboardError::InvalidConfig {
        message: err.to_string(),
        field: Some("backend".to_string()),
    }
}
