//! Paginated record retrieval from `/api/data`

use plotboard_config::BackendConfig;
use plotboard_shared::{DataPage, Endpoint, PlotboardResult};
use url::Url;

use crate::transport::{HttpRequest, HttpTransport};
use crate::upload_client::config_error;

#[derive(Debug, Clone)]
pub struct DataClient<T> {
    transport: T,
    backend: BackendConfig,
}

impl<T: HttpTransport> DataClient<T> {
    pub fn new(transport: T, backend: BackendConfig) -> Self {
        Self { transport, backend }
    }

    pub fn backend(&self) -> &BackendConfig {
        &self.backend
    }

    pub fn page_url(&self, endpoint: Endpoint, page: u32) -> PlotboardResult<Url> {
        self.backend.data_url(endpoint, page).map_err(config_error)
    }

    pub async fn fetch_page(&self, endpoint: Endpoint, page: u32) -> PlotboardResult<DataPage> {
        let url = self.page_url(endpoint, page)?;
        self.fetch_url(url).await
    }

    /// Unauthenticated GET of an already-built page URL
    pub async fn fetch_url(&self, url: Url) -> PlotboardResult<DataPage> {
        let response = self
            .transport
            .send(HttpRequest::get(url))
            .await?
            .error_for_status()?;
        response.json()
    }
}
