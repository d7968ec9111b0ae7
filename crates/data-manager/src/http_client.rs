//! `reqwest`-backed transport
//!
//! In the browser reqwest issues requests through `fetch`, so credentialed
//! requests opt into `credentials: "include"`. Natively credentialed
//! requests share a cookie jar, which is what lets the CSRF cookie from the
//! token endpoint travel with the upload; requests without credentials go
//! through a second client that has no jar.

use async_trait::async_trait;
use plotboard_config::BackendConfig;
use plotboard_shared::{PlotboardError, PlotboardResult, SelectedFile};
use reqwest::multipart::{Form, Part};
use url::Url;

use crate::transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, RequestBody};

#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    #[cfg(not(target_arch = "wasm32"))]
    anonymous: reqwest::Client,
    timeout_ms: u64,
}

impl HttpClient {
    #[cfg(not(target_arch = "wasm32"))]
    pub fn new(backend: &BackendConfig) -> PlotboardResult<Self> {
        let timeout = std::time::Duration::from_millis(backend.timeout_ms);
        Ok(Self {
            client: build(reqwest::Client::builder().cookie_store(true).timeout(timeout))?,
            anonymous: build(reqwest::Client::builder().timeout(timeout))?,
            timeout_ms: backend.timeout_ms,
        })
    }

    #[cfg(target_arch = "wasm32")]
    pub fn new(backend: &BackendConfig) -> PlotboardResult<Self> {
        Ok(Self {
            client: build(reqwest::Client::builder())?,
            timeout_ms: backend.timeout_ms,
        })
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn client_for(&self, credentials: bool) -> &reqwest::Client {
        if credentials {
            &self.client
        } else {
            &self.anonymous
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn client_for(&self, _credentials: bool) -> &reqwest::Client {
        &self.client
    }

    fn map_error(&self, url: &Url, err: reqwest::Error) -> PlotboardError {
        if err.is_timeout() {
            PlotboardError::Timeout {
                message: format!("{err} (URL: {url})"),
                duration_ms: self.timeout_ms,
            }
        } else {
            PlotboardError::network(format!("{err} (URL: {url})"))
        }
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl HttpTransport for HttpClient {
    async fn send(&self, request: HttpRequest) -> PlotboardResult<HttpResponse> {
        let HttpRequest {
            method,
            url,
            headers,
            credentials,
            body,
        } = request;

        let client = self.client_for(credentials);
        let mut builder = match method {
            HttpMethod::Get => client.get(url.clone()),
            HttpMethod::Post => client.post(url.clone()),
        };

        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        #[cfg(target_arch = "wasm32")]
        if credentials {
            builder = builder.fetch_credentials_include();
        }
        if let RequestBody::Multipart { field, file } = body {
            builder = builder.multipart(multipart_form(field, file)?);
        }

        log::debug!("{method:?} {url}");

        let response = builder
            .send()
            .await
            .map_err(|e| self.map_error(&url, e))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| self.map_error(&url, e))?
            .to_vec();

        Ok(HttpResponse { url, status, body })
    }
}

fn build(builder: reqwest::ClientBuilder) -> PlotboardResult<reqwest::Client> {
    builder
        .build()
        .map_err(|e| PlotboardError::network(format!("Failed to build HTTP client: {e}")))
}

fn multipart_form(field: String, file: SelectedFile) -> PlotboardResult<Form> {
    let SelectedFile {
        name,
        content_type,
        bytes,
    } = file;

    let mut part = Part::bytes(bytes).file_name(name);
    if let Some(content_type) = content_type {
        part = part
            .mime_str(&content_type)
            .map_err(|e| PlotboardError::invalid_input("file", e.to_string()))?;
    }

    Ok(Form::new().part(field, part))
}
