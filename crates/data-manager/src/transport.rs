//! Request/response contract between the pages and the network

use async_trait::async_trait;
use plotboard_shared::{PlotboardError, PlotboardResult, SelectedFile};
use serde::de::DeserializeOwned;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    Empty,
    /// A single file part under `field`
    Multipart { field: String, file: SelectedFile },
}

/// Everything a transport needs to issue one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    /// Send cookies along (`credentials: "include"` in the browser)
    pub credentials: bool,
    pub body: RequestBody,
}

impl HttpRequest {
    pub fn get(url: Url) -> Self {
        Self {
            method: HttpMethod::Get,
            url,
            headers: Vec::new(),
            credentials: false,
            body: RequestBody::Empty,
        }
    }

    pub fn post_multipart(url: Url, field: &str, file: SelectedFile) -> Self {
        Self {
            method: HttpMethod::Post,
            url,
            headers: Vec::new(),
            credentials: false,
            body: RequestBody::Multipart {
                field: field.to_string(),
                file,
            },
        }
    }

    pub fn with_credentials(mut self) -> Self {
        self.credentials = true;
        self
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Status and raw body of a completed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub url: Url,
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Fail with `HttpStatus` unless the status is 2xx
    pub fn error_for_status(self) -> PlotboardResult<Self> {
        if self.is_ok() {
            Ok(self)
        } else {
            Err(PlotboardError::HttpStatus {
                url: self.url.to_string(),
                status: self.status,
            })
        }
    }

    pub fn json<T: DeserializeOwned>(&self) -> PlotboardResult<T> {
        serde_json::from_slice(&self.body).map_err(|e| {
            PlotboardError::decode(format!("{} (URL: {})", e, self.url))
        })
    }
}

/// Anything able to perform an `HttpRequest`
///
/// Transport failures (DNS, refused connection, timeout) are errors; any
/// HTTP status, including 4xx/5xx, is a successful `HttpResponse`.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait HttpTransport {
    async fn send(&self, request: HttpRequest) -> PlotboardResult<HttpResponse>;
}
