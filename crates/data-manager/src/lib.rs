//! Data Manager crate for Plotboard
//! Network access for the upload and map pages

pub mod data_client;
pub mod http_client;
pub mod transport;
pub mod upload_client;

pub use data_client::DataClient;
pub use http_client::HttpClient;
pub use transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, RequestBody};
pub use upload_client::UploadClient;
