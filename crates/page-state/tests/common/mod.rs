//! Scripted in-memory transport shared by the page tests

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use plotboard_data::{HttpRequest, HttpResponse, HttpTransport};
use plotboard_shared::{PlotboardError, PlotboardResult, Record};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Clone)]
enum Reply {
    Status(u16, String),
    Error(PlotboardError),
}

#[derive(Default)]
struct State {
    requests: Vec<HttpRequest>,
    routes: HashMap<String, Reply>,
}

/// Answers requests by path-and-query; unknown routes get a 404
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    state: Arc<Mutex<State>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, path_and_query: &str, status: u16, body: &str) {
        self.state.lock().routes.insert(
            path_and_query.to_string(),
            Reply::Status(status, body.to_string()),
        );
    }

    pub fn fail(&self, path_and_query: &str, error: PlotboardError) {
        self.state
            .lock()
            .routes
            .insert(path_and_query.to_string(), Reply::Error(error));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.state.lock().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.state.lock().requests.len()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> PlotboardResult<HttpResponse> {
        let key = match request.url.query() {
            Some(query) => format!("{}?{}", request.url.path(), query),
            None => request.url.path().to_string(),
        };

        let mut state = self.state.lock();
        let reply = state.routes.get(&key).cloned();
        let url = request.url.clone();
        state.requests.push(request);

        match reply {
            Some(Reply::Status(status, body)) => Ok(HttpResponse {
                url,
                status,
                body: body.into_bytes(),
            }),
            Some(Reply::Error(e)) => Err(e),
            None => Ok(HttpResponse {
                url,
                status: 404,
                body: Vec::new(),
            }),
        }
    }
}

/// JSON body of a data page with `count` records named `<prefix>-<i>`
pub fn page_body(prefix: &str, count: usize, total_pages: u32) -> String {
    let data: Vec<Record> = (0..count)
        .map(|i| {
            Record::new(
                &format!("{prefix}-{i}"),
                0.1 * i as f64,
                0.5,
                1.0,
                "#336699",
            )
        })
        .collect();
    serde_json::json!({ "data": data, "total_pages": total_pages }).to_string()
}
