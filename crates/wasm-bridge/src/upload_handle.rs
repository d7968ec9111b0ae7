//! `UploadPageHandle`: CSRF token and file upload for the browser

use plotboard_data::{HttpClient, UploadClient};
use plotboard_pages::{UploadOutcome, UploadPage};
use plotboard_shared::{PlotboardError, SelectedFile};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{future_to_promise, JsFuture};

use crate::report::upload_status;
use crate::{load_config, to_js};

#[wasm_bindgen]
pub struct UploadPageHandle {
    page: Rc<RefCell<UploadPage<HttpClient>>>,
}

#[wasm_bindgen]
impl UploadPageHandle {
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<UploadPageHandle, JsValue> {
        let config = load_config(config_json)?;
        let transport = HttpClient::new(&config.backend)?;
        let client = UploadClient::new(transport, config.backend);

        Ok(UploadPageHandle {
            page: Rc::new(RefCell::new(UploadPage::new(client))),
        })
    }

    /// Fetch the CSRF token; resolves to whether a token was stored
    pub fn mount(&self) -> js_sys::Promise {
        let page = self.page.clone();
        future_to_promise(async move {
            let client = page.borrow().client().clone();
            let result = client.fetch_csrf_token().await;
            let stored = page.borrow_mut().complete_mount(result);
            Ok(JsValue::from_bool(stored))
        })
    }

    /// Read a browser `File` into memory and make it the selection
    #[wasm_bindgen(js_name = selectFile)]
    pub fn select_file(&self, file: web_sys::File) -> js_sys::Promise {
        let page = self.page.clone();
        future_to_promise(async move {
            let buffer = JsFuture::from(file.array_buffer())
                .await
                .map_err(|e| PlotboardError::JsInterop {
                    message: format!("Failed to read {}: {e:?}", file.name()),
                })?;
            let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
            let content_type = file.type_();

            page.borrow_mut().select_file(SelectedFile::new(
                &file.name(),
                Some(content_type.as_str()),
                bytes,
            ));
            Ok(JsValue::UNDEFINED)
        })
    }

    /// Upload the selected file; resolves to `"uploaded"`, `"rejected"`,
    /// `"failed"` or `"no_file"`
    pub fn submit(&self) -> js_sys::Promise {
        let page = self.page.clone();
        future_to_promise(async move {
            let Some(request) = page.borrow().begin_submit() else {
                return Ok(JsValue::from_str(upload_status(UploadOutcome::NoFile)));
            };

            let client = page.borrow().client().clone();
            let result = client.upload(request.file, &request.csrf_token).await;
            let outcome = page.borrow_mut().complete_submit(result);
            Ok(JsValue::from_str(upload_status(outcome)))
        })
    }

    #[wasm_bindgen(js_name = csrfToken)]
    pub fn csrf_token(&self) -> String {
        self.page.borrow().csrf_token().to_string()
    }

    #[wasm_bindgen(js_name = selectedFileName)]
    pub fn selected_file_name(&self) -> Option<String> {
        self.page.borrow().selected_file().map(|f| f.name.clone())
    }

    #[wasm_bindgen(js_name = drainNotifications)]
    pub fn drain_notifications(&self) -> Result<JsValue, JsValue> {
        to_js(&self.page.borrow_mut().drain_notifications())
    }
}
