//! `MapPageHandle`: the map page store as seen from JavaScript

use plotboard_data::{DataClient, HttpClient};
use plotboard_pages::{FetchOutcome, FetchTicket, MapPage};
use plotboard_shared::{DragMode, Endpoint, KeyEvent, PlotboardError, RelayoutEvent};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

use crate::keyboard::KeyListener;
use crate::report::FetchReport;
use crate::{load_config, to_js};

type SharedPage = Rc<RefCell<MapPage<HttpClient>>>;

#[wasm_bindgen]
pub struct MapPageHandle {
    page: SharedPage,
    listener: Option<KeyListener>,
}

#[wasm_bindgen]
impl MapPageHandle {
    /// `config_json` is an optional JSON `PlotboardConfig`
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<MapPageHandle, JsValue> {
        let config = load_config(config_json)?;
        let transport = HttpClient::new(&config.backend)?;
        let client = DataClient::new(transport, config.backend.clone());

        Ok(MapPageHandle {
            page: Rc::new(RefCell::new(MapPage::new(client, &config))),
            listener: None,
        })
    }

    /// Reload the current page; resolves to a fetch report
    #[wasm_bindgen(js_name = fetchData)]
    pub fn fetch_data(&self) -> js_sys::Promise {
        let ticket = self.page.borrow_mut().begin_fetch();
        run_ticket(self.page.clone(), ticket)
    }

    /// `endpoint` is `"/"`, `"/buttontwo"` or `"/buttonthree"`
    #[wasm_bindgen(js_name = endpointClick)]
    pub fn endpoint_click(&self, endpoint: &str) -> Result<js_sys::Promise, JsValue> {
        let endpoint: Endpoint = endpoint.parse()?;
        let ticket = self.page.borrow_mut().begin_endpoint_click(endpoint);
        Ok(run_ticket(self.page.clone(), ticket))
    }

    #[wasm_bindgen(js_name = moreClick)]
    pub fn more_click(&self) -> js_sys::Promise {
        let ticket = self.page.borrow_mut().begin_more_click();
        run_ticket(self.page.clone(), ticket)
    }

    /// Forward a plotly `relayout` event
    pub fn relayout(&self, event: JsValue) -> Result<(), JsValue> {
        let event: RelayoutEvent =
            serde_wasm_bindgen::from_value(event).map_err(|e| PlotboardError::JsInterop {
                message: format!("Invalid relayout event: {e}"),
            })?;
        self.page.borrow_mut().handle_relayout(event);
        Ok(())
    }

    /// Returns true when the key press undid a shape
    #[wasm_bindgen(js_name = keyDown)]
    pub fn key_down(&self, key: &str, ctrl_key: bool) -> bool {
        let event = KeyEvent {
            ctrl_key,
            ..KeyEvent::new(key)
        };
        self.page.borrow_mut().handle_key_down(&event)
    }

    pub fn undo(&self) -> bool {
        self.page.borrow_mut().undo_last_shape()
    }

    /// Listen for Ctrl+Z on the window; `on_undo` is called after each undo
    #[wasm_bindgen(js_name = attachKeyboard)]
    pub fn attach_keyboard(&mut self, on_undo: Option<js_sys::Function>) -> Result<(), JsValue> {
        let page = Rc::downgrade(&self.page);
        let listener = KeyListener::attach(move |event| {
            let Some(strong) = page.upgrade() else {
                return;
            };
            let Ok(mut store) = strong.try_borrow_mut() else {
                log::debug!("Page busy, ignoring key {}", event.key);
                return;
            };
            if store.handle_key_down(&event) {
                drop(store);
                if let Some(callback) = &on_undo {
                    if let Err(e) = callback.call0(&JsValue::NULL) {
                        log::error!("Undo callback failed: {e:?}");
                    }
                }
            }
        })?;

        // Replacing drops (and detaches) any previous listener
        self.listener = Some(listener);
        Ok(())
    }

    /// Remove the keyboard listener
    pub fn dispose(&mut self) {
        self.listener = None;
    }

    #[wasm_bindgen(js_name = setLabelSize)]
    pub fn set_label_size(&self, value: f64) -> u8 {
        self.page.borrow_mut().set_label_size(value.round() as i64)
    }

    #[wasm_bindgen(js_name = setLabelSizeInput)]
    pub fn set_label_size_input(&self, input: &str) -> Result<u8, JsValue> {
        Ok(self.page.borrow_mut().set_label_size_input(input)?)
    }

    #[wasm_bindgen(js_name = setNodeSizeMultiplier)]
    pub fn set_node_size_multiplier(&self, value: f64) -> f64 {
        self.page.borrow_mut().set_node_size_multiplier(value)
    }

    #[wasm_bindgen(js_name = setNodeSizeInput)]
    pub fn set_node_size_input(&self, input: &str) -> Result<f64, JsValue> {
        Ok(self.page.borrow_mut().set_node_size_input(input)?)
    }

    #[wasm_bindgen(js_name = setShapeColor)]
    pub fn set_shape_color(&self, color: &str) -> Result<(), JsValue> {
        Ok(self.page.borrow_mut().set_shape_color(color)?)
    }

    #[wasm_bindgen(js_name = setDragMode)]
    pub fn set_drag_mode(&self, mode: &str) -> Result<(), JsValue> {
        let mode: DragMode = mode.parse()?;
        self.page.borrow_mut().set_drag_mode(mode);
        Ok(())
    }

    /// `{data, layout, config}` for the plotting component
    pub fn figure(&self) -> Result<JsValue, JsValue> {
        to_js(&self.page.borrow().figure())
    }

    pub fn records(&self) -> Result<JsValue, JsValue> {
        to_js(self.page.borrow().records())
    }

    pub fn cursor(&self) -> Result<JsValue, JsValue> {
        to_js(self.page.borrow().cursor())
    }

    pub fn params(&self) -> Result<JsValue, JsValue> {
        to_js(self.page.borrow().params())
    }

    pub fn limits(&self) -> Result<JsValue, JsValue> {
        to_js(self.page.borrow().limits())
    }

    #[wasm_bindgen(js_name = drainNotifications)]
    pub fn drain_notifications(&self) -> Result<JsValue, JsValue> {
        to_js(&self.page.borrow_mut().drain_notifications())
    }
}

// The store is borrowed only before and after the request, never across it
fn run_ticket(page: SharedPage, ticket: Option<FetchTicket>) -> js_sys::Promise {
    future_to_promise(async move {
        let Some(ticket) = ticket else {
            return to_js(&FetchReport::from(FetchOutcome::NotIssued));
        };

        let client = page.borrow().client().clone();
        let result = client.fetch_url(ticket.url.clone()).await;
        let outcome = page.borrow_mut().complete_fetch(ticket, result);
        to_js(&FetchReport::from(outcome))
    })
}
