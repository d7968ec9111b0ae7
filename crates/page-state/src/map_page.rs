//! Map page store: paginated records, chart controls and shape annotations
//!
//! Every network action is split in two so the browser host never holds a
//! borrow of the store across an `.await`:
//!
//! 1. a `begin_*` call mutates state synchronously and returns a
//!    [`FetchTicket`] (or `None` when no request should go out);
//! 2. the host performs the request and hands the result to
//!    [`MapPage::complete_fetch`].
//!
//! The `async` convenience methods chain both steps for native callers.

use plotboard_config::PlotboardConfig;
use plotboard_data::{DataClient, HttpTransport};
use plotboard_shared::{
    ControlLimits, DataPage, DragMode, Endpoint, KeyEvent, Notification, NotificationQueue,
    PaginationCursor, PendingToast, PlotboardError, PlotboardResult, Record, RelayoutEvent, Shape,
    ShapeColor, ToastMessages, VisualizationParams,
};
use url::Url;

use crate::figure::PlotFigure;
use crate::request_guard::{Freshness, RequestGuard, RequestTag};
use crate::shape_history::ShapeHistory;

pub const ENDPOINT_FETCH_TOAST: ToastMessages = ToastMessages {
    loading: "Fetching data, please wait...",
    success: "Data fetched successfully",
    error: "Error fetching data",
};

pub const MORE_FETCH_TOAST: ToastMessages = ToastMessages {
    loading: "Fetching more data, please wait...",
    success: "More data fetched successfully",
    error: "Error fetching more data",
};

pub const ALL_DATA_FETCHED: &str = "All data fetched";
pub const NO_MORE_DATA: &str = "All data fetched, you are not able to fetch more";

/// Which action issued a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    Reload,
    EndpointSwitch,
    NextPage,
}

/// A data request the host should perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub url: Url,
    pub endpoint: Endpoint,
    pub page: u32,
    pub kind: FetchKind,
    tag: RequestTag,
    toast: Option<PendingToast>,
}

/// What happened to a completed request
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// Records were appended; `complete` when the last page was reached
    Applied { appended: usize, complete: bool },
    /// Answer to a request issued before the last endpoint switch
    Discarded,
    Failed(PlotboardError),
    /// No request was issued
    NotIssued,
}

pub struct MapPage<T> {
    client: DataClient<T>,
    limits: ControlLimits,
    records: Vec<Record>,
    cursor: PaginationCursor,
    params: VisualizationParams,
    shapes: ShapeHistory,
    guard: RequestGuard,
    notifications: NotificationQueue,
}

impl<T: HttpTransport> MapPage<T> {
    pub fn new(client: DataClient<T>, config: &PlotboardConfig) -> Self {
        Self {
            client,
            limits: config.controls.clone(),
            records: Vec::new(),
            cursor: PaginationCursor::default(),
            params: VisualizationParams::from_limits(&config.controls),
            shapes: ShapeHistory::with_limit(config.page.shape_history_limit),
            guard: RequestGuard::new(),
            notifications: NotificationQueue::new(),
        }
    }

    // ----- pagination -------------------------------------------------

    /// Fetch the cursor's current page without a loading triad
    pub fn begin_fetch(&mut self) -> Option<FetchTicket> {
        self.issue_ticket(FetchKind::Reload, None)
    }

    /// Switch endpoint: reset to page 1, clear records, fetch
    pub fn begin_endpoint_click(&mut self, endpoint: Endpoint) -> Option<FetchTicket> {
        log::info!("Switching data endpoint to {endpoint}");
        self.guard.next_epoch();
        self.cursor.reset(endpoint);
        self.records.clear();

        let toast = self.notifications.begin(ENDPOINT_FETCH_TOAST);
        self.issue_ticket(FetchKind::EndpointSwitch, Some(toast))
    }

    /// Advance to the next page and fetch it, or report exhaustion
    pub fn begin_more_click(&mut self) -> Option<FetchTicket> {
        if self.cursor.advance().is_none() {
            log::info!(
                "No more pages for {} ({} of {})",
                self.cursor.endpoint,
                self.cursor.page,
                self.cursor.total_pages
            );
            self.notifications.error(NO_MORE_DATA);
            return None;
        }

        let toast = self.notifications.begin(MORE_FETCH_TOAST);
        self.issue_ticket(FetchKind::NextPage, Some(toast))
    }

    fn issue_ticket(
        &mut self,
        kind: FetchKind,
        toast: Option<PendingToast>,
    ) -> Option<FetchTicket> {
        let endpoint = self.cursor.endpoint;
        let page = self.cursor.page;

        match self.client.page_url(endpoint, page) {
            Ok(url) => Some(FetchTicket {
                url,
                endpoint,
                page,
                kind,
                tag: self.guard.issue(),
                toast,
            }),
            Err(e) => {
                log::error!("Error fetching data: {e}");
                self.roll_back(kind, page);
                match toast {
                    Some(toast) => self.notifications.resolve(toast, false),
                    None => {
                        self.notifications.error(ENDPOINT_FETCH_TOAST.error);
                    }
                }
                None
            }
        }
    }

    /// Apply the result of a ticket's request
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: PlotboardResult<DataPage>,
    ) -> FetchOutcome {
        let FetchTicket {
            endpoint,
            page,
            kind,
            tag,
            toast,
            ..
        } = ticket;

        let outcome = match result {
            Err(e) => {
                log::error!("Error fetching data: {e}");
                if self.guard.classify(tag) != Freshness::Stale {
                    self.roll_back(kind, page);
                }
                FetchOutcome::Failed(e)
            }
            Ok(data_page) => match self.guard.classify(tag) {
                Freshness::Stale => {
                    log::debug!(
                        "Discarding page {page} of {endpoint}: endpoint changed since request"
                    );
                    FetchOutcome::Discarded
                }
                freshness => self.apply_page(page, data_page, freshness, tag),
            },
        };

        let succeeded = !matches!(outcome, FetchOutcome::Failed(_));
        match toast {
            Some(toast) => self.notifications.resolve(toast, succeeded),
            None if !succeeded => {
                self.notifications.error(ENDPOINT_FETCH_TOAST.error);
            }
            None => {}
        }

        outcome
    }

    // A failed "More" leaves the cursor where it was so the click can be retried
    fn roll_back(&mut self, kind: FetchKind, page: u32) {
        if kind == FetchKind::NextPage && self.cursor.page == page && page > 1 {
            self.cursor.page = page - 1;
        }
    }

    fn apply_page(
        &mut self,
        page: u32,
        data_page: DataPage,
        freshness: Freshness,
        tag: RequestTag,
    ) -> FetchOutcome {
        let DataPage { data, total_pages } = data_page;
        let appended = data.len();
        self.records.extend(data);

        if freshness == Freshness::Current {
            self.cursor.set_total_pages(total_pages);
            self.guard.mark_applied(tag);
        } else {
            log::debug!("Page {page} completed out of order; keeping newer page count");
        }

        log::info!(
            "Fetched page {page}/{total_pages} from {}: {appended} records ({} total)",
            self.cursor.endpoint,
            self.records.len()
        );

        let complete = page == total_pages;
        if complete {
            self.notifications.success(ALL_DATA_FETCHED);
        }

        FetchOutcome::Applied { appended, complete }
    }

    /// Perform a ticket's request with this page's client
    pub async fn perform(&self, ticket: &FetchTicket) -> PlotboardResult<DataPage> {
        self.client.fetch_url(ticket.url.clone()).await
    }

    pub async fn fetch_data(&mut self) -> FetchOutcome {
        let ticket = self.begin_fetch();
        self.run(ticket).await
    }

    pub async fn handle_endpoint_click(&mut self, endpoint: Endpoint) -> FetchOutcome {
        let ticket = self.begin_endpoint_click(endpoint);
        self.run(ticket).await
    }

    pub async fn handle_more_click(&mut self) -> FetchOutcome {
        let ticket = self.begin_more_click();
        self.run(ticket).await
    }

    async fn run(&mut self, ticket: Option<FetchTicket>) -> FetchOutcome {
        match ticket {
            Some(ticket) => {
                let result = self.perform(&ticket).await;
                self.complete_fetch(ticket, result)
            }
            None => FetchOutcome::NotIssued,
        }
    }

    // ----- shapes -----------------------------------------------------

    /// Apply a relayout report from the chart editing layer
    pub fn handle_relayout(&mut self, event: RelayoutEvent) {
        if let Some(shapes) = event.shapes {
            log::debug!("Shape set changed: {} shapes", shapes.len());
            self.shapes.record(shapes);
        }

        if let Some(value) = event.dragmode {
            match value.as_str().map(str::parse::<DragMode>) {
                Some(Ok(mode)) => self.params.drag_mode = mode,
                Some(Err(e)) => log::warn!("Ignoring drag mode: {e}"),
                None => log::warn!("Ignoring non-string drag mode {value}"),
            }
        }
    }

    /// Restore the previous shape snapshot; false when history is empty
    pub fn undo_last_shape(&mut self) -> bool {
        let undone = self.shapes.undo();
        if undone {
            log::debug!("Undo: {} shapes remain", self.shapes.current().len());
        }
        undone
    }

    /// Keyboard handler; true when the event triggered an undo
    pub fn handle_key_down(&mut self, event: &KeyEvent) -> bool {
        event.is_undo() && self.undo_last_shape()
    }

    // ----- controls ---------------------------------------------------

    pub fn set_label_size(&mut self, value: i64) -> u8 {
        self.params.label_size = self.limits.clamp_label_size(value);
        self.params.label_size
    }

    /// Slider input arrives as a string
    pub fn set_label_size_input(&mut self, input: &str) -> PlotboardResult<u8> {
        let value: f64 = input
            .trim()
            .parse()
            .map_err(|_| PlotboardError::invalid_input("labelSize", format!("'{input}' is not a number")))?;
        Ok(self.set_label_size(value.round() as i64))
    }

    pub fn set_node_size_multiplier(&mut self, value: f64) -> f64 {
        self.params.node_size_multiplier = self.limits.clamp_node_size(value);
        self.params.node_size_multiplier
    }

    pub fn set_node_size_input(&mut self, input: &str) -> PlotboardResult<f64> {
        let value: f64 = input.trim().parse().map_err(|_| {
            PlotboardError::invalid_input("nodeSizeMultiplier", format!("'{input}' is not a number"))
        })?;
        Ok(self.set_node_size_multiplier(value))
    }

    /// Set the stroke color for new shapes; invalid input keeps the old one
    pub fn set_shape_color(&mut self, input: &str) -> PlotboardResult<()> {
        let color = ShapeColor::parse(input).map_err(|e| {
            log::warn!("Keeping shape color {}: {e}", self.params.shape_color);
            e
        })?;
        self.params.shape_color = color;
        Ok(())
    }

    pub fn set_drag_mode(&mut self, mode: DragMode) {
        self.params.drag_mode = mode;
    }

    // ----- views ------------------------------------------------------

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn cursor(&self) -> &PaginationCursor {
        &self.cursor
    }

    pub fn params(&self) -> &VisualizationParams {
        &self.params
    }

    pub fn limits(&self) -> &ControlLimits {
        &self.limits
    }

    pub fn shapes(&self) -> &[Shape] {
        self.shapes.current()
    }

    pub fn shape_history_depth(&self) -> usize {
        self.shapes.depth()
    }

    pub fn client(&self) -> &DataClient<T> {
        &self.client
    }

    pub fn notifications(&self) -> &NotificationQueue {
        &self.notifications
    }

    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain()
    }

    pub fn figure(&self) -> PlotFigure {
        PlotFigure::build(&self.records, &self.params, self.shapes.current())
    }
}
