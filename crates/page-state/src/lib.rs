//! Page stores for Plotboard
//!
//! One store per page, each owning its network client and notification
//! queue. Stores are single-threaded and mutated only through the methods
//! below, one call per user event.

pub mod figure;
pub mod map_page;
pub mod request_guard;
pub mod shape_history;
pub mod upload_page;

pub use figure::PlotFigure;
pub use map_page::{FetchKind, FetchOutcome, FetchTicket, MapPage};
pub use shape_history::ShapeHistory;
pub use upload_page::{UploadOutcome, UploadPage, UploadRequest};
