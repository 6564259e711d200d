pub mod dialog;
pub mod statistics;

pub use dialog::{
    DialogItem, DialogStatus, PendingResponse, TranslateRequest, TranslateResponse, UpdateRequest,
};
pub use statistics::{Statistics, StatusCounts};
