pub mod queue;
pub mod session;

pub use queue::{AdvanceOutcome, LoadOutcome, QueueController, WorkingQueue};
pub use session::{EditSession, SaveTicket, SavedDraft, TranslateTicket};
