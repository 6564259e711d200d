pub mod statistics;

pub use statistics::{ProgressReport, StatisticsService};
