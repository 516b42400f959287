//! Watch appraisal report model and the derived views a report page shows.

pub mod config;
pub mod export;
pub mod network;
pub mod report;
pub mod summary;
pub mod view;

pub use report::{AppraisalReport, SchemaError};
pub use view::{PageModel, ReportView, ViewConfig};
