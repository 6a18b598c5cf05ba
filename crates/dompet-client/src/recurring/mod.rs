pub mod processor;
pub mod schedule;
pub mod synthesis;

pub use processor::{ProcessResult, RecurringProcessor, TemplateFailure};
