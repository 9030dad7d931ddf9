//! Study-plan publishing adapters

mod markdown;

pub use markdown::MarkdownPlanPublisher;
