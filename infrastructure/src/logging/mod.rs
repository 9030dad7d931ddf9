//! Run trace logging adapters

mod jsonl;

pub use jsonl::JsonlRunLogger;
