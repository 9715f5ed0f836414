//! Read-side services for renderers and exporters.

pub mod export;
pub mod query_handlers;
