//! HTTP request handlers for the web server.

mod api;
mod api_types;

pub use api::{api_analyze, api_categories, api_providers, health};
