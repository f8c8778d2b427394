pub mod api_client;
pub mod config;
pub mod errors;
pub mod models;
pub mod pages;
pub mod progress;
pub mod render;
pub mod store;
