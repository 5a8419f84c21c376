pub mod app;
pub mod config;
pub mod error;
pub mod flash;
pub mod handler;
pub mod model;
pub mod regression;
pub mod schema;
pub mod store;
pub mod views;
