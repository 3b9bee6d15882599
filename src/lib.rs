pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod infrastructure;
pub mod input;
pub mod modules;
pub mod navigation;
pub mod store;
pub mod ui;
