pub mod api;
pub mod app;
pub mod calendar;
pub mod config;
pub mod input;
pub mod locale;
pub mod logger;
pub mod model;
pub mod plain;
pub mod runtime;
pub mod ui;
