pub mod app;
pub mod app_state;
pub mod config;
pub mod db;
pub mod error;
pub mod forms;
pub mod helpers;
pub mod middleware;
pub mod modules;
pub mod render;
pub mod session;
pub mod telemetry;
