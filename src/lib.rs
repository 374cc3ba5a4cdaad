// src/lib.rs

pub mod api;
pub mod app;
pub mod chat_view;
pub mod constants;
pub mod errors;
pub mod key_handlers;
pub mod logging;
pub mod markdown;
pub mod message;
pub mod session;
pub mod status_indicator;
pub mod typewriter;

pub use app::App;
