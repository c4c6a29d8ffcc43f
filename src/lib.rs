pub mod app;
pub mod chat;
pub mod config;
pub mod event;
pub mod ui;
pub mod util;

pub use app::App;
pub use config::ChatConfig;
