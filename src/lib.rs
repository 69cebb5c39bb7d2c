pub mod app;
pub mod config;
pub mod counter;
pub mod editor;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod state;
pub mod storage;
pub mod summary;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use state::{AppState, Session};
pub use storage::{load_state, save_state};
