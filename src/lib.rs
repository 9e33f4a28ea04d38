// Library surface for headless/integration tests and reuse.
// Keep this lean: terminal setup and the event loop live in main.rs.
pub mod app_dirs;
pub mod config;
pub mod error;
pub mod game;
pub mod input;
pub mod logging;
pub mod physics;
pub mod runtime;
pub mod schedule;
pub mod session;
pub mod timer;
pub mod trail;
pub mod ui;
