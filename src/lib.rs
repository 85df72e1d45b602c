// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod app_dirs;
pub mod arcade;
pub mod config;
pub mod error;
pub mod highscore;
pub mod history;
pub mod language;
pub mod practice;
pub mod runtime;
pub mod scoring;
pub mod session;
pub mod timer;
