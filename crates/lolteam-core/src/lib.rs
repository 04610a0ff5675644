// Library root: re-exports all modules so the TUI crate and integration tests
// can reach the public API.

pub mod app;
pub mod champions;
pub mod config;
pub mod db;
pub mod export;
pub mod protocol;
pub mod team;
