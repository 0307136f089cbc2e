// Core infrastructure modules
pub mod config;
pub mod core;
pub mod storage;

// Feature-specific modules
pub mod app;
pub mod dataset;
pub mod filter;
pub mod input;
pub mod search;
pub mod theme;
pub mod tui;
pub mod ui;
