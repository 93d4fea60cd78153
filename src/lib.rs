pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod favorites;
pub mod state;
pub mod weather;
