//! Anzu Diary Core Library
//!
//! Error kinds, the start-up configuration value, and the diary models
//! shared by the API client and the MCP server.

pub mod config;
pub mod error;
pub mod models;

pub use config::DiaryConfig;
pub use error::{DiaryError, LogLevel};
pub use models::{DiaryEntry, DiaryPage};
