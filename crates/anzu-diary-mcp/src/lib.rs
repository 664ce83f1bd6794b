//! Anzu Diary MCP Server
//!
//! Model Context Protocol server that exposes the diary API (add an entry,
//! list a year's entries) as tools for AI assistants.

pub mod dispatcher;
pub mod logging;
pub mod server;
pub mod tools;

pub use anzu_diary_api_client::ApiClient;
pub use anzu_diary_core::DiaryConfig;
pub use dispatcher::DiaryDispatcher;
pub use server::DiaryService;
