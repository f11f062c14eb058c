//! Trivia question HTTP API.
//!
//! Questions are loaded at startup from a fixed set of JSON files, served
//! whole, by category, or one at random with their answer options shuffled,
//! and new submissions are appended to `preguntas_custom.json`.
//!
//! ```text
//! GET  /preguntas              every question
//! GET  /pregunta/random        one random question (null when empty)
//! GET  /preguntas/:categoria   case-insensitive category filter
//! POST /agregar                add a question
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`question`]: Question records and option shuffling
//! - [`store`]: Storage backends
//! - [`service`]: In-memory question list and its operations
//! - [`api`]: HTTP handlers and router
//! - [`metrics`]: Prometheus metrics
//! - [`report`]: Data directory report for `check-data`
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod question;
pub mod report;
pub mod service;
pub mod store;
pub mod utils;

pub use config::Config;
pub use error::{AppError, Result};
