//! secchat - a terminal client for the DevSecOps assistant chat API
//!
//! Sends a question to the assistant backend and renders the streamed reply,
//! including the tools the assistant calls along the way.
//!
//! This library exposes modules for use in integration tests.

pub mod adapters;
pub mod cli;
pub mod client;
pub mod config;
pub mod health_check;
pub mod models;
pub mod orchestrator;
pub mod presentation;
pub mod reducer;
pub mod render;
pub mod session;
pub mod sse;
pub mod traits;

pub use client::{ChatClient, ClientError};
pub use config::{ClientConfig, ConfigError};
pub use orchestrator::{ChatOrchestrator, Exchange, SnapshotStream, TRANSPORT_FAILURE_TEXT};
pub use reducer::{reduce, reduce_all};
pub use session::{ExchangeObserver, Session, SessionError};
