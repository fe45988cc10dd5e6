// src/core/mod.rs
//! Core services shared by the CLI and library callers

pub mod service_client;

pub use service_client::{AnalysisBackend, ServiceClient, SubmitError};
