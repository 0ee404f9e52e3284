//! Infrastructure layer for Llamalink.
//!
//! Contains the implementation of the `ChatBackend` port defined in
//! `llamalink-core` (the reqwest-based Ollama client) and configuration
//! loading from `config.toml` plus environment overrides.

pub mod config;
pub mod ollama;
