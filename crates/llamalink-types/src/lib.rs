//! Shared domain types for Llamalink.
//!
//! This crate contains the types used across the relay: conversation
//! turns, backend wire shapes, configuration, and the error taxonomy.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod wire;
