//! Business logic for Llamalink.
//!
//! This crate defines the backend "port" ([`backend::ChatBackend`]) that
//! the infrastructure layer implements, the in-memory conversation
//! store, and the relay service that orchestrates one chat exchange.
//! It depends only on `llamalink-types` -- never on `llamalink-infra`
//! or any HTTP crate.

pub mod backend;
pub mod reconcile;
pub mod relay;
pub mod store;
