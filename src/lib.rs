//! Gestão - terminal administration client for church cell groups.
//!
//! This crate talks to the church management REST API on behalf of a signed-in
//! leader: células with their encontros and membros, redes, supervisores, cultos
//! and bible school turmas. Sessions come from a Supabase-style identity provider
//! and can be kept in the system keyring.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing use cases, forms and the session-gated client.
pub mod application;
/// Domain layer containing entities, errors, routes and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;
/// Presentation layer containing UI components and event handling.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "gestao";
