//! Identity provider adapter.

mod client;
mod dto;

pub use client::IdentityClient;
