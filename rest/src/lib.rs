//! Remote voter directory client.
//!
//! Talks to a hosted relational table through a PostgREST-style HTTP API
//! (`GET /<table>?column=eq.value`, `POST`, `PATCH`). Only plain CRUD calls
//! are made; uniqueness of phone number and national ID is enforced by the
//! table's constraints and surfaced as HTTP 409.

pub mod client;
pub mod error;
pub mod row;

pub use client::{RestConfig, RestDirectory};
pub use error::RestError;
