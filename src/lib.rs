//! Booking backend for a beauty salon.
//!
//! Exposes the services/slots/appointments REST surface over a SQLite store.
//! The binary in `src/main.rs` wires the server; the modules live here so the
//! integration tests can drive the full application.

pub mod auth;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;
