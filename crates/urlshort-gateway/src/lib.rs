//! HTTP front end for the urlshort redirector.
//!
//! Wires the mapping sources into a resolver chain, registers the chain as
//! the catch-all route of an axum router and runs it until shutdown.

pub mod app;
pub mod cli;
pub mod demo;
pub mod handlers;
pub mod server;
pub mod state;
pub mod telemetry;
