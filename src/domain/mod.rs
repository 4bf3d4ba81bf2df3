//! Domain types and pure logic — no I/O, no async, no network access.

pub mod command;
pub mod config;
pub mod error;
pub mod job;
pub mod sanitize;
pub mod snapshot;
