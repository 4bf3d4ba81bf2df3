//! Application layer — port traits and the services that orchestrate
//! them. Imports only from `crate::domain` and its own ports.

pub mod executor;
pub mod lifecycle;
pub mod ports;
