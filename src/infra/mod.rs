//! Infrastructure implementations of the application ports.

pub mod command_runner;
pub mod config;
pub mod controller;
pub mod scripts;
pub mod snapshot;
