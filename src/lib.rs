//! `podstart` binary support: CLI parsing, logging setup and service wiring.

pub mod cli;
pub mod logging;
pub mod runtime;
