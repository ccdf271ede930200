//! Command-line front end for the calculator core.
//!
//! The binary in `main.rs` only parses arguments and prints; everything it
//! runs lives here so it can be tested directly.

pub mod commands;
pub mod config;
pub mod keys;
pub mod logging;
pub mod repl;
pub mod state;
pub mod utils;
