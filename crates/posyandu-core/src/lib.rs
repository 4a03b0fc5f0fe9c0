//! Core types and trait definitions for the Posyandu bot.
//!
//! This crate is deliberately free of HTTP and spreadsheet dependencies.
//! The transport and storage crates depend on it; it depends on nothing
//! proprietary.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod child;
pub mod command;
pub mod error;
pub mod history;
pub mod mapping;
pub mod reply;
pub mod store;
pub mod workflow;

pub use error::{Error, Result};

#[cfg(test)]
mod tests;
