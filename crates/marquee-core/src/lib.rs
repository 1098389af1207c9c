//! Core types and trait definitions for the marquee movie tracker.
//!
//! This crate is deliberately free of HTTP, filesystem and database
//! dependencies. Every other crate depends on it.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod movie;
pub mod review;
pub mod store;
pub mod title;
pub mod watch;

pub use error::{Error, Result};
pub use movie::ImdbId;
pub use title::normalize_title;
