//! Core types and trait definitions for the ShouldIEat allergen engine.
//!
//! This crate has no HTTP or database dependencies.
//! Everything here is synchronous and pure apart from the store traits, which
//! backends implement and callers inject.

// Native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod card;
pub mod catalog;
pub mod category;
pub mod checklist;
pub mod error;
pub mod matcher;
pub mod profile;
pub mod resolve;
pub mod store;

pub use error::{Error, Result};
