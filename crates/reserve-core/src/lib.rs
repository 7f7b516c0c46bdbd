//! Core types and logic for the recruitment reserve.
//!
//! This crate is free of database and terminal dependencies. Storage
//! backends implement [`store::EntryStore`]; front ends drive a
//! [`session::Session`].

pub mod candidate;
pub mod error;
pub mod faq;
pub mod filter;
pub mod registry;
pub mod session;
pub mod state;
pub mod store;

pub use error::{Error, PersistWarning, Result};

#[cfg(test)]
mod tests;
