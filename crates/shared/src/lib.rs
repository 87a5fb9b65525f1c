//! Shared domain and wire types for the auction admin console.

pub mod domain;
pub mod error;
pub mod protocol;
