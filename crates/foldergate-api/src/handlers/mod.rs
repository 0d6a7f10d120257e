//! HTTP request handlers.

pub mod folder;
pub mod health;
