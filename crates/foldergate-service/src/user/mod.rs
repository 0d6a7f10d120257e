//! User-facing lookups.

pub mod display_name;

pub use display_name::{ANONYMOUS_LOGIN, DisplayNameResolver};
