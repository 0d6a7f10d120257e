//! Org role and request principal.

pub mod principal;
pub mod role;

pub use principal::Principal;
pub use role::OrgRole;
