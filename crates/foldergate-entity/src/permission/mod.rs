//! Access control domain entities.

pub mod acl;
pub mod capabilities;
pub mod level;

pub use acl::{AclEntry, AclEntryRow, AclSubject, DashboardAcl};
pub use capabilities::Capabilities;
pub use level::PermissionLevel;
