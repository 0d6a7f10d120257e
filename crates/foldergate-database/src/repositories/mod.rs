//! Store traits consumed by the service layer and their PostgreSQL
//! repository implementations.

pub mod acl;
pub mod dashboard;
pub mod team;
pub mod user;

pub use acl::{AclRepository, AclStore};
pub use dashboard::{DashboardRepository, DashboardStore};
pub use team::{TeamRepository, TeamStore};
pub use user::{UserRepository, UserStore};
