//! # foldergate-database
//!
//! PostgreSQL connection management, migrations, and the store traits the
//! service layer is written against, together with their sqlx-backed
//! repository implementations.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use repositories::{
    AclRepository, AclStore, DashboardRepository, DashboardStore, TeamRepository, TeamStore,
    UserRepository, UserStore,
};
