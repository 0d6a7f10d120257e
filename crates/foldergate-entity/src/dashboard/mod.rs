//! Dashboard and folder domain entities.

pub mod model;

pub use model::{Dashboard, DashboardRef};
