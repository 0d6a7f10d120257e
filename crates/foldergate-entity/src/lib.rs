//! # foldergate-entity
//!
//! Domain entity models for FolderGate. Database entities derive
//! `sqlx::FromRow`; value objects such as [`user::Principal`] and
//! [`permission::Capabilities`] only carry serde derives.

pub mod dashboard;
pub mod permission;
pub mod user;
