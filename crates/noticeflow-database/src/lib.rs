//! # noticeflow-database
//!
//! Persistence for NoticeFlow. The [`store`] module defines the traits the
//! service layer depends on; [`repositories`] implements them on PostgreSQL
//! and [`memory`] implements them in process.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use store::{FormSchemaStore, NotificationFilter, NotificationStore, Stores, UserStore};
