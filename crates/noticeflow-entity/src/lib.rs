//! # noticeflow-entity
//!
//! Domain entity models for NoticeFlow. Every struct in this crate
//! represents a database table row or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and database
//! entities additionally derive `sqlx::FromRow`.

pub mod form;
pub mod notification;
pub mod person;
pub mod user;
