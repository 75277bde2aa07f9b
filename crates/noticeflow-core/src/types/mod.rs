//! Core type definitions used across the NoticeFlow workspace.

pub mod pagination;

pub use pagination::{PageMeta, PageRequest, PageResponse};
