//! Notified person entities.

pub mod model;

pub use model::{CreateNotifiedPerson, NotifiedPerson, UpdateNotifiedPerson};
