//! PostgreSQL implementations of the store traits.

pub mod form_schema;
pub mod notification;
pub mod user;

pub use form_schema::FormSchemaRepository;
pub use notification::NotificationRepository;
pub use user::UserRepository;
