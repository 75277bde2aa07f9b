//! Dynamic form schemas served to clients for each creation step.

pub mod builtin;
pub mod field;
pub mod model;

pub use field::{FieldError, FieldKind, FormField, RadioOption};
pub use model::{FormDefinition, FormSchema};
