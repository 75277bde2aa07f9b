//! Integration tests driving the HTTP router over the in-memory stores.

mod helpers;

mod auth_test;
mod form_test;
mod notification_test;
