//! HTTP route handlers.

pub mod admin;
pub mod quote;
pub mod site;
