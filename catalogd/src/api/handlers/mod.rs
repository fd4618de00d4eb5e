//! Route handlers, one module per resource.

pub mod auth;
pub mod prompts;
pub mod seed;
pub mod tools;
