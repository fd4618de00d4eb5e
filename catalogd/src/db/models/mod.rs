//! Row models and write requests for the persistence layer.

pub mod prompts;
pub mod tools;
pub mod users;
