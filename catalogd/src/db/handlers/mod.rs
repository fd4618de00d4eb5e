//! Database repositories, one per table.

pub mod prompts;
pub mod repository;
pub mod tools;
pub mod users;

pub use prompts::Prompts;
pub use repository::Repository;
pub use tools::Tools;
pub use users::Users;
