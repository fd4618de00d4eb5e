//! Authentication: argon2 password hashing, JWT session tokens, and the
//! bearer-token extractor guarding write routes.

pub mod current_admin;
pub mod password;
pub mod session;

pub use crate::api::models::auth::CurrentAdmin;
