//! Shared identifier types.
//!
//! Store identities are SQLite rowids: assigned at insert, immutable, and the
//! only key mutations accept.

/// Store identity of a tool record.
pub type ToolId = i64;

/// Store identity of a prompt record.
pub type PromptId = i64;

/// Store identity of an admin user.
pub type UserId = i64;
