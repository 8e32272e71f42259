//! Database access: initialization, document store and token store

pub mod documents;
pub mod init;
pub mod tokens;

pub use documents::DocumentStore;
pub use init::init_database;
pub use tokens::{issue_token, resolve_token, revoke_token};
