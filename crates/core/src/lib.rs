//! Notifeed core: notification domain types, pagination rules, the storage
//! collaborator trait, and the paginated reader built on top of it.
//!
//! Has no I/O dependencies so both the database and API crates can use it.

pub mod error;
pub mod notification;
pub mod pagination;
pub mod reader;
pub mod store;
pub mod types;
