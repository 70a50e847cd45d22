//! Token-based identity for API callers.

pub mod jwt;
